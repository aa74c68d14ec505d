use web_sys::window;

/// Best effort; browsers without the async clipboard API are ignored.
pub fn copy_text_to_clipboard(text: &str) {
    let Ok(payload) = serde_json::to_string(text) else {
        return;
    };
    let js = format!(
        "if (navigator && navigator.clipboard) {{ navigator.clipboard.writeText({payload}); }}"
    );
    let _ = js_sys::eval(&js);
}

pub fn set_document_title(title: &str) {
    if let Some(document) = window().and_then(|w| w.document()) {
        document.set_title(title);
    }
}

pub fn page_title(section: &str) -> String {
    if section.is_empty() {
        "MOLT Console".to_string()
    } else {
        format!("{section} | MOLT Console")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_suffixed() {
        assert_eq!(page_title(""), "MOLT Console");
        assert_eq!(page_title("Fetch 12"), "Fetch 12 | MOLT Console");
    }
}
