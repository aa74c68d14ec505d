use dioxus::prelude::*;

/// One titled block of the help panel.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideSection {
    pub title: &'static str,
    pub intro: &'static str,
    /// `(term, explanation)` pairs rendered as a definition list.
    pub entries: Vec<(&'static str, &'static str)>,
}

/// Collapsible static help panel shown beside a form.
#[component]
pub fn SetupGuide(title: String, sections: Vec<GuideSection>) -> Element {
    rsx! {
        details { class: "panel guide", open: true,
            summary { class: "panel-title", "{title}" }
            for section in sections {
                div { key: "{section.title}", class: "guide-section",
                    h4 { "{section.title}" }
                    p { class: "muted", "{section.intro}" }
                    if !section.entries.is_empty() {
                        dl {
                            for (term, text) in section.entries {
                                div { key: "{term}",
                                    dt { "{term}" }
                                    dd { "{text}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
