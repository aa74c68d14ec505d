use dioxus::prelude::*;

/// Text input that validates on blur only.
///
/// `validate` returns the error message for a value, empty when valid.
#[component]
pub fn FieldInput(
    label: String,
    value: String,
    on_input: EventHandler<String>,
    validate: Callback<String, String>,
    #[props(default)] placeholder: String,
    #[props(default = "text".to_string())] input_type: String,
) -> Element {
    let mut error = use_signal(String::new);
    let current = value.clone();

    rsx! {
        div { class: "field",
            label { "{label}" }
            input {
                r#type: "{input_type}",
                class: if error().is_empty() { "" } else { "invalid" },
                value: "{value}",
                placeholder: "{placeholder}",
                oninput: move |evt| on_input.call(evt.value()),
                onblur: move |_| error.set(validate.call(current.clone())),
            }
            if !error().is_empty() {
                span { class: "field-error", "{error}" }
            }
        }
    }
}

#[component]
pub fn Toggle(label: String, checked: bool, on_change: EventHandler<bool>) -> Element {
    rsx! {
        label { class: "toggle",
            input {
                r#type: "checkbox",
                checked,
                onchange: move |evt| on_change.call(evt.checked()),
            }
            "{label}"
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[component]
pub fn SelectInput(
    label: String,
    value: String,
    options: Vec<SelectOption>,
    on_change: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "field",
            label { "{label}" }
            select {
                value: "{value}",
                onchange: move |evt| on_change.call(evt.value()),
                for option in options.iter() {
                    option {
                        key: "{option.value}",
                        value: "{option.value}",
                        selected: option.value == value,
                        "{option.label}"
                    }
                }
            }
        }
    }
}
