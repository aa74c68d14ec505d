use dioxus::prelude::*;
use molt_types::RunStatus;

use crate::view_model::{status_label, ChipVariant};

#[component]
pub fn Chip(label: String, variant: ChipVariant) -> Element {
    let (fg, bg) = variant.colors();
    rsx! {
        span {
            class: "chip",
            style: "color: {fg}; background: {bg};",
            "{label}"
        }
    }
}

#[component]
pub fn StatusChip(status: RunStatus) -> Element {
    rsx! {
        Chip {
            label: status_label(status).to_string(),
            variant: ChipVariant::for_status(status),
        }
    }
}

/// Inline error banner; renders nothing without a message.
#[component]
pub fn ErrorBanner(message: Option<String>) -> Element {
    match message {
        Some(message) => rsx! {
            div { class: "banner-error", "{message}" }
        },
        None => rsx! {},
    }
}
