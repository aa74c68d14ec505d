use dioxus::prelude::*;

use crate::view_model::StatItem;

#[component]
pub fn StatsPanel(title: String, items: Vec<StatItem>) -> Element {
    rsx! {
        div { class: "panel",
            h3 { class: "panel-title", "{title}" }
            if items.is_empty() {
                p { class: "muted", "No statistics reported yet." }
            } else {
                div { class: "stats-grid",
                    for item in items.iter() {
                        div {
                            key: "{item.label}",
                            class: "stat-item",
                            div { class: "stat-label", "{item.label}" }
                            div { class: "stat-value", "{item.value}" }
                        }
                    }
                }
            }
        }
    }
}
