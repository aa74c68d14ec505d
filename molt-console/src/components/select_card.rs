use dioxus::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct CardOption {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl CardOption {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Single-choice card group. A card is selected iff its id equals `selected_id`.
#[component]
pub fn SelectCardGroup(
    cards: Vec<CardOption>,
    selected_id: String,
    on_select: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "select-cards",
            for card in cards.iter() {
                button {
                    key: "{card.id}",
                    r#type: "button",
                    class: if card.id == selected_id { "select-card selected" } else { "select-card" },
                    onclick: {
                        let id = card.id.clone();
                        move |_| on_select.call(id.clone())
                    },
                    div { class: "select-card-title", "{card.title}" }
                    div { class: "select-card-body", "{card.description}" }
                }
            }
        }
    }
}
