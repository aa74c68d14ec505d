use dioxus::prelude::*;

use super::chip::Chip;
use crate::routes::Route;
use crate::table::SortState;
use crate::view_model::ChipVariant;

/// Closed set of things a table cell can show.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Link { label: String, to: Route },
    Chip { label: String, variant: ChipVariant },
    Code(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnHeader {
    pub id: &'static str,
    pub title: &'static str,
    pub sortable: bool,
}

impl ColumnHeader {
    pub const fn sortable(id: &'static str, title: &'static str) -> Self {
        Self {
            id,
            title,
            sortable: true,
        }
    }

    pub const fn fixed(id: &'static str, title: &'static str) -> Self {
        Self {
            id,
            title,
            sortable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub key: String,
    pub cells: Vec<Cell>,
}

/// Sorting happens in the caller; the table only reports header clicks.
#[component]
pub fn DataTable(
    columns: Vec<ColumnHeader>,
    rows: Vec<TableRow>,
    sort: SortState,
    on_sort: EventHandler<&'static str>,
    #[props(default = "Nothing to show.".to_string())] empty_text: String,
) -> Element {
    if rows.is_empty() {
        return rsx! {
            p { class: "muted", "{empty_text}" }
        };
    }

    rsx! {
        table { class: "data-table",
            thead {
                tr {
                    for column in columns.iter().copied() {
                        th {
                            key: "{column.id}",
                            class: if column.sortable { "sortable" } else { "" },
                            onclick: move |_| {
                                if column.sortable {
                                    on_sort.call(column.id);
                                }
                            },
                            "{column.title}"
                            if let Some(direction) = sort.direction_for(column.id) {
                                {format!(" {}", direction.arrow())}
                            }
                        }
                    }
                }
            }
            tbody {
                for row in rows.iter() {
                    tr { key: "{row.key}",
                        for (idx, cell) in row.cells.iter().enumerate() {
                            td { key: "{idx}", {render_cell(cell)} }
                        }
                    }
                }
            }
        }
    }
}

fn render_cell(cell: &Cell) -> Element {
    match cell {
        Cell::Text(text) => rsx! { "{text}" },
        Cell::Link { label, to } => rsx! {
            Link { to: to.clone(), "{label}" }
        },
        Cell::Chip { label, variant } => rsx! {
            Chip { label: label.clone(), variant: *variant }
        },
        Cell::Code(text) => rsx! {
            pre { class: "cell-code", "{text}" }
        },
    }
}
