use dioxus::prelude::*;
use dioxus_logger::tracing::{error, info};

use super::{fetch_table_rows, verify_table_rows, RUN_COLUMNS, VERIFY_COLUMNS};
use crate::api::{HttpMoltApi, MoltApi};
use crate::components::{DataTable, ErrorBanner};
use crate::interop::{page_title, set_document_title};
use crate::routes::Route;
use crate::table::{sort_rows, SortDirection, SortState};
use crate::view_model::{FetchListRow, VerifyListRow};

#[component]
pub fn TaskList() -> Element {
    let mut fetch_runs = use_signal(Vec::<FetchListRow>::new);
    let mut verify_runs = use_signal(Vec::<VerifyListRow>::new);
    let mut load_error = use_signal(|| None::<String>);
    let mut loading = use_signal(|| true);
    let mut fetch_sort = use_signal(|| SortState::by("started_at", SortDirection::Desc));
    let mut verify_sort = use_signal(|| SortState::by("started_at", SortDirection::Desc));
    let mut reload = use_signal(|| 0u32);

    use_effect(move || {
        let _ = reload();
        set_document_title(&page_title("Tasks"));
        spawn(async move {
            loading.set(true);
            let api = HttpMoltApi::from_config();
            let mut problems = Vec::new();

            match api.list_fetch_tasks().await {
                Ok(runs) => {
                    info!("loaded {} fetch runs", runs.len());
                    fetch_runs.set(runs.iter().map(FetchListRow::from).collect());
                }
                Err(e) => {
                    error!("failed to list fetch tasks: {e}");
                    problems.push(format!("Failed to load fetch tasks: {e}"));
                }
            }
            match api.list_verify_tasks().await {
                Ok(runs) => verify_runs.set(runs.iter().map(VerifyListRow::from).collect()),
                Err(e) => {
                    error!("failed to list verify tasks: {e}");
                    problems.push(format!("Failed to load verify tasks: {e}"));
                }
            }

            load_error.set((!problems.is_empty()).then(|| problems.join(" ")));
            loading.set(false);
        });
    });

    let fetch_rows = {
        let mut rows = fetch_runs();
        sort_rows(&mut rows, &fetch_sort.read());
        fetch_table_rows(&rows)
    };
    let verify_rows = {
        let mut rows = verify_runs();
        sort_rows(&mut rows, &verify_sort.read());
        verify_table_rows(&rows)
    };

    rsx! {
        div { class: "row spread",
            h2 { class: "panel-title", "Tasks" }
            div { class: "row",
                if loading() {
                    span { class: "muted", "Loading..." }
                }
                button {
                    class: "btn btn-secondary",
                    disabled: loading(),
                    onclick: move |_| reload += 1,
                    "Refresh"
                }
                Link { class: "btn", to: Route::ConfigureTask {}, "New fetch task" }
            }
        }
        ErrorBanner { message: load_error() }
        div { class: "panel",
            h3 { class: "panel-title", "Fetch tasks" }
            DataTable {
                columns: RUN_COLUMNS.to_vec(),
                rows: fetch_rows,
                sort: fetch_sort(),
                on_sort: move |column| fetch_sort.write().toggle(column),
                empty_text: "No fetch tasks yet.",
            }
        }
        div { class: "panel",
            h3 { class: "panel-title", "Verify tasks" }
            DataTable {
                columns: VERIFY_COLUMNS.to_vec(),
                rows: verify_rows,
                sort: verify_sort(),
                on_sort: move |column| verify_sort.write().toggle(column),
                empty_text: "No verify tasks yet.",
            }
        }
    }
}
