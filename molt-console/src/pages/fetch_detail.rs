use dioxus::prelude::*;
use dioxus_logger::tracing::{error, info};
use gloo_timers::future::TimeoutFuture;
use molt_types::{FetchAttemptId, FetchRunDetailed};

use super::{verify_table_rows, VERIFY_COLUMNS};
use crate::api::HttpMoltApi;
use crate::components::{Cell, ColumnHeader, DataTable, ErrorBanner, StatsPanel, StatusChip, TableRow};
use crate::config::config;
use crate::interop::{page_title, set_document_title};
use crate::mismatch::render_json_text;
use crate::poll::{
    follow_verify, poll_fetch_run, start_verify, PollEvent, PollHandle, PollOutcome, PollPhase,
};
use crate::table::{sort_rows, SortState};
use crate::view_model::{
    fetch_stat_items, format_epoch, format_run_duration, log_rows, ChipVariant, LogRow,
    VerifyListRow,
};

const LOG_COLUMNS: [ColumnHeader; 3] = [
    ColumnHeader::sortable("created_at", "Time"),
    ColumnHeader::sortable("level", "Level"),
    ColumnHeader::sortable("message", "Message"),
];

fn log_table_rows(rows: &[LogRow]) -> Vec<TableRow> {
    rows.iter()
        .map(|row| TableRow {
            key: row.key.clone(),
            cells: vec![
                Cell::Text(row.created_at.clone()),
                Cell::Chip {
                    label: row.level.label().to_string(),
                    variant: ChipVariant::for_level(row.level),
                },
                Cell::Code(render_json_text(&row.message, true).text().to_string()),
            ],
        })
        .collect()
}

#[component]
pub fn FetchDetail(id: FetchAttemptId) -> Element {
    let mut detail = use_signal(|| None::<FetchRunDetailed>);
    let mut phase = use_signal(PollPhase::default);
    let mut load_error = use_signal(|| None::<String>);
    let mut verify_error = use_signal(|| None::<String>);
    let mut verify_pending = use_signal(|| false);
    let mut log_sort = use_signal(SortState::default);
    let mut verify_sort = use_signal(SortState::default);
    let poll_handle = use_hook(PollHandle::new);
    let verify_handle = use_hook(PollHandle::new);

    {
        let poll_handle = poll_handle.clone();
        let verify_handle = verify_handle.clone();
        use_drop(move || {
            poll_handle.cancel();
            verify_handle.cancel();
        });
    }

    {
        let poll_handle = poll_handle.clone();
        let verify_handle = verify_handle.clone();
        use_effect(use_reactive!(|(id,)| {
            verify_handle.cancel();
            let token = poll_handle.begin();
            detail.set(None);
            load_error.set(None);
            verify_error.set(None);
            verify_pending.set(false);
            phase.set(PollPhase::Loading);
            set_document_title(&page_title(&format!("Fetch {id}")));

            spawn(async move {
                let api = HttpMoltApi::from_config();
                let outcome = poll_fetch_run(
                    &api,
                    id,
                    &config().poll,
                    &token,
                    TimeoutFuture::new,
                    move |event| match event {
                        PollEvent::Data { value, phase: next } => {
                            detail.set(Some(value));
                            load_error.set(None);
                            phase.set(next);
                        }
                        PollEvent::Failed { error, phase: next } => {
                            load_error.set(Some(format!("Failed to load fetch task {id}: {error}")));
                            phase.set(next);
                        }
                    },
                )
                .await;
                info!("fetch {id} polling finished: {outcome:?}");
            });
        }));
    }

    let run_verify = {
        let verify_handle = verify_handle.clone();
        move |_: Event<MouseData>| {
            if verify_pending() {
                return;
            }
            verify_pending.set(true);
            verify_error.set(None);
            let token = verify_handle.begin();

            spawn(async move {
                let api = HttpMoltApi::from_config();
                let result = start_verify(
                    &api,
                    id,
                    &config().poll,
                    &token,
                    TimeoutFuture::new,
                    move |event| {
                        if let PollEvent::Data { value, .. } = event {
                            detail.set(Some(value));
                        }
                    },
                )
                .await;

                match result {
                    Ok((verify_id, PollOutcome::Settled)) => {
                        info!("verify run {verify_id} linked to fetch {id}");
                        verify_pending.set(false);
                        let outcome = follow_verify(
                            &api,
                            id,
                            verify_id,
                            &config().poll,
                            &token,
                            TimeoutFuture::new,
                            move |event| {
                                if let PollEvent::Data { value, .. } = event {
                                    detail.set(Some(value));
                                }
                            },
                        )
                        .await;
                        info!("verify run {verify_id} follow-up finished: {outcome:?}");
                        return;
                    }
                    Ok((verify_id, PollOutcome::Errored)) => {
                        verify_error.set(Some(format!(
                            "Verify run {verify_id} was created but could not be confirmed."
                        )));
                    }
                    Ok((_, PollOutcome::Cancelled)) => return,
                    Err(e) => {
                        error!("failed to create verify task for fetch {id}: {e}");
                        verify_error.set(Some(format!("Failed to start verify: {e}")));
                    }
                }
                verify_pending.set(false);
            });
        }
    };

    let Some(run) = detail() else {
        return rsx! {
            ErrorBanner { message: load_error() }
            if phase() != PollPhase::Errored {
                p { class: "muted", "Loading fetch task {id}..." }
            }
        };
    };

    let stats = run
        .stats
        .as_ref()
        .map(|stats| fetch_stat_items(stats, run.started_at, run.finished_at))
        .unwrap_or_default();
    let logs = {
        let mut rows = log_rows(&run.logs);
        sort_rows(&mut rows, &log_sort.read());
        log_table_rows(&rows)
    };
    let verify_rows = {
        let mut rows: Vec<VerifyListRow> = run.verify_runs.iter().map(VerifyListRow::from).collect();
        sort_rows(&mut rows, &verify_sort.read());
        verify_table_rows(&rows)
    };
    let duration = format_run_duration(
        run.started_at,
        run.finished_at,
        run.stats.as_ref().map(|s| s.net_duration_ms),
        run.stats.as_ref().map(|s| s.export_duration_ms),
    );
    let started = format_epoch(run.started_at);
    let finished = format_epoch(run.finished_at);

    rsx! {
        div { class: "panel",
            div { class: "row spread",
                div { class: "row",
                    h2 { class: "panel-title", "{run.name}" }
                    StatusChip { status: run.status }
                    if phase() == PollPhase::Loading && !run.status.is_terminal() {
                        span { class: "muted", "Refreshing..." }
                    }
                }
                button {
                    class: "btn",
                    disabled: verify_pending(),
                    onclick: run_verify,
                    if verify_pending() { "Starting verify..." } else { "Run verify" }
                }
            }
            p { class: "panel-subtitle",
                "Fetch {run.id} · started {started}"
                if !finished.is_empty() {
                    " · finished {finished}"
                }
                if !duration.is_empty() {
                    " · {duration}"
                }
            }
        }
        ErrorBanner { message: load_error() }
        ErrorBanner { message: verify_error() }
        StatsPanel { title: "Statistics", items: stats }
        div { class: "panel",
            h3 { class: "panel-title", "Verify runs" }
            DataTable {
                columns: VERIFY_COLUMNS.to_vec(),
                rows: verify_rows,
                sort: verify_sort(),
                on_sort: move |column| verify_sort.write().toggle(column),
                empty_text: "No verify runs for this fetch.",
            }
        }
        div { class: "panel",
            h3 { class: "panel-title", "Logs" }
            DataTable {
                columns: LOG_COLUMNS.to_vec(),
                rows: logs,
                sort: log_sort(),
                on_sort: move |column| log_sort.write().toggle(column),
                empty_text: "No logs reported yet.",
            }
        }
    }
}
