use dioxus::prelude::*;
use dioxus_logger::tracing::info;
use gloo_timers::future::TimeoutFuture;
use molt_types::{VerifyAttemptId, VerifyRunDetailed};

use crate::api::HttpMoltApi;
use crate::components::{
    Cell, ColumnHeader, DataTable, ErrorBanner, StatsPanel, StatusChip, TableRow, Toggle,
};
use crate::config::config;
use crate::interop::{page_title, set_document_title};
use crate::mismatch::{filter_mismatches, mismatch_rows, render_json_text, MismatchPayload, MismatchRow};
use crate::poll::{poll_verify_run, PollEvent, PollHandle, PollPhase};
use crate::routes::Route;
use crate::table::{sort_rows, SortState};
use crate::view_model::{format_epoch, verify_stat_items, ChipVariant};

const MISMATCH_COLUMNS: [ColumnHeader; 8] = [
    ColumnHeader::sortable("created_at", "Time"),
    ColumnHeader::fixed("level", "Level"),
    ColumnHeader::sortable("table", "Table"),
    ColumnHeader::sortable("category", "Type"),
    ColumnHeader::sortable("primary_key", "Primary key"),
    ColumnHeader::fixed("source_values", "Source values"),
    ColumnHeader::fixed("target_values", "Target values"),
    ColumnHeader::sortable("message", "Message"),
];

/// Rows whose message did not decode show the raw message in place of the
/// primary key.
fn mismatch_table_rows(rows: &[MismatchRow], pretty: bool) -> Vec<TableRow> {
    rows.iter()
        .map(|row| {
            let key_text = if row.payload == MismatchPayload::default() {
                render_json_text(&row.message, pretty)
            } else {
                render_json_text(&row.payload.primary_key, pretty)
            };
            TableRow {
                key: row.key.clone(),
                cells: vec![
                    Cell::Text(row.created_at.clone()),
                    Cell::Chip {
                        label: row.level.label().to_string(),
                        variant: ChipVariant::for_level(row.level),
                    },
                    Cell::Text(row.table.clone()),
                    Cell::Text(row.category.clone()),
                    Cell::Code(key_text.text().to_string()),
                    Cell::Code(
                        render_json_text(&row.payload.source_values, pretty)
                            .text()
                            .to_string(),
                    ),
                    Cell::Code(
                        render_json_text(&row.payload.target_values, pretty)
                            .text()
                            .to_string(),
                    ),
                    Cell::Code(render_json_text(&row.message, pretty).text().to_string()),
                ],
            }
        })
        .collect()
}

#[component]
pub fn VerifyDetail(id: VerifyAttemptId) -> Element {
    let mut detail = use_signal(|| None::<VerifyRunDetailed>);
    let mut phase = use_signal(PollPhase::default);
    let mut load_error = use_signal(|| None::<String>);
    let mut search = use_signal(String::new);
    let mut pretty = use_signal(|| false);
    let mut mismatch_sort = use_signal(SortState::default);
    let poll_handle = use_hook(PollHandle::new);

    {
        let poll_handle = poll_handle.clone();
        use_drop(move || poll_handle.cancel());
    }

    {
        let poll_handle = poll_handle.clone();
        use_effect(use_reactive!(|(id,)| {
            let token = poll_handle.begin();
            detail.set(None);
            load_error.set(None);
            phase.set(PollPhase::Loading);
            set_document_title(&page_title(&format!("Verify {id}")));

            spawn(async move {
                let api = HttpMoltApi::from_config();
                let outcome = poll_verify_run(
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
                            load_error.set(Some(format!("Failed to load verify task {id}: {error}")));
                            phase.set(next);
                        }
                    },
                )
                .await;
                info!("verify {id} polling finished: {outcome:?}");
            });
        }));
    }

    let Some(run) = detail() else {
        return rsx! {
            ErrorBanner { message: load_error() }
            if phase() != PollPhase::Errored {
                p { class: "muted", "Loading verify task {id}..." }
            }
        };
    };

    let stats = run
        .stats
        .as_ref()
        .map(|stats| verify_stat_items(stats, run.started_at, run.finished_at))
        .unwrap_or_default();
    let all_rows = mismatch_rows(&run.mismatches);
    let total = all_rows.len();
    let mismatches = {
        let mut rows = filter_mismatches(&all_rows, &search.read());
        sort_rows(&mut rows, &mismatch_sort.read());
        rows
    };
    let shown = mismatches.len();
    let table_rows = mismatch_table_rows(&mismatches, pretty());
    let started = format_epoch(run.started_at);

    rsx! {
        div { class: "panel",
            div { class: "row",
                h2 { class: "panel-title", "{run.name}" }
                StatusChip { status: run.status }
                if phase() == PollPhase::Loading && !run.status.is_terminal() {
                    span { class: "muted", "Refreshing..." }
                }
            }
            p { class: "panel-subtitle",
                "Verify {run.id} · started {started} · fetch "
                Link { to: Route::FetchDetail { id: run.fetch_id }, "{run.fetch_id}" }
            }
        }
        ErrorBanner { message: load_error() }
        StatsPanel { title: "Statistics", items: stats }
        div { class: "panel",
            div { class: "row spread",
                h3 { class: "panel-title", "Mismatches ({shown} of {total})" }
                div { class: "row",
                    div { class: "field",
                        input {
                            r#type: "search",
                            placeholder: "Search messages",
                            value: "{search}",
                            oninput: move |evt| search.set(evt.value()),
                        }
                    }
                    Toggle {
                        label: "Pretty print",
                        checked: pretty(),
                        on_change: move |checked| pretty.set(checked),
                    }
                }
            }
            DataTable {
                columns: MISMATCH_COLUMNS.to_vec(),
                rows: table_rows,
                sort: mismatch_sort(),
                on_sort: move |column| mismatch_sort.write().toggle(column),
                empty_text: "No mismatches found.",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use molt_types::VerifyMismatch;

    #[test]
    fn undecodable_message_is_shown_raw_even_when_pretty() {
        let rows = mismatch_rows(&[VerifyMismatch {
            timestamp: 1,
            level: "warning".into(),
            message: "row missing {".into(),
            schema: "public".into(),
            table: "t".into(),
            kind: "missing row".into(),
        }]);
        let table = mismatch_table_rows(&rows, true);
        assert_eq!(table[0].cells[4], Cell::Code("row missing {".into()));
        assert_eq!(table[0].cells[5], Cell::Code(String::new()));
    }

    #[test]
    fn decoded_payload_pretty_prints() {
        let rows = mismatch_rows(&[VerifyMismatch {
            timestamp: 1,
            level: "warning".into(),
            message: r#"{"primary_key":[1],"source_values":{"a":1},"target_values":{"a":2}}"#
                .into(),
            schema: "public".into(),
            table: "t".into(),
            kind: "mismatching row value".into(),
        }]);
        let table = mismatch_table_rows(&rows, true);
        assert_eq!(table[0].cells[4], Cell::Code("[\n  1\n]".into()));
        assert_eq!(table[0].cells[5], Cell::Code("{\n  \"a\": 1\n}".into()));
    }

    #[test]
    fn message_column_follows_pretty_toggle() {
        let message = r#"{"primary_key":[7],"source_values":null,"target_values":{"b":"x"}}"#;
        let rows = mismatch_rows(&[VerifyMismatch {
            timestamp: 2,
            level: "warning".into(),
            message: message.into(),
            schema: "public".into(),
            table: "t".into(),
            kind: "extraneous row".into(),
        }]);
        let raw = mismatch_table_rows(&rows, false);
        assert_eq!(raw[0].cells.len(), MISMATCH_COLUMNS.len());
        assert_eq!(raw[0].cells[7], Cell::Code(message.into()));

        let pretty = mismatch_table_rows(&rows, true);
        assert_eq!(
            pretty[0].cells[7],
            Cell::Code(
                "{\n  \"primary_key\": [\n    7\n  ],\n  \"source_values\": null,\n  \"target_values\": {\n    \"b\": \"x\"\n  }\n}"
                    .into()
            )
        );
    }
}
