use dioxus::prelude::*;
use dioxus_logger::tracing::{error, info, warn};

use crate::api::{HttpMoltApi, MoltApi};
use crate::components::{
    CardOption, ErrorBanner, FieldInput, GuideSection, SelectCardGroup, SelectInput, SelectOption,
    SetupGuide, Toggle,
};
use crate::connections::{load_connections, Connection};
use crate::form::{CompressionType, FormField, IntermediateStore, Mode, TaskFormState};
use crate::interop::{copy_text_to_clipboard, page_title, set_document_title};
use crate::routes::Route;

fn mode_cards() -> Vec<CardOption> {
    Mode::ALL
        .iter()
        .map(|mode| CardOption::new(mode.id(), mode.title(), mode.description()))
        .collect()
}

fn store_cards() -> Vec<CardOption> {
    IntermediateStore::ALL
        .iter()
        .map(|store| CardOption::new(store.id(), store.title(), store.description()))
        .collect()
}

fn compression_options() -> Vec<SelectOption> {
    CompressionType::ALL
        .iter()
        .map(|c| SelectOption::new(c.id(), c.id()))
        .collect()
}

fn connection_options(connections: &[Connection]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new("", "Enter manually"))
        .chain(
            connections
                .iter()
                .map(|c| SelectOption::new(c.id.clone(), format!("{} ({})", c.name, c.dialect.label()))),
        )
        .collect()
}

fn setup_guide() -> Vec<GuideSection> {
    vec![
        GuideSection {
            title: "Mode of operation",
            intro: "Decides how data leaves the source and lands on the target. Modes trade \
                    load speed against disk and memory use, and some take target tables offline.",
            entries: Mode::ALL.iter().map(|m| (m.title(), m.description())).collect(),
        },
        GuideSection {
            title: "Intermediate store",
            intro: "Where exported CSV files are staged before IMPORT INTO or COPY FROM runs. \
                    A cloud bucket lets the machine running fetch keep a small disk.",
            entries: vec![
                (
                    "Clean up intermediate store",
                    "Removes every file the task wrote once it finishes. Leave it off to inspect the data later.",
                ),
                (
                    FormField::LocalPath.label(),
                    "Absolute or relative directory that receives export files.",
                ),
                (
                    FormField::LocalPathListenAddr.label(),
                    "Address the local file server listens on.",
                ),
                (
                    FormField::LocalPathCrdbAccessAddr.label(),
                    "Address CockroachDB uses to reach that file server.",
                ),
                (
                    FormField::BucketName.label(),
                    "Bucket in the cloud provider; your cloud credentials must be able to reach it.",
                ),
                (
                    FormField::BucketPath.label(),
                    "Optional prefix inside the bucket, such as fetch/export.",
                ),
            ],
        },
        GuideSection {
            title: "Task level settings",
            intro: "Settings that apply to the whole run.",
            entries: vec![
                (
                    FormField::LogFile.label(),
                    "Also write task logs to this file; logs always go to stdout.",
                ),
                (
                    "Compression",
                    "Import defaults to gzip for faster loads; the other modes default to none.",
                ),
                (
                    "Truncate target tables",
                    "Empties target tables before loading so earlier data cannot collide.",
                ),
            ],
        },
        GuideSection {
            title: "Performance tuning",
            intro: "Batch sizes, parallelism and flush thresholds for the export.",
            entries: vec![
                (
                    FormField::FlushNumRows.label(),
                    "Rows buffered before the export is flushed to the store.",
                ),
                (
                    FormField::FlushSize.label(),
                    "Bytes buffered before the export is flushed to the store.",
                ),
                (
                    FormField::NumConcurrentTables.label(),
                    "Tables processed at once, usually sized to the CPU count. Defaults to 4.",
                ),
                (
                    FormField::NumBatchRowsExport.label(),
                    "Rows read from the source per iteration.",
                ),
            ],
        },
        GuideSection {
            title: "Replication settings",
            intro: "Logical replication slot handling. Only applies to PostgreSQL sources.",
            entries: vec![
                (FormField::PgLogicalSlotName.label(), "Name of the replication slot."),
                (FormField::PgLogicalSlotPlugin.label(), "Output plugin for the slot."),
                (
                    "Drop the PG logical replication slot",
                    "Drops an existing slot of the same name first.",
                ),
            ],
        },
    ]
}

fn apply_connection(
    mut form: Signal<TaskFormState>,
    connections: &[Connection],
    id: &str,
    target: bool,
) {
    let Some(conn) = connections.iter().find(|c| c.id == id) else {
        return;
    };
    let url = conn.to_url();
    if target {
        form.write().target_url = url;
    } else {
        form.write().source_url = url;
    }
}

fn field_input(mut form: Signal<TaskFormState>, field: FormField) -> Element {
    let value = form.read().value(field).to_string();
    rsx! {
        FieldInput {
            key: "{field:?}",
            label: field.label(),
            value,
            input_type: if field.is_numeric() { "number" } else { "text" },
            on_input: move |next: String| form.write().set(field, next),
            validate: move |current: String| field.validate(&current),
        }
    }
}

#[component]
pub fn ConfigureTask() -> Element {
    let mut form = use_signal(TaskFormState::default);
    let connections = use_signal(load_connections);
    let mut submitting = use_signal(|| false);
    let mut submit_error = use_signal(|| None::<String>);
    let mut copied = use_signal(|| false);
    let navigator = use_navigator();

    use_effect(|| set_document_title(&page_title("Configure task")));

    let state = form();
    let preview = state.command_preview();
    let blocking = state.validation_errors();
    let store_fields: Vec<FormField> = state
        .visible_fields()
        .into_iter()
        .filter(|f| {
            matches!(
                f,
                FormField::BucketName
                    | FormField::BucketPath
                    | FormField::LocalPath
                    | FormField::LocalPathListenAddr
                    | FormField::LocalPathCrdbAccessAddr
            )
        })
        .collect();
    let saved = connection_options(&connections.read());
    let blocking_count = blocking.len();

    let copy_preview = {
        let preview = preview.clone();
        move |_: Event<MouseData>| {
            copy_text_to_clipboard(&preview);
            copied.set(true);
        }
    };

    let submit = move |_: Event<MouseData>| {
        if submitting() {
            return;
        }
        let state = form();
        let errors = state.validation_errors();
        if !errors.is_empty() {
            let fields = errors
                .iter()
                .map(|(field, _)| field.label())
                .collect::<Vec<_>>()
                .join(", ");
            warn!("fetch task form blocked by {} invalid fields", errors.len());
            submit_error.set(Some(format!("Fix the following fields first: {fields}.")));
            return;
        }

        submitting.set(true);
        submit_error.set(None);
        let body = state.to_request();
        spawn(async move {
            let api = HttpMoltApi::from_config();
            match api.create_fetch_task(&body).await {
                Ok(id) => {
                    info!("created fetch task {id}");
                    navigator.push(Route::FetchDetail { id });
                }
                Err(e) => {
                    error!("failed to create fetch task: {e}");
                    submit_error.set(Some(format!("Failed to create fetch task: {e}")));
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        h2 { class: "panel-title", "Configure fetch task" }
        SetupGuide { title: "Setup guide", sections: setup_guide() }

        div { class: "panel form-section",
            h3 { class: "panel-title", "Task" }
            {field_input(form, FormField::Name)}
        }

        div { class: "panel form-section",
            h3 { class: "panel-title", "Connections" }
            p { class: "panel-subtitle",
                "Pick a saved connection or enter a connection string. "
                Link { to: Route::SetupConnection {}, "Manage connections" }
            }
            SelectInput {
                label: "Source from saved connection",
                value: "",
                options: saved.clone(),
                on_change: move |id: String| apply_connection(form, &connections.read(), &id, false),
            }
            {field_input(form, FormField::SourceUrl)}
            SelectInput {
                label: "Target from saved connection",
                value: "",
                options: saved,
                on_change: move |id: String| apply_connection(form, &connections.read(), &id, true),
            }
            {field_input(form, FormField::TargetUrl)}
        }

        div { class: "panel form-section",
            h3 { class: "panel-title", "Data load mode" }
            SelectCardGroup {
                cards: mode_cards(),
                selected_id: state.mode.id(),
                on_select: move |id: String| {
                    if let Some(mode) = Mode::from_id(&id) {
                        form.write().select_mode(mode);
                    }
                },
            }
        }

        if state.uses_store() {
            div { class: "panel form-section",
                h3 { class: "panel-title", "Intermediate store" }
                SelectCardGroup {
                    cards: store_cards(),
                    selected_id: state.store.id(),
                    on_select: move |id: String| {
                        if let Some(store) = IntermediateStore::from_id(&id) {
                            form.write().store = store;
                        }
                    },
                }
                for field in store_fields {
                    {field_input(form, field)}
                }
                Toggle {
                    label: "Clean up intermediate store after the task",
                    checked: state.cleanup,
                    on_change: move |checked| form.write().cleanup = checked,
                }
            }
        }

        div { class: "panel form-section",
            h3 { class: "panel-title", "Task options" }
            SelectInput {
                label: "Compression",
                value: state.compression.id(),
                options: compression_options(),
                on_change: move |id: String| {
                    if let Some(compression) = CompressionType::from_id(&id) {
                        form.write().compression = compression;
                    }
                },
            }
            {field_input(form, FormField::LogFile)}
            Toggle {
                label: "Truncate target tables before loading",
                checked: state.truncate,
                on_change: move |checked| form.write().truncate = checked,
            }
        }

        div { class: "panel form-section",
            h3 { class: "panel-title", "Performance tuning" }
            {field_input(form, FormField::FlushNumRows)}
            {field_input(form, FormField::FlushSize)}
            {field_input(form, FormField::NumConcurrentTables)}
            {field_input(form, FormField::NumBatchRowsExport)}
        }

        div { class: "panel form-section",
            h3 { class: "panel-title", "Replication" }
            {field_input(form, FormField::PgLogicalSlotName)}
            {field_input(form, FormField::PgLogicalSlotPlugin)}
            Toggle {
                label: "Drop the PG logical replication slot if it exists",
                checked: state.drop_pg_logical_slot,
                on_change: move |checked| form.write().drop_pg_logical_slot = checked,
            }
        }

        div { class: "panel",
            div { class: "row spread",
                h3 { class: "panel-title", "Command preview" }
                button {
                    class: "btn btn-secondary",
                    onclick: copy_preview,
                    if copied() { "Copied" } else { "Copy" }
                }
            }
            pre { class: "command-preview", "{preview}" }
        }

        ErrorBanner { message: submit_error() }
        div { class: "row",
            button {
                class: "btn",
                disabled: submitting() || !blocking.is_empty(),
                onclick: submit,
                if submitting() { "Creating..." } else { "Create fetch task" }
            }
            if !blocking.is_empty() {
                span { class: "muted", "{blocking_count} field(s) need attention." }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connections::Dialect;

    #[test]
    fn connection_options_start_with_manual_entry() {
        let mut conn = Connection::draft(Dialect::MySQL);
        conn.id = "c1".into();
        conn.name = "legacy".into();
        let options = connection_options(&[conn]);
        assert_eq!(options[0], SelectOption::new("", "Enter manually"));
        assert_eq!(options[1], SelectOption::new("c1", "legacy (MySQL)"));
    }

    #[test]
    fn guide_explains_every_option_field() {
        let terms: Vec<&str> = setup_guide()
            .into_iter()
            .flat_map(|section| section.entries.into_iter().map(|(term, _)| term))
            .collect();
        let explained = [
            FormField::BucketName,
            FormField::BucketPath,
            FormField::LocalPath,
            FormField::LocalPathListenAddr,
            FormField::LocalPathCrdbAccessAddr,
            FormField::LogFile,
            FormField::FlushNumRows,
            FormField::FlushSize,
            FormField::NumConcurrentTables,
            FormField::NumBatchRowsExport,
            FormField::PgLogicalSlotName,
            FormField::PgLogicalSlotPlugin,
        ];
        for field in explained {
            assert!(terms.contains(&field.label()), "{field:?} missing from guide");
        }
        for mode in Mode::ALL {
            assert!(terms.contains(&mode.title()));
        }
    }

    #[test]
    fn card_ids_match_form_ids() {
        let ids: Vec<String> = mode_cards().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["import", "directCopy", "liveCopyFromStore"]);
        assert_eq!(store_cards()[2].id, IntermediateStore::Gcs.id());
    }
}
