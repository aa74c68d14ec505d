use dioxus::prelude::*;
use dioxus_logger::tracing::{error, info};

use crate::components::{ErrorBanner, FieldInput, SelectInput, SelectOption};
use crate::config::{api_base, set_cached_api_base};
use crate::connections::{
    load_connections, remove_connection, save_connections, Connection, Dialect, SslMode,
};
use crate::interop::{page_title, set_document_title};

fn dialect_options() -> Vec<SelectOption> {
    Dialect::ALL
        .iter()
        .map(|d| SelectOption::new(d.label(), d.label()))
        .collect()
}

fn ssl_options() -> Vec<SelectOption> {
    SslMode::ALL
        .iter()
        .map(|m| SelectOption::new(m.as_str(), m.as_str()))
        .collect()
}

/// Text field bound to one string member of the draft.
fn draft_input(
    mut draft: Signal<Connection>,
    name: &'static str,
    label: &'static str,
    input_type: &'static str,
    get: fn(&Connection) -> String,
    set: fn(&mut Connection, String),
) -> Element {
    let value = get(&draft.read());
    rsx! {
        FieldInput {
            key: "{name}",
            label,
            value,
            input_type,
            on_input: move |next: String| set(&mut draft.write(), next),
            validate: move |_: String| draft.read().field_error(name),
        }
    }
}

#[component]
pub fn SetupConnection() -> Element {
    let mut connections = use_signal(load_connections);
    let mut draft = use_signal(|| Connection::draft(Dialect::default()));
    let mut form_error = use_signal(|| None::<String>);
    let mut service_url = use_signal(|| api_base().to_string());
    let mut service_saved = use_signal(|| false);

    use_effect(|| set_document_title(&page_title("Connections")));

    let mut persist = move |next: Vec<Connection>| match save_connections(&next) {
        Ok(()) => {
            connections.set(next);
            form_error.set(None);
        }
        Err(e) => {
            error!("failed to save connections: {e}");
            form_error.set(Some(e));
        }
    };

    let add_connection = move |_: Event<MouseData>| {
        let candidate = draft();
        match candidate.finalize() {
            Ok(conn) => {
                info!("saved connection {}", conn.name);
                let mut next = connections();
                next.push(conn);
                persist(next);
                draft.set(Connection::draft(Dialect::default()));
            }
            Err(errors) => {
                let fields = errors
                    .iter()
                    .map(|(field, message)| format!("{field}: {message}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                form_error.set(Some(fields));
            }
        }
    };

    let current = draft();
    let port = current.port.to_string();
    let preview_url = current.to_display_url();
    let saved = connections();

    rsx! {
        h2 { class: "panel-title", "Connections" }

        div { class: "panel",
            h3 { class: "panel-title", "Saved connections" }
            if saved.is_empty() {
                p { class: "muted", "No saved connections." }
            } else {
                table { class: "data-table",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Dialect" }
                            th { "Connection string" }
                            th {}
                        }
                    }
                    tbody {
                        for conn in saved.iter() {
                            tr { key: "{conn.id}",
                                td { "{conn.name}" }
                                td { {conn.dialect.label()} }
                                td { pre { class: "cell-code", {conn.to_display_url()} } }
                                td {
                                    button {
                                        class: "btn btn-danger",
                                        onclick: {
                                            let id = conn.id.clone();
                                            move |_| persist(remove_connection(&connections.read(), &id))
                                        },
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        div { class: "panel form-section",
            h3 { class: "panel-title", "Add connection" }
            p { class: "panel-subtitle", "Passwords are kept for this session only and never stored." }
            {draft_input(draft, "name", "Name", "text", |c| c.name.clone(), |c, v| c.name = v)}
            SelectInput {
                label: "Dialect",
                value: current.dialect.label(),
                options: dialect_options(),
                on_change: move |label: String| {
                    if let Some(dialect) = Dialect::from_label(&label) {
                        draft.write().set_dialect(dialect);
                    }
                },
            }
            {draft_input(draft, "host", "Host", "text", |c| c.host.clone(), |c, v| c.host = v)}
            FieldInput {
                label: "Port",
                value: port,
                input_type: "number",
                on_input: move |next: String| {
                    draft.write().port = next.trim().parse().unwrap_or(0);
                },
                validate: move |_: String| draft.read().field_error("port"),
            }
            {draft_input(draft, "username", "Username", "text", |c| c.username.clone(), |c, v| c.username = v)}
            {draft_input(draft, "password", "Password", "password", |c| c.password.clone(), |c, v| c.password = v)}
            {draft_input(draft, "database", "Database", "text", |c| c.database.clone(), |c, v| c.database = v)}
            if current.dialect != Dialect::MySQL {
                SelectInput {
                    label: "SSL mode",
                    value: current.ssl_mode.as_str(),
                    options: ssl_options(),
                    on_change: move |value: String| {
                        if let Some(mode) = SslMode::from_str_opt(&value) {
                            draft.write().ssl_mode = mode;
                        }
                    },
                }
            }
            p { class: "muted", "Preview: {preview_url}" }
            ErrorBanner { message: form_error() }
            div { class: "row",
                button { class: "btn", onclick: add_connection, "Save connection" }
            }
        }

        div { class: "panel form-section",
            h3 { class: "panel-title", "MOLT service" }
            p { class: "panel-subtitle",
                "Override the service location for this browser. Takes effect after a reload."
            }
            div { class: "field",
                label { "Service URL" }
                input {
                    r#type: "url",
                    value: "{service_url}",
                    placeholder: "http://localhost:4500",
                    oninput: move |evt| {
                        service_url.set(evt.value());
                        service_saved.set(false);
                    },
                }
            }
            div { class: "row",
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| {
                        set_cached_api_base(&service_url());
                        service_saved.set(true);
                    },
                    "Save service URL"
                }
                if service_saved() {
                    span { class: "muted", "Saved. Reload to apply." }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_options_cover_every_variant() {
        let dialects: Vec<String> = dialect_options().into_iter().map(|o| o.value).collect();
        assert_eq!(dialects, vec!["CockroachDB", "PostgreSQL", "MySQL"]);
        let modes: Vec<String> = ssl_options().into_iter().map(|o| o.value).collect();
        assert_eq!(modes, vec!["disable", "require", "verify-full"]);
    }
}
