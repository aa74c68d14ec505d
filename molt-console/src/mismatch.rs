//! Verify mismatch rows and their embedded JSON payloads.

use molt_types::VerifyMismatch;
use serde_json::Value;

use crate::table::{SortValue, SortableRow};
use crate::view_model::{format_epoch, LogLevel};

/// Decoded `message` of a mismatch. Fields are JSON text, empty when absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MismatchPayload {
    pub primary_key: String,
    pub source_values: String,
    pub target_values: String,
}

impl MismatchPayload {
    /// Decode-or-fallback: malformed input yields an empty payload.
    pub fn parse(message: &str) -> Self {
        let Ok(json) = serde_json::from_str::<Value>(message) else {
            return Self::default();
        };

        Self {
            primary_key: field_text(&json, "primary_key"),
            source_values: field_text(&json, "source_values"),
            target_values: field_text(&json, "target_values"),
        }
    }
}

fn field_text(json: &Value, key: &str) -> String {
    match json.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// How a text cell that may carry JSON should be shown.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Pretty(String),
    Raw(String),
}

impl Rendered {
    pub fn text(&self) -> &str {
        match self {
            Self::Pretty(text) | Self::Raw(text) => text,
        }
    }
}

/// Pretty-print JSON text when asked to; anything unparsable stays raw.
pub fn render_json_text(text: &str, pretty: bool) -> Rendered {
    if !pretty {
        return Rendered::Raw(text.to_string());
    }

    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .map(Rendered::Pretty)
        .unwrap_or_else(|| Rendered::Raw(text.to_string()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct MismatchRow {
    pub key: String,
    pub timestamp: i64,
    pub created_at: String,
    pub level: LogLevel,
    pub table: String,
    pub category: String,
    pub message: String,
    pub payload: MismatchPayload,
}

pub fn mismatch_rows(mismatches: &[VerifyMismatch]) -> Vec<MismatchRow> {
    mismatches
        .iter()
        .enumerate()
        .map(|(idx, m)| MismatchRow {
            key: format!("{}-{idx}", m.timestamp),
            timestamp: m.timestamp,
            created_at: format_epoch(m.timestamp),
            level: LogLevel::from_wire(&m.level),
            table: format!("{}.{}", m.schema, m.table),
            category: m.kind.clone(),
            message: m.message.clone(),
            payload: MismatchPayload::parse(&m.message),
        })
        .collect()
}

/// Substring filter on the raw message; an empty term keeps everything.
pub fn filter_mismatches(rows: &[MismatchRow], term: &str) -> Vec<MismatchRow> {
    let term = term.trim();
    if term.is_empty() {
        return rows.to_vec();
    }

    rows.iter()
        .filter(|row| row.message.contains(term) || row.table.contains(term))
        .cloned()
        .collect()
}

impl SortableRow for MismatchRow {
    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "created_at" => SortValue::Int(self.timestamp),
            "table" => SortValue::Text(self.table.clone()),
            "category" => SortValue::Text(self.category.clone()),
            "message" => SortValue::Text(self.message.clone()),
            "primary_key" => SortValue::Text(self.payload.primary_key.clone()),
            _ => SortValue::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mismatch(message: &str) -> VerifyMismatch {
        VerifyMismatch {
            timestamp: 1_700_000_000,
            level: "warning".to_string(),
            message: message.to_string(),
            schema: "public".to_string(),
            table: "orders".to_string(),
            kind: "mismatching row value".to_string(),
        }
    }

    #[test]
    fn payload_fields_are_extracted() {
        let payload = MismatchPayload::parse(
            r#"{"primary_key":["42"],"source_values":{"qty":1},"target_values":{"qty":2}}"#,
        );
        assert_eq!(payload.primary_key, r#"["42"]"#);
        assert_eq!(payload.source_values, r#"{"qty":1}"#);
        assert_eq!(payload.target_values, r#"{"qty":2}"#);
    }

    #[test]
    fn malformed_message_falls_back_to_raw_text() {
        let rows = mismatch_rows(&[mismatch("row missing on target {")]);
        assert_eq!(rows[0].payload, MismatchPayload::default());

        let rendered = render_json_text(&rows[0].message, true);
        assert_eq!(rendered, Rendered::Raw("row missing on target {".to_string()));
        assert_eq!(render_json_text(&rows[0].payload.source_values, true).text(), "");
    }

    #[test]
    fn pretty_print_only_when_enabled() {
        let text = r#"{"a":1}"#;
        assert_eq!(render_json_text(text, false), Rendered::Raw(text.to_string()));
        assert_eq!(
            render_json_text(text, true),
            Rendered::Pretty("{\n  \"a\": 1\n}".to_string())
        );
    }

    #[test]
    fn rows_qualify_table_with_schema() {
        let rows = mismatch_rows(&[mismatch("{}")]);
        assert_eq!(rows[0].table, "public.orders");
        assert_eq!(rows[0].category, "mismatching row value");
        assert_eq!(rows[0].level, LogLevel::Warning);
    }

    #[test]
    fn empty_search_restores_full_list() {
        let rows = mismatch_rows(&[mismatch(r#"{"primary_key":[1]}"#), mismatch("other")]);
        assert_eq!(filter_mismatches(&rows, "primary_key").len(), 1);
        assert_eq!(filter_mismatches(&rows, "  ").len(), 2);
    }
}
