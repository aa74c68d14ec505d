//! Wire types for the MOLT service HTTP API
//!
//! These types mirror the JSON bodies served under `/api/v1`:
//! - fetch runs (list + detail, with logs and linked verify runs)
//! - verify runs (list + detail, with mismatches)
//! - the create-fetch request body and its enumerations
//!
//! Enum string values are bit-exact with what the service expects.

use serde::{Deserialize, Serialize};

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier returned by `POST /api/v1/fetch`
pub type FetchAttemptId = i64;

/// Identifier returned by `POST /api/v1/fetch/{id}/verify`
pub type VerifyAttemptId = i64;

// ============================================================================
// Run Status
// ============================================================================

/// Lifecycle status of a fetch or verify run.
///
/// Anything the service sends outside the known set decodes to `Unknown`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    InProgress,
    Success,
    Failure,
    #[default]
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Total mapping from the wire string.
    pub fn from_wire(value: &str) -> Self {
        match value {
            "IN_PROGRESS" => Self::InProgress,
            "SUCCESS" => Self::Success,
            "FAILURE" => Self::Failure,
            _ => Self::Unknown,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// `Success` and `Failure` never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }
}

// ============================================================================
// Fetch Runs
// ============================================================================

/// Summary row from `GET /api/v1/fetch`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FetchRun {
    pub id: FetchAttemptId,
    pub name: String,
    pub status: RunStatus,
    /// Epoch seconds, 0 when unset
    pub started_at: i64,
    /// Epoch seconds, 0 when unset
    pub finished_at: i64,
}

/// Detail body from `GET /api/v1/fetch/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FetchRunDetailed {
    pub id: FetchAttemptId,
    pub name: String,
    pub status: RunStatus,
    pub started_at: i64,
    pub finished_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<FetchStatsDetailed>,
    #[serde(default)]
    pub logs: Vec<Log>,
    /// Verify runs created from this fetch
    #[serde(default)]
    pub verify_runs: Vec<VerifyRun>,
}

impl FetchRunDetailed {
    pub fn has_verify_run(&self, verify_id: VerifyAttemptId) -> bool {
        self.verify_run(verify_id).is_some()
    }

    pub fn verify_run(&self, verify_id: VerifyAttemptId) -> Option<&VerifyRun> {
        self.verify_runs.iter().find(|run| run.id == verify_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FetchStatsDetailed {
    #[serde(default)]
    pub percent_complete: String,
    #[serde(default)]
    pub num_errors: i64,
    #[serde(default)]
    pub num_tables: i64,
    #[serde(default)]
    pub num_rows: i64,
    #[serde(default)]
    pub net_duration_ms: f64,
    #[serde(default)]
    pub import_duration_ms: f64,
    #[serde(default)]
    pub export_duration_ms: f64,
    #[serde(default)]
    pub cdc_cursor: String,
}

/// Task log line; `message` is free text or JSON text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Log {
    pub timestamp: i64,
    pub level: String,
    pub message: String,
}

// ============================================================================
// Verify Runs
// ============================================================================

/// Summary row from `GET /api/v1/verify`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerifyRun {
    pub id: VerifyAttemptId,
    pub name: String,
    pub status: RunStatus,
    pub started_at: i64,
    pub finished_at: i64,
    pub fetch_id: FetchAttemptId,
}

/// Detail body from `GET /api/v1/verify/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerifyRunDetailed {
    pub id: VerifyAttemptId,
    pub name: String,
    pub status: RunStatus,
    pub started_at: i64,
    pub finished_at: i64,
    pub fetch_id: FetchAttemptId,
    #[serde(default)]
    pub mismatches: Vec<VerifyMismatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<VerifyStatsDetailed>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct VerifyStatsDetailed {
    #[serde(default)]
    pub num_tables: i64,
    #[serde(default)]
    pub num_truth_rows: i64,
    #[serde(default)]
    pub num_success: i64,
    #[serde(default)]
    pub num_conditional_success: i64,
    #[serde(default)]
    pub num_missing: i64,
    #[serde(default)]
    pub num_mismatch: i64,
    #[serde(default)]
    pub num_extraneous: i64,
    #[serde(default)]
    pub num_live_retry: i64,
    #[serde(default)]
    pub num_column_mismatch: i64,
    #[serde(default)]
    pub net_duration_ms: f64,
}

/// One row/column discrepancy found by a verify run.
///
/// `message` is JSON text with `primary_key`, `source_values` and
/// `target_values`; it is only decoded for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerifyMismatch {
    pub timestamp: i64,
    pub level: String,
    pub message: String,
    pub schema: String,
    pub table: String,
    #[serde(rename = "type")]
    pub kind: String,
}

// ============================================================================
// Create Fetch Task
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    Gzip,
    None,
    #[default]
    Default,
}

impl Compression {
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::None => "none",
            Self::Default => "default",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FetchMode {
    #[default]
    ImportInto,
    CopyFrom,
    DirectCopy,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    None,
    #[serde(rename = "AWS")]
    Aws,
    #[serde(rename = "GCP")]
    Gcp,
    Local,
}

/// Body of `POST /api/v1/fetch`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CreateFetchTaskRequest {
    pub bucket_name: String,
    pub bucket_path: String,
    pub cleanup_intermediary_store: bool,
    pub compression: Compression,
    pub local_path: String,
    pub local_path_crdb_address: String,
    pub local_path_listen_address: String,
    pub log_file: String,
    pub mode: FetchMode,
    pub name: String,
    pub num_batch_rows_export: u64,
    pub num_concurrent_tables: u64,
    pub num_flush_bytes: u64,
    pub num_flush_rows: u64,
    pub pg_drop_slot: bool,
    pub pg_logical_plugin: String,
    pub pg_logical_slot_name: String,
    pub source_conn: String,
    pub store: StoreKind,
    pub target_conn: String,
    pub truncate: bool,
}

// ============================================================================
// Constants
// ============================================================================

pub const API_BASE_PATH: &str = "/api/v1";

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&RunStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        let status: RunStatus = serde_json::from_str("\"FAILURE\"").unwrap();
        assert_eq!(status, RunStatus::Failure);
    }

    #[test]
    fn test_unknown_status_decodes_instead_of_failing() {
        let status: RunStatus = serde_json::from_str("\"PAUSED\"").unwrap();
        assert_eq!(status, RunStatus::Unknown);
        assert_eq!(RunStatus::from_wire(""), RunStatus::Unknown);
        assert_eq!(RunStatus::from_wire("success"), RunStatus::Unknown);
        assert!(!RunStatus::Unknown.is_terminal());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(RunStatus::Success.is_terminal());
        assert!(RunStatus::Failure.is_terminal());
        assert!(!RunStatus::InProgress.is_terminal());
    }

    #[test]
    fn test_request_enum_values_are_bit_exact() {
        let body = CreateFetchTaskRequest {
            compression: Compression::Gzip,
            mode: FetchMode::CopyFrom,
            store: StoreKind::Aws,
            ..Default::default()
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["compression"], "gzip");
        assert_eq!(value["mode"], "COPY_FROM");
        assert_eq!(value["store"], "AWS");

        assert_eq!(serde_json::to_value(StoreKind::Gcp).unwrap(), "GCP");
        assert_eq!(serde_json::to_value(StoreKind::Local).unwrap(), "Local");
        assert_eq!(serde_json::to_value(StoreKind::None).unwrap(), "None");
        assert_eq!(serde_json::to_value(FetchMode::DirectCopy).unwrap(), "DIRECT_COPY");
        assert_eq!(serde_json::to_value(FetchMode::ImportInto).unwrap(), "IMPORT_INTO");
        assert_eq!(serde_json::to_value(Compression::None).unwrap(), "none");
        assert_eq!(serde_json::to_value(Compression::Default).unwrap(), "default");
    }

    #[test]
    fn test_fetch_detail_without_optional_sections() {
        let detail: FetchRunDetailed = serde_json::from_value(json!({
            "id": 7,
            "name": "nightly",
            "status": "IN_PROGRESS",
            "started_at": 1700000000,
            "finished_at": 0,
        }))
        .unwrap();

        assert!(detail.stats.is_none());
        assert!(detail.logs.is_empty());
        assert!(detail.verify_runs.is_empty());
        assert!(!detail.has_verify_run(1));
    }

    #[test]
    fn test_verify_detail_decodes_mismatch_type_field() {
        let detail: VerifyRunDetailed = serde_json::from_value(json!({
            "id": 3,
            "name": "verify-3",
            "status": "SUCCESS",
            "started_at": 10,
            "finished_at": 20,
            "fetch_id": 7,
            "mismatches": [{
                "timestamp": 15,
                "level": "warning",
                "message": "{\"primary_key\":[1]}",
                "schema": "public",
                "table": "users",
                "type": "mismatching row value"
            }],
            "stats": { "num_tables": 1, "num_truth_rows": 10 }
        }))
        .unwrap();

        assert_eq!(detail.mismatches[0].kind, "mismatching row value");
        let stats = detail.stats.unwrap();
        assert_eq!(stats.num_truth_rows, 10);
        assert_eq!(stats.num_missing, 0);
    }
}
