//! Wire records to display values.
//!
//! Everything here is pure and total: unknown inputs map to a sentinel or an
//! empty string, never to a panic.

use chrono::DateTime;
use molt_types::{
    FetchRun, FetchStatsDetailed, Log, RunStatus, VerifyRun, VerifyStatsDetailed,
};

use crate::table::{SortValue, SortableRow};

// ============================================================================
// Status + Level
// ============================================================================

pub fn status_label(status: RunStatus) -> &'static str {
    match status {
        RunStatus::InProgress => "In Progress",
        RunStatus::Success => "Success",
        RunStatus::Failure => "Failure",
        RunStatus::Unknown => "Unknown",
    }
}

/// Status from a raw wire string; anything unrecognised is `Unknown`.
pub fn status_from_string(value: &str) -> RunStatus {
    RunStatus::from_wire(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Info,
    Warning,
    Danger,
}

impl LogLevel {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "info" => Self::Info,
            "warning" => Self::Warning,
            "error" => Self::Danger,
            _ => Self::Info,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Danger => "ERROR",
        }
    }
}

/// Closed set of chip looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipVariant {
    Success,
    Danger,
    Warn,
    Info,
}

impl ChipVariant {
    pub fn for_status(status: RunStatus) -> Self {
        match status {
            RunStatus::Success => Self::Success,
            RunStatus::Failure => Self::Danger,
            RunStatus::InProgress => Self::Info,
            RunStatus::Unknown => Self::Warn,
        }
    }

    pub fn for_level(level: LogLevel) -> Self {
        match level {
            LogLevel::Info => Self::Info,
            LogLevel::Warning => Self::Warn,
            LogLevel::Danger => Self::Danger,
        }
    }

    /// (foreground, background)
    pub fn colors(&self) -> (&'static str, &'static str) {
        match self {
            Self::Success => ("#16a34a", "rgba(22, 163, 74, 0.12)"),
            Self::Danger => ("#dc2626", "rgba(220, 38, 38, 0.12)"),
            Self::Warn => ("#d97706", "rgba(245, 158, 11, 0.14)"),
            Self::Info => ("#2563eb", "rgba(37, 99, 235, 0.12)"),
        }
    }
}

// ============================================================================
// Time
// ============================================================================

/// `3661 -> "01h 01m 01s"`. Negative input yields an empty string.
pub fn format_seconds_hhmmss(total_seconds: i64) -> String {
    if total_seconds < 0 {
        return String::new();
    }

    let hours = total_seconds / 3600;
    let remainder = total_seconds % 3600;
    let minutes = remainder / 60;
    let seconds = remainder % 60;

    format!("{hours:02}h {minutes:02}m {seconds:02}s")
}

fn ms_to_seconds(ms: f64) -> i64 {
    (ms / 1000.0).round() as i64
}

/// Duration of a run for display.
///
/// Prefers the export duration, then the net duration reported in stats,
/// then wall-clock `finished - started`. Empty when none is usable.
pub fn format_run_duration(
    started_at: i64,
    finished_at: i64,
    net_duration_ms: Option<f64>,
    export_duration_ms: Option<f64>,
) -> String {
    if let Some(ms) = export_duration_ms.filter(|ms| *ms > 0.0) {
        return format_seconds_hhmmss(ms_to_seconds(ms));
    }
    if let Some(ms) = net_duration_ms.filter(|ms| *ms > 0.0) {
        return format_seconds_hhmmss(ms_to_seconds(ms));
    }
    if started_at > 0 && finished_at > 0 {
        return format_seconds_hhmmss(finished_at - started_at);
    }

    String::new()
}

/// Wall-clock run length in seconds, when both ends are set.
pub fn run_duration_seconds(started_at: i64, finished_at: i64) -> Option<i64> {
    (started_at > 0 && finished_at >= started_at).then(|| finished_at - started_at)
}

fn duration_sort_value(started_at: i64, finished_at: i64) -> SortValue {
    run_duration_seconds(started_at, finished_at)
        .map(SortValue::Int)
        .unwrap_or(SortValue::None)
}

/// RFC 3339 UTC rendering of epoch seconds; unset (`<= 0`) renders empty.
pub fn format_epoch(timestamp: i64) -> String {
    if timestamp <= 0 {
        return String::new();
    }

    DateTime::from_timestamp(timestamp, 0)
        .map(|ts| ts.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_default()
}

// ============================================================================
// Rows
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FetchListRow {
    pub id: i64,
    pub name: String,
    pub status: RunStatus,
    pub duration: String,
    pub started_at: i64,
    pub finished_at: i64,
}

impl From<&FetchRun> for FetchListRow {
    fn from(run: &FetchRun) -> Self {
        Self {
            id: run.id,
            name: run.name.clone(),
            status: run.status,
            duration: format_run_duration(run.started_at, run.finished_at, None, None),
            started_at: run.started_at,
            finished_at: run.finished_at,
        }
    }
}

impl SortableRow for FetchListRow {
    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "id" => SortValue::Int(self.id),
            "name" => SortValue::Text(self.name.clone()),
            "status" => SortValue::Text(status_label(self.status).to_string()),
            "duration" => duration_sort_value(self.started_at, self.finished_at),
            "started_at" => SortValue::Int(self.started_at),
            "finished_at" => SortValue::Int(self.finished_at),
            _ => SortValue::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerifyListRow {
    pub id: i64,
    pub fetch_id: i64,
    pub name: String,
    pub status: RunStatus,
    pub duration: String,
    pub started_at: i64,
    pub finished_at: i64,
}

impl From<&VerifyRun> for VerifyListRow {
    fn from(run: &VerifyRun) -> Self {
        Self {
            id: run.id,
            fetch_id: run.fetch_id,
            name: run.name.clone(),
            status: run.status,
            duration: format_run_duration(run.started_at, run.finished_at, None, None),
            started_at: run.started_at,
            finished_at: run.finished_at,
        }
    }
}

impl SortableRow for VerifyListRow {
    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "id" => SortValue::Int(self.id),
            "fetch_id" => SortValue::Int(self.fetch_id),
            "name" => SortValue::Text(self.name.clone()),
            "status" => SortValue::Text(status_label(self.status).to_string()),
            "duration" => duration_sort_value(self.started_at, self.finished_at),
            "started_at" => SortValue::Int(self.started_at),
            "finished_at" => SortValue::Int(self.finished_at),
            _ => SortValue::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogRow {
    pub key: String,
    pub timestamp: i64,
    pub created_at: String,
    pub level: LogLevel,
    pub message: String,
}

/// Log rows keep service order; the key disambiguates equal timestamps.
pub fn log_rows(logs: &[Log]) -> Vec<LogRow> {
    logs.iter()
        .enumerate()
        .map(|(idx, log)| LogRow {
            key: format!("{}-{idx}", log.timestamp),
            timestamp: log.timestamp,
            created_at: format_epoch(log.timestamp),
            level: LogLevel::from_wire(&log.level),
            message: log.message.clone(),
        })
        .collect()
}

impl SortableRow for LogRow {
    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "created_at" => SortValue::Int(self.timestamp),
            "level" => SortValue::Text(self.level.label().to_string()),
            "message" => SortValue::Text(self.message.clone()),
            _ => SortValue::None,
        }
    }
}

// ============================================================================
// Stats
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct StatItem {
    pub label: &'static str,
    pub value: String,
}

fn push_count(items: &mut Vec<StatItem>, label: &'static str, value: i64) {
    if value != 0 {
        items.push(StatItem {
            label,
            value: value.to_string(),
        });
    }
}

fn push_text(items: &mut Vec<StatItem>, label: &'static str, value: String) {
    if !value.trim().is_empty() {
        items.push(StatItem { label, value });
    }
}

/// Stats panel entries for a fetch run; zero and empty entries are hidden.
pub fn fetch_stat_items(
    stats: &FetchStatsDetailed,
    started_at: i64,
    finished_at: i64,
) -> Vec<StatItem> {
    let mut items = Vec::new();
    push_text(
        &mut items,
        "Percent Complete",
        if stats.percent_complete.trim().is_empty() {
            String::new()
        } else {
            format!("{}%", stats.percent_complete.trim_end_matches('%'))
        },
    );
    push_count(&mut items, "Tables", stats.num_tables);
    push_count(&mut items, "Rows", stats.num_rows);
    push_count(&mut items, "Errors", stats.num_errors);
    push_text(
        &mut items,
        "Net Duration",
        format_run_duration(
            started_at,
            finished_at,
            Some(stats.net_duration_ms),
            None,
        ),
    );
    if stats.export_duration_ms > 0.0 {
        push_text(
            &mut items,
            "Export Duration",
            format_seconds_hhmmss(ms_to_seconds(stats.export_duration_ms)),
        );
    }
    if stats.import_duration_ms > 0.0 {
        push_text(
            &mut items,
            "Import Duration",
            format_seconds_hhmmss(ms_to_seconds(stats.import_duration_ms)),
        );
    }
    push_text(&mut items, "CDC Cursor", stats.cdc_cursor.clone());
    items
}

/// Stats panel entries for a verify run; zero and empty entries are hidden.
pub fn verify_stat_items(
    stats: &VerifyStatsDetailed,
    started_at: i64,
    finished_at: i64,
) -> Vec<StatItem> {
    let mut items = Vec::new();
    push_count(&mut items, "Tables", stats.num_tables);
    push_count(&mut items, "Rows", stats.num_truth_rows);
    push_count(&mut items, "Success", stats.num_success);
    push_count(&mut items, "Conditional Success", stats.num_conditional_success);
    push_count(&mut items, "Column Mismatch", stats.num_column_mismatch);
    push_count(&mut items, "Extraneous", stats.num_extraneous);
    push_count(&mut items, "Live Retry", stats.num_live_retry);
    push_count(&mut items, "Row Mismatching", stats.num_mismatch);
    push_count(&mut items, "Row Missing", stats.num_missing);
    push_text(
        &mut items,
        "Net Duration",
        format_run_duration(
            started_at,
            finished_at,
            Some(stats.net_duration_ms),
            Some(stats.net_duration_ms),
        ),
    );
    items
}
