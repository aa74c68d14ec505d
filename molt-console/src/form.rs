//! Task configuration form: state, per-field validation, the equivalent
//! `molt fetch` invocation, and the create request.

use molt_types::{Compression, CreateFetchTaskRequest, FetchMode, StoreKind};

use crate::connections::mask_password;

pub const FETCH_COMMAND: &str = "molt fetch";
pub const DEFAULT_SOURCE_URL: &str = "postgres://postgres@localhost:5432/postgres";
pub const DEFAULT_TARGET_URL: &str = "postgres://root@localhost:26257/defaultdb?sslmode=disable";

const EMPTY_FIELD_ERROR: &str = "Field cannot be empty.";
const NUMBER_FIELD_ERROR: &str = "Must be a whole number.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Import,
    DirectCopy,
    LiveCopyFromStore,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Import, Mode::DirectCopy, Mode::LiveCopyFromStore];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Import => "import",
            Self::DirectCopy => "directCopy",
            Self::LiveCopyFromStore => "liveCopyFromStore",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.id() == id)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Import => "IMPORT into (intermediate store)",
            Self::DirectCopy => "Direct copy from source",
            Self::LiveCopyFromStore => "Live copy from intermediate store",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Import => "Recommended path because the load is more efficient and supports compression. The target table is taken offline while loading.",
            Self::DirectCopy => "Leaves the target table online while the data load is ongoing, moving data between source and target without an intermediate store.",
            Self::LiveCopyFromStore => "COPY FROM an intermediate store to the target.",
        }
    }

    pub fn default_compression(&self) -> CompressionType {
        match self {
            Self::Import => CompressionType::Gzip,
            Self::DirectCopy | Self::LiveCopyFromStore => CompressionType::None,
        }
    }

    fn wire(&self) -> FetchMode {
        match self {
            Self::Import => FetchMode::ImportInto,
            Self::DirectCopy => FetchMode::DirectCopy,
            Self::LiveCopyFromStore => FetchMode::CopyFrom,
        }
    }

    fn flag(&self) -> Option<&'static str> {
        match self {
            Self::Import => None,
            Self::DirectCopy => Some("--direct-copy"),
            Self::LiveCopyFromStore => Some("--live"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntermediateStore {
    Local,
    S3,
    Gcs,
}

impl IntermediateStore {
    pub const ALL: [IntermediateStore; 3] = [
        IntermediateStore::Local,
        IntermediateStore::S3,
        IntermediateStore::Gcs,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::S3 => "S3",
            Self::Gcs => "GCS",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|store| store.id() == id)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Local => "Local store",
            Self::S3 => "Amazon S3",
            Self::Gcs => "Google Cloud GCS",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Local => "Runs a local file server and uses it as the intermediate store.",
            Self::S3 => "Use an existing AWS S3 bucket as the intermediate store.",
            Self::Gcs => "Use an existing GCP GCS bucket as the intermediate store.",
        }
    }

    pub fn is_cloud(&self) -> bool {
        matches!(self, Self::S3 | Self::Gcs)
    }

    fn wire(&self) -> StoreKind {
        match self {
            Self::Local => StoreKind::Local,
            Self::S3 => StoreKind::Aws,
            Self::Gcs => StoreKind::Gcp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    Default,
    None,
    Gzip,
}

impl CompressionType {
    pub const ALL: [CompressionType; 3] = [
        CompressionType::Default,
        CompressionType::None,
        CompressionType::Gzip,
    ];

    pub fn id(&self) -> &'static str {
        self.wire().as_wire()
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    fn wire(&self) -> Compression {
        match self {
            Self::Default => Compression::Default,
            Self::None => Compression::None,
            Self::Gzip => Compression::Gzip,
        }
    }
}

/// Text and number inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    SourceUrl,
    TargetUrl,
    BucketName,
    BucketPath,
    LocalPath,
    LocalPathListenAddr,
    LocalPathCrdbAccessAddr,
    LogFile,
    FlushNumRows,
    FlushSize,
    NumConcurrentTables,
    NumBatchRowsExport,
    PgLogicalSlotName,
    PgLogicalSlotPlugin,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Task name",
            Self::SourceUrl => "Source connection string",
            Self::TargetUrl => "Target connection string",
            Self::BucketName => "Bucket name",
            Self::BucketPath => "Bucket path",
            Self::LocalPath => "Local path",
            Self::LocalPathListenAddr => "Local path listen address",
            Self::LocalPathCrdbAccessAddr => "Local path CRDB access address",
            Self::LogFile => "Log file",
            Self::FlushNumRows => "Number of rows before flushing data",
            Self::FlushSize => "Number of bytes before flushing data",
            Self::NumConcurrentTables => "Number of tables to process concurrently",
            Self::NumBatchRowsExport => "Number of rows to export at a time from the source",
            Self::PgLogicalSlotName => "PG logical replication slot name",
            Self::PgLogicalSlotPlugin => "PG logical replication slot plugin",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::FlushNumRows
                | Self::FlushSize
                | Self::NumConcurrentTables
                | Self::NumBatchRowsExport
        )
    }

    fn is_optional(&self) -> bool {
        matches!(
            self,
            Self::BucketPath | Self::LogFile | Self::PgLogicalSlotName | Self::PgLogicalSlotPlugin
        )
    }

    /// Error message for the current value; empty means valid.
    pub fn validate(&self, value: &str) -> String {
        if self.is_optional() {
            return String::new();
        }
        if value.trim().is_empty() {
            return EMPTY_FIELD_ERROR.to_string();
        }
        if self.is_numeric() && parse_count(value).is_err() {
            return NUMBER_FIELD_ERROR.to_string();
        }
        String::new()
    }
}

fn parse_count(value: &str) -> Result<u64, String> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid number '{value}': {e}"))
}

/// Numeric drafts that do not parse count as zero.
fn count_or_zero(value: &str) -> u64 {
    parse_count(value).unwrap_or(0)
}

/// Client-only state for one task-creation request.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFormState {
    pub name: String,
    pub source_url: String,
    pub target_url: String,
    pub mode: Mode,
    pub store: IntermediateStore,
    pub bucket_name: String,
    pub bucket_path: String,
    pub local_path: String,
    pub local_path_listen_addr: String,
    pub local_path_crdb_access_addr: String,
    pub cleanup: bool,
    pub log_file: String,
    pub compression: CompressionType,
    pub truncate: bool,
    pub flush_num_rows: String,
    pub flush_size: String,
    pub num_concurrent_tables: String,
    pub num_batch_rows_export: String,
    pub pg_logical_slot_name: String,
    pub pg_logical_slot_plugin: String,
    pub drop_pg_logical_slot: bool,
}

impl Default for TaskFormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            source_url: DEFAULT_SOURCE_URL.to_string(),
            target_url: DEFAULT_TARGET_URL.to_string(),
            mode: Mode::Import,
            store: IntermediateStore::Local,
            bucket_name: String::new(),
            bucket_path: String::new(),
            local_path: String::new(),
            local_path_listen_addr: String::new(),
            local_path_crdb_access_addr: String::new(),
            cleanup: false,
            log_file: String::new(),
            compression: CompressionType::Gzip,
            truncate: false,
            flush_num_rows: "0".to_string(),
            flush_size: "0".to_string(),
            num_concurrent_tables: "4".to_string(),
            num_batch_rows_export: "100000".to_string(),
            pg_logical_slot_name: String::new(),
            pg_logical_slot_plugin: String::new(),
            drop_pg_logical_slot: false,
        }
    }
}

impl TaskFormState {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::SourceUrl => &self.source_url,
            FormField::TargetUrl => &self.target_url,
            FormField::BucketName => &self.bucket_name,
            FormField::BucketPath => &self.bucket_path,
            FormField::LocalPath => &self.local_path,
            FormField::LocalPathListenAddr => &self.local_path_listen_addr,
            FormField::LocalPathCrdbAccessAddr => &self.local_path_crdb_access_addr,
            FormField::LogFile => &self.log_file,
            FormField::FlushNumRows => &self.flush_num_rows,
            FormField::FlushSize => &self.flush_size,
            FormField::NumConcurrentTables => &self.num_concurrent_tables,
            FormField::NumBatchRowsExport => &self.num_batch_rows_export,
            FormField::PgLogicalSlotName => &self.pg_logical_slot_name,
            FormField::PgLogicalSlotPlugin => &self.pg_logical_slot_plugin,
        }
    }

    /// Store raw input. Validation happens on blur, not here.
    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::SourceUrl => &mut self.source_url,
            FormField::TargetUrl => &mut self.target_url,
            FormField::BucketName => &mut self.bucket_name,
            FormField::BucketPath => &mut self.bucket_path,
            FormField::LocalPath => &mut self.local_path,
            FormField::LocalPathListenAddr => &mut self.local_path_listen_addr,
            FormField::LocalPathCrdbAccessAddr => &mut self.local_path_crdb_access_addr,
            FormField::LogFile => &mut self.log_file,
            FormField::FlushNumRows => &mut self.flush_num_rows,
            FormField::FlushSize => &mut self.flush_size,
            FormField::NumConcurrentTables => &mut self.num_concurrent_tables,
            FormField::NumBatchRowsExport => &mut self.num_batch_rows_export,
            FormField::PgLogicalSlotName => &mut self.pg_logical_slot_name,
            FormField::PgLogicalSlotPlugin => &mut self.pg_logical_slot_plugin,
        };
        *slot = value;
    }

    /// Selecting a mode card also resets compression to that mode's default.
    pub fn select_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.compression = mode.default_compression();
    }

    pub fn uses_store(&self) -> bool {
        self.mode != Mode::DirectCopy
    }

    /// Fields shown for the current mode/store selection.
    pub fn visible_fields(&self) -> Vec<FormField> {
        let mut fields = vec![FormField::Name, FormField::SourceUrl, FormField::TargetUrl];
        if self.uses_store() {
            if self.store.is_cloud() {
                fields.extend([FormField::BucketName, FormField::BucketPath]);
            } else {
                fields.extend([
                    FormField::LocalPath,
                    FormField::LocalPathListenAddr,
                    FormField::LocalPathCrdbAccessAddr,
                ]);
            }
        }
        fields.extend([
            FormField::LogFile,
            FormField::FlushNumRows,
            FormField::FlushSize,
            FormField::NumConcurrentTables,
            FormField::NumBatchRowsExport,
            FormField::PgLogicalSlotName,
            FormField::PgLogicalSlotPlugin,
        ]);
        fields
    }

    /// Errors that block submission, in form order.
    pub fn validation_errors(&self) -> Vec<(FormField, String)> {
        self.visible_fields()
            .into_iter()
            .filter_map(|field| {
                let error = field.validate(self.value(field));
                (!error.is_empty()).then_some((field, error))
            })
            .collect()
    }

    /// The `molt fetch` invocation equivalent to the current state.
    ///
    /// Sections in order: endpoints + mode, intermediate store (not for
    /// direct copy), task level, performance tuning, replication. Value
    /// flags appear only when their value is non-empty / positive.
    /// Connection passwords are masked; [`TaskFormState::to_request`]
    /// carries the real strings.
    pub fn command_preview(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("--source {}", mask_password(self.source_url.trim())));
        let mut target = format!("--target {}", mask_password(self.target_url.trim()));
        if let Some(flag) = self.mode.flag() {
            target.push(' ');
            target.push_str(flag);
        }
        lines.push(target);

        if self.uses_store() {
            let mut store_lines = Vec::new();
            if self.store.is_cloud() {
                let bucket_flag = match self.store {
                    IntermediateStore::S3 => "--s3-bucket",
                    _ => "--gcp-bucket",
                };
                let mut tokens = Vec::new();
                push_value_flag(&mut tokens, bucket_flag, &self.bucket_name);
                push_value_flag(&mut tokens, "--bucket-path", &self.bucket_path);
                store_lines.push(tokens.join(" "));
            } else {
                for (flag, value) in [
                    ("--local-path", &self.local_path),
                    ("--local-path-listen-addr", &self.local_path_listen_addr),
                    ("--local-path-crdb-access-addr", &self.local_path_crdb_access_addr),
                ] {
                    let mut tokens = Vec::new();
                    push_value_flag(&mut tokens, flag, value);
                    store_lines.push(tokens.join(" "));
                }
            }
            store_lines.retain(|line| !line.is_empty());

            if self.cleanup {
                match store_lines.last_mut() {
                    Some(last) => last.push_str(" --cleanup"),
                    None => store_lines.push("--cleanup".to_string()),
                }
            }
            lines.extend(store_lines);
        }

        let mut task = vec![format!("--compression {}", self.compression.id())];
        push_value_flag(&mut task, "--log-file", &self.log_file);
        if self.truncate {
            task.push("--truncate".to_string());
        }
        lines.push(task.join(" "));

        let mut tuning = Vec::new();
        for (flag, value) in [
            ("--flush-rows", &self.flush_num_rows),
            ("--flush-size", &self.flush_size),
            ("--concurrency", &self.num_concurrent_tables),
            ("--row-batch-size", &self.num_batch_rows_export),
        ] {
            let count = count_or_zero(value);
            if count > 0 {
                tuning.push(format!("{flag} {count}"));
            }
        }
        if !tuning.is_empty() {
            lines.push(tuning.join(" "));
        }

        if !self.pg_logical_slot_name.trim().is_empty() {
            lines.push(format!(
                "--pg-logical-replication-slot-name {}",
                self.pg_logical_slot_name.trim()
            ));
        }
        if !self.pg_logical_slot_plugin.trim().is_empty() {
            lines.push(format!(
                "--pg-logical-replication-slot-plugin {}",
                self.pg_logical_slot_plugin.trim()
            ));
        }
        if self.drop_pg_logical_slot {
            lines.push("--pg-logical-replication-slot-drop-if-exists".to_string());
        }

        let body = lines
            .iter()
            .map(|line| format!(" {line}"))
            .collect::<Vec<_>>()
            .join(" \\\n");
        trim_trailing_continuation(&format!("{FETCH_COMMAND}\n{body}"))
    }

    /// Request body for `POST /api/v1/fetch`.
    pub fn to_request(&self) -> CreateFetchTaskRequest {
        CreateFetchTaskRequest {
            bucket_name: self.bucket_name.trim().to_string(),
            bucket_path: self.bucket_path.trim().to_string(),
            cleanup_intermediary_store: self.cleanup,
            compression: self.compression.wire(),
            local_path: self.local_path.trim().to_string(),
            local_path_crdb_address: self.local_path_crdb_access_addr.trim().to_string(),
            local_path_listen_address: self.local_path_listen_addr.trim().to_string(),
            log_file: self.log_file.trim().to_string(),
            mode: self.mode.wire(),
            name: self.name.trim().to_string(),
            num_batch_rows_export: count_or_zero(&self.num_batch_rows_export),
            num_concurrent_tables: count_or_zero(&self.num_concurrent_tables),
            num_flush_bytes: count_or_zero(&self.flush_size),
            num_flush_rows: count_or_zero(&self.flush_num_rows),
            pg_drop_slot: self.drop_pg_logical_slot,
            pg_logical_plugin: self.pg_logical_slot_plugin.trim().to_string(),
            pg_logical_slot_name: self.pg_logical_slot_name.trim().to_string(),
            source_conn: self.source_url.trim().to_string(),
            store: if self.uses_store() {
                self.store.wire()
            } else {
                StoreKind::None
            },
            target_conn: self.target_url.trim().to_string(),
            truncate: self.truncate,
        }
    }
}

fn push_value_flag(tokens: &mut Vec<String>, flag: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        tokens.push(format!("{flag} {value}"));
    }
}

fn trim_trailing_continuation(cmd: &str) -> String {
    let trimmed = cmd.trim_end();
    trimmed
        .strip_suffix('\\')
        .map(str::trim_end)
        .unwrap_or(trimmed)
        .to_string()
}
