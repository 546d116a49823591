//! Event records posted to the analytics endpoint.
//!
//! Two event shapes describe a diff run: [`StartEvent`] captures the invocation
//! options when a run begins, [`EndEvent`] captures the outcome when it
//! finishes. Both are immutable `{event, properties}` records that carry the
//! anonymous installation identifier, the fixed project token, a capture
//! timestamp, and host-environment fields. They are built, sent, and discarded;
//! nothing here is persisted.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// Name of the event emitted when a diff run starts
pub const START_EVENT: &str = "os_diff_run_start";

/// Name of the event emitted when a diff run finishes
pub const END_EVENT: &str = "os_diff_run_end";

/// Fixed token identifying this project to the analytics backend
pub const PROJECT_TOKEN: &str = "ccb8c3a6-3b6f-445c-ad67-994efa7bd020";

/// Records the start of a diff run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartEvent {
    /// Event name understood by the analytics backend
    pub event: String,
    pub properties: StartProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartProperties {
    /// Anonymous installation identifier
    pub distinct_id: String,
    /// Fixed project token
    pub token: String,
    /// Capture time (Unix timestamp, fractional seconds)
    pub time: f64,
    /// Operating system family, e.g. "linux"
    pub os_type: String,
    /// Human-readable OS/platform version string
    pub os_version: String,
    /// Host tool version and implementation tag; the wire name is fixed by
    /// the backend's ingestion schema
    #[serde(rename = "python_version")]
    pub runtime_version: String,
    /// Caller-supplied diff options, passed through verbatim
    pub diff_options: Value,
}

/// Records the outcome of a diff run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndEvent {
    /// Event name understood by the analytics backend
    pub event: String,
    pub properties: EndProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndProperties {
    /// Anonymous installation identifier
    pub distinct_id: String,
    /// Fixed project token
    pub token: String,
    /// Capture time (Unix timestamp, fractional seconds)
    pub time: f64,
    /// Whether the run completed without error
    pub is_success: bool,
    /// Wall-clock duration of the run in seconds
    pub runtime_seconds: f64,
    /// Type label of the first data source, e.g. "mysql"
    pub data_source_1_type: String,
    /// Type label of the second data source
    pub data_source_2_type: String,
    /// Row count of the first table
    pub table_1_rows_cnt: u64,
    /// Row count of the second table
    pub table_2_rows_cnt: u64,
    /// Number of differing rows found
    pub diff_rows_cnt: u64,
    /// Error description for failed runs; serialized as an explicit null
    /// when absent
    pub error_message: Option<String>,
}

impl StartEvent {
    /// Build a start event for the given installation identifier.
    ///
    /// `diff_options` is accepted as-is; no validation is performed.
    pub fn new(distinct_id: impl Into<String>, diff_options: Value) -> Self {
        Self {
            event: START_EVENT.to_string(),
            properties: StartProperties {
                distinct_id: distinct_id.into(),
                token: PROJECT_TOKEN.to_string(),
                time: current_timestamp(),
                os_type: os_type(),
                os_version: os_version(),
                runtime_version: runtime_version(),
                diff_options,
            },
        }
    }
}

impl EndEvent {
    /// Build an end event for the given installation identifier.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        distinct_id: impl Into<String>,
        is_success: bool,
        runtime_seconds: f64,
        data_source_1: impl Into<String>,
        data_source_2: impl Into<String>,
        table_1_rows: u64,
        table_2_rows: u64,
        diff_rows: u64,
        error_message: Option<String>,
    ) -> Self {
        Self {
            event: END_EVENT.to_string(),
            properties: EndProperties {
                distinct_id: distinct_id.into(),
                token: PROJECT_TOKEN.to_string(),
                time: current_timestamp(),
                is_success,
                runtime_seconds,
                data_source_1_type: data_source_1.into(),
                data_source_2_type: data_source_2.into(),
                table_1_rows_cnt: table_1_rows,
                table_2_rows_cnt: table_2_rows,
                diff_rows_cnt: diff_rows,
                error_message,
            },
        }
    }
}

/// Get current timestamp as Unix timestamp (seconds since epoch)
fn current_timestamp() -> f64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs_f64()
}

fn os_type() -> String {
    std::env::consts::OS.to_string()
}

fn os_version() -> String {
    os_info::get().to_string()
}

fn runtime_version() -> String {
    format!("{}/rust", env!("CARGO_PKG_VERSION"))
}
