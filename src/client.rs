//! The telemetry client owned by the host application.
//!
//! [`TelemetryClient`] is an explicit context object: it holds the tracking
//! flag, the memoized anonymous identifier, the profile store, and the
//! transport. The host creates one client, passes it to whatever needs to
//! report, and drops it when the run is over. Keeping the state here instead
//! of in process-wide globals keeps tests hermetic and lets two clients with
//! different configurations coexist.
//!
//! The tracking flag is one-way: once [`TelemetryClient::disable_tracking`]
//! has been called there is no way to re-enable reporting on that client.

use crate::error::{Result, TelemetryError};
use crate::events::{EndEvent, StartEvent};
use crate::profile::ProfileStore;
use crate::transport::{EventTransport, REQUEST_TIMEOUT, TRACK_URL};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Environment variable that disables tracking for clients built from the
/// default configuration
pub const DISABLE_TRACKING_ENV: &str = "DATADIFF_NO_ANALYTICS";

/// Configuration for the telemetry client
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Endpoint events are posted to
    pub endpoint: String,
    /// Profile file location; `None` selects `~/.datadiff.toml`
    pub profile_path: Option<PathBuf>,
    /// Request timeout for each POST
    pub timeout: Duration,
    /// Initial state of the tracking flag
    pub enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            endpoint: TRACK_URL.to_string(),
            profile_path: None,
            timeout: REQUEST_TIMEOUT,
            enabled: std::env::var_os(DISABLE_TRACKING_ENV).is_none(),
        }
    }
}

/// Anonymous usage reporter for one host application
pub struct TelemetryClient {
    store: ProfileStore,
    transport: EventTransport,
    enabled: AtomicBool,
    anonymous_id: OnceCell<String>,
}

impl TelemetryClient {
    /// Create a client with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(TelemetryConfig::default())
    }

    /// Create a client with a custom configuration
    pub fn with_config(config: TelemetryConfig) -> Result<Self> {
        let store = match config.profile_path {
            Some(path) => ProfileStore::with_path(path),
            None => ProfileStore::new()?,
        };

        Ok(Self {
            store,
            transport: EventTransport::with_config(config.endpoint, config.timeout),
            enabled: AtomicBool::new(config.enabled),
            anonymous_id: OnceCell::new(),
        })
    }

    /// Turn tracking off for the rest of this client's lifetime
    pub fn disable_tracking(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    /// Whether events will currently be sent
    pub fn is_tracking_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// The durable anonymous identifier for this installation.
    ///
    /// Loaded (or created) through the profile store on first call and
    /// memoized for the lifetime of the client; later calls never touch the
    /// disk.
    pub fn anonymous_id(&self) -> Result<&str> {
        let id = self
            .anonymous_id
            .get_or_try_init(|| self.store.load_or_create().map(|profile| profile.anonymous_id))?;

        Ok(id.as_str())
    }

    /// Build a start event from the caller-supplied diff options.
    ///
    /// Any serializable value is accepted and passed through verbatim.
    pub fn start_event<T: Serialize>(&self, diff_options: &T) -> Result<StartEvent> {
        let distinct_id = self.anonymous_id()?.to_string();

        Ok(StartEvent::new(distinct_id, serde_json::to_value(diff_options)?))
    }

    /// Build an end event from the run outcome
    #[allow(clippy::too_many_arguments)]
    pub fn end_event(
        &self,
        is_success: bool,
        runtime_seconds: f64,
        data_source_1: impl Into<String>,
        data_source_2: impl Into<String>,
        table_1_rows: u64,
        table_2_rows: u64,
        diff_rows: u64,
        error_message: Option<String>,
    ) -> Result<EndEvent> {
        let distinct_id = self.anonymous_id()?.to_string();

        Ok(EndEvent::new(
            distinct_id,
            is_success,
            runtime_seconds,
            data_source_1,
            data_source_2,
            table_1_rows,
            table_2_rows,
            diff_rows,
            error_message,
        ))
    }

    /// Send one event, best effort.
    ///
    /// Fails with [`TelemetryError::TrackingDisabled`] when tracking is off,
    /// without touching the network. Otherwise the transport absorbs every
    /// delivery failure and this returns `Ok(())` regardless of what the
    /// wire did.
    pub async fn send<E: Serialize>(&self, event: &E) -> Result<()> {
        if !self.is_tracking_enabled() {
            return Err(TelemetryError::TrackingDisabled);
        }

        self.transport.send(event).await;

        Ok(())
    }
}
