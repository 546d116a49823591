//! Best-effort delivery of analytics events.
//!
//! The transport performs a single HTTP POST per event and deliberately
//! forgets about it afterwards: connection errors, timeouts, and non-200
//! responses are consumed internally and logged at debug level so that a
//! failing analytics backend can never affect the host tool. There is no
//! retry, no backoff, and no queue.

use crate::error::{Result, TelemetryError};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Endpoint events are posted to
pub const TRACK_URL: &str = "https://api.perfalytics.com/track";

/// Request timeout applied to every POST
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// Fire-and-forget transport for analytics events
pub struct EventTransport {
    client: Client,
    endpoint: String,
}

impl EventTransport {
    /// Create a transport pointed at the production endpoint
    pub fn new() -> Self {
        Self::with_config(TRACK_URL, REQUEST_TIMEOUT)
    }

    /// Create a transport with a custom endpoint
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self::with_config(endpoint, REQUEST_TIMEOUT)
    }

    /// Create a transport with a custom endpoint and timeout
    pub fn with_config(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder().timeout(timeout).build().unwrap();

        Self { client, endpoint: endpoint.into() }
    }

    /// Post one event, swallowing every failure.
    ///
    /// The event is serialized to JSON and posted once with
    /// `Content-Type: application/json`. Whatever happens on the wire, this
    /// returns normally; failures are only visible in the debug log.
    pub async fn send<E: Serialize>(&self, event: &E) {
        if let Err(err) = self.deliver(event).await {
            debug!("Failed to post analytics event: {}", err);
        }
    }

    async fn deliver<E: Serialize>(&self, event: &E) -> Result<()> {
        let response = self.client.post(&self.endpoint).json(event).send().await?;

        // The backend signals acceptance with exactly 200.
        if response.status() != StatusCode::OK {
            return Err(TelemetryError::ApiError(format!(
                "analytics endpoint returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

impl Default for EventTransport {
    fn default() -> Self {
        Self::new()
    }
}
