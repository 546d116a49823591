pub mod client;
pub mod error;
pub mod events;
pub mod profile;
pub mod transport;

pub use client::{TelemetryClient, TelemetryConfig};
pub use error::{Result, TelemetryError};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::client::{TelemetryClient, TelemetryConfig};
    pub use crate::error::{Result, TelemetryError};
    pub use crate::events::{EndEvent, StartEvent};
    pub use crate::profile::{Profile, ProfileStore};
    pub use crate::transport::EventTransport;
}
