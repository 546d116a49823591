//! Error types and result aliases for the datadiff telemetry library.
//!
//! This module defines the core error type [`TelemetryError`] and the [`Result`] type alias
//! used throughout the library. All public APIs that can fail return `Result<T>` for
//! consistent error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Tracking is disabled")]
    TrackingDisabled,

    #[error("Invalid profile: {0}")]
    ProfileError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Profile parse error: {0}")]
    ProfileParseError(#[from] toml::de::Error),

    #[error("Profile encode error: {0}")]
    ProfileEncodeError(#[from] toml::ser::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TelemetryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_disabled_display() {
        let err = TelemetryError::TrackingDisabled;
        assert_eq!(err.to_string(), "Tracking is disabled");
    }

    #[test]
    fn test_profile_error_display() {
        let err = TelemetryError::ProfileError("anonymous_id is not a string".to_string());
        assert_eq!(err.to_string(), "Invalid profile: anonymous_id is not a string");
    }

    #[test]
    fn test_config_error_display() {
        let err = TelemetryError::ConfigError("home directory not found".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: home directory not found");
    }

    #[test]
    fn test_api_error_display() {
        let err = TelemetryError::ApiError("analytics endpoint returned 500".to_string());
        assert_eq!(err.to_string(), "API error: analytics endpoint returned 500");
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: TelemetryError = json_err.into();

        match err {
            TelemetryError::SerializationError(_) => {}
            _ => panic!("Expected SerializationError"),
        }
    }

    #[test]
    fn test_profile_parse_error_conversion() {
        let toml_err = "not = valid = toml".parse::<toml::Table>().unwrap_err();
        let err: TelemetryError = toml_err.into();

        match err {
            TelemetryError::ProfileParseError(_) => {}
            _ => panic!("Expected ProfileParseError"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TelemetryError = io_err.into();

        match err {
            TelemetryError::IoError(_) => {}
            _ => panic!("Expected IoError"),
        }
    }

    #[test]
    fn test_error_debug() {
        let err = TelemetryError::TrackingDisabled;
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("TrackingDisabled"));
    }

    #[test]
    fn test_result_type() {
        let ok_result: Result<i32> = Ok(42);
        assert!(ok_result.is_ok());
        if let Ok(value) = ok_result {
            assert_eq!(value, 42);
        }

        let err_result: Result<i32> = Err(TelemetryError::TrackingDisabled);
        assert!(err_result.is_err());
    }
}
