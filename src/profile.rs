//! Persisted anonymous profile for the telemetry client.
//!
//! The profile is a small TOML file (by default `~/.datadiff.toml`) holding the
//! durable anonymous identifier. The file is created on first use and rewritten
//! in full whenever a missing identifier has to be generated; keys other than
//! `anonymous_id` are preserved verbatim across the rewrite.

use crate::error::{Result, TelemetryError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use toml::Value;
use tracing::debug;
use uuid::Uuid;

/// File name of the profile in the user's home directory
pub const PROFILE_FILE_NAME: &str = ".datadiff.toml";

const ANONYMOUS_ID_KEY: &str = "anonymous_id";

/// The persisted profile record
#[derive(Debug, Clone)]
pub struct Profile {
    /// Durable anonymous identifier, stable across runs
    pub anonymous_id: String,
    /// Any other keys found in the profile file
    pub extra: toml::Table,
}

/// Reads and creates the on-disk profile
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Create a store rooted at the default path, `~/.datadiff.toml`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| TelemetryError::ConfigError("home directory not found".to_string()))?;
        Ok(Self { path: home.join(PROFILE_FILE_NAME) })
    }

    /// Create a store rooted at an explicit path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the profile, creating its identifier on first use.
    ///
    /// A missing file is treated as an empty profile, not an error. When the
    /// loaded profile lacks an `anonymous_id`, a fresh random UUID is generated
    /// and the whole file is rewritten with it (overwrite, not append).
    pub fn load_or_create(&self) -> Result<Profile> {
        let mut table = match fs::read_to_string(&self.path) {
            Ok(text) => text.parse::<toml::Table>()?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => toml::Table::new(),
            Err(err) => return Err(err.into()),
        };

        if !table.contains_key(ANONYMOUS_ID_KEY) {
            let id = Uuid::new_v4().to_string();
            table.insert(ANONYMOUS_ID_KEY.to_string(), Value::String(id));
            fs::write(&self.path, toml::to_string(&table)?)?;
            debug!("Created telemetry profile at {}", self.path.display());
        }

        let anonymous_id = match table.remove(ANONYMOUS_ID_KEY) {
            Some(Value::String(id)) => id,
            _ => {
                return Err(TelemetryError::ProfileError(
                    "anonymous_id is not a string".to_string(),
                ))
            }
        };

        Ok(Profile { anonymous_id, extra: table })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_creates_profile_with_valid_uuid() {
        let dir = tempdir().unwrap();
        let store = ProfileStore::with_path(dir.path().join(PROFILE_FILE_NAME));

        let profile = store.load_or_create().unwrap();

        assert!(Uuid::parse_str(&profile.anonymous_id).is_ok());
        assert!(store.path().exists());
    }

    #[test]
    fn test_identifier_is_stable_across_loads() {
        let dir = tempdir().unwrap();
        let store = ProfileStore::with_path(dir.path().join(PROFILE_FILE_NAME));

        let first = store.load_or_create().unwrap();
        let second = store.load_or_create().unwrap();

        assert_eq!(first.anonymous_id, second.anonymous_id);
    }

    #[test]
    fn test_preserves_unrelated_keys_on_rewrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(PROFILE_FILE_NAME);
        fs::write(&path, "editor = \"vim\"\n").unwrap();

        let store = ProfileStore::with_path(&path);
        let profile = store.load_or_create().unwrap();

        assert_eq!(profile.extra.get("editor"), Some(&Value::String("vim".to_string())));

        let rewritten = fs::read_to_string(&path).unwrap();
        assert!(rewritten.contains("editor"));
        assert!(rewritten.contains("anonymous_id"));
    }

    #[test]
    fn test_existing_identifier_is_not_rewritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(PROFILE_FILE_NAME);
        fs::write(&path, "anonymous_id = \"11111111-2222-3333-4444-555555555555\"\n").unwrap();

        let store = ProfileStore::with_path(&path);
        let profile = store.load_or_create().unwrap();

        assert_eq!(profile.anonymous_id, "11111111-2222-3333-4444-555555555555");
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(PROFILE_FILE_NAME);
        fs::write(&path, "not = valid = toml").unwrap();

        let store = ProfileStore::with_path(&path);
        let result = store.load_or_create();

        match result {
            Err(TelemetryError::ProfileParseError(_)) => {}
            other => panic!("Expected ProfileParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_non_string_identifier_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(PROFILE_FILE_NAME);
        fs::write(&path, "anonymous_id = 42\n").unwrap();

        let store = ProfileStore::with_path(&path);
        let result = store.load_or_create();

        match result {
            Err(TelemetryError::ProfileError(_)) => {}
            other => panic!("Expected ProfileError, got {:?}", other),
        }
    }
}
