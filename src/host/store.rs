use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cooldown state io: {0}")]
    Io(#[from] std::io::Error),
    #[error("cooldown state parse: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cooldown state encode: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("no writable data directory for cooldown state")]
    NoDataDir,
}

/// Durable key/value home for the single dismissal timestamp.
///
/// Read at startup, written on dismissal only.
pub trait CooldownStore: std::fmt::Debug {
    fn last_dismissed(&self) -> Result<Option<SystemTime>, StoreError>;
    fn record_dismissed(&mut self, at: SystemTime) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CooldownRecord {
    /// Unix seconds of the last "Later" click.
    install_prompt_closed: Option<u64>,
}

/// File-backed store: one TOML record in the platform data dir.
#[derive(Debug)]
pub struct FileCooldownStore {
    path: PathBuf,
}

impl FileCooldownStore {
    pub fn open_default() -> Result<Self, StoreError> {
        let proj_dirs = directories::ProjectDirs::from("", "", "install-nudge")
            .ok_or(StoreError::NoDataDir)?;
        fs::create_dir_all(proj_dirs.data_dir())?;
        Ok(Self::at_path(proj_dirs.data_dir().join("cooldown.toml")))
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CooldownStore for FileCooldownStore {
    fn last_dismissed(&self) -> Result<Option<SystemTime>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)?;
        let record: CooldownRecord = toml::from_str(&raw)?;
        Ok(record
            .install_prompt_closed
            .map(|secs| UNIX_EPOCH + Duration::from_secs(secs)))
    }

    fn record_dismissed(&mut self, at: SystemTime) -> Result<(), StoreError> {
        let secs = at
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs();
        let record = CooldownRecord {
            install_prompt_closed: Some(secs),
        };

        // Write-then-rename so a crash never leaves a half-written record.
        let encoded = toml::to_string(&record)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, encoded)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory store for tests and embedders without durable storage.
#[derive(Debug, Default)]
pub struct MemoryCooldownStore {
    last: Option<SystemTime>,
}

impl MemoryCooldownStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_last_dismissed(at: SystemTime) -> Self {
        Self { last: Some(at) }
    }
}

impl CooldownStore for MemoryCooldownStore {
    fn last_dismissed(&self) -> Result<Option<SystemTime>, StoreError> {
        Ok(self.last)
    }

    fn record_dismissed(&mut self, at: SystemTime) -> Result<(), StoreError> {
        self.last = Some(at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileCooldownStore::at_path(dir.path().join("cooldown.toml"));
        assert!(store.last_dismissed().expect("read").is_none());
    }

    #[test]
    fn record_then_read_round_trips_to_the_second() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileCooldownStore::at_path(dir.path().join("cooldown.toml"));

        let at = UNIX_EPOCH + Duration::from_secs(1_756_600_000);
        store.record_dismissed(at).expect("write");

        let read = store.last_dismissed().expect("read").expect("present");
        assert_eq!(read, at);
    }

    #[test]
    fn rewrite_replaces_previous_timestamp() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileCooldownStore::at_path(dir.path().join("cooldown.toml"));

        store
            .record_dismissed(UNIX_EPOCH + Duration::from_secs(100))
            .expect("first write");
        store
            .record_dismissed(UNIX_EPOCH + Duration::from_secs(200))
            .expect("second write");

        let read = store.last_dismissed().expect("read").expect("present");
        assert_eq!(read, UNIX_EPOCH + Duration::from_secs(200));
    }

    #[test]
    fn garbled_file_is_a_parse_error_not_a_panic() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cooldown.toml");
        fs::write(&path, "not toml at all {{{").expect("write garbage");

        let store = FileCooldownStore::at_path(path);
        assert!(matches!(store.last_dismissed(), Err(StoreError::Parse(_))));
    }
}
