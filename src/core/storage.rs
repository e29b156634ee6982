//! Synchronous local key-value storage
//!
//! The progress record and the exam book each persist as a single JSON blob
//! under a fixed key. The store itself holds opaque strings; (de)serialization
//! and corrupt-record policy live in [`load_record`] / [`save_record`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Storage failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying filesystem failure
    #[error("store I/O failure: {0}")]
    Io(#[from] io::Error),

    /// A record could not be serialized
    #[error("could not encode record: {0}")]
    Encode(#[from] serde_json::Error),

    /// A stored blob could not be parsed and the policy rejects recovery
    #[error("corrupt record under key '{key}': {reason}")]
    Corrupt {
        /// Store key holding the bad blob
        key: String,
        /// Parser message
        reason: String,
    },
}

/// What to do when a stored blob fails to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptPolicy {
    /// Recover quietly with a default record
    #[default]
    UseDefaults,
    /// Surface [`StoreError::Corrupt`] to the caller
    Reject,
}

impl FromStr for CorruptPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "use-defaults" | "use_defaults" | "defaults" => Ok(Self::UseDefaults),
            "reject" | "fail" => Ok(Self::Reject),
            _ => Err(format!(
                "unknown corrupt policy '{s}' (expected 'use-defaults' or 'reject')"
            )),
        }
    }
}

impl fmt::Display for CorruptPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::UseDefaults => "use-defaults",
            Self::Reject => "reject",
        };
        write!(f, "{s}")
    }
}

/// How a record load went
///
/// Lets callers (and tests) tell a first run from a normal load from a
/// corrupt-blob recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored under the key
    Fresh,
    /// A valid blob was loaded
    Loaded,
    /// A corrupt blob was replaced by defaults
    Recovered,
}

/// Synchronous string key-value store
pub trait LocalStore {
    /// Read the value under `key`, `None` when absent
    ///
    /// # Errors
    /// Returns an error when the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value
    ///
    /// # Errors
    /// Returns an error when the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the value under `key`; absent keys are not an error
    ///
    /// # Errors
    /// Returns an error when the backing storage cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Load a JSON record from the store
///
/// Missing keys yield `T::default()` with [`LoadOutcome::Fresh`]. Unparseable
/// blobs follow `policy`: recover with defaults ([`LoadOutcome::Recovered`])
/// or surface [`StoreError::Corrupt`].
///
/// # Errors
/// Returns an error on store I/O failure, or on a corrupt blob under
/// [`CorruptPolicy::Reject`].
pub fn load_record<T, S>(
    store: &S,
    key: &str,
    policy: CorruptPolicy,
) -> Result<(T, LoadOutcome), StoreError>
where
    T: DeserializeOwned + Default,
    S: LocalStore + ?Sized,
{
    match store.get(key)? {
        None => Ok((T::default(), LoadOutcome::Fresh)),
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => Ok((value, LoadOutcome::Loaded)),
            Err(err) => match policy {
                CorruptPolicy::UseDefaults => Ok((T::default(), LoadOutcome::Recovered)),
                CorruptPolicy::Reject => Err(StoreError::Corrupt {
                    key: key.to_string(),
                    reason: err.to_string(),
                }),
            },
        },
    }
}

/// Serialize a record to JSON and write it under `key`
///
/// # Errors
/// Returns an error when encoding fails or the store cannot be written.
pub fn save_record<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize,
    S: LocalStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// File-backed store: one file per key under a root directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`; the directory is created on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a key to its backing file
    ///
    /// Keys are sanitized to a conservative character set so arbitrary key
    /// strings stay inside the root directory.
    fn path_for(&self, key: &str) -> PathBuf {
        let sanitized: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{sanitized}.json"))
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Io(err)),
        }
    }
}

/// In-memory store for tests and dry runs
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Probe {
        value: u32,
    }

    #[test]
    fn test_memory_get_after_set() {
        let mut store = MemoryStore::new();

        store.set("k", "v").expect("set");
        assert_eq!(store.get("k").expect("get"), Some("v".to_string()));
    }

    #[test]
    fn test_memory_remove_absent_is_ok() {
        let mut store = MemoryStore::new();

        store.remove("missing").expect("remove");
        assert_eq!(store.get("missing").expect("get"), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let mut store = FileStore::new(dir.path());

        store.set("asteca_user_progress", "{\"points\":10}").expect("set");
        assert_eq!(
            store.get("asteca_user_progress").expect("get"),
            Some("{\"points\":10}".to_string())
        );

        store.remove("asteca_user_progress").expect("remove");
        assert_eq!(store.get("asteca_user_progress").expect("get"), None);
    }

    #[test]
    fn test_file_store_missing_key_reads_none() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("never_written").expect("get"), None);
    }

    #[test]
    fn test_file_store_sanitizes_keys() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let mut store = FileStore::new(dir.path());

        store.set("../escape/attempt", "x").expect("set");
        assert_eq!(
            store.get("../escape/attempt").expect("get"),
            Some("x".to_string())
        );
        // The backing file stays inside the root
        assert!(dir.path().join("___escape_attempt.json").exists());
    }

    #[test]
    fn test_load_record_fresh() {
        let store = MemoryStore::new();

        let (record, outcome) =
            load_record::<Probe, _>(&store, "k", CorruptPolicy::UseDefaults).expect("load");
        assert_eq!(record, Probe::default());
        assert_eq!(outcome, LoadOutcome::Fresh);
    }

    #[test]
    fn test_load_record_valid_blob() {
        let mut store = MemoryStore::new();
        store.set("k", "{\"value\":7}").expect("set");

        let (record, outcome) =
            load_record::<Probe, _>(&store, "k", CorruptPolicy::Reject).expect("load");
        assert_eq!(record.value, 7);
        assert_eq!(outcome, LoadOutcome::Loaded);
    }

    #[test]
    fn test_load_record_corrupt_recovers_with_defaults() {
        let mut store = MemoryStore::new();
        store.set("k", "{invalid json!").expect("set");

        let (record, outcome) =
            load_record::<Probe, _>(&store, "k", CorruptPolicy::UseDefaults).expect("load");
        assert_eq!(record, Probe::default());
        assert_eq!(outcome, LoadOutcome::Recovered);
    }

    #[test]
    fn test_load_record_corrupt_rejected() {
        let mut store = MemoryStore::new();
        store.set("k", "not json at all").expect("set");

        let err = load_record::<Probe, _>(&store, "k", CorruptPolicy::Reject)
            .expect_err("should reject");
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_corrupt_policy_parsing() {
        assert_eq!(
            "use-defaults".parse::<CorruptPolicy>().expect("parse"),
            CorruptPolicy::UseDefaults
        );
        assert_eq!(
            "REJECT".parse::<CorruptPolicy>().expect("parse"),
            CorruptPolicy::Reject
        );
        assert!("lenient".parse::<CorruptPolicy>().is_err());
    }
}
