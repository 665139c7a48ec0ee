use crate::models::Status;
use crate::traits::StatusStore;
use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

const STATUS_KEY_PREFIX: &str = "status-";

fn status_key(sequence_number: u32) -> String {
    format!("{STATUS_KEY_PREFIX}{sequence_number}")
}

/// Looks up the status for a visit. Absent or unreadable entries read as
/// `Upcoming`.
pub fn status_of(store: &impl StatusStore, sequence_number: u32) -> Status {
    store
        .get(&status_key(sequence_number))
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

pub fn set_status(store: &mut impl StatusStore, sequence_number: u32, status: Status) {
    store.set(&status_key(sequence_number), &status.to_string());
}

/// Removes every persisted status entry, leaving unrelated keys alone.
pub fn clear_all_statuses(store: &mut impl StatusStore) {
    for key in store.keys() {
        if key.starts_with(STATUS_KEY_PREFIX) {
            store.remove(&key);
        }
    }
}

/// In-memory store, used by tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryStatusStore {
    entries: HashMap<String, String>,
}

impl MemoryStatusStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusStore for MemoryStatusStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// Store backed by a JSON object in a file. A missing file loads as an empty
/// store; writes only reach disk on `persist`.
#[derive(Debug)]
pub struct FileStatusStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStatusStore {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(FileStatusStore { path, entries })
    }

    pub fn persist(&self) -> Result<()> {
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

impl StatusStore for FileStatusStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
