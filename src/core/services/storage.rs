use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::core::error::{BoardError, Result};
use crate::core::models::{Task, TaskRecord};

/// Synchronous string key-value store the board mirrors its task list into.
pub trait PersistenceStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Fire-and-forget write. Implementations log failures instead of returning them.
    fn set(&self, key: &str, value: &str);
}

/// `window.localStorage`, looked up on every call so the handle stays `Send + Sync`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn local_storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or(BoardError::StorageUnavailable)
    }
}

impl PersistenceStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        match Self::local_storage() {
            Ok(storage) => storage.get_item(key).ok().flatten(),
            Err(e) => {
                tracing::warn!(key, error = %e, "cannot read from storage");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        let result = Self::local_storage().and_then(|storage| {
            storage
                .set_item(key, value)
                .map_err(|_| BoardError::StorageUnavailable)
        });
        if let Err(e) = result {
            tracing::warn!(key, error = %e, "failed to write to storage");
        }
    }
}

/// In-memory store. Clones share the same map, so a test can keep a handle
/// while the board owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<Mutex<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }

    /// Number of `set` calls seen so far.
    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|w| *w).unwrap_or(0)
    }
}

impl PersistenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        if let Ok(mut writes) = self.writes.lock() {
            *writes += 1;
        }
    }
}

pub fn encode_task_list(tasks: &[Task]) -> Result<String> {
    let records: Vec<TaskRecord> = tasks.iter().map(Task::to_record).collect();
    serde_json::to_string(&records).map_err(BoardError::Serialization)
}

pub fn decode_task_list(raw: &str) -> Result<Vec<Task>> {
    let records: Vec<TaskRecord> =
        serde_json::from_str(raw).map_err(BoardError::Deserialization)?;
    let stored = records.len();
    let tasks: Vec<Task> = records.into_iter().filter_map(Task::from_record).collect();
    if tasks.len() != stored {
        tracing::warn!(dropped = stored - tasks.len(), "skipped stored tasks with blank names");
    }
    Ok(tasks)
}

// Load the task list once at startup. Missing or corrupt data means an empty board.
pub fn load_tasks<S: PersistenceStore>(store: &S, key: &str) -> Vec<Task> {
    let Some(raw) = store.get(key) else {
        tracing::info!(key, "no stored tasks, starting empty");
        return Vec::new();
    };

    match decode_task_list(&raw) {
        Ok(tasks) => {
            tracing::info!(key, count = tasks.len(), "loaded tasks from storage");
            tasks
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unreadable task list");
            Vec::new()
        }
    }
}

// Save the whole task list. An encoding failure skips the write so the stored copy is not clobbered.
pub fn save_tasks<S: PersistenceStore>(store: &S, key: &str, tasks: &[Task]) {
    match encode_task_list(tasks) {
        Ok(json) => {
            store.set(key, &json);
            tracing::debug!(key, count = tasks.len(), "saved tasks");
        }
        Err(e) => tracing::error!(key, error = %e, "aborting save"),
    }
}
