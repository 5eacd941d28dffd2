use serde::{Deserialize, Serialize};

use crate::core::services::PersistenceStore;

/// Storage key holding an optional JSON config document.
pub const CONFIG_KEY: &str = "task-board.config";

pub const DEFAULT_STORAGE_KEY: &str = "tasks";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    /// Key the task list is stored under.
    pub storage_key: String,
    /// Lets a subtask be dragged into another task's list.
    pub allow_cross_task_moves: bool,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `"info"` or `"task_board=debug"`.
    pub log_filter: String,
    pub title: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            allow_cross_task_moves: false,
            log_filter: "info".to_string(),
            title: "Todo List !".to_string(),
        }
    }
}

impl BoardConfig {
    pub fn load<S: PersistenceStore>(store: &S) -> Self {
        match store.get(CONFIG_KEY) {
            Some(raw) => Self::parse(&raw),
            None => Self::default(),
        }
    }

    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring invalid board config");
                Self::default()
            }
        }
    }
}
