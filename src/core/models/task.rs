use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier for a task. Used as the drag container id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier for a subtask, unique across the whole board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubtaskId(Uuid);

impl SubtaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubtaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubtaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subtask {
    pub id: SubtaskId,
    pub label: String,
}

impl Subtask {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: SubtaskId::new(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub created_at: String,
    pub subtasks: Vec<Subtask>,
}

impl Task {
    pub fn new(name: impl Into<String>, now: DateTime<Local>) -> Self {
        Self {
            id: TaskId::new(),
            name: name.into(),
            created_at: format_created_at(now),
            subtasks: Vec::new(),
        }
    }

    /// Rebuilds a task from its stored form, assigning fresh ids.
    /// Returns `None` for a blank name; blank subtask labels are dropped.
    pub fn from_record(record: TaskRecord) -> Option<Self> {
        if record.name.trim().is_empty() {
            return None;
        }
        Some(Self {
            id: TaskId::new(),
            name: record.name,
            created_at: record.date,
            subtasks: record
                .subtasks
                .into_iter()
                .filter(|label| !label.trim().is_empty())
                .map(Subtask::new)
                .collect(),
        })
    }

    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            name: self.name.clone(),
            date: self.created_at.clone(),
            subtasks: self.subtasks.iter().map(|s| s.label.clone()).collect(),
        }
    }

    #[cfg(test)]
    pub fn subtask_labels(&self) -> Vec<&str> {
        self.subtasks.iter().map(|s| s.label.as_str()).collect()
    }
}

/// Shape of a task inside the stored JSON array. Ids are not persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskRecord {
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub subtasks: Vec<String>,
}

// Matches the en-US locale string shown by browsers, e.g. "3/7/2025, 9:05:12 PM".
pub fn format_created_at(now: DateTime<Local>) -> String {
    now.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
