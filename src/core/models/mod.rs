pub mod task;

pub use task::{format_created_at, Subtask, SubtaskId, Task, TaskId, TaskRecord};
