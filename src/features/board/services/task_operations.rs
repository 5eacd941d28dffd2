use chrono::{DateTime, Local};

use super::drag::{container_lookup, DragResult};
use crate::core::config::BoardConfig;
use crate::core::models::{Subtask, SubtaskId, Task, TaskId};
use crate::core::services::{load_tasks, save_tasks, PersistenceStore};

/// Owns the task list, the transient input state and the store it mirrors into.
///
/// Every mutating method returns `true` only when it committed a change, in which
/// case the full list has been written back to the store. Invalid indices and blank
/// text are ignored without touching state or storage.
#[derive(Debug)]
pub struct TaskBoard<S: PersistenceStore> {
    store: S,
    config: BoardConfig,
    tasks: Vec<Task>,
    task_input: String,
    subtask_input: String,
    active_task: Option<usize>,
}

impl<S: PersistenceStore> TaskBoard<S> {
    /// Reads the stored list once. This is the only read the board ever does.
    pub fn load(store: S, config: BoardConfig) -> Self {
        let tasks = load_tasks(&store, &config.storage_key);
        Self {
            store,
            config,
            tasks,
            task_input: String::new(),
            subtask_input: String::new(),
            active_task: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[cfg(test)]
    pub fn records(&self) -> Vec<crate::core::models::TaskRecord> {
        self.tasks.iter().map(Task::to_record).collect()
    }

    pub fn task_input(&self) -> &str {
        &self.task_input
    }

    pub fn subtask_input(&self) -> &str {
        &self.subtask_input
    }

    pub fn active_task(&self) -> Option<usize> {
        self.active_task
    }

    pub fn is_editing(&self, index: usize) -> bool {
        self.active_task == Some(index)
    }

    pub fn task_index(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    pub fn subtask_index(&self, task_index: usize, id: &SubtaskId) -> Option<usize> {
        self.tasks
            .get(task_index)?
            .subtasks
            .iter()
            .position(|s| &s.id == id)
    }

    pub fn set_task_input(&mut self, text: impl Into<String>) {
        self.task_input = text.into();
    }

    pub fn set_subtask_input(&mut self, text: impl Into<String>) {
        self.subtask_input = text.into();
    }

    pub fn add_task(&mut self, text: &str) -> bool {
        self.add_task_at(text, Local::now())
    }

    pub fn add_task_at(&mut self, text: &str, now: DateTime<Local>) -> bool {
        let name = text.trim();
        if name.is_empty() {
            return false;
        }

        self.tasks.push(Task::new(name, now));
        self.task_input.clear();
        self.commit("add_task");
        true
    }

    /// Adds a task from the current new-task input.
    pub fn submit_task(&mut self) -> bool {
        let text = self.task_input.clone();
        self.add_task(&text)
    }

    pub fn remove_task(&mut self, index: usize) -> bool {
        if index >= self.tasks.len() {
            return false;
        }

        self.tasks.remove(index);
        // Indices after the removed task shift, so any open editor is closed.
        self.active_task = None;
        self.commit("remove_task");
        true
    }

    pub fn open_subtask_input(&mut self, index: usize) -> bool {
        if index >= self.tasks.len() {
            return false;
        }
        self.active_task = Some(index);
        true
    }

    pub fn add_subtask(&mut self, index: usize, text: &str) -> bool {
        if self.active_task != Some(index) {
            return false;
        }
        let label = text.trim();
        if label.is_empty() {
            return false;
        }
        let Some(task) = self.tasks.get_mut(index) else {
            return false;
        };

        task.subtasks.push(Subtask::new(label));
        self.subtask_input.clear();
        self.active_task = None;
        self.commit("add_subtask");
        true
    }

    /// Adds a subtask from the current subtask input.
    pub fn submit_subtask(&mut self, index: usize) -> bool {
        let text = self.subtask_input.clone();
        self.add_subtask(index, &text)
    }

    pub fn remove_subtask(&mut self, task_index: usize, sub_index: usize) -> bool {
        let Some(task) = self.tasks.get_mut(task_index) else {
            return false;
        };
        if sub_index >= task.subtasks.len() {
            return false;
        }

        task.subtasks.remove(sub_index);
        self.commit("remove_subtask");
        true
    }

    /// Moves a subtask to a new position inside the same task.
    pub fn reorder_subtask(
        &mut self,
        task_index: usize,
        source_index: usize,
        destination_index: usize,
    ) -> bool {
        let Some(task) = self.tasks.get_mut(task_index) else {
            return false;
        };
        let len = task.subtasks.len();
        if source_index >= len || destination_index >= len || source_index == destination_index {
            return false;
        }

        let moved = task.subtasks.remove(source_index);
        task.subtasks.insert(destination_index, moved);
        self.commit("reorder_subtask");
        true
    }

    /// Moves a subtask out of one task into another. `destination_index` may equal
    /// the destination's length to append.
    pub fn move_subtask(
        &mut self,
        from_task: usize,
        source_index: usize,
        to_task: usize,
        destination_index: usize,
    ) -> bool {
        if from_task == to_task {
            return self.reorder_subtask(from_task, source_index, destination_index);
        }
        let (Some(from), Some(to)) = (self.tasks.get(from_task), self.tasks.get(to_task)) else {
            return false;
        };
        if source_index >= from.subtasks.len() || destination_index > to.subtasks.len() {
            return false;
        }

        let moved = self.tasks[from_task].subtasks.remove(source_index);
        self.tasks[to_task].subtasks.insert(destination_index, moved);
        self.commit("move_subtask");
        true
    }

    /// Applies a finished drag gesture. Cancelled drags leave the order untouched.
    pub fn apply_drag(&mut self, result: &DragResult) -> bool {
        let Some(destination) = &result.destination else {
            tracing::debug!(source = ?result.source, "drag cancelled");
            return false;
        };

        let lookup = container_lookup(&self.tasks);
        let (Some(&from), Some(&to)) = (
            lookup.get(&result.source.container_id),
            lookup.get(&destination.container_id),
        ) else {
            tracing::debug!(?result, "drag refers to an unknown list");
            return false;
        };

        if from == to {
            self.reorder_subtask(from, result.source.index, destination.index)
        } else if self.config.allow_cross_task_moves {
            self.move_subtask(from, result.source.index, to, destination.index)
        } else {
            tracing::debug!(from, to, "cross-task drag rejected");
            false
        }
    }

    fn commit(&self, action: &str) {
        tracing::debug!(action, tasks = self.tasks.len(), "committing board change");
        save_tasks(&self.store, &self.config.storage_key, &self.tasks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CONFIG_KEY;
    use crate::core::services::{encode_task_list, MemoryStore};
    use crate::features::board::services::drag::DragLocation;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 2, 10, 0, 0).unwrap()
    }

    fn board() -> (TaskBoard<MemoryStore>, MemoryStore) {
        let store = MemoryStore::new();
        (TaskBoard::load(store.clone(), BoardConfig::default()), store)
    }

    fn board_with(names: &[&str]) -> (TaskBoard<MemoryStore>, MemoryStore) {
        let (mut board, store) = board();
        for name in names {
            assert!(board.add_task_at(name, fixed_time()));
        }
        (board, store)
    }

    fn with_subtasks(board: &mut TaskBoard<MemoryStore>, index: usize, labels: &[&str]) {
        for label in labels {
            board.open_subtask_input(index);
            assert!(board.add_subtask(index, label));
        }
    }

    fn names(board: &TaskBoard<MemoryStore>) -> Vec<String> {
        board.tasks().iter().map(|t| t.name.clone()).collect()
    }

    fn labels(board: &TaskBoard<MemoryStore>, index: usize) -> Vec<&str> {
        board.tasks()[index].subtask_labels()
    }

    fn container(board: &TaskBoard<MemoryStore>, index: usize) -> String {
        board.tasks()[index].id.to_string()
    }

    #[test]
    fn add_then_remove_last_restores_list() {
        let (mut board, _) = board_with(&["A", "B"]);
        let before = board.records();

        assert!(board.add_task_at("C", fixed_time()));
        assert!(board.remove_task(board.tasks().len() - 1));
        assert_eq!(board.records(), before);
    }

    #[test]
    fn add_task_trims_and_stamps() {
        let (mut board, store) = board();
        board.set_task_input("  Groceries  ");
        assert!(board.submit_task());

        let task = &board.tasks()[0];
        assert_eq!(task.name, "Groceries");
        assert!(!task.created_at.is_empty());
        assert!(task.subtasks.is_empty());
        assert_eq!(board.task_input(), "");
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn add_task_at_uses_given_timestamp() {
        let (board, _) = board_with(&["A"]);
        assert_eq!(board.tasks()[0].created_at, "1/2/2025, 10:00:00 AM");
    }

    #[test]
    fn blank_text_is_ignored_without_writing() {
        let (mut board, store) = board_with(&["A"]);
        let writes = store.write_count();
        let before = board.records();

        board.set_task_input("   ");
        assert!(!board.add_task(""));
        assert!(!board.add_task("   "));
        assert!(!board.submit_task());
        assert_eq!(board.task_input(), "   ");

        board.open_subtask_input(0);
        assert!(!board.add_subtask(0, ""));
        assert!(!board.add_subtask(0, " \t "));

        assert_eq!(board.records(), before);
        assert_eq!(store.write_count(), writes);
        assert_eq!(board.active_task(), Some(0));
    }

    #[test]
    fn removing_shifts_later_tasks_down() {
        let (mut board, _) = board_with(&["A", "B", "C"]);
        assert!(board.remove_task(1));
        assert_eq!(names(&board), vec!["A", "C"]);
        assert!(board.remove_task(1));
        assert_eq!(names(&board), vec!["A"]);
    }

    #[test]
    fn out_of_range_indices_are_ignored() {
        let (mut board, store) = board_with(&["A"]);
        with_subtasks(&mut board, 0, &["X"]);
        let writes = store.write_count();

        assert!(!board.remove_task(1));
        assert!(!board.remove_subtask(1, 0));
        assert!(!board.remove_subtask(0, 1));
        assert!(!board.reorder_subtask(0, 0, 1));
        assert!(!board.reorder_subtask(3, 0, 0));
        assert!(!board.open_subtask_input(5));
        assert_eq!(store.write_count(), writes);
        assert_eq!(labels(&board, 0), vec!["X"]);
    }

    #[test]
    fn add_subtask_requires_open_input_and_collapses_it() {
        let (mut board, _) = board_with(&["A", "B"]);
        assert!(!board.add_subtask(0, "X"));

        board.open_subtask_input(0);
        board.set_subtask_input("X");
        assert!(!board.submit_subtask(1));
        assert!(board.submit_subtask(0));

        assert_eq!(labels(&board, 0), vec!["X"]);
        assert_eq!(board.subtask_input(), "");
        assert_eq!(board.active_task(), None);
    }

    #[test]
    fn only_one_editor_is_open() {
        let (mut board, _) = board_with(&["A", "B", "C"]);
        board.open_subtask_input(1);
        board.open_subtask_input(2);
        assert_eq!(board.active_task(), Some(2));
        assert!(!board.is_editing(1));
        assert!(board.is_editing(2));
    }

    #[test]
    fn removing_any_task_closes_the_editor() {
        let (mut board, _) = board_with(&["A", "B", "C"]);
        board.open_subtask_input(0);
        assert!(board.remove_task(2));
        assert_eq!(board.active_task(), None);
    }

    #[test]
    fn remove_subtask_shifts_later_subtasks() {
        let (mut board, _) = board_with(&["T"]);
        with_subtasks(&mut board, 0, &["X", "Y", "Z"]);
        assert!(board.remove_subtask(0, 0));
        assert_eq!(labels(&board, 0), vec!["Y", "Z"]);
    }

    #[test]
    fn reorder_moves_first_to_last() {
        let (mut board, store) = board_with(&["T"]);
        with_subtasks(&mut board, 0, &["X", "Y", "Z"]);
        let writes = store.write_count();

        assert!(board.reorder_subtask(0, 0, 2));
        assert_eq!(labels(&board, 0), vec!["Y", "Z", "X"]);
        assert_eq!(store.write_count(), writes + 1);
    }

    #[test]
    fn drag_within_task_reorders() {
        let (mut board, _) = board_with(&["T"]);
        with_subtasks(&mut board, 0, &["X", "Y", "Z"]);
        let id = container(&board, 0);

        let result = DragResult::dropped(DragLocation::new(id.clone(), 2), DragLocation::new(id, 0));
        assert!(board.apply_drag(&result));
        assert_eq!(labels(&board, 0), vec!["Z", "X", "Y"]);
    }

    #[test]
    fn cancelled_drag_keeps_order() {
        let (mut board, store) = board_with(&["T"]);
        with_subtasks(&mut board, 0, &["X", "Y", "Z"]);
        let writes = store.write_count();

        let result = DragResult::cancelled(DragLocation::new(container(&board, 0), 0));
        assert!(!board.apply_drag(&result));
        assert_eq!(labels(&board, 0), vec!["X", "Y", "Z"]);
        assert_eq!(store.write_count(), writes);
    }

    #[test]
    fn cross_task_drag_is_rejected_by_default() {
        let (mut board, _) = board_with(&["A", "B"]);
        with_subtasks(&mut board, 0, &["X"]);
        let result = DragResult::dropped(
            DragLocation::new(container(&board, 0), 0),
            DragLocation::new(container(&board, 1), 0),
        );

        assert!(!board.apply_drag(&result));
        assert_eq!(labels(&board, 0), vec!["X"]);
        assert!(labels(&board, 1).is_empty());
    }

    #[test]
    fn cross_task_drag_moves_when_enabled() {
        let store = MemoryStore::new();
        let config = BoardConfig {
            allow_cross_task_moves: true,
            ..BoardConfig::default()
        };
        let mut board = TaskBoard::load(store, config);
        board.add_task_at("A", fixed_time());
        board.add_task_at("B", fixed_time());
        with_subtasks(&mut board, 0, &["X", "Y"]);
        with_subtasks(&mut board, 1, &["Z"]);

        let result = DragResult::dropped(
            DragLocation::new(container(&board, 0), 0),
            DragLocation::new(container(&board, 1), 1),
        );
        assert!(board.apply_drag(&result));
        assert_eq!(labels(&board, 0), vec!["Y"]);
        assert_eq!(labels(&board, 1), vec!["Z", "X"]);
    }

    #[test]
    fn drag_from_removed_task_is_ignored() {
        let (mut board, _) = board_with(&["A", "B"]);
        with_subtasks(&mut board, 0, &["X", "Y"]);
        let stale = container(&board, 0);
        board.remove_task(0);

        let result = DragResult::dropped(DragLocation::new(stale.clone(), 0), DragLocation::new(stale, 1));
        assert!(!board.apply_drag(&result));
        assert_eq!(names(&board), vec!["B"]);
    }

    #[test]
    fn ids_resolve_to_current_positions() {
        let (mut board, _) = board_with(&["A", "B"]);
        with_subtasks(&mut board, 1, &["X", "Y"]);
        let b = board.tasks()[1].id;
        let y = board.tasks()[1].subtasks[1].id;

        board.remove_task(0);
        assert_eq!(board.task_index(&b), Some(0));
        assert_eq!(board.subtask_index(0, &y), Some(1));
        assert_eq!(board.subtask_index(3, &y), None);
    }

    #[test]
    fn load_reads_stored_list_once() {
        let tasks = {
            let (mut board, _) = board_with(&["Groceries"]);
            with_subtasks(&mut board, 0, &["Milk", "Eggs"]);
            board.tasks().to_vec()
        };
        let store = MemoryStore::with_entry("tasks", &encode_task_list(&tasks).unwrap());

        let board = TaskBoard::load(store.clone(), BoardConfig::default());
        assert_eq!(names(&board), vec!["Groceries"]);
        assert_eq!(labels(&board, 0), vec!["Milk", "Eggs"]);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn corrupt_storage_starts_empty() {
        let store = MemoryStore::with_entry("tasks", "not json");
        let board = TaskBoard::load(store, BoardConfig::default());
        assert!(board.tasks().is_empty());
    }

    #[test]
    fn every_commit_rewrites_the_full_list() {
        let (mut board, store) = board_with(&["A"]);
        with_subtasks(&mut board, 0, &["X", "Y"]);
        board.reorder_subtask(0, 1, 0);

        let reloaded = TaskBoard::load(store.clone(), BoardConfig::default());
        assert_eq!(reloaded.records(), board.records());
        assert!(store.get(CONFIG_KEY).is_none());
    }

    #[test]
    fn custom_storage_key_is_honoured() {
        let store = MemoryStore::new();
        let config = BoardConfig {
            storage_key: "work".to_string(),
            ..BoardConfig::default()
        };
        let mut board = TaskBoard::load(store.clone(), config);
        board.add_task_at("A", fixed_time());

        assert!(store.get("work").is_some());
        assert!(store.get("tasks").is_none());
    }
}
