use leptos::prelude::*;

use crate::core::config::BoardConfig;
use crate::core::models::{SubtaskId, Task, TaskId};
use crate::core::services::BrowserStorage;
use crate::features::board::services::{
    hover_target, take_cancel, take_drop, DragLocation, DragResult, DragState, DropSlot, TaskBoard,
};

pub type BrowserBoard = TaskBoard<BrowserStorage>;

/// The part of the board the task list renders from. Typing into an input does
/// not change it, so the list is not rebuilt on every keystroke.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    pub tasks: Vec<Task>,
    pub active_task: Option<usize>,
}

#[derive(Clone, Copy)]
pub struct TaskBoardHook {
    pub board: ReadSignal<BrowserBoard>,
    pub view: Memo<BoardView>,
    pub drag: RwSignal<Option<DragState>>,
    pub set_task_input: Callback<String>,
    pub submit_task: Callback<()>,
    pub remove_task: Callback<TaskId>,
    pub open_subtask_input: Callback<TaskId>,
    pub set_subtask_input: Callback<String>,
    pub submit_subtask: Callback<TaskId>,
    pub remove_subtask: Callback<(TaskId, SubtaskId)>,
    pub finish_drag: Callback<DragResult>,
}

pub fn use_task_board(config: BoardConfig) -> TaskBoardHook {
    // Single read of the stored list; every later change is written back by the board.
    let board = RwSignal::new(TaskBoard::load(BrowserStorage, config));
    let drag = RwSignal::new(None::<DragState>);

    let view = Memo::new(move |_| {
        board.with(|b| BoardView {
            tasks: b.tasks().to_vec(),
            active_task: b.active_task(),
        })
    });

    let set_task_input = Callback::new(move |text: String| {
        board.update(|b| b.set_task_input(text));
    });

    let submit_task = Callback::new(move |_: ()| {
        board.update(|b| {
            b.submit_task();
        });
    });

    let remove_task = Callback::new(move |task_id: TaskId| {
        board.update(|b| {
            if let Some(index) = b.task_index(&task_id) {
                b.remove_task(index);
            }
        });
    });

    let open_subtask_input = Callback::new(move |task_id: TaskId| {
        board.update(|b| {
            if let Some(index) = b.task_index(&task_id) {
                b.open_subtask_input(index);
            }
        });
    });

    let set_subtask_input = Callback::new(move |text: String| {
        board.update(|b| b.set_subtask_input(text));
    });

    let submit_subtask = Callback::new(move |task_id: TaskId| {
        board.update(|b| {
            if let Some(index) = b.task_index(&task_id) {
                b.submit_subtask(index);
            }
        });
    });

    let remove_subtask = Callback::new(move |(task_id, subtask_id): (TaskId, SubtaskId)| {
        board.update(|b| {
            if let Some(index) = b.task_index(&task_id) {
                if let Some(sub_index) = b.subtask_index(index, &subtask_id) {
                    b.remove_subtask(index, sub_index);
                }
            }
        });
    });

    let finish_drag = Callback::new(move |result: DragResult| {
        board.update(|b| {
            b.apply_drag(&result);
        });
    });

    TaskBoardHook {
        board: board.read_only(),
        view,
        drag,
        set_task_input,
        submit_task,
        remove_task,
        open_subtask_input,
        set_subtask_input,
        submit_subtask,
        remove_subtask,
        finish_drag,
    }
}

impl TaskBoardHook {
    /// Resolves a subtask id to its drag location in the current list.
    pub fn locate(&self, task_id: TaskId, subtask_id: SubtaskId) -> Option<DragLocation> {
        self.board.with_untracked(|b| {
            let index = b.task_index(&task_id)?;
            let sub_index = b.subtask_index(index, &subtask_id)?;
            Some(DragLocation::new(task_id.to_string(), sub_index))
        })
    }

    pub fn start_drag(&self, source: DragLocation) {
        self.drag.set(Some(DragState::start(source)));
    }

    pub fn hover(&self, task_id: TaskId, slot: DropSlot) {
        let len = self.board.with_untracked(|b| {
            b.task_index(&task_id)
                .map(|index| b.tasks()[index].subtasks.len())
        });
        let Some(len) = len else { return };

        let container_id = task_id.to_string();
        let target = self
            .drag
            .with_untracked(|state| hover_target(state.as_ref(), &container_id, slot, len));
        if let Some(target) = target {
            self.drag.update(|state| {
                if let Some(state) = state {
                    state.hover = Some(target);
                }
            });
        }
    }

    pub fn drop_here(&self) {
        let mut state = self.drag.get_untracked();
        if let Some(result) = take_drop(&mut state) {
            self.drag.set(None);
            self.finish_drag.run(result);
        }
    }

    /// Fired on `dragend`. If no drop consumed the drag it was cancelled.
    pub fn end_drag(&self) {
        let mut state = self.drag.get_untracked();
        if let Some(result) = take_cancel(&mut state) {
            self.drag.set(None);
            self.finish_drag.run(result);
        }
    }

    pub fn is_dragging(&self, task_id: TaskId, index: usize) -> bool {
        self.drag.with(|state| {
            state.as_ref().is_some_and(|s| {
                s.source.container_id == task_id.to_string() && s.source.index == index
            })
        })
    }
}
