use leptos::prelude::*;

use super::SubtaskList;
use crate::core::models::Task;
use crate::features::board::hooks::TaskBoardHook;

#[component]
pub fn TaskCard(task: Task, editing: bool) -> impl IntoView {
    let hook = use_context::<TaskBoardHook>().expect("TaskBoardHook context");
    let task_id = task.id;

    // Either the subtask entry field or the card's buttons, never both.
    let controls = if editing {
        view! {
            <div class="subtask-entry">
                <input
                    type="text"
                    class="subtask-input"
                    placeholder="Add a subtask"
                    prop:value=move || hook.board.with(|b| b.subtask_input().to_string())
                    on:input=move |ev| hook.set_subtask_input.run(event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            hook.submit_subtask.run(task_id);
                        }
                    }
                />
                <button class="btn-primary btn-small" on:click=move |_| hook.submit_subtask.run(task_id)>"+"</button>
            </div>
        }
        .into_any()
    } else {
        view! {
            <div class="task-actions">
                <button class="btn-primary btn-small" on:click=move |_| hook.open_subtask_input.run(task_id)>
                    "Add Subtask"
                </button>
                <button class="btn-danger btn-small" on:click=move |_| hook.remove_task.run(task_id)>
                    "Remove Task"
                </button>
            </div>
        }
        .into_any()
    };

    view! {
        <div class="task-card">
            <h2 class="task-name">{task.name}</h2>
            <p class="task-date">{task.created_at}</p>
            {controls}
            <SubtaskList task_id=task_id subtasks=task.subtasks />
        </div>
    }
}
