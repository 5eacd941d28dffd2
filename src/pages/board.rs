use leptos::prelude::*;

use crate::core::config::BoardConfig;
use crate::features::board::components::{BoardHeader, TaskCard};
use crate::features::board::hooks::use_task_board;

#[component]
pub fn Board(config: BoardConfig) -> impl IntoView {
    let title = config.title.clone();
    let hook = use_task_board(config);
    provide_context(hook);

    view! {
        <div class="board-page">
            <BoardHeader title=title />
            <div class="task-list">
                {move || {
                    hook.view.with(|state| {
                        if state.tasks.is_empty() {
                            view! { <p class="empty-state">"No tasks yet!"</p> }.into_any()
                        } else {
                            state
                                .tasks
                                .iter()
                                .enumerate()
                                .map(|(index, task)| {
                                    let editing = state.active_task == Some(index);
                                    view! { <TaskCard task=task.clone() editing=editing /> }
                                })
                                .collect::<Vec<_>>()
                                .into_any()
                        }
                    })
                }}
            </div>
        </div>
    }
}
