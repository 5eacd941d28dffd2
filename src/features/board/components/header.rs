use leptos::prelude::*;

use crate::features::board::hooks::TaskBoardHook;

#[component]
pub fn BoardHeader(#[prop(into)] title: String) -> impl IntoView {
    let hook = use_context::<TaskBoardHook>().expect("TaskBoardHook context");

    view! {
        <header class="board-header">
            <h1>{title}</h1>
            <div class="new-task">
                <input
                    type="text"
                    class="task-input"
                    placeholder="Add a new task"
                    prop:value=move || hook.board.with(|b| b.task_input().to_string())
                    on:input=move |ev| hook.set_task_input.run(event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            hook.submit_task.run(());
                        }
                    }
                />
                <button class="btn-primary" on:click=move |_| hook.submit_task.run(())>"Add Task"</button>
            </div>
        </header>
    }
}
