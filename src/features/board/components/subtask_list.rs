use leptos::ev::DragEvent;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::core::models::{Subtask, TaskId};
use crate::features::board::hooks::TaskBoardHook;
use crate::features::board::services::{slot_at_pointer, DropSlot, SUBTASK_DRAG_TYPE};

/// Slot for a dragover that reached the list itself: the tail, or a gap between items.
fn list_slot(ev: &DragEvent) -> DropSlot {
    let Some(list) = ev
        .current_target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
    else {
        return DropSlot::End;
    };

    let children = list.children();
    let item_tops: Vec<f64> = (0..children.length())
        .filter_map(|i| children.item(i))
        .filter(|child| child.matches(".subtask-item").unwrap_or(false))
        .map(|item| item.get_bounding_client_rect().top())
        .collect();
    slot_at_pointer(&item_tops, f64::from(ev.client_y()))
}

/// Droppable list of one task's subtasks.
#[component]
pub fn SubtaskList(task_id: TaskId, subtasks: Vec<Subtask>) -> impl IntoView {
    let hook = use_context::<TaskBoardHook>().expect("TaskBoardHook context");

    let items = if subtasks.is_empty() {
        view! { <p class="empty-state">"No subtasks yet!"</p> }.into_any()
    } else {
        subtasks
            .into_iter()
            .map(|subtask| view! { <SubtaskItem task_id=task_id subtask=subtask /> })
            .collect::<Vec<_>>()
            .into_any()
    };

    view! {
        <div
            class="subtask-list"
            data-container-id=task_id.to_string()
            on:dragover=move |ev: DragEvent| {
                ev.prevent_default();
                hook.hover(task_id, list_slot(&ev));
            }
            on:drop=move |ev: DragEvent| {
                ev.prevent_default();
                hook.drop_here();
            }
        >
            {items}
        </div>
    }
}

#[component]
fn SubtaskItem(task_id: TaskId, subtask: Subtask) -> impl IntoView {
    let hook = use_context::<TaskBoardHook>().expect("TaskBoardHook context");
    let subtask_id = subtask.id;
    let current_index = move || hook.locate(task_id, subtask_id).map(|location| location.index);

    view! {
        <div
            class="subtask-item"
            draggable="true"
            class:dragging=move || current_index().is_some_and(|index| hook.is_dragging(task_id, index))
            on:dragstart=move |ev: DragEvent| {
                // Firefox only starts a drag once some data is set.
                if let Some(transfer) = ev.data_transfer() {
                    if let Err(e) = transfer.set_data(SUBTASK_DRAG_TYPE, &subtask_id.to_string()) {
                        tracing::debug!(error = ?e, "could not set drag payload");
                    }
                    transfer.set_effect_allowed("move");
                }
                if let Some(source) = hook.locate(task_id, subtask_id) {
                    hook.start_drag(source);
                }
            }
            on:dragover=move |ev: DragEvent| {
                ev.prevent_default();
                ev.stop_propagation();
                if let Some(index) = current_index() {
                    hook.hover(task_id, DropSlot::Item(index));
                }
            }
            on:dragend=move |_| hook.end_drag()
        >
            <span class="subtask-label">"- " {subtask.label}</span>
            <button
                class="btn-danger btn-small"
                on:click=move |_| hook.remove_subtask.run((task_id, subtask_id))
            >
                "Remove"
            </button>
        </div>
    }
}
