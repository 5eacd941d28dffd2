use std::collections::HashMap;

use crate::core::models::Task;

/// Drag payload type. Custom so text inputs never accept a dragged subtask as text.
pub const SUBTASK_DRAG_TYPE: &str = "application/x-task-board-subtask";

/// A position inside a droppable subtask list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragLocation {
    /// String form of the owning task's id.
    pub container_id: String,
    pub index: usize,
}

impl DragLocation {
    pub fn new(container_id: impl Into<String>, index: usize) -> Self {
        Self {
            container_id: container_id.into(),
            index,
        }
    }
}

/// What the drag surface reports when a drag finishes.
/// `destination` is `None` when the item was dropped outside any list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragResult {
    pub source: DragLocation,
    pub destination: Option<DragLocation>,
}

impl DragResult {
    pub fn dropped(source: DragLocation, destination: DragLocation) -> Self {
        Self {
            source,
            destination: Some(destination),
        }
    }

    pub fn cancelled(source: DragLocation) -> Self {
        Self {
            source,
            destination: None,
        }
    }
}

/// Where the pointer is while hovering over a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSlot {
    /// Over the subtask currently at this index.
    Item(usize),
    /// Over the empty tail of the list.
    End,
}

/// Picks the slot under the pointer from the top edges of the rendered items.
/// Used when the pointer sits in a gap between items rather than on one.
pub fn slot_at_pointer(item_tops: &[f64], pointer_y: f64) -> DropSlot {
    item_tops
        .iter()
        .position(|&top| pointer_y < top)
        .map(DropSlot::Item)
        .unwrap_or(DropSlot::End)
}

/// Turns a hovered slot into the final index the dragged subtask should land at.
pub fn resolve_drop(
    source: &DragLocation,
    container_id: &str,
    slot: DropSlot,
    container_len: usize,
) -> DragLocation {
    let same_container = source.container_id == container_id;
    let index = match slot {
        DropSlot::Item(index) => index,
        // The dragged item leaves its own list first, so the last slot is len - 1.
        DropSlot::End if same_container => container_len.saturating_sub(1),
        DropSlot::End => container_len,
    };
    DragLocation::new(container_id, index)
}

/// A drag in progress: where it started and the slot last hovered.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub source: DragLocation,
    pub hover: Option<DragLocation>,
}

impl DragState {
    pub fn start(source: DragLocation) -> Self {
        Self { source, hover: None }
    }
}

/// The new hover target, or `None` when nothing is being dragged or the target
/// has not moved. dragover fires continuously, so unchanged targets are skipped.
pub fn hover_target(
    state: Option<&DragState>,
    container_id: &str,
    slot: DropSlot,
    container_len: usize,
) -> Option<DragLocation> {
    let state = state?;
    let target = resolve_drop(&state.source, container_id, slot, container_len);
    (state.hover.as_ref() != Some(&target)).then_some(target)
}

/// Ends the drag on `drop`. Without a hovered target the drag counts as cancelled.
pub fn take_drop(state: &mut Option<DragState>) -> Option<DragResult> {
    let state = state.take()?;
    Some(match state.hover {
        Some(destination) => DragResult::dropped(state.source, destination),
        None => DragResult::cancelled(state.source),
    })
}

/// Ends the drag on `dragend`. A drop already consumed the state, so this yields
/// a cancelled result only for drags released outside every list.
pub fn take_cancel(state: &mut Option<DragState>) -> Option<DragResult> {
    state.take().map(|state| DragResult::cancelled(state.source))
}

/// Maps container ids to current task positions. Rebuilt from the live list
/// whenever a drag is resolved so removed tasks never resolve to stale indices.
pub fn container_lookup(tasks: &[Task]) -> HashMap<String, usize> {
    tasks
        .iter()
        .enumerate()
        .map(|(index, task)| (task.id.to_string(), index))
        .collect()
}
