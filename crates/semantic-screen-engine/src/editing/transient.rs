//! Selection, drag and screen updates. These never touch the stores.

use indexmap::IndexSet;

use crate::editing::{AppState, CursorPosition, DragContext, TransientState};
use crate::models::{MessageId, PointId, Region};

fn with_transient(state: &AppState, update: impl FnOnce(&mut TransientState)) -> Option<AppState> {
    let mut updated = TransientState::clone(&state.transient);
    update(&mut updated);
    if updated == *state.transient {
        return None;
    }
    let mut next = state.clone();
    next.replace_transient(|transient| *transient = updated);
    Some(next)
}

pub(crate) fn hover_over(state: &AppState, region: Region, index: usize) -> Option<AppState> {
    with_transient(state, |transient| {
        transient.drag = Some(DragContext { region, index })
    })
}

pub(crate) fn end_drag(state: &AppState) -> Option<AppState> {
    with_transient(state, |transient| transient.drag = None)
}

pub(crate) fn set_selected_points(state: &AppState, point_ids: &[PointId]) -> Option<AppState> {
    let selected: IndexSet<PointId> = point_ids.iter().copied().collect();
    with_transient(state, |transient| transient.selected = selected)
}

pub(crate) fn toggle_point(state: &AppState, point_id: PointId) -> Option<AppState> {
    with_transient(state, |transient| {
        if !transient.selected.shift_remove(&point_id) {
            transient.selected.insert(point_id);
        }
    })
}

pub(crate) fn set_cursor_position(state: &AppState, point_id: PointId, index: usize) -> Option<AppState> {
    if !state.points.contains(&point_id) {
        log::debug!("setCursorPosition: unknown point {point_id}");
        return None;
    }
    with_transient(state, |transient| {
        transient.cursor = Some(CursorPosition { point_id, index })
    })
}

pub(crate) fn clear_cursor_position(state: &AppState) -> Option<AppState> {
    with_transient(state, |transient| transient.cursor = None)
}

/// Switch the open message. Selection, drag and cursor belong to the old one and are dropped.
pub(crate) fn set_current_message(state: &AppState, message_id: Option<MessageId>) -> Option<AppState> {
    if state.screen.current_message == message_id {
        return None;
    }
    if let Some(id) = message_id
        && !state.drafts.contains(&id)
        && !state.messages.contains(&id)
    {
        log::debug!("setCurrentMessage: unknown message {id}");
        return None;
    }
    let mut next = state.clone();
    next.screen.current_message = message_id;
    if *next.transient != TransientState::default() {
        next.replace_transient(|transient| *transient = TransientState::default());
    }
    Some(next)
}
