//! Transitions on published messages.
//!
//! Every handler takes the prior snapshot and returns `Some(next)` on a
//! committed change, or `None` when the command is rejected and the snapshot
//! stays as it was.

use std::sync::Arc;

use crate::editing::commands::NewPoint;
use crate::editing::points::sweep_orphans;
use crate::editing::regions;
use crate::editing::{AppState, CurrentMessage, PersistenceStatus};
use crate::models::{Message, MessageStore, Point, PointContainer, PointId};

/// The current message, if it is a published one
fn current_published(state: &AppState, command: &str) -> Option<Message> {
    match state.current() {
        Some(CurrentMessage::Published(message)) => Some(message.clone()),
        Some(CurrentMessage::Draft(_)) => {
            log::debug!("{command}: current message is a draft, ignoring");
            None
        }
        None => {
            log::warn!("{command}: no current message, dropping command");
            None
        }
    }
}

pub(crate) fn point_create(
    state: &AppState,
    new_point_id: PointId,
    point: &NewPoint,
    index: usize,
    as_focus: bool,
) -> Option<AppState> {
    let message = current_published(state, "pointCreate")?;
    if state.points.contains(&new_point_id) {
        log::debug!("pointCreate: point {new_point_id} already exists");
        return None;
    }
    let mut next = state.clone();
    let edited = next.message_mut(&message.id)?;

    if as_focus {
        let old_focus = edited.focus.replace(new_point_id);
        if let Some(old) = old_focus
            && let Some(shape) = state.points.shape_of(&old)
        {
            regions::push_back(edited, shape, old);
        }
    } else if !regions::insert_at(edited, point.shape, index, new_point_id) {
        log::debug!("pointCreate: index {index} out of range for {}", point.shape);
        return None;
    }
    if edited.main.is_none() {
        edited.main = Some(new_point_id);
    }

    next.points_mut()
        .insert(point.clone().into_point(new_point_id));
    Some(next)
}

/// Drop the selection at the current drag target
pub(crate) fn points_move(state: &AppState) -> Option<AppState> {
    let drag = state.transient.drag?;
    let shape = drag.region.shape()?;
    let message = current_published(state, "pointsMove")?;

    let moving = regions::movable_selection(&state.selected_points(), shape, &state.points);
    let moving: Vec<PointId> = moving.into_iter().filter(|id| message.places(id)).collect();

    let mut next = state.clone();
    if !regions::move_within(next.message_mut(&message.id)?, &moving, shape, drag.index) {
        return None;
    }
    next.replace_transient(|transient| transient.drag = None);
    Some(next)
}

pub(crate) fn points_delete(state: &AppState, point_ids: &[PointId]) -> Option<AppState> {
    let message = current_published(state, "pointsDelete")?;
    if !point_ids.iter().any(|id| message.holds(id)) {
        return None;
    }
    let mut next = state.clone();
    let edited = next.message_mut(&message.id)?;
    regions::remove_points(edited, point_ids);
    regions::restore_main(edited);

    sweep_orphans(&mut next, point_ids);
    Some(next)
}

/// Promote the first selected point into the focus slot
pub(crate) fn set_focus(state: &AppState) -> Option<AppState> {
    let new_focus = *state.transient.selected.first()?;
    let message = current_published(state, "setFocus")?;
    if message.focus == Some(new_focus) || !message.shapes.contains(&new_focus) {
        return None;
    }

    let mut next = state.clone();
    let edited = next.message_mut(&message.id)?;
    regions::strip_from_shapes(edited, &[new_focus]);
    if let Some(old) = edited.focus.replace(new_focus)
        && let Some(shape) = state.points.shape_of(&old)
    {
        regions::push_back(edited, shape, old);
    }
    Some(next)
}

/// Designate a point already placed in the message as its main point
pub(crate) fn set_main_point(state: &AppState, point_id: PointId) -> Option<AppState> {
    let message = current_published(state, "setMainPoint")?;
    if message.main == Some(point_id) || !message.places(&point_id) {
        return None;
    }
    let mut next = state.clone();
    next.message_mut(&message.id)?.main = Some(point_id);
    Some(next)
}

/// Install what the persistence collaborator loaded
pub(crate) fn load_complete(state: &AppState, points: &[Point], messages: &[Message]) -> AppState {
    let mut next = state.clone();
    let store = next.points_mut();
    for point in points {
        store.insert(point.clone());
    }
    let loaded: MessageStore<Message> = messages
        .iter()
        .cloned()
        .map(|mut message| {
            if regions::normalize(&mut message, &next.points) {
                log::warn!("Repaired placements of stored message {}", message.id);
            }
            message
        })
        .collect();
    next.messages = Arc::new(loaded);
    next.persistence = PersistenceStatus::Ready;
    if next.screen.current_message.is_none() {
        next.screen.current_message = messages.first().map(|m| m.id);
    }
    log::info!(
        "Loaded {} messages and {} points",
        messages.len(),
        points.len()
    );
    next
}
