//! Transitions on draft messages.
//!
//! Drafts have no focus slot. Their main point may be *detached*: held only by
//! the main slot after `setMain` pulled it out of its shape sequence.

use std::time::SystemTime;

use crate::editing::commands::NewPoint;
use crate::editing::points::sweep_orphans;
use crate::editing::regions;
use crate::editing::{AppState, CurrentMessage, Effect, PersistenceStatus};
use crate::models::{DraftMessage, MessageId, PointContainer, PointId, Shape};

fn existing_draft<'a>(state: &'a AppState, id: &MessageId, command: &str) -> Option<&'a DraftMessage> {
    let draft = state.drafts.get(id);
    if draft.is_none() {
        log::debug!("{command}: no draft {id}");
    }
    draft
}

/// Remove the draft when it holds nothing, clearing the screen if it showed it
fn drop_if_empty(next: &mut AppState, id: &MessageId) {
    if next.drafts.get(id).is_some_and(|d| PointContainer::is_empty(d)) {
        next.drafts_mut().remove(id);
        if next.screen.current_message == Some(*id) {
            next.screen.current_message = None;
        }
        log::debug!("Removed empty draft {id}");
    }
}

pub(crate) fn draft_message_create(
    state: &AppState,
    new_message_id: MessageId,
    author: &str,
    created_at: SystemTime,
) -> Option<AppState> {
    if state.drafts.contains(&new_message_id) || state.messages.contains(&new_message_id) {
        log::debug!("draftMessageCreate: message {new_message_id} already exists");
        return None;
    }
    let mut next = state.clone();
    next.drafts_mut()
        .push_front(DraftMessage::new(new_message_id, author, created_at));
    next.screen.current_message = Some(new_message_id);
    Some(next)
}

pub(crate) fn draft_message_delete(state: &AppState, message_id: &MessageId) -> Option<AppState> {
    let held = existing_draft(state, message_id, "draftMessageDelete")?.point_ids();
    let mut next = state.clone();
    next.drafts_mut().remove(message_id);
    if next.screen.current_message == Some(*message_id) {
        next.screen.current_message = None;
    }
    sweep_orphans(&mut next, &held);
    Some(next)
}

pub(crate) fn draft_point_create(
    state: &AppState,
    new_point_id: PointId,
    point: &NewPoint,
    index: usize,
    as_main: bool,
) -> Option<AppState> {
    let draft = match state.current() {
        Some(CurrentMessage::Draft(draft)) => draft,
        Some(CurrentMessage::Published(_)) => {
            log::debug!("draftPointCreate: current message is not a draft");
            return None;
        }
        None => {
            log::warn!("draftPointCreate: no current message, dropping command");
            return None;
        }
    };
    if state.points.contains(&new_point_id) {
        log::debug!("draftPointCreate: point {new_point_id} already exists");
        return None;
    }

    let mut next = state.clone();
    let edited = next.draft_mut(&draft.id)?;
    if as_main {
        if let Some(old) = edited.main.replace(new_point_id)
            && !edited.places(&old)
            && let Some(shape) = state.points.shape_of(&old)
        {
            regions::push_back(edited, shape, old);
        }
    } else if !regions::insert_at(edited, point.shape, index, new_point_id) {
        log::debug!("draftPointCreate: index {index} out of range for {}", point.shape);
        return None;
    }
    if edited.main.is_none() {
        edited.main = Some(new_point_id);
    }

    next.points_mut()
        .insert(point.clone().into_point(new_point_id));
    Some(next)
}

pub(crate) fn draft_points_delete(
    state: &AppState,
    message_id: &MessageId,
    point_ids: &[PointId],
) -> Option<AppState> {
    let draft = existing_draft(state, message_id, "draftPointsDelete")?;
    if !point_ids.iter().any(|id| draft.holds(id)) {
        return None;
    }
    let mut next = state.clone();
    let edited = next.draft_mut(message_id)?;
    regions::remove_points(edited, point_ids);
    regions::restore_main(edited);
    drop_if_empty(&mut next, message_id);

    sweep_orphans(&mut next, point_ids);
    Some(next)
}

/// Drop the selection at the current drag target inside a draft
pub(crate) fn points_move_within_message(state: &AppState, message_id: &MessageId) -> Option<AppState> {
    let drag = state.transient.drag?;
    let shape = drag.region.shape()?;
    let draft = existing_draft(state, message_id, "pointsMoveWithinMessage")?;

    let moving: Vec<PointId> =
        regions::movable_selection(&state.selected_points(), shape, &state.points)
            .into_iter()
            .filter(|id| draft.holds(id))
            .collect();
    let detached_main = draft
        .main
        .filter(|main| moving.contains(main) && !draft.places(main));

    let mut next = state.clone();
    let edited = next.draft_mut(message_id)?;
    if !regions::move_within(edited, &moving, shape, drag.index) {
        return None;
    }
    // A detached main dropped into a shape leaves the main slot
    if detached_main.is_some() {
        edited.main = None;
        regions::restore_main(edited);
    }
    next.replace_transient(|transient| transient.drag = None);
    Some(next)
}

/// Append points to another draft, optionally cutting them from their source
pub(crate) fn points_move_to_message(
    state: &AppState,
    point_ids: &[PointId],
    new_message_id: &MessageId,
    cut_from_message_id: Option<&MessageId>,
) -> Option<AppState> {
    let destination = existing_draft(state, new_message_id, "pointsMoveToMessage")?;
    let cut_from = cut_from_message_id.filter(|id| *id != new_message_id);
    if let Some(source) = cut_from {
        existing_draft(state, source, "pointsMoveToMessage")?;
    }

    let mut appended: Vec<PointId> = Vec::new();
    let moving: Vec<(PointId, Shape)> = point_ids
        .iter()
        .filter(|id| !destination.holds(id))
        .filter_map(|id| state.points.shape_of(id).map(|shape| (*id, shape)))
        .filter(|(id, _)| {
            let fresh = !appended.contains(id);
            appended.push(*id);
            fresh
        })
        .collect();
    if moving.is_empty() && cut_from.is_none() {
        return None;
    }

    let mut next = state.clone();
    let edited = next.draft_mut(new_message_id)?;
    for (id, shape) in &moving {
        edited.shapes[*shape].push(*id);
    }
    regions::restore_main(edited);

    if let Some(source) = cut_from {
        let edited = next.draft_mut(source)?;
        regions::remove_points(edited, point_ids);
        regions::restore_main(edited);
        let was_current = next.screen.current_message == Some(*source);
        drop_if_empty(&mut next, source);
        if was_current && !next.drafts.contains(source) {
            next.screen.current_message = Some(*new_message_id);
        }
    }
    Some(next)
}

/// Pull a point out of its shape sequence into the main slot.
///
/// The main being replaced goes back to the end of its shape sequence unless
/// it is still placed there.
pub(crate) fn set_main(
    state: &AppState,
    message_id: &MessageId,
    new_main_id: PointId,
    new_main_shape: Shape,
    old_main_id: Option<PointId>,
    old_main_shape: Option<Shape>,
) -> Option<AppState> {
    let draft = existing_draft(state, message_id, "setMain")?;
    if !draft.holds(&new_main_id) {
        log::debug!("setMain: point {new_main_id} is not in draft {message_id}");
        return None;
    }
    if draft.main == Some(new_main_id) && !draft.places(&new_main_id) {
        return None;
    }
    if draft
        .shapes
        .locate(&new_main_id)
        .is_some_and(|(shape, _)| shape != new_main_shape)
    {
        log::debug!("setMain: {new_main_id} is not in {new_main_shape}, using its placement");
    }
    if old_main_id.is_some() && old_main_id != draft.main {
        log::debug!("setMain: stale old main, using the draft's own");
    }
    let old_main = draft.main.filter(|old| *old != new_main_id);
    let old_shape = old_main.and_then(|old| {
        old_main_shape
            .filter(|_| old_main_id == Some(old))
            .or_else(|| state.points.shape_of(&old))
    });

    let mut next = state.clone();
    let edited = next.draft_mut(message_id)?;
    regions::strip_from_shapes(edited, &[new_main_id]);
    if let (Some(old), Some(shape)) = (old_main, old_shape)
        && !edited.places(&old)
    {
        edited.shapes[shape].push(old);
    }
    edited.main = Some(new_main_id);
    Some(next)
}

/// Finalize a draft for the persistence collaborator
pub(crate) fn save_draft(state: &AppState, message_id: &MessageId) -> Option<Effect> {
    if state.persistence != PersistenceStatus::Ready {
        log::warn!("Tried to save draft {message_id} before persistence was loaded");
        return None;
    }
    let draft = existing_draft(state, message_id, "saveDraft")?;
    let points = draft
        .point_ids()
        .iter()
        .filter_map(|id| state.points.get(id).cloned())
        .collect();
    Some(Effect::Save {
        message: draft.to_message(),
        points,
    })
}
