//! Point Store edits that accompany structural changes.

use std::time::SystemTime;

use crate::editing::regions;
use crate::editing::{AppState, CursorPosition};
use crate::models::{Point, PointContainer, PointId, PointStore, Shape};

/// A split needs a non-zero offset inside an owned (non-reference) point
pub(crate) fn can_split(points: &PointStore, point_id: &PointId, offset: usize) -> bool {
    points.get(point_id).is_some_and(|point| {
        offset > 0 && !point.is_reference() && point.split_content(offset).is_some()
    })
}

/// Truncate the original to its prefix and store the suffix under `new_id`
pub(crate) fn split_records(
    points: &mut PointStore,
    point_id: &PointId,
    offset: usize,
    new_id: PointId,
    created_at: SystemTime,
) {
    let Some(original) = points.get_mut(point_id) else {
        return;
    };
    let Some((prefix, suffix)) = original.split_content(offset) else {
        return;
    };
    let (prefix, suffix) = (prefix.to_string(), suffix.to_string());
    let new_point = Point {
        id: new_id,
        author: original.author.clone(),
        content: suffix,
        shape: original.shape,
        created_at,
        reference: None,
    };
    original.content = prefix;
    points.insert(new_point);
}

/// Merge the deleted point's content into the kept one.
///
/// `delete_follows` says whether the deleted point came after the kept one in
/// the sequence. Returns the character offset of the join, where the caret goes.
pub(crate) fn merge_records(
    points: &mut PointStore,
    keep: &PointId,
    delete: &PointId,
    delete_follows: bool,
) -> usize {
    let deleted = points
        .get(delete)
        .map(|p| p.content.clone())
        .unwrap_or_default();
    let Some(kept) = points.get_mut(keep) else {
        return 0;
    };
    if delete_follows {
        let join = kept.content.chars().count();
        kept.content.push_str(&deleted);
        join
    } else {
        kept.content.insert_str(0, &deleted);
        deleted.chars().count()
    }
}

/// Remove records that no message or draft holds anymore
pub(crate) fn sweep_orphans(state: &mut AppState, candidates: &[PointId]) {
    let orphans: Vec<PointId> = candidates
        .iter()
        .filter(|id| state.points.contains(id) && !state.is_point_held(id))
        .copied()
        .collect();
    if orphans.is_empty() {
        return;
    }
    let points = state.points_mut();
    for id in &orphans {
        points.remove(id);
    }
    state.replace_transient(|transient| {
        transient.selected.retain(|id| !orphans.contains(id));
        if transient
            .cursor
            .is_some_and(|cursor| orphans.contains(&cursor.point_id))
        {
            transient.cursor = None;
        }
    });
}

/// Replace a point's content; references and unknown ids are left alone
pub(crate) fn point_update(state: &AppState, point_id: &PointId, content: &str) -> Option<AppState> {
    let point = state.points.get(point_id)?;
    if point.is_reference() || point.content == content {
        return None;
    }
    let mut next = state.clone();
    if let Some(point) = next.points_mut().get_mut(point_id) {
        point.content = content.to_string();
    }
    Some(next)
}

/// Merge two neighbours of one shape sequence in the current message
pub(crate) fn combine_points(
    state: &AppState,
    shape: Shape,
    keep_index: usize,
    delete_index: usize,
) -> Option<AppState> {
    let Some(current) = state.current() else {
        log::warn!("combinePoints: no current message, dropping command");
        return None;
    };
    let (keep, delete) = regions::combine_targets(
        current.as_container(),
        shape,
        keep_index,
        delete_index,
        &state.points,
    )?;

    let mut next = state.clone();
    next.update_current(|message| regions::combine(message, shape, keep, delete))?;
    let join = merge_records(next.points_mut(), &keep, &delete, delete_index > keep_index);
    sweep_orphans(&mut next, &[delete]);
    next.replace_transient(|transient| {
        transient.cursor = Some(CursorPosition {
            point_id: keep,
            index: join,
        })
    });
    Some(next)
}

/// Cut a point at a character offset; the suffix becomes a new point right after it
pub(crate) fn split_into_two_points(
    state: &AppState,
    point_id: PointId,
    offset: usize,
    new_point_id: PointId,
    created_at: SystemTime,
) -> Option<AppState> {
    let Some(current) = state.current() else {
        log::warn!("splitIntoTwoPoints: no current message, dropping command");
        return None;
    };
    if !current.as_container().holds(&point_id)
        || state.points.contains(&new_point_id)
        || !can_split(&state.points, &point_id, offset)
    {
        log::debug!("splitIntoTwoPoints: cannot split {point_id} at {offset}");
        return None;
    }
    let shape = state.points.shape_of(&point_id)?;

    let mut next = state.clone();
    split_records(next.points_mut(), &point_id, offset, new_point_id, created_at);
    next.update_current(|message| regions::insert_after(message, &point_id, shape, new_point_id))?;
    next.replace_transient(|transient| {
        transient.cursor = Some(CursorPosition {
            point_id: new_point_id,
            index: 0,
        })
    });
    Some(next)
}
