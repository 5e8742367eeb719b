//! Shape-region invariant maintenance shared by published messages and drafts.
//!
//! Every helper keeps the unique-placement invariant: an id is stripped from
//! all shape sequences before it is placed again.

use std::collections::HashSet;

use crate::models::{PointContainer, PointId, PointStore, Shape};

/// Strip ids from every shape sequence and clear main/focus when they match.
pub fn remove_points<C: PointContainer + ?Sized>(message: &mut C, ids: &[PointId]) {
    strip_from_shapes(message, ids);
    if message.focus().is_some_and(|f| ids.contains(&f)) {
        message.set_focus(None);
    }
    if message.main().is_some_and(|m| ids.contains(&m)) {
        message.set_main(None);
    }
}

/// Strip ids from every shape sequence, leaving main and focus alone.
pub fn strip_from_shapes<C: PointContainer + ?Sized>(message: &mut C, ids: &[PointId]) {
    let shapes = message.shapes_mut();
    for shape in Shape::ALL {
        shapes[shape].retain(|id| !ids.contains(id));
    }
}

/// Re-seed main after it was cleared.
///
/// First remaining id in shape enumeration order, else the current focus.
/// The order dependence is kept on purpose until product intent is confirmed.
pub fn restore_main<C: PointContainer + ?Sized>(message: &mut C) {
    if message.main().is_some() {
        return;
    }
    let fallback = message.shapes().first().or(message.focus());
    message.set_main(fallback);
}

/// Repair a message read from storage.
///
/// Keeps the first placement of each id (focus first, then shape order), drops
/// a main that resolves to nothing and re-seeds a missing one. Returns true
/// when anything had to change.
pub fn normalize<C: PointContainer + ?Sized>(message: &mut C, points: &PointStore) -> bool {
    let mut placed: HashSet<PointId> = message.focus().into_iter().collect();
    let mut repaired = false;
    let shapes = message.shapes_mut();
    for shape in Shape::ALL {
        let before = shapes[shape].len();
        shapes[shape].retain(|id| placed.insert(*id));
        repaired |= shapes[shape].len() != before;
    }

    if let Some(main) = message.main()
        && !placed.contains(&main)
        && !points.contains(&main)
    {
        message.set_main(None);
        repaired = true;
    }
    if message.main().is_none() && !placed.is_empty() {
        restore_main(message);
        repaired = true;
    }
    repaired
}

/// Insert an id at a position in a shape sequence.
///
/// Returns false, leaving the message untouched, when the index is past the end.
pub fn insert_at<C: PointContainer + ?Sized>(
    message: &mut C,
    shape: Shape,
    index: usize,
    id: PointId,
) -> bool {
    if index > message.shapes()[shape].len() {
        return false;
    }
    message.shapes_mut()[shape].insert(index, id);
    true
}

/// Place an id at the end of a shape sequence, removing any earlier placement.
pub fn push_back<C: PointContainer + ?Sized>(message: &mut C, shape: Shape, id: PointId) {
    strip_from_shapes(message, &[id]);
    message.shapes_mut()[shape].push(id);
}

/// Build the destination sequence for a drop.
///
/// Moving ids are spliced in at `index` in their given order; ids already in
/// the sequence that are being moved are skipped. `index == current.len()`
/// appends.
pub fn rebuild_region(current: &[PointId], moving: &[PointId], index: usize) -> Vec<PointId> {
    let mut rebuilt = Vec::with_capacity(current.len() + moving.len());
    for (i, id) in current.iter().enumerate() {
        if i == index {
            rebuilt.extend_from_slice(moving);
        }
        if !moving.contains(id) {
            rebuilt.push(*id);
        }
    }
    if index == current.len() {
        rebuilt.extend_from_slice(moving);
    }
    rebuilt
}

/// Move ids into `shape` at `index`, removing them from every other placement.
///
/// Focus is cleared when it was among the moved ids; main is left alone since
/// the point stays inside the message.
pub fn move_within<C: PointContainer + ?Sized>(
    message: &mut C,
    moving: &[PointId],
    shape: Shape,
    index: usize,
) -> bool {
    if moving.is_empty() || index > message.shapes()[shape].len() {
        return false;
    }
    let rebuilt = rebuild_region(&message.shapes()[shape], moving, index);
    strip_from_shapes(message, moving);
    message.shapes_mut()[shape] = rebuilt;
    if message.focus().is_some_and(|f| moving.contains(&f)) {
        message.set_focus(None);
    }
    true
}

/// Only references that stay in their own shape may move; everything else moves freely.
pub fn movable_selection(selected: &[PointId], target: Shape, points: &PointStore) -> Vec<PointId> {
    selected
        .iter()
        .filter(|id| match points.get(id) {
            Some(point) => !point.is_reference() || point.shape == target,
            None => false,
        })
        .copied()
        .collect()
}

/// Insert `new_id` right after `anchor` in its shape sequence.
///
/// When `anchor` lives in the main or focus slot it has no position, so the new
/// id goes to the front of `fallback_shape`.
pub fn insert_after<C: PointContainer + ?Sized>(
    message: &mut C,
    anchor: &PointId,
    fallback_shape: Shape,
    new_id: PointId,
) {
    let located = message.shapes().locate(anchor);
    match located {
        Some((shape, i)) => message.shapes_mut()[shape].insert(i + 1, new_id),
        None => message.shapes_mut()[fallback_shape].insert(0, new_id),
    }
}

/// Resolve the (keep, delete) ids of a combine, or `None` when it must be rejected.
pub fn combine_targets<C: PointContainer + ?Sized>(
    message: &C,
    shape: Shape,
    keep_index: usize,
    delete_index: usize,
    points: &PointStore,
) -> Option<(PointId, PointId)> {
    let sequence = &message.shapes()[shape];
    let keep = *sequence.get(keep_index)?;
    let delete = *sequence.get(delete_index)?;
    if keep == delete || points.is_reference(&keep) || points.is_reference(&delete) {
        return None;
    }
    Some((keep, delete))
}

/// Drop `delete` from the shape sequence; main follows the merged content to `keep`.
pub fn combine<C: PointContainer + ?Sized>(
    message: &mut C,
    shape: Shape,
    keep: PointId,
    delete: PointId,
) {
    message.shapes_mut()[shape].retain(|id| *id != delete);
    if message.main() == Some(delete) {
        message.set_main(Some(keep));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DraftMessage, Message, MessageId, Point, ReferenceData, Shapes};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::time::SystemTime;

    fn ids(n: usize) -> Vec<PointId> {
        (0..n).map(|_| PointId::new()).collect()
    }

    fn message(shapes: Shapes, main: Option<PointId>, focus: Option<PointId>) -> Message {
        Message {
            id: MessageId::new(),
            author: "author".to_string(),
            shapes,
            main,
            focus,
            created_at: SystemTime::UNIX_EPOCH,
            is_persisted: true,
        }
    }

    fn point(id: PointId, shape: Shape, quoted: bool) -> Point {
        Point {
            id,
            author: "author".to_string(),
            content: String::new(),
            shape,
            created_at: SystemTime::UNIX_EPOCH,
            reference: quoted.then(|| ReferenceData {
                message_id: MessageId::new(),
                point_id: PointId::new(),
            }),
        }
    }

    #[test]
    fn test_remove_points_is_idempotent() {
        let p = ids(3);
        let mut m = message(
            Shapes {
                facts: vec![p[0], p[1]],
                ..Shapes::default()
            },
            Some(p[0]),
            Some(p[2]),
        );

        remove_points(&mut m, &[p[0], p[2]]);
        let once = m.clone();
        remove_points(&mut m, &[p[0], p[2]]);

        assert_eq!(m, once);
        assert_eq!(m.shapes.facts, vec![p[1]]);
        assert_eq!(m.main, None);
        assert_eq!(m.focus, None);
    }

    #[test]
    fn test_restore_main_prefers_shapes_over_focus() {
        let p = ids(3);
        let mut m = message(
            Shapes {
                actions: vec![p[1]],
                thoughts: vec![p[2]],
                ..Shapes::default()
            },
            None,
            Some(p[0]),
        );

        restore_main(&mut m);
        assert_eq!(m.main, Some(p[2]));
    }

    #[test]
    fn test_restore_main_falls_back_to_focus() {
        let p = ids(1);
        let mut m = message(Shapes::default(), None, Some(p[0]));

        restore_main(&mut m);
        assert_eq!(m.main, Some(p[0]));
    }

    #[test]
    fn test_normalize_drops_repeats_and_seeds_main() {
        let p = ids(3);
        let mut m = message(
            Shapes {
                facts: vec![p[0], p[1]],
                needs: vec![p[1], p[2]],
                topics: vec![p[2]],
                ..Shapes::default()
            },
            None,
            Some(p[2]),
        );

        assert!(normalize(&mut m, &PointStore::default()));

        assert_eq!(m.shapes.facts, vec![p[0], p[1]]);
        assert!(m.shapes.needs.is_empty());
        assert!(m.shapes.topics.is_empty());
        assert_eq!(m.focus, Some(p[2]));
        assert_eq!(m.main, Some(p[0]));
    }

    #[test]
    fn test_normalize_replaces_main_without_a_record() {
        let p = ids(2);
        let mut m = message(
            Shapes {
                actions: vec![p[0]],
                ..Shapes::default()
            },
            Some(p[1]),
            None,
        );

        assert!(normalize(&mut m, &PointStore::default()));
        assert_eq!(m.main, Some(p[0]));
    }

    #[test]
    fn test_normalize_leaves_consistent_message_alone() {
        let p = ids(2);
        let mut m = message(
            Shapes {
                facts: vec![p[0]],
                ..Shapes::default()
            },
            Some(p[0]),
            Some(p[1]),
        );
        let before = m.clone();

        assert!(!normalize(&mut m, &PointStore::default()));
        assert_eq!(m, before);
    }

    #[rstest]
    #[case::to_front(0, vec![3, 0, 1, 2])]
    #[case::to_middle(1, vec![0, 3, 1, 2])]
    #[case::append(3, vec![0, 1, 2, 3])]
    fn test_rebuild_region_with_new_id(#[case] index: usize, #[case] expected: Vec<usize>) {
        let p = ids(4);
        let current = [p[0], p[1], p[2]];

        let rebuilt = rebuild_region(&current, &[p[3]], index);

        let expected: Vec<PointId> = expected.into_iter().map(|i| p[i]).collect();
        assert_eq!(rebuilt, expected);
    }

    #[rstest]
    #[case::down_one(2, vec![1, 0, 2])]
    #[case::to_end(3, vec![1, 2, 0])]
    #[case::onto_itself(0, vec![0, 1, 2])]
    fn test_rebuild_region_reorders_existing_id(
        #[case] index: usize,
        #[case] expected: Vec<usize>,
    ) {
        let p = ids(3);
        let current = [p[0], p[1], p[2]];

        let rebuilt = rebuild_region(&current, &[p[0]], index);

        let expected: Vec<PointId> = expected.into_iter().map(|i| p[i]).collect();
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn test_move_within_strips_other_regions_and_focus() {
        let p = ids(4);
        let mut m = message(
            Shapes {
                facts: vec![p[0]],
                needs: vec![p[1], p[2]],
                ..Shapes::default()
            },
            Some(p[1]),
            Some(p[3]),
        );

        assert!(move_within(&mut m, &[p[1], p[3]], Shape::Facts, 0));

        assert_eq!(m.shapes.facts, vec![p[1], p[3], p[0]]);
        assert_eq!(m.shapes.needs, vec![p[2]]);
        assert_eq!(m.focus, None);
        assert_eq!(m.main, Some(p[1]));
    }

    #[test]
    fn test_move_within_rejects_index_past_end() {
        let p = ids(2);
        let mut m = message(
            Shapes {
                facts: vec![p[0]],
                needs: vec![p[1]],
                ..Shapes::default()
            },
            Some(p[0]),
            None,
        );
        let before = m.clone();

        assert!(!move_within(&mut m, &[p[1]], Shape::Facts, 2));
        assert_eq!(m, before);
    }

    #[test]
    fn test_movable_selection_keeps_references_in_their_shape() {
        let p = ids(3);
        let store: PointStore = [
            point(p[0], Shape::Facts, false),
            point(p[1], Shape::Needs, true),
            point(p[2], Shape::Facts, true),
        ]
        .into_iter()
        .collect();

        let movable = movable_selection(&p, Shape::Facts, &store);
        assert_eq!(movable, vec![p[0], p[2]]);
    }

    #[test]
    fn test_insert_after_falls_back_to_front_for_slot_points() {
        let p = ids(3);
        let mut d = DraftMessage::new(MessageId::new(), "me", SystemTime::UNIX_EPOCH);
        d.shapes.facts = vec![p[0]];
        d.main = Some(p[1]);

        insert_after(&mut d, &p[1], Shape::Facts, p[2]);
        assert_eq!(d.shapes.facts, vec![p[2], p[0]]);
    }

    #[test]
    fn test_combine_targets_rejects_references_and_bounds() {
        let p = ids(3);
        let m = message(
            Shapes {
                facts: vec![p[0], p[1], p[2]],
                ..Shapes::default()
            },
            Some(p[0]),
            None,
        );
        let store: PointStore = [
            point(p[0], Shape::Facts, false),
            point(p[1], Shape::Facts, false),
            point(p[2], Shape::Facts, true),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            combine_targets(&m, Shape::Facts, 0, 1, &store),
            Some((p[0], p[1]))
        );
        assert_eq!(combine_targets(&m, Shape::Facts, 1, 2, &store), None);
        assert_eq!(combine_targets(&m, Shape::Facts, 2, 3, &store), None);
        assert_eq!(combine_targets(&m, Shape::Needs, 0, 1, &store), None);
    }
}
