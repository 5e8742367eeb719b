use crate::editing::commands::Cmd;
use crate::editing::{AppState, drafts, points, published, transient};
use crate::models::{Message, Point};

/// Side effect the caller runs after a transition is committed
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Hand a finalized message and its point records to persistence
    Save { message: Message, points: Vec<Point> },
}

/// Outcome of applying one command
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: AppState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: &AppState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
        }
    }
}

/// Apply one command to a snapshot.
///
/// Pure: the prior snapshot is never mutated and no I/O happens. A rejected
/// command yields a state equal to the prior one, sharing all of its slices.
pub fn transition(state: &AppState, cmd: &Cmd) -> Transition {
    let next = match cmd {
        Cmd::PointCreate {
            new_point_id,
            point,
            index,
            focus,
        } => published::point_create(state, *new_point_id, point, *index, *focus),
        Cmd::PointsMove => published::points_move(state),
        Cmd::PointsDelete { point_ids } => published::points_delete(state, point_ids),
        Cmd::SetFocus => published::set_focus(state),
        Cmd::SetMainPoint { point_id } => published::set_main_point(state, *point_id),

        Cmd::CombinePoints {
            shape,
            keep_index,
            delete_index,
        } => points::combine_points(state, *shape, *keep_index, *delete_index),
        Cmd::SplitIntoTwoPoints {
            point_id,
            offset,
            new_point_id,
            created_at,
        } => points::split_into_two_points(state, *point_id, *offset, *new_point_id, *created_at),
        Cmd::PointUpdate { point_id, content } => points::point_update(state, point_id, content),

        Cmd::DraftMessageCreate {
            new_message_id,
            author,
            created_at,
        } => drafts::draft_message_create(state, *new_message_id, author, *created_at),
        Cmd::DraftMessageDelete { message_id } => drafts::draft_message_delete(state, message_id),
        Cmd::DraftPointCreate {
            new_point_id,
            point,
            index,
            main,
        } => drafts::draft_point_create(state, *new_point_id, point, *index, *main),
        Cmd::DraftPointsDelete {
            message_id,
            point_ids,
        } => drafts::draft_points_delete(state, message_id, point_ids),
        Cmd::PointsMoveWithinMessage { message_id } => {
            drafts::points_move_within_message(state, message_id)
        }
        Cmd::PointsMoveToMessage {
            point_ids,
            new_message_id,
            cut_from_message_id,
        } => drafts::points_move_to_message(
            state,
            point_ids,
            new_message_id,
            cut_from_message_id.as_ref(),
        ),
        Cmd::SetMain {
            message_id,
            new_main_id,
            new_main_shape,
            old_main_id,
            old_main_shape,
        } => drafts::set_main(
            state,
            message_id,
            *new_main_id,
            *new_main_shape,
            *old_main_id,
            *old_main_shape,
        ),
        Cmd::SaveDraft { message_id } => {
            return Transition {
                state: state.clone(),
                effects: drafts::save_draft(state, message_id).into_iter().collect(),
            };
        }

        Cmd::HoverOver { region, index } => transient::hover_over(state, *region, *index),
        Cmd::EndDrag => transient::end_drag(state),
        Cmd::SetSelectedPoints { point_ids } => transient::set_selected_points(state, point_ids),
        Cmd::TogglePoint { point_id } => transient::toggle_point(state, *point_id),
        Cmd::SetCursorPosition { point_id, index } => {
            transient::set_cursor_position(state, *point_id, *index)
        }
        Cmd::ClearCursorPosition => transient::clear_cursor_position(state),
        Cmd::SetCurrentMessage { message_id } => transient::set_current_message(state, *message_id),

        Cmd::LoadComplete { points, messages } => {
            Some(published::load_complete(state, points, messages))
        }

        Cmd::Unknown => {
            log::debug!("Ignoring unknown command");
            None
        }
    };

    match next {
        Some(state) => Transition {
            state,
            effects: Vec::new(),
        },
        None => Transition::unchanged(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::commands::NewPoint;
    use crate::models::{MessageId, PointId, Shape};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::time::SystemTime;

    #[test]
    fn test_unknown_command_leaves_state_identical() {
        let state = AppState::default();

        let result = transition(&state, &Cmd::Unknown);

        assert_eq!(result.state, state);
        assert!(Arc::ptr_eq(&result.state.points, &state.points));
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_empty_draft_first_point_becomes_main() {
        let draft_id = MessageId::new();
        let point_id = PointId::new();
        let created = transition(
            &AppState::default(),
            &Cmd::DraftMessageCreate {
                new_message_id: draft_id,
                author: "me".to_string(),
                created_at: SystemTime::UNIX_EPOCH,
            },
        );

        let result = transition(
            &created.state,
            &Cmd::DraftPointCreate {
                new_point_id: point_id,
                point: NewPoint {
                    author: "me".to_string(),
                    content: "first".to_string(),
                    shape: Shape::Facts,
                    created_at: SystemTime::UNIX_EPOCH,
                },
                index: 0,
                main: false,
            },
        );

        let draft = result.state.drafts.get(&draft_id).unwrap();
        assert_eq!(draft.shapes.facts, vec![point_id]);
        assert_eq!(draft.main, Some(point_id));
        assert!(Arc::ptr_eq(&result.state.messages, &created.state.messages));
    }

    #[test]
    fn test_save_draft_never_changes_state() {
        let state = AppState::default();

        let result = transition(
            &state,
            &Cmd::SaveDraft {
                message_id: MessageId::new(),
            },
        );

        assert_eq!(result, Transition::unchanged(&state));
    }
}
