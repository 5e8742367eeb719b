//! Structural checks run by the engine after every dispatch.

use std::collections::HashSet;

use thiserror::Error;

use crate::editing::AppState;
use crate::models::{MessageId, PointContainer, PointId, PointStore};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("point {point} is placed more than once in message {message}")]
    DuplicatePlacement { message: MessageId, point: PointId },
    #[error("message {message} holds points but has no main point")]
    MissingMain { message: MessageId },
    #[error("main point {point} of message {message} is neither placed nor stored")]
    UnresolvableMain { message: MessageId, point: PointId },
}

/// Verify unique placement and main-point invariants for every message and draft
pub fn check(state: &AppState) -> Result<(), InvariantViolation> {
    for message in state.messages.iter() {
        check_container(message, &state.points)?;
    }
    for draft in state.drafts.iter() {
        check_container(draft, &state.points)?;
    }
    Ok(())
}

fn check_container<C: PointContainer + ?Sized>(
    message: &C,
    points: &PointStore,
) -> Result<(), InvariantViolation> {
    let focus = message.focus();
    let mut seen = HashSet::new();
    for id in message.shapes().ids().chain(focus.as_ref()) {
        if !seen.insert(*id) {
            return Err(InvariantViolation::DuplicatePlacement {
                message: message.id(),
                point: *id,
            });
        }
    }

    match message.main() {
        None if !seen.is_empty() => Err(InvariantViolation::MissingMain {
            message: message.id(),
        }),
        Some(main) if !seen.contains(&main) && !points.contains(&main) => {
            Err(InvariantViolation::UnresolvableMain {
                message: message.id(),
                point: main,
            })
        }
        _ => Ok(()),
    }
}
