// Test helper functions - each integration test binary uses a different subset
#![allow(dead_code)]

use std::time::SystemTime;

use semantic_screen_engine::editing::{Cmd, Engine, NewPoint};
use semantic_screen_engine::models::{Message, MessageId, Point, PointId, Shape, Shapes};

pub fn point(content: &str, shape: Shape) -> Point {
    Point {
        id: PointId::new(),
        author: "alice".to_string(),
        content: content.to_string(),
        shape,
        created_at: SystemTime::UNIX_EPOCH,
        reference: None,
    }
}

pub fn new_point(content: &str, shape: Shape) -> NewPoint {
    NewPoint {
        author: "alice".to_string(),
        content: content.to_string(),
        shape,
        created_at: SystemTime::UNIX_EPOCH,
    }
}

/// A published message placing each point in its own shape, main set to `main`
pub fn published(points: &[Point], main: Option<PointId>) -> Message {
    let mut shapes = Shapes::default();
    for point in points {
        shapes[point.shape].push(point.id);
    }
    Message {
        id: MessageId::new(),
        author: "alice".to_string(),
        shapes,
        main,
        focus: None,
        created_at: SystemTime::UNIX_EPOCH,
        is_persisted: true,
    }
}

/// An engine that has loaded one published message, which is current
pub fn engine_with_message(points: &[Point], main: Option<PointId>) -> (Engine, MessageId) {
    let message = published(points, main);
    let id = message.id;
    let mut engine = Engine::new();
    engine.dispatch(&Cmd::LoadComplete {
        points: points.to_vec(),
        messages: vec![message],
    });
    (engine, id)
}

/// Create a draft (which becomes current) and return its id
pub fn create_draft(engine: &mut Engine) -> MessageId {
    let id = MessageId::new();
    engine.dispatch(&Cmd::DraftMessageCreate {
        new_message_id: id,
        author: "alice".to_string(),
        created_at: SystemTime::UNIX_EPOCH,
    });
    id
}

/// Append a point to the current draft's shape and return its id
pub fn add_draft_point(engine: &mut Engine, content: &str, shape: Shape) -> PointId {
    let id = PointId::new();
    let index = engine
        .state()
        .current_draft()
        .map(|draft| draft.shapes[shape].len())
        .unwrap_or_default();
    engine.dispatch(&Cmd::DraftPointCreate {
        new_point_id: id,
        point: new_point(content, shape),
        index,
        main: false,
    });
    id
}
