// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use std::time::SystemTime;

use semantic_screen_engine::editing::{Cmd, Engine, NewPoint};
use semantic_screen_engine::models::{MessageId, PointId, Shape};

/// An engine with one current draft holding `per_shape` points in every shape
#[allow(dead_code)]
pub fn engine_with_draft(per_shape: usize) -> (Engine, MessageId, Vec<PointId>) {
    let mut engine = Engine::new();
    let draft = MessageId::new();
    engine.dispatch(&Cmd::DraftMessageCreate {
        new_message_id: draft,
        author: "bench".to_string(),
        created_at: SystemTime::UNIX_EPOCH,
    });

    let mut ids = Vec::new();
    for shape in Shape::ALL {
        for index in 0..per_shape {
            let id = PointId::new();
            engine.dispatch(&Cmd::DraftPointCreate {
                new_point_id: id,
                point: NewPoint {
                    author: "bench".to_string(),
                    content: format!("{shape} point number {index}"),
                    shape,
                    created_at: SystemTime::UNIX_EPOCH,
                },
                index,
                main: false,
            });
            ids.push(id);
        }
    }
    (engine, draft, ids)
}
