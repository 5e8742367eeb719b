/*!
 * # Editing Core Module
 *
 * Command-driven editing of point collections.
 *
 * ## Architecture Overview
 *
 * ### 1. Immutable snapshots
 * - The whole editing state is one [`AppState`] value
 * - Each store sits behind an `Arc`, and every message behind its own `Arc`
 * - A transition copies only the branches it touches (`Arc::make_mut`);
 *   untouched branches stay the same allocation, so `Arc::ptr_eq` tells readers
 *   what changed
 *
 * ### 2. Command-based editing
 * - All edits are [`Cmd`] values, serialized as `{"kind": ..., ...params}`
 * - [`transition`] is a pure function from `(&AppState, &Cmd)` to the next
 *   state plus any [`Effect`]s; it never performs I/O
 * - Rejected commands leave the state untouched
 *
 * ### 3. Single writer
 * - [`Engine`] owns the canonical state, applies commands in order, checks
 *   structural invariants and reports a [`Patch`] per dispatch
 *
 * ## Module Structure
 *
 * - **`commands`**: the `Cmd` enum
 * - **`state`**: `AppState` and the transient selection/drag/cursor cell
 * - **`regions`**: unique-placement helpers shared by messages and drafts
 * - **`transition`**: command dispatch and effects
 * - **`engine`** / **`patch`**: the single writer and its change reports
 * - **`invariants`**: structural checks
 * - **`drag`**: hover geometry for presentation layers
 * - **`outline`**: plain-text rendering of a message
 *
 * ## Usage Pattern
 *
 * ```rust
 * use semantic_screen_engine::editing::*;
 * use semantic_screen_engine::models::{MessageId, PointId, Shape};
 * use std::time::SystemTime;
 *
 * let mut engine = Engine::new();
 * let draft = MessageId::new();
 * engine.dispatch(&Cmd::DraftMessageCreate {
 *     new_message_id: draft,
 *     author: "me".to_string(),
 *     created_at: SystemTime::now(),
 * });
 *
 * let patch = engine.dispatch(&Cmd::DraftPointCreate {
 *     new_point_id: PointId::new(),
 *     point: NewPoint {
 *         author: "me".to_string(),
 *         content: "It rained all week".to_string(),
 *         shape: Shape::Facts,
 *         created_at: SystemTime::now(),
 *     },
 *     index: 0,
 *     main: false,
 * });
 * assert!(patch.changed.drafts);
 *
 * let outline = render_current(&engine.state()).unwrap();
 * assert!(outline.contains("It rained all week"));
 * ```
 */

pub mod commands;
pub mod drag;
mod drafts;
pub mod engine;
pub mod invariants;
pub mod outline;
pub mod patch;
mod points;
mod published;
pub mod regions;
pub mod state;
mod transient;
pub mod transition;

pub use commands::{Cmd, NewPoint};
pub use drag::{HoverBounds, resolve_hover};
pub use engine::Engine;
pub use invariants::InvariantViolation;
pub use outline::{render_current, render_outline};
pub use patch::{ChangedSlices, Patch};
pub use state::{
    AppState, CurrentMessage, CursorPosition, DragContext, PersistenceStatus, ScreenState,
    TransientState,
};
pub use transition::{Effect, Transition, transition};
