use std::fmt::Write;

use crate::editing::AppState;
use crate::models::{PointContainer, PointId};

/// Plain-text view of a message: main and focus slots, then each non-empty shape.
///
/// Points are shown by content. Markers flag the main point (`*`) and
/// references (`>`).
pub fn render_outline(state: &AppState, message: &dyn PointContainer) -> String {
    let label = |id: &PointId| -> String {
        match state.points.get(id) {
            Some(point) if point.is_reference() => format!("> {}", point.content),
            Some(point) => point.content.clone(),
            None => format!("<missing {id}>"),
        }
    };

    let mut out = String::new();
    let main = message.main();
    match main {
        Some(id) if !message.places(&id) => {
            let _ = writeln!(out, "main: {}", label(&id));
        }
        Some(_) => {}
        None => out.push_str("main: -\n"),
    }
    if let Some(focus) = message.focus() {
        let marker = if main == Some(focus) { "*" } else { "" };
        let _ = writeln!(out, "focus: {marker}{}", label(&focus));
    }
    for (shape, ids) in message.shapes().iter() {
        if ids.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{shape}:");
        for id in ids {
            let marker = if main == Some(*id) { "* " } else { "- " };
            let _ = writeln!(out, "  {marker}{}", label(id));
        }
    }
    out
}

/// Outline of the current message, or `None` when nothing is open
pub fn render_current(state: &AppState) -> Option<String> {
    state
        .current()
        .map(|current| render_outline(state, current.as_container()))
}
