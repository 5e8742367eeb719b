//! Hover geometry for drag and drop.
//!
//! Presentation layers measure the hovered row and call [`resolve_hover`] to
//! turn pointer position into the `index` of a `hoverOver` command.

/// Vertical bounds of the hovered element, in the same units as the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverBounds {
    pub top: f64,
    pub bottom: f64,
}

/// Resolve the drop index for a pointer hovering over the element at `hover_index`.
///
/// `drag_index` is the index of the element being dragged when it comes from
/// the same region, `None` otherwise. Returns `None` when the hover should not
/// change the drag target.
pub fn resolve_hover(
    drag_index: Option<usize>,
    hover_index: usize,
    pointer_y: f64,
    bounds: HoverBounds,
) -> Option<usize> {
    let mid = (bounds.bottom - bounds.top) / 2.0;
    let y = pointer_y - bounds.top;

    match drag_index {
        Some(drag) if drag == hover_index && y < mid => None,
        Some(drag) if drag > hover_index && y > mid => None,
        Some(drag) if drag == hover_index && y > mid => Some(hover_index + 1),
        _ => Some(hover_index),
    }
}
