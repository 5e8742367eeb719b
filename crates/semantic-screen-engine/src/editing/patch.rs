use crate::editing::{AppState, Effect};

/// Which slices of the state a dispatch replaced.
///
/// Store slices are compared by pointer identity, so a `false` means the
/// caller can keep using its previous `Arc` without re-reading it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangedSlices {
    pub points: bool,
    pub messages: bool,
    pub drafts: bool,
    pub transient: bool,
    pub screen: bool,
    pub persistence: bool,
}

impl ChangedSlices {
    pub fn between(before: &AppState, after: &AppState) -> Self {
        Self {
            points: !std::sync::Arc::ptr_eq(&before.points, &after.points),
            messages: !std::sync::Arc::ptr_eq(&before.messages, &after.messages),
            drafts: !std::sync::Arc::ptr_eq(&before.drafts, &after.drafts),
            transient: !std::sync::Arc::ptr_eq(&before.transient, &after.transient),
            screen: before.screen != after.screen,
            persistence: before.persistence != after.persistence,
        }
    }

    pub fn any(&self) -> bool {
        self.points
            || self.messages
            || self.drafts
            || self.transient
            || self.screen
            || self.persistence
    }
}

/// Result of dispatching a command
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub changed: ChangedSlices,
    /// Effects the caller must run now that the state is committed
    pub effects: Vec<Effect>,
    pub version: u64,
}

impl Patch {
    /// True when the dispatch neither changed state nor asked for effects
    pub fn is_noop(&self) -> bool {
        !self.changed.any() && self.effects.is_empty()
    }
}
