use std::sync::Arc;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::models::{
    DraftMessage, DraftStore, Message, MessageId, MessageStore, PointContainer, PointId,
    PointStore, Region,
};

/// Current drag-hover target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragContext {
    pub region: Region,
    pub index: usize,
}

/// One-shot caret placement request, cleared once the presentation layer used it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPosition {
    pub point_id: PointId,
    /// Character offset inside the point's content
    pub index: usize,
}

/// Selection, drag and cursor state. Replaced wholesale on every update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransientState {
    /// Selected point ids; insertion order only matters for "first selected"
    pub selected: IndexSet<PointId>,
    pub drag: Option<DragContext>,
    pub cursor: Option<CursorPosition>,
}

/// Which message the user is looking at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenState {
    pub current_message: Option<MessageId>,
}

/// Readiness of the persistence collaborator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PersistenceStatus {
    #[default]
    Loading,
    Ready,
}

/// The whole editing state.
///
/// Stores sit behind `Arc` so a transition can hand back untouched slices
/// without copying them; `Arc::ptr_eq` tells callers what changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub points: Arc<PointStore>,
    pub messages: Arc<MessageStore<Message>>,
    pub drafts: Arc<DraftStore>,
    pub transient: Arc<TransientState>,
    pub screen: ScreenState,
    pub persistence: PersistenceStatus,
}

/// The message currently open for editing, resolved to the store that owns it
#[derive(Debug, Clone, Copy)]
pub enum CurrentMessage<'a> {
    Published(&'a Message),
    Draft(&'a DraftMessage),
}

impl CurrentMessage<'_> {
    pub fn id(&self) -> MessageId {
        match self {
            CurrentMessage::Published(m) => m.id,
            CurrentMessage::Draft(d) => d.id,
        }
    }

    pub fn as_container(&self) -> &dyn PointContainer {
        match self {
            CurrentMessage::Published(m) => *m,
            CurrentMessage::Draft(d) => *d,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the current message id against drafts first, then published messages
    pub fn current(&self) -> Option<CurrentMessage<'_>> {
        let id = self.screen.current_message?;
        if let Some(draft) = self.drafts.get(&id) {
            return Some(CurrentMessage::Draft(draft));
        }
        self.messages.get(&id).map(CurrentMessage::Published)
    }

    pub fn current_message(&self) -> Option<&Message> {
        match self.current()? {
            CurrentMessage::Published(m) => Some(m),
            CurrentMessage::Draft(_) => None,
        }
    }

    pub fn current_draft(&self) -> Option<&DraftMessage> {
        match self.current()? {
            CurrentMessage::Draft(d) => Some(d),
            CurrentMessage::Published(_) => None,
        }
    }

    /// True when any message or draft still holds the point
    pub fn is_point_held(&self, id: &PointId) -> bool {
        self.messages.iter().any(|m| m.holds(id)) || self.drafts.iter().any(|d| d.holds(id))
    }

    /// Selected ids in selection order
    pub fn selected_points(&self) -> Vec<PointId> {
        self.transient.selected.iter().copied().collect()
    }

    // Copy-on-write accessors. Each one copies only the branch it returns,
    // and only when another snapshot still shares it.

    pub(crate) fn points_mut(&mut self) -> &mut PointStore {
        Arc::make_mut(&mut self.points)
    }

    pub(crate) fn messages_mut(&mut self) -> &mut MessageStore<Message> {
        Arc::make_mut(&mut self.messages)
    }

    pub(crate) fn drafts_mut(&mut self) -> &mut DraftStore {
        Arc::make_mut(&mut self.drafts)
    }

    pub(crate) fn message_mut(&mut self, id: &MessageId) -> Option<&mut Message> {
        if !self.messages.contains(id) {
            return None;
        }
        self.messages_mut().get_mut(id)
    }

    pub(crate) fn draft_mut(&mut self, id: &MessageId) -> Option<&mut DraftMessage> {
        if !self.drafts.contains(id) {
            return None;
        }
        self.drafts_mut().get_mut(id)
    }

    /// Run an edit against the current message, whichever store owns it
    pub(crate) fn update_current<R>(
        &mut self,
        edit: impl FnOnce(&mut dyn PointContainer) -> R,
    ) -> Option<R> {
        let id = self.screen.current_message?;
        if let Some(draft) = self.draft_mut(&id) {
            return Some(edit(draft));
        }
        self.message_mut(&id).map(|message| edit(message))
    }

    /// Replace the transient cell wholesale
    pub(crate) fn replace_transient(&mut self, update: impl FnOnce(&mut TransientState)) {
        let mut next = TransientState::clone(&self.transient);
        update(&mut next);
        self.transient = Arc::new(next);
    }
}
