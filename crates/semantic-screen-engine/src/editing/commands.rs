use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::models::{Message, MessageId, Point, PointId, Region, Shape};

/// Record for a point about to be created; the id travels separately
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPoint {
    pub author: String,
    #[serde(default)]
    pub content: String,
    pub shape: Shape,
    pub created_at: SystemTime,
}

impl NewPoint {
    pub fn into_point(self, id: PointId) -> Point {
        Point {
            id,
            author: self.author,
            content: self.content,
            shape: self.shape,
            created_at: self.created_at,
            reference: None,
        }
    }
}

/// Commands that can be applied to the editing state.
///
/// Serialized as `{"kind": "<camelCaseName>", ...params}`. Kinds this engine
/// does not know deserialize to [`Cmd::Unknown`], which leaves state untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Cmd {
    // ---- published messages (act on the current message) ----
    PointCreate {
        new_point_id: PointId,
        point: NewPoint,
        #[serde(default)]
        index: usize,
        #[serde(default)]
        focus: bool,
    },
    /// Drop the selection at the drag target
    PointsMove,
    PointsDelete {
        point_ids: Vec<PointId>,
    },
    /// Promote the first selected point to focus
    SetFocus,
    SetMainPoint {
        point_id: PointId,
    },

    // ---- shared by published messages and drafts ----
    CombinePoints {
        shape: Shape,
        keep_index: usize,
        delete_index: usize,
    },
    SplitIntoTwoPoints {
        point_id: PointId,
        /// Character offset where the content is cut
        offset: usize,
        new_point_id: PointId,
        created_at: SystemTime,
    },
    PointUpdate {
        point_id: PointId,
        content: String,
    },

    // ---- drafts ----
    DraftMessageCreate {
        new_message_id: MessageId,
        author: String,
        created_at: SystemTime,
    },
    DraftMessageDelete {
        message_id: MessageId,
    },
    DraftPointCreate {
        new_point_id: PointId,
        point: NewPoint,
        #[serde(default)]
        index: usize,
        #[serde(default)]
        main: bool,
    },
    DraftPointsDelete {
        message_id: MessageId,
        point_ids: Vec<PointId>,
    },
    /// Drop the selection at the drag target inside a draft
    PointsMoveWithinMessage {
        message_id: MessageId,
    },
    PointsMoveToMessage {
        point_ids: Vec<PointId>,
        new_message_id: MessageId,
        #[serde(default)]
        cut_from_message_id: Option<MessageId>,
    },
    SetMain {
        message_id: MessageId,
        new_main_id: PointId,
        new_main_shape: Shape,
        #[serde(default)]
        old_main_id: Option<PointId>,
        #[serde(default)]
        old_main_shape: Option<Shape>,
    },
    /// User-triggered save; emits an effect instead of touching storage
    SaveDraft {
        message_id: MessageId,
    },

    // ---- transient state ----
    HoverOver {
        region: Region,
        index: usize,
    },
    EndDrag,
    SetSelectedPoints {
        point_ids: Vec<PointId>,
    },
    TogglePoint {
        point_id: PointId,
    },
    SetCursorPosition {
        point_id: PointId,
        index: usize,
    },
    ClearCursorPosition,
    SetCurrentMessage {
        #[serde(default)]
        message_id: Option<MessageId>,
    },

    // ---- collaborators ----
    LoadComplete {
        points: Vec<Point>,
        messages: Vec<Message>,
    },

    #[serde(other)]
    Unknown,
}
