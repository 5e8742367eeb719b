use std::collections::HashMap;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::sync::Arc;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{PointId, Shape};

/// Stable identifier for a message or draft
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Ordered point ids for each of the seven shape regions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shapes {
    pub facts: Vec<PointId>,
    pub thoughts: Vec<PointId>,
    pub feelings: Vec<PointId>,
    pub needs: Vec<PointId>,
    pub topics: Vec<PointId>,
    pub actions: Vec<PointId>,
    pub people: Vec<PointId>,
}

impl Shapes {
    /// Iterate every shape sequence in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (Shape, &Vec<PointId>)> {
        Shape::ALL.into_iter().map(move |shape| (shape, &self[shape]))
    }

    /// All placed ids, flattened in enumeration order
    pub fn ids(&self) -> impl Iterator<Item = &PointId> {
        self.iter().flat_map(|(_, ids)| ids.iter())
    }

    pub fn first(&self) -> Option<PointId> {
        self.ids().next().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, ids)| ids.is_empty())
    }

    pub fn contains(&self, id: &PointId) -> bool {
        self.ids().any(|p| p == id)
    }

    /// Which shape sequence holds the id, and at which position
    pub fn locate(&self, id: &PointId) -> Option<(Shape, usize)> {
        self.iter()
            .find_map(|(shape, ids)| ids.iter().position(|p| p == id).map(|i| (shape, i)))
    }

    pub fn len(&self) -> usize {
        self.iter().map(|(_, ids)| ids.len()).sum()
    }
}

impl Index<Shape> for Shapes {
    type Output = Vec<PointId>;

    fn index(&self, shape: Shape) -> &Self::Output {
        match shape {
            Shape::Facts => &self.facts,
            Shape::Thoughts => &self.thoughts,
            Shape::Feelings => &self.feelings,
            Shape::Needs => &self.needs,
            Shape::Topics => &self.topics,
            Shape::Actions => &self.actions,
            Shape::People => &self.people,
        }
    }
}

impl IndexMut<Shape> for Shapes {
    fn index_mut(&mut self, shape: Shape) -> &mut Self::Output {
        match shape {
            Shape::Facts => &mut self.facts,
            Shape::Thoughts => &mut self.thoughts,
            Shape::Feelings => &mut self.feelings,
            Shape::Needs => &mut self.needs,
            Shape::Topics => &mut self.topics,
            Shape::Actions => &mut self.actions,
            Shape::People => &mut self.people,
        }
    }
}

/// A published message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub author: String,
    pub shapes: Shapes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<PointId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<PointId>,
    pub created_at: SystemTime,
    #[serde(default)]
    pub is_persisted: bool,
}

/// An editable working copy of a message; drafts never have a focus point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftMessage {
    pub id: MessageId,
    pub author: String,
    pub shapes: Shapes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<PointId>,
    pub created_at: SystemTime,
}

impl DraftMessage {
    pub fn new(id: MessageId, author: impl Into<String>, created_at: SystemTime) -> Self {
        Self {
            id,
            author: author.into(),
            shapes: Shapes::default(),
            main: None,
            created_at,
        }
    }

    /// Finalize the draft into a persisted message
    pub fn to_message(&self) -> Message {
        Message {
            id: self.id,
            author: self.author.clone(),
            shapes: self.shapes.clone(),
            main: self.main,
            focus: None,
            created_at: self.created_at,
            is_persisted: true,
        }
    }
}

/// Common access to the region structure shared by messages and drafts
pub trait PointContainer {
    fn id(&self) -> MessageId;
    fn shapes(&self) -> &Shapes;
    fn shapes_mut(&mut self) -> &mut Shapes;
    fn main(&self) -> Option<PointId>;
    fn set_main(&mut self, main: Option<PointId>);
    /// `None` for containers without a focus slot
    fn focus(&self) -> Option<PointId>;
    fn set_focus(&mut self, focus: Option<PointId>);

    /// True when the id is placed in any shape sequence or in focus
    fn places(&self, id: &PointId) -> bool {
        self.shapes().contains(id) || self.focus().as_ref() == Some(id)
    }

    /// True when the id appears anywhere, including the main slot
    fn holds(&self, id: &PointId) -> bool {
        self.places(id) || self.main().as_ref() == Some(id)
    }

    /// A message with no points in its shapes, no focus and no main
    fn is_empty(&self) -> bool {
        self.shapes().is_empty() && self.focus().is_none() && self.main().is_none()
    }

    /// Every id held by this container, main and focus included
    fn point_ids(&self) -> Vec<PointId> {
        let mut ids: Vec<PointId> = self.shapes().ids().copied().collect();
        for id in [self.focus(), self.main()].into_iter().flatten() {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }
}

impl PointContainer for Message {
    fn id(&self) -> MessageId {
        self.id
    }

    fn shapes(&self) -> &Shapes {
        &self.shapes
    }

    fn shapes_mut(&mut self) -> &mut Shapes {
        &mut self.shapes
    }

    fn main(&self) -> Option<PointId> {
        self.main
    }

    fn set_main(&mut self, main: Option<PointId>) {
        self.main = main;
    }

    fn focus(&self) -> Option<PointId> {
        self.focus
    }

    fn set_focus(&mut self, focus: Option<PointId>) {
        self.focus = focus;
    }
}

impl PointContainer for DraftMessage {
    fn id(&self) -> MessageId {
        self.id
    }

    fn shapes(&self) -> &Shapes {
        &self.shapes
    }

    fn shapes_mut(&mut self) -> &mut Shapes {
        &mut self.shapes
    }

    fn main(&self) -> Option<PointId> {
        self.main
    }

    fn set_main(&mut self, main: Option<PointId>) {
        self.main = main;
    }

    fn focus(&self) -> Option<PointId> {
        None
    }

    fn set_focus(&mut self, _focus: Option<PointId>) {}
}

/// Messages addressed by id plus their display order.
///
/// Each entry sits behind its own `Arc`, so cloning the store is shallow and a
/// transition only copies the messages it touches (see `Arc::make_mut`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageStore<M> {
    by_id: HashMap<MessageId, Arc<M>>,
    all_ids: Vec<MessageId>,
}

pub type DraftStore = MessageStore<DraftMessage>;

impl<M> Default for MessageStore<M> {
    fn default() -> Self {
        Self {
            by_id: HashMap::new(),
            all_ids: Vec::new(),
        }
    }
}

impl<M: PointContainer + Clone> MessageStore<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &MessageId) -> Option<&M> {
        self.by_id.get(id).map(Arc::as_ref)
    }

    /// Shared handle to a message, for pointer-identity comparisons
    pub fn get_arc(&self, id: &MessageId) -> Option<&Arc<M>> {
        self.by_id.get(id)
    }

    /// Copy-on-write access to a single message
    pub(crate) fn get_mut(&mut self, id: &MessageId) -> Option<&mut M> {
        self.by_id.get_mut(id).map(Arc::make_mut)
    }

    pub fn contains(&self, id: &MessageId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Ids in display order
    pub fn ids(&self) -> &[MessageId] {
        &self.all_ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &M> {
        self.all_ids.iter().filter_map(|id| self.get(id))
    }

    /// Append, keeping display order; replaces an existing entry in place
    pub(crate) fn push(&mut self, message: M) {
        let id = message.id();
        if self.by_id.insert(id, Arc::new(message)).is_none() {
            self.all_ids.push(id);
        }
    }

    /// Insert at the front of the display order (newest first)
    pub(crate) fn push_front(&mut self, message: M) {
        let id = message.id();
        if self.by_id.insert(id, Arc::new(message)).is_none() {
            self.all_ids.insert(0, id);
        }
    }

    pub(crate) fn remove(&mut self, id: &MessageId) -> Option<Arc<M>> {
        let removed = self.by_id.remove(id);
        if removed.is_some() {
            self.all_ids.retain(|m| m != id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.all_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_ids.is_empty()
    }
}

impl<M: PointContainer + Clone> FromIterator<M> for MessageStore<M> {
    fn from_iter<T: IntoIterator<Item = M>>(iter: T) -> Self {
        let mut store = Self::new();
        for message in iter {
            store.push(message);
        }
        store
    }
}
