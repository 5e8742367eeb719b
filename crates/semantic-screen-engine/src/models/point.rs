use std::collections::HashMap;
use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{MessageId, Shape};

/// Stable identifier for a point
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(pub Uuid);

impl PointId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PointId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Where a quoted point came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub message_id: MessageId,
    pub point_id: PointId,
}

/// A single user-authored statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    pub author: String,
    pub content: String,
    pub shape: Shape,
    pub created_at: SystemTime,
    /// Set when this point is a read-only mirror of a point owned by another message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceData>,
}

impl Point {
    pub fn is_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Number of characters (not bytes) in the content
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Split the content at a character offset into (prefix, suffix)
    ///
    /// Returns `None` when the offset lies past the end of the content.
    pub fn split_content(&self, offset: usize) -> Option<(&str, &str)> {
        let byte_offset = if offset == self.char_len() {
            self.content.len()
        } else {
            self.content.char_indices().nth(offset).map(|(i, _)| i)?
        };
        Some(self.content.split_at(byte_offset))
    }
}

/// Canonical point records addressed by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointStore {
    by_id: HashMap<PointId, Point>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &PointId) -> Option<&Point> {
        self.by_id.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &PointId) -> Option<&mut Point> {
        self.by_id.get_mut(id)
    }

    pub fn contains(&self, id: &PointId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn shape_of(&self, id: &PointId) -> Option<Shape> {
        self.get(id).map(|p| p.shape)
    }

    pub fn is_reference(&self, id: &PointId) -> bool {
        self.get(id).is_some_and(Point::is_reference)
    }

    pub(crate) fn insert(&mut self, point: Point) {
        self.by_id.insert(point.id, point);
    }

    pub(crate) fn remove(&mut self, id: &PointId) -> Option<Point> {
        self.by_id.remove(id)
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl FromIterator<Point> for PointStore {
    fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
        Self {
            by_id: iter.into_iter().map(|p| (p.id, p)).collect(),
        }
    }
}
