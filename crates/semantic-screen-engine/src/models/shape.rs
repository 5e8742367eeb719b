use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown shape: {0}")]
    UnknownShape(String),
    #[error("Unknown region: {0}")]
    UnknownRegion(String),
}

/// One of the seven fixed semantic categories a point belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Facts,
    Thoughts,
    Feelings,
    Needs,
    Topics,
    Actions,
    People,
}

impl Shape {
    /// All shapes in their fixed enumeration order.
    ///
    /// Anything that picks "the first remaining point" walks shapes in this order.
    pub const ALL: [Shape; 7] = [
        Shape::Facts,
        Shape::Thoughts,
        Shape::Feelings,
        Shape::Needs,
        Shape::Topics,
        Shape::Actions,
        Shape::People,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Facts => "facts",
            Shape::Thoughts => "thoughts",
            Shape::Feelings => "feelings",
            Shape::Needs => "needs",
            Shape::Topics => "topics",
            Shape::Actions => "actions",
            Shape::People => "people",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shape {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.as_str() == s)
            .ok_or_else(|| ParseError::UnknownShape(s.to_string()))
    }
}

/// A drop target on the semantic screen
///
/// Points can only land in shape regions; `Focus` and `Merits` exist so that
/// hovering over them can be represented and then ignored by move commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Region {
    Shape(Shape),
    Focus,
    Merits,
}

impl Region {
    pub fn shape(&self) -> Option<Shape> {
        match self {
            Region::Shape(shape) => Some(*shape),
            Region::Focus | Region::Merits => None,
        }
    }
}

impl From<Shape> for Region {
    fn from(shape: Shape) -> Self {
        Region::Shape(shape)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Shape(shape) => shape.fmt(f),
            Region::Focus => f.write_str("focus"),
            Region::Merits => f.write_str("merits"),
        }
    }
}

impl FromStr for Region {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focus" => Ok(Region::Focus),
            "merits" => Ok(Region::Merits),
            other => other
                .parse::<Shape>()
                .map(Region::Shape)
                .map_err(|_| ParseError::UnknownRegion(other.to_string())),
        }
    }
}

impl TryFrom<String> for Region {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.to_string()
    }
}
