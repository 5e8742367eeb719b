pub mod message;
pub mod point;
pub mod shape;

pub use message::{DraftMessage, DraftStore, Message, MessageId, MessageStore, PointContainer, Shapes};
pub use point::{Point, PointId, PointStore, ReferenceData};
pub use shape::{ParseError, Region, Shape};
