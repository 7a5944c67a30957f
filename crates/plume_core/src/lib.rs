//! Plume Core
//!
//! Foundational value types shared by every Plume crate:
//!
//! - **Geometry**: points, sizes, rectangles, four-sided edges and corner radii
//! - **Color**: linear RGBA colors with hex parsing
//! - **Transforms**: 2D affine transforms used by painting and hit testing
//! - **Events**: the input event surface consumed by the widget tree
//!
//! Nothing in here knows about styles, themes or the GPU.

pub mod color;
pub mod events;
pub mod geometry;
pub mod transform;

pub use color::Color;
pub use events::{event_types, Event, EventResult, EventType, KeyCode, Modifiers, MouseButton};
pub use geometry::{CornerRadius, Edges, Point, Rect, Size};
pub use transform::Transform2D;
