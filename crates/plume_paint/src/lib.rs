//! Plume Paint
//!
//! The drawing contract between the widget tree and a renderer.
//!
//! # Features
//!
//! - [`PaintSurface`]: the only way the widget tree reaches pixels
//! - [`WidgetPaint`]: one rounded quad carrying background, border and outline,
//!   composited in a single pass by renderers
//! - Linear, radial and conic gradients
//! - [`PaintContext`]: a recording surface for tests and tooling
//! - [`sdf`]: CPU reference of the rounded-rect distance function the GPU
//!   shader evaluates, shared with hit testing

pub mod context;
pub mod gradient;
pub mod sdf;
pub mod surface;

pub use context::{PaintCommand, PaintContext};
pub use gradient::{Gradient, GradientStop, GradientStops};
pub use surface::{ImageId, PaintSurface, ShadowPaint, TextRun, WidgetPaint};
