//! Widget capabilities
//!
//! A widget is composed of three small capabilities instead of a class
//! hierarchy:
//!
//! - [`Measurable`]: intrinsic content size and baseline
//! - [`Paintable`]: drawing inside the content box
//! - [`EventTarget`]: reacting to routed input
//!
//! Box model, background, border and children are handled by the tree for
//! every node; a widget only supplies what is specific to its content.

use std::any::Any;

use plume_core::{Event, EventResult, Rect, Size};
use plume_paint::PaintSurface;

use crate::computed::ComputedStyle;
use crate::event::EventContext;
use crate::text_measure::TextMeasurer;

/// Intrinsic content measurement
pub trait Measurable {
    /// Content-box size the widget's own content asks for, before children
    fn content_size(&self, _style: &ComputedStyle, _measurer: &dyn TextMeasurer) -> Option<Size> {
        None
    }

    /// Narrowest content width without overflow
    fn min_content_width(&self, style: &ComputedStyle, measurer: &dyn TextMeasurer) -> Option<f32> {
        self.content_size(style, measurer).map(|s| s.width)
    }

    /// Distance from the top of the content box to the first baseline
    fn baseline(&self, _style: &ComputedStyle, _measurer: &dyn TextMeasurer) -> Option<f32> {
        None
    }
}

/// Everything a widget may use while painting its content
pub struct ContentPaint<'a> {
    pub surface: &'a mut dyn PaintSurface,
    pub border_box: Rect,
    pub content_box: Rect,
    pub style: &'a ComputedStyle,
    pub measurer: &'a dyn TextMeasurer,
    /// Accumulated opacity of this node and its ancestors
    pub opacity: f32,
}

pub trait Paintable {
    fn paint_content(&self, _cx: &mut ContentPaint<'_>) {}
}

pub trait EventTarget {
    fn handle_event(&mut self, _event: &Event, _cx: &mut EventContext) -> EventResult {
        EventResult::Ignored
    }

    /// Whether pointer down moves keyboard focus here
    fn focusable(&self) -> bool {
        false
    }
}

/// Downcasting support, implemented for every `'static` type
pub trait AsAny: 'static {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: 'static> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A concrete widget kind attached to a tree node
pub trait Widget: Measurable + Paintable + EventTarget + AsAny {
    fn type_name(&self) -> &'static str;
}
