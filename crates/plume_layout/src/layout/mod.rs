//! Layout
//!
//! Three passes over a resolved tree:
//!
//! 1. **Intrinsic sizing** (bottom-up): each node's min-content and
//!    max-content border-box sizes, aggregated from its children according
//!    to its own display mode
//! 2. **Size resolution** (top-down): each node resolves its own width and
//!    height against the content box its parent hands down
//! 3. **Positioning**: the node arranges its children by display mode
//!    (block, inline, flex, grid), then places absolutely positioned
//!    children against its padding box
//!
//! Passes 2 and 3 run together in [`LayoutEngine::layout_box`]. When a
//! container needs a child's height before placing it, the child is laid
//! out "dry": its subtree is measured without counting as a layout pass,
//! and the final layout overwrites every bound it wrote.
//!
//! All bounds are border boxes in window coordinates. Sizes are not snapped
//! to whole pixels.

mod absolute;
mod block;
mod flex;
mod grid;
mod inline;
mod intrinsic;

use std::rc::Rc;

use plume_core::{Point, Rect, Size};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::computed::ComputedStyle;
use crate::style::{BoxSizing, Display, Position};
use crate::text_measure::TextMeasurer;
use crate::tree::{WidgetId, WidgetNode};
use crate::values::SizeSpec;

pub use intrinsic::{AxisSizes, IntrinsicSizes};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub(crate) fn of(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }
}

pub(crate) fn is_definite(value: f32) -> bool {
    value.is_finite()
}

/// Shrink-to-fit: the available space, but no less than min-content and no
/// more than max-content
pub(crate) fn fit_content(sizes: &AxisSizes, available: f32) -> f32 {
    if is_definite(available) {
        available.min(sizes.preferred).max(sizes.min)
    } else {
        sizes.preferred
    }
}

/// Size constraints of one box inside a containing block
pub(crate) struct Sizing<'s> {
    style: &'s ComputedStyle,
    intrinsic: IntrinsicSizes,
    /// Containing block; an infinite side is indefinite
    cb: Size,
}

impl<'s> Sizing<'s> {
    pub(crate) fn new(style: &'s ComputedStyle, intrinsic: IntrinsicSizes, cb: Size) -> Self {
        Self {
            style,
            intrinsic,
            cb,
        }
    }

    /// Padding plus borders along `axis`
    pub(crate) fn padding_border(&self, axis: Axis) -> f32 {
        let edges = self.style.padding_border(self.cb.width);
        match axis {
            Axis::Horizontal => edges.horizontal(),
            Axis::Vertical => edges.vertical(),
        }
    }

    fn intrinsic(&self, axis: Axis) -> AxisSizes {
        match axis {
            Axis::Horizontal => self.intrinsic.width,
            Axis::Vertical => self.intrinsic.height,
        }
    }

    fn specs(&self, axis: Axis) -> (SizeSpec, SizeSpec, SizeSpec) {
        let s = self.style;
        match axis {
            Axis::Horizontal => (s.width, s.min_width, s.max_width),
            Axis::Vertical => (s.height, s.min_height, s.max_height),
        }
    }

    /// Border-box size for `spec`; `None` for `auto` and for percentages of
    /// an indefinite containing block
    pub(crate) fn resolve(&self, spec: SizeSpec, axis: Axis, available: f32) -> Option<f32> {
        let pb = self.padding_border(axis);
        let basis = axis.of(self.cb);
        match spec {
            SizeSpec::Auto => None,
            SizeSpec::Length(length) => {
                if !length.is_fixed() && !is_definite(basis) {
                    return None;
                }
                let value = length.resolve(basis).max(0.0);
                Some(match self.style.box_sizing {
                    BoxSizing::ContentBox => value + pb,
                    BoxSizing::BorderBox => value.max(pb),
                })
            }
            SizeSpec::MinContent => Some(self.intrinsic(axis).min),
            SizeSpec::MaxContent => Some(self.intrinsic(axis).preferred),
            SizeSpec::FitContent => Some(fit_content(&self.intrinsic(axis), available)),
        }
    }

    /// The specified width or height, unclamped
    pub(crate) fn preferred(&self, axis: Axis, available: f32) -> Option<f32> {
        self.resolve(self.specs(axis).0, axis, available)
    }

    /// Lower bound; `automatic` stands in for `min-*: auto`
    pub(crate) fn min(&self, axis: Axis, automatic: f32) -> f32 {
        let spec = self.specs(axis).1;
        let min = match spec {
            SizeSpec::Auto => automatic,
            spec => self.resolve(spec, axis, axis.of(self.cb)).unwrap_or(0.0),
        };
        min.max(self.padding_border(axis))
    }

    pub(crate) fn max(&self, axis: Axis) -> f32 {
        let spec = self.specs(axis).2;
        match spec {
            SizeSpec::Auto => f32::INFINITY,
            spec => self
                .resolve(spec, axis, axis.of(self.cb))
                .unwrap_or(f32::INFINITY),
        }
    }

    /// Clamp to min/max; the minimum wins when they conflict
    pub(crate) fn clamp(&self, axis: Axis, value: f32, automatic_min: f32) -> f32 {
        value.min(self.max(axis)).max(self.min(axis, automatic_min))
    }

    /// Specified size clamped, or `None` when it depends on content
    pub(crate) fn definite(&self, axis: Axis, available: f32) -> Option<f32> {
        self.preferred(axis, available)
            .map(|v| self.clamp(axis, v, 0.0))
    }
}

/// Outcome of arranging a node's in-flow children
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Flow {
    pub content_height: f32,
    /// First baseline, from the top of the content box
    pub baseline: Option<f32>,
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Measured {
    pub height: f32,
    /// From the top of the border box
    pub baseline: Option<f32>,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct MeasureKey {
    id: WidgetId,
    width: u32,
    height: Option<u32>,
    cb_width: u32,
    cb_height: u32,
}

pub(crate) struct LayoutEngine<'a> {
    nodes: &'a mut SlotMap<WidgetId, WidgetNode>,
    measurer: &'a dyn TextMeasurer,
    /// Measuring: bounds are provisional and nothing is counted
    dry: bool,
    laid_out: usize,
    measured: FxHashMap<MeasureKey, Measured>,
}

impl<'a> LayoutEngine<'a> {
    pub(crate) fn new(
        nodes: &'a mut SlotMap<WidgetId, WidgetNode>,
        measurer: &'a dyn TextMeasurer,
    ) -> Self {
        Self {
            nodes,
            measurer,
            dry: false,
            laid_out: 0,
            measured: FxHashMap::default(),
        }
    }

    /// Lay out the tree under `root` inside `viewport`; returns the number
    /// of nodes that received final bounds
    pub(crate) fn run(mut self, root: WidgetId, viewport: Size) -> usize {
        self.compute_intrinsic(root);

        let style = self.style(root);
        let cb = viewport;
        let margin = style.margin_px(cb.width);
        let sizing = Sizing::new(&style, self.nodes[root].intrinsic, cb);
        let available = (cb.width - margin.horizontal()).max(0.0);
        let width = sizing.clamp(
            Axis::Horizontal,
            sizing.preferred(Axis::Horizontal, available).unwrap_or(available),
            0.0,
        );
        self.layout_box(root, Point::new(margin.left, margin.top), width, None, cb);
        self.laid_out
    }

    pub(crate) fn style(&self, id: WidgetId) -> Rc<ComputedStyle> {
        Rc::clone(&self.nodes[id].computed)
    }

    pub(crate) fn intrinsic(&self, id: WidgetId) -> IntrinsicSizes {
        self.nodes[id].intrinsic
    }

    /// Children that take part in the parent's layout
    pub(crate) fn in_flow_children(&self, id: WidgetId) -> Vec<WidgetId> {
        self.nodes[id]
            .children
            .iter()
            .copied()
            .filter(|c| self.nodes[*c].computed.is_in_flow())
            .collect()
    }

    /// In-flow children, after collapsing `display: none` ones at `origin`
    pub(crate) fn flow_children(&mut self, id: WidgetId, origin: Point) -> Vec<WidgetId> {
        let children = self.nodes[id].children.clone();
        for &child in &children {
            if self.nodes[child].computed.display == Display::None {
                self.collapse_subtree(child, origin);
            }
        }
        self.in_flow_children(id)
    }

    /// Lay out one box.
    ///
    /// `origin` is the top-left of the border box, `width` its final
    /// border-box width. `forced_height` overrides the height the box would
    /// resolve itself (flex and grid items, inline boxes). `cb` is the
    /// containing block used for percentages; an infinite height is
    /// indefinite. Returns the border-box height.
    pub(crate) fn layout_box(
        &mut self,
        id: WidgetId,
        origin: Point,
        width: f32,
        forced_height: Option<f32>,
        cb: Size,
    ) -> f32 {
        let style = self.style(id);
        if style.display == Display::None {
            self.collapse_subtree(id, origin);
            return 0.0;
        }

        let sizing = Sizing::new(&style, self.nodes[id].intrinsic, cb);
        let pb = style.padding_border(cb.width);
        let height = forced_height.or_else(|| sizing.definite(Axis::Vertical, cb.height));
        let content_height = height.map(|h| (h - pb.vertical()).max(0.0));
        let content = Rect::new(
            origin.x + pb.left,
            origin.y + pb.top,
            (width - pb.horizontal()).max(0.0),
            content_height.unwrap_or(0.0),
        );

        let flow = match style.display {
            Display::Flex => self.layout_flex(id, &style, content, content_height),
            Display::Grid => self.layout_grid(id, &style, content, content_height),
            _ => self.layout_block(id, &style, content, content_height),
        };

        let (own_height, own_baseline) = match self.nodes[id].widget.as_deref() {
            Some(widget) => (
                widget
                    .content_size(&style, self.measurer)
                    .map_or(0.0, |s| s.height),
                widget.baseline(&style, self.measurer),
            ),
            None => (0.0, None),
        };

        let height = height.unwrap_or_else(|| {
            let content = flow.content_height.max(own_height);
            sizing.clamp(Axis::Vertical, content + pb.vertical(), 0.0)
        });
        let bounds = Rect::new(origin.x, origin.y, width, height);
        let node = &mut self.nodes[id];
        node.bounds = bounds;
        node.baseline = own_baseline.or(flow.baseline).map(|b| b + pb.top);

        let padding_box = bounds.inset_by(style.border_widths);
        self.layout_absolute_children(id, padding_box);

        if style.position == Position::Relative {
            let dx = style
                .inset
                .left
                .resolve(cb.width)
                .or_else(|| style.inset.right.resolve(cb.width).map(|r| -r))
                .unwrap_or(0.0);
            let dy = style
                .inset
                .top
                .resolve(cb.height)
                .or_else(|| style.inset.bottom.resolve(cb.height).map(|b| -b))
                .unwrap_or(0.0);
            if dx != 0.0 || dy != 0.0 {
                self.shift_subtree(id, dx, dy);
            }
        }

        if !self.dry {
            let node = &mut self.nodes[id];
            node.needs_layout = false;
            node.stats.layout_passes += 1;
            self.laid_out += 1;
        }
        height
    }

    /// Height and baseline of `id` at border-box `width`, without committing
    /// a layout pass
    pub(crate) fn measure(
        &mut self,
        id: WidgetId,
        width: f32,
        forced_height: Option<f32>,
        cb: Size,
    ) -> Measured {
        let key = MeasureKey {
            id,
            width: width.to_bits(),
            height: forced_height.map(f32::to_bits),
            cb_width: cb.width.to_bits(),
            cb_height: cb.height.to_bits(),
        };
        if let Some(measured) = self.measured.get(&key) {
            return *measured;
        }
        let was_dry = std::mem::replace(&mut self.dry, true);
        let height = self.layout_box(id, Point::ZERO, width, forced_height, cb);
        self.dry = was_dry;
        let measured = Measured {
            height,
            baseline: self.nodes[id].baseline,
        };
        self.measured.insert(key, measured);
        measured
    }

    /// Give a hidden subtree empty bounds
    fn collapse_subtree(&mut self, id: WidgetId, origin: Point) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &mut self.nodes[current];
            node.bounds = Rect::from_origin_size(origin, Size::ZERO);
            node.baseline = None;
            if !self.dry {
                node.needs_layout = false;
            }
            stack.extend(node.children.iter().copied());
        }
    }

    fn shift_subtree(&mut self, id: WidgetId, dx: f32, dy: f32) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &mut self.nodes[current];
            node.bounds = node.bounds.offset(dx, dy);
            stack.extend(node.children.iter().copied());
        }
    }
}
