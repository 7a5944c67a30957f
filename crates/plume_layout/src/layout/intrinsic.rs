//! Pass 1: intrinsic sizes, bottom-up

use plume_core::{Edges, Size};

use super::{Axis, LayoutEngine, Sizing};
use crate::computed::ComputedStyle;
use crate::style::{Display, FlexWrap};
use crate::tree::WidgetId;

/// Intrinsic sizes along one axis, as border-box values
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisSizes {
    /// Smallest size without overflow (min-content)
    pub min: f32,
    /// Size the content asks for when unconstrained (max-content)
    pub preferred: f32,
    /// Largest size the max constraint allows
    pub max: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IntrinsicSizes {
    pub width: AxisSizes,
    pub height: AxisSizes,
}

/// Content-box aggregate of a node's children
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct ContentSizes {
    pub min_width: f32,
    pub max_width: f32,
    pub height: f32,
}

/// Margins used while measuring intrinsic contributions; percentages of the
/// unknown containing block count as zero
pub(super) fn intrinsic_margins(style: &ComputedStyle) -> Edges<f32> {
    let mut margin = style.margin_px(0.0);
    if style.display == Display::Inline {
        margin.top = 0.0;
        margin.bottom = 0.0;
    }
    margin
}

impl LayoutEngine<'_> {
    /// Compute and store intrinsic sizes for the subtree under `root`
    pub(crate) fn compute_intrinsic(&mut self, root: WidgetId) {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id].children.iter().copied());
        }
        // Reverse pre-order visits every child before its parent
        for &id in order.iter().rev() {
            let sizes = self.intrinsic_of(id);
            self.nodes[id].intrinsic = sizes;
        }
    }

    fn intrinsic_of(&mut self, id: WidgetId) -> IntrinsicSizes {
        let style = self.style(id);
        if style.display == Display::None {
            return IntrinsicSizes::default();
        }

        let mut content = match style.display {
            Display::Flex => self.flex_intrinsic(id, &style),
            Display::Grid => self.grid_intrinsic(id, &style),
            _ => self.block_intrinsic(id),
        };
        if let Some(widget) = self.nodes[id].widget.as_deref() {
            if let Some(size) = widget.content_size(&style, self.measurer) {
                content.max_width = content.max_width.max(size.width);
                content.height = content.height.max(size.height);
            }
            if let Some(min) = widget.min_content_width(&style, self.measurer) {
                content.min_width = content.min_width.max(min);
            }
        }

        let pb = style.padding_border(0.0);
        let mut sizes = IntrinsicSizes {
            width: AxisSizes {
                min: content.min_width + pb.horizontal(),
                preferred: content.max_width.max(content.min_width) + pb.horizontal(),
                max: f32::INFINITY,
            },
            height: AxisSizes {
                min: content.height + pb.vertical(),
                preferred: content.height + pb.vertical(),
                max: f32::INFINITY,
            },
        };

        // Inline boxes ignore width and height
        if style.display == Display::Inline {
            return sizes;
        }

        let indefinite = Size::new(f32::INFINITY, f32::INFINITY);
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let sizing = Sizing::new(&style, sizes, indefinite);
            let explicit = sizing.preferred(axis, f32::INFINITY);
            let max = sizing.max(axis);
            let min = sizing.min(axis, 0.0);
            let clamp = |v: f32| v.min(max).max(min);
            let target = match axis {
                Axis::Horizontal => &mut sizes.width,
                Axis::Vertical => &mut sizes.height,
            };
            if let Some(value) = explicit {
                target.min = value;
                target.preferred = value;
            }
            target.min = clamp(target.min);
            target.preferred = clamp(target.preferred);
            target.max = max.max(min);
        }
        sizes
    }

    /// Block container: block children stack, inline runs sit on one line
    fn block_intrinsic(&self, id: WidgetId) -> ContentSizes {
        let mut out = ContentSizes::default();
        let mut run: Option<ContentSizes> = None;
        let flush = |out: &mut ContentSizes, run: &mut Option<ContentSizes>| {
            if let Some(r) = run.take() {
                out.min_width = out.min_width.max(r.min_width);
                out.max_width = out.max_width.max(r.max_width);
                out.height += r.height;
            }
        };

        for child in self.in_flow_children(id) {
            let style = &self.nodes[child].computed;
            let sizes = self.nodes[child].intrinsic;
            let margin = intrinsic_margins(style);
            let outer_min = sizes.width.min + margin.horizontal();
            let outer_max = sizes.width.preferred + margin.horizontal();
            let outer_height = sizes.height.preferred + margin.vertical();

            if style.display.is_inline_level() {
                let r = run.get_or_insert_with(ContentSizes::default);
                r.min_width = r.min_width.max(outer_min);
                r.max_width += outer_max;
                r.height = r.height.max(outer_height);
            } else {
                flush(&mut out, &mut run);
                out.min_width = out.min_width.max(outer_min);
                out.max_width = out.max_width.max(outer_max);
                out.height += outer_height;
            }
        }
        flush(&mut out, &mut run);
        out
    }

    /// Flex container: sum along the main axis, max across it, gaps added
    /// once per boundary between items
    fn flex_intrinsic(&self, id: WidgetId, style: &ComputedStyle) -> ContentSizes {
        let children = self.in_flow_children(id);
        let row = style.flex_direction.is_row();
        let boundaries = children.len().saturating_sub(1) as f32;
        let main_gap = if row {
            style.column_gap.resolve(f32::INFINITY)
        } else {
            style.row_gap.resolve(f32::INFINITY)
        };

        let mut out = ContentSizes::default();
        for &child in &children {
            let sizes = self.nodes[child].intrinsic;
            let margin = intrinsic_margins(&self.nodes[child].computed);
            let outer_min = sizes.width.min + margin.horizontal();
            let outer_max = sizes.width.preferred + margin.horizontal();
            let outer_height = sizes.height.preferred + margin.vertical();
            if row {
                out.min_width = if style.flex_wrap == FlexWrap::Wrap {
                    out.min_width.max(outer_min)
                } else {
                    out.min_width + outer_min
                };
                out.max_width += outer_max;
                out.height = out.height.max(outer_height);
            } else {
                out.min_width = out.min_width.max(outer_min);
                out.max_width = out.max_width.max(outer_max);
                out.height += outer_height;
            }
        }

        if row {
            out.max_width += main_gap * boundaries;
            if style.flex_wrap != FlexWrap::Wrap {
                out.min_width += main_gap * boundaries;
            }
        } else {
            out.height += main_gap * boundaries;
        }
        out
    }
}
