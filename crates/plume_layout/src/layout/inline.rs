//! Line boxes for inline-level children
//!
//! Items are placed left to right and wrap greedily when the next one would
//! overflow the line. Pure `inline` boxes ignore width, height and vertical
//! margins; `inline-block` boxes honour them.

use std::ops::Range;

use plume_core::{Edges, Point, Rect, Size};

use super::{fit_content, Axis, LayoutEngine, Sizing};
use crate::computed::ComputedStyle;
use crate::style::{Display, TextAlign, VerticalAlign};
use crate::tree::WidgetId;

/// Tolerance for float error when deciding whether an item still fits
const FIT_EPSILON: f32 = 0.01;

pub(super) struct LineRun {
    pub height: f32,
    /// First baseline, from the top of the run
    pub baseline: Option<f32>,
}

struct InlineItem {
    id: WidgetId,
    width: f32,
    height: f32,
    margin: Edges<f32>,
    /// Distance from the top margin edge to the baseline
    ascent: f32,
    align: VerticalAlign,
}

impl InlineItem {
    fn outer_width(&self) -> f32 {
        self.width + self.margin.horizontal()
    }

    fn outer_height(&self) -> f32 {
        self.height + self.margin.vertical()
    }
}

/// Greedy line breaking over outer widths
fn break_lines(widths: &[f32], available: f32) -> Vec<Range<usize>> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut used = 0.0;
    for (i, width) in widths.iter().enumerate() {
        if i > start && used + width > available + FIT_EPSILON {
            lines.push(start..i);
            start = i;
            used = 0.0;
        }
        used += width;
    }
    if start < widths.len() {
        lines.push(start..widths.len());
    }
    lines
}

impl LayoutEngine<'_> {
    pub(super) fn layout_inline_run(
        &mut self,
        container: &ComputedStyle,
        children: &[WidgetId],
        content: Rect,
        top: f32,
        cb: Size,
    ) -> LineRun {
        let items: Vec<InlineItem> = children
            .iter()
            .map(|&id| self.inline_item(id, cb))
            .collect();

        let widths: Vec<f32> = items.iter().map(InlineItem::outer_width).collect();
        let lines = break_lines(&widths, cb.width);

        let mut y = top;
        let mut baseline = None;
        for (index, range) in lines.iter().enumerate() {
            let line = &items[range.clone()];

            let mut ascent: f32 = 0.0;
            let mut descent: f32 = 0.0;
            let mut other: f32 = 0.0;
            for item in line {
                if item.align == VerticalAlign::Baseline {
                    ascent = ascent.max(item.ascent);
                    descent = descent.max(item.outer_height() - item.ascent);
                } else {
                    other = other.max(item.outer_height());
                }
            }
            let line_height = (ascent + descent).max(other);

            let used: f32 = line.iter().map(InlineItem::outer_width).sum();
            let free = (cb.width - used).max(0.0);
            let last = index + 1 == lines.len();
            let (mut x, spacing) = match container.text_align {
                TextAlign::Left => (0.0, 0.0),
                TextAlign::Right => (free, 0.0),
                TextAlign::Center => (free / 2.0, 0.0),
                TextAlign::Justify if line.len() > 1 && !last => {
                    (0.0, free / (line.len() - 1) as f32)
                }
                TextAlign::Justify => (0.0, 0.0),
            };

            for item in line {
                let offset = match item.align {
                    VerticalAlign::Top => 0.0,
                    VerticalAlign::Bottom => line_height - item.outer_height(),
                    VerticalAlign::Middle => (line_height - item.outer_height()) / 2.0,
                    VerticalAlign::Baseline => ascent - item.ascent,
                };
                let origin = Point::new(
                    content.x() + x + item.margin.left,
                    content.y() + y + offset + item.margin.top,
                );
                self.layout_box(item.id, origin, item.width, Some(item.height), cb);
                x += item.outer_width() + spacing;
            }

            if baseline.is_none() && ascent > 0.0 {
                baseline = Some(y - top + ascent);
            }
            y += line_height;
        }

        LineRun {
            height: y - top,
            baseline,
        }
    }

    fn inline_item(&mut self, id: WidgetId, cb: Size) -> InlineItem {
        let style = self.style(id);
        let intrinsic = self.intrinsic(id);
        let mut margin = style.margin_px(cb.width);

        let (width, forced_height) = if style.display == Display::Inline {
            margin.top = 0.0;
            margin.bottom = 0.0;
            (intrinsic.width.preferred, Some(intrinsic.height.preferred))
        } else {
            let sizing = Sizing::new(&style, intrinsic, cb);
            let available = (cb.width - margin.horizontal()).max(0.0);
            let width = sizing
                .preferred(Axis::Horizontal, available)
                .unwrap_or_else(|| fit_content(&intrinsic.width, available));
            (sizing.clamp(Axis::Horizontal, width, 0.0), None)
        };

        let measured = self.measure(id, width, forced_height, cb);
        // Boxes without a baseline sit on their bottom margin edge
        let ascent = match measured.baseline {
            Some(b) => margin.top + b,
            None => measured.height + margin.vertical(),
        };
        InlineItem {
            id,
            width,
            height: measured.height,
            margin,
            ascent,
            align: style.vertical_align,
        }
    }
}
