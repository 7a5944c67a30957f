//! Absolutely positioned children, placed against the parent's padding box
//! after its in-flow content

use plume_core::{Point, Rect, Size};

use super::{fit_content, Axis, LayoutEngine, Sizing};
use crate::style::Display;
use crate::tree::WidgetId;

impl LayoutEngine<'_> {
    pub(super) fn layout_absolute_children(&mut self, id: WidgetId, padding_box: Rect) {
        let positioned: Vec<WidgetId> = self.nodes[id]
            .children
            .iter()
            .copied()
            .filter(|c| self.nodes[*c].computed.is_absolute())
            .collect();
        for child in positioned {
            self.layout_absolute(child, padding_box);
        }
    }

    fn layout_absolute(&mut self, id: WidgetId, cb_rect: Rect) {
        let style = self.style(id);
        if style.display == Display::None {
            self.layout_box(id, cb_rect.origin, 0.0, None, Size::ZERO);
            return;
        }

        let cb = cb_rect.size();
        let margin = style.margin_px(cb.width);
        let left = style.inset.left.resolve(cb.width);
        let right = style.inset.right.resolve(cb.width);
        let top = style.inset.top.resolve(cb.height);
        let bottom = style.inset.bottom.resolve(cb.height);

        let intrinsic = self.intrinsic(id);
        let sizing = Sizing::new(&style, intrinsic, cb);

        let width = match (sizing.preferred(Axis::Horizontal, cb.width), left, right) {
            (Some(w), _, _) => w,
            (None, Some(l), Some(r)) => (cb.width - l - r - margin.horizontal()).max(0.0),
            (None, _, _) => {
                let available = cb.width - left.unwrap_or(0.0) - right.unwrap_or(0.0);
                fit_content(&intrinsic.width, (available - margin.horizontal()).max(0.0))
            }
        };
        let width = sizing.clamp(Axis::Horizontal, width, 0.0);

        let x = match (left, right) {
            (Some(l), _) => l + margin.left,
            (None, Some(r)) => cb.width - r - margin.right - width,
            (None, None) => margin.left,
        };

        // Stretched between top and bottom; otherwise the box sizes itself
        let forced_height = match (sizing.definite(Axis::Vertical, cb.height), top, bottom) {
            (Some(_), _, _) => None,
            (None, Some(t), Some(b)) => Some(sizing.clamp(
                Axis::Vertical,
                (cb.height - t - b - margin.vertical()).max(0.0),
                0.0,
            )),
            (None, _, _) => None,
        };

        let y = match (top, bottom) {
            (Some(t), _) => t + margin.top,
            (None, Some(b)) => {
                let height = match forced_height.or(sizing.definite(Axis::Vertical, cb.height)) {
                    Some(h) => h,
                    None => self.measure(id, width, None, cb).height,
                };
                cb.height - b - margin.bottom - height
            }
            (None, None) => margin.top,
        };

        let origin = Point::new(cb_rect.x() + x, cb_rect.y() + y);
        self.layout_box(id, origin, width, forced_height, cb);
    }
}
