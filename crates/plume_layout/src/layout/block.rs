//! Block flow: block-level children stack vertically and fill the available
//! width; runs of inline-level children are formatted into line boxes

use plume_core::{Point, Rect, Size};

use super::{Axis, Flow, LayoutEngine, Sizing};
use crate::computed::ComputedStyle;
use crate::tree::WidgetId;

impl LayoutEngine<'_> {
    pub(super) fn layout_block(
        &mut self,
        id: WidgetId,
        style: &ComputedStyle,
        content: Rect,
        content_height: Option<f32>,
    ) -> Flow {
        let cb = Size::new(content.width(), content_height.unwrap_or(f32::INFINITY));
        let children = self.flow_children(id, content.origin);
        let mut y = 0.0;
        let mut baseline = None;

        let mut i = 0;
        while i < children.len() {
            let child = children[i];
            let child_style = self.style(child);

            if child_style.display.is_inline_level() {
                let end = children[i..]
                    .iter()
                    .position(|c| !self.nodes[*c].computed.display.is_inline_level())
                    .map_or(children.len(), |p| i + p);
                let run = self.layout_inline_run(style, &children[i..end], content, y, cb);
                if baseline.is_none() {
                    baseline = run.baseline.map(|b| y + b);
                }
                y += run.height;
                i = end;
                continue;
            }

            let margin = child_style.margin_px(cb.width);
            let auto = child_style.margin_auto();
            let sizing = Sizing::new(&child_style, self.intrinsic(child), cb);
            let available = (cb.width - margin.horizontal()).max(0.0);
            let width = sizing.clamp(
                Axis::Horizontal,
                sizing.preferred(Axis::Horizontal, available).unwrap_or(available),
                0.0,
            );

            // `margin: auto` takes up whatever the width leaves over
            let mut left = margin.left;
            let free = available - width;
            if free > 0.0 {
                match (auto.left, auto.right) {
                    (true, true) => left += free / 2.0,
                    (true, false) => left += free,
                    _ => {}
                }
            }

            let origin = Point::new(content.x() + left, content.y() + y + margin.top);
            let height = self.layout_box(child, origin, width, None, cb);
            if baseline.is_none() {
                baseline = self.nodes[child].baseline.map(|b| y + margin.top + b);
            }
            y += margin.top + height + margin.bottom;
            i += 1;
        }

        Flow {
            content_height: y,
            baseline,
        }
    }
}
