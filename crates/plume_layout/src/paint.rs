//! Tree painting
//!
//! Each visible node paints, in order: box shadows, its widget quad
//! (background, border and outline in one draw), background layers inside
//! the padding box, and finally the widget's own content. Children follow,
//! in-flow ones before positioned ones.

use plume_core::{Edges, Rect};
use plume_paint::{GradientStop, GradientStops, PaintSurface, ShadowPaint, WidgetPaint};

use crate::computed::{ComputedBackground, ComputedStyle};
use crate::style::{Display, Overflow, Visibility};
use crate::text_measure::TextMeasurer;
use crate::tree::{WidgetId, WidgetTree};
use crate::widget::ContentPaint;

fn faded(stops: &[GradientStop], opacity: f32) -> GradientStops {
    stops
        .iter()
        .map(|s| GradientStop::new(s.offset, s.color.fade(opacity)))
        .collect()
}

/// The single quad carrying background, border and outline
pub(crate) fn widget_paint(style: &ComputedStyle, bounds: Rect, opacity: f32) -> WidgetPaint {
    let outline_color = style
        .outline_colors
        .to_array()
        .into_iter()
        .find(|c| !c.is_transparent())
        .unwrap_or(style.outline_colors.top);
    WidgetPaint::new(bounds, style.background_color.fade(opacity))
        .with_radius(style.border_radius.clamped_to(bounds.size))
        .with_border_sides(
            style.border_widths,
            style.border_colors.map(|c| c.fade(opacity)),
        )
        .with_outline(
            style.outline_widths.max_side(),
            style.outline_offset,
            outline_color.fade(opacity),
        )
}

impl WidgetTree {
    /// Paint the tree as of the last resolve
    pub fn paint(&self, surface: &mut dyn PaintSurface, measurer: &dyn TextMeasurer) {
        if let Some(root) = self.root() {
            let cb_width = self.viewport().width;
            self.paint_node(root, surface, measurer, 1.0, cb_width);
        }
    }

    fn paint_node(
        &self,
        id: WidgetId,
        surface: &mut dyn PaintSurface,
        measurer: &dyn TextMeasurer,
        parent_opacity: f32,
        cb_width: f32,
    ) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let style = &node.computed;
        let opacity = parent_opacity * style.opacity;
        if style.display == Display::None || opacity <= 0.0 {
            return;
        }

        let bounds = node.bounds;
        let transformed = !style.transform.is_identity();
        if transformed {
            surface.push_transform(style.transform.about(bounds.center()));
        }

        let content_box = bounds.inset_by(style.padding_border(cb_width));
        if style.visibility == Visibility::Visible {
            self.paint_box(style, bounds, surface, opacity);
            if let Some(widget) = node.widget.as_deref() {
                let mut cx = ContentPaint {
                    surface: &mut *surface,
                    border_box: bounds,
                    content_box,
                    style,
                    measurer,
                    opacity,
                };
                widget.paint_content(&mut cx);
            }
        }

        let clip = style.overflow == Overflow::Hidden;
        if clip {
            surface.push_clip(bounds.inset_by(style.border_widths));
        }
        let (positioned, in_flow): (Vec<WidgetId>, Vec<WidgetId>) = node
            .children
            .iter()
            .partition(|c| self.nodes[**c].computed.is_absolute());
        for child in in_flow.into_iter().chain(positioned) {
            self.paint_node(child, surface, measurer, opacity, content_box.width());
        }
        if clip {
            surface.pop_clip();
        }

        if transformed {
            surface.pop_transform();
        }
    }

    fn paint_box(
        &self,
        style: &ComputedStyle,
        bounds: Rect,
        surface: &mut dyn PaintSurface,
        opacity: f32,
    ) {
        let radius = style.border_radius.clamped_to(bounds.size);

        for shadow in &style.box_shadows {
            let color = shadow.color.fade(opacity);
            if color.is_transparent() {
                continue;
            }
            surface.draw_shadow(&ShadowPaint {
                rect: bounds
                    .offset(shadow.offset_x, shadow.offset_y)
                    .outset_by(Edges::all(shadow.spread)),
                radius: radius.grow(shadow.spread),
                blur: shadow.blur,
                color,
            });
        }

        let quad = widget_paint(style, bounds, opacity);
        if quad.is_visible() {
            surface.draw_widget(&quad);
        }

        if style.background_layers.is_empty() {
            return;
        }
        let padding_box = bounds.inset_by(style.border_widths);
        let inner = radius.shrink(style.border_widths);
        for layer in &style.background_layers {
            match layer {
                ComputedBackground::Color(color) => {
                    surface.draw_rounded_rect(padding_box, inner, color.fade(opacity));
                }
                ComputedBackground::LinearGradient { angle, stops } => {
                    let stops = faded(stops, opacity);
                    surface.draw_linear_gradient(padding_box, inner, *angle, &stops);
                }
                ComputedBackground::RadialGradient {
                    center,
                    radius,
                    stops,
                } => {
                    surface.draw_radial_gradient(
                        padding_box,
                        inner,
                        *center,
                        *radius,
                        &faded(stops, opacity),
                    );
                }
                ComputedBackground::ConicGradient {
                    center,
                    angle,
                    stops,
                } => {
                    surface.draw_conic_gradient(
                        padding_box,
                        inner,
                        *center,
                        *angle,
                        &faded(stops, opacity),
                    );
                }
                ComputedBackground::Image { image, tint } => {
                    surface.draw_image(padding_box, inner, *image, tint.fade(opacity));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use plume_core::{Color, Size, Transform2D};
    use plume_paint::{PaintCommand, PaintContext};
    use plume_theme::ScaledTheme;

    use super::*;
    use crate::style::WidgetStyle;
    use crate::text_measure::EstimatedTextMeasurer;

    fn resolved(tree: &mut WidgetTree) -> PaintContext {
        tree.set_viewport(Size::new(300.0, 300.0));
        tree.resolve(&ScaledTheme::default(), &EstimatedTextMeasurer);
        let mut cx = PaintContext::new();
        tree.paint(&mut cx, &EstimatedTextMeasurer);
        cx
    }

    #[test]
    fn test_paint_order_and_opacity() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(WidgetStyle::new().background(Color::WHITE).opacity(0.5));
        let child = tree.insert(
            WidgetStyle::new()
                .size(10.0, 10.0)
                .background(Color::RED)
                .opacity(0.5),
        );
        tree.set_root(root);
        tree.add_child(root, child);

        let cx = resolved(&mut tree);
        let fills: Vec<f32> = cx.widgets().map(|w| w.fill.a).collect();
        assert_eq!(fills, vec![0.5, 0.25]);
        assert!(cx.is_balanced());
    }

    #[test]
    fn test_hidden_nodes_keep_children_painting() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(WidgetStyle::new().background(Color::WHITE));
        let hidden = tree.insert(
            WidgetStyle::new()
                .background(Color::RED)
                .visibility(Visibility::Hidden),
        );
        let shown = tree.insert(
            WidgetStyle::new()
                .size(5.0, 5.0)
                .background(Color::BLUE)
                .visibility(Visibility::Visible),
        );
        let gone = tree.insert(WidgetStyle::new().background(Color::GREEN).hidden());
        tree.set_root(root);
        tree.add_child(root, hidden);
        tree.add_child(hidden, shown);
        tree.add_child(root, gone);

        let cx = resolved(&mut tree);
        let fills: Vec<Color> = cx.widgets().map(|w| w.fill).collect();
        assert_eq!(fills, vec![Color::WHITE, Color::BLUE]);
    }

    #[test]
    fn test_overflow_and_transform_are_balanced() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(
            WidgetStyle::new()
                .overflow_hidden()
                .transform(Transform2D::scale(2.0, 2.0)),
        );
        tree.set_root(root);
        let cx = resolved(&mut tree);
        let commands = cx.commands();
        assert!(matches!(commands.first(), Some(PaintCommand::PushTransform { .. })));
        assert!(commands
            .iter()
            .any(|c| matches!(c, PaintCommand::PushClip { .. })));
        assert!(cx.is_balanced());
    }
}
