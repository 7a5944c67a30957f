//! The renderer surface contract

use plume_core::{Color, CornerRadius, Edges, Point, Rect, Transform2D};

use crate::gradient::GradientStop;

/// Handle to an image registered with a renderer (icons, image backgrounds)
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct ImageId(pub u32);

/// One widget quad: background, border ring and outline ring.
///
/// Renderers must composite all three in a single pass so that semi-transparent
/// edges are blended exactly once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WidgetPaint {
    /// Border box
    pub rect: Rect,
    pub fill: Color,
    pub radius: CornerRadius,
    pub border_widths: Edges<f32>,
    pub border_colors: Edges<Color>,
    pub outline_width: f32,
    /// Gap between the border box and the outline ring
    pub outline_offset: f32,
    pub outline_color: Color,
}

impl WidgetPaint {
    pub fn new(rect: Rect, fill: Color) -> Self {
        Self {
            rect,
            fill,
            radius: CornerRadius::ZERO,
            border_widths: Edges::ZERO,
            border_colors: Edges::all(Color::TRANSPARENT),
            outline_width: 0.0,
            outline_offset: 0.0,
            outline_color: Color::TRANSPARENT,
        }
    }

    pub fn with_radius(mut self, radius: impl Into<CornerRadius>) -> Self {
        self.radius = radius.into();
        self
    }

    pub fn with_border(mut self, width: f32, color: Color) -> Self {
        self.border_widths = Edges::all(width);
        self.border_colors = Edges::all(color);
        self
    }

    pub fn with_border_sides(mut self, widths: Edges<f32>, colors: Edges<Color>) -> Self {
        self.border_widths = widths;
        self.border_colors = colors;
        self
    }

    pub fn with_outline(mut self, width: f32, offset: f32, color: Color) -> Self {
        self.outline_width = width;
        self.outline_offset = offset;
        self.outline_color = color;
        self
    }

    pub fn has_border(&self) -> bool {
        self.border_widths.max_side() > 0.0
            && self
                .border_colors
                .to_array()
                .iter()
                .any(|c| !c.is_transparent())
    }

    pub fn has_outline(&self) -> bool {
        self.outline_width > 0.0 && !self.outline_color.is_transparent()
    }

    /// Whether painting this quad would change any pixel
    pub fn is_visible(&self) -> bool {
        !self.rect.size.is_empty()
            && (!self.fill.is_transparent() || self.has_border() || self.has_outline())
    }

    /// Area touched by the quad, including the outline ring
    pub fn paint_bounds(&self) -> Rect {
        if self.has_outline() {
            self.rect
                .outset_by(Edges::all(self.outline_offset.max(0.0) + self.outline_width))
        } else {
            self.rect
        }
    }
}

/// A single run of text positioned on its baseline
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Left end of the baseline
    pub origin: Point,
    pub font_family: String,
    pub font_size: f32,
    /// CSS numeric weight
    pub font_weight: u16,
    pub color: Color,
}

/// A soft shadow under a rounded rect
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowPaint {
    /// Shadow shape, already offset and spread
    pub rect: Rect,
    pub radius: CornerRadius,
    pub blur: f32,
    pub color: Color,
}

/// Everything the widget tree can ask a renderer to draw.
///
/// The rect, outline and circle helpers have default implementations that
/// specialize [`PaintSurface::draw_widget`], so a renderer only needs one
/// rounded-quad pipeline to support them.
pub trait PaintSurface {
    /// Single-pass background + border + outline quad
    fn draw_widget(&mut self, widget: &WidgetPaint);

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32);

    fn draw_text(&mut self, run: &TextRun);

    fn draw_linear_gradient(
        &mut self,
        rect: Rect,
        radius: CornerRadius,
        angle: f32,
        stops: &[GradientStop],
    );

    fn draw_radial_gradient(
        &mut self,
        rect: Rect,
        radius: CornerRadius,
        center: Point,
        extent: f32,
        stops: &[GradientStop],
    );

    fn draw_conic_gradient(
        &mut self,
        rect: Rect,
        radius: CornerRadius,
        center: Point,
        angle: f32,
        stops: &[GradientStop],
    );

    fn draw_shadow(&mut self, shadow: &ShadowPaint);

    fn draw_image(&mut self, rect: Rect, radius: CornerRadius, image: ImageId, tint: Color);

    fn push_clip(&mut self, rect: Rect);

    fn pop_clip(&mut self);

    fn push_transform(&mut self, transform: Transform2D);

    fn pop_transform(&mut self);

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.draw_widget(&WidgetPaint::new(rect, color));
    }

    fn draw_rounded_rect(&mut self, rect: Rect, radius: CornerRadius, color: Color) {
        self.draw_widget(&WidgetPaint::new(rect, color).with_radius(radius));
    }

    fn draw_rect_outline(&mut self, rect: Rect, color: Color, width: f32) {
        self.draw_widget(&WidgetPaint::new(rect, Color::TRANSPARENT).with_border(width, color));
    }

    fn draw_circle(&mut self, center: Point, radius: f32, color: Color) {
        let rect = Rect::new(
            center.x - radius,
            center.y - radius,
            radius * 2.0,
            radius * 2.0,
        );
        self.draw_widget(&WidgetPaint::new(rect, color).with_radius(radius));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_bounds_include_outline() {
        let w = WidgetPaint::new(Rect::new(10.0, 10.0, 20.0, 20.0), Color::WHITE)
            .with_outline(2.0, 1.0, Color::BLUE);
        assert_eq!(w.paint_bounds(), Rect::new(7.0, 7.0, 26.0, 26.0));
    }

    #[test]
    fn test_visibility() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!WidgetPaint::new(rect, Color::TRANSPARENT).is_visible());
        assert!(WidgetPaint::new(rect, Color::TRANSPARENT)
            .with_border(1.0, Color::BLACK)
            .is_visible());
        assert!(!WidgetPaint::new(Rect::ZERO, Color::WHITE).is_visible());
    }
}
