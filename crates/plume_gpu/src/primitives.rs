//! GPU primitive packing
//!
//! Defines GPU-ready data structures that match the shader layouts. All
//! structures use `#[repr(C)]` and implement `bytemuck::Pod` for safe GPU
//! buffer copies. Every shape is one instance of a six-vertex quad; the
//! fragment shader picks its SDF by [`PrimitiveKind`].

use plume_core::{Color, CornerRadius, Edges, Point, Rect, Transform2D};
use plume_paint::gradient::resample_stops;
use plume_paint::{GradientStop, ShadowPaint, WidgetPaint};
use tracing::warn;

/// Stops packed per gradient; longer ramps are resampled
pub const MAX_GRADIENT_STOPS: usize = 4;

/// Primitive types (must match shader constants)
#[repr(u32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// Background, border and outline in one pass
    #[default]
    Widget = 0,
    LinearGradient = 1,
    RadialGradient = 2,
    ConicGradient = 3,
    Shadow = 4,
    Line = 5,
    /// Textured rounded rect; drawn by the image pipeline
    Image = 6,
}

/// Per-frame uniforms
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    /// Target size in pixels
    pub viewport: [f32; 2],
    /// Half-width of the anti-aliasing ramp in pixels
    pub aa_radius: f32,
    pub _padding: f32,
}

/// A GPU primitive ready for rendering (matches shader `Primitive` struct)
///
/// Memory layout: 21 × `vec4` (336 bytes). Positions are in the local space
/// of `transform`; the vertex shader maps them to the target.
///
/// Kind-specific fields:
/// - `Widget`: `params` is the inner (padding) rect and `shape` its radii,
///   `info.z`/`info.w` flag border and outline
/// - gradients: `params` carries geometry, `stop_*` the color ramp
/// - `Shadow`: `shape.x` is the blur sigma
/// - `Line`: `params` holds both end points, `shape.x` the half width
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuPrimitive {
    /// Area covered by the quad (x, y, width, height)
    pub quad: [f32; 4],
    /// Shape rect (x, y, width, height)
    pub bounds: [f32; 4],
    /// Corner radii (top-left, top-right, bottom-right, bottom-left)
    pub radius: [f32; 4],
    /// Fill color, or tint for images
    pub fill: [f32; 4],
    /// Border widths (top, right, bottom, left)
    pub border_widths: [f32; 4],
    /// Border colors (top, right, bottom, left)
    pub border_colors: [[f32; 4]; 4],
    /// Outline (width, offset, 0, 0)
    pub outline: [f32; 4],
    pub outline_color: [f32; 4],
    /// Affine matrix (a, b, c, d)
    pub transform_a: [f32; 4],
    /// Affine translation (tx, ty, 0, 0)
    pub transform_b: [f32; 4],
    pub params: [f32; 4],
    pub shape: [f32; 4],
    pub stop_offsets: [f32; 4],
    pub stop_colors: [[f32; 4]; 4],
    /// (kind, stop count, flag, flag)
    pub info: [u32; 4],
}

impl Default for GpuPrimitive {
    fn default() -> Self {
        let [a, b, c, d, tx, ty] = Transform2D::IDENTITY.elements;
        Self {
            quad: [0.0; 4],
            bounds: [0.0; 4],
            radius: [0.0; 4],
            fill: [0.0; 4],
            border_widths: [0.0; 4],
            border_colors: [[0.0; 4]; 4],
            outline: [0.0; 4],
            outline_color: [0.0; 4],
            transform_a: [a, b, c, d],
            transform_b: [tx, ty, 0.0, 0.0],
            params: [0.0; 4],
            shape: [0.0; 4],
            stop_offsets: [0.0; 4],
            stop_colors: [[0.0; 4]; 4],
            info: [0; 4],
        }
    }
}

fn rect_array(rect: Rect) -> [f32; 4] {
    [rect.x(), rect.y(), rect.width(), rect.height()]
}

fn edges_array(edges: Edges<f32>) -> [f32; 4] {
    edges.to_array()
}

impl GpuPrimitive {
    fn with_kind(kind: PrimitiveKind) -> Self {
        let mut prim = Self::default();
        prim.info[0] = kind as u32;
        prim
    }

    pub fn kind(&self) -> u32 {
        self.info[0]
    }

    /// Single-pass widget quad
    pub fn widget(paint: &WidgetPaint, aa: f32) -> Self {
        let mut prim = Self::with_kind(PrimitiveKind::Widget);
        let rect = paint.rect;
        let radius = paint.radius.clamped_to(rect.size);
        let inner = rect.inset_by(paint.border_widths);
        let has_border = paint.has_border();
        let has_outline = paint.has_outline();

        prim.quad = rect_array(paint.paint_bounds().outset_by(Edges::all(aa)));
        prim.bounds = rect_array(rect);
        prim.radius = radius.to_array();
        prim.fill = paint.fill.to_array();
        prim.border_widths = edges_array(paint.border_widths);
        prim.border_colors = paint.border_colors.map(|c| c.to_array()).to_array();
        prim.outline = [paint.outline_width, paint.outline_offset.max(0.0), 0.0, 0.0];
        prim.outline_color = paint.outline_color.to_array();
        prim.params = rect_array(inner);
        prim.shape = radius.shrink(paint.border_widths).to_array();
        prim.info[2] = has_border as u32;
        prim.info[3] = has_outline as u32;
        prim
    }

    /// Gradient fill clipped to a rounded rect
    pub fn gradient(
        kind: PrimitiveKind,
        rect: Rect,
        radius: CornerRadius,
        params: [f32; 4],
        stops: &[GradientStop],
        aa: f32,
    ) -> Self {
        let mut prim = Self::with_kind(kind);
        prim.quad = rect_array(rect.outset_by(Edges::all(aa)));
        prim.bounds = rect_array(rect);
        prim.radius = radius.clamped_to(rect.size).to_array();
        prim.params = params;
        prim.pack_stops(stops);
        prim
    }

    pub fn linear_gradient(
        rect: Rect,
        radius: CornerRadius,
        angle: f32,
        stops: &[GradientStop],
        aa: f32,
    ) -> Self {
        let params = [angle.to_radians(), 0.0, 0.0, 0.0];
        Self::gradient(PrimitiveKind::LinearGradient, rect, radius, params, stops, aa)
    }

    /// `center` in unit coordinates of `rect`, `extent` as a fraction of the
    /// half-diagonal
    pub fn radial_gradient(
        rect: Rect,
        radius: CornerRadius,
        center: Point,
        extent: f32,
        stops: &[GradientStop],
        aa: f32,
    ) -> Self {
        let params = [center.x, center.y, extent.max(f32::EPSILON), 0.0];
        Self::gradient(PrimitiveKind::RadialGradient, rect, radius, params, stops, aa)
    }

    pub fn conic_gradient(
        rect: Rect,
        radius: CornerRadius,
        center: Point,
        angle: f32,
        stops: &[GradientStop],
        aa: f32,
    ) -> Self {
        let params = [center.x, center.y, angle.to_radians(), 0.0];
        Self::gradient(PrimitiveKind::ConicGradient, rect, radius, params, stops, aa)
    }

    /// Gaussian-blurred rounded rect
    pub fn shadow(shadow: &ShadowPaint, aa: f32) -> Self {
        let mut prim = Self::with_kind(PrimitiveKind::Shadow);
        let sigma = shadow.blur.max(0.0) * 0.5;
        prim.quad = rect_array(shadow.rect.outset_by(Edges::all(sigma * 3.0 + aa)));
        prim.bounds = rect_array(shadow.rect);
        prim.radius = shadow.radius.clamped_to(shadow.rect.size).to_array();
        prim.fill = shadow.color.to_array();
        prim.shape = [sigma, 0.0, 0.0, 0.0];
        prim
    }

    /// Straight segment with butt caps
    pub fn line(from: Point, to: Point, color: Color, width: f32, aa: f32) -> Self {
        let mut prim = Self::with_kind(PrimitiveKind::Line);
        let half = width.max(0.0) * 0.5;
        let pad = half + aa;
        let min_x = from.x.min(to.x) - pad;
        let min_y = from.y.min(to.y) - pad;
        let max_x = from.x.max(to.x) + pad;
        let max_y = from.y.max(to.y) + pad;
        prim.quad = [min_x, min_y, max_x - min_x, max_y - min_y];
        prim.fill = color.to_array();
        prim.params = [from.x, from.y, to.x, to.y];
        prim.shape = [half, 0.0, 0.0, 0.0];
        prim
    }

    /// Textured rounded rect, multiplied by `tint`
    pub fn image(rect: Rect, radius: CornerRadius, tint: Color, aa: f32) -> Self {
        let mut prim = Self::with_kind(PrimitiveKind::Image);
        prim.quad = rect_array(rect.outset_by(Edges::all(aa)));
        prim.bounds = rect_array(rect);
        prim.radius = radius.clamped_to(rect.size).to_array();
        prim.fill = tint.to_array();
        prim
    }

    pub fn with_transform(mut self, transform: &Transform2D) -> Self {
        let [a, b, c, d, tx, ty] = transform.elements;
        self.transform_a = [a, b, c, d];
        self.transform_b = [tx, ty, 0.0, 0.0];
        self
    }

    fn pack_stops(&mut self, stops: &[GradientStop]) {
        let stops = if stops.len() > MAX_GRADIENT_STOPS {
            warn!(
                "gradient has {} stops, resampling to {}",
                stops.len(),
                MAX_GRADIENT_STOPS
            );
            resample_stops(stops, MAX_GRADIENT_STOPS)
        } else {
            stops.iter().copied().collect()
        };
        for (i, stop) in stops.iter().enumerate() {
            self.stop_offsets[i] = stop.offset;
            self.stop_colors[i] = stop.color.to_array();
        }
        self.info[1] = stops.len() as u32;
    }

    /// Axis-aligned area the quad covers on the target
    pub fn device_bounds(&self) -> Rect {
        let [x, y, w, h] = self.quad;
        let [a, b, c, d] = self.transform_a;
        let [tx, ty, _, _] = self.transform_b;
        let transform = Transform2D {
            elements: [a, b, c, d, tx, ty],
        };
        let corners = transform.transform_rect_corners(&Rect::new(x, y, w, h));
        let mut min = corners[0];
        let mut max = corners[0];
        for p in &corners[1..] {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AA: f32 = 0.5;

    #[test]
    fn test_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<GpuPrimitive>(), 21 * 16);
        assert_eq!(std::mem::size_of::<Uniforms>(), 16);
    }

    #[test]
    fn test_widget_quad_covers_outline_and_aa() {
        let paint = WidgetPaint::new(Rect::new(10.0, 10.0, 40.0, 20.0), Color::WHITE)
            .with_radius(30.0_f32)
            .with_border(2.0, Color::BLACK)
            .with_outline(1.0, 2.0, Color::BLUE);
        let prim = GpuPrimitive::widget(&paint, AA);

        assert_eq!(prim.kind(), PrimitiveKind::Widget as u32);
        assert_eq!(prim.quad, [6.5, 6.5, 47.0, 27.0]);
        // Radius is clamped to half the short side
        assert_eq!(prim.radius, [10.0; 4]);
        assert_eq!(prim.params, [12.0, 12.0, 36.0, 16.0]);
        assert_eq!(prim.shape, [8.0; 4]);
        assert_eq!(&prim.info[2..], &[1, 1]);
    }

    #[test]
    fn test_gradient_stops_are_resampled() {
        let stops: Vec<GradientStop> = (0..7)
            .map(|i| GradientStop::new(i as f32 / 6.0, Color::rgb(i as f32 / 6.0, 0.0, 0.0)))
            .collect();
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let prim = GpuPrimitive::linear_gradient(rect, CornerRadius::ZERO, 90.0, &stops, AA);
        assert_eq!(prim.info[1], MAX_GRADIENT_STOPS as u32);
        assert_eq!(prim.stop_offsets[0], 0.0);
        assert_eq!(prim.stop_offsets[3], 1.0);
        assert!((prim.params[0] - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_shadow_quad_covers_blur() {
        let shadow = ShadowPaint {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            radius: CornerRadius::ZERO,
            blur: 4.0,
            color: Color::BLACK,
        };
        let prim = GpuPrimitive::shadow(&shadow, AA);
        assert_eq!(prim.shape[0], 2.0);
        assert_eq!(prim.quad, [-6.5, -6.5, 23.0, 23.0]);
    }

    #[test]
    fn test_device_bounds_follow_transform() {
        let from = Point::new(0.0, 0.0);
        let to = Point::new(10.0, 0.0);
        let prim = GpuPrimitive::line(from, to, Color::RED, 2.0, 0.0)
            .with_transform(&Transform2D::translate(5.0, 5.0));
        assert_eq!(prim.device_bounds(), Rect::new(4.0, 4.0, 12.0, 2.0));
    }
}
