//! Rounded-rect signed distance functions
//!
//! CPU mirror of the fragment shader used for widget quads. Hit testing uses
//! [`rounded_rect_contains`]; [`shade_widget`] reproduces the single-pass
//! background/border/outline compositing so it can be tested without a GPU.

use plume_core::{Color, CornerRadius, Edges, Point, Rect};

use crate::surface::WidgetPaint;

/// Signed distance from `p` to a rounded rect (negative inside)
pub fn rounded_rect_distance(p: Point, rect: &Rect, radius: &CornerRadius) -> f32 {
    let radius = radius.clamped_to(rect.size);
    let half_w = rect.width() * 0.5;
    let half_h = rect.height() * 0.5;
    let center = rect.center();
    let rel = Point::new(p.x - center.x, p.y - center.y);

    // Select the corner radius for the quadrant containing p
    let r = match (rel.x >= 0.0, rel.y >= 0.0) {
        (false, false) => radius.top_left,
        (true, false) => radius.top_right,
        (true, true) => radius.bottom_right,
        (false, true) => radius.bottom_left,
    };

    let qx = rel.x.abs() - half_w + r;
    let qy = rel.y.abs() - half_h + r;
    let outside = Point::new(qx.max(0.0), qy.max(0.0)).length();
    outside + qx.max(qy).min(0.0) - r
}

/// Whether `p` lies inside the rounded rect
pub fn rounded_rect_contains(p: Point, rect: &Rect, radius: &CornerRadius) -> bool {
    rounded_rect_distance(p, rect, radius) <= 0.0
}

/// GLSL/WGSL `smoothstep`
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Coverage of a shape with signed distance `d`, anti-aliased over `aa` pixels
pub fn coverage(d: f32, aa: f32) -> f32 {
    1.0 - smoothstep(-aa, aa, d)
}

/// Border color for the side whose edge is nearest to `p`, measured in units
/// of that side's width
pub fn border_side_color(p: Point, widget: &WidgetPaint) -> Color {
    let r = &widget.rect;
    let w = &widget.border_widths;
    let norm = |dist: f32, width: f32| {
        if width > 0.0 {
            dist / width
        } else {
            f32::INFINITY
        }
    };
    let sides = [
        (norm(p.y - r.y(), w.top), widget.border_colors.top),
        (norm(r.max_x() - p.x, w.right), widget.border_colors.right),
        (norm(r.max_y() - p.y, w.bottom), widget.border_colors.bottom),
        (norm(p.x - r.x(), w.left), widget.border_colors.left),
    ];
    sides
        .iter()
        .fold((f32::INFINITY, widget.border_colors.top), |best, side| {
            if side.0 < best.0 {
                *side
            } else {
                best
            }
        })
        .1
}

/// Premultiplied-alpha color produced for pixel center `p` of a widget quad
pub fn shade_widget(p: Point, widget: &WidgetPaint, aa: f32) -> Color {
    let outer = widget.rect;
    let radius = widget.radius.clamped_to(outer.size);
    let d_outer = rounded_rect_distance(p, &outer, &radius);

    let inner = outer.inset_by(widget.border_widths);
    let inner_radius = radius.shrink(widget.border_widths);
    let d_inner = if widget.has_border() {
        rounded_rect_distance(p, &inner, &inner_radius)
    } else {
        d_outer
    };

    let box_cov = coverage(d_outer, aa);
    let fill_cov = coverage(d_inner, aa).min(box_cov);
    let border_cov = (box_cov - fill_cov).max(0.0);

    let mut out = premultiply(widget.fill, fill_cov);
    if border_cov > 0.0 {
        out = add(out, premultiply(border_side_color(p, widget), border_cov));
    }

    if widget.has_outline() {
        let gap = widget.outline_offset.max(0.0);
        let ring_inner = outer.outset_by(Edges::all(gap));
        let ring_outer = outer.outset_by(Edges::all(gap + widget.outline_width));
        let d_ring_inner = rounded_rect_distance(p, &ring_inner, &radius.grow(gap));
        let d_ring_outer = rounded_rect_distance(
            p,
            &ring_outer,
            &radius.grow(gap + widget.outline_width),
        );
        let ring_cov = coverage(d_ring_outer, aa) * (1.0 - coverage(d_ring_inner, aa));
        out = add(out, premultiply(widget.outline_color, ring_cov));
    }
    out
}

fn premultiply(color: Color, cov: f32) -> Color {
    let a = color.a * cov;
    Color::rgba(color.r * a, color.g * a, color.b * a, a)
}

fn add(a: Color, b: Color) -> Color {
    Color::rgba(a.r + b.r, a.g + b.g, a.b + b.b, (a.a + b.a).min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const AA: f32 = 0.5;

    #[test]
    fn test_distance_signs() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let radius = CornerRadius::uniform(10.0);
        assert!(rounded_rect_distance(Point::new(50.0, 25.0), &rect, &radius) < 0.0);
        assert!((rounded_rect_distance(Point::new(50.0, 0.0), &rect, &radius)).abs() < 1e-4);
        // The corner pixel is cut away by the radius
        assert!(!rounded_rect_contains(Point::new(1.0, 1.0), &rect, &radius));
        assert!(rounded_rect_contains(Point::new(1.0, 1.0), &rect, &CornerRadius::ZERO));
    }

    #[test]
    fn test_fill_border_and_outline_regions() {
        let widget = WidgetPaint::new(Rect::new(10.0, 10.0, 80.0, 40.0), Color::WHITE)
            .with_border(4.0, Color::RED)
            .with_outline(2.0, 2.0, Color::BLUE);

        let center = shade_widget(Point::new(50.0, 30.0), &widget, AA);
        assert_eq!(center, Color::WHITE);

        let border = shade_widget(Point::new(50.0, 12.0), &widget, AA);
        assert_eq!(border, Color::RED);

        let gap = shade_widget(Point::new(50.0, 9.0), &widget, AA);
        assert!(gap.a < 1e-3);

        let outline = shade_widget(Point::new(50.0, 7.0), &widget, AA);
        assert_eq!(outline, Color::BLUE);
    }

    #[test]
    fn test_semi_transparent_edge_blends_once() {
        // With a fill and border of the same translucent color, the seam between
        // them must not be darker than either region.
        let tint = Color::rgba(0.0, 0.0, 0.0, 0.5);
        let widget = WidgetPaint::new(Rect::new(0.0, 0.0, 40.0, 40.0), tint).with_border(4.0, tint);
        for x in [2.0, 3.75, 4.0, 4.25, 6.0] {
            let c = shade_widget(Point::new(x, 20.0), &widget, AA);
            assert!(c.a <= 0.5 + 1e-5, "alpha {} at x={}", c.a, x);
        }
    }

    #[test]
    fn test_per_side_border_color() {
        let widget = WidgetPaint::new(Rect::new(0.0, 0.0, 40.0, 40.0), Color::WHITE)
            .with_border_sides(
                Edges::new(2.0, 2.0, 2.0, 8.0),
                Edges::new(Color::RED, Color::GREEN, Color::BLUE, Color::BLACK),
            );
        assert_eq!(border_side_color(Point::new(20.0, 1.0), &widget), Color::RED);
        assert_eq!(border_side_color(Point::new(39.0, 20.0), &widget), Color::GREEN);
        assert_eq!(border_side_color(Point::new(4.0, 20.0), &widget), Color::BLACK);
    }
}
