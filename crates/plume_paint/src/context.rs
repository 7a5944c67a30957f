//! Recording paint surface
//!
//! [`PaintContext`] implements [`PaintSurface`] by recording commands instead
//! of drawing. Tests use it to assert on what the widget tree painted; tools
//! can replay the command list into another surface.

use plume_core::{Color, CornerRadius, Point, Rect, Transform2D};
use tracing::warn;

use crate::gradient::{Gradient, GradientStop, GradientStops};
use crate::surface::{ImageId, PaintSurface, ShadowPaint, TextRun, WidgetPaint};

/// A paint command for the renderer
#[derive(Clone, Debug, PartialEq)]
pub enum PaintCommand {
    Widget(WidgetPaint),
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f32,
    },
    Text(TextRun),
    Gradient {
        rect: Rect,
        radius: CornerRadius,
        gradient: Gradient,
    },
    Shadow(ShadowPaint),
    Image {
        rect: Rect,
        radius: CornerRadius,
        image: ImageId,
        tint: Color,
    },
    PushClip {
        rect: Rect,
    },
    PopClip,
    PushTransform {
        transform: Transform2D,
    },
    PopTransform,
}

/// The recording paint context
#[derive(Debug, Default)]
pub struct PaintContext {
    commands: Vec<PaintCommand>,
    clip_depth: usize,
    transform_depth: usize,
}

impl PaintContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Take ownership of recorded commands
    pub fn take_commands(&mut self) -> Vec<PaintCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Recorded widget quads, in paint order
    pub fn widgets(&self) -> impl Iterator<Item = &WidgetPaint> {
        self.commands.iter().filter_map(|c| match c {
            PaintCommand::Widget(w) => Some(w),
            _ => None,
        })
    }

    /// Recorded text runs, in paint order
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.commands.iter().filter_map(|c| match c {
            PaintCommand::Text(t) => Some(t),
            _ => None,
        })
    }

    /// Whether every push has been matched by a pop
    pub fn is_balanced(&self) -> bool {
        self.clip_depth == 0 && self.transform_depth == 0
    }

    /// Replay the recorded commands into another surface
    pub fn replay(&self, target: &mut dyn PaintSurface) {
        for command in &self.commands {
            match command {
                PaintCommand::Widget(w) => target.draw_widget(w),
                PaintCommand::Line {
                    from,
                    to,
                    color,
                    width,
                } => target.draw_line(*from, *to, *color, *width),
                PaintCommand::Text(run) => target.draw_text(run),
                PaintCommand::Gradient {
                    rect,
                    radius,
                    gradient,
                } => match gradient {
                    Gradient::Linear { angle, stops } => {
                        target.draw_linear_gradient(*rect, *radius, *angle, stops)
                    }
                    Gradient::Radial {
                        center,
                        radius: extent,
                        stops,
                    } => target.draw_radial_gradient(*rect, *radius, *center, *extent, stops),
                    Gradient::Conic {
                        center,
                        angle,
                        stops,
                    } => target.draw_conic_gradient(*rect, *radius, *center, *angle, stops),
                },
                PaintCommand::Shadow(shadow) => target.draw_shadow(shadow),
                PaintCommand::Image {
                    rect,
                    radius,
                    image,
                    tint,
                } => target.draw_image(*rect, *radius, *image, *tint),
                PaintCommand::PushClip { rect } => target.push_clip(*rect),
                PaintCommand::PopClip => target.pop_clip(),
                PaintCommand::PushTransform { transform } => target.push_transform(*transform),
                PaintCommand::PopTransform => target.pop_transform(),
            }
        }
    }
}

fn collect_stops(stops: &[GradientStop]) -> GradientStops {
    stops.iter().copied().collect()
}

impl PaintSurface for PaintContext {
    fn draw_widget(&mut self, widget: &WidgetPaint) {
        self.commands.push(PaintCommand::Widget(*widget));
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.commands.push(PaintCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn draw_text(&mut self, run: &TextRun) {
        self.commands.push(PaintCommand::Text(run.clone()));
    }

    fn draw_linear_gradient(
        &mut self,
        rect: Rect,
        radius: CornerRadius,
        angle: f32,
        stops: &[GradientStop],
    ) {
        self.commands.push(PaintCommand::Gradient {
            rect,
            radius,
            gradient: Gradient::Linear {
                angle,
                stops: collect_stops(stops),
            },
        });
    }

    fn draw_radial_gradient(
        &mut self,
        rect: Rect,
        radius: CornerRadius,
        center: Point,
        extent: f32,
        stops: &[GradientStop],
    ) {
        self.commands.push(PaintCommand::Gradient {
            rect,
            radius,
            gradient: Gradient::Radial {
                center,
                radius: extent,
                stops: collect_stops(stops),
            },
        });
    }

    fn draw_conic_gradient(
        &mut self,
        rect: Rect,
        radius: CornerRadius,
        center: Point,
        angle: f32,
        stops: &[GradientStop],
    ) {
        self.commands.push(PaintCommand::Gradient {
            rect,
            radius,
            gradient: Gradient::Conic {
                center,
                angle,
                stops: collect_stops(stops),
            },
        });
    }

    fn draw_shadow(&mut self, shadow: &ShadowPaint) {
        self.commands.push(PaintCommand::Shadow(*shadow));
    }

    fn draw_image(&mut self, rect: Rect, radius: CornerRadius, image: ImageId, tint: Color) {
        self.commands.push(PaintCommand::Image {
            rect,
            radius,
            image,
            tint,
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_depth += 1;
        self.commands.push(PaintCommand::PushClip { rect });
    }

    fn pop_clip(&mut self) {
        if self.clip_depth == 0 {
            warn!("pop_clip without matching push_clip");
            return;
        }
        self.clip_depth -= 1;
        self.commands.push(PaintCommand::PopClip);
    }

    fn push_transform(&mut self, transform: Transform2D) {
        self.transform_depth += 1;
        self.commands.push(PaintCommand::PushTransform { transform });
    }

    fn pop_transform(&mut self) {
        if self.transform_depth == 0 {
            warn!("pop_transform without matching push_transform");
            return;
        }
        self.transform_depth -= 1;
        self.commands.push(PaintCommand::PopTransform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers_route_through_draw_widget() {
        let mut ctx = PaintContext::new();
        ctx.draw_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::RED);
        ctx.draw_rect_outline(Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLUE, 2.0);
        ctx.draw_circle(Point::new(5.0, 5.0), 5.0, Color::GREEN);

        let widgets: Vec<_> = ctx.widgets().collect();
        assert_eq!(widgets.len(), 3);
        assert_eq!(widgets[1].fill, Color::TRANSPARENT);
        assert_eq!(widgets[1].border_widths.left, 2.0);
        assert_eq!(widgets[2].radius, CornerRadius::uniform(5.0));
    }

    #[test]
    fn test_unbalanced_pop_is_ignored() {
        let mut ctx = PaintContext::new();
        ctx.pop_clip();
        assert!(ctx.commands().is_empty());

        ctx.push_transform(Transform2D::translate(1.0, 1.0));
        assert!(!ctx.is_balanced());
        ctx.pop_transform();
        assert!(ctx.is_balanced());
    }

    #[test]
    fn test_replay_reproduces_commands() {
        let mut ctx = PaintContext::new();
        ctx.push_clip(Rect::new(0.0, 0.0, 50.0, 50.0));
        ctx.draw_linear_gradient(
            Rect::new(0.0, 0.0, 50.0, 50.0),
            CornerRadius::ZERO,
            45.0,
            &[
                GradientStop::new(0.0, Color::BLACK),
                GradientStop::new(1.0, Color::WHITE),
            ],
        );
        ctx.pop_clip();

        let mut copy = PaintContext::new();
        ctx.replay(&mut copy);
        assert_eq!(copy.commands(), ctx.commands());
    }
}
