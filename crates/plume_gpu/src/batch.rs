//! Frame recording and batching
//!
//! [`FrameBuilder`] is the CPU half of the renderer: it implements
//! [`PaintSurface`], flattens the transform and clip stacks into each
//! primitive, and merges consecutive primitives that share a pipeline and a
//! scissor rect into a single instanced draw.

use std::ops::Range;

use plume_core::{Color, CornerRadius, Point, Rect, Transform2D};
use plume_paint::{GradientStop, ImageId, PaintSurface, ShadowPaint, TextRun, WidgetPaint};
use tracing::{trace, warn};

use crate::primitives::GpuPrimitive;

/// Device-space scissor rectangle in whole pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScissorRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ScissorRect {
    /// Smallest pixel rect covering `rect`, or `None` when nothing is left
    pub fn covering(rect: Rect) -> Option<Self> {
        let x0 = rect.x().max(0.0).floor();
        let y0 = rect.y().max(0.0).floor();
        let x1 = rect.max_x().max(0.0).ceil();
        let y1 = rect.max_y().max(0.0).ceil();
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }

    /// Part of the scissor inside a `width` × `height` target
    pub fn clamped(&self, width: u32, height: u32) -> Option<Self> {
        let x1 = (self.x + self.width).min(width);
        let y1 = (self.y + self.height).min(height);
        if x1 <= self.x || y1 <= self.y {
            return None;
        }
        Some(Self {
            x: self.x,
            y: self.y,
            width: x1 - self.x,
            height: y1 - self.y,
        })
    }
}

/// Which pipeline (and bindings) a draw needs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PipelineKey {
    /// Widget quads, gradients, shadows and lines
    Shapes,
    Image(ImageId),
    /// Forwarded to the text backend; ranges index [`PrimitiveBatch::texts`]
    Text,
}

/// Draws can only merge when their keys are equal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BatchKey {
    pub pipeline: PipelineKey,
    pub scissor: Option<ScissorRect>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawCall {
    pub key: BatchKey,
    /// Instance range for quads, run range for text
    pub range: Range<u32>,
}

/// A text run with the transform that was active when it was painted
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedText {
    pub run: TextRun,
    pub transform: Transform2D,
}

/// Everything one frame draws, in paint order
#[derive(Debug, Default)]
pub struct PrimitiveBatch {
    pub primitives: Vec<GpuPrimitive>,
    pub texts: Vec<PreparedText>,
    pub draws: Vec<DrawCall>,
}

impl PrimitiveBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
        self.texts.clear();
        self.draws.clear();
    }

    pub fn push_primitive(
        &mut self,
        pipeline: PipelineKey,
        scissor: Option<ScissorRect>,
        prim: GpuPrimitive,
    ) {
        let index = self.primitives.len() as u32;
        self.primitives.push(prim);
        self.push_draw(BatchKey { pipeline, scissor }, index);
    }

    pub fn push_text(&mut self, scissor: Option<ScissorRect>, text: PreparedText) {
        let index = self.texts.len() as u32;
        self.texts.push(text);
        self.push_draw(
            BatchKey {
                pipeline: PipelineKey::Text,
                scissor,
            },
            index,
        );
    }

    fn push_draw(&mut self, key: BatchKey, index: u32) {
        if let Some(last) = self.draws.last_mut() {
            if last.key == key && last.range.end == index {
                last.range.end += 1;
                return;
            }
        }
        self.draws.push(DrawCall {
            key,
            range: index..index + 1,
        });
    }
}

/// Records paint calls into a [`PrimitiveBatch`]
#[derive(Debug)]
pub struct FrameBuilder {
    batch: PrimitiveBatch,
    aa_radius: f32,
    /// Cumulative transforms; the last entry is current
    transforms: Vec<Transform2D>,
    /// Cumulative device-space clips; `None` entries clip everything
    clips: Vec<Option<Rect>>,
}

impl FrameBuilder {
    pub fn new(aa_radius: f32) -> Self {
        Self {
            batch: PrimitiveBatch::new(),
            aa_radius,
            transforms: Vec::new(),
            clips: Vec::new(),
        }
    }

    pub fn aa_radius(&self) -> f32 {
        self.aa_radius
    }

    pub fn batch(&self) -> &PrimitiveBatch {
        &self.batch
    }

    fn transform(&self) -> Transform2D {
        self.transforms
            .last()
            .copied()
            .unwrap_or(Transform2D::IDENTITY)
    }

    /// Current clip: `None` when unclipped, `Some(None)` when nothing is visible
    fn clip(&self) -> Option<Option<Rect>> {
        self.clips.last().copied()
    }

    /// Take the recorded frame, leaving the builder empty
    pub fn finish(&mut self) -> PrimitiveBatch {
        if !self.transforms.is_empty() || !self.clips.is_empty() {
            warn!(
                "frame finished with {} transforms and {} clips still pushed",
                self.transforms.len(),
                self.clips.len()
            );
            self.transforms.clear();
            self.clips.clear();
        }
        let batch = std::mem::take(&mut self.batch);
        trace!(
            "frame: {} primitives, {} texts, {} draws",
            batch.primitives.len(),
            batch.texts.len(),
            batch.draws.len()
        );
        batch
    }

    /// Apply the current transform and clip, culling fully clipped quads
    fn push(&mut self, pipeline: PipelineKey, prim: GpuPrimitive) {
        let prim = prim.with_transform(&self.transform());
        let scissor = match self.clip() {
            None => None,
            Some(None) => return,
            Some(Some(clip)) => {
                if clip.intersect(&prim.device_bounds()).is_none() {
                    return;
                }
                match ScissorRect::covering(clip) {
                    Some(scissor) => Some(scissor),
                    None => return,
                }
            }
        };
        self.batch.push_primitive(pipeline, scissor, prim);
    }
}

fn bounding_box(points: &[Point; 4]) -> Rect {
    let mut min = points[0];
    let mut max = points[0];
    for p in &points[1..] {
        min = Point::new(min.x.min(p.x), min.y.min(p.y));
        max = Point::new(max.x.max(p.x), max.y.max(p.y));
    }
    Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
}

impl PaintSurface for FrameBuilder {
    fn draw_widget(&mut self, widget: &WidgetPaint) {
        if widget.is_visible() {
            self.push(PipelineKey::Shapes, GpuPrimitive::widget(widget, self.aa_radius));
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        if width > 0.0 && !color.is_transparent() {
            let prim = GpuPrimitive::line(from, to, color, width, self.aa_radius);
            self.push(PipelineKey::Shapes, prim);
        }
    }

    fn draw_text(&mut self, run: &TextRun) {
        if run.text.is_empty() || run.color.is_transparent() {
            return;
        }
        let scissor = match self.clip() {
            None => None,
            Some(clip) => match clip.and_then(ScissorRect::covering) {
                Some(scissor) => Some(scissor),
                None => return,
            },
        };
        let text = PreparedText {
            run: run.clone(),
            transform: self.transform(),
        };
        self.batch.push_text(scissor, text);
    }

    fn draw_linear_gradient(
        &mut self,
        rect: Rect,
        radius: CornerRadius,
        angle: f32,
        stops: &[GradientStop],
    ) {
        if !stops.is_empty() {
            let prim = GpuPrimitive::linear_gradient(rect, radius, angle, stops, self.aa_radius);
            self.push(PipelineKey::Shapes, prim);
        }
    }

    fn draw_radial_gradient(
        &mut self,
        rect: Rect,
        radius: CornerRadius,
        center: Point,
        extent: f32,
        stops: &[GradientStop],
    ) {
        if !stops.is_empty() {
            let prim =
                GpuPrimitive::radial_gradient(rect, radius, center, extent, stops, self.aa_radius);
            self.push(PipelineKey::Shapes, prim);
        }
    }

    fn draw_conic_gradient(
        &mut self,
        rect: Rect,
        radius: CornerRadius,
        center: Point,
        angle: f32,
        stops: &[GradientStop],
    ) {
        if !stops.is_empty() {
            let prim =
                GpuPrimitive::conic_gradient(rect, radius, center, angle, stops, self.aa_radius);
            self.push(PipelineKey::Shapes, prim);
        }
    }

    fn draw_shadow(&mut self, shadow: &ShadowPaint) {
        if !shadow.color.is_transparent() {
            self.push(PipelineKey::Shapes, GpuPrimitive::shadow(shadow, self.aa_radius));
        }
    }

    fn draw_image(&mut self, rect: Rect, radius: CornerRadius, image: ImageId, tint: Color) {
        if !rect.size.is_empty() && !tint.is_transparent() {
            let prim = GpuPrimitive::image(rect, radius, tint, self.aa_radius);
            self.push(PipelineKey::Image(image), prim);
        }
    }

    fn push_clip(&mut self, rect: Rect) {
        let device = bounding_box(&self.transform().transform_rect_corners(&rect));
        let clip = match self.clip() {
            None => Some(device),
            Some(parent) => parent.and_then(|p| p.intersect(&device)),
        };
        self.clips.push(clip);
    }

    fn pop_clip(&mut self) {
        if self.clips.pop().is_none() {
            warn!("pop_clip without matching push_clip");
        }
    }

    fn push_transform(&mut self, transform: Transform2D) {
        let combined = self.transform().then(&transform);
        self.transforms.push(combined);
    }

    fn pop_transform(&mut self) {
        if self.transforms.pop().is_none() {
            warn!("pop_transform without matching push_transform");
        }
    }
}

#[cfg(test)]
mod tests {
    use plume_paint::PaintContext;

    use super::*;
    use crate::primitives::PrimitiveKind;

    const AA: f32 = 0.5;

    fn quad(x: f32) -> WidgetPaint {
        WidgetPaint::new(Rect::new(x, 0.0, 10.0, 10.0), Color::WHITE)
    }

    #[test]
    fn test_consecutive_quads_share_one_draw() {
        let mut frame = FrameBuilder::new(AA);
        for i in 0..5 {
            frame.draw_widget(&quad(i as f32 * 12.0));
        }
        frame.draw_line(Point::ZERO, Point::new(10.0, 10.0), Color::BLACK, 1.0);
        let batch = frame.finish();

        assert_eq!(batch.primitives.len(), 6);
        assert_eq!(batch.draws.len(), 1);
        assert_eq!(batch.draws[0].range, 0..6);
        assert_eq!(batch.draws[0].key.pipeline, PipelineKey::Shapes);
    }

    #[test]
    fn test_clip_and_pipeline_changes_split_draws() {
        let mut frame = FrameBuilder::new(AA);
        frame.draw_widget(&quad(0.0));
        frame.push_clip(Rect::new(0.0, 0.0, 50.0, 50.0));
        frame.draw_widget(&quad(10.0));
        let icon = Rect::new(0.0, 0.0, 8.0, 8.0);
        frame.draw_image(icon, CornerRadius::ZERO, ImageId(3), Color::WHITE);
        frame.draw_widget(&quad(20.0));
        frame.pop_clip();
        let batch = frame.finish();

        let keys: Vec<PipelineKey> = batch.draws.iter().map(|d| d.key.pipeline).collect();
        assert_eq!(
            keys,
            vec![
                PipelineKey::Shapes,
                PipelineKey::Shapes,
                PipelineKey::Image(ImageId(3)),
                PipelineKey::Shapes
            ]
        );
        assert_eq!(batch.draws[0].key.scissor, None);
        assert_eq!(
            batch.draws[1].key.scissor,
            Some(ScissorRect {
                x: 0,
                y: 0,
                width: 50,
                height: 50
            })
        );
    }

    #[test]
    fn test_fully_clipped_primitives_are_culled() {
        let mut frame = FrameBuilder::new(AA);
        frame.push_clip(Rect::new(0.0, 0.0, 20.0, 20.0));
        frame.draw_widget(&quad(100.0));
        frame.push_clip(Rect::new(50.0, 50.0, 10.0, 10.0));
        frame.draw_widget(&quad(0.0));
        frame.pop_clip();
        frame.pop_clip();
        assert!(frame.finish().is_empty());
    }

    #[test]
    fn test_nested_clips_intersect_in_device_space() {
        let mut frame = FrameBuilder::new(AA);
        frame.push_transform(Transform2D::translate(10.0, 0.0));
        frame.push_clip(Rect::new(0.0, 0.0, 40.0, 40.0));
        frame.push_clip(Rect::new(20.5, 10.0, 40.0, 40.0));
        frame.draw_widget(&quad(25.0));
        frame.pop_clip();
        frame.pop_clip();
        frame.pop_transform();
        let batch = frame.finish();

        let scissor = batch.draws[0].key.scissor;
        assert_eq!(
            scissor,
            Some(ScissorRect {
                x: 30,
                y: 10,
                width: 20,
                height: 30
            })
        );
        assert_eq!(batch.primitives[0].transform_b[0], 10.0);
    }

    #[test]
    fn test_transforms_compose() {
        let mut frame = FrameBuilder::new(AA);
        frame.push_transform(Transform2D::translate(5.0, 0.0));
        frame.push_transform(Transform2D::scale(2.0, 2.0));
        frame.draw_widget(&quad(0.0));
        frame.pop_transform();
        frame.draw_widget(&quad(0.0));
        frame.pop_transform();
        let batch = frame.finish();

        assert_eq!(batch.primitives[0].transform_a, [2.0, 0.0, 0.0, 2.0]);
        assert_eq!(batch.primitives[0].transform_b[0], 5.0);
        assert_eq!(batch.primitives[1].transform_a, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_invisible_paint_is_skipped() {
        let mut frame = FrameBuilder::new(AA);
        frame.draw_widget(&WidgetPaint::new(Rect::new(0.0, 0.0, 5.0, 5.0), Color::TRANSPARENT));
        frame.draw_linear_gradient(Rect::new(0.0, 0.0, 5.0, 5.0), CornerRadius::ZERO, 0.0, &[]);
        frame.pop_clip();
        assert!(frame.finish().is_empty());
    }

    #[test]
    fn test_text_keeps_paint_order() {
        let mut frame = FrameBuilder::new(AA);
        frame.draw_widget(&quad(0.0));
        frame.draw_text(&TextRun {
            text: "Hi".into(),
            origin: Point::new(2.0, 8.0),
            font_family: "sans".into(),
            font_size: 12.0,
            font_weight: 400,
            color: Color::BLACK,
        });
        frame.draw_widget(&quad(20.0));
        let batch = frame.finish();

        let keys: Vec<PipelineKey> = batch.draws.iter().map(|d| d.key.pipeline).collect();
        assert_eq!(
            keys,
            vec![PipelineKey::Shapes, PipelineKey::Text, PipelineKey::Shapes]
        );
        assert_eq!(batch.draws[2].range, 1..2);
        assert_eq!(batch.texts[0].run.text, "Hi");
    }

    #[test]
    fn test_replayed_context_matches_direct_painting() {
        let mut recorded = PaintContext::new();
        let card = Rect::new(0.0, 0.0, 30.0, 30.0);
        recorded.draw_rounded_rect(card, CornerRadius::uniform(4.0), Color::RED);
        recorded.draw_circle(Point::new(50.0, 50.0), 5.0, Color::BLUE);

        let mut frame = FrameBuilder::new(AA);
        recorded.replay(&mut frame);
        let batch = frame.finish();
        assert_eq!(batch.primitives.len(), 2);
        assert!(batch
            .primitives
            .iter()
            .all(|p| p.kind() == PrimitiveKind::Widget as u32));
        assert_eq!(batch.primitives[1].radius, [5.0; 4]);
    }
}
