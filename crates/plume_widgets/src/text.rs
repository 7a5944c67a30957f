//! Single-line text label
//!
//! Measured through the [`TextMeasurer`] contract: the content box is the
//! advance width of the run by one line box, with the baseline placed after
//! half the leading. Font, size, weight, color and alignment are all taken
//! from the computed (inherited) style.

use plume_core::{Point, Size};
use plume_layout::{ContentPaint, ComputedStyle, EventTarget, Measurable, Paintable, TextAlign};
use plume_layout::{TextMeasurer, TextMetrics, Widget, WidgetId, WidgetStyle, WidgetTree};
use plume_paint::TextRun;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Text {
    content: String,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn insert(
        tree: &mut WidgetTree,
        content: impl Into<String>,
        style: WidgetStyle,
    ) -> WidgetId {
        tree.insert_widget(Self::new(content), style)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the text. Use through [`WidgetTree::widget_mut`] so the node's
    /// layout is invalidated.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}

impl Measurable for Text {
    fn content_size(&self, style: &ComputedStyle, measurer: &dyn TextMeasurer) -> Option<Size> {
        Some(label_size(&self.content, style, measurer))
    }

    fn baseline(&self, style: &ComputedStyle, measurer: &dyn TextMeasurer) -> Option<f32> {
        Some(label_baseline(&self.content, style, measurer))
    }
}

impl Paintable for Text {
    fn paint_content(&self, cx: &mut ContentPaint<'_>) {
        paint_label(&self.content, cx);
    }
}

impl EventTarget for Text {}

impl Widget for Text {
    fn type_name(&self) -> &'static str {
        "Text"
    }
}

fn measure(text: &str, style: &ComputedStyle, measurer: &dyn TextMeasurer) -> TextMetrics {
    measurer.measure(text, &style.font_family, style.font_size)
}

/// Line box height: the CSS line height, grown to fit the font if needed
fn line_box(metrics: &TextMetrics, style: &ComputedStyle) -> f32 {
    style.line_height_px().max(metrics.height())
}

fn baseline_in_line(metrics: &TextMetrics, style: &ComputedStyle) -> f32 {
    (line_box(metrics, style) - metrics.height()) * 0.5 + metrics.ascender
}

pub(crate) fn label_size(text: &str, style: &ComputedStyle, measurer: &dyn TextMeasurer) -> Size {
    let metrics = measure(text, style, measurer);
    Size::new(metrics.width, line_box(&metrics, style))
}

pub(crate) fn label_baseline(
    text: &str,
    style: &ComputedStyle,
    measurer: &dyn TextMeasurer,
) -> f32 {
    baseline_in_line(&measure(text, style, measurer), style)
}

/// Paint one line of text inside the content box, aligned horizontally by
/// `text-align` and centered vertically when the box is taller than a line
pub(crate) fn paint_label(text: &str, cx: &mut ContentPaint<'_>) {
    if text.is_empty() {
        return;
    }
    let style = cx.style;
    let metrics = measure(text, style, cx.measurer);
    let area = cx.content_box;

    let slack = area.width() - metrics.width;
    let dx = match style.text_align {
        TextAlign::Left | TextAlign::Justify => 0.0,
        TextAlign::Center => slack * 0.5,
        TextAlign::Right => slack,
    };
    let dy = ((area.height() - line_box(&metrics, style)) * 0.5).max(0.0);

    cx.surface.draw_text(&TextRun {
        text: text.to_owned(),
        origin: Point::new(area.x() + dx, area.y() + dy + baseline_in_line(&metrics, style)),
        font_family: style.font_family.clone(),
        font_size: style.font_size,
        font_weight: style.font_weight.to_u16(),
        color: style.color.fade(cx.opacity),
    });
}

#[cfg(test)]
mod tests {
    use plume_core::Size;
    use plume_layout::EstimatedTextMeasurer;
    use plume_paint::PaintContext;
    use plume_theme::ScaledTheme;

    use super::*;

    fn resolved(style: WidgetStyle, content: &str) -> (WidgetTree, WidgetId) {
        let mut tree = WidgetTree::new();
        tree.set_viewport(Size::new(400.0, 200.0));
        let root = tree.insert(WidgetStyle::new().width(400.0));
        tree.set_root(root);
        let text = Text::insert(&mut tree, content, style);
        tree.add_child(root, text);
        tree.resolve(&ScaledTheme::default(), &EstimatedTextMeasurer);
        (tree, text)
    }

    #[test]
    fn test_height_is_one_line_box() {
        let (tree, text) = resolved(WidgetStyle::new().font_size(20.0).line_height(1.5), "Label");
        let b = tree.bounds(text).unwrap();
        assert!((b.height() - 30.0).abs() < 1e-4);
        // Half leading of 5px above a 16px ascender
        assert!((tree.baseline(text).unwrap() - 21.0).abs() < 1e-4);
    }

    #[test]
    fn test_tight_line_height_grows_to_font() {
        let (tree, text) = resolved(WidgetStyle::new().font_size(20.0).line_height(0.5), "Label");
        assert!((tree.bounds(text).unwrap().height() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_paint_aligns_run() {
        let style = WidgetStyle::new()
            .font_size(20.0)
            .line_height(1.0)
            .text_align(TextAlign::Right);
        let (tree, _) = resolved(style, "ab");
        let mut cx = PaintContext::new();
        tree.paint(&mut cx, &EstimatedTextMeasurer);

        let run = cx.texts().next().unwrap();
        assert_eq!(run.text, "ab");
        // 400 wide, 22px of text
        assert!((run.origin.x - 378.0).abs() < 1e-4);
        assert!((run.origin.y - 16.0).abs() < 1e-4);
        assert_eq!(run.font_size, 20.0);
    }

    #[test]
    fn test_empty_text_paints_nothing() {
        let (tree, _) = resolved(WidgetStyle::new(), "");
        let mut cx = PaintContext::new();
        tree.paint(&mut cx, &EstimatedTextMeasurer);
        assert_eq!(cx.texts().count(), 0);
    }
}
