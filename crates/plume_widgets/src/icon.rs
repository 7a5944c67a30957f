//! Square icon
//!
//! Icons are sized by a [`SizeToken`] so they follow the theme's scale
//! factor. Decoding icon assets is left to the caller: the icon draws an
//! image already registered with the renderer, tinted with the text color.

use plume_core::CornerRadius;
use plume_layout::{ContentPaint, EventTarget, Measurable, Paintable, Widget, WidgetId};
use plume_layout::{WidgetStyle, WidgetTree};
use plume_paint::ImageId;
use plume_theme::{OpacityToken, SizeToken};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Icon {
    image: Option<ImageId>,
}

impl Icon {
    pub fn new(image: ImageId) -> Self {
        Self { image: Some(image) }
    }

    /// An icon slot that keeps its size but draws nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn default_style(size: SizeToken) -> WidgetStyle {
        WidgetStyle::new()
            .inline_block()
            .size(size, size)
            .flex_shrink(0.0)
            .disabled(WidgetStyle::new().opacity(OpacityToken::Disabled))
    }

    /// Insert an icon of `size`, with `style` layered over the defaults
    pub fn insert(
        tree: &mut WidgetTree,
        image: Option<ImageId>,
        size: SizeToken,
        style: WidgetStyle,
    ) -> WidgetId {
        tree.insert_widget(Icon { image }, Self::default_style(size).merged(&style))
    }

    pub fn image(&self) -> Option<ImageId> {
        self.image
    }

    pub fn set_image(&mut self, image: Option<ImageId>) {
        self.image = image;
    }
}

impl Measurable for Icon {}

impl Paintable for Icon {
    fn paint_content(&self, cx: &mut ContentPaint<'_>) {
        let Some(image) = self.image else {
            return;
        };
        if cx.content_box.size.is_empty() {
            return;
        }
        let tint = cx.style.color.fade(cx.opacity);
        cx.surface
            .draw_image(cx.content_box, CornerRadius::ZERO, image, tint);
    }
}

impl EventTarget for Icon {}

impl Widget for Icon {
    fn type_name(&self) -> &'static str {
        "Icon"
    }
}
