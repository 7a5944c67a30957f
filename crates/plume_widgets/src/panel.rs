//! Titled panel
//!
//! A bordered column with a fixed-height header strip and a body that takes
//! the remaining height. The panel node owns the ids of its parts so callers
//! can add content or header items later.

use plume_layout::{AlignItems, ContentPaint, EventTarget, Measurable, Paintable, Widget};
use plume_layout::{WidgetId, WidgetStyle, WidgetTree};
use plume_theme::{ColorToken, FontSizeToken, FontWeight, RadiusToken, SizeToken, SpacingToken};
use tracing::warn;

use crate::container::Container;
use crate::text::Text;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Panel {
    header: WidgetId,
    title: WidgetId,
    body: WidgetId,
}

impl Panel {
    pub fn default_style() -> WidgetStyle {
        WidgetStyle::new()
            .flex_col()
            .border_box()
            .background(ColorToken::Surface)
            .border(1.0, ColorToken::Border)
            .rounded(RadiusToken::Md)
            .overflow_hidden()
    }

    pub fn header_style() -> WidgetStyle {
        WidgetStyle::new()
            .flex_row()
            .align_items(AlignItems::Center)
            .border_box()
            .height(SizeToken::PanelHeaderHeight)
            .padding_xy(SpacingToken::Space2, 0.0)
            .gap(SpacingToken::Space1)
            .flex_shrink(0.0)
            .background(ColorToken::PanelHeader)
            .border_bottom(1.0, ColorToken::Border)
    }

    pub fn body_style() -> WidgetStyle {
        WidgetStyle::new()
            .flex_col()
            .flex_grow(1.0)
            .min_height(0.0)
            .padding(SpacingToken::Space3)
            .gap(SpacingToken::Space2)
    }

    /// Build the panel subtree and return its root. `style` is layered over
    /// [`Panel::default_style`].
    pub fn build(tree: &mut WidgetTree, title: impl Into<String>, style: WidgetStyle) -> WidgetId {
        let header = Container::insert(tree, Self::header_style());
        let title = Text::insert(
            tree,
            title,
            WidgetStyle::new()
                .font_size(SizeToken::Text(FontSizeToken::Sm))
                .font_weight(FontWeight::Semibold)
                .text_color(ColorToken::TextSecondary)
                .flex_grow(1.0)
                .min_width(0.0),
        );
        tree.add_child(header, title);
        let body = Container::insert(tree, Self::body_style());

        let panel = Panel {
            header,
            title,
            body,
        };
        let root = tree.insert_widget(panel, Self::default_style().merged(&style));
        tree.add_child(root, header);
        tree.add_child(root, body);
        root
    }

    pub fn header(&self) -> WidgetId {
        self.header
    }

    pub fn title(&self) -> WidgetId {
        self.title
    }

    pub fn body(&self) -> WidgetId {
        self.body
    }

    /// Append `child` to the body of `panel`
    pub fn add_content(tree: &mut WidgetTree, panel: WidgetId, child: WidgetId) -> bool {
        let Some(body) = tree.widget::<Panel>(panel).map(|p| p.body) else {
            warn!(?panel, "add_content on a node that is not a panel");
            return false;
        };
        tree.add_child(body, child)
    }

    /// Append `child` after the title, in the header strip
    pub fn add_header_item(tree: &mut WidgetTree, panel: WidgetId, child: WidgetId) -> bool {
        let Some(header) = tree.widget::<Panel>(panel).map(|p| p.header) else {
            warn!(?panel, "add_header_item on a node that is not a panel");
            return false;
        };
        tree.add_child(header, child)
    }

    pub fn set_title(tree: &mut WidgetTree, panel: WidgetId, title: impl Into<String>) {
        let Some(title_id) = tree.widget::<Panel>(panel).map(|p| p.title) else {
            warn!(?panel, "set_title on a node that is not a panel");
            return;
        };
        if let Some(text) = tree.widget_mut::<Text>(title_id) {
            text.set_content(title);
        }
    }
}

impl Measurable for Panel {}

impl Paintable for Panel {
    fn paint_content(&self, _cx: &mut ContentPaint<'_>) {}
}

impl EventTarget for Panel {}

impl Widget for Panel {
    fn type_name(&self) -> &'static str {
        "Panel"
    }
}
