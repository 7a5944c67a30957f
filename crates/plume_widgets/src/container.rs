//! Plain container

use plume_layout::{ContentPaint, EventTarget, Measurable, Paintable, Widget, WidgetId};
use plume_layout::{WidgetStyle, WidgetTree};

/// A node with no content of its own; everything it shows comes from its
/// style and children
#[derive(Clone, Copy, Debug, Default)]
pub struct Container;

impl Container {
    pub fn insert(tree: &mut WidgetTree, style: WidgetStyle) -> WidgetId {
        tree.insert_widget(Container, style)
    }

    /// Insert a container and append `children` in order
    pub fn with_children(
        tree: &mut WidgetTree,
        style: WidgetStyle,
        children: &[WidgetId],
    ) -> WidgetId {
        let id = Self::insert(tree, style);
        for &child in children {
            tree.add_child(id, child);
        }
        id
    }
}

impl Measurable for Container {}

impl Paintable for Container {
    fn paint_content(&self, _cx: &mut ContentPaint<'_>) {}
}

impl EventTarget for Container {}

impl Widget for Container {
    fn type_name(&self) -> &'static str {
        "Container"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_keep_order() {
        let mut tree = WidgetTree::new();
        let a = tree.insert(WidgetStyle::new());
        let b = tree.insert(WidgetStyle::new());
        let root = Container::with_children(&mut tree, WidgetStyle::new().flex_row(), &[a, b]);
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.widget_type_name(root), Some("Container"));
    }
}
