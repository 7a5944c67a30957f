//! Tabbed pages
//!
//! A [`TabContainer`] is a column holding a strip of [`Tab`]s above a
//! content area with one page per tab. Only the selected page is laid out:
//! the others have `display: none`. Switching is plain tree mutation, so it
//! works the same from input (pointer down on a tab, Enter/Space on the
//! focused tab, Left/Right to move between tabs) and from code through
//! [`TabContainer::select`].
//!
//! Tabs do not handle input themselves; the container sees their events in
//! the bubble phase.

use std::fmt;

use plume_core::{event_types, Color, Event, EventResult, KeyCode, MouseButton, Size};
use plume_layout::{ComputedStyle, ContentPaint, Display, EventContext, EventPhase, EventTarget};
use plume_layout::{Measurable, Paintable, TextAlign, TextMeasurer, TreeOp, Widget, WidgetId};
use plume_layout::{WidgetStyle, WidgetTree};
use plume_theme::{ColorToken, SizeToken, SpacingToken};
use tracing::{debug, warn};

use crate::container::Container;
use crate::text::{label_baseline, label_size, paint_label};

/// One entry of the tab strip
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tab {
    label: String,
}

impl Tab {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn default_style() -> WidgetStyle {
        WidgetStyle::new()
            .border_box()
            .padding_xy(SpacingToken::Space3, 0.0)
            .text_align(TextAlign::Center)
            .flex_shrink(0.0)
            .focus(WidgetStyle::new().outline(1.0, ColorToken::BorderFocus))
    }

    /// Overrides for the selected tab
    pub fn selected_style() -> WidgetStyle {
        WidgetStyle::new()
            .background(ColorToken::TabActive)
            .text_color(ColorToken::TextPrimary)
            .border_bottom(2.0, ColorToken::Accent)
            .hover(WidgetStyle::new().background(ColorToken::TabActive))
    }

    /// Overrides for every other tab; sets the same fields as
    /// [`Tab::selected_style`] so either can replace the other by merging
    pub fn unselected_style() -> WidgetStyle {
        WidgetStyle::new()
            .background(ColorToken::TabInactive)
            .text_color(ColorToken::TextSecondary)
            .border_bottom(2.0, Color::TRANSPARENT)
            .hover(WidgetStyle::new().background(ColorToken::TabHover))
    }
}

impl Measurable for Tab {
    fn content_size(&self, style: &ComputedStyle, measurer: &dyn TextMeasurer) -> Option<Size> {
        Some(label_size(&self.label, style, measurer))
    }

    fn baseline(&self, style: &ComputedStyle, measurer: &dyn TextMeasurer) -> Option<f32> {
        Some(label_baseline(&self.label, style, measurer))
    }
}

impl Paintable for Tab {
    fn paint_content(&self, cx: &mut ContentPaint<'_>) {
        paint_label(&self.label, cx);
    }
}

impl EventTarget for Tab {
    fn focusable(&self) -> bool {
        true
    }
}

impl Widget for Tab {
    fn type_name(&self) -> &'static str {
        "Tab"
    }
}

type ChangeHandler = Box<dyn FnMut(usize, &mut EventContext)>;

pub struct TabContainer {
    strip: WidgetId,
    content: WidgetId,
    tabs: Vec<WidgetId>,
    pages: Vec<WidgetId>,
    /// Display each page gets back when shown
    page_displays: Vec<Display>,
    selected: Option<usize>,
    on_change: Option<ChangeHandler>,
}

impl TabContainer {
    pub fn default_style() -> WidgetStyle {
        WidgetStyle::new().flex_col().border_box()
    }

    pub fn strip_style() -> WidgetStyle {
        WidgetStyle::new()
            .flex_row()
            .border_box()
            .height(SizeToken::TabHeight)
            .flex_shrink(0.0)
            .background(ColorToken::Surface)
            .border_bottom(1.0, ColorToken::Border)
    }

    pub fn content_style() -> WidgetStyle {
        WidgetStyle::new().flex_col().flex_grow(1.0).min_height(0.0)
    }

    /// Build an empty tab container and return its root. `style` is layered
    /// over [`TabContainer::default_style`].
    pub fn build(tree: &mut WidgetTree, style: WidgetStyle) -> WidgetId {
        let strip = Container::insert(tree, Self::strip_style());
        let content = Container::insert(tree, Self::content_style());
        let container = TabContainer {
            strip,
            content,
            tabs: Vec::new(),
            pages: Vec::new(),
            page_displays: Vec::new(),
            selected: None,
            on_change: None,
        };
        let root = tree.insert_widget(container, Self::default_style().merged(&style));
        tree.add_child(root, strip);
        tree.add_child(root, content);
        root
    }

    /// Add a tab titled `title` with a new page styled `page_style`, and
    /// return the page so content can be added to it. The first tab added
    /// becomes selected.
    pub fn add_tab(
        tree: &mut WidgetTree,
        container: WidgetId,
        title: impl Into<String>,
        page_style: WidgetStyle,
    ) -> Option<WidgetId> {
        let Some(first) = tree
            .widget::<TabContainer>(container)
            .map(|c| c.tabs.is_empty())
        else {
            warn!(?container, "add_tab on a node that is not a tab container");
            return None;
        };

        let display = page_style.display.unwrap_or(Display::Block);
        let (tab_style, page_display) = if first {
            (Tab::selected_style(), display)
        } else {
            (Tab::unselected_style(), Display::None)
        };
        let tab = tree.insert_widget(Tab::new(title), Tab::default_style().merged(&tab_style));
        let page = Container::insert(tree, page_style.display(page_display));

        let c = tree.widget_mut::<TabContainer>(container)?;
        c.tabs.push(tab);
        c.pages.push(page);
        c.page_displays.push(display);
        if first {
            c.selected = Some(0);
        }
        let (strip, content) = (c.strip, c.content);
        tree.add_child(strip, tab);
        tree.add_child(content, page);
        Some(page)
    }

    /// Select tab `index`. Returns false when out of range or when
    /// `container` is not a tab container.
    pub fn select(tree: &mut WidgetTree, container: WidgetId, index: usize) -> bool {
        let Some(c) = tree.widget_mut::<TabContainer>(container) else {
            warn!(?container, "select on a node that is not a tab container");
            return false;
        };
        if index >= c.tabs.len() {
            return false;
        }
        let ops = c.selection_ops(index);
        tree.apply_ops(ops);
        true
    }

    /// Callback run when input changes the selection
    pub fn set_on_change<F: FnMut(usize, &mut EventContext) + 'static>(&mut self, callback: F) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn tabs(&self) -> &[WidgetId] {
        &self.tabs
    }

    pub fn pages(&self) -> &[WidgetId] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<WidgetId> {
        self.pages.get(index).copied()
    }

    pub fn strip(&self) -> WidgetId {
        self.strip
    }

    fn selection_ops(&mut self, index: usize) -> Vec<TreeOp> {
        debug!(index, previous = ?self.selected, "tab selected");
        self.selected = Some(index);
        let mut ops = Vec::with_capacity(self.tabs.len() * 2);
        for (i, (&tab, &page)) in self.tabs.iter().zip(&self.pages).enumerate() {
            let (style, display) = if i == index {
                (Tab::selected_style(), self.page_displays[i])
            } else {
                (Tab::unselected_style(), Display::None)
            };
            ops.push(TreeOp::MergeStyle { id: tab, style });
            ops.push(TreeOp::SetDisplay { id: page, display });
        }
        ops
    }

    fn change_to(&mut self, index: usize, cx: &mut EventContext) -> EventResult {
        if self.selected != Some(index) {
            for op in self.selection_ops(index) {
                cx.push(op);
            }
            if let Some(callback) = self.on_change.as_mut() {
                callback(index, cx);
            }
        }
        EventResult::Handled
    }
}

impl fmt::Debug for TabContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabContainer")
            .field("tabs", &self.tabs)
            .field("pages", &self.pages)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl Measurable for TabContainer {}

impl Paintable for TabContainer {
    fn paint_content(&self, _cx: &mut ContentPaint<'_>) {}
}

impl EventTarget for TabContainer {
    fn handle_event(&mut self, event: &Event, cx: &mut EventContext) -> EventResult {
        if cx.phase() != EventPhase::Bubble {
            return EventResult::Ignored;
        }
        let Some(index) = self.tabs.iter().position(|&t| t == cx.target()) else {
            return EventResult::Ignored;
        };
        let count = self.tabs.len();

        match event.event_type {
            event_types::POINTER_DOWN if event.button == MouseButton::Left => {
                self.change_to(index, cx)
            }
            event_types::KEY_DOWN => {
                let next = match event.key {
                    KeyCode::ENTER | KeyCode::SPACE => index,
                    KeyCode::LEFT => (index + count - 1) % count,
                    KeyCode::RIGHT => (index + 1) % count,
                    _ => return EventResult::Ignored,
                };
                if next != index {
                    cx.focus(Some(self.tabs[next]));
                }
                self.change_to(next, cx)
            }
            _ => EventResult::Ignored,
        }
    }
}

impl Widget for TabContainer {
    fn type_name(&self) -> &'static str {
        "TabContainer"
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use plume_core::Modifiers;
    use plume_layout::EstimatedTextMeasurer;
    use plume_theme::ScaledTheme;

    use super::*;

    fn tabs(titles: &[&str]) -> (WidgetTree, WidgetId) {
        let mut tree = WidgetTree::new();
        tree.set_viewport(Size::new(400.0, 300.0));
        let root = TabContainer::build(&mut tree, WidgetStyle::new().size(400.0, 300.0));
        tree.set_root(root);
        for title in titles {
            TabContainer::add_tab(&mut tree, root, *title, WidgetStyle::new().flex_1()).unwrap();
        }
        tree.resolve(&ScaledTheme::default(), &EstimatedTextMeasurer);
        (tree, root)
    }

    fn container(tree: &WidgetTree, id: WidgetId) -> &TabContainer {
        tree.widget::<TabContainer>(id).unwrap()
    }

    fn display(tree: &WidgetTree, id: WidgetId) -> Display {
        tree.computed_style(id).unwrap().display
    }

    #[test]
    fn test_first_tab_selected() {
        let (tree, root) = tabs(&["Scene", "Render", "Output"]);
        let c = container(&tree, root);
        assert_eq!(c.selected(), Some(0));
        assert_eq!(display(&tree, c.pages()[0]), Display::Block);
        assert_eq!(display(&tree, c.pages()[1]), Display::None);
        assert_eq!(display(&tree, c.pages()[2]), Display::None);

        // The visible page fills the content area below the strip
        let page = tree.bounds(c.pages()[0]).unwrap();
        assert!((page.y() - 28.0).abs() < 1e-3);
        assert!((page.height() - 272.0).abs() < 1e-3);
    }

    #[test]
    fn test_select_keeps_page_display() {
        let mut tree = WidgetTree::new();
        let root = TabContainer::build(&mut tree, WidgetStyle::new());
        TabContainer::add_tab(&mut tree, root, "A", WidgetStyle::new()).unwrap();
        let grid = TabContainer::add_tab(&mut tree, root, "B", WidgetStyle::new().grid()).unwrap();
        assert_eq!(tree.style(grid).unwrap().display, Some(Display::None));

        assert!(TabContainer::select(&mut tree, root, 1));
        assert_eq!(tree.style(grid).unwrap().display, Some(Display::Grid));
        assert!(!TabContainer::select(&mut tree, root, 5));
        assert_eq!(container(&tree, root).selected(), Some(1));
    }

    #[test]
    fn test_pointer_switches_tabs() {
        let (mut tree, root) = tabs(&["Scene", "Render"]);
        let changes = Rc::new(RefCell::new(Vec::new()));
        let seen = changes.clone();
        tree.widget_mut::<TabContainer>(root)
            .unwrap()
            .set_on_change(move |index, _| seen.borrow_mut().push(index));

        let second = container(&tree, root).tabs()[1];
        let at = tree.bounds(second).unwrap().center();
        let result = tree.dispatch_event(&Event::pointer(event_types::POINTER_DOWN, at.x, at.y));
        assert!(result.is_handled());
        tree.resolve(&ScaledTheme::default(), &EstimatedTextMeasurer);

        let c = container(&tree, root);
        assert_eq!(c.selected(), Some(1));
        assert_eq!(display(&tree, c.pages()[0]), Display::None);
        assert_eq!(display(&tree, c.pages()[1]), Display::Block);
        assert_eq!(tree.focused(), Some(second));
        assert_eq!(*changes.borrow(), vec![1]);

        let theme = ScaledTheme::default();
        let bg = tree.computed_style(second).unwrap().background_color;
        assert_eq!(bg, theme.color(ColorToken::TabActive));
    }

    #[test]
    fn test_arrow_keys_wrap() {
        let (mut tree, root) = tabs(&["A", "B", "C"]);
        let first = container(&tree, root).tabs()[0];
        tree.set_focus(Some(first));

        let left = Event::key(event_types::KEY_DOWN, KeyCode::LEFT, Modifiers::NONE);
        assert!(tree.dispatch_event(&left).is_handled());
        let c = container(&tree, root);
        assert_eq!(c.selected(), Some(2));
        assert_eq!(tree.focused(), Some(c.tabs()[2]));

        let right = Event::key(event_types::KEY_DOWN, KeyCode::RIGHT, Modifiers::NONE);
        tree.dispatch_event(&right);
        assert_eq!(container(&tree, root).selected(), Some(0));
    }
}
