//! Push button
//!
//! The button's look is plain [`WidgetStyle`]: theme tokens for the idle
//! look plus hover, active, focus and disabled sub-styles that the tree
//! cascades from interaction state. The widget itself only tracks the press
//! and fires the click callback.
//!
//! A click is a pointer down followed by a pointer up on the button, or
//! Enter/Space while it has keyboard focus. Leaving the button or losing
//! focus cancels a press. Disabled buttons receive no events at all.

use std::fmt;

use plume_core::{event_types, Event, EventResult, KeyCode, MouseButton, Size};
use plume_layout::{ComputedStyle, ContentPaint, EventContext, EventPhase, EventTarget};
use plume_layout::{Measurable, Paintable, TextAlign, TextMeasurer, Widget, WidgetId};
use plume_layout::{WidgetStyle, WidgetTree};
use plume_theme::{ColorToken, RadiusToken, SizeToken, SpacingToken};
use tracing::trace;

use crate::text::{label_baseline, label_size, paint_label};

type ClickHandler = Box<dyn FnMut(&mut EventContext)>;

pub struct Button {
    label: String,
    on_click: Option<ClickHandler>,
    pressed: bool,
    /// Set on click, cleared by [`Button::take_clicked`]
    clicked: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            on_click: None,
            pressed: false,
            clicked: false,
        }
    }

    /// Set the click callback. It may queue tree mutations on the context.
    pub fn on_click<F: FnMut(&mut EventContext) + 'static>(mut self, callback: F) -> Self {
        self.on_click = Some(Box::new(callback));
        self
    }

    /// Theme-driven look for every interaction state
    pub fn default_style() -> WidgetStyle {
        WidgetStyle::new()
            .inline_block()
            .border_box()
            .height(SizeToken::ControlHeight)
            .padding_xy(SpacingToken::Space3, SpacingToken::Space1)
            .background(ColorToken::ControlBg)
            .text_color(ColorToken::TextPrimary)
            .text_align(TextAlign::Center)
            .border(1.0, ColorToken::Border)
            .rounded(RadiusToken::Default)
            .hover(
                WidgetStyle::new()
                    .background(ColorToken::ControlBgHover)
                    .border_color(ColorToken::BorderHover),
            )
            .active(WidgetStyle::new().background(ColorToken::ControlBgActive))
            .focus(
                WidgetStyle::new()
                    .outline(2.0, ColorToken::BorderFocus)
                    .outline_offset(1.0),
            )
            .disabled(
                WidgetStyle::new()
                    .background(ColorToken::ControlBgDisabled)
                    .text_color(ColorToken::TextDisabled)
                    .border_color(ColorToken::Border),
            )
    }

    /// Insert the button with `style` layered over [`Button::default_style`]
    pub fn insert(self, tree: &mut WidgetTree, style: WidgetStyle) -> WidgetId {
        tree.insert_widget(self, Self::default_style().merged(&style))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Whether the button was clicked since the last call
    pub fn take_clicked(&mut self) -> bool {
        std::mem::take(&mut self.clicked)
    }

    fn click(&mut self, cx: &mut EventContext) -> EventResult {
        trace!(label = %self.label, "button clicked");
        self.pressed = false;
        self.clicked = true;
        if let Some(callback) = self.on_click.as_mut() {
            callback(cx);
        }
        EventResult::Handled
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("label", &self.label)
            .field("pressed", &self.pressed)
            .field("has_on_click", &self.on_click.is_some())
            .finish()
    }
}

impl Measurable for Button {
    fn content_size(&self, style: &ComputedStyle, measurer: &dyn TextMeasurer) -> Option<Size> {
        Some(label_size(&self.label, style, measurer))
    }

    fn baseline(&self, style: &ComputedStyle, measurer: &dyn TextMeasurer) -> Option<f32> {
        Some(label_baseline(&self.label, style, measurer))
    }
}

impl Paintable for Button {
    fn paint_content(&self, cx: &mut ContentPaint<'_>) {
        paint_label(&self.label, cx);
    }
}

impl EventTarget for Button {
    fn handle_event(&mut self, event: &Event, cx: &mut EventContext) -> EventResult {
        // Children (an icon, say) are part of the button; ancestors' capture
        // phase is not
        if cx.phase() == EventPhase::Capture {
            return EventResult::Ignored;
        }
        match event.event_type {
            event_types::POINTER_DOWN if event.button == MouseButton::Left => {
                self.pressed = true;
                EventResult::Handled
            }
            event_types::POINTER_UP if event.button == MouseButton::Left => {
                if self.pressed {
                    self.click(cx)
                } else {
                    EventResult::Ignored
                }
            }
            event_types::POINTER_LEAVE | event_types::BLUR => {
                self.pressed = false;
                EventResult::Ignored
            }
            event_types::KEY_DOWN if event.key == KeyCode::ENTER || event.key == KeyCode::SPACE => {
                self.click(cx)
            }
            _ => EventResult::Ignored,
        }
    }

    fn focusable(&self) -> bool {
        true
    }
}

impl Widget for Button {
    fn type_name(&self) -> &'static str {
        "Button"
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use plume_core::{Color, Modifiers};
    use plume_layout::EstimatedTextMeasurer;
    use plume_theme::ScaledTheme;

    use super::*;

    struct Fixture {
        tree: WidgetTree,
        theme: ScaledTheme,
        button: WidgetId,
        clicks: Rc<Cell<u32>>,
    }

    impl Fixture {
        fn new() -> Self {
            let theme = ScaledTheme::default();
            let mut tree = WidgetTree::new();
            tree.set_viewport(Size::new(300.0, 100.0));
            let root = tree.insert(WidgetStyle::new().padding(10.0));
            tree.set_root(root);

            let clicks = Rc::new(Cell::new(0));
            let counter = clicks.clone();
            let button = Button::new("Apply")
                .on_click(move |_| counter.set(counter.get() + 1))
                .insert(&mut tree, WidgetStyle::new());
            tree.add_child(root, button);
            tree.resolve(&theme, &EstimatedTextMeasurer);
            Self {
                tree,
                theme,
                button,
                clicks,
            }
        }

        fn center(&self) -> (f32, f32) {
            let c = self.tree.bounds(self.button).unwrap().center();
            (c.x, c.y)
        }

        fn send(&mut self, event_type: u32, x: f32, y: f32) {
            self.tree.dispatch_event(&Event::pointer(event_type, x, y));
            self.tree.resolve(&self.theme, &EstimatedTextMeasurer);
        }

        fn background(&self) -> Color {
            self.tree
                .computed_style(self.button)
                .unwrap()
                .background_color
        }
    }

    #[test]
    fn test_height_and_shrink_wrapped_width() {
        let f = Fixture::new();
        let b = f.tree.bounds(f.button).unwrap();
        assert!((b.height() - 28.0).abs() < 1e-4);
        // 5 chars at 13px * 0.55, 12px padding and 1px border per side
        let expected = 5.0 * 13.0 * 0.55 + 24.0 + 2.0;
        assert!((b.width() - expected).abs() < 1e-3, "width {}", b.width());
    }

    #[test]
    fn test_pointer_click() {
        let mut f = Fixture::new();
        let (x, y) = f.center();
        f.send(event_types::POINTER_DOWN, x, y);
        assert!(f.tree.widget::<Button>(f.button).unwrap().is_pressed());
        assert_eq!(f.clicks.get(), 0);

        f.send(event_types::POINTER_UP, x, y);
        assert_eq!(f.clicks.get(), 1);
        assert!(f.tree.widget_mut::<Button>(f.button).unwrap().take_clicked());
        assert!(!f.tree.widget_mut::<Button>(f.button).unwrap().take_clicked());
    }

    #[test]
    fn test_release_outside_does_not_click() {
        let mut f = Fixture::new();
        let (x, y) = f.center();
        f.send(event_types::POINTER_MOVE, x, y);
        f.send(event_types::POINTER_DOWN, x, y);
        f.send(event_types::POINTER_MOVE, 290.0, 90.0);
        f.send(event_types::POINTER_UP, 290.0, 90.0);
        assert_eq!(f.clicks.get(), 0);
        assert!(!f.tree.widget::<Button>(f.button).unwrap().is_pressed());
    }

    #[test]
    fn test_keyboard_click_when_focused() {
        let mut f = Fixture::new();
        let enter = Event::key(event_types::KEY_DOWN, KeyCode::ENTER, Modifiers::NONE);
        f.tree.dispatch_event(&enter);
        assert_eq!(f.clicks.get(), 0);

        f.tree.set_focus(Some(f.button));
        f.tree.dispatch_event(&enter);
        f.tree.dispatch_event(&Event::key(
            event_types::KEY_DOWN,
            KeyCode::SPACE,
            Modifiers::NONE,
        ));
        assert_eq!(f.clicks.get(), 2);
    }

    #[test]
    fn test_disabled_button_ignores_input() {
        let mut f = Fixture::new();
        f.tree.set_disabled(f.button, true);
        f.tree.resolve(&f.theme, &EstimatedTextMeasurer);
        let (x, y) = f.center();
        f.send(event_types::POINTER_DOWN, x, y);
        f.send(event_types::POINTER_UP, x, y);
        assert_eq!(f.clicks.get(), 0);
        assert_eq!(f.tree.focused(), None);

        assert_eq!(f.background(), f.theme.color(ColorToken::ControlBgDisabled));
    }

    #[test]
    fn test_state_styles_cascade() {
        let mut f = Fixture::new();
        let idle = f.theme.color(ColorToken::ControlBg);
        let hover = f.theme.color(ColorToken::ControlBgHover);
        let active = f.theme.color(ColorToken::ControlBgActive);
        assert_eq!(f.background(), idle);

        let (x, y) = f.center();
        f.send(event_types::POINTER_MOVE, x, y);
        assert_eq!(f.background(), hover);

        f.send(event_types::POINTER_DOWN, x, y);
        assert_eq!(f.background(), active);
        let style = f.tree.computed_style(f.button).unwrap();
        assert_eq!(style.outline_widths.top, 2.0);
    }
}
