//! Input event surface
//!
//! Platform layers translate window-system input into [`Event`]s. The widget
//! tree routes them top-down then bottom-up and reports an [`EventResult`]
//! back to whichever router owns priority, modal and capture policy.

use crate::geometry::Point;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    pub const FOCUS: EventType = 10;
    pub const BLUR: EventType = 11;
    pub const KEY_DOWN: EventType = 20;
    pub const KEY_UP: EventType = 21;
    pub const SCROLL: EventType = 30;

    /// Whether the event carries a meaningful pointer position
    pub fn is_pointer(event_type: EventType) -> bool {
        matches!(
            event_type,
            POINTER_DOWN | POINTER_UP | POINTER_MOVE | POINTER_ENTER | POINTER_LEAVE | SCROLL
        )
    }
}

/// Pointer button
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
    Other(u8),
}

/// Virtual key codes (platform-agnostic)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const TAB: KeyCode = KeyCode(0x09);
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);
    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const UP: KeyCode = KeyCode(0x26);
    pub const RIGHT: KeyCode = KeyCode(0x27);
    pub const DOWN: KeyCode = KeyCode(0x28);

    // Unknown/unmapped key
    pub const UNKNOWN: KeyCode = KeyCode(0);
}

/// Keyboard modifier flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { bits: 0 };
    pub const SHIFT: u8 = 0b0001;
    pub const CTRL: u8 = 0b0010;
    pub const ALT: u8 = 0b0100;
    pub const META: u8 = 0b1000; // Cmd on macOS, Win on Windows

    pub const fn new(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0;
        if shift {
            bits |= Self::SHIFT;
        }
        if ctrl {
            bits |= Self::CTRL;
        }
        if alt {
            bits |= Self::ALT;
        }
        if meta {
            bits |= Self::META;
        }
        Self { bits }
    }

    pub fn shift(&self) -> bool {
        self.bits & Self::SHIFT != 0
    }

    pub fn ctrl(&self) -> bool {
        self.bits & Self::CTRL != 0
    }

    pub fn alt(&self) -> bool {
        self.bits & Self::ALT != 0
    }

    pub fn meta(&self) -> bool {
        self.bits & Self::META != 0
    }
}

/// A UI input event
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    /// Pointer position in window coordinates
    pub position: Point,
    /// Scroll or drag delta
    pub delta: Point,
    pub button: MouseButton,
    pub modifiers: Modifiers,
    /// Key for keyboard events, `KeyCode::UNKNOWN` otherwise
    pub key: KeyCode,
    /// Milliseconds since an arbitrary epoch
    pub timestamp: u64,
}

impl Event {
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            position: Point::ZERO,
            delta: Point::ZERO,
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
            key: KeyCode::UNKNOWN,
            timestamp: 0,
        }
    }

    pub fn pointer(event_type: EventType, x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
            ..Self::new(event_type)
        }
    }

    pub fn scroll(x: f32, y: f32, delta_x: f32, delta_y: f32) -> Self {
        Self {
            delta: Point::new(delta_x, delta_y),
            ..Self::pointer(event_types::SCROLL, x, y)
        }
    }

    pub fn key(event_type: EventType, key: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            ..Self::new(event_type)
        }
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn is_pointer(&self) -> bool {
        event_types::is_pointer(self.event_type)
    }
}

/// Outcome of offering an event to a widget
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventResult {
    /// Consumed; routing stops here
    Handled,
    /// Not interested
    #[default]
    Ignored,
    /// Acted on, but other widgets should still see the event
    PassThrough,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Handled)
    }

    /// Fold two results: Handled dominates PassThrough, which dominates Ignored
    pub fn or(self, other: EventResult) -> EventResult {
        match (self, other) {
            (EventResult::Handled, _) | (_, EventResult::Handled) => EventResult::Handled,
            (EventResult::PassThrough, _) | (_, EventResult::PassThrough) => {
                EventResult::PassThrough
            }
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_flags() {
        let m = Modifiers::new(true, false, true, false);
        assert!(m.shift());
        assert!(!m.ctrl());
        assert!(m.alt());
        assert!(!m.meta());
    }

    #[test]
    fn test_event_result_fold() {
        use EventResult::*;
        assert_eq!(Ignored.or(PassThrough), PassThrough);
        assert_eq!(PassThrough.or(Handled), Handled);
        assert_eq!(Ignored.or(Ignored), Ignored);
    }

    #[test]
    fn test_scroll_carries_delta() {
        let e = Event::scroll(1.0, 2.0, 0.0, -3.0).with_timestamp(42);
        assert!(e.is_pointer());
        assert_eq!(e.delta, Point::new(0.0, -3.0));
        assert_eq!(e.timestamp, 42);
    }
}
