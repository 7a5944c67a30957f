//! Event routing
//!
//! Pointer events are hit tested against the laid out tree and travel the
//! path from the root to the deepest hit node: a capture phase down the
//! ancestors, the target itself, then a bubble phase back up. Keyboard
//! events travel the same way to the focused node.
//!
//! Handlers never touch the tree directly. They queue [`TreeOp`]s on the
//! [`EventContext`], which the tree applies once routing is done.

use plume_core::{event_types, Event, EventResult, KeyCode, Point};
use plume_paint::sdf::rounded_rect_contains;
use tracing::trace;

use crate::style::{Display, Overflow, Visibility, WidgetStyle};
use crate::tree::{WidgetId, WidgetTree};

/// A tree mutation requested by an event handler
#[derive(Clone, Debug, PartialEq)]
pub enum TreeOp {
    SetDisplay { id: WidgetId, display: Display },
    /// Merge set fields into the node's base style
    MergeStyle { id: WidgetId, style: WidgetStyle },
    SetStyle { id: WidgetId, style: WidgetStyle },
    SetDisabled { id: WidgetId, disabled: bool },
    InvalidateStyle(WidgetId),
    InvalidateLayout(WidgetId),
    Focus(Option<WidgetId>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventPhase {
    /// Ancestors, root first, before the target
    Capture,
    Target,
    /// Ancestors, nearest first, after the target
    Bubble,
}

/// What a handler knows about the event being routed, and where it queues
/// its tree mutations
#[derive(Debug)]
pub struct EventContext {
    target: WidgetId,
    current: WidgetId,
    phase: EventPhase,
    ops: Vec<TreeOp>,
    stopped: bool,
}

impl EventContext {
    pub fn new(target: WidgetId) -> Self {
        Self {
            target,
            current: target,
            phase: EventPhase::Target,
            ops: Vec::new(),
            stopped: false,
        }
    }

    /// Deepest node the event was routed to
    pub fn target(&self) -> WidgetId {
        self.target
    }

    /// Node whose handler is running
    pub fn current(&self) -> WidgetId {
        self.current
    }

    pub fn phase(&self) -> EventPhase {
        self.phase
    }

    /// Stop routing after the current handler
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn push(&mut self, op: TreeOp) {
        self.ops.push(op);
    }

    pub fn set_display(&mut self, id: WidgetId, display: Display) {
        self.push(TreeOp::SetDisplay { id, display });
    }

    pub fn merge_style(&mut self, id: WidgetId, style: WidgetStyle) {
        self.push(TreeOp::MergeStyle { id, style });
    }

    pub fn set_disabled(&mut self, id: WidgetId, disabled: bool) {
        self.push(TreeOp::SetDisabled { id, disabled });
    }

    pub fn focus(&mut self, id: Option<WidgetId>) {
        self.push(TreeOp::Focus(id));
    }

    pub fn ops(&self) -> &[TreeOp] {
        &self.ops
    }

    fn enter(&mut self, current: WidgetId, phase: EventPhase) {
        self.current = current;
        self.phase = phase;
    }
}

impl WidgetTree {
    /// Path from the root to the deepest node under `point`, in window
    /// coordinates. Empty when nothing is hit.
    pub fn hit_path(&self, point: Point) -> Vec<WidgetId> {
        let mut path = Vec::new();
        if let Some(root) = self.root() {
            self.hit_node(root, point, &mut path);
        }
        path.reverse();
        path
    }

    /// Deepest node under `point`
    pub fn hit_test(&self, point: Point) -> Option<WidgetId> {
        self.hit_path(point).last().copied()
    }

    /// Pushes the hit path leaf first
    fn hit_node(&self, id: WidgetId, point: Point, path: &mut Vec<WidgetId>) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        let style = &node.computed;
        if style.display == Display::None {
            return false;
        }

        let bounds = node.bounds;
        let point = if style.transform.is_identity() {
            point
        } else {
            match style.transform.about(bounds.center()).inverse() {
                Some(inverse) => inverse.transform_point(point),
                None => return false,
            }
        };

        let radius = style.border_radius.clamped_to(bounds.size);
        let inside = rounded_rect_contains(point, &bounds, &radius);
        let clipped = style.overflow == Overflow::Hidden && !inside;

        if !clipped {
            // Positioned children paint last, so they are tested first
            let (positioned, in_flow): (Vec<WidgetId>, Vec<WidgetId>) = node
                .children
                .iter()
                .partition(|c| self.nodes[**c].computed.is_absolute());
            for &child in positioned.iter().rev().chain(in_flow.iter().rev()) {
                if self.hit_node(child, point, path) {
                    path.push(id);
                    return true;
                }
            }
        }

        if inside && style.visibility == Visibility::Visible {
            path.push(id);
            return true;
        }
        false
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Nodes under the pointer, root first
    pub fn hovered(&self) -> &[WidgetId] {
        &self.hovered
    }

    /// Neither the node nor any of its ancestors is disabled
    pub fn is_enabled(&self, id: WidgetId) -> bool {
        self.contains(id) && self.ancestry(id).iter().all(|a| !self.state(*a).disabled)
    }

    /// Move keyboard focus, delivering `BLUR` and `FOCUS` to the nodes
    /// involved. Nodes inside a disabled subtree cannot take focus.
    pub fn set_focus(&mut self, id: Option<WidgetId>) {
        let id = id.filter(|id| self.is_enabled(*id));
        if self.focused == id {
            return;
        }
        if let Some(old) = self.focused.take() {
            self.update_state(old, |s| s.focused = false);
            self.deliver(old, &Event::new(event_types::BLUR));
        }
        if let Some(new) = id {
            self.focused = Some(new);
            self.update_state(new, |s| s.focused = true);
            self.deliver(new, &Event::new(event_types::FOCUS));
        }
    }

    /// Route an input event through the tree and apply the mutations its
    /// handlers queued
    pub fn dispatch_event(&mut self, event: &Event) -> EventResult {
        match event.event_type {
            event_types::POINTER_MOVE => {
                let path = self.hit_path(event.position);
                self.update_hover(&path, event.position);
                self.route(&path, event)
            }
            event_types::POINTER_DOWN => {
                let path = self.enabled(self.hit_path(event.position));
                for &id in &path {
                    self.update_state(id, |s| s.active = true);
                }
                self.active = path.clone();
                let focus = path
                    .iter()
                    .rev()
                    .copied()
                    .find(|id| self.is_focusable(*id));
                self.set_focus(focus);
                self.route(&path, event)
            }
            event_types::POINTER_UP => {
                let path = self.hit_path(event.position);
                let result = self.route(&path, event);
                for id in std::mem::take(&mut self.active) {
                    self.update_state(id, |s| s.active = false);
                }
                result
            }
            event_types::POINTER_LEAVE => {
                self.update_hover(&[], event.position);
                EventResult::Ignored
            }
            event_types::KEY_DOWN | event_types::KEY_UP => {
                let path = match self.focused {
                    Some(focused) => self.ancestry(focused),
                    None => self.root().into_iter().collect(),
                };
                let result = self.route(&path, event);
                if !result.is_handled()
                    && event.event_type == event_types::KEY_DOWN
                    && event.key == KeyCode::TAB
                {
                    self.focus_next(event.modifiers.shift());
                    return EventResult::Handled;
                }
                result
            }
            _ => {
                let path = self.hit_path(event.position);
                self.route(&path, event)
            }
        }
    }

    fn is_focusable(&self, id: WidgetId) -> bool {
        self.nodes
            .get(id)
            .and_then(|n| n.widget.as_deref())
            .is_some_and(|w| w.focusable())
            && self.is_enabled(id)
    }

    /// Move focus to the next (or previous) focusable node in tree order
    fn focus_next(&mut self, backwards: bool) {
        let Some(root) = self.root() else {
            return;
        };
        let mut order: Vec<WidgetId> = self
            .descendants(root)
            .into_iter()
            .filter(|id| self.is_focusable(*id) && self.is_displayed(*id))
            .collect();
        if backwards {
            order.reverse();
        }
        let next = match self.focused.and_then(|f| order.iter().position(|id| *id == f)) {
            Some(i) => order.get(i + 1).or(order.first()).copied(),
            None => order.first().copied(),
        };
        self.set_focus(next);
    }

    /// Neither the node nor an ancestor has `display: none`
    fn is_displayed(&self, id: WidgetId) -> bool {
        self.ancestry(id)
            .iter()
            .all(|a| self.nodes[*a].computed.display != Display::None)
    }

    /// Root first, ending at `id`
    fn ancestry(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            path.push(c);
            current = self.parent(c);
        }
        path.reverse();
        path
    }

    /// Cut a root-first path at its first disabled node; nothing at or
    /// below it takes part in routing
    fn enabled(&self, path: Vec<WidgetId>) -> Vec<WidgetId> {
        path.into_iter()
            .take_while(|id| !self.state(*id).disabled)
            .collect()
    }

    fn update_hover(&mut self, path: &[WidgetId], position: Point) {
        let hovered = self.enabled(path.to_vec());
        let left: Vec<WidgetId> = self
            .hovered
            .iter()
            .copied()
            .filter(|id| !hovered.contains(id))
            .collect();
        let entered: Vec<WidgetId> = hovered
            .iter()
            .copied()
            .filter(|id| !self.hovered.contains(id))
            .collect();
        self.hovered = hovered;

        // Leaves go deepest first, enters root first
        for id in left.into_iter().rev() {
            self.update_state(id, |s| s.hovered = false);
            self.deliver(
                id,
                &Event::pointer(event_types::POINTER_LEAVE, position.x, position.y),
            );
        }
        for id in entered {
            self.update_state(id, |s| s.hovered = true);
            self.deliver(
                id,
                &Event::pointer(event_types::POINTER_ENTER, position.x, position.y),
            );
        }
    }

    /// Deliver to one node without propagation
    fn deliver(&mut self, id: WidgetId, event: &Event) -> EventResult {
        let mut cx = EventContext::new(id);
        let result = self.call_handler(id, event, &mut cx);
        self.apply_ops(cx.ops);
        result
    }

    /// Capture, target and bubble along `path` (root first)
    fn route(&mut self, path: &[WidgetId], event: &Event) -> EventResult {
        let path = self.enabled(path.to_vec());
        let Some(&target) = path.last() else {
            return EventResult::Ignored;
        };
        let ancestors = &path[..path.len() - 1];
        let mut cx = EventContext::new(target);
        let mut result = EventResult::Ignored;

        let steps = ancestors
            .iter()
            .map(|id| (*id, EventPhase::Capture))
            .chain(std::iter::once((target, EventPhase::Target)))
            .chain(ancestors.iter().rev().map(|id| (*id, EventPhase::Bubble)));
        for (id, phase) in steps {
            cx.enter(id, phase);
            result = result.or(self.call_handler(id, event, &mut cx));
            if result.is_handled() || cx.stopped {
                break;
            }
        }
        trace!(event = event.event_type, ?result, "event routed");
        self.apply_ops(cx.ops);
        result
    }

    fn call_handler(&mut self, id: WidgetId, event: &Event, cx: &mut EventContext) -> EventResult {
        match self.nodes.get_mut(id).and_then(|n| n.widget.as_deref_mut()) {
            Some(widget) => widget.handle_event(event, cx),
            None => EventResult::Ignored,
        }
    }

    /// Apply queued mutations in order, as if a handler had requested them
    pub fn apply_ops(&mut self, ops: Vec<TreeOp>) {
        for op in ops {
            match op {
                TreeOp::SetDisplay { id, display } => {
                    self.update_style(id, |s| s.display = Some(display));
                }
                TreeOp::MergeStyle { id, style } => self.update_style(id, |s| s.merge(&style)),
                TreeOp::SetStyle { id, style } => self.set_style(id, style),
                TreeOp::SetDisabled { id, disabled } => {
                    self.set_disabled(id, disabled);
                    if disabled && self.focused.is_some_and(|f| self.is_ancestor(id, f)) {
                        self.set_focus(None);
                    }
                }
                TreeOp::InvalidateStyle(id) => self.invalidate_style(id),
                TreeOp::InvalidateLayout(id) => self.invalidate_layout(id),
                TreeOp::Focus(id) => self.set_focus(id),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use plume_core::Rect;
    use plume_theme::ScaledTheme;

    use super::*;
    use crate::text_measure::EstimatedTextMeasurer;
    use crate::widget::{EventTarget, Measurable, Paintable, Widget};

    type Log = Rc<RefCell<Vec<(&'static str, EventPhase, u32)>>>;

    struct Recorder {
        name: &'static str,
        log: Log,
        handle: bool,
        focusable: bool,
    }

    impl Measurable for Recorder {}
    impl Paintable for Recorder {}

    impl EventTarget for Recorder {
        fn handle_event(&mut self, event: &Event, cx: &mut EventContext) -> EventResult {
            self.log
                .borrow_mut()
                .push((self.name, cx.phase(), event.event_type));
            if self.handle && cx.phase() == EventPhase::Target {
                EventResult::Handled
            } else {
                EventResult::Ignored
            }
        }

        fn focusable(&self) -> bool {
            self.focusable
        }
    }

    impl Widget for Recorder {
        fn type_name(&self) -> &'static str {
            "Recorder"
        }
    }

    fn recorder(log: &Log, name: &'static str, focusable: bool) -> Recorder {
        Recorder {
            name,
            log: Rc::clone(log),
            handle: false,
            focusable,
        }
    }

    /// root (200x200) > outer (100x100 at 0,0) > inner (50x50 at 0,0)
    fn setup() -> (WidgetTree, Log, [WidgetId; 3]) {
        let log: Log = Rc::default();
        let mut tree = WidgetTree::new();
        let root = tree.insert_widget(
            recorder(&log, "root", false),
            WidgetStyle::new().size(200.0, 200.0),
        );
        let outer = tree.insert_widget(
            recorder(&log, "outer", false),
            WidgetStyle::new().size(100.0, 100.0),
        );
        let inner = tree.insert_widget(
            recorder(&log, "inner", true),
            WidgetStyle::new().size(50.0, 50.0),
        );
        tree.set_root(root);
        tree.add_child(root, outer);
        tree.add_child(outer, inner);
        tree.set_viewport(plume_core::Size::new(400.0, 400.0));
        tree.resolve(&ScaledTheme::default(), &EstimatedTextMeasurer);
        (tree, log, [root, outer, inner])
    }

    #[test]
    fn test_hit_path_reaches_deepest_node() {
        let (tree, _, [root, outer, inner]) = setup();
        assert_eq!(tree.hit_path(Point::new(10.0, 10.0)), vec![root, outer, inner]);
        assert_eq!(tree.hit_path(Point::new(75.0, 75.0)), vec![root, outer]);
        assert_eq!(tree.hit_test(Point::new(150.0, 150.0)), Some(root));
        assert!(tree.hit_path(Point::new(300.0, 300.0)).is_empty());
    }

    #[test]
    fn test_rounded_corners_are_not_hit() {
        let (mut tree, _, [_, outer, _]) = setup();
        tree.update_style(outer, |s| *s = s.clone().rounded(50.0));
        tree.resolve(&ScaledTheme::default(), &EstimatedTextMeasurer);
        // Inside outer's square but outside its rounded corner
        assert_eq!(tree.hit_test(Point::new(95.0, 95.0)), tree.root());
    }

    #[test]
    fn test_capture_target_bubble_order() {
        let (mut tree, log, _) = setup();
        tree.dispatch_event(&Event::pointer(event_types::SCROLL, 10.0, 10.0));
        let phases: Vec<_> = log.borrow().iter().map(|(n, p, _)| (*n, *p)).collect();
        assert_eq!(
            phases,
            vec![
                ("root", EventPhase::Capture),
                ("outer", EventPhase::Capture),
                ("inner", EventPhase::Target),
                ("outer", EventPhase::Bubble),
                ("root", EventPhase::Bubble),
            ]
        );
    }

    #[test]
    fn test_handled_stops_bubbling() {
        let (mut tree, log, [_, _, inner]) = setup();
        if let Some(recorder) = tree.widget_mut::<Recorder>(inner) {
            recorder.handle = true;
        }
        let result = tree.dispatch_event(&Event::pointer(event_types::SCROLL, 10.0, 10.0));
        assert!(result.is_handled());
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn test_hover_active_and_focus_track_pointer() {
        let (mut tree, log, [root, outer, inner]) = setup();
        tree.dispatch_event(&Event::pointer(event_types::POINTER_MOVE, 10.0, 10.0));
        assert!(tree.state(inner).hovered);
        assert_eq!(tree.hovered(), &[root, outer, inner]);

        tree.dispatch_event(&Event::pointer(event_types::POINTER_MOVE, 75.0, 75.0));
        assert!(!tree.state(inner).hovered);
        assert!(tree.state(outer).hovered);
        assert!(log
            .borrow()
            .iter()
            .any(|(n, _, t)| *n == "inner" && *t == event_types::POINTER_LEAVE));

        tree.dispatch_event(&Event::pointer(event_types::POINTER_DOWN, 10.0, 10.0));
        assert!(tree.state(inner).active);
        assert_eq!(tree.focused(), Some(inner));
        assert!(tree.state(inner).focused);

        tree.dispatch_event(&Event::pointer(event_types::POINTER_UP, 10.0, 10.0));
        assert!(!tree.state(inner).active);
        assert!(tree.needs_resolve());
    }

    #[test]
    fn test_disabled_nodes_receive_nothing() {
        let (mut tree, log, [_, _, inner]) = setup();
        tree.set_disabled(inner, true);
        tree.resolve(&ScaledTheme::default(), &EstimatedTextMeasurer);
        tree.dispatch_event(&Event::pointer(event_types::POINTER_DOWN, 10.0, 10.0));
        assert!(log.borrow().iter().all(|(n, _, _)| *n != "inner"));
        assert_eq!(tree.focused(), None);
    }

    #[test]
    fn test_disabled_ancestor_shields_its_subtree() {
        let (mut tree, log, [root, outer, inner]) = setup();
        tree.set_focus(Some(inner));
        tree.apply_ops(vec![TreeOp::SetDisabled {
            id: outer,
            disabled: true,
        }]);
        assert_eq!(tree.focused(), None);
        assert!(!tree.is_enabled(inner));
        assert!(tree.is_enabled(root));
        log.borrow_mut().clear();

        tree.dispatch_event(&Event::pointer(event_types::POINTER_DOWN, 10.0, 10.0));
        tree.dispatch_event(&Event::pointer(event_types::POINTER_MOVE, 10.0, 10.0));
        let reached: Vec<_> = log.borrow().iter().map(|(n, p, _)| (*n, *p)).collect();
        assert!(reached.iter().all(|(n, _)| *n == "root"), "{reached:?}");
        assert!(reached.contains(&("root", EventPhase::Target)));
        assert!(!tree.state(inner).active);
        assert!(!tree.state(inner).hovered);

        tree.set_focus(Some(inner));
        assert_eq!(tree.focused(), None);
    }

    #[test]
    fn test_hidden_nodes_are_not_hit() {
        let (mut tree, _, [root, outer, inner]) = setup();
        tree.update_style(inner, |s| s.display = Some(Display::None));
        tree.resolve(&ScaledTheme::default(), &EstimatedTextMeasurer);
        assert_eq!(tree.hit_path(Point::new(10.0, 10.0)), vec![root, outer]);
        assert_eq!(tree.bounds(inner).map(|b| b.size), Some(Rect::ZERO.size));
    }
}
