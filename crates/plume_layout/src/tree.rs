//! Widget tree
//!
//! Nodes live in a [`SlotMap`] arena addressed by [`WidgetId`]. Parent and
//! child links are stored as ids, so removing a node can never leave a
//! dangling parent reference and the tree cannot become cyclic.
//!
//! Every mutation goes through the tree: setters mark the node for style
//! and/or layout recomputation, and [`WidgetTree::resolve`] brings the whole
//! tree up to date in one style pass followed by one layout pass.

use std::rc::Rc;

use plume_core::{Rect, Size};
use plume_theme::ScaledTheme;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use tracing::{trace, warn};

use crate::computed::ComputedStyle;
use crate::dirty::DirtyTracker;
use crate::layout::{IntrinsicSizes, LayoutEngine};
use crate::style::{WidgetState, WidgetStyle};
use crate::text_measure::TextMeasurer;
use crate::widget::Widget;

new_key_type! {
    pub struct WidgetId;
}

/// How often a node went through each pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeStats {
    pub style_passes: u32,
    pub layout_passes: u32,
}

/// Work done by one [`WidgetTree::resolve`] call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Nodes whose style was recomputed
    pub styled: usize,
    /// Nodes that received final bounds
    pub laid_out: usize,
}

pub(crate) struct WidgetNode {
    pub(crate) base_style: WidgetStyle,
    /// Base style with the active pseudo-state sub-styles merged in
    pub(crate) current_style: WidgetStyle,
    pub(crate) computed: Rc<ComputedStyle>,
    /// Border box in window coordinates
    pub(crate) bounds: Rect,
    pub(crate) parent: Option<WidgetId>,
    pub(crate) children: Vec<WidgetId>,
    pub(crate) needs_style: bool,
    pub(crate) needs_layout: bool,
    pub(crate) state: WidgetState,
    pub(crate) widget: Option<Box<dyn Widget>>,
    pub(crate) intrinsic: IntrinsicSizes,
    /// First baseline, measured from the top of the border box
    pub(crate) baseline: Option<f32>,
    pub(crate) stats: NodeStats,
}

impl WidgetNode {
    fn new(
        style: WidgetStyle,
        widget: Option<Box<dyn Widget>>,
        computed: Rc<ComputedStyle>,
    ) -> Self {
        Self {
            current_style: style.clone(),
            base_style: style,
            computed,
            bounds: Rect::ZERO,
            parent: None,
            children: Vec::new(),
            needs_style: true,
            needs_layout: true,
            state: WidgetState::default(),
            widget,
            intrinsic: IntrinsicSizes::default(),
            baseline: None,
            stats: NodeStats::default(),
        }
    }
}

pub struct WidgetTree {
    pub(crate) nodes: SlotMap<WidgetId, WidgetNode>,
    root: Option<WidgetId>,
    viewport: Size,
    dirty: DirtyTracker,
    /// Set while a render block is building; invalidations are only recorded
    deferring: bool,
    /// Nodes invalidated since the last layout, with the border box each had
    /// when first invalidated
    stale: FxHashMap<WidgetId, Rect>,
    /// Bumped by every mutation
    epoch: u64,
    pub(crate) hovered: Vec<WidgetId>,
    pub(crate) active: Vec<WidgetId>,
    pub(crate) focused: Option<WidgetId>,
    /// Style shared by nodes that have not been resolved yet
    unresolved: Rc<ComputedStyle>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
            viewport: Size::ZERO,
            dirty: DirtyTracker::new(),
            deferring: false,
            stale: FxHashMap::default(),
            epoch: 0,
            hovered: Vec::new(),
            active: Vec::new(),
            focused: None,
            unresolved: Rc::new(ComputedStyle::initial(&ScaledTheme::default())),
        }
    }

    /// Create a plain node (a container with no content of its own)
    pub fn insert(&mut self, style: WidgetStyle) -> WidgetId {
        self.insert_node(WidgetNode::new(style, None, Rc::clone(&self.unresolved)))
    }

    /// Create a node backed by a concrete widget
    pub fn insert_widget(&mut self, widget: impl Widget, style: WidgetStyle) -> WidgetId {
        let node = WidgetNode::new(style, Some(Box::new(widget)), Rc::clone(&self.unresolved));
        self.insert_node(node)
    }

    fn insert_node(&mut self, node: WidgetNode) -> WidgetId {
        let id = self.nodes.insert(node);
        self.epoch += 1;
        self.note_dirty(id);
        id
    }

    pub fn root(&self) -> Option<WidgetId> {
        self.root
    }

    pub fn set_root(&mut self, id: WidgetId) {
        if !self.nodes.contains_key(id) {
            warn!(?id, "set_root: unknown widget");
            return;
        }
        self.detach(id);
        self.root = Some(id);
        self.invalidate_style(id);
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Whether `ancestor` is `id` or one of its ancestors
    pub fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.parent(c);
        }
        false
    }

    /// Append `child` to `parent`, moving it from its previous parent.
    ///
    /// Adding a node to itself or to one of its descendants would make the
    /// tree cyclic; such calls are ignored with a warning and return false.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            warn!(?parent, ?child, "add_child: unknown widget");
            return false;
        }
        if self.is_ancestor(child, parent) {
            warn!(?parent, ?child, "add_child would create a cycle; ignored");
            return false;
        }
        if self.root == Some(child) {
            self.root = None;
        }
        self.detach(child);
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        self.note_dirty(parent);
        // Inherited properties now come from a different parent
        self.invalidate_style(child);
        true
    }

    /// Detach `child` from `parent` and drop its whole subtree
    pub fn remove_child(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        if self.parent(child) != Some(parent) {
            return false;
        }
        self.remove(child);
        true
    }

    /// Remove a node and all of its descendants from the arena
    pub fn remove(&mut self, id: WidgetId) {
        if !self.nodes.contains_key(id) {
            return;
        }
        self.detach(id);
        if self.root == Some(id) {
            self.root = None;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                self.note_area(current, node.bounds);
                stack.extend(node.children);
            }
        }
        self.hovered.retain(|h| self.nodes.contains_key(*h));
        self.active.retain(|a| self.nodes.contains_key(*a));
        if self.focused.is_some_and(|f| !self.nodes.contains_key(f)) {
            self.focused = None;
        }
        self.epoch += 1;
    }

    /// Unlink a node from its parent, keeping it in the arena
    pub fn detach(&mut self, id: WidgetId) {
        let Some(parent) = self.nodes.get_mut(id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        self.invalidate_layout(parent);
    }

    pub fn style(&self, id: WidgetId) -> Option<&WidgetStyle> {
        self.nodes.get(id).map(|n| &n.base_style)
    }

    /// Base style merged with the active pseudo-state styles, as of the last
    /// resolve
    pub fn current_style(&self, id: WidgetId) -> Option<&WidgetStyle> {
        self.nodes.get(id).map(|n| &n.current_style)
    }

    pub fn set_style(&mut self, id: WidgetId, style: WidgetStyle) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.base_style = style;
            self.invalidate_style(id);
        }
    }

    /// Edit the base style in place
    pub fn update_style(&mut self, id: WidgetId, f: impl FnOnce(&mut WidgetStyle)) {
        if let Some(node) = self.nodes.get_mut(id) {
            f(&mut node.base_style);
            self.invalidate_style(id);
        }
    }

    /// Resolved style as of the last [`WidgetTree::resolve`]
    pub fn computed_style(&self, id: WidgetId) -> Option<&ComputedStyle> {
        self.nodes.get(id).map(|n| n.computed.as_ref())
    }

    /// Border box in window coordinates
    pub fn bounds(&self, id: WidgetId) -> Option<Rect> {
        self.nodes.get(id).map(|n| n.bounds)
    }

    /// Border box minus padding and borders
    pub fn content_box(&self, id: WidgetId) -> Option<Rect> {
        let node = self.nodes.get(id)?;
        let cb_width = self.containing_width(id);
        Some(node.bounds.inset_by(node.computed.padding_border(cb_width)))
    }

    /// Border box minus borders; containing block of absolute children
    pub fn padding_box(&self, id: WidgetId) -> Option<Rect> {
        let node = self.nodes.get(id)?;
        Some(node.bounds.inset_by(node.computed.border_widths))
    }

    /// Width percentages of `id`'s padding resolve against
    pub(crate) fn containing_width(&self, id: WidgetId) -> f32 {
        match self.parent(id) {
            Some(parent) => self.content_box(parent).map_or(0.0, |r| r.width()),
            None => self.viewport.width,
        }
    }

    pub fn intrinsic_sizes(&self, id: WidgetId) -> Option<IntrinsicSizes> {
        self.nodes.get(id).map(|n| n.intrinsic)
    }

    /// First baseline in window coordinates
    pub fn baseline(&self, id: WidgetId) -> Option<f32> {
        let node = self.nodes.get(id)?;
        node.baseline.map(|b| node.bounds.y() + b)
    }

    pub fn stats(&self, id: WidgetId) -> Option<NodeStats> {
        self.nodes.get(id).map(|n| n.stats)
    }

    pub fn widget<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.nodes
            .get(id)?
            .widget
            .as_deref()
            .and_then(|w| w.as_any().downcast_ref::<T>())
    }

    /// Mutable access to a widget; its content may change size, so the node
    /// is marked for layout
    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        if !self.nodes.get(id)?.widget.as_deref()?.as_any().is::<T>() {
            return None;
        }
        self.invalidate_layout(id);
        self.nodes
            .get_mut(id)?
            .widget
            .as_deref_mut()
            .and_then(|w| w.as_any_mut().downcast_mut::<T>())
    }

    pub fn widget_type_name(&self, id: WidgetId) -> Option<&'static str> {
        self.nodes.get(id)?.widget.as_deref().map(|w| w.type_name())
    }

    pub fn state(&self, id: WidgetId) -> WidgetState {
        self.nodes.get(id).map(|n| n.state).unwrap_or_default()
    }

    pub fn set_disabled(&mut self, id: WidgetId, disabled: bool) {
        self.update_state(id, |s| s.disabled = disabled);
    }

    /// Apply a state change and invalidate the node's style if it changed
    pub(crate) fn update_state(&mut self, id: WidgetId, f: impl FnOnce(&mut WidgetState)) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let before = node.state;
        f(&mut node.state);
        if node.state != before {
            self.invalidate_style(id);
        }
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport(&mut self, size: Size) {
        if self.viewport != size {
            self.viewport = size;
            if let Some(root) = self.root {
                self.invalidate_layout(root);
            }
        }
    }

    /// Mark a node for style recomputation; its subtree follows because
    /// inherited values may change
    pub fn invalidate_style(&mut self, id: WidgetId) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.needs_style = true;
            self.invalidate_layout(id);
        }
    }

    /// Mark a node and its ancestors for layout
    pub fn invalidate_layout(&mut self, id: WidgetId) {
        if !self.nodes.contains_key(id) {
            return;
        }
        self.epoch += 1;
        self.note_dirty(id);
        let mut current = Some(id);
        while let Some(c) = current {
            let node = &mut self.nodes[c];
            node.needs_layout = true;
            current = node.parent;
        }
    }

    /// Re-resolve every style, e.g. after a theme or scale factor change
    pub fn invalidate_all_styles(&mut self) {
        let ids: Vec<WidgetId> = self.nodes.keys().collect();
        for id in ids {
            self.invalidate_style(id);
        }
    }

    /// Whether a resolve would do any work
    pub fn needs_resolve(&self) -> bool {
        self.root
            .and_then(|r| self.nodes.get(r))
            .is_some_and(|n| n.needs_layout || n.needs_style)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn dirty(&self) -> &DirtyTracker {
        &self.dirty
    }

    pub fn dirty_mut(&mut self) -> &mut DirtyTracker {
        &mut self.dirty
    }

    fn note_dirty(&mut self, id: WidgetId) {
        if let Some(bounds) = self.nodes.get(id).map(|n| n.bounds) {
            self.note_area(id, bounds);
        }
    }

    fn note_area(&mut self, id: WidgetId, bounds: Rect) {
        if !self.deferring {
            self.dirty.mark(id, bounds);
        }
        self.stale.entry(id).or_insert(bounds);
    }

    pub(crate) fn begin_deferral(&mut self) {
        self.deferring = true;
    }

    pub(crate) fn is_deferring(&self) -> bool {
        self.deferring
    }

    /// Nodes invalidated since the last layout
    pub(crate) fn pending_invalidations(&self) -> usize {
        self.stale.len()
    }

    /// Stop deferring and forward the area each recorded node covered before
    /// its first invalidation, once per node. Nodes already laid out since
    /// were reported by [`WidgetTree::resolve`].
    pub(crate) fn flush_deferred(&mut self) -> usize {
        if !std::mem::take(&mut self.deferring) {
            return 0;
        }
        for (&id, &bounds) in &self.stale {
            self.dirty.mark(id, bounds);
        }
        self.stale.len()
    }

    /// Report every invalidated node, and every node layout moved or
    /// resized, with both its previous and its new border box
    fn mark_relaid(&mut self, before: &[(WidgetId, Rect)]) {
        let mut stale = std::mem::take(&mut self.stale);
        for &(id, old) in before {
            if self.nodes.get(id).is_some_and(|n| n.bounds != old) {
                stale.entry(id).or_insert(old);
            }
        }
        for (id, old) in stale {
            let new = self.nodes.get(id).map_or(Rect::ZERO, |n| n.bounds);
            self.dirty.mark_moved(id, old, new);
        }
    }

    /// Bring styles and layout up to date: one style pass top-down, then the
    /// intrinsic, size and positioning passes of layout
    pub fn resolve(&mut self, theme: &ScaledTheme, measurer: &dyn TextMeasurer) -> ResolveStats {
        let mut stats = ResolveStats::default();
        let Some(root) = self.root else {
            return stats;
        };

        stats.styled = self.compute_styles(root, theme);
        if self.nodes[root].needs_layout || stats.styled > 0 {
            let before: Vec<(WidgetId, Rect)> =
                self.nodes.iter().map(|(id, n)| (id, n.bounds)).collect();
            stats.laid_out = LayoutEngine::new(&mut self.nodes, measurer).run(root, self.viewport);
            self.mark_relaid(&before);
        }
        trace!(styled = stats.styled, laid_out = stats.laid_out, "tree resolved");
        stats
    }

    /// Top-down style pass; a recomputed node forces its subtree because
    /// children inherit from it
    fn compute_styles(&mut self, root: WidgetId, theme: &ScaledTheme) -> usize {
        let mut styled = 0;
        let mut stack: Vec<(WidgetId, Option<Rc<ComputedStyle>>, bool)> = vec![(root, None, false)];
        while let Some((id, parent, force)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(id) else {
                continue;
            };
            let recompute = force || node.needs_style;
            if recompute {
                node.current_style = node.base_style.resolve_state(node.state);
                node.computed = Rc::new(node.current_style.compute(theme, parent.as_deref()));
                node.needs_style = false;
                node.needs_layout = true;
                node.stats.style_passes += 1;
                styled += 1;
            }
            let computed = Rc::clone(&node.computed);
            for &child in node.children.iter().rev() {
                stack.push((child, Some(Rc::clone(&computed)), recompute));
            }
        }
        styled
    }

    /// Depth-first pre-order walk from the root
    pub fn descendants(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            out.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_measure::EstimatedTextMeasurer;
    use plume_core::Color;

    fn resolve(tree: &mut WidgetTree) -> ResolveStats {
        tree.resolve(&ScaledTheme::default(), &EstimatedTextMeasurer)
    }

    #[test]
    fn test_add_child_rejects_cycles() {
        let mut tree = WidgetTree::new();
        let a = tree.insert(WidgetStyle::new());
        let b = tree.insert(WidgetStyle::new());
        let c = tree.insert(WidgetStyle::new());
        assert!(tree.add_child(a, b));
        assert!(tree.add_child(b, c));

        assert!(!tree.add_child(a, a));
        assert!(!tree.add_child(c, a));
        assert_eq!(tree.children(a), &[b]);
        assert_eq!(tree.parent(a), None);
    }

    #[test]
    fn test_add_child_moves_between_parents() {
        let mut tree = WidgetTree::new();
        let a = tree.insert(WidgetStyle::new());
        let b = tree.insert(WidgetStyle::new());
        let c = tree.insert(WidgetStyle::new());
        tree.add_child(a, c);
        tree.add_child(b, c);
        assert!(tree.children(a).is_empty());
        assert_eq!(tree.parent(c), Some(b));
    }

    #[test]
    fn test_remove_drops_subtree() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(WidgetStyle::new());
        let a = tree.insert(WidgetStyle::new());
        let b = tree.insert(WidgetStyle::new());
        tree.set_root(root);
        tree.add_child(root, a);
        tree.add_child(a, b);

        assert!(tree.remove_child(root, a));
        assert!(!tree.contains(a));
        assert!(!tree.contains(b));
        assert_eq!(tree.len(), 1);
        assert!(tree.children(root).is_empty());
    }

    #[test]
    fn test_style_change_only_restyles_subtree() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(WidgetStyle::new());
        let a = tree.insert(WidgetStyle::new());
        let b = tree.insert(WidgetStyle::new());
        tree.set_root(root);
        tree.add_child(root, a);
        tree.add_child(root, b);
        tree.set_viewport(Size::new(100.0, 100.0));

        assert_eq!(resolve(&mut tree).styled, 3);
        assert!(!tree.needs_resolve());
        assert_eq!(resolve(&mut tree), ResolveStats::default());

        tree.update_style(a, |s| *s = s.clone().text_color(Color::RED));
        assert!(tree.needs_resolve());
        assert_eq!(resolve(&mut tree).styled, 1);
        assert_eq!(tree.computed_style(a).map(|s| s.color), Some(Color::RED));
        assert_eq!(tree.stats(b).map(|s| s.style_passes), Some(1));
    }

    #[test]
    fn test_children_inherit_after_parent_restyle() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(WidgetStyle::new());
        let child = tree.insert(WidgetStyle::new());
        tree.set_root(root);
        tree.add_child(root, child);
        resolve(&mut tree);

        tree.set_style(root, WidgetStyle::new().text_color(Color::GREEN));
        let stats = resolve(&mut tree);
        assert_eq!(stats.styled, 2);
        assert_eq!(tree.computed_style(child).map(|s| s.color), Some(Color::GREEN));
    }

    #[test]
    fn test_eager_invalidation_marks_dirty() {
        let mut tree = WidgetTree::new();
        let a = tree.insert(WidgetStyle::new());
        let before = tree.dirty().mark_count();
        tree.invalidate_layout(a);
        tree.invalidate_layout(a);
        assert_eq!(tree.dirty().mark_count(), before + 2);
        assert!(tree.dirty().is_dirty(a));
    }

    #[test]
    fn test_deferred_invalidation_flushes_once_per_node() {
        let mut tree = WidgetTree::new();
        tree.begin_deferral();
        let a = tree.insert(WidgetStyle::new());
        tree.invalidate_style(a);
        tree.invalidate_style(a);
        assert_eq!(tree.dirty().mark_count(), 0);
        assert_eq!(tree.flush_deferred(), 1);
        assert_eq!(tree.dirty().mark_count(), 1);
        assert!(!tree.is_deferring());
    }
}
