//! Dirty tracking for incremental repaints
//!
//! Invalidations outside a render block mark the node and the area it last
//! covered. After layout, every invalidated or moved node is marked again
//! with its old and new areas. A renderer can drain the tracker after
//! painting to learn which regions changed.

use plume_core::Rect;
use rustc_hash::FxHashSet;

use crate::tree::WidgetId;

#[derive(Debug, Default)]
pub struct DirtyTracker {
    /// Set of dirty node IDs
    dirty: FxHashSet<WidgetId>,
    /// Distinct non-empty areas to repaint, in insertion order
    regions: Vec<Rect>,
    mark_count: usize,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a node as dirty, recording the area it covered
    pub fn mark(&mut self, id: WidgetId, bounds: Rect) {
        self.mark_count += 1;
        self.dirty.insert(id);
        self.push_region(bounds);
    }

    /// Mark a node that was laid out again; both its old and its new area
    /// need repainting
    pub fn mark_moved(&mut self, id: WidgetId, before: Rect, after: Rect) {
        self.mark_count += 1;
        self.dirty.insert(id);
        self.push_region(before);
        self.push_region(after);
    }

    fn push_region(&mut self, region: Rect) {
        if !region.size.is_empty() && !self.regions.contains(&region) {
            self.regions.push(region);
        }
    }

    pub fn is_dirty(&self, id: WidgetId) -> bool {
        self.dirty.contains(&id)
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Take all dirty node IDs (clears the tracker)
    pub fn take_dirty(&mut self) -> Vec<WidgetId> {
        self.regions.clear();
        self.dirty.drain().collect()
    }

    /// Union of the recorded regions
    pub fn dirty_region(&self) -> Option<Rect> {
        let mut regions = self.regions.iter();
        let first = *regions.next()?;
        Some(regions.fold(first, |acc, r| acc.union(r)))
    }

    /// Total number of `mark` calls since creation, including repeats
    pub fn mark_count(&self) -> usize {
        self.mark_count
    }

    pub fn clear(&mut self) {
        self.dirty.clear();
        self.regions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_marks_are_deduplicated() {
        let mut ids: SlotMap<WidgetId, ()> = SlotMap::with_key();
        let a = ids.insert(());
        let b = ids.insert(());

        let mut tracker = DirtyTracker::new();
        tracker.mark(a, Rect::new(0.0, 0.0, 10.0, 10.0));
        tracker.mark(a, Rect::new(0.0, 0.0, 10.0, 10.0));
        tracker.mark(b, Rect::new(20.0, 0.0, 10.0, 5.0));

        assert!(tracker.is_dirty(a));
        assert_eq!(tracker.mark_count(), 3);
        assert_eq!(tracker.dirty_region(), Some(Rect::new(0.0, 0.0, 30.0, 10.0)));

        let mut taken = tracker.take_dirty();
        taken.sort();
        assert_eq!(taken.len(), 2);
        assert!(!tracker.has_dirty());
        assert_eq!(tracker.dirty_region(), None);
    }

    #[test]
    fn test_moved_node_reports_both_areas() {
        let mut ids: SlotMap<WidgetId, ()> = SlotMap::with_key();
        let a = ids.insert(());
        let b = ids.insert(());

        let mut tracker = DirtyTracker::new();
        tracker.mark(a, Rect::new(0.0, 0.0, 50.0, 50.0));
        tracker.mark_moved(a, Rect::new(0.0, 0.0, 50.0, 50.0), Rect::new(200.0, 0.0, 50.0, 50.0));
        assert_eq!(tracker.dirty_region(), Some(Rect::new(0.0, 0.0, 250.0, 50.0)));

        // A node that had no area yet only reports where it landed
        tracker.clear();
        tracker.mark_moved(b, Rect::ZERO, Rect::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(tracker.dirty_region(), Some(Rect::new(10.0, 20.0, 30.0, 40.0)));
        assert_eq!(tracker.mark_count(), 3);
    }
}
