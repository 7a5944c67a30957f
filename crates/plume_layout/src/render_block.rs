//! Render blocks
//!
//! A [`RenderBlock`] batches tree mutations: between [`RenderBlock::begin`]
//! and [`RenderBlock::end`] invalidations are only recorded, and `end` runs
//! a single style pass and a single layout pass for everything touched.
//!
//! ```text
//! Idle --begin()--> Building --end()--> Resolved --render()--> Resolved
//!                      ^                    |
//!                      +------begin()-------+
//! ```
//!
//! Rendering is only allowed from `Resolved`, and only while the tree has
//! not been mutated since the resolve. There is no implicit resolve.

use std::ops::{Deref, DerefMut};

use plume_paint::PaintSurface;
use plume_theme::ScaledTheme;
use thiserror::Error;
use tracing::{debug, warn};

use crate::text_measure::TextMeasurer;
use crate::tree::{ResolveStats, WidgetTree};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RenderBlockError {
    #[error("render block is not building")]
    NotBuilding,

    #[error("render block is already building")]
    AlreadyBuilding,

    #[error("widget tree is not resolved; call end() before render()")]
    NotResolved,
}

pub type Result<T> = std::result::Result<T, RenderBlockError>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderBlockState {
    #[default]
    Idle,
    Building,
    Resolved,
}

/// Batching scope over a [`WidgetTree`]. Dereferences to the tree so that
/// mutations go through the block while it is alive.
pub struct RenderBlock<'t> {
    tree: &'t mut WidgetTree,
    state: RenderBlockState,
    /// Tree epoch right after the last resolve
    resolved_epoch: Option<u64>,
    stats: ResolveStats,
}

impl<'t> RenderBlock<'t> {
    pub fn new(tree: &'t mut WidgetTree) -> Self {
        Self {
            tree,
            state: RenderBlockState::Idle,
            resolved_epoch: None,
            stats: ResolveStats::default(),
        }
    }

    pub fn state(&self) -> RenderBlockState {
        self.state
    }

    pub fn is_building(&self) -> bool {
        self.state == RenderBlockState::Building
    }

    /// Whether `render` would succeed
    pub fn is_resolved(&self) -> bool {
        self.state == RenderBlockState::Resolved
            && self.resolved_epoch == Some(self.tree.epoch())
    }

    /// Work done by the last `end`
    pub fn stats(&self) -> ResolveStats {
        self.stats
    }

    /// Start recording mutations
    pub fn begin(&mut self) -> Result<()> {
        if self.is_building() {
            warn!("render block begin() while already building");
            return Err(RenderBlockError::AlreadyBuilding);
        }
        self.tree.begin_deferral();
        self.state = RenderBlockState::Building;
        Ok(())
    }

    /// Stop recording and resolve the tree once
    pub fn end(
        &mut self,
        theme: &ScaledTheme,
        measurer: &dyn TextMeasurer,
    ) -> Result<ResolveStats> {
        if !self.is_building() {
            warn!("render block end() outside of begin()");
            return Err(RenderBlockError::NotBuilding);
        }
        let touched = self.tree.pending_invalidations();
        self.stats = self.tree.resolve(theme, measurer);
        self.tree.flush_deferred();
        self.resolved_epoch = Some(self.tree.epoch());
        self.state = RenderBlockState::Resolved;
        debug!(
            touched,
            styled = self.stats.styled,
            laid_out = self.stats.laid_out,
            "render block resolved"
        );
        Ok(self.stats)
    }

    /// Paint the resolved tree
    pub fn render(
        &self,
        surface: &mut dyn PaintSurface,
        measurer: &dyn TextMeasurer,
    ) -> Result<()> {
        if !self.is_resolved() {
            warn!(state = ?self.state, "render() on an unresolved widget tree");
            return Err(RenderBlockError::NotResolved);
        }
        self.tree.paint(surface, measurer);
        Ok(())
    }
}

impl Deref for RenderBlock<'_> {
    type Target = WidgetTree;

    fn deref(&self) -> &WidgetTree {
        self.tree
    }
}

impl DerefMut for RenderBlock<'_> {
    fn deref_mut(&mut self) -> &mut WidgetTree {
        self.tree
    }
}

impl Drop for RenderBlock<'_> {
    fn drop(&mut self) {
        if self.is_building() {
            warn!("render block dropped while building; recorded invalidations kept unresolved");
            self.tree.flush_deferred();
        }
    }
}

#[cfg(test)]
mod tests {
    use plume_paint::PaintContext;

    use super::*;
    use crate::style::WidgetStyle;
    use crate::text_measure::EstimatedTextMeasurer;

    #[test]
    fn test_state_machine_rejects_misuse() {
        let theme = ScaledTheme::default();
        let mut tree = WidgetTree::new();
        let mut block = RenderBlock::new(&mut tree);

        assert_eq!(
            block.end(&theme, &EstimatedTextMeasurer),
            Err(RenderBlockError::NotBuilding)
        );
        assert_eq!(
            block.render(&mut PaintContext::new(), &EstimatedTextMeasurer),
            Err(RenderBlockError::NotResolved)
        );

        block.begin().unwrap();
        assert_eq!(block.begin(), Err(RenderBlockError::AlreadyBuilding));
        block.end(&theme, &EstimatedTextMeasurer).unwrap();
        assert_eq!(block.state(), RenderBlockState::Resolved);
        assert!(block
            .render(&mut PaintContext::new(), &EstimatedTextMeasurer)
            .is_ok());
    }

    #[test]
    fn test_mutation_after_resolve_requires_new_block() {
        let theme = ScaledTheme::default();
        let mut tree = WidgetTree::new();
        let root = tree.insert(WidgetStyle::new());
        tree.set_root(root);

        let mut block = RenderBlock::new(&mut tree);
        block.begin().unwrap();
        block.end(&theme, &EstimatedTextMeasurer).unwrap();
        block.set_style(root, WidgetStyle::new().padding(4.0));
        assert_eq!(
            block.render(&mut PaintContext::new(), &EstimatedTextMeasurer),
            Err(RenderBlockError::NotResolved)
        );

        block.begin().unwrap();
        block.end(&theme, &EstimatedTextMeasurer).unwrap();
        assert!(block.is_resolved());
    }

    #[test]
    fn test_building_defers_dirty_marks() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(WidgetStyle::new());
        tree.set_root(root);
        let before = tree.dirty().mark_count();

        let mut block = RenderBlock::new(&mut tree);
        block.begin().unwrap();
        for _ in 0..10 {
            block.invalidate_style(root);
        }
        assert_eq!(block.dirty().mark_count(), before);
        block.end(&ScaledTheme::default(), &EstimatedTextMeasurer).unwrap();
        assert_eq!(block.dirty().mark_count(), before + 1);
    }
}
