//! Text rendering hook
//!
//! Glyph shaping and rasterization live outside this crate. A [`TextBackend`]
//! receives every text run of a frame up front, then draws contiguous slices
//! of them interleaved with the quad batches so paint order is preserved.

use std::ops::Range;

use crate::batch::PreparedText;

pub trait TextBackend {
    /// Upload whatever the frame's runs need. Called once per frame before
    /// the render pass begins.
    fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        runs: &[PreparedText],
        viewport: (u32, u32),
    );

    /// Draw `runs[range]` of the prepared frame into the open pass
    fn draw(&self, pass: &mut wgpu::RenderPass<'_>, range: Range<u32>);
}
