//! Plume GPU Renderer
//!
//! SDF-based GPU rendering using wgpu. Every widget is one instanced quad:
//! background, per-side border and outline are composited in a single
//! fragment pass with analytic anti-aliasing.
//!
//! # Features
//!
//! - [`FrameBuilder`]: records [`plume_paint::PaintSurface`] calls into
//!   batched draws, flattening transforms and clips
//! - [`GpuRenderer`]: headless or window-backed wgpu renderer
//! - Images through [`GpuRenderer::register_image`]
//! - Text through a pluggable [`TextBackend`]

pub mod batch;
pub mod image;
pub mod primitives;
pub mod renderer;
pub mod shaders;
pub mod text;

pub use batch::{DrawCall, FrameBuilder, PipelineKey, PreparedText, PrimitiveBatch, ScissorRect};
pub use primitives::{GpuPrimitive, PrimitiveKind, Uniforms};
pub use renderer::{GpuRenderer, RendererConfig, RendererError};
pub use text::TextBackend;
