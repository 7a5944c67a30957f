//! GPU renderer implementation
//!
//! Owns the wgpu device, the primitive storage buffer and the two quad
//! pipelines. Painting goes through the [`PaintSurface`] impl into a
//! [`FrameBuilder`]; [`GpuRenderer::render`] uploads the recorded batch and
//! replays its draw calls in one render pass.

use std::sync::Arc;

use plume_core::{Color, CornerRadius, Point, Rect, Transform2D};
use plume_paint::{GradientStop, ImageId, PaintSurface, ShadowPaint, TextRun, WidgetPaint};
use thiserror::Error;
use tracing::{debug, info, trace, warn};
use wgpu::util::DeviceExt;

use crate::batch::{FrameBuilder, PipelineKey, PrimitiveBatch, ScissorRect};
use crate::image::{GpuImage, ImageRegistry};
use crate::primitives::{GpuPrimitive, Uniforms};
use crate::shaders::WIDGET_SHADER;
use crate::text::TextBackend;

/// Error type for renderer operations
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("no suitable GPU adapter found")]
    AdapterNotFound,
    #[error("failed to request GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("failed to acquire surface texture: {0}")]
    Frame(#[from] wgpu::SurfaceError),
    #[error("image data is {actual} bytes, expected {expected}")]
    ImageSize { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, RendererError>;

/// Configuration for creating a renderer
#[derive(Clone, Debug)]
pub struct RendererConfig {
    /// Half-width of the edge anti-aliasing ramp in pixels
    pub aa_radius: f32,
    /// MSAA sample count (1 disables multisampling)
    pub sample_count: u32,
    pub clear_color: Color,
    /// Primitives the storage buffer holds before it has to grow
    pub initial_quad_capacity: usize,
    /// Preferred texture format (None = use surface preferred)
    pub texture_format: Option<wgpu::TextureFormat>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            aa_radius: 0.5,
            sample_count: 1,
            clear_color: Color::TRANSPARENT,
            initial_quad_capacity: 1_024,
            texture_format: None,
        }
    }
}

/// Storage capacity (in primitives) able to hold `needed`
fn grown_capacity(current: usize, needed: usize, max: usize) -> usize {
    if needed <= current {
        return current;
    }
    needed.next_power_of_two().min(max).max(current)
}

struct MsaaTarget {
    view: wgpu::TextureView,
    size: (u32, u32),
}

pub struct GpuRenderer {
    adapter: wgpu::Adapter,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: RendererConfig,
    texture_format: wgpu::TextureFormat,
    viewport: (u32, u32),
    uniform_buffer: wgpu::Buffer,
    primitive_buffer: wgpu::Buffer,
    primitive_capacity: usize,
    frame_layout: wgpu::BindGroupLayout,
    image_layout: wgpu::BindGroupLayout,
    frame_bind_group: wgpu::BindGroup,
    shapes_pipeline: wgpu::RenderPipeline,
    image_pipeline: wgpu::RenderPipeline,
    sampler: wgpu::Sampler,
    msaa: Option<MsaaTarget>,
    images: ImageRegistry,
    text: Option<Box<dyn TextBackend>>,
    frame: FrameBuilder,
}

impl GpuRenderer {
    fn preferred_backends() -> wgpu::Backends {
        #[cfg(target_os = "macos")]
        {
            wgpu::Backends::METAL
        }
        #[cfg(target_os = "windows")]
        {
            wgpu::Backends::DX12
        }
        #[cfg(target_os = "linux")]
        {
            wgpu::Backends::VULKAN
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
        {
            wgpu::Backends::PRIMARY
        }
    }

    fn instance() -> wgpu::Instance {
        wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: Self::preferred_backends(),
            ..Default::default()
        })
    }

    async fn request_device(
        adapter: &wgpu::Adapter,
    ) -> Result<(Arc<wgpu::Device>, Arc<wgpu::Queue>)> {
        let adapter_info = adapter.get_info();
        debug!(
            "GPU adapter: {} ({:?})",
            adapter_info.name, adapter_info.backend
        );
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Plume GPU Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                },
                None,
            )
            .await?;
        Ok((Arc::new(device), Arc::new(queue)))
    }

    /// Create a renderer without a surface (offscreen targets only)
    pub async fn new(config: RendererConfig) -> Result<Self> {
        let instance = Self::instance();
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RendererError::AdapterNotFound)?;
        let (device, queue) = Self::request_device(&adapter).await?;
        let format = config
            .texture_format
            .unwrap_or(wgpu::TextureFormat::Rgba8UnormSrgb);
        Ok(Self::create_renderer(adapter, device, queue, format, config))
    }

    /// Blocking variant of [`GpuRenderer::new`]
    pub fn headless(config: RendererConfig) -> Result<Self> {
        pollster::block_on(Self::new(config))
    }

    /// Create a renderer and a surface for `window`. The surface still has
    /// to be configured with [`GpuRenderer::configure_surface`].
    pub async fn with_window<W>(
        window: Arc<W>,
        config: RendererConfig,
    ) -> Result<(Self, wgpu::Surface<'static>)>
    where
        W: raw_window_handle::HasWindowHandle
            + raw_window_handle::HasDisplayHandle
            + Send
            + Sync
            + 'static,
    {
        let instance = Self::instance();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RendererError::AdapterNotFound)?;
        let (device, queue) = Self::request_device(&adapter).await?;

        let caps = surface.get_capabilities(&adapter);
        debug!("surface formats: {:?}", caps.formats);
        let format = config.texture_format.unwrap_or_else(|| {
            caps.formats
                .iter()
                .find(|f| f.is_srgb())
                .or_else(|| caps.formats.first())
                .copied()
                .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb)
        });
        debug!("selected texture format: {:?}", format);

        let renderer = Self::create_renderer(adapter, device, queue, format, config);
        Ok((renderer, surface))
    }

    fn create_renderer(
        adapter: wgpu::Adapter,
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        texture_format: wgpu::TextureFormat,
        mut config: RendererConfig,
    ) -> Self {
        config.aa_radius = config.aa_radius.max(0.01);
        config.sample_count = config.sample_count.max(1);

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Plume Frame Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let image_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Plume Image Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Plume Widget Shader"),
            source: wgpu::ShaderSource::Wgsl(WIDGET_SHADER.into()),
        });

        let shapes_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Plume Shapes Pipeline Layout"),
            bind_group_layouts: &[&frame_layout],
            push_constant_ranges: &[],
        });
        let image_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Plume Image Pipeline Layout"),
                bind_group_layouts: &[&frame_layout, &image_layout],
                push_constant_ranges: &[],
            });

        let shapes_pipeline = Self::create_pipeline(
            &device,
            &shader,
            &shapes_layout,
            "fs_main",
            texture_format,
            config.sample_count,
        );
        let image_pipeline = Self::create_pipeline(
            &device,
            &shader,
            &image_pipeline_layout,
            "fs_image",
            texture_format,
            config.sample_count,
        );

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Plume Uniforms"),
            contents: bytemuck::bytes_of(&Uniforms {
                viewport: [1.0, 1.0],
                aa_radius: config.aa_radius,
                _padding: 0.0,
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let primitive_capacity = config.initial_quad_capacity.max(1);
        let primitive_buffer = Self::create_primitive_buffer(&device, primitive_capacity);
        let frame_bind_group = Self::create_frame_bind_group(
            &device,
            &frame_layout,
            &uniform_buffer,
            &primitive_buffer,
        );

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Plume Image Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        info!(
            "gpu renderer ready: format={:?}, sample_count={}, aa_radius={}",
            texture_format, config.sample_count, config.aa_radius
        );

        let aa_radius = config.aa_radius;
        Self {
            adapter,
            device,
            queue,
            config,
            texture_format,
            viewport: (1, 1),
            uniform_buffer,
            primitive_buffer,
            primitive_capacity,
            frame_layout,
            image_layout,
            frame_bind_group,
            shapes_pipeline,
            image_pipeline,
            sampler,
            msaa: None,
            images: ImageRegistry::new(),
            text: None,
            frame: FrameBuilder::new(aa_radius),
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        layout: &wgpu::PipelineLayout,
        fragment_entry: &str,
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Plume Quad Pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(fragment_entry),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    fn create_primitive_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Plume Primitives"),
            size: (capacity * std::mem::size_of::<GpuPrimitive>()) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_frame_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniforms: &wgpu::Buffer,
        primitives: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Plume Frame Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniforms.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: primitives.as_entire_binding(),
                },
            ],
        })
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Configure `surface` for the renderer's format and resize the viewport
    pub fn configure_surface(&mut self, surface: &wgpu::Surface<'_>, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        surface.configure(
            &self.device,
            &wgpu::SurfaceConfiguration {
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                format: self.texture_format,
                width,
                height,
                present_mode: wgpu::PresentMode::Fifo,
                desired_maximum_frame_latency: 2,
                alpha_mode: wgpu::CompositeAlphaMode::Auto,
                view_formats: vec![],
            },
        );
        self.resize(width, height);
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn device_arc(&self) -> Arc<wgpu::Device> {
        self.device.clone()
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn adapter(&self) -> &wgpu::Adapter {
        &self.adapter
    }

    pub fn texture_format(&self) -> wgpu::TextureFormat {
        self.texture_format
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Install the backend that draws text runs
    pub fn set_text_backend(&mut self, backend: Box<dyn TextBackend>) {
        self.text = Some(backend);
    }

    /// Upload an RGBA8 image for use with [`PaintSurface::draw_image`]
    pub fn register_image(&mut self, width: u32, height: u32, pixels: &[u8]) -> Result<ImageId> {
        let image = GpuImage::from_rgba(
            &self.device,
            &self.queue,
            &self.image_layout,
            &self.sampler,
            width,
            height,
            pixels,
        )?;
        let id = self.images.insert(image);
        debug!("registered image {:?} ({}x{})", id, width, height);
        Ok(id)
    }

    pub fn unregister_image(&mut self, id: ImageId) -> bool {
        self.images.remove(id).is_some()
    }

    /// Grow the storage buffer so `count` primitives fit; returns how many do
    fn ensure_capacity(&mut self, count: usize) -> usize {
        let limit = self.device.limits().max_storage_buffer_binding_size as usize
            / std::mem::size_of::<GpuPrimitive>();
        let capacity = grown_capacity(self.primitive_capacity, count, limit.max(1));
        if capacity != self.primitive_capacity {
            debug!(
                "growing primitive buffer: {} -> {}",
                self.primitive_capacity, capacity
            );
            self.primitive_buffer = Self::create_primitive_buffer(&self.device, capacity);
            self.frame_bind_group = Self::create_frame_bind_group(
                &self.device,
                &self.frame_layout,
                &self.uniform_buffer,
                &self.primitive_buffer,
            );
            self.primitive_capacity = capacity;
        }
        if count > self.primitive_capacity {
            warn!(
                "frame has {} primitives, only {} fit in one buffer",
                count, self.primitive_capacity
            );
        }
        count.min(self.primitive_capacity)
    }

    fn ensure_msaa(&mut self) {
        if self.config.sample_count <= 1 {
            self.msaa = None;
            return;
        }
        if self.msaa.as_ref().is_some_and(|m| m.size == self.viewport) {
            return;
        }
        let (width, height) = self.viewport;
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Plume MSAA Target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: self.config.sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: self.texture_format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.msaa = Some(MsaaTarget {
            view,
            size: self.viewport,
        });
    }

    /// Draw everything painted since the last call into `target`, which
    /// must match the viewport size
    pub fn render(&mut self, target: &wgpu::TextureView) {
        let batch = self.frame.finish();
        let (width, height) = self.viewport;
        if width == 0 || height == 0 {
            return;
        }

        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                viewport: [width as f32, height as f32],
                aa_radius: self.config.aa_radius,
                _padding: 0.0,
            }),
        );

        let uploaded = if batch.primitives.is_empty() {
            0
        } else {
            let count = self.ensure_capacity(batch.primitives.len());
            self.queue.write_buffer(
                &self.primitive_buffer,
                0,
                bytemuck::cast_slice(&batch.primitives[..count]),
            );
            count as u32
        };

        if !batch.texts.is_empty() {
            match self.text.as_mut() {
                Some(text) => text.prepare(&self.device, &self.queue, &batch.texts, self.viewport),
                None => warn!("{} text runs dropped: no text backend", batch.texts.len()),
            }
        }

        self.ensure_msaa();
        self.encode(target, &batch, uploaded);
    }

    /// Acquire the next surface texture, render into it and present
    pub fn render_to_surface(&mut self, surface: &wgpu::Surface<'_>) -> Result<()> {
        let frame = surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.render(&view);
        frame.present();
        Ok(())
    }

    fn encode(&self, target: &wgpu::TextureView, batch: &PrimitiveBatch, uploaded: u32) {
        let (width, height) = self.viewport;
        let clear = self.config.clear_color;
        let (view, resolve_target) = match &self.msaa {
            Some(msaa) => (&msaa.view, Some(target)),
            None => (target, None),
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Plume Render Encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Plume Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.r as f64,
                            g: clear.g as f64,
                            b: clear.b as f64,
                            a: clear.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let full = ScissorRect {
                x: 0,
                y: 0,
                width,
                height,
            };
            for draw in &batch.draws {
                let scissor = match draw.key.scissor {
                    Some(scissor) => match scissor.clamped(width, height) {
                        Some(scissor) => scissor,
                        None => continue,
                    },
                    None => full,
                };
                pass.set_scissor_rect(scissor.x, scissor.y, scissor.width, scissor.height);

                match draw.key.pipeline {
                    PipelineKey::Shapes | PipelineKey::Image(_) => {
                        let end = draw.range.end.min(uploaded);
                        if draw.range.start >= end {
                            continue;
                        }
                        if let PipelineKey::Image(id) = draw.key.pipeline {
                            let Some(image) = self.images.get(id) else {
                                warn!("draw_image with unknown {:?}", id);
                                continue;
                            };
                            pass.set_pipeline(&self.image_pipeline);
                            pass.set_bind_group(1, image.bind_group(), &[]);
                        } else {
                            pass.set_pipeline(&self.shapes_pipeline);
                        }
                        // Text backends may bind their own groups
                        pass.set_bind_group(0, &self.frame_bind_group, &[]);
                        pass.draw(0..6, draw.range.start..end);
                    }
                    PipelineKey::Text => {
                        if let Some(text) = &self.text {
                            text.draw(&mut pass, draw.range.clone());
                        }
                    }
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        trace!("submitted {} draws", batch.draws.len());
    }
}

impl PaintSurface for GpuRenderer {
    fn draw_widget(&mut self, widget: &WidgetPaint) {
        self.frame.draw_widget(widget);
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.frame.draw_line(from, to, color, width);
    }

    fn draw_text(&mut self, run: &TextRun) {
        self.frame.draw_text(run);
    }

    fn draw_linear_gradient(
        &mut self,
        rect: Rect,
        radius: CornerRadius,
        angle: f32,
        stops: &[GradientStop],
    ) {
        self.frame.draw_linear_gradient(rect, radius, angle, stops);
    }

    fn draw_radial_gradient(
        &mut self,
        rect: Rect,
        radius: CornerRadius,
        center: Point,
        extent: f32,
        stops: &[GradientStop],
    ) {
        self.frame
            .draw_radial_gradient(rect, radius, center, extent, stops);
    }

    fn draw_conic_gradient(
        &mut self,
        rect: Rect,
        radius: CornerRadius,
        center: Point,
        angle: f32,
        stops: &[GradientStop],
    ) {
        self.frame
            .draw_conic_gradient(rect, radius, center, angle, stops);
    }

    fn draw_shadow(&mut self, shadow: &ShadowPaint) {
        self.frame.draw_shadow(shadow);
    }

    fn draw_image(&mut self, rect: Rect, radius: CornerRadius, image: ImageId, tint: Color) {
        self.frame.draw_image(rect, radius, image, tint);
    }

    fn push_clip(&mut self, rect: Rect) {
        self.frame.push_clip(rect);
    }

    fn pop_clip(&mut self) {
        self.frame.pop_clip();
    }

    fn push_transform(&mut self, transform: Transform2D) {
        self.frame.push_transform(transform);
    }

    fn pop_transform(&mut self) {
        self.frame.pop_transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RendererConfig::default();
        assert_eq!(config.aa_radius, 0.5);
        assert_eq!(config.sample_count, 1);
        assert!(config.texture_format.is_none());
    }

    #[test]
    fn test_capacity_growth() {
        assert_eq!(grown_capacity(1024, 10, 1 << 20), 1024);
        assert_eq!(grown_capacity(1024, 1500, 1 << 20), 2048);
        assert_eq!(grown_capacity(1024, 5000, 4096), 4096);
        assert_eq!(grown_capacity(8192, 9000, 4096), 8192);
    }

    #[test]
    fn test_image_size_error_message() {
        let err = RendererError::ImageSize {
            expected: 16,
            actual: 12,
        };
        assert_eq!(err.to_string(), "image data is 12 bytes, expected 16");
    }
}
