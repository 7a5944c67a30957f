//! Image texture management
//!
//! Each registered image owns an sRGB texture and a group-1 bind group for
//! the `fs_image` pipeline.

use plume_paint::ImageId;
use rustc_hash::FxHashMap;
use wgpu::util::DeviceExt;

use crate::renderer::{RendererError, Result};

/// Bytes an RGBA8 image of the given size must carry
pub fn rgba_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

/// A GPU image texture ready for sampling
pub struct GpuImage {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

impl GpuImage {
    /// Upload RGBA8 pixels, row-major without padding
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<Self> {
        let expected = rgba_len(width, height);
        if pixels.len() != expected || expected == 0 {
            return Err(RendererError::ImageSize {
                expected,
                actual: pixels.len(),
            });
        }

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("Plume Image"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            pixels,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Plume Image Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Ok(Self {
            texture,
            bind_group,
            width,
            height,
        })
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Images addressable by [`ImageId`]
#[derive(Default)]
pub struct ImageRegistry {
    images: FxHashMap<ImageId, GpuImage>,
    next_id: u32,
}

impl ImageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, image: GpuImage) -> ImageId {
        let id = ImageId(self.next_id);
        self.next_id += 1;
        self.images.insert(id, image);
        id
    }

    pub fn get(&self, id: ImageId) -> Option<&GpuImage> {
        self.images.get(&id)
    }

    pub fn remove(&mut self, id: ImageId) -> Option<GpuImage> {
        self.images.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_len() {
        assert_eq!(rgba_len(2, 3), 24);
        assert_eq!(rgba_len(0, 10), 0);
    }

    #[test]
    fn test_empty_registry() {
        let registry = ImageRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get(ImageId(0)).is_none());
    }
}
