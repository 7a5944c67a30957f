//! Smoke test against a real adapter. Machines without a GPU skip it.

use plume_core::{Color, CornerRadius, Point, Rect, Transform2D};
use plume_gpu::{GpuRenderer, RendererConfig, RendererError};
use plume_paint::{GradientStop, PaintSurface, ShadowPaint, WidgetPaint};

fn renderer() -> Option<GpuRenderer> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    match GpuRenderer::headless(RendererConfig {
        initial_quad_capacity: 2,
        ..Default::default()
    }) {
        Ok(renderer) => Some(renderer),
        Err(RendererError::AdapterNotFound) => None,
        Err(err) => panic!("renderer setup failed: {err}"),
    }
}

#[test]
fn renders_a_frame_offscreen() {
    let Some(mut renderer) = renderer() else {
        return;
    };
    renderer.resize(64, 64);
    let target = renderer.device().create_texture(&wgpu::TextureDescriptor {
        label: Some("test target"),
        size: wgpu::Extent3d {
            width: 64,
            height: 64,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: renderer.texture_format(),
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());

    let image = renderer
        .register_image(2, 2, &[255; 16])
        .expect("2x2 image uploads");
    assert!(matches!(
        renderer.register_image(2, 2, &[0; 12]),
        Err(RendererError::ImageSize {
            expected: 16,
            actual: 12
        })
    ));

    renderer.draw_shadow(&ShadowPaint {
        rect: Rect::new(8.0, 8.0, 40.0, 40.0),
        radius: CornerRadius::uniform(6.0),
        blur: 4.0,
        color: Color::BLACK.with_alpha(0.3),
    });
    renderer.draw_widget(
        &WidgetPaint::new(Rect::new(4.0, 4.0, 40.0, 40.0), Color::WHITE)
            .with_radius(6.0_f32)
            .with_border(2.0, Color::BLUE)
            .with_outline(1.0, 1.0, Color::RED),
    );
    renderer.push_clip(Rect::new(0.0, 0.0, 32.0, 32.0));
    renderer.push_transform(Transform2D::translate(10.0, 10.0));
    renderer.draw_linear_gradient(
        Rect::new(0.0, 0.0, 20.0, 20.0),
        CornerRadius::ZERO,
        90.0,
        &[
            GradientStop::new(0.0, Color::RED),
            GradientStop::new(1.0, Color::GREEN),
        ],
    );
    let icon = Rect::new(0.0, 0.0, 8.0, 8.0);
    renderer.draw_image(icon, CornerRadius::ZERO, image, Color::WHITE);
    renderer.pop_transform();
    renderer.pop_clip();
    renderer.draw_line(Point::new(0.0, 60.0), Point::new(60.0, 60.0), Color::BLACK, 1.0);

    renderer.render(&view);
    renderer.device().poll(wgpu::Maintain::Wait);
}
