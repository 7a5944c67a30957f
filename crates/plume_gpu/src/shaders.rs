//! GPU shaders for SDF primitives
//!
//! One shader module serves both pipelines:
//! - `fs_main`: widget quads (background + border + outline in a single
//!   pass), gradients, shadows and lines
//! - `fs_image`: textured rounded rects, bound with a per-image group
//!
//! Output is premultiplied alpha. The rounded-rect distance and compositing
//! follow `plume_paint::sdf` exactly.

/// WGSL shader for every quad primitive
pub const WIDGET_SHADER: &str = r#"
// ============================================================================
// Shared types
// ============================================================================

const KIND_WIDGET: u32 = 0u;
const KIND_LINEAR: u32 = 1u;
const KIND_RADIAL: u32 = 2u;
const KIND_CONIC: u32 = 3u;
const KIND_SHADOW: u32 = 4u;
const KIND_LINE: u32 = 5u;
const PI: f32 = 3.14159265359;

struct Uniforms {
    viewport: vec2<f32>,
    aa_radius: f32,
    _padding: f32,
}

struct Primitive {
    quad: vec4<f32>,
    bounds: vec4<f32>,
    radius: vec4<f32>,
    fill: vec4<f32>,
    border_widths: vec4<f32>,
    border_colors: array<vec4<f32>, 4>,
    outline: vec4<f32>,
    outline_color: vec4<f32>,
    transform_a: vec4<f32>,
    transform_b: vec4<f32>,
    params: vec4<f32>,
    shape: vec4<f32>,
    stop_offsets: vec4<f32>,
    stop_colors: array<vec4<f32>, 4>,
    info: vec4<u32>,
}

@group(0) @binding(0) var<uniform> uniforms: Uniforms;
@group(0) @binding(1) var<storage, read> primitives: array<Primitive>;

@group(1) @binding(0) var image_texture: texture_2d<f32>;
@group(1) @binding(1) var image_sampler: sampler;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) local: vec2<f32>,
    @location(1) @interpolate(flat) index: u32,
}

// ============================================================================
// Vertex stage
// ============================================================================

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @builtin(instance_index) instance_index: u32,
) -> VertexOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(0.0, 0.0),
        vec2<f32>(1.0, 0.0),
        vec2<f32>(0.0, 1.0),
        vec2<f32>(1.0, 0.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(0.0, 1.0),
    );
    let prim = primitives[instance_index];
    let local = prim.quad.xy + corners[vertex_index] * prim.quad.zw;

    // Affine (a, b, c, d, tx, ty), column-major like Transform2D
    let m = prim.transform_a;
    let world = vec2<f32>(
        m.x * local.x + m.z * local.y + prim.transform_b.x,
        m.y * local.x + m.w * local.y + prim.transform_b.y,
    );
    let ndc = vec2<f32>(
        world.x / uniforms.viewport.x * 2.0 - 1.0,
        1.0 - world.y / uniforms.viewport.y * 2.0,
    );

    var out: VertexOutput;
    out.position = vec4<f32>(ndc, 0.0, 1.0);
    out.local = local;
    out.index = instance_index;
    return out;
}

// ============================================================================
// SDF Functions
// ============================================================================

// rect: (x, y, width, height); radius: (top-left, top-right, bottom-right, bottom-left)
fn sd_rounded_rect(p: vec2<f32>, rect: vec4<f32>, radius: vec4<f32>) -> f32 {
    let half_size = rect.zw * 0.5;
    let rel = p - (rect.xy + half_size);

    // Y increases downward, so rel.y < 0 is the top half
    var r: f32;
    if rel.y < 0.0 {
        if rel.x >= 0.0 {
            r = radius.y;
        } else {
            r = radius.x;
        }
    } else {
        if rel.x >= 0.0 {
            r = radius.z;
        } else {
            r = radius.w;
        }
    }
    r = min(r, min(half_size.x, half_size.y));

    let q = abs(rel) - half_size + vec2<f32>(r);
    return length(max(q, vec2<f32>(0.0))) + min(max(q.x, q.y), 0.0) - r;
}

// Segment with butt caps
fn sd_segment(p: vec2<f32>, a: vec2<f32>, b: vec2<f32>, half_width: f32) -> f32 {
    let axis = b - a;
    let len = length(axis);
    if len < 1e-5 {
        return 1e5;
    }
    let dir = axis / len;
    let rel = p - a;
    let along = dot(rel, dir);
    let across = abs(rel.x * dir.y - rel.y * dir.x);
    return max(across - half_width, max(-along, along - len));
}

fn coverage(d: f32) -> f32 {
    let aa = uniforms.aa_radius;
    return 1.0 - smoothstep(-aa, aa, d);
}

fn premultiply(color: vec4<f32>, cov: f32) -> vec4<f32> {
    let a = color.a * cov;
    return vec4<f32>(color.rgb * a, a);
}

fn outset(rect: vec4<f32>, amount: f32) -> vec4<f32> {
    return vec4<f32>(rect.xy - vec2<f32>(amount), rect.zw + vec2<f32>(2.0 * amount));
}

fn grow(radius: vec4<f32>, amount: f32) -> vec4<f32> {
    return select(vec4<f32>(0.0), radius + vec4<f32>(amount), radius > vec4<f32>(0.0));
}

// Abramowitz-Stegun approximation
fn erf(x: f32) -> f32 {
    let s = sign(x);
    let a = abs(x);
    var r = 1.0 + (0.278393 + (0.230389 + 0.078108 * (a * a)) * a) * a;
    r = r * r;
    return s - s / (r * r);
}

// ============================================================================
// Widget quad: background, border ring and outline ring
// ============================================================================

// Color of the side whose edge is nearest, in units of that side's width
fn border_color(p: vec2<f32>, index: u32) -> vec4<f32> {
    let r = primitives[index].bounds;
    let w = primitives[index].border_widths;
    let dists = vec4<f32>(p.y - r.y, r.x + r.z - p.x, r.y + r.w - p.y, p.x - r.x);
    var best = 1e30;
    var color = primitives[index].border_colors[0];
    for (var i = 0u; i < 4u; i++) {
        if w[i] > 0.0 {
            let n = dists[i] / w[i];
            if n < best {
                best = n;
                color = primitives[index].border_colors[i];
            }
        }
    }
    return color;
}

fn shade_widget(p: vec2<f32>, index: u32) -> vec4<f32> {
    let prim = primitives[index];
    let d_outer = sd_rounded_rect(p, prim.bounds, prim.radius);
    var d_inner = d_outer;
    if prim.info.z != 0u {
        d_inner = sd_rounded_rect(p, prim.params, prim.shape);
    }

    let box_cov = coverage(d_outer);
    let fill_cov = min(coverage(d_inner), box_cov);
    let border_cov = max(box_cov - fill_cov, 0.0);

    var out = premultiply(prim.fill, fill_cov);
    if border_cov > 0.0 {
        out += premultiply(border_color(p, index), border_cov);
    }

    if prim.info.w != 0u {
        let width = prim.outline.x;
        let gap = prim.outline.y;
        let d_ring_inner = sd_rounded_rect(p, outset(prim.bounds, gap), grow(prim.radius, gap));
        let d_ring_outer = sd_rounded_rect(
            p,
            outset(prim.bounds, gap + width),
            grow(prim.radius, gap + width),
        );
        let ring_cov = coverage(d_ring_outer) * (1.0 - coverage(d_ring_inner));
        out += premultiply(prim.outline_color, ring_cov);
    }
    out.a = min(out.a, 1.0);
    return out;
}

// ============================================================================
// Gradients
// ============================================================================

// Position along the color ramp; CSS angles (0 points up, 90 right)
fn gradient_t(p: vec2<f32>, index: u32) -> f32 {
    let prim = primitives[index];
    let size = prim.bounds.zw;
    let kind = prim.info.x;
    if kind == KIND_LINEAR {
        let center = prim.bounds.xy + size * 0.5;
        let dir = vec2<f32>(sin(prim.params.x), -cos(prim.params.x));
        let half_len = abs(size.x * 0.5 * dir.x) + abs(size.y * 0.5 * dir.y);
        return dot(p - center, dir) / max(2.0 * half_len, 1e-5) + 0.5;
    }

    let origin = prim.bounds.xy + prim.params.xy * size;
    if kind == KIND_RADIAL {
        let reach = length(size * 0.5) * prim.params.z;
        return length(p - origin) / max(reach, 1e-5);
    }

    let rel = p - origin;
    let theta = atan2(rel.x, -rel.y) - prim.params.z;
    return fract(theta / (2.0 * PI));
}

fn sample_stops(t: f32, index: u32) -> vec4<f32> {
    let offsets = primitives[index].stop_offsets;
    let count = primitives[index].info.y;
    if count == 0u {
        return vec4<f32>(0.0);
    }
    if t <= offsets[0] {
        return primitives[index].stop_colors[0];
    }
    for (var i = 1u; i < count; i++) {
        let a = offsets[i - 1u];
        let b = offsets[i];
        if t <= b {
            let span = max(b - a, 1e-5);
            return mix(
                primitives[index].stop_colors[i - 1u],
                primitives[index].stop_colors[i],
                (t - a) / span,
            );
        }
    }
    return primitives[index].stop_colors[count - 1u];
}

// ============================================================================
// Fragment stages
// ============================================================================

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let prim = primitives[in.index];
    let p = in.local;
    let kind = prim.info.x;

    if kind == KIND_WIDGET {
        return shade_widget(p, in.index);
    }
    if kind == KIND_SHADOW {
        let d = sd_rounded_rect(p, prim.bounds, prim.radius);
        let sigma = prim.shape.x;
        var cov = coverage(d);
        if sigma > 0.0 {
            cov = 0.5 * (1.0 - erf(d / (sqrt(2.0) * sigma)));
        }
        return premultiply(prim.fill, cov);
    }
    if kind == KIND_LINE {
        let d = sd_segment(p, prim.params.xy, prim.params.zw, prim.shape.x);
        return premultiply(prim.fill, coverage(d));
    }

    // Gradients
    let cov = coverage(sd_rounded_rect(p, prim.bounds, prim.radius));
    return premultiply(sample_stops(gradient_t(p, in.index), in.index), cov);
}

@fragment
fn fs_image(in: VertexOutput) -> @location(0) vec4<f32> {
    let prim = primitives[in.index];
    let uv = (in.local - prim.bounds.xy) / max(prim.bounds.zw, vec2<f32>(1e-5));
    let clamped = clamp(uv, vec2<f32>(0.0), vec2<f32>(1.0));
    let texel = textureSample(image_texture, image_sampler, clamped);
    let cov = coverage(sd_rounded_rect(in.local, prim.bounds, prim.radius));
    return premultiply(texel * prim.fill, cov);
}
"#;
