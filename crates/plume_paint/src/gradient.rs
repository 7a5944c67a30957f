//! Gradient fills

use plume_core::{Color, Point};
use smallvec::SmallVec;

/// A gradient stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32, // 0.0 to 1.0
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Stops of a gradient, inline for the common two-to-four stop case
pub type GradientStops = SmallVec<[GradientStop; 4]>;

/// Gradient geometry, relative to the rectangle being filled
#[derive(Clone, Debug, PartialEq)]
pub enum Gradient {
    /// Angle in degrees; 0 points up, 90 points right (CSS convention)
    Linear { angle: f32, stops: GradientStops },
    /// Center in unit coordinates of the rect, radius as a fraction of the
    /// rect's half-diagonal
    Radial {
        center: Point,
        radius: f32,
        stops: GradientStops,
    },
    /// Center in unit coordinates, start angle in degrees
    Conic {
        center: Point,
        angle: f32,
        stops: GradientStops,
    },
}

impl Gradient {
    /// Create a simple linear gradient between two colors
    pub fn linear_simple(angle: f32, from: Color, to: Color) -> Self {
        Gradient::Linear {
            angle,
            stops: two_stops(from, to),
        }
    }

    pub fn stops(&self) -> &[GradientStop] {
        match self {
            Gradient::Linear { stops, .. }
            | Gradient::Radial { stops, .. }
            | Gradient::Conic { stops, .. } => stops,
        }
    }

    /// Sample the gradient's color ramp at `t` in 0..=1
    pub fn sample(&self, t: f32) -> Color {
        sample_stops(self.stops(), t)
    }
}

fn two_stops(from: Color, to: Color) -> GradientStops {
    let mut stops = GradientStops::new();
    stops.push(GradientStop::new(0.0, from));
    stops.push(GradientStop::new(1.0, to));
    stops
}

/// Piecewise-linear interpolation over sorted stops
pub fn sample_stops(stops: &[GradientStop], t: f32) -> Color {
    let Some(first) = stops.first() else {
        return Color::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = (b.offset - a.offset).max(f32::EPSILON);
            return Color::lerp(&a.color, &b.color, (t - a.offset) / span);
        }
    }
    stops[stops.len() - 1].color
}

/// Reduce `stops` to at most `max` entries by resampling the ramp at evenly
/// spaced offsets. Shorter lists are returned unchanged.
pub fn resample_stops(stops: &[GradientStop], max: usize) -> GradientStops {
    if stops.len() <= max || max < 2 {
        return stops.iter().copied().collect();
    }
    let start = stops[0].offset;
    let end = stops[stops.len() - 1].offset;
    (0..max)
        .map(|i| {
            let offset = start + (end - start) * i as f32 / (max - 1) as f32;
            GradientStop::new(offset, sample_stops(stops, offset))
        })
        .collect()
}
