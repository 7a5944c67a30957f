//! Style value types
//!
//! Spacing, size and color values are stored unresolved, as literal logical
//! pixels, theme token references or keywords. They only become numbers or
//! colors through `resolve*` against a [`ScaledTheme`].
//!
//! Percentages are the exception to full resolution: they depend on the
//! containing block, which is unknown until layout, so they resolve to a
//! [`LengthPercent`] that layout finishes against the real basis.

use plume_core::Color;
use plume_theme::{ColorToken, OpacityToken, RadiusToken, ScaledTheme, SizeToken, SpacingToken};
use tracing::warn;

// ============================================================================
// Resolved lengths
// ============================================================================

/// A physical-pixel length plus a fraction of a not-yet-known basis
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LengthPercent {
    pub px: f32,
    /// 0.5 for `50%`
    pub fraction: f32,
}

impl LengthPercent {
    pub const ZERO: LengthPercent = LengthPercent {
        px: 0.0,
        fraction: 0.0,
    };

    pub const fn px(px: f32) -> Self {
        Self { px, fraction: 0.0 }
    }

    pub fn percent(percent: f32) -> Self {
        Self {
            px: 0.0,
            fraction: percent / 100.0,
        }
    }

    /// Whether the value is independent of its basis
    pub fn is_fixed(&self) -> bool {
        self.fraction == 0.0
    }

    /// Resolve against `basis`. An indefinite or non-positive basis
    /// contributes nothing.
    pub fn resolve(&self, basis: f32) -> f32 {
        if self.fraction == 0.0 || !basis.is_finite() || basis <= 0.0 {
            self.px
        } else {
            self.px + self.fraction * basis
        }
    }
}

/// A resolved length that may also be `auto` (margins, insets)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LengthAuto {
    #[default]
    Auto,
    Length(LengthPercent),
}

impl LengthAuto {
    pub const ZERO: LengthAuto = LengthAuto::Length(LengthPercent::ZERO);

    pub fn is_auto(&self) -> bool {
        matches!(self, LengthAuto::Auto)
    }

    /// Resolve with `auto` treated as zero
    pub fn resolve_or_zero(&self, basis: f32) -> f32 {
        match self {
            LengthAuto::Auto => 0.0,
            LengthAuto::Length(l) => l.resolve(basis),
        }
    }

    /// Resolve, keeping `auto` as `None`
    pub fn resolve(&self, basis: f32) -> Option<f32> {
        match self {
            LengthAuto::Auto => None,
            LengthAuto::Length(l) => Some(l.resolve(basis)),
        }
    }
}

/// A resolved width/height/min/max/flex-basis
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SizeSpec {
    /// `auto` (or `none` for max constraints)
    #[default]
    Auto,
    Length(LengthPercent),
    MinContent,
    MaxContent,
    FitContent,
}

impl SizeSpec {
    pub fn is_auto(&self) -> bool {
        matches!(self, SizeSpec::Auto)
    }
}

// ============================================================================
// SpacingValue
// ============================================================================

/// Padding, margin, gap, inset, border width and radius values
#[derive(Clone, Debug, PartialEq)]
pub enum SpacingValue {
    /// Logical pixels, multiplied by the theme scale on resolve
    Px(f32),
    Token(SpacingToken),
    Radius(RadiusToken),
    /// Percentage of the containing block's width
    Percent(f32),
    Auto,
    Inherit,
}

impl SpacingValue {
    pub const ZERO: SpacingValue = SpacingValue::Px(0.0);

    /// Resolve to a length, keeping `auto`. `Inherit` takes `inherited`.
    pub fn resolve(&self, theme: &ScaledTheme, inherited: LengthAuto) -> LengthAuto {
        match self {
            SpacingValue::Px(px) => LengthAuto::Length(LengthPercent::px(theme.scale(*px))),
            SpacingValue::Token(token) => {
                LengthAuto::Length(LengthPercent::px(theme.spacing(*token)))
            }
            SpacingValue::Radius(token) => {
                LengthAuto::Length(LengthPercent::px(theme.radius(*token)))
            }
            SpacingValue::Percent(p) => LengthAuto::Length(LengthPercent::percent(*p)),
            SpacingValue::Auto => LengthAuto::Auto,
            SpacingValue::Inherit => inherited,
        }
    }

    /// Resolve where `auto` is not meaningful (padding, gaps): it becomes zero
    pub fn resolve_length(&self, theme: &ScaledTheme, inherited: LengthPercent) -> LengthPercent {
        match self.resolve(theme, LengthAuto::Length(inherited)) {
            LengthAuto::Auto => LengthPercent::ZERO,
            LengthAuto::Length(l) => l,
        }
    }

    /// Resolve to pixels where percentages have no basis (border widths,
    /// radii, outline): a percentage degrades to 0.
    pub fn resolve_px(&self, theme: &ScaledTheme, inherited: f32) -> f32 {
        self.resolve_length(theme, LengthPercent::px(inherited)).px.max(0.0)
    }
}

impl Default for SpacingValue {
    fn default() -> Self {
        SpacingValue::ZERO
    }
}

impl From<f32> for SpacingValue {
    fn from(px: f32) -> Self {
        SpacingValue::Px(px)
    }
}

impl From<SpacingToken> for SpacingValue {
    fn from(token: SpacingToken) -> Self {
        SpacingValue::Token(token)
    }
}

impl From<RadiusToken> for SpacingValue {
    fn from(token: RadiusToken) -> Self {
        SpacingValue::Radius(token)
    }
}

// ============================================================================
// SizeValue
// ============================================================================

/// Widths, heights, flex-basis and grid track sizes
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SizeValue {
    Px(f32),
    Token(SizeToken),
    /// Percentage of the containing block along the same axis
    Percent(f32),
    #[default]
    Auto,
    Inherit,
    FitContent,
    MinContent,
    MaxContent,
    /// Flexible grid track fraction
    Fr(f32),
    MinMax(Box<SizeValue>, Box<SizeValue>),
}

impl SizeValue {
    pub fn percent(percent: f32) -> Self {
        SizeValue::Percent(percent)
    }

    pub fn fr(fraction: f32) -> Self {
        SizeValue::Fr(fraction)
    }

    pub fn minmax(min: impl Into<SizeValue>, max: impl Into<SizeValue>) -> Self {
        SizeValue::MinMax(Box::new(min.into()), Box::new(max.into()))
    }

    /// Resolve for a box dimension. `fr` and `minmax()` only make sense as
    /// grid tracks and degrade to `auto` here.
    pub fn resolve(&self, theme: &ScaledTheme, inherited: SizeSpec) -> SizeSpec {
        match self {
            SizeValue::Px(px) => SizeSpec::Length(LengthPercent::px(theme.scale(*px))),
            SizeValue::Token(token) => SizeSpec::Length(LengthPercent::px(theme.size(*token))),
            SizeValue::Percent(p) => SizeSpec::Length(LengthPercent::percent(*p)),
            SizeValue::Auto => SizeSpec::Auto,
            SizeValue::Inherit => inherited,
            SizeValue::FitContent => SizeSpec::FitContent,
            SizeValue::MinContent => SizeSpec::MinContent,
            SizeValue::MaxContent => SizeSpec::MaxContent,
            SizeValue::Fr(_) | SizeValue::MinMax(..) => {
                warn!("{:?} is only valid as a grid track, using auto", self);
                SizeSpec::Auto
            }
        }
    }

    /// Resolve as a grid track size
    pub fn resolve_track(&self, theme: &ScaledTheme) -> TrackSize {
        match self {
            SizeValue::MinMax(min, max) => {
                let min = min.resolve_breadth(theme);
                let max = max.resolve_breadth(theme);
                // A flexible minimum is invalid
                let min = if matches!(min, TrackBreadth::Fr(_)) {
                    TrackBreadth::Auto
                } else {
                    min
                };
                TrackSize { min, max }
            }
            SizeValue::Fr(_) => TrackSize {
                min: TrackBreadth::Auto,
                max: self.resolve_breadth(theme),
            },
            other => {
                let breadth = other.resolve_breadth(theme);
                TrackSize {
                    min: breadth,
                    max: breadth,
                }
            }
        }
    }

    fn resolve_breadth(&self, theme: &ScaledTheme) -> TrackBreadth {
        match self {
            SizeValue::Px(px) => TrackBreadth::Length(LengthPercent::px(theme.scale(*px))),
            SizeValue::Token(token) => TrackBreadth::Length(LengthPercent::px(theme.size(*token))),
            SizeValue::Percent(p) => TrackBreadth::Length(LengthPercent::percent(*p)),
            SizeValue::Fr(fr) => TrackBreadth::Fr(fr.max(0.0)),
            SizeValue::MinContent => TrackBreadth::MinContent,
            SizeValue::MaxContent => TrackBreadth::MaxContent,
            SizeValue::Auto | SizeValue::Inherit | SizeValue::FitContent => TrackBreadth::Auto,
            SizeValue::MinMax(..) => {
                warn!("nested minmax() in grid track, using auto");
                TrackBreadth::Auto
            }
        }
    }
}

impl From<f32> for SizeValue {
    fn from(px: f32) -> Self {
        SizeValue::Px(px)
    }
}

impl From<SizeToken> for SizeValue {
    fn from(token: SizeToken) -> Self {
        SizeValue::Token(token)
    }
}

/// One side of a resolved grid track sizing function
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackBreadth {
    Length(LengthPercent),
    Fr(f32),
    Auto,
    MinContent,
    MaxContent,
}

/// A resolved grid track: `minmax(min, max)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackSize {
    pub min: TrackBreadth,
    pub max: TrackBreadth,
}

impl TrackSize {
    pub const AUTO: TrackSize = TrackSize {
        min: TrackBreadth::Auto,
        max: TrackBreadth::Auto,
    };

    pub fn px(px: f32) -> Self {
        let breadth = TrackBreadth::Length(LengthPercent::px(px));
        Self {
            min: breadth,
            max: breadth,
        }
    }

    pub fn fr(fr: f32) -> Self {
        Self {
            min: TrackBreadth::Auto,
            max: TrackBreadth::Fr(fr),
        }
    }

    pub fn flex_factor(&self) -> Option<f32> {
        match self.max {
            TrackBreadth::Fr(fr) => Some(fr),
            _ => None,
        }
    }
}

impl Default for TrackSize {
    fn default() -> Self {
        TrackSize::AUTO
    }
}

// ============================================================================
// ColorValue
// ============================================================================

/// Colors for backgrounds, borders, outlines, text and shadows
#[derive(Clone, Debug, PartialEq)]
pub enum ColorValue {
    Rgba(Color),
    Token(ColorToken),
    /// A custom color registered on the theme by name
    Named(String),
    Inherit,
    Transparent,
}

impl ColorValue {
    pub fn named(name: impl Into<String>) -> Self {
        ColorValue::Named(name.into())
    }

    /// Resolve to RGBA. Unknown named colors become
    /// [`Color::FALLBACK_GRAY`] with a warning.
    pub fn resolve(&self, theme: &ScaledTheme, inherited: Color) -> Color {
        match self {
            ColorValue::Rgba(color) => *color,
            ColorValue::Token(token) => theme.color(*token),
            ColorValue::Named(name) => theme.named_color_or_fallback(name),
            ColorValue::Inherit => inherited,
            ColorValue::Transparent => Color::TRANSPARENT,
        }
    }
}

impl Default for ColorValue {
    fn default() -> Self {
        ColorValue::Transparent
    }
}

impl From<Color> for ColorValue {
    fn from(color: Color) -> Self {
        ColorValue::Rgba(color)
    }
}

impl From<ColorToken> for ColorValue {
    fn from(token: ColorToken) -> Self {
        ColorValue::Token(token)
    }
}

// ============================================================================
// OpacityValue
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OpacityValue {
    Value(f32),
    Token(OpacityToken),
}

impl OpacityValue {
    /// Resolve to 0..=1; non-finite values become fully opaque
    pub fn resolve(&self, theme: &ScaledTheme) -> f32 {
        let value = match self {
            OpacityValue::Value(v) => *v,
            OpacityValue::Token(token) => theme.opacity(*token),
        };
        if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

impl From<f32> for OpacityValue {
    fn from(value: f32) -> Self {
        OpacityValue::Value(value)
    }
}

impl From<OpacityToken> for OpacityValue {
    fn from(token: OpacityToken) -> Self {
        OpacityValue::Token(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme_at(scale: f32) -> ScaledTheme {
        let mut theme = ScaledTheme::default();
        theme.set_scale_factor(scale);
        theme
    }

    #[test]
    fn test_spacing_scales_literals_and_tokens() {
        let theme = theme_at(2.0);
        assert_eq!(
            SpacingValue::Px(5.0).resolve(&theme, LengthAuto::Auto),
            LengthAuto::Length(LengthPercent::px(10.0))
        );
        assert_eq!(
            SpacingValue::Token(SpacingToken::Space2).resolve_px(&theme, 0.0),
            16.0
        );
        assert!(SpacingValue::Auto.resolve(&theme, LengthAuto::ZERO).is_auto());
        // Percentages are never scaled
        let pct = SpacingValue::Percent(10.0).resolve_length(&theme, LengthPercent::ZERO);
        assert_eq!(pct.resolve(200.0), 20.0);
    }

    #[test]
    fn test_opacity_tokens_resolve_unscaled() {
        let theme = theme_at(2.0);
        let disabled = OpacityValue::Token(OpacityToken::Disabled).resolve(&theme);
        assert_eq!(disabled, theme.opacity(OpacityToken::Disabled));
        assert_eq!(OpacityValue::Value(1.5).resolve(&theme), 1.0);
        assert_eq!(OpacityValue::Value(f32::NAN).resolve(&theme), 1.0);
    }

    #[test]
    fn test_percent_against_zero_basis_degrades_to_zero() {
        let lp = LengthPercent::percent(50.0);
        assert_eq!(lp.resolve(0.0), 0.0);
        assert_eq!(lp.resolve(f32::INFINITY), 0.0);
        assert_eq!(lp.resolve(80.0), 40.0);
    }

    #[test]
    fn test_inherit_takes_parent_value() {
        let theme = ScaledTheme::default();
        let parent = SizeSpec::Length(LengthPercent::px(42.0));
        assert_eq!(SizeValue::Inherit.resolve(&theme, parent), parent);
        assert_eq!(
            ColorValue::Inherit.resolve(&theme, Color::RED),
            Color::RED
        );
    }

    #[test]
    fn test_unknown_named_color_falls_back_to_gray() {
        let theme = ScaledTheme::default();
        let color = ColorValue::named("no-such-color").resolve(&theme, Color::WHITE);
        assert_eq!(color, Color::FALLBACK_GRAY);
    }

    #[test]
    fn test_track_resolution() {
        let theme = theme_at(1.0);
        assert_eq!(SizeValue::Px(100.0).resolve_track(&theme), TrackSize::px(100.0));
        assert_eq!(SizeValue::fr(2.0).resolve_track(&theme), TrackSize::fr(2.0));
        let mm = SizeValue::minmax(100.0, SizeValue::fr(1.0)).resolve_track(&theme);
        assert_eq!(mm.min, TrackBreadth::Length(LengthPercent::px(100.0)));
        assert_eq!(mm.flex_factor(), Some(1.0));
        // fr is not a box size
        assert_eq!(SizeValue::fr(1.0).resolve(&theme, SizeSpec::Auto), SizeSpec::Auto);
    }
}
