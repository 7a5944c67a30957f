//! DPI-scaled theme resolution
//!
//! [`ScaledTheme`] is what style resolution talks to. It wraps an unscaled
//! [`Theme`], applies per-token overrides, and multiplies every length by the
//! display scale factor so that style values can stay in logical pixels until
//! they are resolved.

use std::sync::Arc;

use plume_core::Color;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::theme::{ColorScheme, Theme, ThemeBundle};
use crate::themes::PlumeTheme;
use crate::tokens::*;

/// A theme bound to a display scale factor
#[derive(Clone, Debug)]
pub struct ScaledTheme {
    theme: Arc<dyn Theme>,
    scale_factor: f32,
    color_overrides: FxHashMap<ColorToken, Color>,
    spacing_overrides: FxHashMap<SpacingToken, f32>,
    size_overrides: FxHashMap<SizeToken, f32>,
    radius_overrides: FxHashMap<RadiusToken, f32>,
    named_colors: FxHashMap<String, Color>,
}

impl ScaledTheme {
    pub fn new(theme: Arc<dyn Theme>, scale_factor: f32) -> Self {
        Self {
            theme,
            scale_factor: sanitize_scale(scale_factor),
            color_overrides: FxHashMap::default(),
            spacing_overrides: FxHashMap::default(),
            size_overrides: FxHashMap::default(),
            radius_overrides: FxHashMap::default(),
            named_colors: FxHashMap::default(),
        }
    }

    pub fn from_bundle(bundle: &ThemeBundle, scheme: ColorScheme, scale_factor: f32) -> Self {
        Self::new(bundle.for_scheme(scheme), scale_factor)
    }

    /// The unscaled theme underneath
    pub fn theme(&self) -> &dyn Theme {
        self.theme.as_ref()
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.theme.color_scheme()
    }

    // ========================================================================
    // Scale
    // ========================================================================

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Change the DPI scale factor.
    ///
    /// Non-finite or non-positive factors are rejected and leave the current
    /// factor in place.
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            warn!("ignoring invalid scale factor {}", scale_factor);
            return;
        }
        debug!("theme scale factor {} -> {}", self.scale_factor, scale_factor);
        self.scale_factor = scale_factor;
    }

    /// Convert logical pixels to physical pixels
    pub fn scale(&self, px: f32) -> f32 {
        px * self.scale_factor
    }

    // ========================================================================
    // Token accessors (all lengths scaled)
    // ========================================================================

    pub fn spacing(&self, token: SpacingToken) -> f32 {
        let value = self
            .spacing_overrides
            .get(&token)
            .copied()
            .unwrap_or_else(|| self.theme.spacing().get(token));
        self.scale(value)
    }

    pub fn size(&self, token: SizeToken) -> f32 {
        if let Some(value) = self.size_overrides.get(&token) {
            return self.scale(*value);
        }
        let value = match token {
            SizeToken::Text(font) => self.theme.typography().size(font),
            other => self.theme.sizes().get(other).unwrap_or(0.0),
        };
        self.scale(value)
    }

    pub fn radius(&self, token: RadiusToken) -> f32 {
        let value = self
            .radius_overrides
            .get(&token)
            .copied()
            .unwrap_or_else(|| self.theme.radii().get(token));
        self.scale(value)
    }

    pub fn font_size(&self, token: FontSizeToken) -> f32 {
        self.size(SizeToken::Text(token))
    }

    /// Default font size (the `Base` step of the typography scale)
    pub fn base_font_size(&self) -> f32 {
        self.font_size(FontSizeToken::Base)
    }

    /// Line height multiplier
    pub fn line_height(&self) -> f32 {
        self.theme.typography().line_height
    }

    pub fn font_family(&self, token: FontFamilyToken) -> &str {
        self.theme.typography().family(token)
    }

    pub fn default_font_weight(&self) -> FontWeight {
        self.theme.typography().default_weight
    }

    pub fn shadow(&self, token: ShadowToken) -> Shadow {
        self.theme.shadows().get(token).scaled(self.scale_factor)
    }

    /// Opacities are not scaled
    pub fn opacity(&self, token: OpacityToken) -> f32 {
        self.theme.opacity().get(token)
    }

    /// Colors are not scaled
    pub fn color(&self, token: ColorToken) -> Color {
        self.color_overrides
            .get(&token)
            .copied()
            .unwrap_or_else(|| self.theme.colors().get(token))
    }

    /// Look up a custom color registered by name
    pub fn named_color(&self, name: &str) -> Option<Color> {
        self.named_colors.get(name).copied()
    }

    /// Look up a custom color, substituting [`Color::FALLBACK_GRAY`] if unknown
    pub fn named_color_or_fallback(&self, name: &str) -> Color {
        self.named_color(name).unwrap_or_else(|| {
            warn!("unknown color token '{}', using fallback gray", name);
            Color::FALLBACK_GRAY
        })
    }

    // ========================================================================
    // Overrides
    // ========================================================================

    pub fn set_color_override(&mut self, token: ColorToken, color: Color) {
        self.color_overrides.insert(token, color);
    }

    pub fn set_spacing_override(&mut self, token: SpacingToken, px: f32) {
        self.spacing_overrides.insert(token, px);
    }

    pub fn set_size_override(&mut self, token: SizeToken, px: f32) {
        self.size_overrides.insert(token, px);
    }

    pub fn set_radius_override(&mut self, token: RadiusToken, px: f32) {
        self.radius_overrides.insert(token, px);
    }

    pub fn register_named_color(&mut self, name: impl Into<String>, color: Color) {
        self.named_colors.insert(name.into(), color);
    }

    pub fn clear_overrides(&mut self) {
        self.color_overrides.clear();
        self.spacing_overrides.clear();
        self.size_overrides.clear();
        self.radius_overrides.clear();
    }
}

impl Default for ScaledTheme {
    fn default() -> Self {
        Self::new(Arc::new(PlumeTheme::dark()), 1.0)
    }
}

fn sanitize_scale(scale_factor: f32) -> f32 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        warn!("invalid scale factor {}, using 1.0", scale_factor);
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths_scale_colors_do_not() {
        let mut theme = ScaledTheme::default();
        let base = theme.color(ColorToken::Primary);
        theme.set_scale_factor(2.0);

        assert_eq!(theme.spacing(SpacingToken::Space2), 16.0);
        assert_eq!(theme.radius(RadiusToken::Default), 8.0);
        assert_eq!(theme.size(SizeToken::IconMd), 32.0);
        assert_eq!(theme.font_size(FontSizeToken::Base), 26.0);
        assert_eq!(theme.scale(3.0), 6.0);
        assert_eq!(theme.color(ColorToken::Primary), base);
        assert_eq!(theme.opacity(OpacityToken::Disabled), 0.5);
    }

    #[test]
    fn test_invalid_scale_is_ignored() {
        let mut theme = ScaledTheme::new(Arc::new(PlumeTheme::dark()), f32::NAN);
        assert_eq!(theme.scale_factor(), 1.0);
        theme.set_scale_factor(-1.0);
        assert_eq!(theme.scale_factor(), 1.0);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut theme = ScaledTheme::default();
        theme.set_spacing_override(SpacingToken::Space4, 20.0);
        theme.set_color_override(ColorToken::Accent, Color::RED);
        assert_eq!(theme.spacing(SpacingToken::Space4), 20.0);
        assert_eq!(theme.color(ColorToken::Accent), Color::RED);

        theme.clear_overrides();
        assert_eq!(theme.spacing(SpacingToken::Space4), 16.0);
    }

    #[test]
    fn test_unknown_named_color_falls_back_to_gray() {
        let mut theme = ScaledTheme::default();
        theme.register_named_color("gizmo-x", Color::RED);
        assert_eq!(theme.named_color_or_fallback("gizmo-x"), Color::RED);
        assert_eq!(
            theme.named_color_or_fallback("gizmo-w"),
            Color::FALLBACK_GRAY
        );
    }
}
