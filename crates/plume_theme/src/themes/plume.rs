//! Default Plume theme
//!
//! A low-glare graphite palette for the dark scheme, tuned for long sessions in
//! a viewport-heavy editor, and a paper palette for the light scheme.

use crate::theme::{ColorScheme, Theme, ThemeBundle};
use crate::tokens::*;
use plume_core::Color;

/// Graphite palette (dark theme)
pub mod graphite {
    use plume_core::Color;

    pub const BASE: Color = Color::rgb(0.114, 0.114, 0.125);
    pub const MANTLE: Color = Color::rgb(0.145, 0.145, 0.157);
    pub const SURFACE0: Color = Color::rgb(0.176, 0.176, 0.192);
    pub const SURFACE1: Color = Color::rgb(0.220, 0.220, 0.239);
    pub const SURFACE2: Color = Color::rgb(0.267, 0.267, 0.290);
    pub const OVERLAY: Color = Color::rgb(0.345, 0.345, 0.373);
    pub const SUBTEXT: Color = Color::rgb(0.624, 0.627, 0.659);
    pub const TEXT: Color = Color::rgb(0.886, 0.886, 0.902);
    pub const MUTED: Color = Color::rgb(0.447, 0.447, 0.475);

    pub const BLUE: Color = Color::rgb(0.290, 0.565, 0.937);
    pub const BLUE_LIGHT: Color = Color::rgb(0.400, 0.647, 0.965);
    pub const BLUE_DARK: Color = Color::rgb(0.200, 0.471, 0.839);
    pub const ORANGE: Color = Color::rgb(0.957, 0.573, 0.227);
    pub const GREEN: Color = Color::rgb(0.459, 0.765, 0.404);
    pub const YELLOW: Color = Color::rgb(0.945, 0.792, 0.310);
    pub const RED: Color = Color::rgb(0.914, 0.361, 0.369);
}

/// Paper palette (light theme)
pub mod paper {
    use plume_core::Color;

    pub const BASE: Color = Color::rgb(0.933, 0.933, 0.941);
    pub const MANTLE: Color = Color::rgb(0.898, 0.898, 0.910);
    pub const SURFACE0: Color = Color::rgb(0.976, 0.976, 0.980);
    pub const SURFACE1: Color = Color::rgb(0.859, 0.859, 0.875);
    pub const SURFACE2: Color = Color::rgb(0.800, 0.800, 0.820);
    pub const OVERLAY: Color = Color::rgb(0.702, 0.702, 0.725);
    pub const SUBTEXT: Color = Color::rgb(0.369, 0.373, 0.408);
    pub const TEXT: Color = Color::rgb(0.133, 0.137, 0.157);
    pub const MUTED: Color = Color::rgb(0.600, 0.604, 0.627);

    pub const BLUE: Color = Color::rgb(0.137, 0.447, 0.863);
    pub const BLUE_LIGHT: Color = Color::rgb(0.227, 0.525, 0.902);
    pub const BLUE_DARK: Color = Color::rgb(0.098, 0.365, 0.737);
    pub const ORANGE: Color = Color::rgb(0.878, 0.459, 0.094);
    pub const GREEN: Color = Color::rgb(0.255, 0.612, 0.212);
    pub const YELLOW: Color = Color::rgb(0.820, 0.612, 0.055);
    pub const RED: Color = Color::rgb(0.812, 0.184, 0.200);
}

/// Default Plume theme
#[derive(Clone, Debug)]
pub struct PlumeTheme {
    pub(crate) name: String,
    pub(crate) scheme: ColorScheme,
    pub(crate) colors: ColorTokens,
    pub(crate) typography: TypographyTokens,
    pub(crate) spacing: SpacingTokens,
    pub(crate) sizes: SizeTokens,
    pub(crate) radii: RadiusTokens,
    pub(crate) shadows: ShadowTokens,
    pub(crate) opacity: OpacityTokens,
}

impl PlumeTheme {
    /// Create the light variant (paper)
    pub fn light() -> Self {
        Self {
            name: "Plume".to_string(),
            scheme: ColorScheme::Light,
            colors: ColorTokens {
                primary: paper::BLUE,
                primary_hover: paper::BLUE_LIGHT,
                primary_active: paper::BLUE_DARK,
                accent: paper::ORANGE,
                accent_subtle: paper::ORANGE.with_alpha(0.15),
                success: paper::GREEN,
                warning: paper::YELLOW,
                error: paper::RED,
                background: paper::BASE,
                surface: paper::SURFACE0,
                surface_elevated: Color::WHITE,
                surface_overlay: paper::MANTLE,
                panel_header: paper::MANTLE,
                text_primary: paper::TEXT,
                text_secondary: paper::SUBTEXT,
                text_disabled: paper::MUTED,
                text_inverse: Color::WHITE,
                border: paper::SURFACE2,
                border_hover: paper::OVERLAY,
                border_focus: paper::BLUE,
                control_bg: Color::WHITE,
                control_bg_hover: paper::SURFACE0,
                control_bg_active: paper::SURFACE1,
                control_bg_disabled: paper::MANTLE,
                tab_active: paper::SURFACE0,
                tab_inactive: paper::MANTLE,
                tab_hover: paper::SURFACE1,
                selection: paper::BLUE.with_alpha(0.25),
            },
            typography: TypographyTokens::default(),
            spacing: SpacingTokens::default(),
            sizes: SizeTokens::default(),
            radii: RadiusTokens::default(),
            shadows: ShadowTokens::light(),
            opacity: OpacityTokens::default(),
        }
    }

    /// Create the dark variant (graphite)
    pub fn dark() -> Self {
        Self {
            name: "Plume".to_string(),
            scheme: ColorScheme::Dark,
            colors: ColorTokens {
                primary: graphite::BLUE,
                primary_hover: graphite::BLUE_LIGHT,
                primary_active: graphite::BLUE_DARK,
                accent: graphite::ORANGE,
                accent_subtle: graphite::ORANGE.with_alpha(0.18),
                success: graphite::GREEN,
                warning: graphite::YELLOW,
                error: graphite::RED,
                background: graphite::BASE,
                surface: graphite::MANTLE,
                surface_elevated: graphite::SURFACE0,
                surface_overlay: graphite::SURFACE1,
                panel_header: graphite::SURFACE0,
                text_primary: graphite::TEXT,
                text_secondary: graphite::SUBTEXT,
                text_disabled: graphite::MUTED,
                text_inverse: graphite::BASE,
                border: graphite::SURFACE2,
                border_hover: graphite::OVERLAY,
                border_focus: graphite::BLUE,
                control_bg: graphite::SURFACE1,
                control_bg_hover: graphite::SURFACE2,
                control_bg_active: graphite::OVERLAY,
                control_bg_disabled: graphite::SURFACE0,
                tab_active: graphite::MANTLE,
                tab_inactive: graphite::BASE,
                tab_hover: graphite::SURFACE0,
                selection: graphite::BLUE.with_alpha(0.30),
            },
            typography: TypographyTokens::default(),
            spacing: SpacingTokens::default(),
            sizes: SizeTokens::default(),
            radii: RadiusTokens::default(),
            shadows: ShadowTokens::dark(),
            opacity: OpacityTokens {
                disabled: 0.5,
                ..OpacityTokens::default()
            },
        }
    }

    /// Create a theme bundle with light and dark variants
    pub fn bundle() -> ThemeBundle {
        ThemeBundle::new("Plume", Self::light(), Self::dark())
    }
}

impl Theme for PlumeTheme {
    fn name(&self) -> &str {
        &self.name
    }

    fn color_scheme(&self) -> ColorScheme {
        self.scheme
    }

    fn colors(&self) -> &ColorTokens {
        &self.colors
    }

    fn typography(&self) -> &TypographyTokens {
        &self.typography
    }

    fn spacing(&self) -> &SpacingTokens {
        &self.spacing
    }

    fn sizes(&self) -> &SizeTokens {
        &self.sizes
    }

    fn radii(&self) -> &RadiusTokens {
        &self.radii
    }

    fn shadows(&self) -> &ShadowTokens {
        &self.shadows
    }

    fn opacity(&self) -> &OpacityTokens {
        &self.opacity
    }
}
