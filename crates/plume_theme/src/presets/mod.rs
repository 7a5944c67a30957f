//! Built-in theme presets.

use serde::Deserialize;

use crate::theme::ThemeBundle;
use crate::themes::PlumeTheme;
use plume_core::Color;

/// Built-in theme preset catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemePreset {
    /// Default graphite/paper theme.
    #[default]
    Plume,
    /// Pure backgrounds, bright borders and a saturated focus ring.
    HighContrast,
    /// Default palette with denser spacing and smaller controls.
    Compact,
}

impl ThemePreset {
    /// Stable preset id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::Plume => "plume",
            Self::HighContrast => "high-contrast",
            Self::Compact => "compact",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 3] = [
            ThemePreset::Plume,
            ThemePreset::HighContrast,
            ThemePreset::Compact,
        ];
        &PRESETS
    }

    /// Build a light/dark theme bundle for this preset.
    pub fn bundle(self) -> ThemeBundle {
        match self {
            Self::Plume => PlumeTheme::bundle(),
            Self::HighContrast => {
                ThemeBundle::new("High Contrast", high_contrast_light(), high_contrast_dark())
            }
            Self::Compact => ThemeBundle::new(
                "Compact",
                compact(PlumeTheme::light()),
                compact(PlumeTheme::dark()),
            ),
        }
    }
}

fn high_contrast_dark() -> PlumeTheme {
    let mut theme = PlumeTheme::dark();
    theme.name = "High Contrast".to_string();
    let c = &mut theme.colors;
    c.background = Color::BLACK;
    c.surface = Color::BLACK;
    c.panel_header = Color::from_hex(0x1A1A1A);
    c.text_primary = Color::WHITE;
    c.text_secondary = Color::from_hex(0xD0D0D0);
    c.border = Color::from_hex(0xB0B0B0);
    c.border_hover = Color::WHITE;
    c.border_focus = Color::from_hex(0xFFD400);
    theme
}

fn high_contrast_light() -> PlumeTheme {
    let mut theme = PlumeTheme::light();
    theme.name = "High Contrast".to_string();
    let c = &mut theme.colors;
    c.background = Color::WHITE;
    c.surface = Color::WHITE;
    c.text_primary = Color::BLACK;
    c.text_secondary = Color::from_hex(0x303030);
    c.border = Color::from_hex(0x404040);
    c.border_hover = Color::BLACK;
    c.border_focus = Color::from_hex(0x0050D0);
    theme
}

fn compact(mut theme: PlumeTheme) -> PlumeTheme {
    theme.name = "Compact".to_string();
    theme.sizes.control_height = 22.0;
    theme.sizes.control_height_lg = 28.0;
    theme.sizes.tab_height = 22.0;
    theme.sizes.panel_header_height = 20.0;
    theme.spacing.space_2 = 6.0;
    theme.spacing.space_3 = 8.0;
    theme.spacing.space_4 = 12.0;
    theme.typography.text_base = 12.0;
    theme
}
