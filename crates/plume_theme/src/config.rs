//! Theme configuration files
//!
//! ```toml
//! preset = "plume"
//! scheme = "dark"
//! scale_factor = 1.5
//!
//! [colors]
//! primary = "#3d8bfd"
//!
//! [spacing]
//! space-4 = 14
//!
//! [named_colors]
//! gizmo-x = "#e5484d"
//! ```

use std::path::Path;

use plume_core::Color;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::presets::ThemePreset;
use crate::scaled::ScaledTheme;
use crate::theme::ColorScheme;
use crate::tokens::{ColorToken, RadiusToken, SizeToken, SpacingToken};

/// Theme configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read theme config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse theme config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid color for '{key}': {value}")]
    InvalidColor { key: String, value: String },

    #[error("Unknown {kind} token: {name}")]
    UnknownToken { kind: &'static str, name: String },

    #[error("Invalid scale factor: {0}")]
    InvalidScale(f32),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Deserialized theme configuration
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub preset: ThemePreset,
    pub scheme: ColorScheme,
    pub scale_factor: f32,
    /// Color token overrides as hex strings
    pub colors: FxHashMap<String, String>,
    /// Spacing token overrides in logical pixels
    pub spacing: FxHashMap<String, f32>,
    /// Size token overrides in logical pixels
    pub sizes: FxHashMap<String, f32>,
    /// Radius token overrides in logical pixels
    pub radii: FxHashMap<String, f32>,
    /// Custom colors referenced by name from styles
    pub named_colors: FxHashMap<String, String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            preset: ThemePreset::default(),
            scheme: ColorScheme::default(),
            scale_factor: 1.0,
            colors: FxHashMap::default(),
            spacing: FxHashMap::default(),
            sizes: FxHashMap::default(),
            radii: FxHashMap::default(),
            named_colors: FxHashMap::default(),
        }
    }
}

impl ThemeConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: ThemeConfig = toml::from_str(source)?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading theme config from {}", path.display());
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Build a [`ScaledTheme`], validating every override
    pub fn build(&self) -> Result<ScaledTheme> {
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(ConfigError::InvalidScale(self.scale_factor));
        }

        let bundle = self.preset.bundle();
        let mut theme = ScaledTheme::from_bundle(&bundle, self.scheme, self.scale_factor);

        for (key, value) in &self.colors {
            let token = ColorToken::from_name(key).ok_or_else(|| unknown("color", key))?;
            theme.set_color_override(token, parse_color(key, value)?);
        }
        for (key, px) in &self.spacing {
            let token = SpacingToken::from_name(key).ok_or_else(|| unknown("spacing", key))?;
            theme.set_spacing_override(token, *px);
        }
        for (key, px) in &self.sizes {
            let token = SizeToken::from_name(key).ok_or_else(|| unknown("size", key))?;
            theme.set_size_override(token, *px);
        }
        for (key, px) in &self.radii {
            let token = RadiusToken::from_name(key).ok_or_else(|| unknown("radius", key))?;
            theme.set_radius_override(token, *px);
        }
        for (name, value) in &self.named_colors {
            theme.register_named_color(name.clone(), parse_color(name, value)?);
        }

        debug!(
            "built theme '{}' ({:?}) at scale {}",
            bundle.name, self.scheme, self.scale_factor
        );
        Ok(theme)
    }
}

fn unknown(kind: &'static str, name: &str) -> ConfigError {
    ConfigError::UnknownToken {
        kind,
        name: name.to_string(),
    }
}

fn parse_color(key: &str, value: &str) -> Result<Color> {
    Color::parse_hex(value).ok_or_else(|| ConfigError::InvalidColor {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::FontSizeToken;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ThemeConfig::from_toml_str("").unwrap();
        assert_eq!(config.preset, ThemePreset::Plume);
        assert_eq!(config.scheme, ColorScheme::Dark);
        assert_eq!(config.scale_factor, 1.0);
        let theme = config.build().unwrap();
        assert_eq!(theme.spacing(SpacingToken::Space1), 4.0);
    }

    #[test]
    fn test_overrides_are_applied_and_scaled() {
        let config = ThemeConfig::from_toml_str(
            r##"
            scheme = "light"
            scale_factor = 2.0

            [colors]
            primary = "#ff0000"

            [spacing]
            space-4 = 10

            [sizes]
            text-base = 14

            [named_colors]
            gizmo-y = "#00ff00"
            "##,
        )
        .unwrap();
        let theme = config.build().unwrap();

        assert_eq!(theme.color_scheme(), ColorScheme::Light);
        assert_eq!(theme.color(ColorToken::Primary), Color::RED);
        assert_eq!(theme.spacing(SpacingToken::Space4), 20.0);
        assert_eq!(theme.font_size(FontSizeToken::Base), 28.0);
        assert_eq!(theme.named_color("gizmo-y"), Some(Color::GREEN));
    }

    #[test]
    fn test_invalid_entries_are_errors() {
        let bad_color = ThemeConfig::from_toml_str("[colors]\nprimary = \"blue\"").unwrap();
        assert!(matches!(
            bad_color.build(),
            Err(ConfigError::InvalidColor { .. })
        ));

        let bad_token = ThemeConfig::from_toml_str("[spacing]\nspace-99 = 1").unwrap();
        assert!(matches!(
            bad_token.build(),
            Err(ConfigError::UnknownToken { kind: "spacing", .. })
        ));

        let bad_scale = ThemeConfig::from_toml_str("scale_factor = 0.0").unwrap();
        assert!(matches!(bad_scale.build(), Err(ConfigError::InvalidScale(_))));

        assert!(matches!(
            ThemeConfig::from_toml_str("scale_factor = \"big\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
