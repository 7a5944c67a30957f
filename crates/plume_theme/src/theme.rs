//! Theme trait and light/dark bundles

use std::sync::Arc;

use serde::Deserialize;

use crate::tokens::*;

/// Light or dark appearance
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    #[default]
    Dark,
}

impl ColorScheme {
    pub fn toggle(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }
}

/// A complete set of unscaled design tokens
pub trait Theme: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;
    fn color_scheme(&self) -> ColorScheme;
    fn colors(&self) -> &ColorTokens;
    fn typography(&self) -> &TypographyTokens;
    fn spacing(&self) -> &SpacingTokens;
    fn sizes(&self) -> &SizeTokens;
    fn radii(&self) -> &RadiusTokens;
    fn shadows(&self) -> &ShadowTokens;
    fn opacity(&self) -> &OpacityTokens;
}

/// A named pair of light and dark themes
#[derive(Clone, Debug)]
pub struct ThemeBundle {
    pub name: String,
    pub light: Arc<dyn Theme>,
    pub dark: Arc<dyn Theme>,
}

impl ThemeBundle {
    pub fn new(
        name: impl Into<String>,
        light: impl Theme + 'static,
        dark: impl Theme + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            light: Arc::new(light),
            dark: Arc::new(dark),
        }
    }

    pub fn for_scheme(&self, scheme: ColorScheme) -> Arc<dyn Theme> {
        match scheme {
            ColorScheme::Light => Arc::clone(&self.light),
            ColorScheme::Dark => Arc::clone(&self.dark),
        }
    }
}
