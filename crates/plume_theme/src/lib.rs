//! Plume Theme System
//!
//! Design tokens and their DPI-scaled resolution.
//!
//! # Overview
//!
//! - **Design tokens**: colors, typography, spacing, component sizes, radii, shadows
//! - **Themes**: the built-in graphite/paper [`PlumeTheme`] plus presets
//! - **Scaling**: [`ScaledTheme`] maps tokens to physical pixels for a DPI factor
//! - **Configuration**: [`ThemeConfig`] loads presets and overrides from TOML
//!
//! # Quick Start
//!
//! ```rust
//! use plume_theme::{ScaledTheme, SpacingToken, ColorToken};
//!
//! let mut theme = ScaledTheme::default();
//! theme.set_scale_factor(2.0);
//!
//! assert_eq!(theme.spacing(SpacingToken::Space2), 16.0);
//! let _primary = theme.color(ColorToken::Primary);
//! ```
//!
//! The theme is passed explicitly to style resolution; there is no global
//! theme state.

pub mod config;
pub mod presets;
pub mod scaled;
pub mod theme;
pub mod themes;
pub mod tokens;

pub use config::{ConfigError, ThemeConfig};
pub use presets::ThemePreset;
pub use scaled::ScaledTheme;
pub use theme::{ColorScheme, Theme, ThemeBundle};
pub use themes::PlumeTheme;
pub use tokens::*;
