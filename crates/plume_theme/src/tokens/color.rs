//! Color tokens for theming

use plume_core::Color;

/// Semantic color token keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ColorToken {
    // Brand colors
    Primary,
    PrimaryHover,
    PrimaryActive,
    Accent,
    AccentSubtle,

    // Semantic colors
    Success,
    Warning,
    Error,

    // Surface colors
    Background,
    Surface,
    SurfaceElevated,
    SurfaceOverlay,
    PanelHeader,

    // Text colors
    TextPrimary,
    TextSecondary,
    TextDisabled,
    TextInverse,

    // Border colors
    Border,
    BorderHover,
    BorderFocus,

    // Controls
    ControlBg,
    ControlBgHover,
    ControlBgActive,
    ControlBgDisabled,

    // Tabs
    TabActive,
    TabInactive,
    TabHover,

    // Selection
    Selection,
}

impl ColorToken {
    pub const ALL: [ColorToken; 28] = [
        ColorToken::Primary,
        ColorToken::PrimaryHover,
        ColorToken::PrimaryActive,
        ColorToken::Accent,
        ColorToken::AccentSubtle,
        ColorToken::Success,
        ColorToken::Warning,
        ColorToken::Error,
        ColorToken::Background,
        ColorToken::Surface,
        ColorToken::SurfaceElevated,
        ColorToken::SurfaceOverlay,
        ColorToken::PanelHeader,
        ColorToken::TextPrimary,
        ColorToken::TextSecondary,
        ColorToken::TextDisabled,
        ColorToken::TextInverse,
        ColorToken::Border,
        ColorToken::BorderHover,
        ColorToken::BorderFocus,
        ColorToken::ControlBg,
        ColorToken::ControlBgHover,
        ColorToken::ControlBgActive,
        ColorToken::ControlBgDisabled,
        ColorToken::TabActive,
        ColorToken::TabInactive,
        ColorToken::TabHover,
        ColorToken::Selection,
    ];

    /// Stable kebab-case name used by theme config files
    pub fn name(self) -> &'static str {
        match self {
            ColorToken::Primary => "primary",
            ColorToken::PrimaryHover => "primary-hover",
            ColorToken::PrimaryActive => "primary-active",
            ColorToken::Accent => "accent",
            ColorToken::AccentSubtle => "accent-subtle",
            ColorToken::Success => "success",
            ColorToken::Warning => "warning",
            ColorToken::Error => "error",
            ColorToken::Background => "background",
            ColorToken::Surface => "surface",
            ColorToken::SurfaceElevated => "surface-elevated",
            ColorToken::SurfaceOverlay => "surface-overlay",
            ColorToken::PanelHeader => "panel-header",
            ColorToken::TextPrimary => "text-primary",
            ColorToken::TextSecondary => "text-secondary",
            ColorToken::TextDisabled => "text-disabled",
            ColorToken::TextInverse => "text-inverse",
            ColorToken::Border => "border",
            ColorToken::BorderHover => "border-hover",
            ColorToken::BorderFocus => "border-focus",
            ColorToken::ControlBg => "control-bg",
            ColorToken::ControlBgHover => "control-bg-hover",
            ColorToken::ControlBgActive => "control-bg-active",
            ColorToken::ControlBgDisabled => "control-bg-disabled",
            ColorToken::TabActive => "tab-active",
            ColorToken::TabInactive => "tab-inactive",
            ColorToken::TabHover => "tab-hover",
            ColorToken::Selection => "selection",
        }
    }

    pub fn from_name(name: &str) -> Option<ColorToken> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }
}

/// Complete set of semantic color tokens
#[derive(Clone, Debug)]
pub struct ColorTokens {
    // Brand colors
    pub primary: Color,
    pub primary_hover: Color,
    pub primary_active: Color,
    pub accent: Color,
    pub accent_subtle: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // Surface colors
    pub background: Color,
    pub surface: Color,
    pub surface_elevated: Color,
    pub surface_overlay: Color,
    pub panel_header: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_disabled: Color,
    pub text_inverse: Color,

    // Border colors
    pub border: Color,
    pub border_hover: Color,
    pub border_focus: Color,

    // Controls
    pub control_bg: Color,
    pub control_bg_hover: Color,
    pub control_bg_active: Color,
    pub control_bg_disabled: Color,

    // Tabs
    pub tab_active: Color,
    pub tab_inactive: Color,
    pub tab_hover: Color,

    // Selection
    pub selection: Color,
}

impl ColorTokens {
    /// Get a color by token key
    pub fn get(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Primary => self.primary,
            ColorToken::PrimaryHover => self.primary_hover,
            ColorToken::PrimaryActive => self.primary_active,
            ColorToken::Accent => self.accent,
            ColorToken::AccentSubtle => self.accent_subtle,
            ColorToken::Success => self.success,
            ColorToken::Warning => self.warning,
            ColorToken::Error => self.error,
            ColorToken::Background => self.background,
            ColorToken::Surface => self.surface,
            ColorToken::SurfaceElevated => self.surface_elevated,
            ColorToken::SurfaceOverlay => self.surface_overlay,
            ColorToken::PanelHeader => self.panel_header,
            ColorToken::TextPrimary => self.text_primary,
            ColorToken::TextSecondary => self.text_secondary,
            ColorToken::TextDisabled => self.text_disabled,
            ColorToken::TextInverse => self.text_inverse,
            ColorToken::Border => self.border,
            ColorToken::BorderHover => self.border_hover,
            ColorToken::BorderFocus => self.border_focus,
            ColorToken::ControlBg => self.control_bg,
            ColorToken::ControlBgHover => self.control_bg_hover,
            ColorToken::ControlBgActive => self.control_bg_active,
            ColorToken::ControlBgDisabled => self.control_bg_disabled,
            ColorToken::TabActive => self.tab_active,
            ColorToken::TabInactive => self.tab_inactive,
            ColorToken::TabHover => self.tab_hover,
            ColorToken::Selection => self.selection,
        }
    }
}
