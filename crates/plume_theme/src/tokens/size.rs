//! Component size tokens for theming
//!
//! Fixed dimensions of recurring editor chrome (icons, control heights, tab
//! strips). Font sizes are reachable through [`SizeToken::Text`] so that a
//! single size-valued style field can reference either scale.

use super::typography::FontSizeToken;

/// Size token keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum SizeToken {
    IconSm,
    IconMd,
    IconLg,
    ControlHeightSm,
    ControlHeight,
    ControlHeightLg,
    TabHeight,
    PanelHeaderHeight,
    ToolbarHeight,
    ScrollbarWidth,
    /// A font size from the typography scale
    Text(FontSizeToken),
}

impl SizeToken {
    pub const FIXED: [SizeToken; 10] = [
        SizeToken::IconSm,
        SizeToken::IconMd,
        SizeToken::IconLg,
        SizeToken::ControlHeightSm,
        SizeToken::ControlHeight,
        SizeToken::ControlHeightLg,
        SizeToken::TabHeight,
        SizeToken::PanelHeaderHeight,
        SizeToken::ToolbarHeight,
        SizeToken::ScrollbarWidth,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SizeToken::IconSm => "icon-sm",
            SizeToken::IconMd => "icon-md",
            SizeToken::IconLg => "icon-lg",
            SizeToken::ControlHeightSm => "control-height-sm",
            SizeToken::ControlHeight => "control-height",
            SizeToken::ControlHeightLg => "control-height-lg",
            SizeToken::TabHeight => "tab-height",
            SizeToken::PanelHeaderHeight => "panel-header-height",
            SizeToken::ToolbarHeight => "toolbar-height",
            SizeToken::ScrollbarWidth => "scrollbar-width",
            SizeToken::Text(font) => font.name(),
        }
    }

    pub fn from_name(name: &str) -> Option<SizeToken> {
        Self::FIXED
            .iter()
            .copied()
            .find(|t| t.name() == name)
            .or_else(|| {
                FontSizeToken::ALL
                    .iter()
                    .copied()
                    .find(|f| f.name() == name)
                    .map(SizeToken::Text)
            })
    }
}

/// Fixed component dimensions
#[derive(Clone, Debug, PartialEq)]
pub struct SizeTokens {
    pub icon_sm: f32,
    pub icon_md: f32,
    pub icon_lg: f32,
    pub control_height_sm: f32,
    pub control_height: f32,
    pub control_height_lg: f32,
    pub tab_height: f32,
    pub panel_header_height: f32,
    pub toolbar_height: f32,
    pub scrollbar_width: f32,
}

impl SizeTokens {
    /// Get a fixed size; `None` for [`SizeToken::Text`], which lives in typography
    pub fn get(&self, token: SizeToken) -> Option<f32> {
        Some(match token {
            SizeToken::IconSm => self.icon_sm,
            SizeToken::IconMd => self.icon_md,
            SizeToken::IconLg => self.icon_lg,
            SizeToken::ControlHeightSm => self.control_height_sm,
            SizeToken::ControlHeight => self.control_height,
            SizeToken::ControlHeightLg => self.control_height_lg,
            SizeToken::TabHeight => self.tab_height,
            SizeToken::PanelHeaderHeight => self.panel_header_height,
            SizeToken::ToolbarHeight => self.toolbar_height,
            SizeToken::ScrollbarWidth => self.scrollbar_width,
            SizeToken::Text(_) => return None,
        })
    }
}

impl Default for SizeTokens {
    fn default() -> Self {
        Self {
            icon_sm: 12.0,
            icon_md: 16.0,
            icon_lg: 24.0,
            control_height_sm: 22.0,
            control_height: 28.0,
            control_height_lg: 36.0,
            tab_height: 28.0,
            panel_header_height: 26.0,
            toolbar_height: 36.0,
            scrollbar_width: 10.0,
        }
    }
}
