//! Shadow tokens for theming

use plume_core::Color;

/// Semantic shadow token keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ShadowToken {
    None,
    Sm,
    Md,
    Lg,
    Xl,
}

/// A box shadow definition (logical pixels)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub spread: f32,
    pub color: Color,
}

impl Shadow {
    pub const fn new(offset_x: f32, offset_y: f32, blur: f32, spread: f32, color: Color) -> Self {
        Self {
            offset_x,
            offset_y,
            blur,
            spread,
            color,
        }
    }

    pub const fn none() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, Color::TRANSPARENT)
    }

    pub fn is_visible(&self) -> bool {
        !self.color.is_transparent()
            && (self.blur > 0.0
                || self.spread != 0.0
                || self.offset_x != 0.0
                || self.offset_y != 0.0)
    }

    /// Multiply every length by `factor`
    pub fn scaled(&self, factor: f32) -> Shadow {
        Shadow::new(
            self.offset_x * factor,
            self.offset_y * factor,
            self.blur * factor,
            self.spread * factor,
            self.color,
        )
    }
}

impl Default for Shadow {
    fn default() -> Self {
        Self::none()
    }
}

/// Complete set of shadow tokens
#[derive(Clone, Debug, PartialEq)]
pub struct ShadowTokens {
    pub shadow_sm: Shadow,
    pub shadow_md: Shadow,
    pub shadow_lg: Shadow,
    pub shadow_xl: Shadow,
}

impl ShadowTokens {
    pub fn get(&self, token: ShadowToken) -> Shadow {
        match token {
            ShadowToken::None => Shadow::none(),
            ShadowToken::Sm => self.shadow_sm,
            ShadowToken::Md => self.shadow_md,
            ShadowToken::Lg => self.shadow_lg,
            ShadowToken::Xl => self.shadow_xl,
        }
    }

    /// Soft shadows for light surfaces
    pub fn light() -> Self {
        let ink = Color::BLACK;
        Self {
            shadow_sm: Shadow::new(0.0, 1.0, 2.0, 0.0, ink.with_alpha(0.08)),
            shadow_md: Shadow::new(0.0, 2.0, 6.0, 0.0, ink.with_alpha(0.12)),
            shadow_lg: Shadow::new(0.0, 6.0, 16.0, 0.0, ink.with_alpha(0.14)),
            shadow_xl: Shadow::new(0.0, 12.0, 32.0, 0.0, ink.with_alpha(0.18)),
        }
    }

    /// Denser shadows that still read against dark surfaces
    pub fn dark() -> Self {
        let ink = Color::BLACK;
        Self {
            shadow_sm: Shadow::new(0.0, 1.0, 2.0, 0.0, ink.with_alpha(0.30)),
            shadow_md: Shadow::new(0.0, 2.0, 6.0, 0.0, ink.with_alpha(0.40)),
            shadow_lg: Shadow::new(0.0, 6.0, 16.0, 0.0, ink.with_alpha(0.45)),
            shadow_xl: Shadow::new(0.0, 12.0, 32.0, 0.0, ink.with_alpha(0.50)),
        }
    }
}

impl Default for ShadowTokens {
    fn default() -> Self {
        Self::dark()
    }
}
