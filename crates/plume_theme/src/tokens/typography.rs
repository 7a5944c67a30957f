//! Typography tokens for theming

/// Font size token keys
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum FontSizeToken {
    Xs,
    Sm,
    Base,
    Lg,
    Xl,
    Xxl,
}

impl FontSizeToken {
    pub const ALL: [FontSizeToken; 6] = [
        FontSizeToken::Xs,
        FontSizeToken::Sm,
        FontSizeToken::Base,
        FontSizeToken::Lg,
        FontSizeToken::Xl,
        FontSizeToken::Xxl,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FontSizeToken::Xs => "text-xs",
            FontSizeToken::Sm => "text-sm",
            FontSizeToken::Base => "text-base",
            FontSizeToken::Lg => "text-lg",
            FontSizeToken::Xl => "text-xl",
            FontSizeToken::Xxl => "text-2xl",
        }
    }
}

/// Font weight
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
}

impl FontWeight {
    /// CSS numeric weight
    pub fn to_u16(self) -> u16 {
        match self {
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::Semibold => 600,
            FontWeight::Bold => 700,
        }
    }
}

/// Font family selector
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub enum FontFamilyToken {
    #[default]
    Sans,
    Mono,
}

/// Typography tokens: families, the size scale and line heights
#[derive(Clone, Debug, PartialEq)]
pub struct TypographyTokens {
    pub font_sans: String,
    pub font_mono: String,

    pub text_xs: f32,
    pub text_sm: f32,
    pub text_base: f32,
    pub text_lg: f32,
    pub text_xl: f32,
    pub text_2xl: f32,

    /// Line height as a multiple of the font size
    pub line_height: f32,
    pub default_weight: FontWeight,
}

impl TypographyTokens {
    pub fn size(&self, token: FontSizeToken) -> f32 {
        match token {
            FontSizeToken::Xs => self.text_xs,
            FontSizeToken::Sm => self.text_sm,
            FontSizeToken::Base => self.text_base,
            FontSizeToken::Lg => self.text_lg,
            FontSizeToken::Xl => self.text_xl,
            FontSizeToken::Xxl => self.text_2xl,
        }
    }

    pub fn family(&self, token: FontFamilyToken) -> &str {
        match token {
            FontFamilyToken::Sans => &self.font_sans,
            FontFamilyToken::Mono => &self.font_mono,
        }
    }
}

impl Default for TypographyTokens {
    fn default() -> Self {
        Self {
            font_sans: "Inter".to_string(),
            font_mono: "JetBrains Mono".to_string(),
            text_xs: 10.0,
            text_sm: 11.0,
            text_base: 13.0,
            text_lg: 15.0,
            text_xl: 18.0,
            text_2xl: 22.0,
            line_height: 1.4,
            default_weight: FontWeight::Regular,
        }
    }
}
