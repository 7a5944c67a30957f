//! Opacity tokens for theming

/// Semantic opacity token keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum OpacityToken {
    Disabled,
    Muted,
    Overlay,
}

impl OpacityToken {
    pub const ALL: [OpacityToken; 3] = [
        OpacityToken::Disabled,
        OpacityToken::Muted,
        OpacityToken::Overlay,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OpacityToken::Disabled => "disabled",
            OpacityToken::Muted => "muted",
            OpacityToken::Overlay => "overlay",
        }
    }
}

/// Complete set of opacity tokens, each in 0..=1
#[derive(Clone, Debug, PartialEq)]
pub struct OpacityTokens {
    pub disabled: f32,
    pub muted: f32,
    pub overlay: f32,
}

impl OpacityTokens {
    /// Get opacity value by token key
    pub fn get(&self, token: OpacityToken) -> f32 {
        match token {
            OpacityToken::Disabled => self.disabled,
            OpacityToken::Muted => self.muted,
            OpacityToken::Overlay => self.overlay,
        }
    }
}

impl Default for OpacityTokens {
    fn default() -> Self {
        Self {
            disabled: 0.6,
            muted: 0.75,
            overlay: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_fractions() {
        let tokens = OpacityTokens::default();
        for token in OpacityToken::ALL {
            let value = tokens.get(token);
            assert!((0.0..=1.0).contains(&value), "{} = {value}", token.name());
        }
    }
}
