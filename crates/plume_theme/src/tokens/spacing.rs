//! Spacing tokens for theming
//!
//! A 4px-based scale. Values are logical pixels; [`crate::ScaledTheme`]
//! multiplies them by the DPI scale factor on access.

/// Spacing token keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum SpacingToken {
    Space0,
    Space0_5,
    Space1,
    Space2,
    Space3,
    Space4,
    Space5,
    Space6,
    Space8,
    Space10,
    Space12,
}

impl SpacingToken {
    pub const ALL: [SpacingToken; 11] = [
        SpacingToken::Space0,
        SpacingToken::Space0_5,
        SpacingToken::Space1,
        SpacingToken::Space2,
        SpacingToken::Space3,
        SpacingToken::Space4,
        SpacingToken::Space5,
        SpacingToken::Space6,
        SpacingToken::Space8,
        SpacingToken::Space10,
        SpacingToken::Space12,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SpacingToken::Space0 => "space-0",
            SpacingToken::Space0_5 => "space-0-5",
            SpacingToken::Space1 => "space-1",
            SpacingToken::Space2 => "space-2",
            SpacingToken::Space3 => "space-3",
            SpacingToken::Space4 => "space-4",
            SpacingToken::Space5 => "space-5",
            SpacingToken::Space6 => "space-6",
            SpacingToken::Space8 => "space-8",
            SpacingToken::Space10 => "space-10",
            SpacingToken::Space12 => "space-12",
        }
    }

    pub fn from_name(name: &str) -> Option<SpacingToken> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }
}

/// Complete spacing scale
#[derive(Clone, Debug, PartialEq)]
pub struct SpacingTokens {
    pub space_0: f32,
    pub space_0_5: f32,
    pub space_1: f32,
    pub space_2: f32,
    pub space_3: f32,
    pub space_4: f32,
    pub space_5: f32,
    pub space_6: f32,
    pub space_8: f32,
    pub space_10: f32,
    pub space_12: f32,
}

impl SpacingTokens {
    /// Get spacing by token key
    pub fn get(&self, token: SpacingToken) -> f32 {
        match token {
            SpacingToken::Space0 => self.space_0,
            SpacingToken::Space0_5 => self.space_0_5,
            SpacingToken::Space1 => self.space_1,
            SpacingToken::Space2 => self.space_2,
            SpacingToken::Space3 => self.space_3,
            SpacingToken::Space4 => self.space_4,
            SpacingToken::Space5 => self.space_5,
            SpacingToken::Space6 => self.space_6,
            SpacingToken::Space8 => self.space_8,
            SpacingToken::Space10 => self.space_10,
            SpacingToken::Space12 => self.space_12,
        }
    }
}

impl Default for SpacingTokens {
    fn default() -> Self {
        Self {
            space_0: 0.0,
            space_0_5: 2.0,
            space_1: 4.0,
            space_2: 8.0,
            space_3: 12.0,
            space_4: 16.0,
            space_5: 20.0,
            space_6: 24.0,
            space_8: 32.0,
            space_10: 40.0,
            space_12: 48.0,
        }
    }
}
