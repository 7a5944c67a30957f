//! Text measurement for layout
//!
//! Provides a trait for measuring text during intrinsic sizing and baseline
//! alignment. The font/glyph-atlas subsystem implements it; without one,
//! [`EstimatedTextMeasurer`] keeps layout working with a fixed-width guess.

/// A glyph positioned along the pen line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedGlyph {
    pub ch: char,
    /// Pen position relative to the start of the run, kerning applied
    pub x: f32,
    pub advance: f32,
}

/// Text measurement result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMetrics {
    /// Total advance width in pixels
    pub width: f32,
    /// Distance from baseline to top (positive)
    pub ascender: f32,
    /// Distance from baseline to bottom (typically negative)
    pub descender: f32,
    pub line_gap: f32,
    pub glyphs: Vec<PositionedGlyph>,
}

impl TextMetrics {
    /// Natural line height from font metrics
    pub fn height(&self) -> f32 {
        self.ascender - self.descender + self.line_gap
    }
}

/// Trait for measuring text dimensions
pub trait TextMeasurer {
    /// Measure a single line of `text` in `font_family` at `font_size` pixels
    fn measure(&self, text: &str, font_family: &str, font_size: f32) -> TextMetrics;
}

/// Fixed-width-per-character fallback used when no font metrics provider is
/// available
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl EstimatedTextMeasurer {
    /// Advance per character as a fraction of the font size
    pub const CHAR_WIDTH: f32 = 0.55;
    pub const ASCENDER: f32 = 0.8;
    pub const DESCENDER: f32 = -0.2;
}

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure(&self, text: &str, _font_family: &str, font_size: f32) -> TextMetrics {
        let advance = font_size * Self::CHAR_WIDTH;
        let glyphs: Vec<PositionedGlyph> = text
            .chars()
            .enumerate()
            .map(|(i, ch)| PositionedGlyph {
                ch,
                x: i as f32 * advance,
                advance,
            })
            .collect();
        TextMetrics {
            width: glyphs.len() as f32 * advance,
            ascender: font_size * Self::ASCENDER,
            descender: font_size * Self::DESCENDER,
            line_gap: 0.0,
            glyphs,
        }
    }
}
