use super::{ShapedText, TextShaper};
use crate::vgi::{fill_rect, Graphics};
use tessel_theme::font::Font;
use vello::kurbo::{Point, Rect};
use vello::peniko::{Brush, Color};

/// A shaper where every rune has the same advance, whatever the font.
///
/// Drawing fills a box per visible rune. Useful when no fonts are available and for tests,
/// where positions must be predictable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPitchShaper {
    /// Advance of every rune.
    pub advance: f64,
    /// Ascent of every line.
    pub ascent: f64,
    /// Descent of every line.
    pub descent: f64,
}

impl FixedPitchShaper {
    /// Create a shaper with the given metrics.
    pub fn new(advance: f64, ascent: f64, descent: f64) -> Self {
        Self {
            advance,
            ascent,
            descent,
        }
    }
}

impl Default for FixedPitchShaper {
    fn default() -> Self {
        Self::new(10.0, 12.0, 4.0)
    }
}

impl TextShaper for FixedPitchShaper {
    fn shape(&self, _font: &Font, runes: &[char]) -> ShapedText {
        ShapedText {
            advances: vec![self.advance; runes.len()],
            ascent: self.ascent,
            descent: self.descent,
        }
    }

    fn draw(
        &self,
        graphics: &mut dyn Graphics,
        _font: &Font,
        runes: &[char],
        origin: Point,
        brush: &Brush,
    ) {
        let color = match brush {
            Brush::Solid(color) => *color,
            _ => Color::BLACK,
        };
        let mut x = origin.x;
        for ch in runes {
            if !ch.is_whitespace() {
                let glyph = Rect::new(x + 1.0, origin.y - self.ascent, x + self.advance - 1.0, origin.y);
                fill_rect(graphics, glyph, color);
            }
            x += self.advance;
        }
    }
}
