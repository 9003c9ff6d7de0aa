use super::TextShaper;
use crate::vgi::Graphics;
use std::ops::Range;
use tessel_theme::font::Font;
use vello::kurbo::Point;
use vello::peniko::Brush;

/// A run of runes shaped as one line, with per-rune advances.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    runes: Vec<char>,
    advances: Vec<f64>,
    ascent: f64,
    descent: f64,
}

impl TextLine {
    /// Shape `runes` with `shaper`.
    pub fn new(shaper: &dyn TextShaper, font: &Font, runes: Vec<char>) -> Self {
        let shaped = shaper.shape(font, &runes);
        let mut advances = shaped.advances;
        // Guard against shapers that drop or merge entries.
        advances.resize(runes.len(), 0.0);
        Self {
            runes,
            advances,
            ascent: shaped.ascent,
            descent: shaped.descent,
        }
    }

    /// Shape a string.
    pub fn from_str(shaper: &dyn TextShaper, font: &Font, text: &str) -> Self {
        Self::new(shaper, font, text.chars().collect())
    }

    /// The runes on this line.
    pub fn runes(&self) -> &[char] {
        &self.runes
    }

    /// Number of runes on this line.
    pub fn len(&self) -> usize {
        self.runes.len()
    }

    /// True if the line holds no runes.
    pub fn is_empty(&self) -> bool {
        self.runes.is_empty()
    }

    /// Total advance of the line.
    pub fn width(&self) -> f64 {
        self.advances.iter().sum()
    }

    /// Line height.
    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }

    /// Offset of the baseline from the top of the line.
    pub fn baseline(&self) -> f64 {
        self.ascent
    }

    /// X offset of the leading edge of the rune at `index`. Indexes past the end map to the
    /// line width.
    pub fn position_for_rune_index(&self, index: usize) -> f64 {
        self.advances[..index.min(self.advances.len())].iter().sum()
    }

    /// The rune index whose leading edge is closest to `x`.
    pub fn rune_index_for_position(&self, x: f64) -> usize {
        if x <= 0.0 {
            return 0;
        }
        let mut pos = 0.0;
        for (i, advance) in self.advances.iter().enumerate() {
            if x < pos + advance / 2.0 {
                return i;
            }
            pos += advance;
        }
        self.runes.len()
    }

    /// A sub-line over `range`, reusing the shaped advances.
    pub fn slice(&self, range: Range<usize>) -> TextLine {
        TextLine {
            runes: self.runes[range.clone()].to_vec(),
            advances: self.advances[range].to_vec(),
            ascent: self.ascent,
            descent: self.descent,
        }
    }

    /// Split into lines no wider than `width` where possible.
    ///
    /// Breaks go after whitespace when the line has any; a word wider than `width` is split
    /// between runes. Each line holds at least one rune, and no rune is dropped: trailing
    /// whitespace stays on the line it ends.
    pub fn break_to_width(&self, width: f64) -> Vec<TextLine> {
        let len = self.runes.len();
        let mut lines = Vec::new();
        let mut start = 0;
        let mut x = 0.0;
        let mut last_break: Option<usize> = None;
        let mut i = 0;
        while i < len {
            let advance = self.advances[i];
            if self.runes[i].is_whitespace() {
                x += advance;
                i += 1;
                last_break = Some(i);
                continue;
            }
            if x + advance > width && i > start {
                let cut = match last_break {
                    Some(at) if at > start => at,
                    _ => i,
                };
                lines.push(self.slice(start..cut));
                start = cut;
                x = self.advances[start..i].iter().sum();
                last_break = None;
                continue;
            }
            x += advance;
            i += 1;
        }
        if start < len || lines.is_empty() {
            lines.push(self.slice(start..len));
        }
        lines
    }

    /// Draw the line with the left end of its baseline at `origin`.
    pub fn draw(
        &self,
        shaper: &dyn TextShaper,
        graphics: &mut dyn Graphics,
        font: &Font,
        origin: Point,
        brush: &Brush,
    ) {
        if !self.runes.is_empty() {
            shaper.draw(graphics, font, &self.runes, origin, brush);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FixedPitchShaper;

    fn line(text: &str) -> TextLine {
        TextLine::from_str(&FixedPitchShaper::default(), &Font::default(), text)
    }

    fn texts(lines: &[TextLine]) -> Vec<String> {
        lines.iter().map(|l| l.runes().iter().collect()).collect()
    }

    #[test]
    fn test_hit_testing() {
        let l = line("abcd");
        assert_eq!(l.width(), 40.0);
        assert_eq!(l.position_for_rune_index(2), 20.0);
        assert_eq!(l.position_for_rune_index(9), 40.0);
        assert_eq!(l.rune_index_for_position(-3.0), 0);
        assert_eq!(l.rune_index_for_position(4.0), 0);
        assert_eq!(l.rune_index_for_position(6.0), 1);
        assert_eq!(l.rune_index_for_position(500.0), 4);
    }

    #[test]
    fn test_break_after_whitespace() {
        let lines = line("foo bar baz").break_to_width(75.0);
        assert_eq!(texts(&lines), vec!["foo bar ", "baz"]);
    }

    #[test]
    fn test_break_long_word() {
        let lines = line("abcdefg").break_to_width(30.0);
        assert_eq!(texts(&lines), vec!["abc", "def", "g"]);
    }

    #[test]
    fn test_break_never_drops_runes() {
        let l = line("a  b    c");
        let lines = l.break_to_width(5.0);
        let total: usize = lines.iter().map(TextLine::len).sum();
        assert_eq!(total, l.len());
        assert!(lines.iter().all(|l| !l.is_empty()));
        assert_eq!(texts(&line("").break_to_width(10.0)), vec![""]);
    }
}
