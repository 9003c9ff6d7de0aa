//! Text shaping seam and the line layout built on it.
//!
//! A [TextShaper] turns runes into per-rune advances and font metrics, and draws them.
//! [TextLine](line::TextLine) adds hit-testing and width-constrained breaking on top, and
//! [layout](layout) turns a whole rune buffer into cached display lines.

use crate::vgi::Graphics;
use tessel_theme::font::Font;
use vello::kurbo::Point;
use vello::peniko::Brush;

/// Fixed-pitch shaping for headless use.
pub mod fixed;
/// Display lines and the single-slot line cache.
pub mod layout;
/// A single shaped line of runes.
pub mod line;
/// Shaping and glyph drawing through parley.
pub mod parley_shaper;

pub use fixed::FixedPitchShaper;
pub use layout::{build_lines, DisplayLine, LayoutOptions, LineCache, LineMap};
pub use line::TextLine;
pub use parley_shaper::ParleyShaper;

/// Result of shaping a run of runes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapedText {
    /// Horizontal advance of each rune, one entry per input rune.
    pub advances: Vec<f64>,
    /// Distance from the top of the line to the baseline.
    pub ascent: f64,
    /// Distance from the baseline to the bottom of the line.
    pub descent: f64,
}

impl ShapedText {
    /// Total advance.
    pub fn width(&self) -> f64 {
        self.advances.iter().sum()
    }
}

/// Measures and draws text in a given font.
///
/// Implementations must return exactly one advance per rune so that rune indexes and
/// positions can be mapped both ways.
pub trait TextShaper {
    /// Shape `runes` as a single unbroken line.
    fn shape(&self, font: &Font, runes: &[char]) -> ShapedText;

    /// Height of one line of text in `font`.
    fn line_height(&self, font: &Font) -> f64 {
        let shaped = self.shape(font, &[]);
        shaped.ascent + shaped.descent
    }

    /// Width of `text` drawn on one line.
    fn measure(&self, font: &Font, text: &str) -> f64 {
        let runes: Vec<char> = text.chars().collect();
        self.shape(font, &runes).width()
    }

    /// Draw `runes` with the left end of the baseline at `origin`.
    fn draw(
        &self,
        graphics: &mut dyn Graphics,
        font: &Font,
        runes: &[char],
        origin: Point,
        brush: &Brush,
    );
}
