//! Borders for framed widgets.
//!
//! A [Border] is an optional stroked line plus padding. Only its combined [insets](Border::insets)
//! matter for layout; the line is drawn inside the outer edge of the widget frame.

use vello::peniko::Color;

/// Distances from each edge of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Right edge.
    pub right: f64,
}

impl Insets {
    /// Create insets from explicit edge values.
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// The same amount on every edge.
    pub const fn uniform(amount: f64) -> Self {
        Self::new(amount, amount, amount, amount)
    }

    /// `amount` on the left and right edges only.
    pub const fn horizontal(amount: f64) -> Self {
        Self::new(0.0, amount, 0.0, amount)
    }

    /// Sum of the left and right edges.
    pub fn width(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of the top and bottom edges.
    pub fn height(&self) -> f64 {
        self.top + self.bottom
    }
}

impl std::ops::Add for Insets {
    type Output = Insets;

    fn add(self, rhs: Insets) -> Insets {
        Insets::new(
            self.top + rhs.top,
            self.left + rhs.left,
            self.bottom + rhs.bottom,
            self.right + rhs.right,
        )
    }
}

/// A solid line along some or all edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineBorder {
    /// Line color.
    pub color: Color,
    /// Line thickness per edge. Zero means no line on that edge.
    pub insets: Insets,
}

/// An optional line followed by padding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Border {
    /// The outer line, if any.
    pub line: Option<LineBorder>,
    /// Empty space inside the line.
    pub padding: Insets,
}

impl Border {
    /// A border made of padding only.
    pub const fn empty(padding: Insets) -> Self {
        Self {
            line: None,
            padding,
        }
    }

    /// A line border with padding inside it.
    pub fn line(color: Color, line: Insets, padding: Insets) -> Self {
        Self {
            line: Some(LineBorder {
                color,
                insets: line,
            }),
            padding,
        }
    }

    /// Combined space taken from each edge.
    pub fn insets(&self) -> Insets {
        match self.line {
            Some(line) => line.insets + self.padding,
            None => self.padding,
        }
    }

    /// The default border for an editable field.
    ///
    /// A focused field gets a thicker line and correspondingly less padding, so the text
    /// area does not move when focus changes.
    pub fn field(color: Color, focused: bool) -> Self {
        let adj = if focused { 0.0 } else { 1.0 };
        Self::line(
            color,
            Insets::uniform(2.0 - adj),
            Insets::new(2.0 + adj, 2.0 + adj, 1.0 + adj, 2.0 + adj),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_border_keeps_text_area() {
        let color = Color::from_rgb8(0, 0, 0);
        let focused = Border::field(color, true).insets();
        let unfocused = Border::field(color, false).insets();
        assert_eq!(focused, unfocused);
        assert_eq!(focused, Insets::new(4.0, 4.0, 3.0, 4.0));
    }
}
