use std::time::Duration;
use vello::peniko::Color;

use crate::border::Border;
use crate::font::Font;
use crate::palette::Palette;
use crate::roles::{AlignmentRole, ColorRole, MetricRole, TextAlignment};

/// Theming information for an editable text field.
#[derive(Debug, Clone)]
pub struct FieldTheme {
    /// Font used for the text, the watermark and sizing.
    pub font: Font,
    /// Background of a disabled field.
    pub background_ink: Color,
    /// Text of a disabled field.
    pub on_background_ink: Color,
    /// Background of an enabled field.
    pub editable_ink: Color,
    /// Text of an enabled field.
    pub on_editable_ink: Color,
    /// Selection highlight.
    pub selection_ink: Color,
    /// Selected text.
    pub on_selection_ink: Color,
    /// Background of a field whose content failed validation.
    pub error_ink: Color,
    /// Text of a field whose content failed validation.
    pub on_error_ink: Color,
    /// Border while focused.
    pub focused_border: Border,
    /// Border while not focused.
    pub unfocused_border: Border,
    /// Caret blink period.
    pub blink_rate: Duration,
    /// Narrowest text area the field asks for.
    pub minimum_text_width: f64,
    /// Horizontal alignment of single-line text that fits.
    pub h_align: TextAlignment,
}

impl FieldTheme {
    /// Derive the field theme from a palette.
    pub fn from_palette(palette: &Palette) -> Self {
        let edge = palette.color(ColorRole::ControlEdge);
        Self {
            font: Font::new("sans-serif", palette.metric(MetricRole::FieldFontSize) as f32),
            background_ink: palette.color(ColorRole::Background),
            on_background_ink: palette.color(ColorRole::OnBackground),
            editable_ink: palette.color(ColorRole::Editable),
            on_editable_ink: palette.color(ColorRole::OnEditable),
            selection_ink: palette.color(ColorRole::Selection),
            on_selection_ink: palette.color(ColorRole::OnSelection),
            error_ink: palette.color(ColorRole::Error),
            on_error_ink: palette.color(ColorRole::OnError),
            focused_border: Border::field(palette.color(ColorRole::Selection), true),
            unfocused_border: Border::field(edge, false),
            blink_rate: palette.duration(MetricRole::BlinkRate),
            minimum_text_width: palette.metric(MetricRole::MinimumTextWidth),
            h_align: palette.alignment(AlignmentRole::FieldAlignment),
        }
    }
}

impl Default for FieldTheme {
    fn default() -> Self {
        Self::from_palette(&Palette::default())
    }
}
