use vello::peniko::Color;

use crate::border::{Border, Insets};
use crate::font::Font;
use crate::palette::Palette;
use crate::roles::{ColorRole, MetricRole};

/// Theming information for a dock header.
#[derive(Debug, Clone)]
pub struct DockHeaderTheme {
    /// Header background.
    pub background_ink: Color,
    /// Drop indicator.
    pub drop_area_ink: Color,
    /// Header border. Its insets surround the packed content.
    pub header_border: Border,
    /// Narrowest a tab may be squeezed to.
    pub minimum_tab_width: f64,
    /// Space between adjacent header items.
    pub tab_gap: f64,
    /// Width of the drop indicator.
    pub tab_insert_size: f64,
    /// Tab title font.
    pub title_font: Font,
    /// Tab title color.
    pub title_ink: Color,
    /// Background of the current tab.
    pub current_tab_ink: Color,
    /// Padding around a tab title.
    pub tab_insets: Insets,
    /// Padding around header button icons.
    pub button_insets: Insets,
    /// Icon fill color for header buttons.
    pub button_ink: Color,
}

impl DockHeaderTheme {
    /// Derive the dock header theme from a palette.
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            background_ink: palette.color(ColorRole::Background),
            drop_area_ink: palette.color(ColorRole::DropArea),
            header_border: Border::line(
                palette.color(ColorRole::Divider),
                Insets::new(0.0, 0.0, 1.0, 0.0),
                Insets::horizontal(4.0),
            ),
            minimum_tab_width: palette.metric(MetricRole::MinimumTabWidth),
            tab_gap: palette.metric(MetricRole::TabGap),
            tab_insert_size: palette.metric(MetricRole::TabInsertSize),
            title_font: Font::new("sans-serif", palette.metric(MetricRole::LabelFontSize) as f32),
            title_ink: palette.color(ColorRole::OnContent),
            current_tab_ink: palette.color(ColorRole::Content),
            tab_insets: Insets::new(2.0, 4.0, 2.0, 4.0),
            button_insets: Insets::uniform(2.0),
            button_ink: palette.color(ColorRole::OnBackground),
        }
    }
}

impl Default for DockHeaderTheme {
    fn default() -> Self {
        Self::from_palette(&Palette::default())
    }
}
