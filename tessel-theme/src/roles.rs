use vello::peniko::Color;

/// Color roles that widgets pull from a [Palette](crate::palette::Palette).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    /// General window/panel background.
    Background,
    /// Text drawn on [ColorRole::Background].
    OnBackground,
    /// Content area background.
    Content,
    /// Text drawn on [ColorRole::Content].
    OnContent,
    /// Background of editable text.
    Editable,
    /// Text drawn on [ColorRole::Editable].
    OnEditable,
    /// Selection highlight.
    Selection,
    /// Text drawn on [ColorRole::Selection].
    OnSelection,
    /// Background of content that failed validation.
    Error,
    /// Text drawn on [ColorRole::Error].
    OnError,
    /// Edge lines of controls.
    ControlEdge,
    /// Divider lines.
    Divider,
    /// Drop target indicator.
    DropArea,
}

impl ColorRole {
    /// All color roles, in declaration order.
    pub const ALL: [ColorRole; 13] = [
        ColorRole::Background,
        ColorRole::OnBackground,
        ColorRole::Content,
        ColorRole::OnContent,
        ColorRole::Editable,
        ColorRole::OnEditable,
        ColorRole::Selection,
        ColorRole::OnSelection,
        ColorRole::Error,
        ColorRole::OnError,
        ColorRole::ControlEdge,
        ColorRole::Divider,
        ColorRole::DropArea,
    ];

    /// Parse a color role from its theme file key.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Background" => Some(ColorRole::Background),
            "OnBackground" => Some(ColorRole::OnBackground),
            "Content" => Some(ColorRole::Content),
            "OnContent" => Some(ColorRole::OnContent),
            "Editable" => Some(ColorRole::Editable),
            "OnEditable" => Some(ColorRole::OnEditable),
            "Selection" => Some(ColorRole::Selection),
            "OnSelection" => Some(ColorRole::OnSelection),
            "Error" => Some(ColorRole::Error),
            "OnError" => Some(ColorRole::OnError),
            "ControlEdge" => Some(ColorRole::ControlEdge),
            "Divider" => Some(ColorRole::Divider),
            "DropArea" => Some(ColorRole::DropArea),
            _ => None,
        }
    }

    /// The built-in light color for this role.
    pub fn default_color(self) -> Color {
        match self {
            ColorRole::Background => Color::from_rgb8(0xec, 0xec, 0xec),
            ColorRole::OnBackground => Color::from_rgb8(0x00, 0x00, 0x00),
            ColorRole::Content => Color::from_rgb8(0xf8, 0xf8, 0xf8),
            ColorRole::OnContent => Color::from_rgb8(0x00, 0x00, 0x00),
            ColorRole::Editable => Color::from_rgb8(0xff, 0xff, 0xff),
            ColorRole::OnEditable => Color::from_rgb8(0x00, 0x00, 0x00),
            ColorRole::Selection => Color::from_rgb8(0x00, 0x60, 0xa0),
            ColorRole::OnSelection => Color::from_rgb8(0xff, 0xff, 0xff),
            ColorRole::Error => Color::from_rgb8(0xc0, 0x40, 0x40),
            ColorRole::OnError => Color::from_rgb8(0xff, 0xff, 0xff),
            ColorRole::ControlEdge => Color::from_rgb8(0x60, 0x60, 0x60),
            ColorRole::Divider => Color::from_rgb8(0xc0, 0xc0, 0xc0),
            ColorRole::DropArea => Color::from_rgb8(0x33, 0x99, 0xff),
        }
    }
}

/// Numeric theme values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricRole {
    /// Caret blink period in milliseconds.
    BlinkRate,
    /// Narrowest text area a field will ask for.
    MinimumTextWidth,
    /// Narrowest a dock tab may be squeezed to.
    MinimumTabWidth,
    /// Horizontal space between dock header items.
    TabGap,
    /// Width of the drop indicator in a dock header.
    TabInsertSize,
    /// Point size of field text.
    FieldFontSize,
    /// Point size of labels such as tab titles.
    LabelFontSize,
}

impl MetricRole {
    /// Parse a metric role from its theme file key.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "BlinkRate" => Some(MetricRole::BlinkRate),
            "MinimumTextWidth" => Some(MetricRole::MinimumTextWidth),
            "MinimumTabWidth" => Some(MetricRole::MinimumTabWidth),
            "TabGap" => Some(MetricRole::TabGap),
            "TabInsertSize" => Some(MetricRole::TabInsertSize),
            "FieldFontSize" => Some(MetricRole::FieldFontSize),
            "LabelFontSize" => Some(MetricRole::LabelFontSize),
            _ => None,
        }
    }

    /// Get the default value for this metric.
    pub fn default_value(self) -> f64 {
        match self {
            MetricRole::BlinkRate => 560.0,
            MetricRole::MinimumTextWidth => 10.0,
            MetricRole::MinimumTabWidth => 50.0,
            MetricRole::TabGap => 4.0,
            MetricRole::TabInsertSize => 3.0,
            MetricRole::FieldFontSize => 13.0,
            MetricRole::LabelFontSize => 13.0,
        }
    }
}

/// Alignment roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignmentRole {
    /// Horizontal alignment of field text.
    FieldAlignment,
}

impl AlignmentRole {
    /// Parse an alignment role from its theme file key.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "FieldAlignment" => Some(AlignmentRole::FieldAlignment),
            _ => None,
        }
    }
}

/// Text alignment values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    /// Leading edge.
    #[default]
    Start,
    /// Centered.
    Middle,
    /// Trailing edge.
    End,
}

impl TextAlignment {
    /// Parse text alignment from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" | "left" => Some(TextAlignment::Start),
            "middle" | "center" => Some(TextAlignment::Middle),
            "end" | "right" => Some(TextAlignment::End),
            _ => None,
        }
    }
}
