#![warn(missing_docs)]

//! Text fields, dock headers and vector icons for desktop UI in Rust.
//!
//! Widgets draw through the [Graphics](core::vgi::Graphics) seam and measure text through
//! [TextShaper](core::text::TextShaper), so they run the same on top of vello or headless
//! with [FixedPitchShaper](core::text::FixedPitchShaper) and
//! [RecordingGraphics](core::vgi::recording::RecordingGraphics).

pub use vello::peniko as color;

pub use tessel_core as core;
pub use tessel_services as services;
pub use tessel_theme as theme;
pub use tessel_widgets as widgets;

/// A "prelude" for users of tessel.
///
/// Importing this module brings into scope the most common types
/// needed to build and drive the tessel widgets.
///
/// ```rust
/// use tessel::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::commands::{CommandTarget, EditCommand};
    pub use crate::core::kurbo::{Point, Rect, Size};
    pub use crate::core::text::{FixedPitchShaper, ParleyShaper, TextShaper};
    pub use crate::core::update::Update;
    pub use crate::core::vgi::{Drawable, Graphics};
    pub use crate::core::widget::{Sizes, Widget};

    // Theme
    pub use crate::theme::dock::DockHeaderTheme;
    pub use crate::theme::field::FieldTheme;
    pub use crate::theme::palette::Palette;

    // Services
    pub use crate::services::{Clipboard, MemoryClipboard};
    #[cfg(feature = "system-clipboard")]
    pub use crate::services::ClipboardService;

    // Widgets
    pub use crate::widgets::dock::{DockAction, DockHeader, Dockable};
    pub use crate::widgets::field::Field;
    pub use crate::widgets::svg::{DrawableSvg, Svg, SvgError, SvgOptions};
}
