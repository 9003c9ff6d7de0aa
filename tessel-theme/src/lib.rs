#![warn(missing_docs)]

//! # Tessel Theming
//!
//! Theme data for the tessel widgets. Nothing in here is global: a [Palette] is loaded
//! (or defaulted) once and every widget theme is derived from it explicitly when the widget
//! is constructed.
//!
//! - **[Palette]**: color, metric and alignment roles.
//! - **[ThemeLoader](loader::ThemeLoader)**: reads `[Colors]`, `[Metrics]` and
//!   `[Alignments]` tables from TOML theme files.
//! - **[ThemeConfig](config::ThemeConfig)**: resolves a palette from the environment.
//! - **[FieldTheme](field::FieldTheme)** / **[DockHeaderTheme](dock::DockHeaderTheme)**:
//!   per-widget theme values.
//!
//! ```rust
//! use tessel_theme::field::FieldTheme;
//! use tessel_theme::palette::Palette;
//!
//! let palette = Palette::default();
//! let theme = FieldTheme::from_palette(&palette);
//! assert_eq!(theme.blink_rate.as_millis(), 560);
//! ```

/// Borders and insets.
pub mod border;
/// Theme configuration from the environment.
pub mod config;
/// Dock header theme values.
pub mod dock;
/// Error types for the theming system.
pub mod error;
/// Field theme values.
pub mod field;
/// Font descriptions.
pub mod font;
/// Widget identifiers.
pub mod id;
/// TOML theme loading.
pub mod loader;
/// The role-keyed palette.
pub mod palette;
/// Color, metric and alignment roles.
pub mod roles;

pub use palette::Palette;
