//! Async palette loader for TOML theme files.
//!
//! ```toml
//! [Colors]
//! Selection = "#3060c0"
//! Error = "#ff000080"
//!
//! [Metrics]
//! BlinkRate = 500
//! TabGap = 6
//!
//! [Alignments]
//! FieldAlignment = "end"
//! ```

use std::path::Path;
use vello::peniko::Color;

use crate::error::ThemeError;
use crate::palette::Palette;
use crate::roles::{AlignmentRole, ColorRole, MetricRole, TextAlignment};

/// Loader for palettes stored as TOML.
pub struct ThemeLoader;

impl ThemeLoader {
    /// Parse a hex color string with optional alpha channel.
    ///
    /// Supports `#rrggbb` (opaque) and `#rrggbbaa`. The leading `#` is optional.
    pub fn parse_hex_color(hex: &str) -> Result<Color, ThemeError> {
        let digits = hex.trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(ThemeError::InvalidColor(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ThemeError::InvalidColor(hex.to_string()))
        };
        match digits.len() {
            6 => Ok(Color::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::from_rgba8(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(ThemeError::InvalidColor(format!(
                "Hex color must be 6 or 8 characters: {}",
                hex
            ))),
        }
    }

    /// Load a palette from a TOML file.
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Palette, ThemeError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ThemeError::file_not_found(path));
        }
        let content = smol::fs::read_to_string(path)
            .await
            .map_err(|e| ThemeError::ReadError(path.to_path_buf(), e))?;

        Self::load_from_toml(&content, path)
    }

    /// Load a palette from TOML content. `path` is only used for error reporting.
    ///
    /// Unknown role names are skipped with a debug log; malformed values are errors.
    pub fn load_from_toml<P: AsRef<Path>>(content: &str, path: P) -> Result<Palette, ThemeError> {
        let path = path.as_ref();
        let table: toml::Value =
            toml::from_str(content).map_err(|e| ThemeError::parse_error(path, e.to_string()))?;

        let mut palette = Palette::new();

        if let Some(colors) = table.get("Colors").and_then(|v| v.as_table()) {
            for (key, value) in colors.iter() {
                let Some(role) = ColorRole::from_str(key) else {
                    log::debug!("Ignoring unknown color role {} in {:?}", key, path);
                    continue;
                };
                let color_str = value
                    .as_str()
                    .ok_or_else(|| ThemeError::InvalidColor(value.to_string()))?;
                palette.set_color(role, Self::parse_hex_color(color_str)?);
            }
        }

        if let Some(metrics) = table.get("Metrics").and_then(|v| v.as_table()) {
            for (key, value) in metrics.iter() {
                let Some(role) = MetricRole::from_str(key) else {
                    log::debug!("Ignoring unknown metric role {} in {:?}", key, path);
                    continue;
                };
                let metric = value
                    .as_float()
                    .or_else(|| value.as_integer().map(|i| i as f64))
                    .ok_or_else(|| ThemeError::InvalidMetric {
                        role: key.clone(),
                        value: value.to_string(),
                    })?;
                palette.set_metric(role, metric);
            }
        }

        if let Some(alignments) = table.get("Alignments").and_then(|v| v.as_table()) {
            for (key, value) in alignments.iter() {
                let Some(role) = AlignmentRole::from_str(key) else {
                    log::debug!("Ignoring unknown alignment role {} in {:?}", key, path);
                    continue;
                };
                let alignment = value
                    .as_str()
                    .and_then(TextAlignment::from_str)
                    .ok_or_else(|| ThemeError::InvalidAlignment(value.to_string()))?;
                palette.set_alignment(role, alignment);
            }
        }

        Ok(palette)
    }
}
