//! # Theme Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the theming system.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// Theme configuration file was not found.
    #[error("Theme file not found: {path:?}")]
    ThemeFileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The theme file could not be read.
    #[error("Failed to read theme file {0:?}: {1}")]
    ReadError(PathBuf, #[source] std::io::Error),

    /// The theme file is not valid TOML.
    #[error("Failed to parse theme file {0:?}: {1}")]
    ParseError(PathBuf, String),

    /// A color value could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// An alignment value could not be parsed.
    #[error("Invalid alignment: {0}")]
    InvalidAlignment(String),

    /// A metric value is not a number.
    #[error("Invalid metric value for {role}: {value}")]
    InvalidMetric {
        /// The metric role name.
        role: String,
        /// The offending value.
        value: String,
    },
}

/// Result type alias for theme operations.
pub type ThemeResult<T> = Result<T, ThemeError>;

impl ThemeError {
    /// Create a theme file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ThemeFileNotFound { path: path.into() }
    }

    /// Create a theme parse error.
    pub fn parse_error(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        Self::ParseError(path.into(), details.into())
    }
}
