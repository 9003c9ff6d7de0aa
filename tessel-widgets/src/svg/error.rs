//! # SVG Error Types

use thiserror::Error;

/// Errors that can occur while loading an SVG.
#[derive(Error, Debug)]
pub enum SvgError {
    /// The content is not well-formed XML. Reported regardless of the parse error mode.
    #[error("malformed SVG document: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The document element is not `<svg>`.
    #[error("expected an <svg> root element, found <{0}>")]
    NotSvg(String),

    /// A `d` attribute could not be parsed.
    #[error("invalid path data: {0}")]
    PathData(#[from] tessel_core::kurbo::SvgParseError),

    /// An attribute value could not be parsed.
    #[error("invalid value {value:?} for {name}")]
    Attribute {
        /// Attribute or property name.
        name: String,
        /// The offending value.
        value: String,
    },

    /// A `url(#id)` paint names nothing usable.
    #[error("unknown paint reference {0:?}")]
    UnknownReference(String),

    /// The document uses a feature that cannot be drawn.
    #[error("unsupported style: {0}")]
    UnsupportedStyle(String),
}

impl SvgError {
    /// Create an attribute error.
    pub fn attribute(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Attribute {
            name: name.into(),
            value: value.into(),
        }
    }
}
