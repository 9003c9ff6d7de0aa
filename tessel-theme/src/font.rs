/// A font request: family name plus point size.
///
/// Resolution to an actual face is up to the text shaper.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// Family name or generic family (`sans-serif`, `monospace`, ...).
    pub family: String,
    /// Size in points.
    pub size: f32,
}

impl Font {
    /// Create a new font request.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// The same family at a different size.
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            family: self.family.clone(),
            size,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("sans-serif", 13.0)
    }
}
