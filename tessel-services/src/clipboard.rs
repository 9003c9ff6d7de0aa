#[cfg(feature = "system-clipboard")]
use copypasta::{ClipboardContext, ClipboardProvider};

/// Plain-text clipboard access.
///
/// Failures are not reported to the caller: a clipboard that cannot be read reads as empty,
/// and a failed write leaves the previous contents in place.
pub trait Clipboard {
    /// Current clipboard text, or an empty string.
    fn get_text(&mut self) -> String;

    /// Replace the clipboard text.
    fn set_text(&mut self, text: &str);
}

/// The platform clipboard.
#[cfg(feature = "system-clipboard")]
pub struct ClipboardService {
    context: Option<ClipboardContext>,
}

#[cfg(feature = "system-clipboard")]
impl ClipboardService {
    /// Create a new clipboard service.
    pub fn new() -> Self {
        let context = match ClipboardContext::new() {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                log::warn!("Failed to initialize clipboard context: {}", e);
                None
            }
        };

        Self { context }
    }

    /// Whether a platform clipboard was found.
    pub fn is_available(&self) -> bool {
        self.context.is_some()
    }
}

#[cfg(feature = "system-clipboard")]
impl Default for ClipboardService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "system-clipboard")]
impl Clipboard for ClipboardService {
    fn get_text(&mut self) -> String {
        let Some(ctx) = &mut self.context else {
            return String::new();
        };
        match ctx.get_contents() {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Failed to read clipboard: {}", e);
                String::new()
            }
        }
    }

    fn set_text(&mut self, text: &str) {
        let Some(ctx) = &mut self.context else {
            log::warn!("Clipboard context not available");
            return;
        };
        if let Err(e) = ctx.set_contents(text.to_string()) {
            log::warn!("Failed to write clipboard: {}", e);
        }
    }
}

/// A process-local clipboard. Used headless and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: String,
}

impl MemoryClipboard {
    /// Create an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clipboard that already holds `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Peek at the contents.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.get_text(), "");
        clipboard.set_text("hello");
        assert_eq!(clipboard.get_text(), "hello");
        assert_eq!(clipboard.text(), "hello");
    }
}
