pub mod clipboard;
pub mod settings;

pub use clipboard::{Clipboard, MemoryClipboard};
#[cfg(feature = "system-clipboard")]
pub use clipboard::ClipboardService;
pub use settings::{Config, SettingsRegistry};
