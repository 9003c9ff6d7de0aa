//! # Theme Configuration
//!
//! Resolves the [Palette] an application should use.
//!
//! ## Environment Variables
//!
//! - `TESSEL_THEME_CONFIG`: path to a TOML theme file (see [ThemeLoader]).
//!
//! ```rust
//! use tessel_theme::config::ThemeConfig;
//!
//! let palette = ThemeConfig::new().resolve_palette();
//! ```

use std::env;
use std::path::{Path, PathBuf};

use crate::error::ThemeError;
use crate::loader::ThemeLoader;
use crate::palette::Palette;

/// Environment variable naming a theme file.
pub const THEME_CONFIG_ENV: &str = "TESSEL_THEME_CONFIG";

/// Where the palette comes from.
#[derive(Debug, Clone, Default)]
pub struct ThemeConfig {
    config_path: Option<PathBuf>,
}

impl ThemeConfig {
    /// A configuration that resolves to the built-in palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the configuration from the environment, falling back to the built-in palette.
    pub fn from_env_or_default() -> Self {
        let mut config = Self::new();
        if let Ok(path) = env::var(THEME_CONFIG_ENV) {
            if !path.trim().is_empty() {
                config.config_path = Some(PathBuf::from(path));
            }
        }
        config
    }

    /// Use the given theme file.
    pub fn with_config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// The configured theme file, if any.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Load the configured palette.
    pub async fn load_palette(&self) -> Result<Palette, ThemeError> {
        match &self.config_path {
            Some(path) => ThemeLoader::load_from_file(path).await,
            None => Ok(Palette::default()),
        }
    }

    /// Load the configured palette, falling back to the built-in one on error.
    pub fn resolve_palette(&self) -> Palette {
        match smol::block_on(self.load_palette()) {
            Ok(palette) => palette,
            Err(e) => {
                log::warn!("Failed to load theme, using built-in palette: {}", e);
                Palette::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::MetricRole;

    #[test]
    fn test_resolve_falls_back() {
        let config = ThemeConfig::new().with_config_path("/nonexistent/tessel/theme.toml");
        let palette = config.resolve_palette();
        assert_eq!(palette.metric(MetricRole::TabGap), 4.0);
    }

    #[test]
    fn test_resolve_from_file() {
        let path = env::temp_dir().join(format!("tessel-theme-{}.toml", std::process::id()));
        std::fs::write(&path, "[Metrics]\nMinimumTabWidth = 64\n").unwrap();
        let palette = ThemeConfig::new().with_config_path(&path).resolve_palette();
        std::fs::remove_file(&path).ok();
        assert_eq!(palette.metric(MetricRole::MinimumTabWidth), 64.0);
    }
}
