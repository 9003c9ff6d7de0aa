use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use smol::fs;
use tessel_theme::loader::ThemeLoader;
use tessel_theme::roles::MetricRole;
use tessel_theme::Palette;
use xdg::BaseDirectories;

const PREFIX: &str = "tessel-0";

/// Contents of a `config.toml`. Every value is optional so files can be layered.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub field: FieldSettings,
    #[serde(default)]
    pub dock: DockSettings,
    /// Unknown sections, kept for applications built on top.
    #[serde(flatten)]
    pub other: HashMap<String, toml::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralSettings {
    pub debug: Option<bool>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldSettings {
    /// Caret blink period in milliseconds.
    pub blink_rate_ms: Option<u64>,
    pub minimum_text_width: Option<f64>,
    /// Gaining focus selects the whole content.
    pub select_all_on_focus: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DockSettings {
    pub minimum_tab_width: Option<f64>,
    pub tab_gap: Option<f64>,
}

fn overlay<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Layered widget settings plus the palette from any `theme.toml` found alongside them.
pub struct SettingsRegistry {
    config: Config,
    palette: Palette,
}

impl SettingsRegistry {
    /// Build a registry and read every config and theme file from the XDG locations.
    pub async fn new() -> Result<Self> {
        let mut registry = Self::with_defaults();
        registry.load().await?;
        Ok(registry)
    }

    /// A registry holding only built-in values.
    pub fn with_defaults() -> Self {
        let mut config = Config::default();
        config.general.debug = Some(false);
        config.field.select_all_on_focus = Some(true);
        Self {
            config,
            palette: Palette::default(),
        }
    }

    /// Read `config.toml` and `theme.toml` from the XDG locations.
    ///
    /// Data dirs come first, then config dirs, then the user config home. Later files win.
    pub async fn load(&mut self) -> Result<()> {
        let dirs = BaseDirectories::with_prefix(PREFIX)?;

        for path in Self::candidates(&dirs, "config.toml") {
            if let Err(e) = self.read_config(&path).await {
                log::warn!("Skipping {:?}: {:#}", path, e);
            }
        }
        for path in Self::candidates(&dirs, "theme.toml") {
            log::debug!("Reading theme {:?}", path);
            match ThemeLoader::load_from_file(&path).await {
                Ok(palette) => self.palette.merge(palette),
                Err(e) => log::warn!("Skipping theme {:?}: {}", path, e),
            }
        }
        Ok(())
    }

    fn candidates(dirs: &BaseDirectories, file: &str) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = dirs.find_data_files(file).rev().collect();
        found.extend(dirs.find_config_files(file).rev());

        let home = dirs.get_config_home().join(file);
        if home.exists() && !found.contains(&home) {
            found.push(home);
        }
        found
    }

    async fn read_config(&mut self, path: &Path) -> Result<()> {
        log::debug!("Reading config {:?}", path);
        let text = fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {:?}", path))?;
        let config = toml::from_str::<Config>(&text).with_context(|| format!("parsing {:?}", path))?;
        self.merge(config);
        Ok(())
    }

    /// Layer `other` on top. Values it leaves unset keep their current value.
    pub fn merge(&mut self, other: Config) {
        let Config {
            general,
            field,
            dock,
            other,
        } = other;

        overlay(&mut self.config.general.debug, general.debug);
        overlay(&mut self.config.general.log_level, general.log_level);

        overlay(&mut self.config.field.blink_rate_ms, field.blink_rate_ms);
        overlay(&mut self.config.field.minimum_text_width, field.minimum_text_width);
        overlay(&mut self.config.field.select_all_on_focus, field.select_all_on_focus);

        overlay(&mut self.config.dock.minimum_tab_width, dock.minimum_tab_width);
        overlay(&mut self.config.dock.tab_gap, dock.tab_gap);

        self.config.other.extend(other);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The palette assembled from every theme file found, with settings applied.
    pub fn palette(&self) -> Palette {
        let mut palette = self.palette.clone();
        self.apply(&mut palette);
        palette
    }

    /// Write the metric overrides from the settings into `palette`.
    pub fn apply(&self, palette: &mut Palette) {
        let field = &self.config.field;
        let dock = &self.config.dock;
        let overrides = [
            (MetricRole::BlinkRate, field.blink_rate_ms.map(|ms| ms as f64)),
            (MetricRole::MinimumTextWidth, field.minimum_text_width),
            (MetricRole::MinimumTabWidth, dock.minimum_tab_width),
            (MetricRole::TabGap, dock.tab_gap),
        ];
        for (role, value) in overrides {
            if let Some(value) = value {
                palette.set_metric(role, value);
            }
        }
    }

    pub fn select_all_on_focus(&self) -> bool {
        self.config.field.select_all_on_focus.unwrap_or(true)
    }

    /// Read each of `paths` in order, returning one result per path.
    pub async fn load_paths(&mut self, paths: impl IntoIterator<Item = PathBuf>) -> Vec<Result<()>> {
        let mut results = Vec::new();
        for path in paths {
            results.push(self.read_config(&path).await);
        }
        results
    }

    /// Drop everything loaded so far and read the XDG locations again.
    pub async fn reload(&mut self) -> Result<()> {
        *self = Self::with_defaults();
        self.load().await
    }
}
