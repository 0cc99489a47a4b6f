use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::{MapStrategy, PhotoSource, Theme, ViewerConfig};
use crate::constants::{DEFAULT_AUTOPLAY_INTERVAL_MS, DEFAULT_PORT};

const CONFIG_FILE_NAME: &str = "itinerary_viewer.ini";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub port: u16,
    #[serde(default)]
    pub auto_open_browser: bool,
    pub photo_source: PhotoSource,
    pub map_strategy: MapStrategy,
    pub theme: Theme,
    pub autoplay_interval_ms: u64,
    /// Replaces the built-in dataset when set.
    pub itinerary_file: Option<String>,
    /// Root for `local` photo references.
    pub photos_dir: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            auto_open_browser: false,
            photo_source: PhotoSource::default(),
            map_strategy: MapStrategy::default(),
            theme: Theme::default(),
            autoplay_interval_ms: DEFAULT_AUTOPLAY_INTERVAL_MS,
            itinerary_file: None,
            photos_dir: None,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
        Ok(Self::parse(&content))
    }

    /// Parse `key = value` lines. Unknown keys are ignored, bad values keep defaults.
    pub fn parse(content: &str) -> Self {
        let mut settings = Settings::default();
        let mut config_map = HashMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.starts_with('#') || line.is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config_map.insert(key.trim(), value.trim().trim_matches('"'));
            }
        }

        fn parsed<T: std::str::FromStr>(map: &HashMap<&str, &str>, key: &str) -> Option<T> {
            let raw = map.get(key)?;
            match raw.parse::<T>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(key, value = %raw, "Ignoring invalid setting");
                    None
                }
            }
        }

        if let Some(port) = parsed(&config_map, "port") {
            settings.port = port;
        }
        if let Some(auto_open) = parsed(&config_map, "auto_open_browser") {
            settings.auto_open_browser = auto_open;
        }
        if let Some(source) = parsed(&config_map, "photo_source") {
            settings.photo_source = source;
        }
        if let Some(strategy) = parsed(&config_map, "map_strategy") {
            settings.map_strategy = strategy;
        }
        if let Some(theme) = parsed(&config_map, "theme") {
            settings.theme = theme;
        }
        if let Some(interval) = parsed(&config_map, "autoplay_interval_ms") {
            settings.autoplay_interval_ms = interval;
        }
        settings.itinerary_file = non_empty(config_map.get("itinerary_file"));
        settings.photos_dir = non_empty(config_map.get("photos_dir"));

        settings
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Creating config directory")?;
        }
        std::fs::write(config_path, self.to_ini()).context("Failed to write to config file")?;
        Ok(())
    }

    pub fn to_ini(&self) -> String {
        let mut content = String::new();
        content.push_str("# Itinerary Viewer Configuration File\n");
        content.push_str(&format!("port = {}\n", self.port));
        content.push_str(&format!("auto_open_browser = {}\n", self.auto_open_browser));
        content.push_str(&format!("photo_source = {}\n", self.photo_source));
        content.push_str(&format!("map_strategy = {}\n", self.map_strategy));
        content.push_str(&format!("theme = {}\n", self.theme));
        content.push_str(&format!(
            "autoplay_interval_ms = {}\n",
            self.autoplay_interval_ms
        ));
        if let Some(ref file) = self.itinerary_file {
            content.push_str(&format!("itinerary_file = \"{}\"\n", file));
        }
        if let Some(ref dir) = self.photos_dir {
            content.push_str(&format!("photos_dir = \"{}\"\n", dir));
        }
        content
    }

    pub fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig {
            photo_source: self.photo_source,
            map_strategy: self.map_strategy,
            theme: self.theme,
        }
    }

    pub fn config_path() -> PathBuf {
        let mut path = std::env::current_exe()
            .unwrap_or_default()
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        if path.ends_with("target/debug") || path.ends_with("target/release") {
            path.pop();
            path.pop();
        }
        path.push(CONFIG_FILE_NAME);
        path
    }
}

fn non_empty(value: Option<&&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(|v| v.to_string())
}
