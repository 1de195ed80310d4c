//! Application settings

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::models::StyleConfig;
use crate::ui::viewport::{ViewportConfig, DEFAULT_RESIZE_DEBOUNCE, DEFAULT_WHEEL_STEP};

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Style overrides merged over the built-in table style
    pub style: StyleConfig,

    /// JSON file with the initial rows (array of arrays)
    pub data_path: Option<String>,

    /// Log level used when RUST_LOG is unset
    pub log_level: String,

    /// Log file path
    pub log_file: String,

    /// Coalescing window for resize bursts, in milliseconds
    pub resize_debounce_ms: u64,

    /// Rows scrolled per wheel notch
    pub wheel_step: u32,

    /// Input poll interval, in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            style: StyleConfig::empty(),
            data_path: None,
            log_level: "info".to_string(),
            log_file: Self::config_dir()
                .join("datatable-tui.log")
                .to_string_lossy()
                .to_string(),
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE.as_millis() as u64,
            wheel_step: DEFAULT_WHEEL_STEP,
            tick_rate_ms: 50,
        }
    }
}

impl Settings {
    /// Load settings from file or create default
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_config_path);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("reading {}", config_path.display()))?;
            let settings: Self = serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", config_path.display()))?;
            Ok(settings)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to file
    pub fn save(&self, path: Option<&str>) -> Result<()> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_config_path);

        // Create parent directory if needed
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn viewport(&self) -> ViewportConfig {
        ViewportConfig {
            resize_debounce: Duration::from_millis(self.resize_debounce_ms),
            wheel_step: self.wheel_step,
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Get default config directory
    pub fn config_dir() -> PathBuf {
        ProjectDirs::from("com", "datatable", "datatable-tui")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".config")
                    .join("datatable-tui")
            })
    }

    /// Get default config file path
    pub fn default_config_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::style_keys;

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r##"{"wheel_step": 1, "style": {"header_background": "#000000"}}"##)
                .unwrap();
        assert_eq!(settings.wheel_step, 1);
        assert_eq!(settings.resize_debounce_ms, 100);
        assert_eq!(settings.style.get_str(style_keys::HEADER_BACKGROUND), Some("#000000"));
        assert_eq!(settings.viewport().resize_debounce, Duration::from_millis(100));
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("datatable-tui-settings-{}", std::process::id()));
        let path = dir.join("config.json");
        let path_str = path.to_str().unwrap();

        let mut settings = Settings::default();
        settings.tick_rate_ms = 25;
        settings.save(Some(path_str)).unwrap();

        let loaded = Settings::load(Some(path_str)).unwrap();
        assert_eq!(loaded.tick_rate_ms, 25);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let loaded = Settings::load(Some("/nonexistent/datatable-tui/config.json")).unwrap();
        assert_eq!(loaded.wheel_step, DEFAULT_WHEEL_STEP);
    }
}
