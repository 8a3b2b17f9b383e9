//! Application configuration loaded from TOML.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "quick-reply-style.toml";

fn default_extension_name() -> String {
    "quick-reply-menu".to_string()
}
fn default_settings_path() -> PathBuf {
    PathBuf::from("settings.json")
}
fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Key of this extension inside the host settings object.
    #[serde(default = "default_extension_name")]
    pub extension_name: String,

    /// Host settings JSON file.
    #[serde(default = "default_settings_path")]
    pub settings_path: PathBuf,

    /// `env_logger` filter string.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            extension_name: default_extension_name(),
            settings_path: default_settings_path(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Loads the config, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        load_toml(path).unwrap_or_default()
    }
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    match toml::from_str(&content) {
        Ok(data) => Ok(data),
        Err(e) => {
            log::error!("Failed to parse TOML file {:?}: {}", path, e);
            Err(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = toml::from_str("extension_name = \"qr\"").unwrap();
        assert_eq!(config.extension_name, "qr");
        assert_eq!(config.settings_path, PathBuf::from("settings.json"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_missing_file_gives_default() {
        let path = Path::new("definitely/not/here.toml");
        assert_eq!(AppConfig::load_or_default(path), AppConfig::default());
    }

    #[test]
    fn test_invalid_file_gives_default() {
        let path = std::env::temp_dir().join("quick_reply_style_bad_config.toml");
        fs::write(&path, "extension_name = [").unwrap();
        assert_eq!(AppConfig::load_or_default(&path), AppConfig::default());
        fs::remove_file(&path).unwrap();
    }
}
