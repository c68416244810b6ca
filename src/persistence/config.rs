use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Board settings stored in config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How long a notification stays visible
    pub toast_secs: u64,
    /// Delay before typed filter text is applied
    pub filter_debounce_ms: u64,
    /// Oldest notifications are dropped past this many (None = unbounded)
    pub max_toasts: Option<usize>,
    pub log_level: String,
    /// Store key holding the task collection
    pub tasks_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            toast_secs: 4,
            filter_debounce_ms: 300,
            max_toasts: None,
            log_level: "info".to_string(),
            tasks_key: "tasks".to_string(),
        }
    }
}

impl AppConfig {
    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_secs)
    }

    pub fn filter_debounce(&self) -> Duration {
        Duration::from_millis(self.filter_debounce_ms)
    }
}

/// Result of reading config.json
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    /// Why the file was ignored in favour of defaults, if it was
    pub fallback_reason: Option<String>,
}

/// Load config from config.json. A missing file gives defaults; so does an
/// unparsable one, with the parse error handed back for the caller to log
/// once logging is up.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<LoadedConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(LoadedConfig {
            config: AppConfig::default(),
            fallback_reason: None,
        });
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    Ok(match serde_json::from_str(&content) {
        Ok(config) => LoadedConfig {
            config,
            fallback_reason: None,
        },
        Err(err) => LoadedConfig {
            config: AppConfig::default(),
            fallback_reason: Some(err.to_string()),
        },
    })
}

/// Save config to config.json
pub fn save_config<P: AsRef<Path>>(path: P, config: &AppConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let loaded = load_config(&config_path).unwrap();
        assert!(loaded.fallback_reason.is_none());
        let config = loaded.config;
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.toast_duration(), Duration::from_secs(4));
        assert_eq!(config.filter_debounce(), Duration::from_millis(300));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let mut config = AppConfig::default();
        config.toast_secs = 10;
        config.max_toasts = Some(3);

        save_config(&config_path, &config).unwrap();

        let loaded = load_config(&config_path).unwrap().config;
        assert_eq!(loaded.toast_secs, 10);
        assert_eq!(loaded.max_toasts, Some(3));
        assert_eq!(loaded.tasks_key, "tasks");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.json");
        std::fs::write(&config_path, r#"{"filter_debounce_ms": 50}"#).unwrap();

        let loaded = load_config(&config_path).unwrap().config;
        assert_eq!(loaded.filter_debounce_ms, 50);
        assert_eq!(loaded.toast_secs, 4);
    }

    #[test]
    fn test_corrupt_config_falls_back() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.json");
        std::fs::write(&config_path, "toast_secs = 3").unwrap();

        let loaded = load_config(&config_path).unwrap();
        assert_eq!(loaded.config, AppConfig::default());
        assert!(loaded.fallback_reason.is_some());
    }

    #[test]
    fn test_unreadable_config_reports_path() {
        let temp_dir = tempdir().unwrap();
        // A directory in place of the file cannot be read as text
        let config_path = temp_dir.path().join("config.json");
        std::fs::create_dir(&config_path).unwrap();

        let err = load_config(&config_path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }
}
