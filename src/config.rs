use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "http://localhost:8029/api/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: None,
            request_timeout_secs: default_timeout(),
        }
    }
}

fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
        .join("spacedeck");
    Ok(config_dir.join("config.toml"))
}

/// Loads the user config file, falling back to defaults when absent.
pub fn load() -> Result<ConsoleConfig> {
    load_from(&config_path()?)
}

pub fn load_from(path: &Path) -> Result<ConsoleConfig> {
    if !path.exists() {
        return Ok(ConsoleConfig::default());
    }
    let contents = fs::read_to_string(path)?;
    let config: ConsoleConfig = toml::from_str(&contents)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.api_token.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = \"http://10.0.0.2:9000/api/v1\"\n").unwrap();
        let config = load_from(&path).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:9000/api/v1");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn full_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let written = ConsoleConfig {
            base_url: "http://backend:8029/api/v1".into(),
            api_token: Some("secret".into()),
            request_timeout_secs: 5,
        };
        fs::write(&path, toml::to_string(&written).unwrap()).unwrap();
        let config = load_from(&path).unwrap();
        assert_eq!(config.base_url, written.base_url);
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.request_timeout_secs, 5);
    }
}
