//! Server configuration
//!
//! Settings come from a JSON file (path in `HEALTH_CONFIG`, default
//! `config.json`). A missing or unreadable file is not fatal: defaults
//! apply and the analysis stage stays disabled until a key is configured.

use serde::Deserialize;

/// Server configuration loaded from the settings file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bind_address: String,
    pub database_path: String,
    pub upload_dir: String,
    pub cors_origins: Vec<String>,

    /// Bearer credential for the analysis service; `None` disables analysis.
    pub analysis_api_key: Option<String>,
    pub analysis_base_url: String,
    pub analysis_model: String,
    pub analysis_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".into(),
            database_path: "health_manager.db".into(),
            upload_dir: "uploads".into(),
            cors_origins: vec!["*".into()],
            analysis_api_key: None,
            analysis_base_url: "https://api.deepseek.com".into(),
            analysis_model: "deepseek-chat".into(),
            analysis_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from the settings file named by `HEALTH_CONFIG`.
    pub fn load() -> Self {
        let path = std::env::var("HEALTH_CONFIG").unwrap_or_else(|_| "config.json".into());
        Self::load_from(&path)
    }

    fn load_from(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!(path, error = %e, "Invalid settings file, using defaults");
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path, "No settings file found, using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::error!(path, error = %e, "Failed to read settings file, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_for_missing_keys() {
        let config: Config = serde_json::from_str(r#"{"analysis_api_key": "sk-test"}"#).unwrap();
        assert_eq!(config.analysis_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.analysis_base_url, "https://api.deepseek.com");
        assert_eq!(config.analysis_timeout_secs, 30);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load_from("/nonexistent/config.json");
        assert!(config.analysis_api_key.is_none());
        assert_eq!(config.upload_dir, "uploads");
    }
}
