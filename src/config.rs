use eyre::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use evogate::client::ClientConfig;
use evogate::tools::GeneratorConfig;

/// Overrides the configured server URL
pub const URL_ENV: &str = "EVOLUTION_API_URL";

/// Overrides the configured API key
pub const KEY_ENV: &str = "EVOLUTION_API_KEY";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ClientConfig,
    pub tools: GeneratorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ClientConfig::default(),
            tools: GeneratorConfig::new().with_prefix("evolution_"),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain, then apply environment overrides
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let config = Self::load_file(config_path)?;
        Ok(config.with_overrides(std::env::var(URL_ENV).ok(), std::env::var(KEY_ENV).ok()))
    }

    fn load_file(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_name = env!("CARGO_PKG_NAME");

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Replace server URL and key with non-empty override values
    pub fn with_overrides(mut self, url: Option<String>, key: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.server.base_url = url;
        }
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.server.api_key = key;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evogate::endpoints::Controller;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://localhost:8080");
        assert_eq!(config.server.retry_attempts, 3);
        assert_eq!(config.tools.prefix.as_deref(), Some("evolution_"));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
server:
  base_url: https://evo.example.com
  api_key: file-key
  retry_attempts: 5
tools:
  controllers: [message, group]
  exclude: [send_poll_message]
"#
        )
        .unwrap();

        let config = Config::load_file(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.server.base_url, "https://evo.example.com");
        assert_eq!(config.server.api_key, "file-key");
        assert_eq!(config.server.retry_attempts, 5);
        assert_eq!(config.server.timeout_ms, 30_000);
        assert_eq!(config.tools.controllers, vec![Controller::Message, Controller::Group]);
        assert_eq!(config.tools.exclude, vec!["send_poll_message"]);
        assert!(config.tools.prefix.is_none());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let path = PathBuf::from("/nonexistent/evogate.yml");
        assert!(Config::load_file(Some(&path)).is_err());
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "server: [not, a, map]").unwrap();
        assert!(Config::load_file(Some(&file.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(Some("https://env.example.com".to_string()), Some("env-key".to_string()));
        assert_eq!(config.server.base_url, "https://env.example.com");
        assert_eq!(config.server.api_key, "env-key");
    }

    #[test]
    fn test_blank_overrides_ignored() {
        let config = Config::default().with_overrides(Some("  ".to_string()), None);
        assert_eq!(config.server.base_url, "http://localhost:8080");
        assert!(config.server.api_key.is_empty());
    }
}
