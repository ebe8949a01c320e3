//! Configuration file management for foreman.
//!
//! Provides a TOML-based config file at `~/.config/foreman/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use foreman_core::ollama::OllamaConfig;
use foreman_db::config::DbConfig;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub database: DatabaseSection,
    pub ollama: OllamaSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OllamaSection {
    pub url: String,
    pub model: String,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the foreman config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/foreman` or `~/.config/foreman`.
/// We intentionally ignore the platform-specific `dirs::config_dir()`
/// (which returns `~/Library/Application Support` on macOS).
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("foreman");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("foreman")
}

/// Return the path to the foreman config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct ForemanConfig {
    pub db_config: DbConfig,
    pub ollama_config: OllamaConfig,
}

impl ForemanConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config
    /// file > default.
    ///
    /// - DB URL: `cli_db_url` > `FOREMAN_DATABASE_URL` > `database.url` >
    ///   `DbConfig::DEFAULT_URL`
    /// - Ollama URL: `cli_ollama_url` > `FOREMAN_OLLAMA_URL` > `ollama.url` >
    ///   `OllamaConfig::DEFAULT_BASE_URL`
    /// - Model: `FOREMAN_OLLAMA_MODEL` > `ollama.model` >
    ///   `OllamaConfig::DEFAULT_MODEL`
    pub fn resolve(cli_db_url: Option<&str>, cli_ollama_url: Option<&str>) -> Result<Self> {
        let file_config = load_config().ok();

        let db_url = if let Some(url) = cli_db_url {
            url.to_string()
        } else if let Ok(url) = std::env::var("FOREMAN_DATABASE_URL") {
            url
        } else if let Some(ref cfg) = file_config {
            cfg.database.url.clone()
        } else {
            DbConfig::DEFAULT_URL.to_string()
        };
        let db_config = DbConfig::new(db_url);

        let ollama_url = if let Some(url) = cli_ollama_url {
            url.to_string()
        } else if let Ok(url) = std::env::var("FOREMAN_OLLAMA_URL") {
            url
        } else if let Some(ref cfg) = file_config {
            cfg.ollama.url.clone()
        } else {
            OllamaConfig::DEFAULT_BASE_URL.to_string()
        };

        let model = if let Ok(model) = std::env::var("FOREMAN_OLLAMA_MODEL") {
            model
        } else if let Some(ref cfg) = file_config {
            cfg.ollama.model.clone()
        } else {
            OllamaConfig::DEFAULT_MODEL.to_string()
        };

        let ollama_config = OllamaConfig {
            base_url: ollama_url,
            default_model: model,
            timeout: OllamaConfig::DEFAULT_TIMEOUT,
        };

        Ok(Self {
            db_config,
            ollama_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_round_trips_through_toml() {
        let original = ConfigFile {
            database: DatabaseSection {
                url: "postgresql://testhost:5432/testdb".to_string(),
            },
            ollama: OllamaSection {
                url: "http://testhost:11434".to_string(),
                model: "codellama".to_string(),
            },
        };

        let serialized = toml::to_string_pretty(&original).unwrap();
        let parsed: ConfigFile = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.database.url, original.database.url);
        assert_eq!(parsed.ollama.url, original.ollama.url);
        assert_eq!(parsed.ollama.model, original.ollama.model);
    }

    #[test]
    fn cli_flags_win_resolution() {
        let resolved = ForemanConfig::resolve(
            Some("postgresql://flaghost:5432/flagdb"),
            Some("http://flaghost:11434"),
        )
        .unwrap();
        assert_eq!(
            resolved.db_config.database_url,
            "postgresql://flaghost:5432/flagdb"
        );
        assert_eq!(resolved.ollama_config.base_url, "http://flaghost:11434");
    }
}
