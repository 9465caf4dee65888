//! Configuration module
//!
//! Reads a TOML file (default: `~/.config/aquameter/config.toml`, overridable
//! via the `AQUAMETER_CONFIG` environment variable). Missing sections fall
//! back to defaults so a bare install can start with no file at all.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// SQLite file path; switch the URL scheme for PostgreSQL
    pub path: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: "./aquameter.db".to_string(),
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        if self.path.contains("://") {
            self.path.clone()
        } else {
            format!("sqlite://{}?mode=rwc", self.path)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter (e.g. "info", "aquameter=debug")
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Directory uploads are written to
    pub root: String,
    /// Public base URL the stored files are served from
    pub base_url: String,
    /// Accepted upload mime types
    pub allowed_mime_types: Vec<String>,
    /// Upload size ceiling in bytes
    pub max_file_size_bytes: usize,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            root: "./data/uploads".to_string(),
            base_url: "http://localhost:8080/files".to_string(),
            allowed_mime_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/webp".to_string(),
            ],
            max_file_size_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub storage: StorageSection,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

/// Default location of the config file
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aquameter")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.database.connection_url(), "sqlite://./aquameter.db?mode=rwc");
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg
            .storage
            .allowed_mime_types
            .contains(&"image/jpeg".to_string()));
    }

    #[test]
    fn partial_sections_are_merged_with_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9999

            [storage]
            max_file_size_bytes = 1024
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9999);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.storage.max_file_size_bytes, 1024);
        assert_eq!(cfg.storage.root, "./data/uploads");
    }

    #[test]
    fn full_urls_pass_through() {
        let section = DatabaseSection {
            path: "postgres://user:pw@db/aquameter".to_string(),
        };
        assert_eq!(section.connection_url(), "postgres://user:pw@db/aquameter");
    }
}
