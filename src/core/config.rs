//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.regimen/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RegimenConfig {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

/// The backend's development server default.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.regimen/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".regimen").join("config.toml"))
}

/// Load config from `~/.regimen/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `RegimenConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<RegimenConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(RegimenConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(RegimenConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: RegimenConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Regimen Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# base_url = "http://localhost:5000"   # Or set REGIMEN_BASE_URL env var
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars
/// → CLI. `cli_base_url` comes from the `--base-url` flag (None = not given).
pub fn resolve(config: &RegimenConfig, cli_base_url: Option<&str>) -> ResolvedConfig {
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("REGIMEN_BASE_URL").ok())
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // reqwest treats a trailing slash and a bare host differently when
    // joining paths; normalize here so the client can always append.
    let base_url = base_url.trim_end_matches('/').to_string();

    ResolvedConfig { base_url }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = RegimenConfig::default();
        let resolved = resolve(&config, None);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_cli_overrides_file() {
        let config = RegimenConfig {
            server: ServerConfig {
                base_url: Some("http://from-file:8080".to_string()),
            },
        };
        let resolved = resolve(&config, Some("http://from-cli:9090"));
        assert_eq!(resolved.base_url, "http://from-cli:9090");
    }

    #[test]
    fn test_file_value_used_when_no_cli() {
        let config = RegimenConfig {
            server: ServerConfig {
                base_url: Some("http://from-file:8080".to_string()),
            },
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.base_url, "http://from-file:8080");
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let config = RegimenConfig::default();
        let resolved = resolve(&config, Some("http://host:5000/"));
        assert_eq!(resolved.base_url, "http://host:5000");
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config: RegimenConfig = toml::from_str("").unwrap();
        assert!(config.server.base_url.is_none());

        let config: RegimenConfig =
            toml::from_str("[server]\nbase_url = \"http://x:1\"\n").unwrap();
        assert_eq!(config.server.base_url.as_deref(), Some("http://x:1"));
    }
}
