//! # Configuration
//!
//! Centralizes settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.sage/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover the options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SageConfig {
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

/// The backend listens on a fixed local port unless told otherwise.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

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

/// Returns the path to `~/.sage/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".sage").join("config.toml"))
}

/// Load config from `~/.sage/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SageConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<SageConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(SageConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(SageConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: SageConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Sage Configuration
# All settings are optional - defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [backend]
# base_url = "http://localhost:8080"   # Or set SAGE_BASE_URL env var
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

/// Resolve the final config by collapsing: defaults → config file → env → CLI.
///
/// `cli_base_url` comes from the `--base-url` flag (None = not specified).
pub fn resolve(config: &SageConfig, cli_base_url: Option<&str>) -> ResolvedConfig {
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("SAGE_BASE_URL").ok())
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    ResolvedConfig { base_url }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_falls_back_to_the_default_port() {
        let config = SageConfig::default();
        let resolved = resolve(&config, None);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn resolve_prefers_the_config_file_over_defaults() {
        let config = SageConfig {
            backend: BackendConfig {
                base_url: Some("http://10.0.0.2:9000".to_string()),
            },
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.base_url, "http://10.0.0.2:9000");
    }

    #[test]
    fn resolve_cli_flag_wins_over_everything() {
        let config = SageConfig {
            backend: BackendConfig {
                base_url: Some("http://10.0.0.2:9000".to_string()),
            },
        };
        let resolved = resolve(&config, Some("http://127.0.0.1:4000"));
        assert_eq!(resolved.base_url, "http://127.0.0.1:4000");
    }

    #[test]
    fn sparse_toml_parses() {
        let config: SageConfig = toml::from_str("").unwrap();
        assert!(config.backend.base_url.is_none());
    }

    #[test]
    fn toml_backend_section_parses() {
        let toml_str = r#"
[backend]
base_url = "http://192.168.1.10:8080"
"#;
        let config: SageConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.backend.base_url.as_deref(),
            Some("http://192.168.1.10:8080")
        );
    }
}
