//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tourdesk/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TourdeskConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub base_url: Option<String>,
    pub page_size: Option<u64>,
    pub download_dir: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    pub file: Option<PathBuf>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_PAGE_SIZE: u64 = 10;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub page_size: u64,
    pub download_dir: PathBuf,
    pub request_timeout: Option<Duration>,
    pub session_file: PathBuf,
}

/// Values given on the command line. `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub page_size: Option<u64>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.tourdesk`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tourdesk"))
}

/// Returns the path to `~/.tourdesk/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.tourdesk/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TourdeskConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TourdeskConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(TourdeskConfig::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<TourdeskConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(TourdeskConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: TourdeskConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG: &str = r#"# Tourdesk Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# base_url = "http://localhost:5000/api"   # Or set TOURDESK_BASE_URL
# page_size = 10                           # Or set TOURDESK_PAGE_SIZE
# download_dir = "/home/me/Downloads"      # Where monthly CSV exports land
# request_timeout_secs = 30                # Unset = no timeout

# [session]
# file = "/home/me/.tourdesk/session.json"
"#;

fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TourdeskConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &TourdeskConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("TOURDESK_BASE_URL"))
        .or_else(|| config.general.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Page size: CLI → env → config → default
    let env_page_size = env("TOURDESK_PAGE_SIZE").and_then(|v| match v.parse::<u64>() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!("Ignoring TOURDESK_PAGE_SIZE={:?}: {}", v, e);
            None
        }
    });
    let page_size = cli
        .page_size
        .or(env_page_size)
        .or(config.general.page_size)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .max(1);

    let download_dir = config
        .general
        .download_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let session_file = config
        .session
        .file
        .clone()
        .or_else(|| config_dir().map(|d| d.join("session.json")))
        .unwrap_or_else(|| PathBuf::from("session.json"));

    ResolvedConfig {
        base_url,
        page_size,
        download_dir,
        request_timeout: config.general.request_timeout_secs.map(Duration::from_secs),
        session_file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = TourdeskConfig::default();
        assert!(config.general.base_url.is_none());
        assert!(config.session.file.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&TourdeskConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(resolved.download_dir, PathBuf::from("."));
        assert_eq!(resolved.request_timeout, None);
        assert!(resolved.session_file.ends_with("session.json"));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = TourdeskConfig {
            general: GeneralConfig {
                base_url: Some("https://api.example.com".to_string()),
                page_size: Some(25),
                download_dir: Some(PathBuf::from("/tmp/exports")),
                request_timeout_secs: Some(15),
            },
            session: SessionConfig {
                file: Some(PathBuf::from("/tmp/token.json")),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, "https://api.example.com");
        assert_eq!(resolved.page_size, 25);
        assert_eq!(resolved.download_dir, PathBuf::from("/tmp/exports"));
        assert_eq!(resolved.request_timeout, Some(Duration::from_secs(15)));
        assert_eq!(resolved.session_file, PathBuf::from("/tmp/token.json"));
    }

    #[test]
    fn test_env_beats_file_and_cli_beats_env() {
        let config = TourdeskConfig {
            general: GeneralConfig {
                base_url: Some("http://file".to_string()),
                page_size: Some(5),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "TOURDESK_BASE_URL" => Some("http://env".to_string()),
            "TOURDESK_PAGE_SIZE" => Some("20".to_string()),
            _ => None,
        };

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.base_url, "http://env");
        assert_eq!(resolved.page_size, 20);

        let cli = CliOverrides {
            base_url: Some("http://cli".to_string()),
            page_size: Some(50),
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.base_url, "http://cli");
        assert_eq!(resolved.page_size, 50);
    }

    #[test]
    fn test_bad_env_page_size_falls_through() {
        let env = |key: &str| (key == "TOURDESK_PAGE_SIZE").then(|| "many".to_string());
        let resolved = resolve_with_env(&TourdeskConfig::default(), &CliOverrides::default(), env);
        assert_eq!(resolved.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[general]
page_size = 30
"#;
        let config: TourdeskConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.page_size, Some(30));
        assert!(config.general.base_url.is_none());
        assert!(config.session.file.is_none());
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.general.base_url.is_none());

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("# base_url"));
        // The generated file is entirely commented out, so it parses empty.
        let reparsed = load_config_from(&path).unwrap();
        assert!(reparsed.general.page_size.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\nbase_url = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }
}
