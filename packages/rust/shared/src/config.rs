//! Application configuration for faqbridge.
//!
//! User config lives at `~/.faqbridge/faqbridge.toml`.
//! CLI flags override env vars, which override config file values, which
//! override defaults. The API token is never stored in the file — the config
//! holds the *name* of the env var carrying it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{FaqBridgeError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "faqbridge.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".faqbridge";

/// Env var that overrides `[source] database_id`.
pub const DATABASE_ID_ENV: &str = "FAQBRIDGE_DATABASE_ID";

/// Upstream page-size hard cap (one query returns at most this many records).
pub const PAGE_SIZE_CAP: u32 = 100;

// ---------------------------------------------------------------------------
// Config structs (matching faqbridge.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Upstream document-source settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// HTTP service settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// `[source]` section — where the knowledge records come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the document-source API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Versioned-API header value sent with every query.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Name of the env var holding the API token (never store the token itself).
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Identifier of the source database to query.
    /// Overridden by the `FAQBRIDGE_DATABASE_ID` env var.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_id: Option<String>,

    /// Records per query, clamped to 1..=100 by the upstream page cap.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            token_env: default_token_env(),
            database_id: None,
            page_size: default_page_size(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.notion.com".into()
}
fn default_api_version() -> String {
    "2022-06-28".into()
}
fn default_token_env() -> String {
    "FAQBRIDGE_SOURCE_TOKEN".into()
}
fn default_page_size() -> u32 {
    PAGE_SIZE_CAP
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP service.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Listen port. The `PORT` env var and `--port` flag override this.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    3000
}

impl SourceConfig {
    /// Parse and validate the configured base URL.
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url).map_err(|e| {
            FaqBridgeError::config(format!("invalid source base_url '{}': {e}", self.base_url))
        })
    }

    /// Page size clamped to the upstream cap.
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.clamp(1, PAGE_SIZE_CAP)
    }

    /// Read the API token from the configured env var, if set and non-empty.
    pub fn resolve_token(&self) -> Option<String> {
        std::env::var(&self.token_env).ok().filter(|v| !v.is_empty())
    }

    /// Database id from env override or config, if any.
    pub fn resolve_database_id(&self) -> Option<String> {
        std::env::var(DATABASE_ID_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.database_id.clone())
    }

    /// Whether both credentials needed to query the upstream are present.
    /// Without them the service runs in sample mode rather than failing.
    pub fn is_configured(&self) -> bool {
        self.resolve_token().is_some() && self.resolve_database_id().is_some()
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.faqbridge/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| FaqBridgeError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.faqbridge/faqbridge.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| FaqBridgeError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        FaqBridgeError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| FaqBridgeError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| FaqBridgeError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| FaqBridgeError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("base_url"));
        assert!(toml_str.contains("FAQBRIDGE_SOURCE_TOKEN"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.source.api_version, "2022-06-28");
        assert_eq!(parsed.source.page_size, 100);
        assert_eq!(parsed.server.port, 3000);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[source]
database_id = "d0c5de2d-example"

[server]
port = 8080
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.source.database_id.as_deref(), Some("d0c5de2d-example"));
        assert_eq!(config.source.base_url, "https://api.notion.com");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind, "0.0.0.0");
    }

    #[test]
    fn page_size_clamped_to_upstream_cap() {
        let mut source = SourceConfig::default();
        source.page_size = 500;
        assert_eq!(source.effective_page_size(), 100);
        source.page_size = 0;
        assert_eq!(source.effective_page_size(), 1);
        source.page_size = 25;
        assert_eq!(source.effective_page_size(), 25);
    }

    #[test]
    fn unconfigured_source_is_sample_mode() {
        let mut source = SourceConfig::default();
        // Use a unique env var name to avoid interfering with other tests
        source.token_env = "FAQBRIDGE_TEST_NONEXISTENT_TOKEN_12345".into();
        assert!(source.resolve_token().is_none());
        assert!(!source.is_configured());
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let mut source = SourceConfig::default();
        source.base_url = "not a url".into();
        let err = source.base_url().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }
}
