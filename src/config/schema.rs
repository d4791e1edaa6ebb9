//! Configuration schema for Bumper
//!
//! Configuration is stored at `~/.config/bumper/config.toml`

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Hosting service settings
    pub github: GithubConfig,

    /// Package registry settings
    pub registry: RegistryConfig,

    /// HTTP client settings
    pub http: HttpConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// GitHub settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// Web domain, used to recognise repository links and build PR links
    pub host: String,

    /// REST API base URL
    pub api_url: String,

    /// Access token. Prefer `token_env` or the gh CLI over storing it here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Environment variable checked for a token
    pub token_env: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            host: "github.com".to_string(),
            api_url: "https://api.github.com".to_string(),
            token: None,
            token_env: "GITHUB_TOKEN".to_string(),
        }
    }
}

/// Package registry endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Base URL of the rubygems API
    pub rubygems_url: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            rubygems_url: "https://rubygems.org".to_string(),
        }
    }
}

/// HTTP client settings shared by every collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Overall per-request timeout
    pub timeout_secs: u64,

    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("bumper/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
