//! GitHub token discovery
//!
//! Checked in order: `github.token` in config, the environment variable named
//! by `github.token_env`, then `gh auth token`.

use crate::config::schema::GithubConfig;
use crate::error::{BumperError, BumperResult};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// GitHub credential provider
pub struct GithubCredentials;

impl GithubCredentials {
    /// Resolve a token for the configured host
    pub async fn get_token(config: &GithubConfig) -> BumperResult<String> {
        if let Some(token) = Self::from_config_or_env(config) {
            return Ok(token);
        }
        Self::from_gh_cli(config).await
    }

    fn from_config_or_env(config: &GithubConfig) -> Option<String> {
        if let Some(token) = config.token.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            debug!("Using GitHub token from config");
            return Some(token.to_string());
        }

        let token = std::env::var(&config.token_env).ok()?;
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        debug!("Using GitHub token from ${}", config.token_env);
        Some(token.to_string())
    }

    async fn from_gh_cli(config: &GithubConfig) -> BumperResult<String> {
        debug!("Getting GitHub token from gh CLI...");

        let mut cmd = Command::new("gh");
        cmd.args(["auth", "token"]);

        if config.host != "github.com" {
            cmd.args(["--hostname", &config.host]);
        }

        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        let output = match cmd.output().await {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("gh CLI not installed");
                return Err(BumperError::GithubNotAuthenticated);
            }
            Err(e) => return Err(BumperError::command_failed("gh auth token", e)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("not logged in") || stderr.contains("gh auth login") {
                return Err(BumperError::GithubNotAuthenticated);
            }
            return Err(BumperError::User(format!(
                "gh auth token failed: {}",
                stderr.trim()
            )));
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();

        if token.is_empty() {
            return Err(BumperError::GithubNotAuthenticated);
        }

        Ok(token)
    }
}
