//! Error types for Bumper
//!
//! All modules use `BumperResult<T>` as their return type.
//!
//! A package missing from its registry and a bump branch that already exists
//! are outcomes, not errors; neither appears here.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Bumper operations
pub type BumperResult<T> = Result<T, BumperError>;

/// All errors that can occur in Bumper
#[derive(Error, Debug)]
pub enum BumperError {
    // Transport errors
    #[error("HTTP request failed: {context}")]
    Http {
        context: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("{operation} returned HTTP {status}: {body}")]
    UnexpectedStatus {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("Malformed response from {context}: {reason}")]
    MalformedResponse { context: String, reason: String },

    #[error("Invalid API URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    // Input errors
    #[error("Unsupported package manager: {0}. Supported: bundler")]
    UnsupportedPackageManager(String),

    #[error("Invalid repository identifier {0:?}, expected owner/repo")]
    InvalidRepository(String),

    #[error("Invalid file argument {0:?}, expected NAME or NAME=PATH")]
    InvalidFileArgument(String),

    // Credential errors
    #[error("GitHub token not found. Set GITHUB_TOKEN or run: gh auth login")]
    GithubNotAuthenticated,

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl BumperError {
    /// Create an HTTP transport error with context
    pub fn http(context: impl Into<String>, source: ureq::Error) -> Self {
        Self::Http {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Create an unexpected-status error
    pub fn status(operation: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            operation: operation.into(),
            status,
            body: body.into(),
        }
    }

    /// Create a malformed-response error
    pub fn malformed(context: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedResponse {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::GithubNotAuthenticated => Some("Run: gh auth login"),
            Self::UnexpectedStatus { status: 401, .. } => {
                Some("Check that the GitHub token is valid and not expired")
            }
            Self::UnexpectedStatus { status: 403 | 404, .. } => {
                Some("Check that the GitHub token can write to the target repository")
            }
            Self::UnsupportedPackageManager(_) => Some("Use: --package-manager bundler"),
            Self::InvalidUrl { .. } => {
                Some("Check github.api_url and registry.rubygems_url in the config file")
            }
            _ => None,
        }
    }
}
