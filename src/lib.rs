//! Bumper - dependency bump pull requests
//!
//! Opens a pull request that updates manifest files to a new dependency
//! version and links the dependency's source, changelog and commit history
//! as published by its package registry.

pub mod cli;
pub mod config;
pub mod credentials;
pub mod dependency;
pub mod error;
pub mod host;
pub mod metadata;
pub mod pull_request;
pub mod registry;

pub use error::{BumperError, BumperResult};
