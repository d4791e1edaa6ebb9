//! Package registry abstraction
//!
//! A registry is only consulted for provenance: which source repository a
//! package lives in. A package the registry does not know is a normal
//! outcome (`PackageLookup::NotFound`), not an error.

pub mod rubygems;

pub use rubygems::RubygemsClient;

use crate::config::Config;
use crate::error::{BumperError, BumperResult};

/// Metadata the registry publishes for a package
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageMetadata {
    pub name: String,
    /// Link-valued fields, most authoritative first
    pub urls: Vec<String>,
}

/// Outcome of a registry lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageLookup {
    Found(PackageMetadata),
    NotFound,
}

/// Fetches package metadata from a package registry. Blocking.
pub trait RegistryClient: Send + Sync {
    fn package_metadata(&self, name: &str) -> BumperResult<PackageLookup>;

    /// Human-readable registry name for display
    fn registry_name(&self) -> &'static str;
}

/// Create the registry client for a package manager
pub fn create_registry(
    package_manager: &str,
    config: &Config,
) -> BumperResult<Box<dyn RegistryClient>> {
    match package_manager {
        "bundler" => Ok(Box::new(RubygemsClient::new(&config.registry, &config.http))),
        other => Err(BumperError::UnsupportedPackageManager(other.to_string())),
    }
}
