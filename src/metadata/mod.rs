//! Dependency provenance: where a package's source lives
//!
//! `MetadataResolver` maps a dependency to its hosting-service repository
//! through a registry lookup and remembers the answer for its lifetime.

pub mod changelog;
mod repository;

pub use changelog::find_changelog_url;
pub use repository::RepositoryId;

use crate::dependency::Dependency;
use crate::error::BumperResult;
use crate::registry::{PackageLookup, RegistryClient};
use tracing::debug;

/// Resolves one dependency to its source repository.
///
/// Only the dependency's name is looked up; its version plays no part, so a
/// resolver built for any version of a package answers the same.
///
/// The first successful resolution, including "no repository", is stored in
/// a single slot and returned on every later call without touching the
/// registry again. A failed lookup is not stored. The slot is only written
/// through `&mut self`, so a resolver has one owner and is not shared
/// between threads.
pub struct MetadataResolver {
    dependency: Dependency,
    registry: Box<dyn RegistryClient>,
    domain: String,
    repository: Option<Option<RepositoryId>>,
}

impl MetadataResolver {
    /// `domain` is the web domain of the hosting service, e.g. `github.com`
    pub fn new(
        dependency: Dependency,
        registry: Box<dyn RegistryClient>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            dependency,
            registry,
            domain: domain.into(),
            repository: None,
        }
    }

    pub fn dependency(&self) -> &Dependency {
        &self.dependency
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Repository the dependency's source lives in, if the registry says so
    pub fn resolve_repository(&mut self) -> BumperResult<Option<RepositoryId>> {
        if let Some(cached) = &self.repository {
            return Ok(cached.clone());
        }

        let resolved = self.lookup()?;
        self.repository = Some(resolved.clone());
        Ok(resolved)
    }

    fn lookup(&self) -> BumperResult<Option<RepositoryId>> {
        let name = &self.dependency.name;
        debug!("Looking up {} on {}", name, self.registry.registry_name());

        let metadata = match self.registry.package_metadata(name)? {
            PackageLookup::Found(metadata) => metadata,
            PackageLookup::NotFound => {
                debug!("{} not found on {}", name, self.registry.registry_name());
                return Ok(None);
            }
        };

        let repository = metadata
            .urls
            .iter()
            .find_map(|url| RepositoryId::from_url(url, &self.domain));

        match &repository {
            Some(repo) => debug!("{} resolved to {}", metadata.name, repo),
            None => debug!("{} has no {} link", metadata.name, self.domain),
        }
        Ok(repository)
    }
}
