//! Dependency and manifest file values handed to the pull request creator

use serde::{Deserialize, Serialize};

/// A dependency to bump: package name, target version and the package
/// manager that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub version: String,
    pub package_manager: String,
}

impl Dependency {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        package_manager: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            package_manager: package_manager.into(),
        }
    }
}

/// A manifest file carrying its already-updated content.
///
/// `name` is the path of the file relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyFile {
    pub name: String,
    pub content: String,
}

impl DependencyFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}
