//! `owner/repo` identifiers and their extraction from registry URLs

use crate::error::{BumperError, BumperResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// A hosting-service repository identifier of the form `owner/repo`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryId {
    owner: String,
    name: String,
}

impl RepositoryId {
    /// Parse `owner/repo`. Exactly one slash, both halves non-empty.
    pub fn parse(raw: &str) -> BumperResult<Self> {
        let invalid = || BumperError::InvalidRepository(raw.to_string());

        let (owner, name) = raw.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Extract a repository from a URL pointing at `domain`.
    ///
    /// Takes the first two path segments and strips a single trailing `.git`
    /// from the second. Anything else about the name is kept verbatim, so
    /// `business.rb.git` becomes `business.rb`.
    pub fn from_url(raw: &str, domain: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        // Registries often carry scheme-less links like `github.com/foo/bar`
        let url = Url::parse(raw)
            .ok()
            .filter(|u| u.has_host())
            .or_else(|| Url::parse(&format!("https://{raw}")).ok())?;

        let host = url.host_str()?;
        let domain = domain.to_ascii_lowercase();
        if host != domain && host.strip_prefix("www.") != Some(domain.as_str()) {
            return None;
        }

        let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
        let owner = segments.next()?;
        let name = segments.next()?;
        let name = name.strip_suffix(".git").unwrap_or(name);

        if name.is_empty() {
            return None;
        }

        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Browser URL of the repository on `domain`
    pub fn web_url(&self, domain: &str) -> String {
        format!("https://{}/{}", domain, self)
    }

    /// Browser URL of the repository's commit history on `domain`
    pub fn commits_url(&self, domain: &str) -> String {
        format!("{}/commits", self.web_url(domain))
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepositoryId {
    type Err = BumperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RepositoryId {
    type Error = BumperError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RepositoryId> for String {
    fn from(value: RepositoryId) -> Self {
        value.to_string()
    }
}
