//! rubygems.org registry client

use crate::config::schema::{HttpConfig, RegistryConfig};
use crate::error::{BumperError, BumperResult};
use crate::registry::{PackageLookup, PackageMetadata, RegistryClient};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use ureq::Agent;
use url::Url;

/// Gem fields that may link to the source repository, in search order
#[derive(Debug, Default, Deserialize)]
struct GemResponse {
    name: String,
    #[serde(default)]
    source_code_uri: Option<String>,
    #[serde(default)]
    homepage_uri: Option<String>,
    #[serde(default)]
    wiki_uri: Option<String>,
    #[serde(default)]
    bug_tracker_uri: Option<String>,
    #[serde(default)]
    documentation_uri: Option<String>,
    #[serde(default)]
    changelog_uri: Option<String>,
    #[serde(default)]
    mailing_list_uri: Option<String>,
}

impl From<GemResponse> for PackageMetadata {
    fn from(gem: GemResponse) -> Self {
        let urls = [
            gem.source_code_uri,
            gem.homepage_uri,
            gem.wiki_uri,
            gem.bug_tracker_uri,
            gem.documentation_uri,
            gem.changelog_uri,
            gem.mailing_list_uri,
        ]
        .into_iter()
        .flatten()
        .filter(|u| !u.trim().is_empty())
        .collect();

        Self {
            name: gem.name,
            urls,
        }
    }
}

/// Client for the rubygems.org v1 API
pub struct RubygemsClient {
    agent: Agent,
    base_url: String,
    user_agent: String,
}

impl RubygemsClient {
    pub fn new(registry: &RegistryConfig, http: &HttpConfig) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(http.timeout_secs)))
            .http_status_as_error(false)
            .build();

        Self {
            agent: config.into(),
            base_url: registry.rubygems_url.trim_end_matches('/').to_string(),
            user_agent: http.user_agent.clone(),
        }
    }
}

impl RubygemsClient {
    /// `{base}/api/v1/gems/{name}.json` with the gem name percent-encoded
    fn gem_url(&self, name: &str) -> BumperResult<Url> {
        let invalid = |reason: String| BumperError::InvalidUrl {
            url: self.base_url.clone(),
            reason,
        };

        let file = format!("{name}.json");
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend(["api", "v1", "gems", file.as_str()]);
        Ok(url)
    }
}

impl RegistryClient for RubygemsClient {
    fn package_metadata(&self, name: &str) -> BumperResult<PackageLookup> {
        let url = self.gem_url(name)?;
        debug!("GET {}", url);

        let mut response = self
            .agent
            .get(url.as_str())
            .header("Accept", "application/json")
            .header("User-Agent", &self.user_agent)
            .call()
            .map_err(|e| BumperError::http("fetch gem metadata", e))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| BumperError::http("fetch gem metadata", e))?;

        match status {
            404 => {
                debug!("{} is not on rubygems", name);
                Ok(PackageLookup::NotFound)
            }
            200..=299 => {
                let gem: GemResponse = serde_json::from_str(&body)
                    .map_err(|e| BumperError::malformed("fetch gem metadata", e))?;
                Ok(PackageLookup::Found(gem.into()))
            }
            _ => Err(BumperError::status("fetch gem metadata", status, body)),
        }
    }

    fn registry_name(&self) -> &'static str {
        "rubygems"
    }
}
