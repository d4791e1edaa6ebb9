//! GitHub REST API host client
//!
//! Blocking client on a `ureq` agent. Status codes are inspected here rather
//! than surfaced as transport errors, so the "reference already exists"
//! response can be told apart from real failures.

use crate::config::schema::{GithubConfig, HttpConfig};
use crate::error::{BumperError, BumperResult};
use crate::host::{
    DirectoryEntry, FileContent, FileUpdate, HostClient, NewPullRequest, PullRequestRef,
    RefCreation,
};
use crate::metadata::RepositoryId;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use ureq::Agent;
use url::Url;

const ACCEPT: &str = "application/vnd.github.v3+json";

/// GitHub answers ref creation for an existing ref with 422 and this message
const REF_EXISTS_MESSAGE: &str = "reference already exists";

/// Host client for github.com or a GitHub Enterprise instance
pub struct GithubClient {
    agent: Agent,
    api_url: String,
    token: String,
    user_agent: String,
}

#[derive(Deserialize)]
struct RepoResponse {
    default_branch: String,
}

#[derive(Deserialize)]
struct RefResponse {
    object: RefObject,
}

#[derive(Deserialize)]
struct RefObject {
    sha: String,
}

#[derive(Deserialize)]
struct ContentResponse {
    sha: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: String,
}

/// A completed request: status and raw body
struct Reply {
    status: u16,
    body: String,
}

impl Reply {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn into_json<T: DeserializeOwned>(self, operation: &str) -> BumperResult<T> {
        if !self.is_success() {
            return Err(BumperError::status(operation, self.status, self.body));
        }
        serde_json::from_str(&self.body).map_err(|e| BumperError::malformed(operation, e))
    }
}

impl GithubClient {
    /// Create a client from configuration and an already-resolved token
    pub fn new(github: &GithubConfig, http: &HttpConfig, token: impl Into<String>) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(http.timeout_secs)))
            .http_status_as_error(false)
            .build();

        Self {
            agent: config.into(),
            api_url: github.api_url.trim_end_matches('/').to_string(),
            token: token.into(),
            user_agent: http.user_agent.clone(),
        }
    }

    /// `{api_url}/repos/{owner}/{name}/{segments..}[?ref=..]`
    ///
    /// Every segment and the ref are percent-encoded, so file paths and
    /// branch names holding `#`, `?` or spaces address the intended resource.
    fn repo_url(
        &self,
        repo: &RepositoryId,
        segments: &[&str],
        git_ref: Option<&str>,
    ) -> BumperResult<Url> {
        let invalid = |reason: String| BumperError::InvalidUrl {
            url: self.api_url.clone(),
            reason,
        };

        let mut url = Url::parse(&self.api_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend(["repos", repo.owner(), repo.name()])
            .extend(segments);
        if let Some(git_ref) = git_ref {
            url.query_pairs_mut().append_pair("ref", git_ref);
        }
        Ok(url)
    }

    /// Contents API URL for a repository-relative path; `""` is the root
    fn contents_url(
        &self,
        repo: &RepositoryId,
        path: &str,
        git_ref: Option<&str>,
    ) -> BumperResult<Url> {
        let mut segments = vec!["contents"];
        segments.extend(path.split('/'));
        self.repo_url(repo, &segments, git_ref)
    }

    fn get(&self, operation: &str, url: &Url) -> BumperResult<Reply> {
        debug!("GET {}", url);
        let response = self
            .agent
            .get(url.as_str())
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", ACCEPT)
            .header("User-Agent", &self.user_agent)
            .call();
        Self::read_reply(operation, response)
    }

    fn send_json(
        &self,
        operation: &str,
        method: &str,
        url: &Url,
        body: &impl serde::Serialize,
    ) -> BumperResult<Reply> {
        debug!("{} {}", method, url);
        let payload = serde_json::to_string(body)?;

        let request = match method {
            "POST" => self.agent.post(url.as_str()),
            "PUT" => self.agent.put(url.as_str()),
            other => return Err(BumperError::Internal(format!("unsupported method {other}"))),
        };

        let response = request
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", ACCEPT)
            .header("User-Agent", &self.user_agent)
            .header("Content-Type", "application/json")
            .send(payload);
        Self::read_reply(operation, response)
    }

    fn read_reply(
        operation: &str,
        response: Result<ureq::http::Response<ureq::Body>, ureq::Error>,
    ) -> BumperResult<Reply> {
        let mut response = response.map_err(|e| BumperError::http(operation, e))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| BumperError::http(operation, e))?;

        debug!("{} -> {}", operation, status);
        Ok(Reply { status, body })
    }
}

impl HostClient for GithubClient {
    fn default_branch(&self, repo: &RepositoryId) -> BumperResult<String> {
        let reply = self.get("get repository", &self.repo_url(repo, &[], None)?)?;
        let parsed: RepoResponse = reply.into_json("get repository")?;
        Ok(parsed.default_branch)
    }

    fn ref_sha(&self, repo: &RepositoryId, branch: &str) -> BumperResult<String> {
        let mut segments = vec!["git", "refs", "heads"];
        segments.extend(branch.split('/'));
        let url = self.repo_url(repo, &segments, None)?;
        let parsed: RefResponse = self.get("get ref", &url)?.into_json("get ref")?;
        Ok(parsed.object.sha)
    }

    fn create_ref(
        &self,
        repo: &RepositoryId,
        git_ref: &str,
        sha: &str,
    ) -> BumperResult<RefCreation> {
        let body = serde_json::json!({ "ref": git_ref, "sha": sha });
        let url = self.repo_url(repo, &["git", "refs"], None)?;
        let reply = self.send_json("create ref", "POST", &url, &body)?;

        if reply.is_success() {
            info!("Created {} at {}", git_ref, sha);
            return Ok(RefCreation::Created);
        }

        if reply.status == 422 {
            let message = serde_json::from_str::<ErrorResponse>(&reply.body)
                .map(|e| e.message)
                .unwrap_or_default();
            if message.to_ascii_lowercase().contains(REF_EXISTS_MESSAGE) {
                debug!("{} already exists in {}", git_ref, repo);
                return Ok(RefCreation::AlreadyExists);
            }
        }

        Err(BumperError::status("create ref", reply.status, reply.body))
    }

    fn file_content(
        &self,
        repo: &RepositoryId,
        path: &str,
        git_ref: &str,
    ) -> BumperResult<FileContent> {
        let url = self.contents_url(repo, path, Some(git_ref))?;
        let parsed: ContentResponse = self
            .get("get file content", &url)?
            .into_json("get file content")?;

        // Content stays raw bytes; manifests are not guaranteed to be UTF-8
        let content = match parsed.encoding.as_deref() {
            Some("base64") => {
                let compact: String = parsed.content.split_whitespace().collect();
                base64::engine::general_purpose::STANDARD
                    .decode(compact)
                    .map_err(|e| BumperError::malformed("get file content", e))?
            }
            _ => parsed.content.into_bytes(),
        };

        Ok(FileContent {
            content,
            sha: parsed.sha,
        })
    }

    fn put_file_content(&self, repo: &RepositoryId, update: &FileUpdate) -> BumperResult<()> {
        let url = self.contents_url(repo, &update.path, None)?;
        let reply = self.send_json("update file", "PUT", &url, update)?;
        if !reply.is_success() {
            return Err(BumperError::status("update file", reply.status, reply.body));
        }
        info!("Committed {} to {}", update.path, update.branch);
        Ok(())
    }

    fn create_pull_request(
        &self,
        repo: &RepositoryId,
        request: &NewPullRequest,
    ) -> BumperResult<PullRequestRef> {
        let reply = self.send_json(
            "create pull request",
            "POST",
            &self.repo_url(repo, &["pulls"], None)?,
            request,
        )?;
        reply.into_json("create pull request")
    }

    fn list_directory(
        &self,
        repo: &RepositoryId,
        path: &str,
        git_ref: &str,
    ) -> BumperResult<Vec<DirectoryEntry>> {
        let url = self.contents_url(repo, path, Some(git_ref))?;
        self.get("list directory", &url)?.into_json("list directory")
    }
}
