//! Source-hosting service abstraction
//!
//! The pull request creator drives a repository through this trait, which
//! keeps it independent of the hosting API and lets tests substitute an
//! in-memory host.

pub mod github;

pub use github::GithubClient;

use crate::error::BumperResult;
use crate::metadata::RepositoryId;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Result of asking the host to create a ref
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefCreation {
    /// The ref did not exist and now points at the requested sha
    Created,
    /// A ref with that name is already present; nothing was changed
    AlreadyExists,
}

/// Content of a file on some ref, plus the blob sha needed to overwrite it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    /// Raw bytes, in whatever encoding the file was committed with
    pub content: Vec<u8>,
    pub sha: String,
}

/// A write of new content to a file on a branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileUpdate {
    #[serde(skip)]
    pub path: String,
    pub message: String,
    /// New content, base64 encoded as the hosting API transmits it
    pub content: String,
    /// Blob sha of the file being replaced
    pub sha: String,
    pub branch: String,
}

impl FileUpdate {
    pub fn new(
        path: impl Into<String>,
        branch: impl Into<String>,
        base_sha: impl Into<String>,
        content: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            content: encode_content(content),
            sha: base_sha.into(),
            branch: branch.into(),
        }
    }
}

/// A pull request to open
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPullRequest {
    pub base: String,
    pub head: String,
    pub title: String,
    pub body: String,
}

/// Host-assigned reference to an opened pull request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestRef {
    pub number: u64,
    pub html_url: String,
}

/// One entry of a repository directory listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// API URL that reads this entry, including its `?ref=` query
    pub url: String,
}

impl DirectoryEntry {
    pub fn is_file(&self) -> bool {
        self.kind == "file"
    }
}

/// Repository operations against a source-hosting service.
///
/// All calls are blocking. Any failure other than the ones modelled in the
/// return types (e.g. `RefCreation::AlreadyExists`) is reported as an error.
pub trait HostClient: Send + Sync {
    /// Name of the repository's default branch
    fn default_branch(&self, repo: &RepositoryId) -> BumperResult<String>;

    /// Head commit sha of `branch`
    fn ref_sha(&self, repo: &RepositoryId, branch: &str) -> BumperResult<String>;

    /// Create `git_ref` (fully qualified, `refs/heads/...`) at `sha`
    fn create_ref(&self, repo: &RepositoryId, git_ref: &str, sha: &str)
        -> BumperResult<RefCreation>;

    /// Read a file and its blob sha as of `git_ref`
    fn file_content(&self, repo: &RepositoryId, path: &str, git_ref: &str)
        -> BumperResult<FileContent>;

    /// Replace a file's content on a branch
    fn put_file_content(&self, repo: &RepositoryId, update: &FileUpdate) -> BumperResult<()>;

    /// Open a pull request
    fn create_pull_request(
        &self,
        repo: &RepositoryId,
        request: &NewPullRequest,
    ) -> BumperResult<PullRequestRef>;

    /// List a directory as of `git_ref`; an empty `path` is the repository root
    fn list_directory(
        &self,
        repo: &RepositoryId,
        path: &str,
        git_ref: &str,
    ) -> BumperResult<Vec<DirectoryEntry>>;
}

/// Encode file content the way it is sent over the wire
pub fn encode_content(content: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(content.as_bytes())
}
