//! Pull request creation for a dependency bump
//!
//! A run walks one fixed sequence against the target repository:
//!
//! 1. read the default branch and its head sha
//! 2. create `bump_<name>_to_<version>` at that sha
//! 3. commit each file to the new branch, in order
//! 4. open a pull request from the new branch into the default branch
//!
//! The branch name is derived only from the dependency, so it doubles as an
//! idempotency key: if step 2 finds the branch already there, an earlier run
//! got at least that far and this run stops without writing anything.
//! Nothing is retried or rolled back; a failure part way through leaves what
//! was already written in place.

use crate::dependency::{Dependency, DependencyFile};
use crate::error::BumperResult;
use crate::host::{FileUpdate, HostClient, NewPullRequest, PullRequestRef, RefCreation};
use crate::metadata::{find_changelog_url, MetadataResolver, RepositoryId};
use tracing::{debug, info};

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullRequestOutcome {
    /// Branch, commits and pull request were created
    Created(PullRequestRef),
    /// The bump branch already existed; nothing was written
    Skipped { branch: String },
}

/// Opens a bump pull request on one repository for one dependency
pub struct PullRequestCreator {
    repo: RepositoryId,
    files: Vec<DependencyFile>,
    host: Box<dyn HostClient>,
    resolver: MetadataResolver,
}

impl PullRequestCreator {
    /// `resolver` must be built for the dependency being bumped
    pub fn new(
        repo: RepositoryId,
        files: Vec<DependencyFile>,
        host: Box<dyn HostClient>,
        resolver: MetadataResolver,
    ) -> Self {
        Self {
            repo,
            files,
            host,
            resolver,
        }
    }

    pub fn dependency(&self) -> &Dependency {
        self.resolver.dependency()
    }

    /// Name of the branch this bump is pushed to
    pub fn branch_name(&self) -> String {
        let dep = self.dependency();
        format!("bump_{}_to_{}", dep.name, dep.version)
    }

    pub fn title(&self) -> String {
        let dep = self.dependency();
        format!("Bump {} to {}", dep.name, dep.version)
    }

    /// Run the whole sequence
    pub fn create(&mut self) -> BumperResult<PullRequestOutcome> {
        let default_branch = self.host.default_branch(&self.repo)?;
        let base_sha = self.host.ref_sha(&self.repo, &default_branch)?;
        debug!("{} is at {} ({})", self.repo, default_branch, base_sha);

        let branch = self.branch_name();
        let git_ref = format!("refs/heads/{branch}");
        match self.host.create_ref(&self.repo, &git_ref, &base_sha)? {
            RefCreation::Created => info!("Created branch {} on {}", branch, self.repo),
            RefCreation::AlreadyExists => {
                info!("Branch {} already exists on {}, skipping", branch, self.repo);
                return Ok(PullRequestOutcome::Skipped { branch });
            }
        }

        self.commit_files(&default_branch, &branch)?;

        let request = NewPullRequest {
            base: default_branch,
            head: branch,
            title: self.title(),
            body: self.body()?,
        };
        let pull_request = self.host.create_pull_request(&self.repo, &request)?;
        info!("Opened {}", pull_request.html_url);

        Ok(PullRequestOutcome::Created(pull_request))
    }

    /// Commit each file to `branch`, one at a time.
    ///
    /// Every write is based on the blob sha from the default branch, which is
    /// what the new branch still holds for that path.
    fn commit_files(&self, default_branch: &str, branch: &str) -> BumperResult<()> {
        for file in &self.files {
            let current = self
                .host
                .file_content(&self.repo, &file.name, default_branch)?;
            debug!(
                "{} is {} bytes at {} on {}",
                file.name,
                current.content.len(),
                current.sha,
                default_branch
            );
            let update = FileUpdate::new(
                &file.name,
                branch,
                current.sha,
                &file.content,
                format!("Updating {}", file.name),
            );
            self.host.put_file_content(&self.repo, &update)?;
        }
        Ok(())
    }

    /// Pull request description, linking to the dependency's source when the
    /// registry knows where it lives
    pub fn body(&mut self) -> BumperResult<String> {
        let dep = self.resolver.dependency().clone();
        let domain = self.resolver.domain().to_string();

        let Some(source) = self.resolver.resolve_repository()? else {
            return Ok(format!("Bumps {} to {}", dep.name, dep.version));
        };

        let mut body = format!(
            "Bumps [{}]({}) to {}",
            dep.name,
            source.web_url(&domain),
            dep.version
        );
        if let Some(changelog) = find_changelog_url(self.host.as_ref(), &source)? {
            body.push_str(&format!("\n- [Changelog]({changelog})"));
        }
        body.push_str(&format!("\n- [Commits]({})", source.commits_url(&domain)));

        Ok(body)
    }
}
