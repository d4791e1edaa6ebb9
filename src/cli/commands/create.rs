//! Create command - open a bump pull request

use crate::cli::args::{CreateArgs, FileArg};
use crate::config::Config;
use crate::credentials::GithubCredentials;
use crate::dependency::{Dependency, DependencyFile};
use crate::error::{BumperError, BumperResult};
use crate::host::GithubClient;
use crate::metadata::{MetadataResolver, RepositoryId};
use crate::pull_request::{PullRequestCreator, PullRequestOutcome};
use crate::registry::create_registry;
use console::style;
use tokio::fs;
use tracing::debug;

/// Execute the create command
pub async fn execute(args: CreateArgs, config: &Config) -> BumperResult<()> {
    let repo = RepositoryId::parse(&args.repo)?;
    let dependency = Dependency::new(&args.dependency, &args.target_version, &args.package_manager);
    let registry = create_registry(&dependency.package_manager, config)?;
    let files = read_files(&args.files).await?;

    let token = GithubCredentials::get_token(&config.github).await?;
    let host = GithubClient::new(&config.github, &config.http, token);
    let resolver = MetadataResolver::new(dependency, registry, config.github.host.clone());
    let mut creator = PullRequestCreator::new(repo.clone(), files, Box::new(host), resolver);

    println!(
        "Bumping {} to {} in {}...",
        style(&args.dependency).cyan(),
        style(&args.target_version).cyan(),
        style(&repo).cyan()
    );

    // The host and registry clients block on network IO
    let outcome = tokio::task::spawn_blocking(move || creator.create())
        .await
        .map_err(|e| BumperError::Internal(format!("pull request task failed: {e}")))??;

    match outcome {
        PullRequestOutcome::Created(pr) => println!(
            "{} Opened pull request #{}: {}",
            style("✓").green(),
            pr.number,
            style(&pr.html_url).underlined()
        ),
        PullRequestOutcome::Skipped { branch } => println!(
            "{} Branch {} already exists, nothing to do",
            style("!").yellow(),
            style(&branch).cyan()
        ),
    }

    Ok(())
}

async fn read_files(args: &[FileArg]) -> BumperResult<Vec<DependencyFile>> {
    let mut files = Vec::with_capacity(args.len());
    for arg in args {
        debug!("Reading {} from {}", arg.name, arg.source.display());
        let content = fs::read_to_string(&arg.source).await.map_err(|e| {
            BumperError::io(format!("reading {}", arg.source.display()), e)
        })?;
        files.push(DependencyFile::new(&arg.name, content));
    }
    Ok(files)
}
