//! Resolve command - show a dependency's source links

use crate::cli::args::ResolveArgs;
use crate::config::Config;
use crate::credentials::GithubCredentials;
use crate::dependency::Dependency;
use crate::error::{BumperError, BumperResult};
use crate::host::GithubClient;
use crate::metadata::{find_changelog_url, MetadataResolver, RepositoryId};
use crate::registry::create_registry;
use console::style;

struct Links {
    repository: RepositoryId,
    changelog: Option<String>,
}

/// Execute the resolve command
pub async fn execute(args: ResolveArgs, config: &Config) -> BumperResult<()> {
    // The resolver looks packages up by name only, so no version is needed
    let dependency = Dependency::new(&args.dependency, "", &args.package_manager);
    let registry = create_registry(&dependency.package_manager, config)?;
    let mut resolver = MetadataResolver::new(dependency, registry, config.github.host.clone());

    let token = GithubCredentials::get_token(&config.github).await?;
    let host = GithubClient::new(&config.github, &config.http, token);

    let links = tokio::task::spawn_blocking(move || -> BumperResult<Option<Links>> {
        let Some(repository) = resolver.resolve_repository()? else {
            return Ok(None);
        };
        let changelog = find_changelog_url(&host, &repository)?;
        Ok(Some(Links {
            repository,
            changelog,
        }))
    })
    .await
    .map_err(|e| BumperError::Internal(format!("resolve task failed: {e}")))??;

    let Some(links) = links else {
        println!(
            "{} No {} repository found for {}",
            style("!").yellow(),
            config.github.host,
            style(&args.dependency).cyan()
        );
        return Ok(());
    };

    let domain = &config.github.host;
    println!("{:<12}{}", "repository", links.repository);
    println!("{:<12}{}", "url", links.repository.web_url(domain));
    println!(
        "{:<12}{}",
        "changelog",
        links.changelog.as_deref().unwrap_or("-")
    );
    println!("{:<12}{}", "commits", links.repository.commits_url(domain));

    Ok(())
}
