//! Locate a dependency's changelog in its source repository

use crate::error::BumperResult;
use crate::host::{DirectoryEntry, HostClient};
use crate::metadata::RepositoryId;
use tracing::debug;

/// File stems recognised as a changelog, most common first
const CHANGELOG_STEMS: &[&str] = &["changelog", "changes", "history", "news", "releases"];

/// API URL of the changelog at the root of `repo`'s default branch.
///
/// Returns `None` when the root holds no changelog-like file. Host failures
/// propagate.
pub fn find_changelog_url(
    host: &dyn HostClient,
    repo: &RepositoryId,
) -> BumperResult<Option<String>> {
    let branch = host.default_branch(repo)?;
    let entries = host.list_directory(repo, "", &branch)?;

    let found = pick_changelog(&entries);
    match found {
        Some(entry) => debug!("Changelog for {} is {}", repo, entry.name),
        None => debug!("No changelog in {}", repo),
    }
    Ok(found.map(|entry| entry.url.clone()))
}

fn pick_changelog(entries: &[DirectoryEntry]) -> Option<&DirectoryEntry> {
    CHANGELOG_STEMS.iter().find_map(|stem| {
        entries
            .iter()
            .filter(|entry| entry.is_file())
            .find(|entry| file_stem(&entry.name).eq_ignore_ascii_case(stem))
    })
}

fn file_stem(name: &str) -> &str {
    match name.split_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}
