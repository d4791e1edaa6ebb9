//! CLI argument definitions using clap derive

use crate::error::BumperError;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Bumper - dependency bump pull requests
///
/// Opens a pull request that updates manifest files for a new dependency
/// version, with links to the dependency's source, changelog and commits.
#[derive(Parser, Debug)]
#[command(name = "bumper")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "BUMPER_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a pull request bumping a dependency
    Create(CreateArgs),

    /// Show where a dependency's source lives
    Resolve(ResolveArgs),

    /// Show configuration
    Config(ConfigArgs),
}

/// Arguments for the create command
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Target repository (owner/repo)
    #[arg(short, long)]
    pub repo: String,

    /// Dependency name
    #[arg(short, long)]
    pub dependency: String,

    /// Version to bump to
    #[arg(long = "to", value_name = "VERSION")]
    pub target_version: String,

    /// Package manager that owns the dependency
    #[arg(short, long, default_value = "bundler")]
    pub package_manager: String,

    /// Updated file as NAME or NAME=PATH; PATH holds the new content and
    /// defaults to NAME
    #[arg(
        short,
        long = "file",
        value_name = "NAME[=PATH]",
        required = true,
        value_parser = parse_file_arg
    )]
    pub files: Vec<FileArg>,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Dependency name
    pub dependency: String,

    /// Package manager that owns the dependency
    #[arg(short, long, default_value = "bundler")]
    pub package_manager: String,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}

/// A file given on the command line: repository path and local source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileArg {
    pub name: String,
    pub source: PathBuf,
}

fn parse_file_arg(s: &str) -> Result<FileArg, String> {
    let (name, source) = match s.split_once('=') {
        Some((name, path)) => (name, path),
        None => (s, s),
    };

    if name.is_empty() || source.is_empty() {
        return Err(BumperError::InvalidFileArgument(s.to_string()).to_string());
    }

    Ok(FileArg {
        name: name.to_string(),
        source: PathBuf::from(source),
    })
}
