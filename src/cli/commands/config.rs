//! Config command - show configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::BumperResult;

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    config: &Config,
    manager: &ConfigManager,
) -> BumperResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
    }

    Ok(())
}

fn show_config(config: &Config) -> BumperResult<()> {
    let mut shown = config.clone();
    if shown.github.token.is_some() {
        shown.github.token = Some("<redacted>".to_string());
    }
    println!("{}", toml::to_string_pretty(&shown)?);
    Ok(())
}
