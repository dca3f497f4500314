//! Command dispatch
//!
//! Each subcommand loads settings, builds the service container and reports
//! through `cli::output`. Errors bubble up as `CliError` for `main` to map
//! onto an exit code.

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::CliResult;
use crate::config::{global_config_path, Settings};
use crate::domain::Leaf;
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Copy { source, dest } => _copy(&container(cli)?, source, dest),
        Commands::Get {
            uri,
            path,
            separator,
        } => _get(&container(cli)?, uri, path, *separator),
        Commands::Dump {
            uri,
            path,
            separator,
            tree,
        } => _dump(&container(cli)?, uri, path, *separator, *tree),
        Commands::Config { command } => _config(&container(cli)?, command),
        Commands::Completion { shell } => _completion(*shell),
    }
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    Ok(ServiceContainer::new(settings))
}

#[instrument(skip(container))]
fn _copy(container: &ServiceContainer, source: &str, dest: &str) -> CliResult<()> {
    let report = container.copy.copy_uris(source, dest)?;
    output::success(&format!("copied {} values from {} to {}", report.copied, source, dest));
    Ok(())
}

#[instrument(skip(container))]
fn _get(
    container: &ServiceContainer,
    uri: &str,
    path: &str,
    separator: Option<char>,
) -> CliResult<()> {
    let mut configuration = container.factory.get_configuration(uri)?;
    if let Some(separator) = separator {
        configuration.set_path_separator(separator);
    }
    let value: Leaf = configuration.get_required(path)?;
    debug!("value: {:?}", value);
    output::info(&value.to_flat_string());
    Ok(())
}

#[instrument(skip(container))]
fn _dump(
    container: &ServiceContainer,
    uri: &str,
    path: &str,
    separator: Option<char>,
    tree: bool,
) -> CliResult<()> {
    let mut configuration = container.factory.get_configuration(uri)?;
    if let Some(separator) = separator {
        configuration.set_path_separator(separator);
    }

    if tree {
        let node = configuration.get_recursive(path)?;
        let label = if path.is_empty() {
            uri.to_string()
        } else {
            format!("{uri} {path}")
        };
        output::info(&node.to_tree_string(&label));
        return Ok(());
    }

    let entries = configuration.get_recursive_map(path)?;
    debug!("entries: {}", entries.len());
    for (key, value) in &entries {
        output::entry(key, value);
    }
    Ok(())
}

#[instrument(skip(container))]
fn _config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::error("cannot determine config directory"),
        },
    }
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
