use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use tikwm_config::{CliConfig, ConfigLoader, PathResolver};

use crate::cli::{ConfigCommands, GlobalFlags};
use crate::output::output;

#[derive(Debug, Serialize)]
struct PathReport {
    config_file: String,
    exists: bool,
}

#[derive(Debug, Serialize)]
struct InitReport {
    config_file: String,
    created: bool,
    targets_file: String,
    targets_file_present: bool,
    warnings: Vec<String>,
}

/// Handle `tikwm config`.
pub fn handle(action: &ConfigCommands, flags: &GlobalFlags) -> anyhow::Result<()> {
    let loader = ConfigLoader::platform();
    let explicit = flags.config.as_deref();

    match action {
        ConfigCommands::Path => output(&path_report(&loader, explicit)?, flags.format),
        ConfigCommands::Show => output(&load(&loader, explicit)?, flags.format),
        ConfigCommands::Init => output(&init(&loader, explicit)?, flags.format),
    }
}

fn path_report<R: PathResolver>(
    loader: &ConfigLoader<R>,
    explicit: Option<&Path>,
) -> anyhow::Result<PathReport> {
    let path = loader
        .config_path(explicit)
        .context("failed to resolve config file location")?;
    Ok(PathReport {
        config_file: path.display().to_string(),
        exists: path.exists(),
    })
}

fn load<R: PathResolver>(
    loader: &ConfigLoader<R>,
    explicit: Option<&Path>,
) -> anyhow::Result<CliConfig> {
    loader
        .load(explicit)
        .context("failed to load tikwm configuration")
}

fn init<R: PathResolver>(
    loader: &ConfigLoader<R>,
    explicit: Option<&Path>,
) -> anyhow::Result<InitReport> {
    let config_path = loader
        .config_path(explicit)
        .context("failed to resolve config file location")?;
    let existed = config_path.exists();

    let (config, warnings) = loader
        .load_with_warnings(explicit)
        .context("failed to load tikwm configuration")?;
    tracing::debug!(
        config_file = %config_path.display(),
        targets_file = %config.targets_file,
        "configuration initialized"
    );

    let targets_file_present = Path::new(&config.targets_file).exists();
    Ok(InitReport {
        config_file: config_path.display().to_string(),
        created: !existed,
        targets_file: config.targets_file,
        targets_file_present,
        warnings: warnings.iter().map(ToString::to_string).collect(),
    })
}
