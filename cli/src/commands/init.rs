//! Default configuration writer
use std::path::{Path, PathBuf};

use crate::commands::cli::InitArgs;
use taskmgr_core::api as core_api;

/// Handle init command
pub fn handle_init(args: InitArgs) -> Result<(), core_api::CliError> {
    let data_dir = core_api::get_taskmgr_data_dir()?;
    let provider = parse_provider(&args.store)?;

    match write_default_config(&data_dir, provider, args.force)? {
        Some(path) => {
            println!("Configuration written to: {}", path.display());
            println!("Start the API with: taskmgr serve");
        }
        None => {
            println!(
                "Configuration file already exists at: {}",
                data_dir.join("config.toml").display()
            );
            println!("Pass --force to overwrite it.");
        }
    }
    Ok(())
}

fn parse_provider(raw: &str) -> Result<core_api::StoreProvider, core_api::CliError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "memory" => Ok(core_api::StoreProvider::Memory),
        "file" => Ok(core_api::StoreProvider::File),
        other => Err(core_api::CliError::Command(format!(
            "Unknown store provider: {other}. Use 'memory' or 'file'."
        ))),
    }
}

/// Returns `None` when a config already exists and `force` is off.
fn write_default_config(
    data_dir: &Path,
    provider: core_api::StoreProvider,
    force: bool,
) -> Result<Option<PathBuf>, core_api::CliError> {
    let config_path = data_dir.join("config.toml");
    if config_path.exists() && !force {
        return Ok(None);
    }

    let mut cfg = core_api::AppConfig::default();
    cfg.store.provider = provider;
    if provider == core_api::StoreProvider::File {
        cfg.store.path = data_dir.join("tasks.json").to_string_lossy().to_string();
    }

    let content = toml::to_string_pretty(&cfg)
        .map_err(|e| core_api::CliError::Config(format!("Failed to render configuration: {e}")))?;

    std::fs::create_dir_all(data_dir).map_err(|e| {
        core_api::CliError::Command(format!("Failed to create taskmgr directory: {e}"))
    })?;
    std::fs::write(&config_path, content).map_err(|e| {
        core_api::CliError::Command(format!("Failed to write configuration: {e}"))
    })?;

    Ok(Some(config_path))
}
