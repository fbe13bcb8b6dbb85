use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default taskmgr data directory: ~/.taskmgr
pub fn get_taskmgr_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".taskmgr"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.taskmgr/config.toml (highest)
    let data_dir = get_taskmgr_data_dir()?;
    let home_config = data_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg = if home_config.exists() {
        load_from(&home_config)?
    } else if local_config.exists() {
        load_from(local_config)?
    } else {
        AppConfig::default()
    };

    if cfg.store.path.trim().is_empty() {
        cfg.store.path = data_dir.join("tasks.json").to_string_lossy().to_string();
    }

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;
    Ok(cfg)
}

pub fn load_from(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)?;
    toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))
}

/// Environment variable overrides (Priority 0: highest). Blank values are
/// ignored.
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("TASKMGR_HOST") {
        cfg.http_server.host = v;
    }
    if let Some(v) = get("TASKMGR_PORT") {
        cfg.http_server.port = v
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("TASKMGR_PORT={v}: {e}"))?;
    }
    if let Some(v) = get("TASKMGR_STORE_PATH") {
        cfg.store.path = v;
    }
    if let Some(v) = get("TASKMGR_EXEC_TIMEOUT_SECS") {
        cfg.executor.timeout_secs = v
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("TASKMGR_EXEC_TIMEOUT_SECS={v}: {e}"))?;
    }

    Ok(())
}
