use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub http_server: HttpServerConfig,

    #[serde(default)]
    pub executor: ExecutorConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "taskmgr_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_file() -> bool {
    false
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "default_http_host")]
    pub host: String,

    #[serde(default = "default_http_port")]
    pub port: u16,
}

fn default_http_host() -> String {
    "127.0.0.1".to_string()
}

fn default_http_port() -> u16 {
    8080
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_http_host(),
            port: default_http_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Wall-clock limit per execution, measured from spawn.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Shell program used to run task commands. Unset means `sh` on unix and
    /// `cmd` elsewhere.
    #[serde(default)]
    pub shell: Option<String>,
}

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            shell: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub provider: StoreProvider,

    /// JSON document file for the `file` provider. Relative paths resolve
    /// against the working directory; empty means `~/.taskmgr/tasks.json`.
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    #[default]
    Memory,
    File,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.http_server.port, 8080);
        assert_eq!(cfg.http_server.host, "127.0.0.1");
        assert_eq!(cfg.executor.timeout_secs, 30);
        assert!(cfg.executor.shell.is_none());
        assert_eq!(cfg.store.provider, StoreProvider::Memory);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [executor]
            timeout_secs = 5

            [store]
            provider = "file"
            path = "/var/lib/taskmgr/tasks.json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.executor.timeout_secs, 5);
        assert_eq!(cfg.store.provider, StoreProvider::File);
        assert_eq!(cfg.store.path, "/var/lib/taskmgr/tasks.json");
        assert_eq!(cfg.http_server.port, 8080);
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let res = toml::from_str::<AppConfig>("[store]\nprovider = \"mongo\"\n");
        assert!(res.is_err());
    }
}
