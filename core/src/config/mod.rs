mod load;
mod types;

pub use load::{apply_env_overrides, get_taskmgr_data_dir, load_default, load_from};
pub use types::{
    AppConfig, ExecutorConfig, HttpServerConfig, LoggingConfig, StoreConfig, StoreProvider,
    DEFAULT_TIMEOUT_SECS,
};
