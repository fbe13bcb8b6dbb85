//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `taskmgr_core::api` instead of reaching into internal modules.

pub use crate::config::{
    get_taskmgr_data_dir, load_default, AppConfig, ExecutorConfig, HttpServerConfig,
    LoggingConfig, StoreConfig, StoreProvider, DEFAULT_TIMEOUT_SECS,
};
pub use crate::context::{AppContext, Services, ServicesFactory};
pub use crate::error::{CliError, ExecutorError, TaskError};
pub use crate::executor::{ExecutionOutcome, TaskExecutor};
pub use crate::model::{ExecutionRecord, Task, TaskCreateRequest};
pub use crate::service::TaskService;
pub use crate::store::{name_matches, TaskStore};
pub use crate::validator::{is_safe, safe_command_examples, unsafe_reason, UnsafeReason};
