#[allow(clippy::module_inception)]
pub mod error;
pub mod executor;

pub use error::{CliError, TaskError};
pub use executor::ExecutorError;
