use thiserror::Error;

use crate::validator::UnsafeReason;

/// Errors raised while running a task command.
///
/// Only `Rejected` and `Timeout` leave [`crate::executor::TaskExecutor::execute`];
/// the I/O variants are rendered into the execution record output.
#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("Cannot execute unsafe command: {0}")]
    Rejected(UnsafeReason),

    #[error("Command execution timed out after {secs} seconds")]
    Timeout { secs: u64 },

    #[error("Cannot run program \"{program}\": {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("stream io error: {stream} {source}")]
    StreamIo {
        stream: &'static str,
        source: std::io::Error,
    },

    #[error("wait failed: {0}")]
    Wait(std::io::Error),
}

impl ExecutorError {
    /// Hard failures abort the execution request instead of producing a record.
    pub fn is_hard(&self) -> bool {
        matches!(self, Self::Rejected(_) | Self::Timeout { .. })
    }
}
