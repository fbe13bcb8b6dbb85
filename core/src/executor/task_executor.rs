use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, info, warn};

use super::io_pump::{join_pump, pump_to_end};
use super::outcome::ExecutionOutcome;
use super::shell::build_command;
use crate::config::ExecutorConfig;
use crate::error::ExecutorError;
use crate::model::{ExecutionRecord, Task};
use crate::validator;

/// Runs task commands. Holds no per-execution state, so one instance is
/// shared by every request.
#[derive(Debug, Clone)]
pub struct TaskExecutor {
    timeout: Duration,
    shell: Option<String>,
}

impl Default for TaskExecutor {
    fn default() -> Self {
        Self::new(&ExecutorConfig::default())
    }
}

impl TaskExecutor {
    pub fn new(cfg: &ExecutorConfig) -> Self {
        Self {
            timeout: Duration::from_secs(cfg.timeout_secs),
            shell: cfg.shell.clone(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = Some(shell.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs `task.command` and returns the record to append to its history.
    ///
    /// The command is validated again here regardless of what was checked at
    /// save time. Spawn and pipe failures come back as `Ok` with the error in
    /// the record output; only rejection and timeout are `Err`.
    pub async fn execute(&self, task: &Task) -> Result<ExecutionRecord, ExecutorError> {
        if let Some(reason) = validator::unsafe_reason(task.command.as_str()) {
            warn!(task_id = %task.id, %reason, "refusing to execute unsafe command");
            return Err(ExecutorError::Rejected(reason));
        }

        let started = Instant::now();
        let start_time = Utc::now();
        let outcome = self.run(&task.command).await;
        let end_time = Utc::now();
        let duration_ms = started.elapsed().as_millis() as u64;

        match &outcome {
            ExecutionOutcome::Completed { exit_code, .. } => {
                info!(task_id = %task.id, exit_code, duration_ms, "task command finished");
            }
            ExecutionOutcome::StartupFailed(msg) => {
                warn!(task_id = %task.id, duration_ms, error = %msg, "task command failed to run");
            }
            ExecutionOutcome::TimedOut => {
                warn!(
                    task_id = %task.id,
                    timeout_secs = self.timeout.as_secs(),
                    "task command timed out and was killed"
                );
            }
        }

        match outcome.record_output() {
            Some(output) => Ok(ExecutionRecord::new(start_time, end_time, output)),
            None => Err(ExecutorError::Timeout {
                secs: self.timeout.as_secs(),
            }),
        }
    }

    async fn run(&self, command: &str) -> ExecutionOutcome {
        match self.spawn_and_collect(command).await {
            Ok(outcome) => outcome,
            Err(ExecutorError::Timeout { .. }) => ExecutionOutcome::TimedOut,
            Err(e) => ExecutionOutcome::StartupFailed(e.to_string()),
        }
    }

    async fn spawn_and_collect(&self, command: &str) -> Result<ExecutionOutcome, ExecutorError> {
        let (program, mut cmd) = build_command(self.shell.as_deref(), command);
        debug!(%program, %command, "spawning task command");

        let mut child = cmd
            .spawn()
            .map_err(|source| ExecutorError::Spawn { program, source })?;

        let stdout = child.stdout.take().ok_or_else(|| missing_pipe("stdout"))?;
        let stderr = child.stderr.take().ok_or_else(|| missing_pipe("stderr"))?;
        let stdout_task = pump_to_end(stdout, "stdout");
        let stderr_task = pump_to_end(stderr, "stderr");
        let stdout_abort = stdout_task.abort_handle();
        let stderr_abort = stderr_task.abort_handle();

        // Exit and both drains share one deadline: a grandchild that keeps a
        // pipe open must not extend the run past the timeout.
        let collected = tokio::time::timeout(self.timeout, async {
            let status = child.wait().await.map_err(ExecutorError::Wait)?;
            let (stdout, stderr) = futures::try_join!(
                join_pump(stdout_task, "stdout"),
                join_pump(stderr_task, "stderr")
            )?;
            Ok::<_, ExecutorError>((status, stdout, stderr))
        })
        .await;

        match collected {
            Ok(Ok((status, stdout, stderr))) => Ok(ExecutionOutcome::Completed {
                // no code means the child was killed by a signal
                exit_code: status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&stdout).into_owned(),
                stderr: String::from_utf8_lossy(&stderr).into_owned(),
            }),
            Ok(Err(e)) => {
                stdout_abort.abort();
                stderr_abort.abort();
                Err(e)
            }
            Err(_) => {
                stdout_abort.abort();
                stderr_abort.abort();
                if let Err(e) = child.kill().await {
                    warn!(error = %e, "failed to kill timed out child");
                }
                Err(ExecutorError::Timeout {
                    secs: self.timeout.as_secs(),
                })
            }
        }
    }
}

fn missing_pipe(stream: &'static str) -> ExecutorError {
    ExecutorError::StreamIo {
        stream,
        source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe not captured"),
    }
}
