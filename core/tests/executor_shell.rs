//! Runs real commands through the platform shell.
#![cfg(unix)]

mod common;

use std::time::{Duration, Instant};

use common::{fast_executor, task};
use taskmgr_core::api::{ExecutorError, TaskExecutor, DEFAULT_TIMEOUT_SECS};

#[tokio::test]
async fn echo_output_and_timestamps() {
    let record = TaskExecutor::default()
        .execute(&task("echo", "echo hello"))
        .await
        .unwrap();
    assert_eq!(record.output, "hello\n");
    assert!(record.start_time <= record.end_time);
}

#[tokio::test]
async fn nonzero_exit_with_stderr_uses_stderr() {
    let record = TaskExecutor::default()
        .execute(&task("ls", "ls /definitely/not/here"))
        .await
        .unwrap();
    assert!(record.output.starts_with("Error: "), "{}", record.output);
    assert!(
        !record.output.starts_with("Error: Command failed with exit code"),
        "{}",
        record.output
    );
    assert!(!record.output.contains("\nOutput: "));
}

#[tokio::test]
async fn nonzero_exit_without_stderr_reports_code() {
    let record = TaskExecutor::default()
        .execute(&task("false", "false"))
        .await
        .unwrap();
    assert_eq!(record.output, "Error: Command failed with exit code 1");
}

#[tokio::test]
async fn large_output_does_not_deadlock() {
    // well past a 64 KiB pipe buffer on stdout
    let record = fast_executor(10)
        .execute(&task("big", "seq 1 100000"))
        .await
        .unwrap();
    assert!(record.output.starts_with("1\n2\n3\n"));
    assert!(record.output.ends_with("100000\n"));
}

#[tokio::test]
async fn sleeping_past_deadline_times_out() {
    let started = Instant::now();
    let err = fast_executor(1)
        .execute(&task("sleepy", "sleep 10"))
        .await
        .unwrap_err();
    assert!(matches!(err, ExecutorError::Timeout { secs: 1 }));
    assert!(err.is_hard());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn command_finishing_inside_deadline_is_not_timed_out() {
    let record = fast_executor(5)
        .execute(&task("nap", "sleep 1"))
        .await
        .unwrap();
    assert_eq!(record.output, "");
    assert!(record.duration_ms() >= 900);
}

#[tokio::test]
#[ignore = "waits for the full default deadline"]
async fn default_deadline_is_thirty_seconds() {
    let executor = TaskExecutor::default();
    assert_eq!(executor.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    let err = executor
        .execute(&task("long", "sleep 35"))
        .await
        .unwrap_err();
    assert!(matches!(err, ExecutorError::Timeout { secs: 30 }));
}
