/// Terminal state of one execution attempt.
///
/// `Completed` and `StartupFailed` both produce a record; `TimedOut` is
/// surfaced to the caller as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Completed {
        exit_code: i32,
        stdout: String,
        stderr: String,
    },
    StartupFailed(String),
    TimedOut,
}

impl ExecutionOutcome {
    /// Record output for this outcome, or `None` for `TimedOut`.
    pub fn record_output(&self) -> Option<String> {
        match self {
            Self::Completed {
                exit_code,
                stdout,
                stderr,
            } => Some(completed_output(*exit_code, stdout, stderr)),
            Self::StartupFailed(msg) => Some(format!("Error executing command: {msg}")),
            Self::TimedOut => None,
        }
    }
}

fn completed_output(exit_code: i32, stdout: &str, stderr: &str) -> String {
    if exit_code == 0 {
        return stdout.to_string();
    }

    let mut out = String::from("Error: ");
    if stderr.is_empty() {
        out.push_str(&format!("Command failed with exit code {exit_code}"));
    } else {
        out.push_str(stderr);
    }
    if !stdout.is_empty() {
        out.push_str("\nOutput: ");
        out.push_str(stdout);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(exit_code: i32, stdout: &str, stderr: &str) -> ExecutionOutcome {
        ExecutionOutcome::Completed {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    #[test]
    fn test_success_is_plain_stdout() {
        assert_eq!(
            completed(0, "hello\n", "ignored warning\n").record_output().unwrap(),
            "hello\n"
        );
        assert_eq!(completed(0, "", "").record_output().unwrap(), "");
    }

    #[test]
    fn test_failure_without_stderr_names_exit_code() {
        assert_eq!(
            completed(2, "", "").record_output().unwrap(),
            "Error: Command failed with exit code 2"
        );
    }

    #[test]
    fn test_failure_prefers_stderr_and_appends_stdout() {
        assert_eq!(
            completed(1, "partial\n", "boom\n").record_output().unwrap(),
            "Error: boom\n\nOutput: partial\n"
        );
        assert_eq!(
            completed(-1, "", "killed\n").record_output().unwrap(),
            "Error: killed\n"
        );
    }

    #[test]
    fn test_startup_failure_is_soft() {
        let out = ExecutionOutcome::StartupFailed("no such file".into())
            .record_output()
            .unwrap();
        assert_eq!(out, "Error executing command: no such file");
    }

    #[test]
    fn test_timeout_has_no_record() {
        assert_eq!(ExecutionOutcome::TimedOut.record_output(), None);
    }
}
