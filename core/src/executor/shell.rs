use std::process::Stdio;

use tokio::process::Command;

/// Shell program and the flag that makes it run a command string.
#[cfg(unix)]
pub fn platform_shell() -> (&'static str, &'static str) {
    ("sh", "-c")
}

#[cfg(not(unix))]
pub fn platform_shell() -> (&'static str, &'static str) {
    ("cmd", "/C")
}

/// Builds `<shell> <flag> <command>` with both output streams piped and no
/// stdin. The child is killed if the handle is dropped before it exits.
pub fn build_command(shell_override: Option<&str>, command: &str) -> (String, Command) {
    let (default_shell, flag) = platform_shell();
    let program = shell_override
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default_shell)
        .to_string();

    let mut cmd = Command::new(&program);
    cmd.arg(flag)
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    (program, cmd)
}
