//! Static command safety check.
//!
//! This is plain string matching against a denylist of program names and
//! shell metacharacters. It does not parse shell syntax, so unknown binaries
//! and obfuscated invocations pass. Callers must not treat it as a sandbox.

use std::collections::HashSet;
use std::fmt;

use lazy_static::lazy_static;

const DENYLISTED_PROGRAMS: &[&str] = &[
    // file system
    "rm", "rmdir", "del", "delete", "format",
    // network
    "wget", "curl", "nc", "netcat", "telnet",
    // privileges
    "sudo", "su", "chmod", "chown", "passwd",
    // processes
    "kill", "killall", "pkill",
    // archives
    "tar", "zip", "unzip", "gzip", "gunzip",
    // interpreters
    "bash", "sh", "zsh", "fish", "csh", "tcsh",
    "python", "python3", "perl", "ruby", "node", "java",
    // databases
    "mysql", "psql", "mongo", "redis-cli",
    // sensitive files
    "shadow", "hosts",
];

/// Checked in order; the first match is the reported one.
pub const DENYLISTED_PATTERNS: &[&str] = &[
    "|", "&&", "||", ";", "`", "$(", ">", ">>", "<", "<<", "&", "!", "*", "?",
];

const SAFE_COMMAND_EXAMPLES: &[&str] = &[
    "echo Hello World",
    "date",
    "whoami",
    "pwd",
    "ls",
    "cat filename.txt",
    "head filename.txt",
    "tail filename.txt",
    "wc filename.txt",
    "sleep 5",
];

lazy_static! {
    static ref PROGRAM_DENYLIST: HashSet<&'static str> =
        DENYLISTED_PROGRAMS.iter().copied().collect();
}

/// Why a command was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsafeReason {
    Blank,
    Program(&'static str),
    Pattern(&'static str),
}

impl fmt::Display for UnsafeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => f.write_str("Command is null or empty"),
            Self::Program(p) => write!(f, "Command contains dangerous operation: {p}"),
            Self::Pattern(p) => write!(f, "Command contains dangerous pattern: {p}"),
        }
    }
}

pub fn is_safe<'a>(command: impl Into<Option<&'a str>>) -> bool {
    unsafe_reason(command).is_none()
}

/// Returns `None` exactly when [`is_safe`] would return `true`.
pub fn unsafe_reason<'a>(command: impl Into<Option<&'a str>>) -> Option<UnsafeReason> {
    let command = match command.into() {
        Some(c) if !trim_blank(c).is_empty() => c,
        _ => return Some(UnsafeReason::Blank),
    };

    let normalized = trim_blank(command).to_lowercase();
    // "equals name" or "starts with name + ' '" both reduce to: the text
    // before the first space is the name.
    let head = normalized
        .split_once(' ')
        .map_or(normalized.as_str(), |(head, _)| head);
    if let Some(program) = PROGRAM_DENYLIST.get(head) {
        return Some(UnsafeReason::Program(*program));
    }

    DENYLISTED_PATTERNS
        .iter()
        .find(|p| command.contains(*p))
        .map(|p| UnsafeReason::Pattern(*p))
}

pub fn safe_command_examples() -> &'static [&'static str] {
    SAFE_COMMAND_EXAMPLES
}

/// Strips leading and trailing ASCII control characters and spaces.
fn trim_blank(s: &str) -> &str {
    s.trim_matches(|c: char| c <= ' ')
}
