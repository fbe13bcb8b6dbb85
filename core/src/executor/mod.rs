//! Runs a task's command through the platform shell under a hard deadline.
//!
//! ```text
//! Task
//!   ↓ validator::unsafe_reason()      → Rejected (hard, nothing spawned)
//! spawn `sh -c <command>`            → StartupFailed (soft record)
//!   ├─ pump stdout ─┐
//!   ├─ pump stderr ─┤  bounded together by the timeout
//!   └─ wait() ──────┘                 → TimedOut (hard, child killed)
//!   ↓
//! Completed { exit_code, stdout, stderr } → ExecutionRecord
//! ```

mod io_pump;
mod outcome;
mod shell;
mod task_executor;

pub use outcome::ExecutionOutcome;
pub use shell::platform_shell;
pub use task_executor::TaskExecutor;
