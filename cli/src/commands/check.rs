use taskmgr_core::api as core_api;

use crate::commands::cli::CheckArgs;

/// Prints the verdict for one command. Exit code 1 means unsafe.
pub fn handle_check(args: CheckArgs) -> i32 {
    match core_api::unsafe_reason(args.command.as_str()) {
        None => {
            println!("safe");
            0
        }
        Some(reason) => {
            println!("unsafe: {reason}");
            1
        }
    }
}

pub fn handle_examples() -> i32 {
    for example in core_api::safe_command_examples() {
        println!("{example}");
    }
    0
}
