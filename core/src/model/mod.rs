mod task;
pub mod time_format;

pub use task::{ExecutionRecord, Task, TaskCreateRequest};
