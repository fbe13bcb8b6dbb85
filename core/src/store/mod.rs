pub mod r#trait;

pub use r#trait::{name_matches, TaskStore};
