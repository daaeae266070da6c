//! CLI command handlers. Each command is in its own file.

mod completions;
mod fetch;
mod wait;

pub use completions::run_completions;
pub use fetch::{run_fetch, FetchArgs};
pub use wait::{run_wait, WaitArgs};
