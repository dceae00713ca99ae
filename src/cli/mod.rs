//! CLI command implementations

mod auth;
mod progress;
mod prompt;
mod style;
mod submit;

pub use auth::run_auth;
pub use progress::CliProgress;
pub use prompt::TerminalPrompter;
pub use submit::{SubmitContext, run_submit, run_upload};
