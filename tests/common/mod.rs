//! Common test utilities for eva-sub-cli tests

pub mod fixtures;
pub mod prompter;

// Re-exports for convenience - not all test binaries use all exports
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use prompter::ScriptedPrompter;
