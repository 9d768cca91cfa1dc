// gha-bump - Upgrade pinned actions in GitHub Actions workflows
// License: Apache-2.0

pub mod bump;
pub mod config;
pub mod logger;
pub mod resolver;
pub mod rewrite;
pub mod scan;
pub mod workflow;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
