//! CLI command handlers. Each command is in its own file.

mod build;
mod config;

pub use build::{run_build, BuildArgs};
pub use config::run_config;
