//! CLI command implementations.

pub mod config;
pub mod exec;
pub mod repl;
pub mod run;
pub mod version;
