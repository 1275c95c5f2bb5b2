//! CLI subcommands.

pub mod audit;
pub mod batch;
pub mod config;
pub mod extract;
