//! CLI subcommand implementations.

pub mod eval;
pub mod info;
