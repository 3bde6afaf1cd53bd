//! CLI subcommand implementations.

pub mod browse;
pub mod categories;
pub mod detail;
pub mod open;
