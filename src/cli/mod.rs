//! CLI module for evogate - command-line interface and subcommands.
//!
//! Lists the endpoint catalog and generated tools, validates the catalog and
//! invokes single tools against the configured Evolution server.

pub mod commands;

pub use commands::Cli;
