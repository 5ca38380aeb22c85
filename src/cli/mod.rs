//! CLI module for sendr - command-line interface and subcommands.
//!
//! Provides the entry point with subcommands for running a transfer batch
//! and checking the chain configuration.

pub mod commands;

pub use commands::Cli;
