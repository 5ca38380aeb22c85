//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - run: submit a batch of transfers
//! - check: validate the chain config without submitting anything

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// sendr - repeated cross-chain transfer submission
#[derive(Parser, Debug)]
#[command(name = "sendr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional chain config file path (defaults to ./chain.json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a batch of transfers
    Run {
        /// Token amount per transfer (e.g. 1.5); prompted when omitted
        #[arg(short, long)]
        amount: Option<Decimal>,

        /// Number of transfers to submit; prompted when omitted
        #[arg(short, long)]
        iterations: Option<u32>,
    },

    /// Validate the chain config and signer credential, submit nothing
    Check,
}
