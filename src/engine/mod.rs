//! Iterative submission engine - the run controller and its collaborators.
//!
//! This module provides:
//! - Attempt planning (timeout, fee, memo) per iteration
//! - Outcome classification into the three attempt categories
//! - TransferRunner driving the i = 1..N loop with backoff policy

mod outcome;
mod planner;
mod runner;

pub use outcome::{AttemptResult, RunSummary};
pub use planner::plan;
pub use runner::{TRANSPORT_BACKOFF, TransferRunner};
