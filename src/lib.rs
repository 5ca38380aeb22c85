//! sendr - iterative cross-chain transfer submission
//!
//! sendr repeatedly submits value-transfer transactions from one account to
//! one destination across a chain boundary, classifying each attempt as
//! confirmed, failed on-chain, or failed in transport, and continuing across
//! failures until the configured iteration budget is spent.

pub mod amount;
pub mod config;
pub mod connector;
pub mod engine;
pub mod error;

pub use error::{Result, SendrError};
