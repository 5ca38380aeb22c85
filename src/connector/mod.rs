//! Chain connector layer - signing and broadcast behind one capability.
//!
//! This module provides:
//! - Request/receipt types for the transfer primitive
//! - ChainConnector trait for chain abstraction
//! - HttpConnector delegating to a signer sidecar
//! - MockConnector for tests

pub mod client;
pub mod http;
pub mod types;

pub use client::{ChainConnector, MockConnector};
pub use http::{HttpConnector, SIGNER_TOKEN_ENV};
pub use types::{ConnectorError, TransferRequest, TransportKind, TxReceipt};
