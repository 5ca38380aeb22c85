//! Attempt outcome types and run-level aggregation.
//!
//! Every iteration produces exactly one `AttemptResult`; the distinction
//! between the two failure arms matters. An on-chain failure means the
//! request reached the network and was evaluated (gas spent, sequence
//! possibly consumed); a transport failure means the network interaction
//! itself never completed.

use serde::{Deserialize, Serialize};

use crate::connector::{ConnectorError, TransportKind, TxReceipt};

/// Terminal outcome of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptResult {
    /// Terminal receipt with the success sentinel code
    Confirmed { tx_hash: String, iteration: u32 },
    /// Terminal receipt with a non-success code - evaluated and rejected
    OnChainFailure {
        tx_hash: String,
        code: u32,
        raw_log: String,
        iteration: u32,
    },
    /// Fault before any terminal receipt was obtained
    TransportFailure {
        kind: TransportKind,
        message: String,
        iteration: u32,
    },
}

impl AttemptResult {
    /// Map a connector outcome into its attempt category.
    pub fn classify(
        iteration: u32,
        outcome: Result<TxReceipt, ConnectorError>,
    ) -> Self {
        match outcome {
            Ok(receipt) if receipt.is_success() => AttemptResult::Confirmed {
                tx_hash: receipt.tx_hash,
                iteration,
            },
            Ok(receipt) => AttemptResult::OnChainFailure {
                tx_hash: receipt.tx_hash,
                code: receipt.code,
                raw_log: receipt.raw_log,
                iteration,
            },
            Err(fault) => AttemptResult::TransportFailure {
                kind: fault.kind(),
                message: fault.to_string(),
                iteration,
            },
        }
    }

    /// 1-based iteration this result belongs to.
    pub fn iteration(&self) -> u32 {
        match self {
            AttemptResult::Confirmed { iteration, .. }
            | AttemptResult::OnChainFailure { iteration, .. }
            | AttemptResult::TransportFailure { iteration, .. } => *iteration,
        }
    }

    /// Only transport failures pause the loop; both failure arms continue it.
    pub fn needs_backoff(&self) -> bool {
        matches!(self, AttemptResult::TransportFailure { .. })
    }
}

/// Counts across one completed run; derived from results, never persisted
/// mid-run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub confirmed: u32,
    pub on_chain_failures: u32,
    pub transport_failures: u32,
}

impl RunSummary {
    pub fn record(&mut self, result: &AttemptResult) {
        match result {
            AttemptResult::Confirmed { .. } => self.confirmed += 1,
            AttemptResult::OnChainFailure { .. } => self.on_chain_failures += 1,
            AttemptResult::TransportFailure { .. } => self.transport_failures += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.confirmed + self.on_chain_failures + self.transport_failures
    }
}
