//! Core connector types - transfer requests, receipts, and fault taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Receipt code the network returns for an accepted transaction.
pub const SUCCESS_CODE: u32 = 0;

/// Everything the connector needs to sign and broadcast one transfer.
///
/// Immutable once constructed; one instance per iteration, never shared
/// across iterations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub sender_address: String,
    pub recipient_address: String,
    /// Serialized as a decimal string; base-unit amounts overflow the
    /// 53-bit integers many JSON consumers tolerate.
    #[serde(with = "amount_string")]
    pub amount_base_units: u128,
    pub source_denom: String,
    pub channel_id: String,
    /// Absolute deadline after which the transfer times out. The unit
    /// (seconds or nanoseconds since epoch) is fixed per deployment by
    /// the chain config and never mixed within a run.
    pub timeout_deadline: i64,
    pub fee_amount: u64,
    pub fee_denom: String,
    pub gas_limit: u64,
    pub memo: String,
}

/// String codec for base-unit amounts on the wire.
mod amount_string {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

/// Terminal receipt for a broadcast transaction.
///
/// A receipt means the request reached the network and was evaluated; it may
/// still report an on-chain failure through a non-zero code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub tx_hash: String,
    pub code: u32,
    #[serde(default)]
    pub raw_log: String,
}

impl TxReceipt {
    /// True when the network accepted the transaction.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// Faults raised before a terminal receipt is obtained.
///
/// Receiving one of these does not guarantee the transaction never reached
/// the network; delivery semantics are connector-dependent and callers must
/// not assume at-most-once.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Signer refused or failed to produce a signed transaction
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Network-level failure talking to the signer or RPC endpoint
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Endpoint answered with a non-success HTTP status
    #[error("RPC error {status}: {message}")]
    Rpc { status: u16, message: String },

    /// Endpoint answered 2xx but the payload made no sense
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ConnectorError {
    /// Coarse classification carried into `AttemptResult::TransportFailure`.
    pub fn kind(&self) -> TransportKind {
        match self {
            ConnectorError::Signing(_) => TransportKind::Signing,
            ConnectorError::Network(_) => TransportKind::Network,
            ConnectorError::Rpc { .. } => TransportKind::Rpc,
            ConnectorError::InvalidResponse(_) => TransportKind::InvalidResponse,
        }
    }
}

/// What kind of transport fault prevented a terminal receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    Signing,
    Network,
    Rpc,
    InvalidResponse,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TransportKind::Signing => "signing",
            TransportKind::Network => "network",
            TransportKind::Rpc => "rpc",
            TransportKind::InvalidResponse => "invalid_response",
        };
        write!(f, "{}", label)
    }
}
