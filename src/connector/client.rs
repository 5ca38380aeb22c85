//! ChainConnector trait and mock implementation.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use crate::connector::types::{ConnectorError, TransferRequest, TxReceipt};

/// External capability that knows how to sign, encode, and broadcast a
/// transfer for a specific chain. The engine is polymorphic over which
/// connector it is given and never touches keys or wire encoding itself.
#[async_trait]
pub trait ChainConnector: Send + Sync {
    /// Address of the funded sender account this connector signs for.
    fn sender_address(&self) -> &str;

    /// Sign, broadcast, and wait for inclusion of one transfer.
    ///
    /// Exactly one terminal outcome per call: a receipt (which may itself
    /// carry an on-chain failure code) or a fault raised before a receipt
    /// was obtained. No retry happens inside this call. An `Err` does NOT
    /// guarantee the transaction never reached the network.
    async fn sign_and_submit(
        &self,
        request: &TransferRequest,
    ) -> Result<TxReceipt, ConnectorError>;
}

/// Scriptable connector for tests: pops one pre-loaded outcome per call and
/// records every request it was handed.
pub struct MockConnector {
    sender: String,
    outcomes: Mutex<VecDeque<Result<TxReceipt, ConnectorError>>>,
    requests: Mutex<Vec<TransferRequest>>,
    calls: AtomicU32,
}

impl MockConnector {
    pub fn new(outcomes: Vec<Result<TxReceipt, ConnectorError>>) -> Self {
        Self {
            sender: "kii1mocksender".to_string(),
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicU32::new(0),
        }
    }

    /// A mock that confirms every submission with a synthetic hash.
    pub fn always_confirming(iterations: u32) -> Self {
        let outcomes = (1..=iterations)
            .map(|i| {
                Ok(TxReceipt {
                    tx_hash: format!("HASH{:04}", i),
                    code: 0,
                    raw_log: String::new(),
                })
            })
            .collect();
        Self::new(outcomes)
    }

    /// Number of times `sign_and_submit` was invoked.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Copies of every request submitted so far, in order.
    pub fn submitted_requests(&self) -> Vec<TransferRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainConnector for MockConnector {
    fn sender_address(&self) -> &str {
        &self.sender
    }

    async fn sign_and_submit(
        &self,
        request: &TransferRequest,
    ) -> Result<TxReceipt, ConnectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ConnectorError::InvalidResponse(
                    "mock connector exhausted".to_string(),
                ))
            })
    }
}
