//! Run controller - drives the iteration loop over a chain connector.
//!
//! The run lifecycle is Idle -> Running(i = 1..N) -> Completed. There is no
//! aborted state: a failed iteration (either category) never halts the run.
//! Only a fatal configuration error or a connector initialization fault,
//! both of which happen before the loop starts, can end a run early.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use colored::*;

use crate::amount;
use crate::config::RunConfig;
use crate::connector::ChainConnector;
use crate::engine::outcome::{AttemptResult, RunSummary};
use crate::engine::planner;
use crate::error::Result;

/// Fixed pause after a transport failure. Not exponential, not jittered:
/// the point is only to stop hammering an endpoint that may be down, and
/// the iteration is already spent either way.
pub const TRANSPORT_BACKOFF: Duration = Duration::from_secs(3);

/// Executes one run of N sequential transfer attempts.
///
/// Iterations never overlap; the sender account's sequence number is managed
/// by the connector and would be corrupted by parallel submission.
pub struct TransferRunner<C: ChainConnector> {
    connector: Arc<C>,
}

impl<C: ChainConnector> TransferRunner<C> {
    pub fn new(connector: Arc<C>) -> Self {
        Self { connector }
    }

    /// Run the full iteration budget and return the aggregate summary.
    ///
    /// Per-iteration failures are reported and counted but never propagate
    /// out of the loop; the only `Err` paths here fire before the first
    /// submission.
    pub async fn run(&self, config: &RunConfig) -> Result<RunSummary> {
        // Normalized once up front; every iteration transfers the same amount
        let amount_base_units =
            amount::normalize(config.amount_token, config.chain.decimal_exponent)?;
        let sender = self.connector.sender_address().to_string();

        log::info!(
            "Starting run: {} iterations of {} {} ({} base units) from {} via {}",
            config.total_iterations,
            config.amount_token,
            config.chain.source_denom,
            amount_base_units,
            sender,
            config.chain.channel_id
        );

        let mut summary = RunSummary::default();

        for iteration in 1..=config.total_iterations {
            let request = planner::plan(config, &sender, amount_base_units, iteration, Utc::now());

            println!(
                "\n---> Transfer #{} of {}...",
                iteration, config.total_iterations
            );
            log::debug!("Planned request for iteration {}: {:?}", iteration, request);

            let result =
                AttemptResult::classify(iteration, self.connector.sign_and_submit(&request).await);

            report(&result);
            summary.record(&result);

            if result.needs_backoff() && iteration < config.total_iterations {
                log::warn!(
                    "Transport failure on iteration {}, backing off {:?}",
                    iteration,
                    TRANSPORT_BACKOFF
                );
                tokio::time::sleep(TRANSPORT_BACKOFF).await;
            }
        }

        log::info!(
            "Run completed: {} confirmed, {} on-chain failures, {} transport failures",
            summary.confirmed,
            summary.on_chain_failures,
            summary.transport_failures
        );
        Ok(summary)
    }
}

/// One console line per terminal attempt result.
fn report(result: &AttemptResult) {
    match result {
        AttemptResult::Confirmed { tx_hash, iteration } => {
            println!(
                "{} Transfer #{} confirmed. Tx hash: {}",
                "OK".green().bold(),
                iteration,
                tx_hash
            );
        }
        AttemptResult::OnChainFailure {
            tx_hash,
            code,
            raw_log,
            iteration,
        } => {
            println!(
                "{} Transfer #{} failed on-chain. Code: {}. Tx hash: {}. Log: {}",
                "FAIL".red().bold(),
                iteration,
                code,
                tx_hash,
                raw_log
            );
        }
        AttemptResult::TransportFailure {
            kind,
            message,
            iteration,
        } => {
            println!(
                "{} Transfer #{} did not reach a receipt ({}): {}",
                "FAIL".red().bold(),
                iteration,
                kind,
                message
            );
        }
    }
}
