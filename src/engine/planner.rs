//! Attempt planning - assembles the immutable request for one iteration.

use chrono::{DateTime, Utc};

use crate::config::{RunConfig, TimeoutUnit};
use crate::connector::TransferRequest;

/// Assemble the transfer request for iteration `iteration` (1-based).
///
/// Pure: the wall-clock instant is passed in, no I/O happens here. The fee
/// triple is fixed configuration and identical across iterations; the memo
/// embeds the iteration index so individual attempts can be traced on an
/// explorer.
pub fn plan(
    config: &RunConfig,
    sender_address: &str,
    amount_base_units: u128,
    iteration: u32,
    now: DateTime<Utc>,
) -> TransferRequest {
    let chain = &config.chain;
    TransferRequest {
        sender_address: sender_address.to_string(),
        recipient_address: chain.recipient_address.clone(),
        amount_base_units,
        source_denom: chain.source_denom.clone(),
        channel_id: chain.channel_id.clone(),
        timeout_deadline: deadline(now, chain.timeout_window_secs, chain.timeout_unit),
        fee_amount: chain.fee_amount,
        fee_denom: chain.fee_denom.clone(),
        gas_limit: chain.gas_limit,
        memo: format!("Auto Transfer #{}", iteration),
    }
}

/// Absolute deadline in the unit the connector expects.
fn deadline(now: DateTime<Utc>, window_secs: u64, unit: TimeoutUnit) -> i64 {
    let window_secs = window_secs as i64;
    match unit {
        TimeoutUnit::Seconds => now.timestamp().saturating_add(window_secs),
        TimeoutUnit::Nanoseconds => now
            .timestamp_nanos_opt()
            .unwrap_or(i64::MAX)
            .saturating_add(window_secs.saturating_mul(1_000_000_000)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::sample_chain_config;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn run_config() -> RunConfig {
        RunConfig::new(
            Decimal::from_str("1.5").unwrap(),
            5,
            sample_chain_config(),
        )
        .unwrap()
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_plan_copies_route_and_fee() {
        let request = plan(&run_config(), "kii1sender", 1_500_000, 1, fixed_now());

        assert_eq!(request.sender_address, "kii1sender");
        assert_eq!(
            request.recipient_address,
            "kii1recipient0000000000000000000000000000"
        );
        assert_eq!(request.amount_base_units, 1_500_000);
        assert_eq!(request.channel_id, "channel-0");
        assert_eq!(request.fee_amount, 5000);
        assert_eq!(request.fee_denom, "ukii");
        assert_eq!(request.gas_limit, 250_000);
    }

    #[test]
    fn test_plan_deadline_in_seconds() {
        let now = fixed_now();
        let request = plan(&run_config(), "kii1sender", 1, 1, now);
        assert_eq!(request.timeout_deadline, now.timestamp() + 600);
    }

    #[test]
    fn test_plan_deadline_in_nanoseconds() {
        let mut config = run_config();
        config.chain.timeout_unit = TimeoutUnit::Nanoseconds;
        let now = fixed_now();

        let request = plan(&config, "kii1sender", 1, 1, now);
        let expected = now.timestamp_nanos_opt().unwrap() + 600 * 1_000_000_000;
        assert_eq!(request.timeout_deadline, expected);
    }

    #[test]
    fn test_plan_memo_embeds_one_based_index() {
        let config = run_config();
        let first = plan(&config, "kii1sender", 1, 1, fixed_now());
        let third = plan(&config, "kii1sender", 1, 3, fixed_now());

        assert_eq!(first.memo, "Auto Transfer #1");
        assert_eq!(third.memo, "Auto Transfer #3");
        assert_ne!(first.memo, third.memo);
    }

    #[test]
    fn test_plan_is_deterministic_for_fixed_inputs() {
        let config = run_config();
        let a = plan(&config, "kii1sender", 42, 2, fixed_now());
        let b = plan(&config, "kii1sender", 42, 2, fixed_now());
        assert_eq!(a, b);
    }
}
