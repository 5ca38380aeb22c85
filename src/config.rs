//! Configuration loading and validation.
//!
//! The chain config is a JSON file (`chain.json` by default) describing the
//! route: recipient, RPC endpoint, chain id, IBC channel, denoms, fee triple.
//! It is loaded once, validated fully, and handed to the run controller as an
//! immutable value. Any missing or placeholder field is a fatal configuration
//! error raised before a single transaction is built.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;

use crate::error::{Result, SendrError};

/// Default chain config location, relative to the working directory.
const DEFAULT_CONFIG_FILE: &str = "chain.json";

/// Unit the connector expects timeout deadlines in. Fixed per deployment,
/// never mixed within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeoutUnit {
    #[default]
    Seconds,
    Nanoseconds,
}

/// Static description of the transfer route, loaded from the chain config
/// file. Field names follow the original camelCase config format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    pub recipient_address: String,
    pub source_rpc: String,
    pub source_chain_id: String,
    #[serde(alias = "ibcChannelId")]
    pub channel_id: String,
    pub source_denom: String,
    pub fee_denom: String,

    /// Display-only; the channel id determines the actual route.
    #[serde(default)]
    pub destination_chain_id: Option<String>,

    /// Signer sidecar endpoint used by the HTTP connector.
    #[serde(default = "default_signer_url")]
    pub signer_url: String,

    /// Fixed fee in base units of `fee_denom`, identical across iterations.
    #[serde(default = "default_fee_amount")]
    pub fee_amount: u64,

    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,

    /// Base-unit exponent of `source_denom` on the target chain. Never
    /// guessed; a wrong value silently mis-funds every transfer.
    #[serde(default = "default_decimal_exponent")]
    pub decimal_exponent: u32,

    /// Transfer timeout window, applied from the wall clock at plan time.
    #[serde(default = "default_timeout_window_secs")]
    pub timeout_window_secs: u64,

    #[serde(default)]
    pub timeout_unit: TimeoutUnit,
}

fn default_signer_url() -> String {
    "http://127.0.0.1:8866".to_string()
}

fn default_fee_amount() -> u64 {
    5000
}

fn default_gas_limit() -> u64 {
    250_000
}

fn default_decimal_exponent() -> u32 {
    6
}

fn default_timeout_window_secs() -> u64 {
    600
}

impl ChainConfig {
    /// Load the chain config from an explicit path, falling back to
    /// `./chain.json`. There is no built-in default: a route cannot be
    /// invented, so a missing file is fatal.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let path = match config_path {
            Some(path) => path.clone(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if !path.exists() {
            return Err(SendrError::Config(format!(
                "chain config not found: {}",
                path.display()
            )));
        }

        let config = Self::load_from_file(&path)?;
        config.validate()?;

        log::info!("Loaded chain config from: {}", path.display());
        Ok(config)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Check every required field before anything touches the network.
    pub fn validate(&self) -> Result<()> {
        require_field("recipientAddress", &self.recipient_address)?;
        require_field("sourceRpc", &self.source_rpc)?;
        require_field("sourceChainId", &self.source_chain_id)?;
        require_field("channelId", &self.channel_id)?;
        require_field("sourceDenom", &self.source_denom)?;
        require_field("feeDenom", &self.fee_denom)?;
        require_field("signerUrl", &self.signer_url)?;

        if self.timeout_window_secs == 0 {
            return Err(SendrError::Config(
                "timeoutWindowSecs must be greater than zero".to_string(),
            ));
        }
        if self.gas_limit == 0 {
            return Err(SendrError::Config(
                "gasLimit must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Reject empty fields and obvious template leftovers.
fn require_field(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SendrError::Config(format!("{} is missing or empty", name)));
    }
    if value.starts_with('<') || value.contains("CHANGE_ME") || value.contains("YOUR_") {
        return Err(SendrError::Config(format!(
            "{} still holds a placeholder value: {}",
            name, value
        )));
    }
    Ok(())
}

/// Everything one run needs, assembled from the chain config plus the
/// operator's amount and iteration count. Owned by the run controller for
/// the lifetime of one invocation; immutable once built.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub amount_token: Decimal,
    pub total_iterations: u32,
    pub chain: ChainConfig,
}

impl RunConfig {
    /// Build and validate a run configuration. Violations here are fatal:
    /// the loop must not start with a bad amount or iteration budget.
    pub fn new(amount_token: Decimal, total_iterations: u32, chain: ChainConfig) -> Result<Self> {
        if amount_token <= Decimal::ZERO {
            return Err(SendrError::Config(
                "token amount must be greater than zero".to_string(),
            ));
        }
        if total_iterations == 0 {
            return Err(SendrError::Config(
                "iteration count must be greater than zero".to_string(),
            ));
        }
        chain.validate()?;

        Ok(Self {
            amount_token,
            total_iterations,
            chain,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::str::FromStr;

    pub(crate) fn sample_chain_config() -> ChainConfig {
        ChainConfig {
            recipient_address: "kii1recipient0000000000000000000000000000".to_string(),
            source_rpc: "https://rpc.kiichain.io".to_string(),
            source_chain_id: "kiichain-1".to_string(),
            channel_id: "channel-0".to_string(),
            source_denom: "ukii".to_string(),
            fee_denom: "ukii".to_string(),
            destination_chain_id: Some("osmosis-1".to_string()),
            signer_url: default_signer_url(),
            fee_amount: default_fee_amount(),
            gas_limit: default_gas_limit(),
            decimal_exponent: default_decimal_exponent(),
            timeout_window_secs: default_timeout_window_secs(),
            timeout_unit: TimeoutUnit::Seconds,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(sample_chain_config().validate().is_ok());
    }

    #[test]
    fn test_missing_recipient_fails() {
        let mut config = sample_chain_config();
        config.recipient_address = String::new();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SendrError::Config(_)));
        assert!(err.to_string().contains("recipientAddress"));
    }

    #[test]
    fn test_placeholder_value_fails() {
        let mut config = sample_chain_config();
        config.recipient_address = "<YOUR_ADDRESS_HERE>".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("placeholder"));
    }

    #[test]
    fn test_zero_timeout_window_fails() {
        let mut config = sample_chain_config();
        config.timeout_window_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_json_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chain.json");
        fs::write(
            &path,
            r#"{
                "recipientAddress": "kii1abc",
                "sourceRpc": "https://rpc.example.com",
                "sourceChainId": "kiichain-1",
                "ibcChannelId": "channel-7",
                "sourceDenom": "ukii",
                "feeDenom": "ukii"
            }"#,
        )
        .unwrap();

        let config = ChainConfig::load(Some(&path)).unwrap();
        assert_eq!(config.channel_id, "channel-7");
        assert_eq!(config.fee_amount, 5000);
        assert_eq!(config.gas_limit, 250_000);
        assert_eq!(config.decimal_exponent, 6);
        assert_eq!(config.timeout_unit, TimeoutUnit::Seconds);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let path = PathBuf::from("/nonexistent/chain.json");
        let err = ChainConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, SendrError::Config(_)));
    }

    #[test]
    fn test_run_config_rejects_zero_amount() {
        let err = RunConfig::new(Decimal::ZERO, 5, sample_chain_config()).unwrap_err();
        assert!(matches!(err, SendrError::Config(_)));
    }

    #[test]
    fn test_run_config_rejects_zero_iterations() {
        let amount = Decimal::from_str("1.5").unwrap();
        let err = RunConfig::new(amount, 0, sample_chain_config()).unwrap_err();
        assert!(matches!(err, SendrError::Config(_)));
    }

    #[test]
    fn test_run_config_valid() {
        let amount = Decimal::from_str("1.5").unwrap();
        let run = RunConfig::new(amount, 10, sample_chain_config()).unwrap();
        assert_eq!(run.total_iterations, 10);
        assert_eq!(run.chain.source_denom, "ukii");
    }
}
