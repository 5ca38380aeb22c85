//! HTTP connector - delegates signing and broadcast to a signer sidecar.
//!
//! The sidecar holds the mnemonic and the RPC connection; this crate never
//! sees the secret. One POST per transfer: the sidecar signs, broadcasts,
//! waits for inclusion, and answers with either a terminal receipt or a
//! broadcast-stage error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ChainConfig;
use crate::connector::client::ChainConnector;
use crate::connector::types::{ConnectorError, TransferRequest, TxReceipt};
use crate::error::{Result, SendrError};

/// Environment variable holding the signer sidecar bearer token.
pub const SIGNER_TOKEN_ENV: &str = "SENDR_SIGNER_TOKEN";

/// Inclusion can take a couple of block times; give the sidecar room.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Connector that speaks JSON over HTTP to a signer sidecar.
pub struct HttpConnector {
    client: Client,
    signer_url: String,
    token: String,
    sender_address: String,
    chain: ChainConfig,
}

/// Body posted to the sidecar's `/sign` endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitRequest<'a> {
    chain_id: &'a str,
    rpc_url: &'a str,
    #[serde(flatten)]
    transfer: &'a TransferRequest,
}

/// Sidecar answer: `success` means a terminal receipt was obtained, even if
/// that receipt carries an on-chain failure code.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    success: bool,
    tx_hash: Option<String>,
    #[serde(default)]
    code: Option<u32>,
    #[serde(default)]
    raw_log: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AddressResponse {
    address: String,
}

impl HttpConnector {
    /// Connect to the signer sidecar and learn the sender address.
    ///
    /// Fails fast with a fatal error when the bearer token is absent or the
    /// sidecar is unreachable; nothing has been submitted at that point.
    pub async fn connect(chain: &ChainConfig) -> Result<Self> {
        let token = std::env::var(SIGNER_TOKEN_ENV)
            .map_err(|_| SendrError::Config(format!("{} not set", SIGNER_TOKEN_ENV)))?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SendrError::Connector(format!("failed to build HTTP client: {}", e)))?;

        let mut connector = Self {
            client,
            signer_url: chain.signer_url.trim_end_matches('/').to_string(),
            token,
            sender_address: String::new(),
            chain: chain.clone(),
        };

        let address = connector
            .fetch_sender_address()
            .await
            .map_err(|e| SendrError::Connector(format!("signer handshake failed: {}", e)))?;

        log::info!("Signer sidecar ready, sender address: {}", address);
        connector.sender_address = address;
        Ok(connector)
    }

    async fn fetch_sender_address(&self) -> std::result::Result<String, ConnectorError> {
        let url = format!("{}/address", self.signer_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConnectorError::Rpc {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body: AddressResponse = response
            .json()
            .await
            .map_err(|e| ConnectorError::InvalidResponse(e.to_string()))?;

        if body.address.trim().is_empty() {
            return Err(ConnectorError::InvalidResponse(
                "signer returned an empty sender address".to_string(),
            ));
        }
        Ok(body.address)
    }
}

#[async_trait]
impl ChainConnector for HttpConnector {
    fn sender_address(&self) -> &str {
        &self.sender_address
    }

    async fn sign_and_submit(
        &self,
        request: &TransferRequest,
    ) -> std::result::Result<TxReceipt, ConnectorError> {
        let url = format!("{}/sign", self.signer_url);
        let body = SubmitRequest {
            chain_id: &self.chain.source_chain_id,
            rpc_url: &self.chain.source_rpc,
            transfer: request,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConnectorError::Rpc {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body: SubmitResponse = response
            .json()
            .await
            .map_err(|e| ConnectorError::InvalidResponse(e.to_string()))?;

        if !body.success {
            return Err(ConnectorError::Signing(
                body.error
                    .unwrap_or_else(|| "signer reported failure without detail".to_string()),
            ));
        }

        let tx_hash = body
            .tx_hash
            .ok_or_else(|| ConnectorError::InvalidResponse("receipt missing txHash".to_string()))?;

        Ok(TxReceipt {
            tx_hash,
            code: body.code.unwrap_or(0),
            raw_log: body.raw_log.unwrap_or_default(),
        })
    }
}
