//! Etherscan-compatible explorer API client

use std::time::Duration;

use alloy_json_abi::JsonAbi;
use alloy_primitives::Address;
use serde::Deserialize;
use tracing::debug;

use crate::domain::NetworkDescriptor;
use crate::error::{InspectError, Result};
use crate::infrastructure::abi::parse_json_abi;

/// Label for addresses the explorer knows no contract name for
pub const LABEL_WALLET: &str = "Wallet";
/// Label used whenever the lookup itself fails
pub const LABEL_UNKNOWN: &str = "Unknown";

/// Explorer lookups used by the engine
#[async_trait::async_trait]
pub trait Explorer: Send + Sync {
    /// Fetch the verified interface description of a contract
    async fn fetch_abi(&self, address: Address) -> Result<JsonAbi>;

    /// Best-effort display label; never fails, degrades to [`LABEL_UNKNOWN`]
    async fn fetch_label(&self, address: Address) -> String;
}

/// Common envelope of every explorer API response
#[derive(Debug, Deserialize)]
struct ExplorerResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: serde_json::Value,
}

/// reqwest-backed explorer client bound to one network
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    http: reqwest::Client,
    network: String,
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
}

impl ExplorerClient {
    pub fn new(network: &NetworkDescriptor, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InspectError::Explorer(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            network: network.name.clone(),
            base_url: network.explorer_api_endpoint.clone(),
            api_key: network.explorer_api_key.clone(),
            timeout,
        })
    }

    async fn query(&self, action: &str, address: Address) -> Result<ExplorerResponse> {
        let Some(base_url) = self.base_url.as_deref() else {
            return Err(InspectError::Explorer(format!(
                "no explorer API endpoint configured for {}",
                self.network
            )));
        };

        let address = address.to_checksum(None);
        let mut params = vec![
            ("module", "contract"),
            ("action", action),
            ("address", address.as_str()),
        ];
        if let Some(key) = self.api_key.as_deref() {
            params.push(("apikey", key));
        }

        debug!("explorer {} {} via {}", action, address, base_url);

        let response = self
            .http
            .get(base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.transport_error(action, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InspectError::Explorer(format!(
                "{} for {} returned HTTP {}",
                action, address, status
            )));
        }

        let body: ExplorerResponse = response
            .json()
            .await
            .map_err(|e| self.transport_error(action, e))?;

        debug!(
            "explorer {} answered status={:?} message={:?}",
            action, body.status, body.message
        );

        Ok(body)
    }

    async fn lookup_label(&self, address: Address) -> Result<String> {
        let body = self.query("getsourcecode", address).await?;
        extract_label(&body.result)
    }

    fn transport_error(&self, action: &str, err: reqwest::Error) -> InspectError {
        if err.is_timeout() {
            InspectError::timeout(format!("explorer {}", action), self.timeout)
        } else {
            InspectError::Explorer(format!("{} request failed: {}", action, err))
        }
    }
}

#[async_trait::async_trait]
impl Explorer for ExplorerClient {
    async fn fetch_abi(&self, address: Address) -> Result<JsonAbi> {
        let body = self.query("getabi", address).await?;
        match body.result {
            serde_json::Value::String(text) => parse_json_abi(&text),
            other => Err(InspectError::Decode(format!(
                "getabi result for {} is not a JSON string: {}",
                address, other
            ))),
        }
    }

    async fn fetch_label(&self, address: Address) -> String {
        match self.lookup_label(address).await {
            Ok(label) => label,
            Err(err) => {
                debug!("label lookup for {} failed: {}", address, err);
                LABEL_UNKNOWN.to_string()
            }
        }
    }
}

/// Pull the contract name out of a `getsourcecode` result
fn extract_label(result: &serde_json::Value) -> Result<String> {
    let first = result
        .as_array()
        .and_then(|entries| entries.first())
        .ok_or_else(|| {
            InspectError::Explorer(format!("unexpected getsourcecode result: {}", result))
        })?;

    Ok(first
        .get("ContractName")
        .and_then(|name| name.as_str())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(LABEL_WALLET)
        .to_string())
}
