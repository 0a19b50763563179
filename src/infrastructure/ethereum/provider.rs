//! Ethereum provider abstraction and Alloy implementation
//!
//! Uses raw JSON requests so that transactions of any EVM chain are accepted,
//! including L2s like Optimism/Arbitrum that have non-standard transaction types.

use std::time::Duration;

use alloy::network::Ethereum;
use alloy::primitives::{Address, Bytes, B256};
use alloy::providers::{
    fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
    Identity, Provider, ProviderBuilder, RootProvider,
};
use serde_json::json;
use tracing::debug;

use crate::domain::{NetworkDescriptor, Transaction, TransactionReceipt};
use crate::error::{with_timeout, InspectError, Result};
use crate::infrastructure::ethereum::types::{parse_hex_bytes, parse_raw_receipt, parse_raw_transaction};

/// Read-only chain access needed to inspect one transaction
#[async_trait::async_trait]
pub trait EthereumProvider: Send + Sync {
    /// Deployed bytecode at `address` (empty for externally owned accounts)
    async fn get_code(&self, address: Address) -> Result<Bytes>;

    /// Transaction by hash, `None` when the node does not know it
    async fn get_transaction(&self, hash: B256) -> Result<Option<Transaction>>;

    /// Receipt by hash, `None` while pending or unknown
    async fn get_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>>;

    /// Execute a read-only call (eth_call) against the latest block
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes>;

    /// Get endpoint display name
    fn endpoint_name(&self) -> String;
}

type HttpFillProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider,
    Ethereum,
>;

/// HTTP JSON-RPC provider with a deadline on every request
pub struct AlloyProvider {
    provider: HttpFillProvider,
    endpoint: String,
    timeout: Duration,
}

impl AlloyProvider {
    /// Connect to the RPC endpoint of `network`
    pub fn connect(network: &NetworkDescriptor, timeout: Duration) -> Result<Self> {
        let endpoint = network.rpc_endpoint.clone().ok_or_else(|| {
            InspectError::Config(format!("no RPC endpoint configured for {}", network.name))
        })?;
        let rpc_url = endpoint.parse::<reqwest::Url>().map_err(|e| {
            InspectError::Config(format!("invalid RPC endpoint for {}: {}", network.name, e))
        })?;

        Ok(Self {
            provider: ProviderBuilder::new().connect_http(rpc_url),
            endpoint,
            timeout,
        })
    }

    async fn request(
        &self,
        method: &'static str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value> {
        debug!("rpc {} {}", method, params);
        with_timeout(method, self.timeout, async {
            self.provider
                .raw_request::<_, serde_json::Value>(method.into(), params)
                .await
                .map_err(|e| InspectError::Rpc(format!("{} failed: {}", method, e)))
        })
        .await
    }
}

#[async_trait::async_trait]
impl EthereumProvider for AlloyProvider {
    async fn get_code(&self, address: Address) -> Result<Bytes> {
        let json = self.request("eth_getCode", json!([address, "latest"])).await?;
        let code = json
            .as_str()
            .ok_or_else(|| InspectError::Rpc(format!("eth_getCode returned {}", json)))?;
        parse_hex_bytes(code)
    }

    async fn get_transaction(&self, hash: B256) -> Result<Option<Transaction>> {
        let json = self.request("eth_getTransactionByHash", json!([hash])).await?;
        if json.is_null() {
            return Ok(None);
        }
        parse_raw_transaction(&json).map(Some)
    }

    async fn get_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>> {
        let json = self.request("eth_getTransactionReceipt", json!([hash])).await?;
        if json.is_null() {
            return Ok(None);
        }
        parse_raw_receipt(&json).map(Some)
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let request = json!({ "to": to, "data": data });
        let json = self.request("eth_call", json!([request, "latest"])).await?;
        let output = json
            .as_str()
            .ok_or_else(|| InspectError::Rpc(format!("eth_call returned {}", json)))?;
        parse_hex_bytes(output)
    }

    fn endpoint_name(&self) -> String {
        self.endpoint.clone()
    }
}
