//! In-memory provider and explorer used by the engine tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use alloy_json_abi::JsonAbi;
use alloy_primitives::{Address, Bytes, B256};

use crate::domain::{NetworkDescriptor, Transaction, TransactionReceipt};
use crate::error::{InspectError, Result};
use crate::infrastructure::abi::parse_json_abi;
use crate::infrastructure::ethereum::EthereumProvider;
use crate::infrastructure::explorer::{Explorer, LABEL_WALLET};

pub(crate) const ALICE: Address = Address::new([0xa1; 20]);
pub(crate) const BOB: Address = Address::new([0xb0; 20]);
pub(crate) const TOKEN: Address = Address::new([0x70; 20]);

pub(crate) fn network() -> NetworkDescriptor {
    NetworkDescriptor {
        name: "Ethereum".to_string(),
        symbol: "ETH".to_string(),
        rpc_endpoint: None,
        explorer_api_endpoint: None,
        explorer_api_key: None,
    }
}

#[derive(Default)]
pub(crate) struct FakeProvider {
    code: HashMap<Address, Bytes>,
    transactions: HashMap<B256, Transaction>,
    receipts: HashMap<B256, TransactionReceipt>,
    /// (contract, selector) -> return data, or an error message for reverts
    calls: HashMap<(Address, [u8; 4]), std::result::Result<Bytes, String>>,
    code_requests: AtomicUsize,
}

impl FakeProvider {
    pub(crate) fn with_code(mut self, address: Address, code_hex: &str) -> Self {
        self.code
            .insert(address, Bytes::from(hex::decode(code_hex).unwrap()));
        self
    }

    pub(crate) fn with_transaction(mut self, tx: Transaction, receipt: TransactionReceipt) -> Self {
        self.receipts.insert(tx.hash, receipt);
        self.transactions.insert(tx.hash, tx);
        self
    }

    pub(crate) fn with_call(mut self, to: Address, selector: [u8; 4], output: Vec<u8>) -> Self {
        self.calls.insert((to, selector), Ok(Bytes::from(output)));
        self
    }

    pub(crate) fn with_revert(mut self, to: Address, selector: [u8; 4]) -> Self {
        self.calls
            .insert((to, selector), Err("execution reverted".to_string()));
        self
    }

    pub(crate) fn code_requests(&self) -> usize {
        self.code_requests.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl EthereumProvider for FakeProvider {
    async fn get_code(&self, address: Address) -> Result<Bytes> {
        self.code_requests.fetch_add(1, Ordering::SeqCst);
        Ok(self.code.get(&address).cloned().unwrap_or_default())
    }

    async fn get_transaction(&self, hash: B256) -> Result<Option<Transaction>> {
        Ok(self.transactions.get(&hash).cloned())
    }

    async fn get_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>> {
        Ok(self.receipts.get(&hash).cloned())
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let selector: [u8; 4] = data
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| InspectError::Rpc("short call data".to_string()))?;
        match self.calls.get(&(to, selector)) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(reason)) => Err(InspectError::Rpc(reason.clone())),
            // eth_call against an account without code succeeds with no output
            None => Ok(Bytes::new()),
        }
    }

    fn endpoint_name(&self) -> String {
        "fake".to_string()
    }
}

#[derive(Default)]
pub(crate) struct FakeExplorer {
    abis: HashMap<Address, String>,
    labels: HashMap<Address, String>,
    abi_requests: AtomicUsize,
    label_requests: AtomicUsize,
}

impl FakeExplorer {
    pub(crate) fn with_abi(mut self, address: Address, abi: &str) -> Self {
        self.abis.insert(address, abi.to_string());
        self
    }

    pub(crate) fn with_label(mut self, address: Address, label: &str) -> Self {
        self.labels.insert(address, label.to_string());
        self
    }

    pub(crate) fn abi_requests(&self) -> usize {
        self.abi_requests.load(Ordering::SeqCst)
    }

    pub(crate) fn label_requests(&self) -> usize {
        self.label_requests.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Explorer for FakeExplorer {
    async fn fetch_abi(&self, address: Address) -> Result<JsonAbi> {
        self.abi_requests.fetch_add(1, Ordering::SeqCst);
        match self.abis.get(&address) {
            Some(abi) => parse_json_abi(abi),
            None => Err(InspectError::Explorer(format!("no ABI for {}", address))),
        }
    }

    async fn fetch_label(&self, address: Address) -> String {
        self.label_requests.fetch_add(1, Ordering::SeqCst);
        self.labels
            .get(&address)
            .cloned()
            .unwrap_or_else(|| LABEL_WALLET.to_string())
    }
}
