//! Chain-agnostic transaction, receipt and log models

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::Serialize;

/// A transaction as returned by `eth_getTransactionByHash`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub hash: B256,
    pub from: Address,
    /// `None` for contract creation
    pub to: Option<Address>,
    /// Amount in the smallest native unit
    pub value: U256,
    pub input: Bytes,
}

/// The subset of `eth_getTransactionReceipt` we need
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionReceipt {
    /// `Some(true)` on success; pre-Byzantium receipts carry no status
    pub status: Option<bool>,
    /// Address of the deployed contract, for creation transactions
    pub contract_address: Option<Address>,
    pub logs: Vec<LogEntry>,
}

/// One event log emitted during execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
}

impl LogEntry {
    /// First topic (the event signature hash for non-anonymous events)
    pub fn topic0(&self) -> Option<&B256> {
        self.topics.first()
    }
}

/// Serialize a U256 as a base-10 string
pub(crate) fn serialize_decimal<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&value.to_string())
}
