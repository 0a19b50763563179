//! Transaction classification and call decoding

use alloy_primitives::{Address, U256};
use serde::Serialize;
use tracing::debug;

use super::units::format_native;
use super::InspectContext;
use crate::domain::abi::{AbiDecoder, DecodedCall};
use crate::domain::transaction::serialize_decimal;
use crate::domain::{Transaction, TransactionReceipt};
use crate::error::Result;
use crate::infrastructure::abi::{registry_from_abi, AlloyAbiDecoder};

/// What a transaction did, decided once per transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransactionReport {
    /// Plain value transfer to an account without code
    Wallet {
        from: Address,
        to: Address,
        #[serde(serialize_with = "serialize_decimal")]
        value: U256,
        formatted_value: String,
    },
    /// Call into a contract, decoded against its verified ABI
    Contract {
        from: Address,
        to: Address,
        to_label: String,
        #[serde(serialize_with = "serialize_decimal")]
        value: U256,
        formatted_value: String,
        call: DecodedCall,
    },
    /// Deployment transaction (no destination address)
    ContractCreation {
        from: Address,
        /// Deployed address, known once the receipt is attached
        created: Option<Address>,
        #[serde(serialize_with = "serialize_decimal")]
        value: U256,
        formatted_value: String,
    },
}

impl TransactionReport {
    /// Fill in details that are only known from the receipt
    pub fn attach_receipt(&mut self, receipt: &TransactionReceipt) {
        if let TransactionReport::ContractCreation { created, .. } = self {
            *created = receipt.contract_address;
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TransactionReport::Wallet { .. } => "wallet",
            TransactionReport::Contract { .. } => "contract",
            TransactionReport::ContractCreation { .. } => "contract creation",
        }
    }
}

/// Classify `tx` as wallet, contract call or contract creation
///
/// Only the contract path touches the explorer: its ABI is fetched and the
/// call data decoded generically through a selector table.
pub async fn classify(ctx: &InspectContext<'_>, tx: &Transaction) -> Result<TransactionReport> {
    let formatted_value = format_native(tx.value);

    let Some(to) = tx.to else {
        debug!("{} has no destination, treating as contract creation", tx.hash);
        return Ok(TransactionReport::ContractCreation {
            from: tx.from,
            created: None,
            value: tx.value,
            formatted_value,
        });
    };

    let code = ctx.provider.get_code(to).await?;
    if code.is_empty() {
        return Ok(TransactionReport::Wallet {
            from: tx.from,
            to,
            value: tx.value,
            formatted_value,
        });
    }

    debug!("{} has {} bytes of code, decoding call", to, code.len());
    let abi = ctx.explorer.fetch_abi(to).await?;
    let decoder = AlloyAbiDecoder::new(registry_from_abi(&abi));
    let call = decoder.decode(&tx.input)?;
    let to_label = ctx.explorer.fetch_label(to).await;

    Ok(TransactionReport::Contract {
        from: tx.from,
        to,
        to_label,
        value: tx.value,
        formatted_value,
        call,
    })
}
