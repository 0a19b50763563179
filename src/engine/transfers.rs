//! Token transfer decoding from receipt logs
//!
//! Any log whose first topic is the hash of `Transfer(address,address,uint256)`
//! is treated as an ERC-20 transfer. The match is purely syntactic, so a
//! contract that emits a same-shaped event is reported too. ERC-721 transfers
//! share the hash but index the token id; they fail to decode and show up as
//! per-log failures.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall, SolEvent};
use serde::Serialize;
use tracing::{debug, warn};

use super::units::format_units;
use super::InspectContext;
use crate::domain::transaction::serialize_decimal;
use crate::domain::{LogEntry, TransactionReceipt};
use crate::error::{InspectError, Result};

sol! {
    interface IERC20 {
        event Transfer(address indexed from, address indexed to, uint256 value);
        function decimals() external view returns (uint8);
        function symbol() external view returns (string);
        function name() external view returns (string);
    }
}

/// A successfully decoded token transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedTransfer {
    pub token_address: Address,
    pub token_name: String,
    pub token_symbol: String,
    pub decimals: u8,
    pub from: Address,
    pub from_label: String,
    pub to: Address,
    pub to_label: String,
    #[serde(serialize_with = "serialize_decimal")]
    pub raw_value: U256,
    pub formatted_value: String,
}

/// A matching log that could not be turned into a transfer
#[derive(Debug)]
pub struct TransferFailure {
    /// Position of the log within the receipt
    pub log_index: usize,
    pub token_address: Address,
    pub error: InspectError,
}

/// Outcome for one matching log; failures never stop the scan
pub type TransferOutcome = std::result::Result<DecodedTransfer, TransferFailure>;

/// Whether `log` carries the ERC-20 Transfer signature as its first topic
pub fn is_transfer_log(log: &LogEntry) -> bool {
    log.topic0() == Some(&IERC20::Transfer::SIGNATURE_HASH)
}

/// Decode every transfer log of `receipt`, in receipt order
pub async fn decode_transfers(
    ctx: &InspectContext<'_>,
    receipt: &TransactionReceipt,
) -> Vec<TransferOutcome> {
    let mut outcomes = Vec::new();

    for (log_index, log) in receipt.logs.iter().enumerate() {
        if !is_transfer_log(log) {
            continue;
        }

        match decode_transfer(ctx, log).await {
            Ok(transfer) => outcomes.push(Ok(transfer)),
            Err(error) => {
                warn!("skipping transfer log #{} of {}: {}", log_index, log.address, error);
                outcomes.push(Err(TransferFailure {
                    log_index,
                    token_address: log.address,
                    error,
                }));
            }
        }
    }

    outcomes
}

/// Decode one matching log and resolve its token metadata and labels
pub async fn decode_transfer(ctx: &InspectContext<'_>, log: &LogEntry) -> Result<DecodedTransfer> {
    let event = IERC20::Transfer::decode_raw_log(log.topics.iter().copied(), &log.data)
        .map_err(|e| {
            InspectError::Decode(format!("log from {} is not an ERC-20 Transfer: {}", log.address, e))
        })?;

    let (decimals, symbol, name) = futures::future::try_join3(
        read_token(ctx, log.address, IERC20::decimalsCall {}),
        read_token(ctx, log.address, IERC20::symbolCall {}),
        read_token(ctx, log.address, IERC20::nameCall {}),
    )
    .await?;

    let (from_label, to_label) = futures::join!(
        ctx.explorer.fetch_label(event.from),
        ctx.explorer.fetch_label(event.to)
    );

    debug!("decoded {} {} transfer", event.value, symbol);

    Ok(DecodedTransfer {
        token_address: log.address,
        token_name: name,
        token_symbol: symbol,
        decimals,
        from: event.from,
        from_label,
        to: event.to,
        to_label,
        raw_value: event.value,
        formatted_value: format_units(event.value, decimals),
    })
}

/// Call a parameterless read-only accessor on a token contract
async fn read_token<C: SolCall>(ctx: &InspectContext<'_>, token: Address, call: C) -> Result<C::Return> {
    let output = ctx
        .provider
        .call(token, Bytes::from(call.abi_encode()))
        .await
        .map_err(|e| match e {
            InspectError::Timeout { .. } => e,
            other => InspectError::Call(format!("{} on {} failed: {}", C::SIGNATURE, token, other)),
        })?;

    // uint8 answers with high bits set are rejected rather than masked
    C::abi_decode_returns_validate(&output).map_err(|e| {
        InspectError::Call(format!(
            "{} on {} returned undecodable data (0x{}): {}",
            C::SIGNATURE,
            token,
            hex::encode(&output),
            e
        ))
    })
}
