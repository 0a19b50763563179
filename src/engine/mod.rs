//! Inspection engine
//!
//! Drives one transaction through classification and transfer decoding
//! against whatever provider and explorer the caller wires in.

pub mod classifier;
pub mod transfers;
pub mod units;

#[cfg(test)]
pub(crate) mod testing;

use alloy_primitives::B256;
use tracing::{debug, info};

use crate::domain::NetworkDescriptor;
use crate::error::{InspectError, Result};
use crate::infrastructure::{EthereumProvider, Explorer};

pub use classifier::{classify, TransactionReport};
pub use transfers::{decode_transfers, DecodedTransfer, TransferFailure, TransferOutcome};

/// Shared handles for a single inspection
#[derive(Clone, Copy)]
pub struct InspectContext<'a> {
    pub network: &'a NetworkDescriptor,
    pub provider: &'a dyn EthereumProvider,
    pub explorer: &'a dyn Explorer,
}

impl<'a> InspectContext<'a> {
    pub fn new(
        network: &'a NetworkDescriptor,
        provider: &'a dyn EthereumProvider,
        explorer: &'a dyn Explorer,
    ) -> Self {
        Self {
            network,
            provider,
            explorer,
        }
    }
}

/// Everything learned about one transaction
#[derive(Debug)]
pub struct Inspection {
    pub network: NetworkDescriptor,
    pub hash: B256,
    /// `None` for pre-Byzantium receipts
    pub status: Option<bool>,
    pub report: TransactionReport,
    /// One outcome per Transfer log, in receipt order
    pub transfers: Vec<TransferOutcome>,
}

impl Inspection {
    pub fn decoded_transfers(&self) -> impl Iterator<Item = &DecodedTransfer> {
        self.transfers.iter().filter_map(|t| t.as_ref().ok())
    }

    pub fn failed_transfers(&self) -> impl Iterator<Item = &TransferFailure> {
        self.transfers.iter().filter_map(|t| t.as_ref().err())
    }
}

/// Inspect the transaction `hash` on `ctx.network`
///
/// Classification errors abort the inspection; transfer logs that fail to
/// decode are kept as failures next to the successful ones.
pub async fn inspect(ctx: &InspectContext<'_>, hash: B256) -> Result<Inspection> {
    info!(
        "inspecting {} on {} via {}",
        hash,
        ctx.network.name,
        ctx.provider.endpoint_name()
    );

    let tx = ctx
        .provider
        .get_transaction(hash)
        .await?
        .ok_or_else(|| InspectError::TransactionNotFound(hash.to_string()))?;

    let mut report = classify(ctx, &tx).await?;
    debug!("{} classified as {}", hash, report.kind());

    let receipt = ctx
        .provider
        .get_receipt(hash)
        .await?
        .ok_or_else(|| InspectError::TransactionNotFound(format!("{} (no receipt yet)", hash)))?;
    report.attach_receipt(&receipt);

    let transfers = decode_transfers(ctx, &receipt).await;
    debug!(
        "{} of {} logs decoded as transfers",
        transfers.iter().filter(|t| t.is_ok()).count(),
        receipt.logs.len()
    );

    Ok(Inspection {
        network: ctx.network.clone(),
        hash,
        status: receipt.status,
        report,
        transfers,
    })
}
