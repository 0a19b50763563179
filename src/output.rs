//! Text and JSON rendering of an [`Inspection`]

use std::fmt::Write as _;

use alloy_primitives::{Address, B256};
use serde::Serialize;

use crate::domain::abi::DecodedCall;
use crate::domain::NetworkDescriptor;
use crate::engine::{DecodedTransfer, Inspection, TransactionReport};

const RULE: &str = "----------------";

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{} {} {}", RULE, title, RULE);
}

/// Human-readable report, one block per section
pub fn render_text(inspection: &Inspection) -> String {
    let mut out = String::new();
    let symbol = &inspection.network.symbol;

    match &inspection.report {
        TransactionReport::Wallet {
            from,
            to,
            formatted_value,
            ..
        } => {
            heading(&mut out, "Transaction Content");
            let _ = writeln!(out, "From: {}", from);
            let _ = writeln!(out, "To: {}", to);
            let _ = writeln!(out, "Value: {} ({})", formatted_value, symbol);
        }
        TransactionReport::Contract {
            from,
            to,
            to_label,
            formatted_value,
            call,
            ..
        } => {
            heading(&mut out, "Transaction Action");
            let _ = writeln!(out, "Function Name: {}", call.function_name);
            let _ = writeln!(out, "Caller Address: {}", from);
            let _ = writeln!(out, "Contract Address: {} ({})", to, to_label);
            let _ = writeln!(out, "Value: {} ({})", formatted_value, symbol);
            write_arguments(&mut out, call);
        }
        TransactionReport::ContractCreation {
            from,
            created,
            formatted_value,
            ..
        } => {
            heading(&mut out, "Contract Creation");
            let _ = writeln!(out, "Deployer: {}", from);
            match created {
                Some(address) => {
                    let _ = writeln!(out, "Contract Address: {}", address);
                }
                None => {
                    let _ = writeln!(out, "Contract Address: (not reported)");
                }
            }
            let _ = writeln!(out, "Value: {} ({})", formatted_value, symbol);
        }
    }

    if inspection.status == Some(false) {
        let _ = writeln!(out, "Status: reverted");
    }

    for transfer in &inspection.transfers {
        match transfer {
            Ok(transfer) => write_transfer(&mut out, transfer),
            Err(failure) => {
                let _ = writeln!(
                    out,
                    "warning: transfer log #{} from {} could not be decoded: {}",
                    failure.log_index, failure.token_address, failure.error
                );
            }
        }
    }

    out
}

fn write_arguments(out: &mut String, call: &DecodedCall) {
    if call.arguments.is_empty() {
        return;
    }
    let _ = writeln!(out, "Arguments:");
    for arg in &call.arguments {
        let _ = writeln!(out, "  {} ({}): {}", arg.name, arg.kind, arg.value);
    }
}

fn write_transfer(out: &mut String, transfer: &DecodedTransfer) {
    heading(out, "Transfer Details");
    let _ = writeln!(
        out,
        "Token: {} ({})",
        transfer.token_name, transfer.token_symbol
    );
    let _ = writeln!(out, "From: {} ({})", transfer.from, transfer.from_label);
    let _ = writeln!(out, "To: {} ({})", transfer.to, transfer.to_label);
    let _ = writeln!(out, "Value: {}", transfer.formatted_value);
    let _ = writeln!(out, "Token Address: {}", transfer.token_address);
}

#[derive(Serialize)]
struct InspectionJson<'a> {
    network: &'a NetworkDescriptor,
    hash: B256,
    status: Option<bool>,
    transaction: &'a TransactionReport,
    transfers: Vec<&'a DecodedTransfer>,
    failed_transfers: Vec<FailureJson>,
}

#[derive(Serialize)]
struct FailureJson {
    log_index: usize,
    token_address: Address,
    error: String,
}

/// Pretty-printed JSON document of the whole inspection
pub fn render_json(inspection: &Inspection) -> serde_json::Result<String> {
    let doc = InspectionJson {
        network: &inspection.network,
        hash: inspection.hash,
        status: inspection.status,
        transaction: &inspection.report,
        transfers: inspection.decoded_transfers().collect(),
        failed_transfers: inspection
            .failed_transfers()
            .map(|failure| FailureJson {
                log_index: failure.log_index,
                token_address: failure.token_address,
                error: failure.error.to_string(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&doc)
}
