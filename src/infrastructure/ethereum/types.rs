//! Parsing of raw JSON-RPC responses into domain types

use alloy::primitives::{Address, Bytes, B256, U256};

use crate::domain::{LogEntry, Transaction, TransactionReceipt};
use crate::error::{InspectError, Result};

/// Parse an `eth_getTransactionByHash` result
pub(crate) fn parse_raw_transaction(json: &serde_json::Value) -> Result<Transaction> {
    let hash = parse_b256(required_str(json, "hash")?)?;
    let from = parse_address(required_str(json, "from")?)?;
    let to = match json.get("to").and_then(|v| v.as_str()) {
        Some(to) => Some(parse_address(to)?),
        None => None,
    };
    let value = parse_hex_u256(json.get("value").and_then(|v| v.as_str()).unwrap_or("0x0"))?;

    // Some nodes still name the call data field "data"
    let input = json
        .get("input")
        .or_else(|| json.get("data"))
        .and_then(|v| v.as_str())
        .unwrap_or("0x");

    Ok(Transaction {
        hash,
        from,
        to,
        value,
        input: parse_hex_bytes(input)?,
    })
}

/// Parse an `eth_getTransactionReceipt` result
pub(crate) fn parse_raw_receipt(json: &serde_json::Value) -> Result<TransactionReceipt> {
    let status = json
        .get("status")
        .and_then(|v| v.as_str())
        .map(parse_hex_u256)
        .transpose()?
        .map(|status| status == U256::from(1));

    let contract_address = match json.get("contractAddress").and_then(|v| v.as_str()) {
        Some(addr) => Some(parse_address(addr)?),
        None => None,
    };

    let logs = json
        .get("logs")
        .and_then(|v| v.as_array())
        .map(|logs| logs.iter().map(parse_raw_log).collect::<Result<Vec<_>>>())
        .transpose()?
        .unwrap_or_default();

    Ok(TransactionReceipt {
        status,
        contract_address,
        logs,
    })
}

fn parse_raw_log(json: &serde_json::Value) -> Result<LogEntry> {
    let address = parse_address(required_str(json, "address")?)?;
    let topics = json
        .get("topics")
        .and_then(|v| v.as_array())
        .map(|topics| {
            topics
                .iter()
                .map(|topic| {
                    topic
                        .as_str()
                        .ok_or_else(|| InspectError::Rpc(format!("non-string log topic: {}", topic)))
                        .and_then(parse_b256)
                })
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?
        .unwrap_or_default();
    let data = parse_hex_bytes(json.get("data").and_then(|v| v.as_str()).unwrap_or("0x"))?;

    Ok(LogEntry {
        address,
        topics,
        data,
    })
}

fn required_str<'a>(json: &'a serde_json::Value, field: &str) -> Result<&'a str> {
    json.get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| InspectError::Rpc(format!("response is missing field \"{}\"", field)))
}

fn parse_address(s: &str) -> Result<Address> {
    s.parse::<Address>()
        .map_err(|e| InspectError::Rpc(format!("invalid address {}: {}", s, e)))
}

fn parse_b256(s: &str) -> Result<B256> {
    s.parse::<B256>()
        .map_err(|e| InspectError::Rpc(format!("invalid hash {}: {}", s, e)))
}

/// Parse a hex quantity ("0x1bc16d674ec80000") to U256
pub(crate) fn parse_hex_u256(s: &str) -> Result<U256> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 16)
        .map_err(|e| InspectError::Rpc(format!("invalid quantity {}: {}", s, e)))
}

/// Parse hex data ("0x...") to bytes
pub(crate) fn parse_hex_bytes(s: &str) -> Result<Bytes> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(digits)
        .map(Bytes::from)
        .map_err(|e| InspectError::Rpc(format!("invalid hex data: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_wallet_transaction() {
        let tx = parse_raw_transaction(&json!({
            "hash": "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060",
            "from": "0xa1e4380a3b1f749673e270229993ee55f35663b4",
            "to": "0x5df9b87991262f6ba471f09758cde1c0fc1de734",
            "value": "0x7a69",
            "input": "0x",
            "type": "0x0"
        }))
        .unwrap();

        assert_eq!(tx.value, U256::from(31337));
        assert!(tx.input.is_empty());
        assert!(tx.to.is_some());
    }

    #[test]
    fn test_parse_contract_creation() {
        let tx = parse_raw_transaction(&json!({
            "hash": "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060",
            "from": "0xa1e4380a3b1f749673e270229993ee55f35663b4",
            "to": null,
            "value": "0x0",
            "input": "0x6080604052"
        }))
        .unwrap();

        assert!(tx.to.is_none());
        assert_eq!(tx.input.len(), 5);
    }

    #[test]
    fn test_parse_transaction_missing_from() {
        let err = parse_raw_transaction(&json!({
            "hash": "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("from"));
    }

    #[test]
    fn test_parse_receipt_logs() {
        let receipt = parse_raw_receipt(&json!({
            "status": "0x1",
            "contractAddress": null,
            "logs": [{
                "address": "0xdac17f958d2ee523a2206206994597c13d831ec7",
                "topics": [
                    "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
                    "0x000000000000000000000000a1e4380a3b1f749673e270229993ee55f35663b4",
                    "0x0000000000000000000000005df9b87991262f6ba471f09758cde1c0fc1de734"
                ],
                "data": "0x00000000000000000000000000000000000000000000000000000000002625a0"
            }]
        }))
        .unwrap();

        assert_eq!(receipt.status, Some(true));
        assert_eq!(receipt.logs.len(), 1);
        assert_eq!(receipt.logs[0].topics.len(), 3);
        assert_eq!(receipt.logs[0].data.len(), 32);
    }

    #[test]
    fn test_parse_hex_u256_large() {
        // 123456789012345678901 does not fit in u64
        let value = parse_hex_u256("0x6b14e9f812f366c35").unwrap();
        assert_eq!(value.to_string(), "123456789012345678901");
        assert_eq!(parse_hex_u256("0x").unwrap(), U256::ZERO);
    }
}
