//! Call data decoder built on alloy-dyn-abi

use alloy_dyn_abi::{DynSolType, DynSolValue};

use crate::domain::abi::{AbiDecoder, AbiRegistry, DecodedArg, DecodedCall, FunctionSignature};
use crate::error::{InspectError, Result};

/// Decodes call data generically from a selector table
#[derive(Debug, Clone)]
pub struct AlloyAbiDecoder {
    registry: AbiRegistry,
}

impl AlloyAbiDecoder {
    pub fn new(registry: AbiRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &AbiRegistry {
        &self.registry
    }
}

impl AbiDecoder for AlloyAbiDecoder {
    fn decode_calldata(&self, function: &FunctionSignature, data: &[u8]) -> Result<DecodedCall> {
        let Some(selector) = data.get(..4) else {
            return Err(InspectError::Decode(
                "calldata too short (need at least 4 bytes for selector)".to_string(),
            ));
        };
        if *selector != function.selector {
            return Err(InspectError::Decode(format!(
                "selector mismatch: got 0x{}, expected {}",
                hex::encode(selector),
                function.selector_hex()
            )));
        }

        let types = function
            .inputs
            .iter()
            .map(|param| {
                param.kind.parse::<DynSolType>().map_err(|e| {
                    InspectError::Decode(format!(
                        "unsupported type '{}' for param '{}': {}",
                        param.kind, param.name, e
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let values = if types.is_empty() {
            Vec::new()
        } else {
            let decoded = DynSolType::Tuple(types)
                .abi_decode_params(&data[4..])
                .map_err(|e| {
                    InspectError::Decode(format!(
                        "failed to decode arguments of {}: {}",
                        function.signature, e
                    ))
                })?;
            match decoded {
                DynSolValue::Tuple(values) => values,
                other => vec![other],
            }
        };

        let arguments = function
            .inputs
            .iter()
            .zip(values.iter())
            .enumerate()
            .map(|(idx, (param, value))| DecodedArg {
                name: if param.name.trim().is_empty() {
                    format!("arg{}", idx)
                } else {
                    param.name.clone()
                },
                kind: param.kind.clone(),
                value: format_value(value),
            })
            .collect();

        Ok(DecodedCall {
            function_name: function.name.clone(),
            signature: function.signature.clone(),
            arguments,
        })
    }

    fn decode(&self, data: &[u8]) -> Result<DecodedCall> {
        let function = self.registry.lookup_calldata(data).ok_or_else(|| {
            let selector = data
                .get(..4)
                .map(|s| format!("0x{}", hex::encode(s)))
                .unwrap_or_else(|| format!("0x{}", hex::encode(data)));
            InspectError::Decode(format!(
                "no function in the contract ABI matches selector {}",
                selector
            ))
        })?;
        self.decode_calldata(function, data)
    }
}

/// Render a decoded value for display
fn format_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::FixedBytes(word, size) => {
            format!("0x{}", hex::encode(&word.as_slice()[..(*size).min(32)]))
        }
        DynSolValue::Address(addr) => addr.to_checksum(None),
        DynSolValue::Function(func) => format!("0x{}", hex::encode(func.as_slice())),
        DynSolValue::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
        DynSolValue::String(s) => format!("{:?}", s),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            let items: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", items.join(", "))
        }
        DynSolValue::Tuple(fields) => {
            let fields: Vec<String> = fields.iter().map(format_value).collect();
            format!("({})", fields.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::abi::ParamSpec;

    fn transfer() -> FunctionSignature {
        FunctionSignature {
            selector: [0xa9, 0x05, 0x9c, 0xbb],
            name: "transfer".to_string(),
            signature: "transfer(address,uint256)".to_string(),
            inputs: vec![
                ParamSpec {
                    name: "to".to_string(),
                    kind: "address".to_string(),
                },
                ParamSpec {
                    name: String::new(),
                    kind: "uint256".to_string(),
                },
            ],
        }
    }

    fn decoder() -> AlloyAbiDecoder {
        let mut registry = AbiRegistry::new();
        registry.insert(transfer());
        AlloyAbiDecoder::new(registry)
    }

    #[test]
    fn test_decode_transfer() {
        // transfer(0x1234567890123456789012345678901234567890, 1000)
        let calldata = hex::decode(
            "a9059cbb000000000000000000000000123456789012345678901234567890123456789000000000000000000000000000000000000000000000000000000000000003e8"
        ).unwrap();

        let result = decoder().decode(&calldata).unwrap();

        assert_eq!(result.function_name, "transfer");
        assert_eq!(result.arguments.len(), 2);
        assert_eq!(result.arguments[0].name, "to");
        assert_eq!(
            result.arguments[0].value.to_lowercase(),
            "0x1234567890123456789012345678901234567890"
        );
        assert_eq!(result.arguments[1].name, "arg1");
        assert_eq!(result.arguments[1].value, "1000");
    }

    #[test]
    fn test_unknown_selector() {
        let calldata = hex::decode("deadbeef").unwrap();
        let err = decoder().decode(&calldata).unwrap_err();
        assert!(matches!(err, InspectError::Decode(_)));
        assert!(err.to_string().contains("0xdeadbeef"));
    }

    #[test]
    fn test_short_calldata() {
        let err = decoder().decode(&[0xa9, 0x05]).unwrap_err();
        assert!(matches!(err, InspectError::Decode(_)));
    }

    #[test]
    fn test_selector_mismatch() {
        let calldata = hex::decode("deadbeef").unwrap();
        let err = decoder().decode_calldata(&transfer(), &calldata).unwrap_err();
        assert!(err.to_string().contains("selector mismatch"));
    }

    #[test]
    fn test_truncated_arguments() {
        let calldata = hex::decode("a9059cbb0000").unwrap();
        let err = decoder().decode(&calldata).unwrap_err();
        assert!(matches!(err, InspectError::Decode(_)));
    }
}
