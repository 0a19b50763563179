//! Builds selector tables from JSON interface descriptions

use alloy_json_abi::JsonAbi;

use crate::domain::abi::{AbiRegistry, FunctionSignature, ParamSpec};
use crate::error::{InspectError, Result};

/// Parse an interface description from its JSON text
///
/// Explorers return an error sentence instead of JSON for unverified
/// contracts, which surfaces here as a decode error.
pub fn parse_json_abi(text: &str) -> Result<JsonAbi> {
    serde_json::from_str::<JsonAbi>(text.trim())
        .map_err(|e| InspectError::Decode(format!("invalid contract ABI ({}): {}", e, preview(text))))
}

/// Index every function of `abi` by its selector
pub fn registry_from_abi(abi: &JsonAbi) -> AbiRegistry {
    let mut registry = AbiRegistry::new();

    for function in abi.functions() {
        let inputs = function
            .inputs
            .iter()
            .map(|input| ParamSpec {
                name: input.name.clone(),
                kind: input.selector_type().into_owned(),
            })
            .collect();

        registry.insert(FunctionSignature {
            selector: function.selector().0,
            name: function.name.clone(),
            signature: function.signature(),
            inputs,
        });
    }

    registry
}

fn preview(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= 80 {
        text.to_string()
    } else {
        format!("{}…", text.chars().take(80).collect::<String>())
    }
}
