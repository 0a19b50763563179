//! ABI registry - function signatures indexed by selector

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A function parameter specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name (may be empty)
    pub name: String,
    /// Canonical Solidity type (e.g., "address", "uint256", "(uint256,address)[]")
    pub kind: String,
}

/// A function signature with its metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// 4-byte function selector
    pub selector: [u8; 4],
    /// Function name
    pub name: String,
    /// Full signature string (e.g., "transfer(address,uint256)")
    pub signature: String,
    /// Input parameters
    pub inputs: Vec<ParamSpec>,
}

impl FunctionSignature {
    /// Get selector as hex string
    pub fn selector_hex(&self) -> String {
        format!("0x{}", hex::encode(self.selector))
    }
}

/// Selector table for one contract's interface description
#[derive(Debug, Default, Clone)]
pub struct AbiRegistry {
    functions: HashMap<[u8; 4], FunctionSignature>,
}

impl AbiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a function signature
    ///
    /// Note: first function for a given selector wins (no overwrite)
    pub fn insert(&mut self, function: FunctionSignature) {
        self.functions.entry(function.selector).or_insert(function);
    }

    /// Look up a function by selector
    pub fn lookup(&self, selector: [u8; 4]) -> Option<&FunctionSignature> {
        self.functions.get(&selector)
    }

    /// Look up the function addressed by the leading bytes of `calldata`
    pub fn lookup_calldata(&self, calldata: &[u8]) -> Option<&FunctionSignature> {
        let selector: [u8; 4] = calldata.get(..4)?.try_into().ok()?;
        self.lookup(selector)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionSignature> {
        self.functions.values()
    }
}
