//! ABI decoder trait and types

use serde::{Deserialize, Serialize};

use super::FunctionSignature;
use crate::error::Result;

/// A decoded function argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedArg {
    /// Parameter name (or "arg{n}" if unnamed)
    pub name: String,
    /// Solidity type (e.g., "address", "uint256", "(uint256,address)")
    pub kind: String,
    /// Decoded value as a formatted string
    pub value: String,
}

/// Result of decoding a function call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedCall {
    pub function_name: String,
    /// Full function signature (e.g., "transfer(address,uint256)")
    pub signature: String,
    pub arguments: Vec<DecodedArg>,
}

/// Decodes call data against a selector table
pub trait AbiDecoder: Send + Sync {
    /// Decode calldata (selector included) with a known function
    fn decode_calldata(&self, function: &FunctionSignature, data: &[u8]) -> Result<DecodedCall>;

    /// Decode calldata by looking up its leading selector
    ///
    /// Fails with a decode error when no entry matches the selector.
    fn decode(&self, data: &[u8]) -> Result<DecodedCall>;
}
