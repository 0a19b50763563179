//! Selector tables and decoded call data
//!
//! Calls are matched against a contract's verified interface purely by data:
//! the leading four bytes select a function signature, whose parameter kinds
//! drive a generic argument decoder.

mod decoder;
mod registry;

pub use decoder::{AbiDecoder, DecodedArg, DecodedCall};
pub use registry::{AbiRegistry, FunctionSignature, ParamSpec};
