//! ABI infrastructure - selector tables and call data decoding with alloy

mod decoder;
mod loader;

pub use decoder::AlloyAbiDecoder;
pub use loader::{parse_json_abi, registry_from_abi};
