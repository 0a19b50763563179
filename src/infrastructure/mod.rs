//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - Alloy-based JSON-RPC provider
//! - Etherscan-compatible explorer client
//! - Selector tables and call data decoding using alloy-dyn-abi

pub mod abi;
pub mod ethereum;
pub mod explorer;

pub use abi::AlloyAbiDecoder;
pub use ethereum::{AlloyProvider, EthereumProvider};
pub use explorer::{Explorer, ExplorerClient};
