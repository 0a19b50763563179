//! txlens - inspect a single EVM transaction
//!
//! Classifies the transaction as a plain transfer, a contract call or a
//! contract creation, decodes contract calls against the explorer-verified
//! interface, and decodes every ERC-20 `Transfer` log of its receipt.

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod infrastructure;
pub mod output;

pub use domain::{NetworkDescriptor, NetworkRegistry};
pub use engine::{inspect, InspectContext, Inspection};
pub use error::{InspectError, Result};
