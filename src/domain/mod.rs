//! Domain models and contracts
//!
//! Types here are independent of the RPC and HTTP transports.

pub mod abi;
pub mod network;
pub mod transaction;

pub use network::{NetworkDescriptor, NetworkRegistry};
pub use transaction::{LogEntry, Transaction, TransactionReceipt};
