//! Block explorer integration (contract ABIs and address labels)

mod client;

pub use client::{Explorer, ExplorerClient, LABEL_UNKNOWN, LABEL_WALLET};
