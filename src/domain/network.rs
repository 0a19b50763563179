//! Network registry - maps chain display names to their endpoints

use serde::Serialize;

use crate::error::{InspectError, Result};

/// Connection details for one supported chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkDescriptor {
    /// Display name (e.g., "Ethereum")
    pub name: String,
    /// Native currency symbol (e.g., "ETH")
    pub symbol: String,
    /// JSON-RPC endpoint
    #[serde(skip)]
    pub rpc_endpoint: Option<String>,
    /// Etherscan-compatible API base URL
    #[serde(skip)]
    pub explorer_api_endpoint: Option<String>,
    /// Explorer API key
    #[serde(skip)]
    pub explorer_api_key: Option<String>,
}

/// Immutable set of known networks
#[derive(Debug, Clone, Default)]
pub struct NetworkRegistry {
    networks: Vec<NetworkDescriptor>,
}

impl NetworkRegistry {
    pub fn new(networks: Vec<NetworkDescriptor>) -> Self {
        Self { networks }
    }

    /// Find a network by display name, ignoring case
    pub fn resolve(&self, name: &str) -> Result<&NetworkDescriptor> {
        let wanted = name.trim();
        self.networks
            .iter()
            .find(|net| net.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InspectError::NetworkNotFound {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// Registered display names, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.networks.iter().map(|net| net.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}
