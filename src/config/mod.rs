use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{NetworkDescriptor, NetworkRegistry};

/// Deadline applied to every RPC and explorer round trip unless overridden
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// A chain known out of the box; endpoints come from the environment
#[derive(Debug, Clone, Copy)]
pub struct BuiltinNetwork {
    pub name: &'static str,
    pub symbol: &'static str,
    pub rpc_env: &'static str,
    pub api_url_env: &'static str,
    pub api_key_env: &'static str,
}

pub const BUILTIN_NETWORKS: &[BuiltinNetwork] = &[
    BuiltinNetwork {
        name: "Ethereum",
        symbol: "ETH",
        rpc_env: "ETHEREUM_RPC",
        api_url_env: "ETHERSCAN_API_URL",
        api_key_env: "ETHERSCAN_API_KEY",
    },
    BuiltinNetwork {
        name: "BSC",
        symbol: "BNB",
        rpc_env: "BSC_RPC",
        api_url_env: "BSCSCAN_API_URL",
        api_key_env: "BSCSCAN_API_KEY",
    },
    BuiltinNetwork {
        name: "Polygon",
        symbol: "POL",
        rpc_env: "POLYGON_RPC",
        api_url_env: "POLYGONSCAN_API_URL",
        api_key_env: "POLYGONSCAN_API_KEY",
    },
    BuiltinNetwork {
        name: "Fantom",
        symbol: "FTM",
        rpc_env: "FANTOM_RPC",
        api_url_env: "FTMSCAN_API_URL",
        api_key_env: "FTMSCAN_API_KEY",
    },
    BuiltinNetwork {
        name: "Optimism",
        symbol: "ETH",
        rpc_env: "OPTIMISM_RPC",
        api_url_env: "OPTIMISM_SCAN_API_URL",
        api_key_env: "OPTIMISM_SCAN_API_KEY",
    },
    BuiltinNetwork {
        name: "Arbitrum",
        symbol: "ETH",
        rpc_env: "ARBITRUM_RPC",
        api_url_env: "ARBISCAN_API_URL",
        api_key_env: "ARBISCAN_API_KEY",
    },
];

/// `[[networks]]` entry of the config file
///
/// An entry whose name matches a built-in network overrides the fields it
/// sets; any other name adds a new network.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
    pub symbol: Option<String>,
    pub rpc: Option<String>,
    pub explorer_api_url: Option<String>,
    pub explorer_api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub networks: Vec<NetworkConfig>,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Build the network registry from the process environment
    pub fn registry(&self) -> NetworkRegistry {
        self.registry_with(|key| std::env::var(key).ok())
    }

    /// Build the network registry with a custom variable lookup
    pub fn registry_with(&self, env: impl Fn(&str) -> Option<String>) -> NetworkRegistry {
        let lookup = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut networks: Vec<NetworkDescriptor> = BUILTIN_NETWORKS
            .iter()
            .map(|builtin| NetworkDescriptor {
                name: builtin.name.to_string(),
                symbol: builtin.symbol.to_string(),
                rpc_endpoint: lookup(builtin.rpc_env),
                explorer_api_endpoint: lookup(builtin.api_url_env),
                explorer_api_key: lookup(builtin.api_key_env),
            })
            .collect();

        for entry in &self.networks {
            let name = entry.name.trim();
            if name.is_empty() {
                warn!("ignoring [[networks]] entry without a name");
                continue;
            }

            match networks
                .iter_mut()
                .find(|net| net.name.eq_ignore_ascii_case(name))
            {
                Some(existing) => {
                    debug!("config overrides network {}", existing.name);
                    if let Some(symbol) = non_empty(&entry.symbol) {
                        existing.symbol = symbol;
                    }
                    if let Some(rpc) = non_empty(&entry.rpc) {
                        existing.rpc_endpoint = Some(rpc);
                    }
                    if let Some(url) = non_empty(&entry.explorer_api_url) {
                        existing.explorer_api_endpoint = Some(url);
                    }
                    if let Some(key) = non_empty(&entry.explorer_api_key) {
                        existing.explorer_api_key = Some(key);
                    }
                }
                None => {
                    debug!("config adds network {}", name);
                    networks.push(NetworkDescriptor {
                        name: name.to_string(),
                        symbol: non_empty(&entry.symbol).unwrap_or_else(|| "ETH".to_string()),
                        rpc_endpoint: non_empty(&entry.rpc),
                        explorer_api_endpoint: non_empty(&entry.explorer_api_url),
                        explorer_api_key: non_empty(&entry.explorer_api_key),
                    });
                }
            }
        }

        NetworkRegistry::new(networks)
    }
}

/// Log what the selected network is missing; inspection still proceeds
pub fn warn_missing_endpoints(network: &NetworkDescriptor) {
    let builtin = BUILTIN_NETWORKS
        .iter()
        .find(|b| b.name.eq_ignore_ascii_case(&network.name));

    if network.rpc_endpoint.is_none() {
        match builtin {
            Some(b) => warn!("{} has no RPC endpoint (set {})", network.name, b.rpc_env),
            None => warn!("{} has no RPC endpoint", network.name),
        }
    }
    if network.explorer_api_endpoint.is_none() {
        match builtin {
            Some(b) => warn!(
                "{} has no explorer API endpoint (set {}); contract calls cannot be decoded",
                network.name, b.api_url_env
            ),
            None => warn!(
                "{} has no explorer API endpoint; contract calls cannot be decoded",
                network.name
            ),
        }
    }
}

/// Load the config file
///
/// An explicit path must exist. Otherwise the default location is tried and
/// a missing file yields the default config.
pub fn load(path: Option<&Path>) -> anyhow::Result<Config> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => match config_path() {
            Some(path) => (path, false),
            None => return Ok(Config::default()),
        },
    };

    if !required && !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = toml::from_str::<Config>(&content)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    debug!("loaded config from {}", path.display());
    Ok(config)
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("TXLENS_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("txlens").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("txlens").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "txlens", "txlens")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
