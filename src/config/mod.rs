//! Configuration for the onchain agent actions

pub mod rpc;

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// Re-export RPC config
pub use rpc::RpcConfig;

/// Faucet API key environment variable name (default)
pub const FAUCET_API_KEY_ENV: &str = "CDP_API_KEY";

/// Networks the actions can be pointed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NetworkId {
    BaseSepolia,
    BaseMainnet,
    EthereumMainnet,
    PolygonMainnet,
    ArbitrumMainnet,
}

impl NetworkId {
    pub const ALL: [NetworkId; 5] = [
        NetworkId::BaseSepolia,
        NetworkId::BaseMainnet,
        NetworkId::EthereumMainnet,
        NetworkId::PolygonMainnet,
        NetworkId::ArbitrumMainnet,
    ];

    pub fn chain_id(&self) -> u64 {
        match self {
            NetworkId::BaseSepolia => rpc::chains::BASE_SEPOLIA,
            NetworkId::BaseMainnet => rpc::chains::BASE,
            NetworkId::EthereumMainnet => rpc::chains::ETHEREUM,
            NetworkId::PolygonMainnet => rpc::chains::POLYGON,
            NetworkId::ArbitrumMainnet => rpc::chains::ARBITRUM,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkId::BaseSepolia => "base-sepolia",
            NetworkId::BaseMainnet => "base-mainnet",
            NetworkId::EthereumMainnet => "ethereum-mainnet",
            NetworkId::PolygonMainnet => "polygon-mainnet",
            NetworkId::ArbitrumMainnet => "arbitrum-mainnet",
        }
    }

    /// Block explorer base URL, used to build transaction links
    pub fn explorer_url(&self) -> &'static str {
        match self {
            NetworkId::BaseSepolia => "https://sepolia.basescan.org",
            NetworkId::BaseMainnet => "https://basescan.org",
            NetworkId::EthereumMainnet => "https://etherscan.io",
            NetworkId::PolygonMainnet => "https://polygonscan.com",
            NetworkId::ArbitrumMainnet => "https://arbiscan.io",
        }
    }

    pub fn transaction_link(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url(), tx_hash)
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        NetworkId::ALL
            .into_iter()
            .find(|network| network.as_str() == s)
            .ok_or_else(|| Error::UnsupportedNetwork(s.to_string()))
    }
}

/// Faucet service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaucetConfig {
    /// Base URL of the faucet service
    pub base_url: String,
    /// Environment variable holding the faucet API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_api_key_env() -> String {
    FAUCET_API_KEY_ENV.to_string()
}

impl Default for FaucetConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.cdp.coinbase.com/platform".to_string(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Network the wallet operates on
    pub network_id: NetworkId,
    /// Faucet service settings
    #[serde(default)]
    pub faucet: FaucetConfig,
    /// Interval between receipt polls while waiting for confirmation (milliseconds)
    pub poll_interval_ms: u64,
}

impl Config {
    /// Load a JSON config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::Config(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network_id: NetworkId::BaseSepolia,
            faucet: FaucetConfig::default(),
            poll_interval_ms: 2_000,
        }
    }
}
