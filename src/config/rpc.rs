//! RPC endpoint configuration
//!
//! Supports multiple configuration methods following Ethereum ecosystem conventions:
//! 1. Per-chain env vars (ETH_RPC_URL, BASE_RPC_URL, etc.) - highest priority
//! 2. Provider API key (ALCHEMY_API_KEY) - builds URLs automatically
//! 3. Public RPC fallbacks - for testing only
//!
//! # Examples
//!
//! ```bash
//! # Option 1: Per-chain URLs (recommended for production)
//! export BASE_SEPOLIA_RPC_URL="https://base-sepolia.g.alchemy.com/v2/YOUR_KEY"
//! export ETH_RPC_URL="https://eth-mainnet.g.alchemy.com/v2/YOUR_KEY"
//!
//! # Option 2: Single provider API key
//! export ALCHEMY_API_KEY="YOUR_KEY"
//!
//! # Option 3: No env vars - uses public RPCs (rate limited, for testing only)
//! ```

use super::NetworkId;
use crate::{Error, Result};
use std::collections::HashMap;

/// RPC configuration for multiple chains
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// RPC URLs indexed by chain ID
    urls: HashMap<u64, String>,
}

/// Chain ID constants
pub mod chains {
    pub const ETHEREUM: u64 = 1;
    pub const ARBITRUM: u64 = 42161;
    pub const BASE: u64 = 8453;
    pub const BASE_SEPOLIA: u64 = 84532;
    pub const POLYGON: u64 = 137;
}

/// Environment variable names
mod env_vars {
    // Per-chain URLs (highest priority)
    pub const ETH_RPC_URL: &str = "ETH_RPC_URL";
    pub const ARBITRUM_RPC_URL: &str = "ARBITRUM_RPC_URL";
    pub const BASE_RPC_URL: &str = "BASE_RPC_URL";
    pub const BASE_SEPOLIA_RPC_URL: &str = "BASE_SEPOLIA_RPC_URL";
    pub const POLYGON_RPC_URL: &str = "POLYGON_RPC_URL";

    // Provider API keys
    pub const ALCHEMY_API_KEY: &str = "ALCHEMY_API_KEY";
}

/// Public RPC endpoints (rate limited, for testing only)
mod public_rpcs {
    pub const ETHEREUM: &str = "https://eth.llamarpc.com";
    pub const ARBITRUM: &str = "https://arb1.arbitrum.io/rpc";
    pub const BASE: &str = "https://mainnet.base.org";
    pub const BASE_SEPOLIA: &str = "https://sepolia.base.org";
    pub const POLYGON: &str = "https://polygon-rpc.com";
}

impl RpcConfig {
    /// Create RPC config from environment variables
    ///
    /// Priority:
    /// 1. Per-chain env vars (ETH_RPC_URL, BASE_RPC_URL, etc.)
    /// 2. ALCHEMY_API_KEY - builds URLs for all chains
    /// 3. Public RPC fallbacks (for testing only)
    pub fn from_env() -> Self {
        let mut urls = HashMap::new();

        let per_chain = [
            (env_vars::ETH_RPC_URL, chains::ETHEREUM),
            (env_vars::ARBITRUM_RPC_URL, chains::ARBITRUM),
            (env_vars::BASE_RPC_URL, chains::BASE),
            (env_vars::BASE_SEPOLIA_RPC_URL, chains::BASE_SEPOLIA),
            (env_vars::POLYGON_RPC_URL, chains::POLYGON),
        ];
        for (var, chain_id) in per_chain {
            if let Ok(url) = std::env::var(var) {
                tracing::debug!(chain_id, "Using {} for RPC", var);
                urls.insert(chain_id, url);
            }
        }

        // Priority 2: If no per-chain vars, try ALCHEMY_API_KEY
        if urls.is_empty() {
            if let Ok(key) = std::env::var(env_vars::ALCHEMY_API_KEY) {
                tracing::info!("Building RPC URLs from ALCHEMY_API_KEY");
                urls.insert(
                    chains::ETHEREUM,
                    format!("https://eth-mainnet.g.alchemy.com/v2/{}", key),
                );
                urls.insert(
                    chains::ARBITRUM,
                    format!("https://arb-mainnet.g.alchemy.com/v2/{}", key),
                );
                urls.insert(
                    chains::BASE,
                    format!("https://base-mainnet.g.alchemy.com/v2/{}", key),
                );
                urls.insert(
                    chains::BASE_SEPOLIA,
                    format!("https://base-sepolia.g.alchemy.com/v2/{}", key),
                );
                urls.insert(
                    chains::POLYGON,
                    format!("https://polygon-mainnet.g.alchemy.com/v2/{}", key),
                );
            }
        }

        // Priority 3: Fall back to public RPCs for any missing chains
        if !urls.contains_key(&chains::BASE_SEPOLIA) {
            tracing::warn!("No RPC configured for Base Sepolia, using public RPC (rate limited)");
        }
        urls.entry(chains::ETHEREUM)
            .or_insert_with(|| public_rpcs::ETHEREUM.to_string());
        urls.entry(chains::ARBITRUM)
            .or_insert_with(|| public_rpcs::ARBITRUM.to_string());
        urls.entry(chains::BASE)
            .or_insert_with(|| public_rpcs::BASE.to_string());
        urls.entry(chains::BASE_SEPOLIA)
            .or_insert_with(|| public_rpcs::BASE_SEPOLIA.to_string());
        urls.entry(chains::POLYGON)
            .or_insert_with(|| public_rpcs::POLYGON.to_string());

        Self { urls }
    }

    /// Create with explicit RPC URLs
    pub fn with_urls(urls: HashMap<u64, String>) -> Self {
        Self { urls }
    }

    /// Get RPC URL for a chain
    pub fn get(&self, chain_id: u64) -> Option<&str> {
        self.urls.get(&chain_id).map(|s| s.as_str())
    }

    /// Check if a chain is configured
    pub fn has_chain(&self, chain_id: u64) -> bool {
        self.urls.contains_key(&chain_id)
    }

    /// Parsed RPC URL for a network
    pub fn url_for(&self, network: NetworkId) -> Result<url::Url> {
        let raw = self.get(network.chain_id()).ok_or_else(|| {
            Error::Config(format!("No RPC URL configured for {}", network))
        })?;
        raw.parse()
            .map_err(|e| Error::Config(format!("Invalid RPC URL for {}: {}", network, e)))
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
