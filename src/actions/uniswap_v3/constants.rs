//! Uniswap V3 pool ABI

use alloy::json_abi::JsonAbi;
use std::sync::LazyLock;

/// The read-only pool methods used by the actions and quote helpers
const UNISWAP_V3_POOL_ABI_JSON: &str = r#"[
  {
    "type": "function",
    "name": "slot0",
    "stateMutability": "view",
    "inputs": [],
    "outputs": [
      { "name": "sqrtPriceX96", "type": "uint160", "internalType": "uint160" },
      { "name": "tick", "type": "int24", "internalType": "int24" },
      { "name": "observationIndex", "type": "uint16", "internalType": "uint16" },
      { "name": "observationCardinality", "type": "uint16", "internalType": "uint16" },
      { "name": "observationCardinalityNext", "type": "uint16", "internalType": "uint16" },
      { "name": "feeProtocol", "type": "uint8", "internalType": "uint8" },
      { "name": "unlocked", "type": "bool", "internalType": "bool" }
    ]
  },
  {
    "type": "function",
    "name": "liquidity",
    "stateMutability": "view",
    "inputs": [],
    "outputs": [{ "name": "", "type": "uint128", "internalType": "uint128" }]
  },
  {
    "type": "function",
    "name": "fee",
    "stateMutability": "view",
    "inputs": [],
    "outputs": [{ "name": "", "type": "uint24", "internalType": "uint24" }]
  },
  {
    "type": "function",
    "name": "token0",
    "stateMutability": "view",
    "inputs": [],
    "outputs": [{ "name": "", "type": "address", "internalType": "address" }]
  },
  {
    "type": "function",
    "name": "token1",
    "stateMutability": "view",
    "inputs": [],
    "outputs": [{ "name": "", "type": "address", "internalType": "address" }]
  }
]"#;

pub static UNISWAP_V3_POOL_ABI: LazyLock<JsonAbi> = LazyLock::new(|| {
    serde_json::from_str(UNISWAP_V3_POOL_ABI_JSON).expect("Uniswap V3 pool ABI is valid JSON")
});
