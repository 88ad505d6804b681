//! Zora WOW token ABI, Uniswap quoter ABI and per-network addresses

use crate::config::NetworkId;
use crate::{Error, Result};
use alloy::json_abi::JsonAbi;
use alloy::primitives::{address, Address};
use std::sync::LazyLock;

/// `marketType()` value once a token has left the bonding curve
pub const MARKET_TYPE_UNISWAP_POOL: u8 = 1;

const WOW_ABI_JSON: &str = r#"[
  {
    "type": "function",
    "name": "buy",
    "stateMutability": "payable",
    "inputs": [
      { "name": "recipient", "type": "address", "internalType": "address" },
      { "name": "refundRecipient", "type": "address", "internalType": "address" },
      { "name": "orderReferrer", "type": "address", "internalType": "address" },
      { "name": "comment", "type": "string", "internalType": "string" },
      { "name": "expectedMarketType", "type": "uint8", "internalType": "enum IWow.MarketType" },
      { "name": "minOrderSize", "type": "uint256", "internalType": "uint256" },
      { "name": "sqrtPriceLimitX96", "type": "uint160", "internalType": "uint160" }
    ],
    "outputs": [{ "name": "", "type": "uint256", "internalType": "uint256" }]
  },
  {
    "type": "function",
    "name": "sell",
    "stateMutability": "nonpayable",
    "inputs": [
      { "name": "tokensToSell", "type": "uint256", "internalType": "uint256" },
      { "name": "recipient", "type": "address", "internalType": "address" },
      { "name": "orderReferrer", "type": "address", "internalType": "address" },
      { "name": "comment", "type": "string", "internalType": "string" },
      { "name": "expectedMarketType", "type": "uint8", "internalType": "enum IWow.MarketType" },
      { "name": "minPayoutSize", "type": "uint256", "internalType": "uint256" },
      { "name": "sqrtPriceLimitX96", "type": "uint160", "internalType": "uint160" }
    ],
    "outputs": [{ "name": "", "type": "uint256", "internalType": "uint256" }]
  },
  {
    "type": "function",
    "name": "getEthBuyQuote",
    "stateMutability": "view",
    "inputs": [{ "name": "ethOrderSize", "type": "uint256", "internalType": "uint256" }],
    "outputs": [{ "name": "", "type": "uint256", "internalType": "uint256" }]
  },
  {
    "type": "function",
    "name": "getTokenSellQuote",
    "stateMutability": "view",
    "inputs": [{ "name": "tokenOrderSize", "type": "uint256", "internalType": "uint256" }],
    "outputs": [{ "name": "", "type": "uint256", "internalType": "uint256" }]
  },
  {
    "type": "function",
    "name": "marketType",
    "stateMutability": "view",
    "inputs": [],
    "outputs": [{ "name": "", "type": "uint8", "internalType": "enum IWow.MarketType" }]
  },
  {
    "type": "function",
    "name": "poolAddress",
    "stateMutability": "view",
    "inputs": [],
    "outputs": [{ "name": "", "type": "address", "internalType": "address" }]
  },
  {
    "type": "function",
    "name": "balanceOf",
    "stateMutability": "view",
    "inputs": [{ "name": "account", "type": "address", "internalType": "address" }],
    "outputs": [{ "name": "", "type": "uint256", "internalType": "uint256" }]
  },
  {
    "type": "function",
    "name": "totalSupply",
    "stateMutability": "view",
    "inputs": [],
    "outputs": [{ "name": "", "type": "uint256", "internalType": "uint256" }]
  }
]"#;

const UNISWAP_QUOTER_ABI_JSON: &str = r#"[
  {
    "type": "function",
    "name": "quoteExactInputSingle",
    "stateMutability": "nonpayable",
    "inputs": [
      {
        "name": "params",
        "type": "tuple",
        "internalType": "struct IQuoterV2.QuoteExactInputSingleParams",
        "components": [
          { "name": "tokenIn", "type": "address", "internalType": "address" },
          { "name": "tokenOut", "type": "address", "internalType": "address" },
          { "name": "amountIn", "type": "uint256", "internalType": "uint256" },
          { "name": "fee", "type": "uint24", "internalType": "uint24" },
          { "name": "sqrtPriceLimitX96", "type": "uint160", "internalType": "uint160" }
        ]
      }
    ],
    "outputs": [
      { "name": "amountOut", "type": "uint256", "internalType": "uint256" },
      { "name": "sqrtPriceX96After", "type": "uint160", "internalType": "uint160" },
      { "name": "initializedTicksCrossed", "type": "uint32", "internalType": "uint32" },
      { "name": "gasEstimate", "type": "uint256", "internalType": "uint256" }
    ]
  }
]"#;

pub static WOW_ABI: LazyLock<JsonAbi> =
    LazyLock::new(|| serde_json::from_str(WOW_ABI_JSON).expect("WOW ABI is valid JSON"));

pub static UNISWAP_QUOTER_ABI: LazyLock<JsonAbi> = LazyLock::new(|| {
    serde_json::from_str(UNISWAP_QUOTER_ABI_JSON).expect("Uniswap quoter ABI is valid JSON")
});

/// Contracts the WOW actions depend on for one network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WowAddresses {
    pub weth: Address,
    pub uniswap_quoter: Address,
}

impl WowAddresses {
    /// WOW tokens only exist on Base Sepolia and Base Mainnet
    pub fn for_network(network: NetworkId) -> Result<Self> {
        match network {
            NetworkId::BaseSepolia => Ok(Self {
                weth: address!("4200000000000000000000000000000000000006"),
                uniswap_quoter: address!("c5290058841028f1614f3a6f0f5816cad0df5e27"),
            }),
            NetworkId::BaseMainnet => Ok(Self {
                weth: address!("4200000000000000000000000000000000000006"),
                uniswap_quoter: address!("3d4e44eb1374240ce5f1b871ab261cd16335b76a"),
            }),
            other => Err(Error::UnsupportedNetwork(format!(
                "{} (WOW actions support base-sepolia and base-mainnet)",
                other
            ))),
        }
    }
}
