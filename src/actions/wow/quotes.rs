//! WOW token price quotes
//!
//! Tokens still on the bonding curve are quoted by the token contract itself.
//! Graduated tokens trade in a Uniswap V3 pool and are quoted through the
//! Uniswap QuoterV2.

use super::constants::{WowAddresses, MARKET_TYPE_UNISWAP_POOL, UNISWAP_QUOTER_ABI, WOW_ABI};
use crate::actions::uniswap_v3::constants::UNISWAP_V3_POOL_ABI;
use crate::capabilities::{argument_map, ArgumentMap, ContractReader, ContractValue, ReadRequest};
use crate::config::NetworkId;
use crate::{Error, Result};
use alloy::json_abi::JsonAbi;
use alloy::primitives::{Address, U256};
use serde_json::json;
use std::str::FromStr;

/// Which way a quote goes, from the token holder's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteSide {
    Buy,
    Sell,
}

/// Pool balances split into the WOW token and WETH
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    pub erc20z: U256,
    pub weth: U256,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PoolInfo {
    pub token0: Address,
    pub balance0: U256,
    pub token1: Address,
    pub balance1: U256,
    pub fee: u32,
    pub liquidity: U256,
    pub sqrt_price_x96: U256,
}

/// Result of a Uniswap V3 quote. `error` is set when no usable quote exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub amount_in: U256,
    pub amount_out: U256,
    pub balance: Option<Balance>,
    /// Pool fee as a fraction (3000 -> 0.003)
    pub fee: Option<f64>,
    pub error: Option<String>,
}

/// Utilization above which a failed quote is reported as price impact, in 1e18 units
const PRICE_IMPACT_UTILIZATION: u128 = 900_000_000_000_000_000;

async fn read(
    reader: &dyn ContractReader,
    network_id: &str,
    contract_address: &str,
    method: &str,
    abi: &JsonAbi,
    args: &ArgumentMap,
) -> Result<ContractValue> {
    reader
        .read(ReadRequest {
            network_id,
            contract_address,
            method,
            abi,
            args,
        })
        .await
}

/// Whether the token has graduated from the bonding curve to a Uniswap pool
pub async fn get_has_graduated(
    reader: &dyn ContractReader,
    network_id: &str,
    token_address: &str,
) -> Result<bool> {
    let market_type = read(
        reader,
        network_id,
        token_address,
        "marketType",
        &WOW_ABI,
        &ArgumentMap::new(),
    )
    .await?
    .as_uint()?;

    Ok(market_type == U256::from(MARKET_TYPE_UNISWAP_POOL))
}

/// The Uniswap V3 pool the token graduates into
pub async fn get_pool_address(
    reader: &dyn ContractReader,
    network_id: &str,
    token_address: &str,
) -> Result<Address> {
    read(
        reader,
        network_id,
        token_address,
        "poolAddress",
        &WOW_ABI,
        &ArgumentMap::new(),
    )
    .await?
    .as_address()
}

/// Tokens, balances, fee, liquidity and price of a Uniswap V3 pool
pub async fn get_pool_info(
    reader: &dyn ContractReader,
    network_id: &str,
    pool_address: Address,
) -> Result<PoolInfo> {
    fetch_pool_info(reader, network_id, pool_address)
        .await
        .map_err(|e| Error::Quote(format!("Failed to fetch pool information: {}", e)))
}

async fn fetch_pool_info(
    reader: &dyn ContractReader,
    network_id: &str,
    pool_address: Address,
) -> Result<PoolInfo> {
    let pool = pool_address.to_string();
    let no_args = ArgumentMap::new();
    let pool_read = |method: &'static str| {
        read(reader, network_id, &pool, method, &UNISWAP_V3_POOL_ABI, &no_args)
    };

    let (token0, token1, fee, liquidity, slot0) = futures::try_join!(
        pool_read("token0"),
        pool_read("token1"),
        pool_read("fee"),
        pool_read("liquidity"),
        pool_read("slot0"),
    )?;
    let token0 = token0.as_address()?;
    let token1 = token1.as_address()?;

    let balance_args = argument_map(json!({ "account": pool }));
    let (token0_hex, token1_hex) = (token0.to_string(), token1.to_string());
    let (balance0, balance1) = futures::try_join!(
        read(reader, network_id, &token0_hex, "balanceOf", &WOW_ABI, &balance_args),
        read(reader, network_id, &token1_hex, "balanceOf", &WOW_ABI, &balance_args),
    )?;

    let fee = fee.as_uint()?;
    Ok(PoolInfo {
        token0,
        balance0: balance0.as_uint()?,
        token1,
        balance1: balance1.as_uint()?,
        fee: u32::try_from(fee).map_err(|_| Error::Abi(format!("fee out of range: {}", fee)))?,
        liquidity: liquidity.as_uint()?,
        sqrt_price_x96: slot0.field(0)?.as_uint()?,
    })
}

/// Amount out for an exact-input single-pool swap, or zero if the quoter fails
pub async fn exact_input_single(
    reader: &dyn ContractReader,
    network: NetworkId,
    token_in: Address,
    token_out: Address,
    amount_in: U256,
    fee: u32,
) -> Result<U256> {
    let quoter = WowAddresses::for_network(network)?.uniswap_quoter;
    let args = argument_map(json!({
        "params": [
            token_in.to_string(),
            token_out.to_string(),
            amount_in.to_string(),
            fee,
            "0"
        ]
    }));

    let quoted = read(
        reader,
        network.as_str(),
        &quoter.to_string(),
        "quoteExactInputSingle",
        &UNISWAP_QUOTER_ABI,
        &args,
    )
    .await
    .and_then(|value| value.field(0)?.as_uint());

    match quoted {
        Ok(amount) => Ok(amount),
        Err(e) => {
            tracing::warn!(error = %e, "Quoter call failed");
            Ok(U256::ZERO)
        }
    }
}

/// Quote a buy or sell of `amount` through the token's Uniswap V3 pool
pub async fn get_uniswap_quote(
    reader: &dyn ContractReader,
    network: NetworkId,
    token_address: &str,
    amount: U256,
    side: QuoteSide,
) -> Result<Quote> {
    let addresses = WowAddresses::for_network(network)?;
    let network_id = network.as_str();

    let pool_address = get_pool_address(reader, network_id, token_address).await?;
    let invalid_pool_error = pool_address
        .is_zero()
        .then(|| "Invalid pool address".to_string());

    let mut pool = None;
    let mut quote_result = U256::ZERO;
    let mut utilization = U256::ZERO;
    let mut insufficient_liquidity = false;

    if invalid_pool_error.is_none() {
        match get_pool_info(reader, network_id, pool_address).await {
            Ok(info) => {
                let is_token0_weth = info.token0 == addresses.weth;
                let token_in_is_token0 = match side {
                    QuoteSide::Buy => is_token0_weth,
                    QuoteSide::Sell => !is_token0_weth,
                };
                let (token_in, token_out, balance_out) = if token_in_is_token0 {
                    (info.token0, info.token1, info.balance1)
                } else {
                    (info.token1, info.token0, info.balance0)
                };

                if side == QuoteSide::Buy {
                    insufficient_liquidity = amount > balance_out;
                    if !balance_out.is_zero() {
                        utilization = amount.saturating_mul(U256::from(10u64).pow(U256::from(18u64)))
                            / balance_out;
                    }
                }

                quote_result =
                    exact_input_single(reader, network, token_in, token_out, amount, info.fee)
                        .await?;
                pool = Some(info);
            }
            Err(e) => tracing::warn!(error = %e, "Error fetching quote"),
        }
    }

    if side == QuoteSide::Sell && pool.is_some() && quote_result.is_zero() {
        insufficient_liquidity = true;
    }

    let error = if pool.is_none() {
        Some("Failed fetching pool")
    } else if insufficient_liquidity {
        Some("Insufficient liquidity")
    } else if quote_result.is_zero() && utilization >= U256::from(PRICE_IMPACT_UTILIZATION) {
        Some("Price impact too high")
    } else if quote_result.is_zero() {
        Some("Failed fetching quote")
    } else {
        None
    };

    let balance = pool.as_ref().map(|info| {
        if info.token0 == addresses.weth {
            Balance {
                erc20z: info.balance1,
                weth: info.balance0,
            }
        } else {
            Balance {
                erc20z: info.balance0,
                weth: info.balance1,
            }
        }
    });

    Ok(Quote {
        amount_in: amount,
        amount_out: quote_result,
        balance,
        fee: pool.as_ref().map(|info| f64::from(info.fee) / 1_000_000.0),
        error: invalid_pool_error.or_else(|| error.map(str::to_string)),
    })
}

/// Tokens received for `amount_eth` wei
pub async fn get_buy_quote(
    reader: &dyn ContractReader,
    network: NetworkId,
    token_address: &str,
    amount_eth: U256,
) -> Result<U256> {
    if get_has_graduated(reader, network.as_str(), token_address).await? {
        return uniswap_amount_out(reader, network, token_address, amount_eth, QuoteSide::Buy)
            .await;
    }

    let args = argument_map(json!({ "ethOrderSize": amount_eth.to_string() }));
    read(
        reader,
        network.as_str(),
        token_address,
        "getEthBuyQuote",
        &WOW_ABI,
        &args,
    )
    .await?
    .as_uint()
}

/// Wei received for selling `amount_tokens`
pub async fn get_sell_quote(
    reader: &dyn ContractReader,
    network: NetworkId,
    token_address: &str,
    amount_tokens: U256,
) -> Result<U256> {
    if get_has_graduated(reader, network.as_str(), token_address).await? {
        return uniswap_amount_out(reader, network, token_address, amount_tokens, QuoteSide::Sell)
            .await;
    }

    let args = argument_map(json!({ "tokenOrderSize": amount_tokens.to_string() }));
    read(
        reader,
        network.as_str(),
        token_address,
        "getTokenSellQuote",
        &WOW_ABI,
        &args,
    )
    .await?
    .as_uint()
}

async fn uniswap_amount_out(
    reader: &dyn ContractReader,
    network: NetworkId,
    token_address: &str,
    amount: U256,
    side: QuoteSide,
) -> Result<U256> {
    let quote = get_uniswap_quote(reader, network, token_address, amount, side).await?;
    match quote.error {
        Some(error) => Err(Error::Quote(error)),
        None => Ok(quote.amount_out),
    }
}

/// Parse a decimal wei amount
pub fn parse_wei(field: &str, value: &str) -> Result<U256> {
    U256::from_str(value.trim())
        .map_err(|e| Error::InvalidArgument(format!("'{}' is not a wei amount: {}", field, e)))
}

/// `quote * percent / 100`, rounded down
pub fn min_after_slippage(quote: U256, percent: u64) -> U256 {
    quote.saturating_mul(U256::from(percent)) / U256::from(100u64)
}
