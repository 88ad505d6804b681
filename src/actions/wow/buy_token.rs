//! Buy a Zora WOW memecoin with ETH

use super::constants::{WowAddresses, WOW_ABI};
use super::quotes::{get_buy_quote, get_has_graduated, min_after_slippage, parse_wei};
use crate::actions::{require_non_empty, Action, ActionInput};
use crate::capabilities::{argument_map, ContractReader, ContractWallet, InvokeRequest};
use crate::Result;
use alloy::primitives::Address;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use ts_rs::TS;

pub const WOW_BUY_TOKEN_PROMPT: &str = "
This tool will buy a Zora Wow ERC20 memecoin with ETH. This tool takes the WOW token contract address, and the amount of ETH to spend (in wei, meaning \"1\" is 1 wei or 0.000000000000000001 of ETH). The tokens are received by the wallet's default address. It is only supported on Base Sepolia and Base Mainnet.
";

/// Minimum tokens accepted, as a percentage of the quote
const BUY_SLIPPAGE_PERCENT: u64 = 99;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, TS)]
#[ts(export)]
#[serde(deny_unknown_fields)]
pub struct WowBuyTokenInput {
    /// The WOW token contract address, such as `0x036CbD53842c5426634e7929541eC2318f3dCF7e`
    pub contract_address: String,
    /// Amount of ETH to spend (in wei), meaning 1 is 1 wei or 0.000000000000000001 of ETH
    pub amount_eth_in_wei: String,
}

impl ActionInput for WowBuyTokenInput {
    fn validate(&self) -> Result<()> {
        require_non_empty("contract_address", &self.contract_address)?;
        require_non_empty("amount_eth_in_wei", &self.amount_eth_in_wei)?;
        parse_wei("amount_eth_in_wei", &self.amount_eth_in_wei).map(|_| ())
    }
}

/// Quote, then buy with 1% slippage tolerance and wait for confirmation
pub async fn wow_buy_token(
    wallet: &dyn ContractWallet,
    reader: &dyn ContractReader,
    contract_address: &str,
    amount_eth_in_wei: &str,
) -> Result<String> {
    let network = wallet.network_id();
    WowAddresses::for_network(network)?;
    let amount = parse_wei("amount_eth_in_wei", amount_eth_in_wei)?;

    let token_quote = get_buy_quote(reader, network, contract_address, amount).await?;
    let min_tokens = min_after_slippage(token_quote, BUY_SLIPPAGE_PERCENT);
    let has_graduated = get_has_graduated(reader, network.as_str(), contract_address).await?;

    tracing::info!(
        token = contract_address,
        %amount,
        %min_tokens,
        has_graduated,
        "Buying WOW token"
    );

    let recipient = wallet.default_address().to_string();
    let args = argument_map(json!({
        "recipient": recipient,
        "refundRecipient": recipient,
        "orderReferrer": Address::ZERO.to_string(),
        "comment": "",
        "expectedMarketType": if has_graduated { "1" } else { "0" },
        "minOrderSize": min_tokens.to_string(),
        "sqrtPriceLimitX96": "0",
    }));

    let mut invocation = wallet
        .invoke_contract(InvokeRequest {
            contract_address,
            method: "buy",
            abi: &WOW_ABI,
            args: &args,
            amount: Some(amount),
        })
        .await?;
    invocation.wait().await?;

    Ok(format!(
        "Purchased WoW ERC20 memecoin with transaction hash: {}",
        invocation.transaction_hash()
    ))
}

pub struct WowBuyTokenAction {
    wallet: Arc<dyn ContractWallet>,
    reader: Arc<dyn ContractReader>,
}

impl WowBuyTokenAction {
    pub fn new(wallet: Arc<dyn ContractWallet>, reader: Arc<dyn ContractReader>) -> Self {
        Self { wallet, reader }
    }
}

#[async_trait]
impl Action for WowBuyTokenAction {
    const NAME: &'static str = crate::actions::ACTION_WOW_BUY_TOKEN;
    type Input = WowBuyTokenInput;

    fn description(&self) -> &'static str {
        WOW_BUY_TOKEN_PROMPT
    }

    async fn execute(&self, input: Self::Input) -> Result<String> {
        wow_buy_token(
            self.wallet.as_ref(),
            self.reader.as_ref(),
            &input.contract_address,
            &input.amount_eth_in_wei,
        )
        .await
    }
}
