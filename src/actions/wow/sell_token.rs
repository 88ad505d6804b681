//! Sell a Zora WOW memecoin for ETH

use super::constants::{WowAddresses, WOW_ABI};
use super::quotes::{get_has_graduated, get_sell_quote, min_after_slippage, parse_wei};
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

pub const WOW_SELL_TOKEN_PROMPT: &str = "
This tool will sell a Zora Wow ERC20 memecoin for ETH. This tool takes the WOW token contract address, and the amount of tokens to sell (in wei, meaning 1 is 1 wei or 0.000000000000000001 of the token). It is only supported on Base Sepolia and Base Mainnet.
";

/// Minimum ETH accepted, as a percentage of the quote
const SELL_SLIPPAGE_PERCENT: u64 = 98;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, TS)]
#[ts(export)]
#[serde(deny_unknown_fields)]
pub struct WowSellTokenInput {
    /// The WOW token contract address, such as `0x036CbD53842c5426634e7929541eC2318f3dCF7e`
    pub contract_address: String,
    /// Amount of tokens to sell (in wei), meaning 1 is 1 wei or 0.000000000000000001 of the token
    pub amount_tokens_in_wei: String,
}

impl ActionInput for WowSellTokenInput {
    fn validate(&self) -> Result<()> {
        require_non_empty("contract_address", &self.contract_address)?;
        require_non_empty("amount_tokens_in_wei", &self.amount_tokens_in_wei)?;
        parse_wei("amount_tokens_in_wei", &self.amount_tokens_in_wei).map(|_| ())
    }
}

pub async fn wow_sell_token(
    wallet: &dyn ContractWallet,
    reader: &dyn ContractReader,
    contract_address: &str,
    amount_tokens_in_wei: &str,
) -> Result<String> {
    let network = wallet.network_id();
    WowAddresses::for_network(network)?;
    let amount = parse_wei("amount_tokens_in_wei", amount_tokens_in_wei)?;

    let eth_quote = get_sell_quote(reader, network, contract_address, amount).await?;
    let has_graduated = get_has_graduated(reader, network.as_str(), contract_address).await?;
    let min_eth = min_after_slippage(eth_quote, SELL_SLIPPAGE_PERCENT);

    tracing::info!(
        token = contract_address,
        %amount,
        %min_eth,
        has_graduated,
        "Selling WOW token"
    );

    let args = argument_map(json!({
        "tokensToSell": amount.to_string(),
        "recipient": wallet.default_address().to_string(),
        "orderReferrer": Address::ZERO.to_string(),
        "comment": "",
        "expectedMarketType": if has_graduated { "1" } else { "0" },
        "minPayoutSize": min_eth.to_string(),
        "sqrtPriceLimitX96": "0",
    }));

    let mut invocation = wallet
        .invoke_contract(InvokeRequest {
            contract_address,
            method: "sell",
            abi: &WOW_ABI,
            args: &args,
            amount: None,
        })
        .await?;
    invocation.wait().await?;

    Ok(format!(
        "Sold WoW ERC20 memecoin with transaction hash: {}",
        invocation.transaction_hash()
    ))
}

pub struct WowSellTokenAction {
    wallet: Arc<dyn ContractWallet>,
    reader: Arc<dyn ContractReader>,
}

impl WowSellTokenAction {
    pub fn new(wallet: Arc<dyn ContractWallet>, reader: Arc<dyn ContractReader>) -> Self {
        Self { wallet, reader }
    }
}

#[async_trait]
impl Action for WowSellTokenAction {
    const NAME: &'static str = crate::actions::ACTION_WOW_SELL_TOKEN;
    type Input = WowSellTokenInput;

    fn description(&self) -> &'static str {
        WOW_SELL_TOKEN_PROMPT
    }

    async fn execute(&self, input: Self::Input) -> Result<String> {
        wow_sell_token(
            self.wallet.as_ref(),
            self.reader.as_ref(),
            &input.contract_address,
            &input.amount_tokens_in_wei,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{StubWallet, WALLET_ADDRESS};
    use crate::actions::wow::quotes::tests::{bonding_curve_reader, graduated_reader, TOKEN};
    use crate::config::NetworkId;
    use crate::Error;

    #[tokio::test]
    async fn bonding_curve_sell_accepts_two_percent_slippage() {
        let wallet = StubWallet::default();

        let output = wow_sell_token(&wallet, &bonding_curve_reader(), TOKEN, "10")
            .await
            .unwrap();

        assert_eq!(output, "Sold WoW ERC20 memecoin with transaction hash: 0xabc123");
        let invocations = wallet.invocations.lock().unwrap();
        let sell = &invocations[0];
        assert_eq!(sell.method, "sell");
        assert_eq!(sell.amount, None);
        assert_eq!(sell.args["tokensToSell"], "10");
        assert_eq!(sell.args["minPayoutSize"], "490");
        assert_eq!(sell.args["expectedMarketType"], "0");
        assert_eq!(sell.args["recipient"], WALLET_ADDRESS.to_string());
    }

    #[tokio::test]
    async fn graduated_sell_without_quote_is_rejected() {
        let wallet = StubWallet::default();

        let err = wow_sell_token(&wallet, &graduated_reader(1_000, 0), TOKEN, "10")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Quote(ref m) if m == "Insufficient liquidity"));
        assert!(wallet.invocations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn mainnet_is_supported() {
        let wallet = StubWallet {
            network: Some(NetworkId::BaseMainnet),
            ..Default::default()
        };

        wow_sell_token(&wallet, &graduated_reader(1_000, 300), TOKEN, "10")
            .await
            .unwrap();

        let invocations = wallet.invocations.lock().unwrap();
        assert_eq!(invocations[0].args["minPayoutSize"], "294");
        assert_eq!(invocations[0].args["expectedMarketType"], "1");
    }

    #[tokio::test]
    async fn arbitrum_is_unsupported() {
        let wallet = StubWallet {
            network: Some(NetworkId::ArbitrumMainnet),
            ..Default::default()
        };
        let reader = bonding_curve_reader();

        let err = wow_sell_token(&wallet, &reader, TOKEN, "10").await.unwrap_err();

        assert!(matches!(err, Error::UnsupportedNetwork(_)));
        assert_eq!(reader.call_count(), 0);
    }

    #[test]
    fn schema_names_both_fields() {
        let action = WowSellTokenAction::new(
            Arc::new(StubWallet::default()),
            Arc::new(bonding_curve_reader()),
        );
        let schema = action.input_schema();

        assert!(schema["properties"]["amount_tokens_in_wei"].is_object());
        assert!(schema["properties"]["contract_address"].is_object());
        assert_eq!(schema["additionalProperties"], false);
    }
}
