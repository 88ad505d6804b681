//! Faucet funding action
//!
//! Requests test tokens for the wallet's default address and waits for the
//! faucet transaction to confirm.

use crate::actions::{Action, ActionInput};
use crate::capabilities::FaucetWallet;
use crate::Result;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use ts_rs::TS;

pub const REQUEST_FAUCET_FUNDS_PROMPT: &str = "This tool will request test tokens from the faucet for the default address in the wallet. It takes the wallet and asset ID as input.";

/// Shown in place of an asset id when the network default was requested
const DEFAULT_ASSET_LABEL: &str = "the network's default asset";

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, TS)]
#[ts(export)]
#[serde(deny_unknown_fields)]
pub struct RequestFaucetFundsInput {
    /// The optional asset ID to request from faucet. Accepts `eth` or `usdc`.
    /// When omitted, defaults to the network's native asset.
    pub asset_id: Option<String>,
}

impl ActionInput for RequestFaucetFundsInput {}

/// Request test tokens for `wallet`'s default address.
///
/// An empty `asset_id` is treated as absent. Any other value is passed to the
/// faucet verbatim; the service decides which assets exist.
pub async fn request_faucet_funds(
    wallet: &dyn FaucetWallet,
    asset_id: Option<&str>,
) -> Result<String> {
    let asset_id = asset_id.filter(|id| !id.is_empty());

    let mut tx = wallet.faucet(asset_id).await?;
    tx.wait().await?;

    Ok(format!(
        "Received {} from the faucet. Transaction: {}",
        asset_id.unwrap_or(DEFAULT_ASSET_LABEL),
        tx.transaction_link()
    ))
}

pub struct RequestFaucetFundsAction {
    wallet: Arc<dyn FaucetWallet>,
}

impl RequestFaucetFundsAction {
    pub fn new(wallet: Arc<dyn FaucetWallet>) -> Self {
        Self { wallet }
    }
}

#[async_trait]
impl Action for RequestFaucetFundsAction {
    const NAME: &'static str = super::ACTION_REQUEST_FAUCET_FUNDS;
    type Input = RequestFaucetFundsInput;

    fn description(&self) -> &'static str {
        REQUEST_FAUCET_FUNDS_PROMPT
    }

    async fn execute(&self, input: Self::Input) -> Result<String> {
        request_faucet_funds(self.wallet.as_ref(), input.asset_id.as_deref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::StubWallet;
    use crate::Error;
    use serde_json::json;

    #[tokio::test]
    async fn formats_asset_and_link() {
        let wallet = StubWallet::with_link("tx://abc123");

        let output = request_faucet_funds(&wallet, Some("usdc")).await.unwrap();

        assert_eq!(output, "Received usdc from the faucet. Transaction: tx://abc123");
        assert_eq!(
            *wallet.faucet_calls.lock().unwrap(),
            vec![Some("usdc".to_string())]
        );
    }

    #[tokio::test]
    async fn absent_and_empty_asset_request_network_default() {
        for asset_id in [None, Some("")] {
            let wallet = StubWallet::with_link("tx://def456");

            let output = request_faucet_funds(&wallet, asset_id).await.unwrap();

            assert_eq!(
                output,
                "Received the network's default asset from the faucet. Transaction: tx://def456"
            );
            assert_eq!(*wallet.faucet_calls.lock().unwrap(), vec![None]);
        }
    }

    #[tokio::test]
    async fn unrecognised_asset_is_passed_through() {
        let wallet = StubWallet::with_link("tx://1");

        request_faucet_funds(&wallet, Some("btc")).await.unwrap();

        assert_eq!(
            *wallet.faucet_calls.lock().unwrap(),
            vec![Some("btc".to_string())]
        );
    }

    #[tokio::test]
    async fn faucet_error_propagates_unchanged() {
        let wallet = StubWallet {
            fail_faucet: Some("rate limited".to_string()),
            ..StubWallet::with_link("tx://unused")
        };

        let err = request_faucet_funds(&wallet, Some("eth")).await.unwrap_err();

        assert!(matches!(err, Error::Faucet(ref m) if m == "rate limited"));
        assert_eq!(wallet.faucet_calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn confirmation_failure_propagates() {
        let wallet = StubWallet {
            fail_wait: true,
            ..StubWallet::with_link("tx://abc123")
        };

        let err = request_faucet_funds(&wallet, Some("eth")).await.unwrap_err();

        assert!(matches!(err, Error::TransactionFailed(_)));
    }

    #[tokio::test]
    async fn action_invoke_accepts_empty_object() {
        let wallet = Arc::new(StubWallet::with_link("tx://abc123"));
        let action = RequestFaucetFundsAction::new(wallet.clone());

        let output = action.invoke(json!({})).await.unwrap();

        assert!(output.ends_with("Transaction: tx://abc123"));
        assert_eq!(*wallet.faucet_calls.lock().unwrap(), vec![None]);
    }

    #[tokio::test]
    async fn action_invoke_rejects_wrong_type_before_calling() {
        let wallet = Arc::new(StubWallet::with_link("tx://abc123"));
        let action = RequestFaucetFundsAction::new(wallet.clone());

        let err = action.invoke(json!({ "asset_id": 5 })).await.unwrap_err();

        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(wallet.faucet_calls.lock().unwrap().is_empty());
    }

    #[test]
    fn schema_marks_asset_optional() {
        let wallet = Arc::new(StubWallet::default());
        let schema = RequestFaucetFundsAction::new(wallet).input_schema();

        assert!(schema["properties"]["asset_id"].is_object());
        let required = schema
            .get("required")
            .and_then(|r| r.as_array())
            .cloned()
            .unwrap_or_default();
        assert!(!required.contains(&json!("asset_id")));
    }
}
