//! Agent-callable actions
//!
//! Every action has the same shape: a prompt telling an LLM-driven caller what
//! it does, an input schema, and a callable that validates the input, makes
//! its delegated capability call(s) and renders a single result string.
//!
//! Validation happens in [`Action::invoke`] before `execute` runs, so an
//! incomplete or malformed request never reaches a capability.

mod request_faucet_funds;
pub mod uniswap_v3;
pub mod wow;

use crate::capabilities::{ContractReader, ContractWallet, FaucetWallet};
use crate::{Error, Result};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

pub use request_faucet_funds::{
    request_faucet_funds, RequestFaucetFundsAction, RequestFaucetFundsInput,
    REQUEST_FAUCET_FUNDS_PROMPT,
};
pub use uniswap_v3::{
    uniswap_v3_get_pool_slot0, UniswapV3GetPoolSlot0Action, UniswapV3GetPoolSlot0Input,
    UNISWAP_V3_GET_POOL_SLOT0_PROMPT,
};
pub use wow::{WowBuyTokenAction, WowBuyTokenInput, WowSellTokenAction, WowSellTokenInput};

pub const ACTION_REQUEST_FAUCET_FUNDS: &str = "request_faucet_funds";
pub const ACTION_UNISWAP_V3_GET_POOL_SLOT0: &str = "uniswap_v3_get_pool_slot0";
pub const ACTION_WOW_BUY_TOKEN: &str = "wow_buy_token";
pub const ACTION_WOW_SELL_TOKEN: &str = "wow_sell_token";

/// Input accepted by an action
pub trait ActionInput: DeserializeOwned + JsonSchema + Send {
    /// Checks beyond what deserialization enforces
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Reject an empty or whitespace-only required string
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument(format!("'{}' must not be empty", field)));
    }
    Ok(())
}

/// Deserialize and validate raw action arguments
pub fn parse_input<T: ActionInput>(args: Value) -> Result<T> {
    let input: T =
        serde_json::from_value(args).map_err(|e| Error::InvalidArgument(e.to_string()))?;
    input.validate()?;
    Ok(input)
}

#[async_trait]
pub trait Action: Send + Sync {
    const NAME: &'static str;
    type Input: ActionInput;

    /// Prompt describing the action to an LLM-driven caller
    fn description(&self) -> &'static str;

    fn input_schema(&self) -> Value {
        schemars::schema_for!(Self::Input).into()
    }

    async fn execute(&self, input: Self::Input) -> Result<String>;

    /// Validate raw JSON arguments, then execute
    async fn invoke(&self, args: Value) -> Result<String> {
        let input = parse_input::<Self::Input>(args)?;
        self.execute(input).await
    }
}

/// Object-safe view of an [`Action`], used by [`ActionRegistry`]
#[async_trait]
pub trait DynAction: Send + Sync {
    fn name(&self) -> &'static str;
    fn prompt(&self) -> &'static str;
    fn schema(&self) -> Value;
    async fn call(&self, args: Value) -> Result<String>;
}

#[async_trait]
impl<A: Action> DynAction for A {
    fn name(&self) -> &'static str {
        A::NAME
    }

    fn prompt(&self) -> &'static str {
        Action::description(self)
    }

    fn schema(&self) -> Value {
        Action::input_schema(self)
    }

    async fn call(&self, args: Value) -> Result<String> {
        Action::invoke(self, args).await
    }
}

/// What an orchestrator needs to offer an action to a model
#[derive(Debug, Clone, Serialize)]
pub struct ActionDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Actions indexed by name
#[derive(Default, Clone)]
pub struct ActionRegistry {
    actions: BTreeMap<&'static str, Arc<dyn DynAction>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every bundled action wired to the given capabilities
    pub fn standard<W>(wallet: Arc<W>, reader: Arc<dyn ContractReader>) -> Self
    where
        W: FaucetWallet + ContractWallet + 'static,
    {
        Self::new()
            .register(RequestFaucetFundsAction::new(wallet.clone()))
            .register(UniswapV3GetPoolSlot0Action::new(reader.clone()))
            .register(WowBuyTokenAction::new(wallet.clone(), reader.clone()))
            .register(WowSellTokenAction::new(wallet, reader))
    }

    pub fn register<A: Action + 'static>(mut self, action: A) -> Self {
        self.actions.insert(A::NAME, Arc::new(action));
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn DynAction>> {
        self.actions.get(name).cloned()
    }

    pub fn descriptors(&self) -> Vec<ActionDescriptor> {
        self.actions
            .values()
            .map(|action| ActionDescriptor {
                name: action.name(),
                description: action.prompt(),
                input_schema: action.schema(),
            })
            .collect()
    }

    pub async fn invoke(&self, name: &str, args: Value) -> Result<String> {
        let action = self
            .get(name)
            .ok_or_else(|| Error::InvalidArgument(format!("Unknown action: {}", name)))?;

        tracing::info!(action = name, "Invoking action");
        action.call(args).await
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.actions.keys()).finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Capability stubs shared by the action tests

    use crate::capabilities::{
        ContractReader, ContractValue, ContractWallet, FaucetWallet, InvokeRequest,
        PendingTransaction, ReadRequest, Wallet,
    };
    use crate::config::NetworkId;
    use crate::{Error, Result};
    use alloy::primitives::{address, Address, U256};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    pub const WALLET_ADDRESS: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");

    pub struct StubTransaction {
        pub hash: String,
        pub link: String,
        pub fail_wait: bool,
        pub waited: bool,
    }

    #[async_trait]
    impl PendingTransaction for StubTransaction {
        async fn wait(&mut self) -> Result<()> {
            if self.fail_wait {
                return Err(Error::TransactionFailed(format!("{} reverted", self.hash)));
            }
            self.waited = true;
            Ok(())
        }

        fn transaction_hash(&self) -> &str {
            &self.hash
        }

        fn transaction_link(&self) -> &str {
            &self.link
        }
    }

    /// A recorded contract invocation
    #[derive(Debug, Clone)]
    pub struct Invocation {
        pub contract_address: String,
        pub method: String,
        pub args: serde_json::Map<String, Value>,
        pub amount: Option<U256>,
    }

    #[derive(Default)]
    pub struct StubWallet {
        pub network: Option<NetworkId>,
        pub link: String,
        pub fail_faucet: Option<String>,
        pub fail_wait: bool,
        pub faucet_calls: Mutex<Vec<Option<String>>>,
        pub invocations: Mutex<Vec<Invocation>>,
    }

    impl StubWallet {
        pub fn with_link(link: &str) -> Self {
            Self {
                link: link.to_string(),
                ..Default::default()
            }
        }

        fn transaction(&self) -> Box<dyn PendingTransaction> {
            Box::new(StubTransaction {
                hash: "0xabc123".to_string(),
                link: self.link.clone(),
                fail_wait: self.fail_wait,
                waited: false,
            })
        }
    }

    impl Wallet for StubWallet {
        fn default_address(&self) -> Address {
            WALLET_ADDRESS
        }

        fn network_id(&self) -> NetworkId {
            self.network.unwrap_or(NetworkId::BaseSepolia)
        }
    }

    #[async_trait]
    impl FaucetWallet for StubWallet {
        async fn faucet(&self, asset_id: Option<&str>) -> Result<Box<dyn PendingTransaction>> {
            self.faucet_calls
                .lock()
                .unwrap()
                .push(asset_id.map(str::to_string));
            if let Some(message) = &self.fail_faucet {
                return Err(Error::Faucet(message.clone()));
            }
            Ok(self.transaction())
        }
    }

    #[async_trait]
    impl ContractWallet for StubWallet {
        async fn invoke_contract(
            &self,
            request: InvokeRequest<'_>,
        ) -> Result<Box<dyn PendingTransaction>> {
            self.invocations.lock().unwrap().push(Invocation {
                contract_address: request.contract_address.to_string(),
                method: request.method.to_string(),
                args: request.args.clone(),
                amount: request.amount,
            });
            Ok(self.transaction())
        }
    }

    /// Returns canned values per method name and counts every read
    #[derive(Default)]
    pub struct StubReader {
        pub values: HashMap<String, ContractValue>,
        pub fail_with: Option<String>,
        pub calls: AtomicUsize,
        pub requests: Mutex<Vec<(String, String, String)>>,
    }

    impl StubReader {
        pub fn with(mut self, method: &str, value: ContractValue) -> Self {
            self.values.insert(method.to_string(), value);
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ContractReader for StubReader {
        async fn read(&self, request: ReadRequest<'_>) -> Result<ContractValue> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push((
                request.network_id.to_string(),
                request.contract_address.to_string(),
                request.method.to_string(),
            ));
            if let Some(message) = &self.fail_with {
                return Err(Error::Contract(message.clone()));
            }
            self.values.get(request.method).cloned().ok_or_else(|| {
                Error::Contract(format!("execution reverted: {}", request.method))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{StubReader, StubWallet};
    use super::*;
    use serde_json::json;

    fn registry() -> (Arc<StubWallet>, Arc<StubReader>, ActionRegistry) {
        let wallet = Arc::new(StubWallet::with_link("tx://abc123"));
        let reader = Arc::new(StubReader::default());
        let registry = ActionRegistry::standard(wallet.clone(), reader.clone());
        (wallet, reader, registry)
    }

    #[test]
    fn standard_registry_lists_every_action() {
        let (_, _, registry) = registry();
        let names: Vec<_> = registry.descriptors().iter().map(|d| d.name).collect();

        assert_eq!(
            names,
            vec![
                ACTION_REQUEST_FAUCET_FUNDS,
                ACTION_UNISWAP_V3_GET_POOL_SLOT0,
                ACTION_WOW_BUY_TOKEN,
                ACTION_WOW_SELL_TOKEN,
            ]
        );
    }

    #[test]
    fn descriptors_carry_prompt_and_schema() {
        let (_, _, registry) = registry();
        let slot0 = registry
            .descriptors()
            .into_iter()
            .find(|d| d.name == ACTION_UNISWAP_V3_GET_POOL_SLOT0)
            .unwrap();

        assert_eq!(slot0.description, UNISWAP_V3_GET_POOL_SLOT0_PROMPT);
        assert_eq!(slot0.input_schema["type"], "object");
        let required = slot0.input_schema["required"].as_array().unwrap();
        assert!(required.contains(&json!("network_id")));
        assert!(required.contains(&json!("pool_contract_address")));
    }

    #[tokio::test]
    async fn dispatches_by_name() {
        let (wallet, _, registry) = registry();

        let output = registry
            .invoke(ACTION_REQUEST_FAUCET_FUNDS, json!({ "asset_id": "eth" }))
            .await
            .unwrap();

        assert_eq!(output, "Received eth from the faucet. Transaction: tx://abc123");
        assert_eq!(wallet.faucet_calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_action_is_invalid_argument() {
        let (_, reader, registry) = registry();

        let err = registry.invoke("deploy_nft", json!({})).await.unwrap_err();

        assert!(matches!(err, Error::InvalidArgument(ref m) if m.contains("deploy_nft")));
        assert_eq!(reader.call_count(), 0);
    }

    #[tokio::test]
    async fn unknown_fields_are_rejected() {
        let (wallet, _, registry) = registry();

        let err = registry
            .invoke(
                ACTION_REQUEST_FAUCET_FUNDS,
                json!({ "asset_id": "eth", "amount": "5" }),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(wallet.faucet_calls.lock().unwrap().is_empty());
    }
}
