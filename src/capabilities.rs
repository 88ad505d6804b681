//! Capability traits the actions delegate to
//!
//! Actions never talk to an RPC node, faucet service or signer directly. They
//! receive one of these narrow handles and call it exactly the way the action
//! describes. The bundled implementations live in [`crate::contract`] and
//! [`crate::wallet`]; tests substitute stubs.

use crate::config::NetworkId;
use crate::{Error, Result};
use alloy::dyn_abi::DynSolValue;
use alloy::hex;
use alloy::json_abi::JsonAbi;
use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// Named contract-call arguments, keyed by ABI parameter name
pub type ArgumentMap = serde_json::Map<String, Value>;

/// Turn a `json!({...})` literal into an [`ArgumentMap`]
pub fn argument_map(value: Value) -> ArgumentMap {
    match value {
        Value::Object(map) => map,
        _ => ArgumentMap::new(),
    }
}

/// A wallet with a default onchain address
pub trait Wallet: Send + Sync {
    /// The address funds are requested for and transactions are sent from
    fn default_address(&self) -> Address;

    /// The network the wallet operates on
    fn network_id(&self) -> NetworkId;
}

/// A wallet that can ask a faucet for test funds
#[async_trait]
pub trait FaucetWallet: Wallet {
    /// Request funds for the default address. `None` means the network's
    /// default asset.
    async fn faucet(&self, asset_id: Option<&str>) -> Result<Box<dyn PendingTransaction>>;
}

/// A wallet that can send state-changing contract calls
#[async_trait]
pub trait ContractWallet: Wallet {
    async fn invoke_contract(
        &self,
        request: InvokeRequest<'_>,
    ) -> Result<Box<dyn PendingTransaction>>;
}

/// A submitted transaction that has not necessarily been confirmed yet
#[async_trait]
pub trait PendingTransaction: Send + Sync {
    /// Wait until the transaction reaches a terminal state.
    ///
    /// Returns an error if it landed with a failed status.
    async fn wait(&mut self) -> Result<()>;

    fn transaction_hash(&self) -> &str;

    /// Human-readable link to the transaction (block explorer or service URL)
    fn transaction_link(&self) -> &str;
}

/// A read-only contract call
#[derive(Debug, Clone, Copy)]
pub struct ReadRequest<'a> {
    pub network_id: &'a str,
    pub contract_address: &'a str,
    pub method: &'a str,
    pub abi: &'a JsonAbi,
    pub args: &'a ArgumentMap,
}

/// A state-changing contract call sent from the wallet's default address
#[derive(Debug, Clone, Copy)]
pub struct InvokeRequest<'a> {
    pub contract_address: &'a str,
    pub method: &'a str,
    pub abi: &'a JsonAbi,
    pub args: &'a ArgumentMap,
    /// Native value (wei) attached to the call
    pub amount: Option<U256>,
}

/// Executes read-only contract calls
#[async_trait]
pub trait ContractReader: Send + Sync {
    async fn read(&self, request: ReadRequest<'_>) -> Result<ContractValue>;
}

/// Decoded result of a contract read.
///
/// A method with a single output yields that value; several outputs yield a
/// tuple in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractValue(pub DynSolValue);

impl ContractValue {
    pub fn new(value: DynSolValue) -> Self {
        Self(value)
    }

    pub fn inner(&self) -> &DynSolValue {
        &self.0
    }

    pub fn as_uint(&self) -> Result<U256> {
        self.0
            .as_uint()
            .map(|(value, _)| value)
            .ok_or_else(|| self.unexpected("uint"))
    }

    pub fn as_address(&self) -> Result<Address> {
        self.0.as_address().ok_or_else(|| self.unexpected("address"))
    }

    pub fn as_bool(&self) -> Result<bool> {
        self.0.as_bool().ok_or_else(|| self.unexpected("bool"))
    }

    /// Element `index` of a tuple result
    pub fn field(&self, index: usize) -> Result<ContractValue> {
        self.0
            .as_tuple()
            .and_then(|fields| fields.get(index))
            .cloned()
            .map(ContractValue)
            .ok_or_else(|| self.unexpected(&format!("tuple with field {}", index)))
    }

    fn unexpected(&self, expected: &str) -> Error {
        Error::Abi(format!("expected {}, got {}", expected, self))
    }
}

impl From<DynSolValue> for ContractValue {
    fn from(value: DynSolValue) -> Self {
        Self(value)
    }
}

impl fmt::Display for ContractValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, &self.0)
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &DynSolValue) -> fmt::Result {
    match value {
        DynSolValue::Bool(b) => write!(f, "{}", b),
        DynSolValue::Int(i, _) => write!(f, "{}", i),
        DynSolValue::Uint(u, _) => write!(f, "{}", u),
        DynSolValue::Address(a) => write!(f, "{}", a),
        DynSolValue::FixedBytes(word, size) => {
            write!(f, "{}", hex::encode_prefixed(&word[..*size]))
        }
        DynSolValue::Bytes(bytes) => write!(f, "{}", hex::encode_prefixed(bytes)),
        DynSolValue::String(s) => f.write_str(s),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            write_sequence(f, items, "[", "]")
        }
        DynSolValue::Tuple(items) => write_sequence(f, items, "(", ")"),
        other => write!(f, "{:?}", other),
    }
}

fn write_sequence(
    f: &mut fmt::Formatter<'_>,
    items: &[DynSolValue],
    open: &str,
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_value(f, item)?;
    }
    f.write_str(close)
}
