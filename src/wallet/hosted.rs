//! Hosted wallet: local key, hosted faucet, public RPC
//!
//! Implements the wallet capabilities on top of a [`SecureWallet`]. Faucet
//! requests go to the faucet service; contract invocations are signed locally
//! and sent through the network's RPC endpoint. Both hand back a
//! [`ReceiptWatcher`] so callers can wait for confirmation.

use super::{FaucetClient, ReceiptWatcher, SecureWallet};
use crate::capabilities::{
    ContractWallet, FaucetWallet, InvokeRequest, PendingTransaction, Wallet,
};
use crate::config::{Config, NetworkId, RpcConfig};
use crate::contract::abi;
use crate::{Error, Result};
use alloy::primitives::{Address, Bytes, B256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug)]
pub struct HostedWallet {
    signer: SecureWallet,
    network: NetworkId,
    faucet: FaucetClient,
    rpc: RpcConfig,
    poll_interval: Duration,
}

impl HostedWallet {
    pub fn new(signer: SecureWallet, config: &Config, rpc: RpcConfig) -> Self {
        Self {
            signer,
            network: config.network_id,
            faucet: FaucetClient::new(&config.faucet),
            rpc,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }

    fn read_provider(&self) -> Result<DynProvider> {
        let url = self.rpc.url_for(self.network)?;
        Ok(ProviderBuilder::new().connect_http(url).erased())
    }
}

impl Wallet for HostedWallet {
    fn default_address(&self) -> Address {
        self.signer.address()
    }

    fn network_id(&self) -> NetworkId {
        self.network
    }
}

#[async_trait]
impl FaucetWallet for HostedWallet {
    async fn faucet(&self, asset_id: Option<&str>) -> Result<Box<dyn PendingTransaction>> {
        let address = self.signer.address();
        tracing::info!(network = %self.network, %address, ?asset_id, "Requesting faucet funds");

        // RPC endpoint is resolved before any funds are requested
        let provider = self.read_provider()?;
        let tx = self
            .faucet
            .request_funds(self.network, address, asset_id)
            .await?;

        let hash = B256::from_str(&tx.transaction_hash).map_err(|e| {
            Error::Faucet(format!(
                "Invalid transaction hash {}: {}",
                tx.transaction_hash, e
            ))
        })?;
        let link = tx
            .transaction_link
            .unwrap_or_else(|| self.network.transaction_link(&tx.transaction_hash));

        Ok(Box::new(ReceiptWatcher::new(
            provider,
            hash,
            link,
            self.poll_interval,
        )))
    }
}

#[async_trait]
impl ContractWallet for HostedWallet {
    async fn invoke_contract(
        &self,
        request: InvokeRequest<'_>,
    ) -> Result<Box<dyn PendingTransaction>> {
        let to = Address::from_str(request.contract_address).map_err(|e| {
            Error::InvalidArgument(format!(
                "Invalid contract address {}: {}",
                request.contract_address, e
            ))
        })?;

        let (_, calldata) = abi::encode_call(request.abi, request.method, request.args)?;

        let url = self.rpc.url_for(self.network)?;
        let provider = ProviderBuilder::new()
            .wallet(self.signer.wallet().clone())
            .connect_http(url);

        let mut tx = TransactionRequest::default()
            .from(self.signer.address())
            .to(to)
            .input(Bytes::from(calldata).into());
        if let Some(amount) = request.amount {
            tx = tx.value(amount);
        }

        tracing::info!(
            network = %self.network,
            contract = %to,
            method = request.method,
            value = ?request.amount,
            "Invoking contract"
        );

        let pending = provider
            .send_transaction(tx)
            .await
            .map_err(|e| Error::Contract(format!("{} on {}: {}", request.method, to, e)))?;
        let hash = *pending.tx_hash();
        let link = self.network.transaction_link(&hash.to_string());

        Ok(Box::new(ReceiptWatcher::new(
            provider.erased(),
            hash,
            link,
            self.poll_interval,
        )))
    }
}
