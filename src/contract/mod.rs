//! Contract reads over JSON-RPC
//!
//! `RpcContractReader` is the bundled [`ContractReader`]: it resolves the
//! network's RPC endpoint, ABI-encodes the call from a JSON ABI and a named
//! argument map, runs `eth_call` and decodes the outputs.
//!
//! This module is read-only. It never signs or submits transactions.

pub mod abi;

use crate::capabilities::{ContractReader, ContractValue, ReadRequest};
use crate::config::{NetworkId, RpcConfig};
use crate::{Error, Result};
use alloy::primitives::{Address, Bytes};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use std::str::FromStr;

/// Reads contract state through the RPC endpoints in an [`RpcConfig`]
#[derive(Debug, Clone)]
pub struct RpcContractReader {
    rpc: RpcConfig,
}

impl RpcContractReader {
    pub fn new(rpc: RpcConfig) -> Self {
        Self { rpc }
    }

    /// Create a reader from RPC environment variables
    pub fn from_env() -> Self {
        Self::new(RpcConfig::from_env())
    }
}

#[async_trait]
impl ContractReader for RpcContractReader {
    async fn read(&self, request: ReadRequest<'_>) -> Result<ContractValue> {
        let network = NetworkId::from_str(request.network_id)?;

        let to = Address::from_str(request.contract_address).map_err(|e| {
            Error::InvalidArgument(format!(
                "Invalid contract address {}: {}",
                request.contract_address, e
            ))
        })?;

        let (function, calldata) = abi::encode_call(request.abi, request.method, request.args)?;

        let url = self.rpc.url_for(network)?;
        let provider = ProviderBuilder::new().connect_http(url);

        tracing::debug!(
            network = %network,
            contract = %to,
            method = request.method,
            "Reading contract"
        );

        let tx = TransactionRequest::default()
            .to(to)
            .input(Bytes::from(calldata).into());

        let output = provider.call(tx).await.map_err(|e| {
            Error::Contract(format!("{} on {} ({}): {}", request.method, to, network, e))
        })?;

        abi::decode_output(&function, &output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::uniswap_v3::constants::UNISWAP_V3_POOL_ABI;
    use crate::capabilities::ArgumentMap;
    use std::collections::HashMap;

    fn reader() -> RpcContractReader {
        let mut urls = HashMap::new();
        // Nothing listens here; every test below must fail before connecting.
        urls.insert(84532, "http://127.0.0.1:9".to_string());
        RpcContractReader::new(RpcConfig::with_urls(urls))
    }

    #[tokio::test]
    async fn rejects_unsupported_network() {
        let args = ArgumentMap::new();
        let err = reader()
            .read(ReadRequest {
                network_id: "solana-mainnet",
                contract_address: "0x4200000000000000000000000000000000000006",
                method: "slot0",
                abi: &UNISWAP_V3_POOL_ABI,
                args: &args,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnsupportedNetwork(ref id) if id == "solana-mainnet"));
    }

    #[tokio::test]
    async fn rejects_malformed_address() {
        let args = ArgumentMap::new();
        let err = reader()
            .read(ReadRequest {
                network_id: "base-sepolia",
                contract_address: "0x1234",
                method: "slot0",
                abi: &UNISWAP_V3_POOL_ABI,
                args: &args,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn rejects_method_missing_from_abi() {
        let args = ArgumentMap::new();
        let err = reader()
            .read(ReadRequest {
                network_id: "base-sepolia",
                contract_address: "0x4200000000000000000000000000000000000006",
                method: "observe",
                abi: &UNISWAP_V3_POOL_ABI,
                args: &args,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Abi(_)));
    }

    #[tokio::test]
    async fn missing_rpc_url_is_config_error() {
        let args = ArgumentMap::new();
        let err = reader()
            .read(ReadRequest {
                network_id: "polygon-mainnet",
                contract_address: "0x4200000000000000000000000000000000000006",
                method: "slot0",
                abi: &UNISWAP_V3_POOL_ABI,
                args: &args,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Config(_)));
    }
}
