//! Uniswap V3 pool `slot0` reader
//!
//! READ-ONLY: performs a single `slot0()` call and embeds the returned tuple
//! in the result string without decomposing it.

use super::constants::UNISWAP_V3_POOL_ABI;
use crate::actions::{require_non_empty, Action, ActionInput};
use crate::capabilities::{ArgumentMap, ContractReader, ReadRequest};
use crate::Result;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use ts_rs::TS;

pub const UNISWAP_V3_GET_POOL_SLOT0_PROMPT: &str = "
This tool will get the slot0 details for Uniswap V3 pools that have been previously created. The slot0 contains the sqrtPriceX96, tick, observationIndex, observationCardinality, observationCardinalityNext, feeProtocol, and unlocked.
The sqrtPriceX96 is the current price of the pool as a sqrt(token1/token0) Q64.96 value.
The tick is the current tick of the pool, i.e. according to the last tick transition that was run. This value may not always be equal to SqrtTickMath getTickAtSqrtRatio(sqrtPriceX96) if the price is on a tick boundary.
The observationIndex is the index of the last oracle observation that was written.
The observationCardinality is the current maximum number of observations stored in the pool.
The observationCardinalityNext is the next maximum number of observations.
The feeProtocol is the current protocol fee as a percentage of the swap fee taken on withdrawal.
The unlocked is whether the pool is currently locked to reentrancy.
It takes in the networkId and the pool contract address. Supported networks are Base Sepolia, Base Mainnet, Ethereum Mainnet, Polygon Mainnet, and Arbitrum Mainnet.
";

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, TS)]
#[ts(export)]
#[serde(deny_unknown_fields)]
pub struct UniswapV3GetPoolSlot0Input {
    /// The network ID of the network to get the pool on: `base-sepolia`,
    /// `base-mainnet`, `ethereum-mainnet`, `polygon-mainnet` or `arbitrum-mainnet`.
    pub network_id: String,
    /// The contract address of the pool to get the slot0 for.
    pub pool_contract_address: String,
}

impl ActionInput for UniswapV3GetPoolSlot0Input {
    fn validate(&self) -> Result<()> {
        require_non_empty("network_id", &self.network_id)?;
        require_non_empty("pool_contract_address", &self.pool_contract_address)
    }
}

/// Read `slot0` of a Uniswap V3 pool.
///
/// Network and address are handed to the reader as given; it is the reader
/// that rejects unsupported networks or addresses that are not pools.
pub async fn uniswap_v3_get_pool_slot0(
    reader: &dyn ContractReader,
    network_id: &str,
    pool_contract_address: &str,
) -> Result<String> {
    let args = ArgumentMap::new();
    let slot0 = reader
        .read(ReadRequest {
            network_id,
            contract_address: pool_contract_address,
            method: "slot0",
            abi: &UNISWAP_V3_POOL_ABI,
            args: &args,
        })
        .await?;

    Ok(format!("Slot0 for pool {} is {}.", pool_contract_address, slot0))
}

pub struct UniswapV3GetPoolSlot0Action {
    reader: Arc<dyn ContractReader>,
}

impl UniswapV3GetPoolSlot0Action {
    pub fn new(reader: Arc<dyn ContractReader>) -> Self {
        Self { reader }
    }
}

#[async_trait]
impl Action for UniswapV3GetPoolSlot0Action {
    const NAME: &'static str = crate::actions::ACTION_UNISWAP_V3_GET_POOL_SLOT0;
    type Input = UniswapV3GetPoolSlot0Input;

    fn description(&self) -> &'static str {
        UNISWAP_V3_GET_POOL_SLOT0_PROMPT
    }

    async fn execute(&self, input: Self::Input) -> Result<String> {
        tracing::debug!(
            network_id = %input.network_id,
            pool = %input.pool_contract_address,
            "Reading pool slot0"
        );
        uniswap_v3_get_pool_slot0(
            self.reader.as_ref(),
            &input.network_id,
            &input.pool_contract_address,
        )
        .await
    }
}
