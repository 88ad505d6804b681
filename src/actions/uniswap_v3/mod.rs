//! Uniswap V3 pool actions

pub mod constants;
mod get_pool_slot0;

pub use get_pool_slot0::{
    uniswap_v3_get_pool_slot0, UniswapV3GetPoolSlot0Action, UniswapV3GetPoolSlot0Input,
    UNISWAP_V3_GET_POOL_SLOT0_PROMPT,
};
