//! Zora WOW memecoin actions
//!
//! Tokens trade on a bonding curve until they graduate into a Uniswap V3 pool.
//! Buy and sell both quote first and pass a slippage-adjusted minimum to the
//! token contract.

mod buy_token;
pub mod constants;
pub mod quotes;
mod sell_token;

pub use buy_token::{wow_buy_token, WowBuyTokenAction, WowBuyTokenInput, WOW_BUY_TOKEN_PROMPT};
pub use sell_token::{
    wow_sell_token, WowSellTokenAction, WowSellTokenInput, WOW_SELL_TOKEN_PROMPT,
};
