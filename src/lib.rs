//! Onchain Agent Actions
//!
//! Agent-callable actions that wrap a single onchain capability each:
//! - Request testnet funds from a faucet
//! - Read `slot0` of a Uniswap V3 pool
//! - Buy and sell Zora WOW memecoins
//!
//! # Capability Model
//!
//! - Actions only see narrow capability traits ([`capabilities`])
//! - Inputs are schema-checked and validated before any external call
//! - Private keys never leave the [`wallet`] module
//! - [`ActionRegistry`] exposes every action by name with its prompt and schema

pub mod actions;
pub mod capabilities;
pub mod config;
pub mod contract;
pub mod wallet;

mod error;

// Re-export commonly used types
pub use actions::{Action, ActionDescriptor, ActionRegistry, DynAction};
pub use config::{Config, NetworkId, RpcConfig, FAUCET_API_KEY_ENV};
pub use error::{Error, Result};
