//! Wallet implementations
//!
//! Private keys live only in [`SecureWallet`]. [`HostedWallet`] combines it
//! with the faucet service and RPC endpoints to provide the wallet
//! capabilities the actions use.

mod faucet;
mod hosted;
mod pending;
mod signer;

pub use faucet::{FaucetClient, FaucetTransaction};
pub use hosted::HostedWallet;
pub use pending::ReceiptWatcher;
pub use signer::SecureWallet;
