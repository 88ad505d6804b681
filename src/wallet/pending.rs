//! Receipt-polling pending transaction

use crate::capabilities::PendingTransaction;
use crate::{Error, Result};
use alloy::primitives::B256;
use alloy::providers::{DynProvider, Provider};
use async_trait::async_trait;
use std::time::Duration;

/// Waits for a transaction by polling `eth_getTransactionReceipt`.
///
/// There is no timeout: `wait` returns once a receipt exists.
pub struct ReceiptWatcher {
    provider: DynProvider,
    hash: B256,
    hash_hex: String,
    link: String,
    poll_interval: Duration,
}

impl ReceiptWatcher {
    pub fn new(provider: DynProvider, hash: B256, link: String, poll_interval: Duration) -> Self {
        Self {
            provider,
            hash,
            hash_hex: hash.to_string(),
            link,
            poll_interval,
        }
    }
}

#[async_trait]
impl PendingTransaction for ReceiptWatcher {
    async fn wait(&mut self) -> Result<()> {
        loop {
            let receipt = self
                .provider
                .get_transaction_receipt(self.hash)
                .await
                .map_err(|e| Error::Contract(format!("Failed to fetch receipt: {}", e)))?;

            match receipt {
                Some(receipt) if receipt.status() => {
                    tracing::info!(
                        tx_hash = %self.hash,
                        block = ?receipt.block_number,
                        "Transaction confirmed"
                    );
                    return Ok(());
                }
                Some(_) => {
                    return Err(Error::TransactionFailed(format!(
                        "{} reverted",
                        self.hash_hex
                    )))
                }
                None => {
                    tracing::debug!(tx_hash = %self.hash, "Transaction pending");
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }

    fn transaction_hash(&self) -> &str {
        &self.hash_hex
    }

    fn transaction_link(&self) -> &str {
        &self.link
    }
}

impl std::fmt::Debug for ReceiptWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReceiptWatcher")
            .field("hash", &self.hash)
            .field("link", &self.link)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}
