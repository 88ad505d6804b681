//! Faucet service client
//!
//! Asks a hosted faucet to send test funds to an address. The service decides
//! which assets it hands out; no asset list is enforced here.

use crate::config::{FaucetConfig, NetworkId};
use crate::{Error, Result};
use alloy::primitives::Address;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Faucet transaction as reported by the service
#[derive(Debug, Clone, Deserialize)]
pub struct FaucetTransaction {
    pub transaction_hash: String,
    #[serde(default)]
    pub transaction_link: Option<String>,
}

/// HTTP client for the faucet service
pub struct FaucetClient {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl FaucetClient {
    /// Build a client, reading the API key from `config.api_key_env` if set
    pub fn new(config: &FaucetConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .map(SecretString::from);
        if api_key.is_none() {
            tracing::warn!(
                env = %config.api_key_env,
                "No faucet API key set - requests will be unauthenticated"
            );
        }

        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn endpoint(&self, network: NetworkId, address: Address) -> String {
        format!(
            "{}/v1/networks/{}/addresses/{}/faucet",
            self.base_url, network, address
        )
    }

    /// Request funds for `address`. `None` asks for the network's default asset.
    pub async fn request_funds(
        &self,
        network: NetworkId,
        address: Address,
        asset_id: Option<&str>,
    ) -> Result<FaucetTransaction> {
        let mut request = self.client.post(self.endpoint(network, address));
        if let Some(asset_id) = asset_id {
            request = request.query(&[("asset_id", asset_id)]);
        }
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        tracing::debug!(%network, %address, ?asset_id, "Sending faucet request");

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Faucet(format!("{}: {}", status, body)));
        }

        Ok(response.json().await?)
    }
}

impl std::fmt::Debug for FaucetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaucetClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    fn client() -> FaucetClient {
        FaucetClient::new(&FaucetConfig {
            base_url: "https://faucet.example/platform/".to_string(),
            api_key_env: "FAUCET_CLIENT_TEST_UNSET_KEY".to_string(),
        })
    }

    #[test]
    fn endpoint_includes_network_and_address() {
        let url = client().endpoint(
            NetworkId::BaseSepolia,
            address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"),
        );

        assert_eq!(
            url,
            "https://faucet.example/platform/v1/networks/base-sepolia/addresses/0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266/faucet"
        );
    }

    #[test]
    fn parses_transaction_without_link() {
        let tx: FaucetTransaction =
            serde_json::from_str(r#"{"transaction_hash":"0xabc","status":"pending"}"#).unwrap();

        assert_eq!(tx.transaction_hash, "0xabc");
        assert!(tx.transaction_link.is_none());
    }

    /// Serve one HTTP response on a local port and hand back the raw request head
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut chunk = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&head).to_string()
        });

        (base_url, handle)
    }

    fn local_client(base_url: String, api_key: Option<&str>) -> FaucetClient {
        FaucetClient {
            client: Client::new(),
            base_url,
            api_key: api_key.map(|key| SecretString::from(key.to_string())),
        }
    }

    const ADDRESS: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");

    #[tokio::test]
    async fn request_sends_asset_and_bearer_key() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"transaction_hash":"0xfeed","transaction_link":"https://sepolia.basescan.org/tx/0xfeed"}"#,
        )
        .await;

        let tx = local_client(base_url, Some("test-key"))
            .request_funds(NetworkId::BaseSepolia, ADDRESS, Some("usdc"))
            .await
            .unwrap();

        let head = server.await.unwrap();
        let request_line = head.lines().next().unwrap();
        assert_eq!(
            request_line,
            format!(
                "POST /v1/networks/base-sepolia/addresses/{}/faucet?asset_id=usdc HTTP/1.1",
                ADDRESS
            )
        );
        assert!(head.to_lowercase().contains("authorization: bearer test-key"));
        assert_eq!(tx.transaction_hash, "0xfeed");
        assert_eq!(
            tx.transaction_link.as_deref(),
            Some("https://sepolia.basescan.org/tx/0xfeed")
        );
    }

    #[tokio::test]
    async fn default_asset_omits_query_and_auth() {
        let (base_url, server) = serve_once("200 OK", r#"{"transaction_hash":"0xbeef"}"#).await;

        let tx = local_client(base_url, None)
            .request_funds(NetworkId::BaseSepolia, ADDRESS, None)
            .await
            .unwrap();

        let head = server.await.unwrap();
        let request_line = head.lines().next().unwrap();
        assert!(request_line.ends_with("/faucet HTTP/1.1"));
        assert!(!request_line.contains("asset_id"));
        assert!(!head.to_lowercase().contains("authorization:"));
        assert!(tx.transaction_link.is_none());
    }

    #[tokio::test]
    async fn non_success_status_is_faucet_error() {
        let (base_url, server) = serve_once("429 Too Many Requests", "faucet limit reached").await;

        let err = local_client(base_url, Some("test-key"))
            .request_funds(NetworkId::BaseSepolia, ADDRESS, Some("eth"))
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(
            matches!(err, Error::Faucet(ref m) if m == "429 Too Many Requests: faucet limit reached")
        );
    }

    #[tokio::test]
    async fn malformed_body_is_network_error() {
        let (base_url, server) = serve_once("200 OK", r#"{"status":"pending"}"#).await;

        let err = local_client(base_url, None)
            .request_funds(NetworkId::BaseSepolia, ADDRESS, None)
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, Error::Network(_)));
    }

    #[test]
    fn debug_redacts_api_key() {
        let mut client = client();
        client.api_key = Some(SecretString::from("super-secret".to_string()));

        let debug_str = format!("{:?}", client);
        assert!(!debug_str.contains("super-secret"));
        assert!(debug_str.contains("[REDACTED]"));
    }
}
