use async_trait::async_trait;
use tracing::{debug, info};

use super::http::{post_json, HttpClient};
use crate::domain::Address;
use crate::error::Error;

/// Service crediting test currency to an address
#[async_trait]
pub trait Faucet: Send + Sync {
    /// Ask for funds. Returns once the faucet accepted the request; the
    /// credited amount is not reported.
    async fn request_funds(&self, recipient: &Address) -> Result<(), Error>;
}

pub struct HttpFaucet {
    client: HttpClient,
    url: String,
}

impl HttpFaucet {
    pub fn new(client: HttpClient, faucet_url: &str) -> Self {
        Self {
            client,
            url: format!("{}/v2/gas", faucet_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl Faucet for HttpFaucet {
    async fn request_funds(&self, recipient: &Address) -> Result<(), Error> {
        let body = json::object! {
            "FixedAmountRequest" => json::object! {
                "recipient" => recipient.to_string()
            }
        };

        info!(%recipient, url = %self.url, "Requesting funds from faucet");
        let (status, bytes) = post_json(&self.client, &self.url, body.dump()).await?;
        let text = String::from_utf8_lossy(&bytes);

        if !status.is_success() {
            return Err(Error::Faucet(format!("HTTP {status}: {text}")));
        }

        // A 2xx reply can still carry an error field
        if let Ok(reply) = serde_json::from_slice::<serde_json::Value>(&bytes) {
            if let Some(message) = reply.get("error").and_then(|e| e.as_str()) {
                return Err(Error::Faucet(message.to_string()));
            }
        }

        debug!(reply = %text, "Faucet accepted request");
        Ok(())
    }
}
