use async_trait::async_trait;
use json::JsonValue;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use super::http::{post_json, HttpClient};
use crate::application::SignedTransaction;
use crate::domain::{Address, ObjectId};
use crate::error::Error;

/// Ledger full node, as seen by the notarization clients
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn chain_identifier(&self) -> Result<String, Error>;

    async fn get_balance(&self, owner: &Address) -> Result<u64, Error>;

    /// Execute a signed transaction and wait for local execution
    async fn execute_transaction(
        &self,
        transaction: &SignedTransaction,
    ) -> Result<TransactionResponse, Error>;

    async fn get_object(&self, id: &ObjectId) -> Result<ObjectData, Error>;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub digest: String,
    pub effects: Option<TransactionEffects>,
    #[serde(default)]
    pub object_changes: Vec<ObjectChange>,
}

impl TransactionResponse {
    /// Failure reason reported by the effects, if execution did not succeed
    pub fn failure(&self) -> Option<String> {
        match &self.effects {
            Some(effects) if effects.status.status == "success" => None,
            Some(effects) => Some(
                effects
                    .status
                    .error
                    .clone()
                    .unwrap_or_else(|| effects.status.status.clone()),
            ),
            None => Some("no effects returned".to_string()),
        }
    }

    pub fn created(&self) -> impl Iterator<Item = (&ObjectId, &str)> {
        self.object_changes.iter().filter_map(|change| match change {
            ObjectChange::Created {
                object_id,
                object_type,
            } => Some((object_id, object_type.as_str())),
            ObjectChange::Other => None,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionEffects {
    pub status: ExecutionStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionStatus {
    pub status: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ObjectChange {
    Created {
        #[serde(rename = "objectId")]
        object_id: ObjectId,
        #[serde(rename = "objectType")]
        object_type: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    pub object_id: ObjectId,
    pub version: String,
    pub content: Option<ObjectContent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectContent {
    pub data_type: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub fields: serde_json::Value,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Balance {
    total_balance: String,
}

#[derive(Deserialize)]
struct ObjectResponse {
    data: Option<ObjectData>,
    error: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 client for a ledger full node
///
/// Signed transactions are sent as base64 of their canonical JSON form, not
/// the native binary encoding, so the node must accept that encoding.
pub struct HttpLedgerClient {
    client: HttpClient,
    url: String,
}

impl HttpLedgerClient {
    pub fn new(client: HttpClient, node_url: &str) -> Self {
        Self {
            client,
            url: node_url.to_string(),
        }
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: JsonValue) -> Result<T, Error> {
        let id = Uuid::new_v4().to_string();
        let body = json::object! {
            "jsonrpc" => "2.0",
            "id" => id.clone(),
            "method" => method,
            "params" => params
        };

        debug!(%method, %id, "JSON-RPC request");
        let (status, bytes) = post_json(&self.client, &self.url, body.dump()).await?;
        if !status.is_success() {
            return Err(Error::Http(format!("{method} returned HTTP {status}")));
        }

        let response: RpcResponse<T> = serde_json::from_slice(&bytes)?;
        if let Some(error) = response.error {
            return Err(Error::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response
            .result
            .ok_or_else(|| Error::Decode(format!("{method} returned neither result nor error")))
    }
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn chain_identifier(&self) -> Result<String, Error> {
        self.call("iota_getChainIdentifier", json::array![]).await
    }

    async fn get_balance(&self, owner: &Address) -> Result<u64, Error> {
        let balance: Balance = self
            .call("iotax_getBalance", json::array![owner.to_string()])
            .await?;

        balance.total_balance.parse().map_err(|e| {
            Error::Decode(format!(
                "invalid totalBalance {:?}: {e}",
                balance.total_balance
            ))
        })
    }

    async fn execute_transaction(
        &self,
        transaction: &SignedTransaction,
    ) -> Result<TransactionResponse, Error> {
        let params = json::array![
            transaction.tx_bytes.as_str(),
            json::array![transaction.signature.as_str()],
            json::object! {
                "showEffects" => true,
                "showObjectChanges" => true
            },
            "WaitForLocalExecution"
        ];

        self.call("iota_executeTransactionBlock", params).await
    }

    async fn get_object(&self, id: &ObjectId) -> Result<ObjectData, Error> {
        let params = json::array![id.to_string(), json::object! { "showContent" => true }];
        let response: ObjectResponse = self.call("iota_getObject", params).await?;

        match response.data {
            Some(data) => Ok(data),
            None => Err(Error::MissingObject(format!(
                "{id}: {}",
                response
                    .error
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "not found".to_string())
            ))),
        }
    }
}
