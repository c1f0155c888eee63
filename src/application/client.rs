use std::ops::Deref;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::request::{LockedNotarizationBuilder, LockedNotarizationRequest};
use super::transaction::{MoveCall, TransactionData, NOTARIZATION_TYPE_SUFFIX};
use crate::domain::{Address, ObjectId, OnChainNotarization, Signer};
use crate::error::Error;
use crate::infrastructure::LedgerClient;

/// Read access to notarizations on one chain
pub struct NotarizationClientReadOnly {
    ledger: Arc<dyn LedgerClient>,
    chain_id: String,
    package_id: String,
}

impl NotarizationClientReadOnly {
    /// Bind to the ledger's chain and resolve the notarization package
    ///
    /// A missing or blank package id fails with [`Error::UnknownPackage`]
    /// naming the chain, since no deployment is known for it.
    pub async fn new(
        ledger: Arc<dyn LedgerClient>,
        package_id: Option<String>,
    ) -> Result<Self, Error> {
        let chain_id = ledger.chain_identifier().await?;
        let package_id = package_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::UnknownPackage(chain_id.clone()))?;

        info!(%chain_id, %package_id, "Notarization client ready");
        Ok(Self {
            ledger,
            chain_id,
            package_id,
        })
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    /// Fully qualified Move type of notarizations published by this package
    pub fn notarization_type(&self) -> String {
        format!("{}{}", self.package_id, NOTARIZATION_TYPE_SUFFIX)
    }

    /// Fetch an object and decode it as a notarization of this package
    ///
    /// Objects of any other type, including notarizations published by a
    /// different package, are rejected with [`Error::Decode`].
    pub async fn get_notarization(&self, id: &ObjectId) -> Result<OnChainNotarization, Error> {
        let object = self.ledger.get_object(id).await?;
        let content = object
            .content
            .ok_or_else(|| Error::MissingObject(format!("{id}: no content returned")))?;

        if content.type_ != self.notarization_type() {
            return Err(Error::Decode(format!(
                "{id} is a {}, not a notarization",
                content.type_
            )));
        }

        Ok(serde_json::from_value(content.fields)?)
    }

    pub async fn is_destroy_allowed(
        &self,
        id: &ObjectId,
        now: DateTime<Utc>,
    ) -> Result<bool, Error> {
        Ok(self.get_notarization(id).await?.is_destroy_allowed(now))
    }
}

/// Read-write client submitting transactions signed by its signer
pub struct NotarizationClient {
    read_only: NotarizationClientReadOnly,
    signer: Signer,
    gas_budget: u64,
}

impl NotarizationClient {
    pub fn new(read_only: NotarizationClientReadOnly, signer: Signer, gas_budget: u64) -> Self {
        Self {
            read_only,
            signer,
            gas_budget,
        }
    }

    pub fn sender(&self) -> Address {
        self.signer.address()
    }

    pub fn create_locked_notarization(&self) -> LockedNotarizationBuilder {
        LockedNotarizationBuilder::new()
    }

    /// Submit the request as a single transaction and return the created record
    ///
    /// Exactly one transaction is executed. A failed execution is reported
    /// as [`Error::TransactionFailed`]; a successful one that created no
    /// notarization of this package as [`Error::MissingObject`].
    pub async fn submit(
        &self,
        request: &LockedNotarizationRequest,
    ) -> Result<OnChainNotarization, Error> {
        // Sign the move call
        let data = TransactionData {
            sender: self.sender(),
            gas_budget: self.gas_budget,
            call: MoveCall::create_locked(self.package_id(), request),
        };
        let signed = data.sign(&self.signer)?;

        info!(
            sender = %data.sender,
            package = %self.package_id(),
            "Submitting locked notarization"
        );
        let response = self.ledger.execute_transaction(&signed).await?;

        if let Some(reason) = response.failure() {
            return Err(Error::TransactionFailed(format!(
                "{}: {reason}",
                response.digest
            )));
        }

        // Locate the created notarization
        let expected_type = self.notarization_type();
        let id = response
            .created()
            .find(|(_, object_type)| *object_type == expected_type)
            .map(|(id, _)| *id)
            .ok_or_else(|| {
                Error::MissingObject(format!(
                    "transaction {} created no notarization",
                    response.digest
                ))
            })?;

        info!(digest = %response.digest, %id, "Created notarization");
        self.get_notarization(&id).await
    }
}

impl Deref for NotarizationClient {
    type Target = NotarizationClientReadOnly;

    fn deref(&self) -> &Self::Target {
        &self.read_only
    }
}
