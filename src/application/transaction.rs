use base64::Engine;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::request::LockedNotarizationRequest;
use crate::domain::signer::ED25519_FLAG;
use crate::domain::{Address, Data, Signer, TimeLock};
use crate::error::Error;

pub const NOTARIZATION_MODULE: &str = "locked_notarization";
pub const CREATE_FUNCTION: &str = "create";
/// Type tag suffix of notarization objects, after the package id
pub const NOTARIZATION_TYPE_SUFFIX: &str = "::notarization::Notarization";

// Transaction data intent, version 0, app id 0
const INTENT_PREFIX: [u8; 3] = [0, 0, 0];
const SERIALIZED_SIGNATURE_LEN: usize = 1 + 64 + 32;

/// Argument of a move call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CallArg {
    /// Base64 encoded bytes
    Bytes(String),
    Text(String),
    OptionalText(Option<String>),
    TimeLock(TimeLock),
    /// Shared clock object
    Clock,
}

impl From<&Data> for CallArg {
    fn from(data: &Data) -> Self {
        match data {
            Data::Bytes(bytes) => {
                Self::Bytes(base64::engine::general_purpose::STANDARD.encode(bytes))
            }
            Data::Text(text) => Self::Text(text.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCall {
    pub package: String,
    pub module: String,
    pub function: String,
    pub arguments: Vec<CallArg>,
}

impl MoveCall {
    /// Call creating a locked notarization
    ///
    /// Arguments: state data, state metadata, updatable metadata,
    /// immutable description, delete lock, clock.
    pub fn create_locked(package: &str, request: &LockedNotarizationRequest) -> Self {
        let state = request.state();
        Self {
            package: package.to_string(),
            module: NOTARIZATION_MODULE.to_string(),
            function: CREATE_FUNCTION.to_string(),
            arguments: vec![
                CallArg::from(&state.data),
                CallArg::OptionalText(state.metadata.clone()),
                CallArg::OptionalText(request.updatable_metadata().map(str::to_string)),
                CallArg::OptionalText(request.immutable_description().map(str::to_string)),
                CallArg::TimeLock(request.delete_lock()),
                CallArg::Clock,
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionData {
    pub sender: Address,
    pub gas_budget: u64,
    pub call: MoveCall,
}

impl TransactionData {
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn sign(&self, signer: &Signer) -> Result<SignedTransaction, Error> {
        let bytes = self.to_bytes()?;
        let signature = signer.sign(&signing_digest(&bytes));

        let mut serialized = Vec::with_capacity(SERIALIZED_SIGNATURE_LEN);
        serialized.push(ED25519_FLAG);
        serialized.extend_from_slice(&signature.to_bytes());
        serialized.extend_from_slice(signer.public_key().as_bytes());

        let engine = base64::engine::general_purpose::STANDARD;
        Ok(SignedTransaction {
            tx_bytes: engine.encode(&bytes),
            signature: engine.encode(serialized),
        })
    }
}

fn signing_digest(tx_bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(INTENT_PREFIX);
    hasher.update(tx_bytes);
    hasher.finalize().into()
}

/// Transaction in its wire form: base64 bytes plus base64 `flag || sig || pk`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub tx_bytes: String,
    pub signature: String,
}

impl SignedTransaction {
    /// Check the signature and that it belongs to the sender, then decode
    pub fn verify(&self) -> Result<TransactionData, Error> {
        let engine = base64::engine::general_purpose::STANDARD;
        let bytes = engine.decode(&self.tx_bytes)?;
        let serialized = engine.decode(&self.signature)?;

        if serialized.len() != SERIALIZED_SIGNATURE_LEN || serialized[0] != ED25519_FLAG {
            return Err(Error::Decode("malformed serialized signature".to_string()));
        }

        let mut sig = [0u8; 64];
        sig.copy_from_slice(&serialized[1..65]);
        let mut pk = [0u8; 32];
        pk.copy_from_slice(&serialized[65..]);

        let public_key =
            VerifyingKey::from_bytes(&pk).map_err(|e| Error::Decode(e.to_string()))?;
        public_key
            .verify(&signing_digest(&bytes), &Signature::from_bytes(&sig))
            .map_err(|e| Error::Decode(format!("bad signature: {e}")))?;

        let data: TransactionData = serde_json::from_slice(&bytes)?;
        if data.sender != Address::from_public_key(&public_key) {
            return Err(Error::Decode(
                "signature does not belong to sender".to_string(),
            ));
        }

        Ok(data)
    }
}
