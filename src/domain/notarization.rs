use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::signer::ObjectId;

/// Notarized payload, either raw bytes or text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Data {
    Bytes(#[serde(with = "base64_bytes")] Vec<u8>),
    Text(String),
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => write!(f, "{text:?} ({} bytes)", bytes.len()),
                Err(_) => write!(f, "0x{} ({} bytes)", hex::encode(bytes), bytes.len()),
            },
            Self::Text(text) => write!(f, "{text:?}"),
        }
    }
}

/// State payload plus its free-text metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub data: Data,
    pub metadata: Option<String>,
}

impl State {
    pub fn from_bytes(bytes: Vec<u8>, metadata: Option<String>) -> Self {
        Self {
            data: Data::Bytes(bytes),
            metadata,
        }
    }

    pub fn from_string(text: String, metadata: Option<String>) -> Self {
        Self {
            data: Data::Text(text),
            metadata,
        }
    }
}

/// Time condition gating an operation on a notarization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeLock {
    None,
    /// Unix timestamp in seconds
    UnlockAt(u32),
    /// Unix timestamp in milliseconds
    UnlockAtMs(u64),
    UntilDestroyed,
}

impl TimeLock {
    /// Whether the lock still forbids its operation at `now`
    pub fn is_timelocked(&self, now: DateTime<Utc>) -> bool {
        match self {
            Self::None => false,
            Self::UnlockAt(at) => now.timestamp() < i64::from(*at),
            Self::UnlockAtMs(at) => now.timestamp_millis() < (*at).min(i64::MAX as u64) as i64,
            Self::UntilDestroyed => true,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::UnlockAt(_) => "UnlockAt",
            Self::UnlockAtMs(_) => "UnlockAtMs",
            Self::UntilDestroyed => "UntilDestroyed",
        }
    }
}

impl fmt::Display for TimeLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnlockAt(at) => write!(f, "UnlockAt({at})"),
            Self::UnlockAtMs(at) => write!(f, "UnlockAtMs({at})"),
            other => f.write_str(other.name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockMetadata {
    pub update_lock: TimeLock,
    pub delete_lock: TimeLock,
    pub transfer_lock: TimeLock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImmutableMetadata {
    /// Creation time in seconds
    pub created_at: u64,
    pub description: Option<String>,
    pub locking: Option<LockMetadata>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotarizationMethod {
    Dynamic,
    Locked,
}

impl fmt::Display for NotarizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dynamic => f.write_str("Dynamic"),
            Self::Locked => f.write_str("Locked"),
        }
    }
}

/// Snapshot of a notarization object as read from the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnChainNotarization {
    pub id: ObjectId,
    pub method: NotarizationMethod,
    pub state: State,
    pub immutable_metadata: ImmutableMetadata,
    pub updatable_metadata: Option<String>,
    pub last_state_change_at: u64,
    pub state_version_count: u64,
}

impl OnChainNotarization {
    pub fn lock_metadata(&self) -> Option<&LockMetadata> {
        self.immutable_metadata.locking.as_ref()
    }

    /// Whether the record may be destroyed at `now`
    pub fn is_destroy_allowed(&self, now: DateTime<Utc>) -> bool {
        match self.lock_metadata() {
            Some(locking) => !locking.delete_lock.is_timelocked(now),
            None => true,
        }
    }
}

mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(serde::de::Error::custom)
    }
}
