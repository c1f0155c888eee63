use crate::domain::Address;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Balance is still 0 for {address} after {attempts} attempt(s)")]
    ZeroBalance { address: Address, attempts: u32 },

    #[error("Faucet error: {0}")]
    Faucet(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Missing object: {0}")]
    MissingObject(String),

    #[error("No notarization package configured for chain {0}")]
    UnknownPackage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid notarization request: {0}")]
    Builder(String),

    #[error("Invariant violated: {field} expected {expected}, got {actual}")]
    InvariantViolation {
        field: &'static str,
        expected: String,
        actual: String,
    },
}

impl From<hyper::Error> for Error {
    fn from(e: hyper::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl From<hyper::http::Error> for Error {
    fn from(e: hyper::http::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Self::Decode(e.to_string())
    }
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Self::Decode(e.to_string())
    }
}
