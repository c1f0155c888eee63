pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logger;

// Re-export commonly used types
pub use application::{
    LockedNotarizationBuilder, LockedNotarizationRequest, LockedNotarizationWorkflow,
    NotarizationClient, NotarizationClientReadOnly, WorkflowConfig, WorkflowReport,
};
pub use domain::{Address, Network, NotarizationMethod, OnChainNotarization, Signer, TimeLock};
pub use error::Error;
pub use infrastructure::{Faucet, HttpFaucet, HttpLedgerClient, LedgerClient};
