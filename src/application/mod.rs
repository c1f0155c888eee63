mod client;
mod request;
mod transaction;
mod verify;
mod workflow;

pub use client::{NotarizationClient, NotarizationClientReadOnly};
pub use request::{LockedNotarizationBuilder, LockedNotarizationRequest};
pub use transaction::{
    CallArg, MoveCall, SignedTransaction, TransactionData, CREATE_FUNCTION, NOTARIZATION_MODULE,
    NOTARIZATION_TYPE_SUFFIX,
};
pub use verify::check_locked;
pub use workflow::{
    LockedNotarizationWorkflow, StatePayload, WorkflowConfig, WorkflowReport,
    DEFAULT_BALANCE_ATTEMPTS, DEFAULT_BALANCE_INTERVAL, DEFAULT_DELETE_LOCK_SECS,
    DEFAULT_GAS_BUDGET,
};
