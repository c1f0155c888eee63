pub mod network;
pub mod notarization;
pub mod signer;

pub use network::Network;
pub use notarization::{
    Data, ImmutableMetadata, LockMetadata, NotarizationMethod, OnChainNotarization, State,
    TimeLock,
};
pub use signer::{Address, ObjectId, Signer};
