pub mod faucet;
pub mod http;
pub mod ledger;

pub use faucet::{Faucet, HttpFaucet};
pub use http::{http_client, HttpClient};
pub use ledger::{
    HttpLedgerClient, LedgerClient, ObjectChange, ObjectContent, ObjectData, TransactionResponse,
};
