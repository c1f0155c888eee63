use std::time::Duration;

use clap::Parser;

use crate::application::{
    StatePayload, WorkflowConfig, DEFAULT_BALANCE_ATTEMPTS, DEFAULT_BALANCE_INTERVAL,
    DEFAULT_DELETE_LOCK_SECS, DEFAULT_GAS_BUDGET,
};
use crate::domain::Network;
use crate::error::Error;

/// Create a locked notarization with a freshly funded key
#[derive(Debug, Clone, Parser)]
#[command(name = "locked-notary", version)]
pub struct Config {
    /// Target network: mainnet, testnet, devnet or localnet
    #[arg(long, env = "NOTARY_NETWORK", default_value = "localnet")]
    pub network: Network,

    /// JSON-RPC endpoint, overriding the network default
    #[arg(long, env = "NOTARY_NODE_URL")]
    pub node_url: Option<String>,

    /// Faucet host, overriding the network default
    #[arg(long, env = "NOTARY_FAUCET_URL")]
    pub faucet_url: Option<String>,

    /// Notarization package deployed on the target chain
    #[arg(long, env = "IOTA_NOTARIZATION_PKG_ID")]
    pub package_id: Option<String>,

    #[arg(long, env = "NOTARY_STATE", default_value = "Important document content")]
    pub state: String,

    #[arg(
        long,
        env = "NOTARY_STATE_METADATA",
        default_value = "Document metadata e.g., version specifier"
    )]
    pub state_metadata: String,

    /// Submit the state as a string instead of bytes
    #[arg(long)]
    pub text_state: bool,

    #[arg(long, env = "NOTARY_DESCRIPTION", default_value = "This metadata will not change")]
    pub description: String,

    #[arg(
        long,
        env = "NOTARY_UPDATABLE_METADATA",
        default_value = "This metadata can be changed"
    )]
    pub updatable_metadata: String,

    /// Seconds until the notarization may be deleted
    #[arg(long, env = "NOTARY_DELETE_LOCK_SECS", default_value_t = DEFAULT_DELETE_LOCK_SECS)]
    pub delete_lock_secs: u64,

    /// Balance reads before giving up on the faucet
    #[arg(
        long,
        env = "NOTARY_BALANCE_ATTEMPTS",
        default_value_t = DEFAULT_BALANCE_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub balance_attempts: u32,

    #[arg(
        long,
        env = "NOTARY_BALANCE_INTERVAL_MS",
        default_value_t = DEFAULT_BALANCE_INTERVAL.as_millis() as u64
    )]
    pub balance_interval_ms: u64,

    #[arg(long, env = "NOTARY_GAS_BUDGET", default_value_t = DEFAULT_GAS_BUDGET)]
    pub gas_budget: u64,
}

/// Endpoints plus workflow settings, ready to run
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub node_url: String,
    pub faucet_url: String,
    pub workflow: WorkflowConfig,
}

impl Config {
    pub fn resolve(self) -> Result<ResolvedConfig, Error> {
        let package_id = self
            .package_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                Error::Config(
                    "no notarization package id; pass --package-id or set IOTA_NOTARIZATION_PKG_ID"
                        .to_string(),
                )
            })?;

        let node_url = self
            .node_url
            .unwrap_or_else(|| self.network.node_url().to_string());

        let faucet_url = match self.faucet_url {
            Some(url) => url,
            None => self
                .network
                .faucet_url()
                .map(str::to_string)
                .ok_or_else(|| {
                    Error::Config(format!(
                        "{} has no faucet; pass --faucet-url",
                        self.network
                    ))
                })?,
        };

        let state = if self.text_state {
            StatePayload::Text(self.state)
        } else {
            StatePayload::Bytes(self.state.into_bytes())
        };

        Ok(ResolvedConfig {
            node_url,
            faucet_url,
            workflow: WorkflowConfig {
                network: self.network,
                package_id: Some(package_id),
                state,
                state_metadata: Some(self.state_metadata).filter(|m| !m.is_empty()),
                description: self.description,
                updatable_metadata: self.updatable_metadata,
                delete_lock_secs: self.delete_lock_secs,
                balance_attempts: self.balance_attempts,
                balance_interval: Duration::from_millis(self.balance_interval_ms),
                gas_budget: self.gas_budget,
            },
        })
    }
}
