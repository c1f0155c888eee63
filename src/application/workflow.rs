use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use super::client::{NotarizationClient, NotarizationClientReadOnly};
use super::request::LockedNotarizationRequest;
use super::verify;
use crate::domain::{Address, Network, OnChainNotarization, Signer, TimeLock};
use crate::error::Error;
use crate::infrastructure::{Faucet, LedgerClient};

pub const DEFAULT_DELETE_LOCK_SECS: u64 = 86_400;
pub const DEFAULT_BALANCE_ATTEMPTS: u32 = 5;
pub const DEFAULT_BALANCE_INTERVAL: Duration = Duration::from_secs(2);
pub const DEFAULT_GAS_BUDGET: u64 = 50_000_000;

/// State representation handed to the builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatePayload {
    Bytes(Vec<u8>),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    pub network: Network,
    pub package_id: Option<String>,
    pub state: StatePayload,
    pub state_metadata: Option<String>,
    pub description: String,
    pub updatable_metadata: String,
    /// Seconds from now until deletion is permitted
    pub delete_lock_secs: u64,
    pub balance_attempts: u32,
    pub balance_interval: Duration,
    pub gas_budget: u64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            network: Network::Localnet,
            package_id: None,
            state: StatePayload::Bytes(b"Important document content".to_vec()),
            state_metadata: Some("Document metadata e.g., version specifier".to_string()),
            description: "This metadata will not change".to_string(),
            updatable_metadata: "This metadata can be changed".to_string(),
            delete_lock_secs: DEFAULT_DELETE_LOCK_SECS,
            balance_attempts: DEFAULT_BALANCE_ATTEMPTS,
            balance_interval: DEFAULT_BALANCE_INTERVAL,
            gas_budget: DEFAULT_GAS_BUDGET,
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct WorkflowReport {
    pub network: Network,
    pub sender: Address,
    pub balance: u64,
    pub chain_id: String,
    pub package_id: String,
    pub request: LockedNotarizationRequest,
    pub record: OnChainNotarization,
}

/// Fund a fresh signer, create one locked notarization and check it
pub struct LockedNotarizationWorkflow {
    config: WorkflowConfig,
    faucet: Arc<dyn Faucet>,
    ledger: Arc<dyn LedgerClient>,
}

impl LockedNotarizationWorkflow {
    pub fn new(
        config: WorkflowConfig,
        faucet: Arc<dyn Faucet>,
        ledger: Arc<dyn LedgerClient>,
    ) -> Self {
        Self {
            config,
            faucet,
            ledger,
        }
    }

    /// Run every step once, in order, and stop at the first failure
    ///
    /// The package id is checked before the faucet is asked for funds, so a
    /// misconfigured run touches neither the faucet nor the ledger.
    pub async fn run(&self) -> Result<WorkflowReport, Error> {
        let package_id = self.package_id()?;

        // Fund a fresh signer
        let signer = Signer::generate();
        let sender = signer.address();
        info!(%sender, network = %self.config.network, "Generated signer");

        self.faucet.request_funds(&sender).await?;
        let balance = self.wait_for_balance(&sender).await?;

        // Upgrade to a signing client
        let read_only =
            NotarizationClientReadOnly::new(self.ledger.clone(), Some(package_id)).await?;
        let client = NotarizationClient::new(read_only, signer, self.config.gas_budget);

        // Build and submit the request
        let request = self.build_request(&client)?;
        let record = client.submit(&request).await?;

        // Check the created record
        verify::check_locked(&record)?;
        info!(id = %record.id, method = %record.method, "Locked notarization verified");

        Ok(WorkflowReport {
            network: self.config.network,
            sender,
            balance,
            chain_id: client.chain_id().to_string(),
            package_id: client.package_id().to_string(),
            request,
            record,
        })
    }

    fn package_id(&self) -> Result<String, Error> {
        self.config
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
            })
    }

    /// Read the balance until it is non-zero or the attempts run out
    async fn wait_for_balance(&self, address: &Address) -> Result<u64, Error> {
        let attempts = self.config.balance_attempts.max(1);

        for attempt in 1..=attempts {
            let balance = self.ledger.get_balance(address).await?;
            info!(%address, balance, attempt, "Balance");
            if balance > 0 {
                return Ok(balance);
            }
            if attempt < attempts {
                warn!(%address, attempt, "Balance is still 0, waiting for faucet");
                tokio::time::sleep(self.config.balance_interval).await;
            }
        }

        Err(Error::ZeroBalance {
            address: *address,
            attempts,
        })
    }

    /// Locked request from the configured state, deletable `delete_lock_secs` from now
    fn build_request(
        &self,
        client: &NotarizationClient,
    ) -> Result<LockedNotarizationRequest, Error> {
        let lock_secs = i64::try_from(self.config.delete_lock_secs).unwrap_or(i64::MAX);
        let unlock_at = Utc::now().timestamp().saturating_add(lock_secs);
        let unlock_at = u32::try_from(unlock_at)
            .map_err(|_| Error::Builder(format!("delete unlock time {unlock_at} out of range")))?;

        let builder = client.create_locked_notarization();
        let builder = match &self.config.state {
            StatePayload::Bytes(bytes) => {
                builder.with_bytes_state(bytes.clone(), self.config.state_metadata.clone())
            }
            StatePayload::Text(text) => {
                builder.with_string_state(text.clone(), self.config.state_metadata.clone())
            }
        };

        builder
            .with_delete_lock(TimeLock::UnlockAt(unlock_at))
            .with_immutable_description(self.config.description.clone())
            .with_updatable_metadata(self.config.updatable_metadata.clone())
            .finish()
    }
}

impl fmt::Display for WorkflowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = &self.record;
        let none = "-";

        writeln!(f, "Locked notarization created on {}", self.network)?;
        writeln!(f, "  id:                  {}", record.id)?;
        writeln!(f, "  sender:              {}", self.sender)?;
        writeln!(f, "  balance:             {}", self.balance)?;
        writeln!(f, "  method:              {}", record.method)?;
        writeln!(f, "  state:               {}", record.state.data)?;
        writeln!(
            f,
            "  state metadata:      {}",
            record.state.metadata.as_deref().unwrap_or(none)
        )?;
        writeln!(
            f,
            "  description:         {}",
            record.immutable_metadata.description.as_deref().unwrap_or(none)
        )?;
        writeln!(
            f,
            "  updatable metadata:  {}",
            record.updatable_metadata.as_deref().unwrap_or(none)
        )?;
        if let Some(locking) = record.lock_metadata() {
            writeln!(f, "  update lock:         {}", locking.update_lock)?;
            writeln!(f, "  delete lock:         {}", locking.delete_lock)?;
            writeln!(f, "  transfer lock:       {}", locking.transfer_lock)?;
        }
        write!(f, "  state versions:      {}", record.state_version_count)
    }
}
