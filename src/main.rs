use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use locked_notary::config::Config;
use locked_notary::infrastructure::http_client;
use locked_notary::{
    logger, Error, HttpFaucet, HttpLedgerClient, LockedNotarizationWorkflow, WorkflowReport,
};
use tracing::{error, info};

async fn run(config: Config) -> Result<WorkflowReport, Error> {
    let resolved = config.resolve()?;
    info!(
        network = %resolved.workflow.network,
        node = %resolved.node_url,
        faucet = %resolved.faucet_url,
        "Starting locked notarization"
    );

    let client = http_client();
    let faucet = Arc::new(HttpFaucet::new(client.clone(), &resolved.faucet_url));
    let ledger = Arc::new(HttpLedgerClient::new(client, &resolved.node_url));

    LockedNotarizationWorkflow::new(resolved.workflow, faucet, ledger)
        .run()
        .await
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    if let Err(e) = logger::init() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    match run(config).await {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Locked notarization failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
