use locked_notary::application::CallArg;
use locked_notary::infrastructure::http_client;
use locked_notary::{Error, HttpLedgerClient, LedgerClient, NotarizationMethod, TimeLock};

use super::helpers::*;
use super::mock_server::MockNode;

#[tokio::test]
async fn test_locked_notarization_over_http() {
    let node = MockNode::new();
    let url = start_node(&node).await;

    let report = http_workflow(&url, test_config(1)).run().await.unwrap();

    assert_eq!(node.funded(), vec![report.sender.to_string()]);
    assert_eq!(node.count_calls("iota_executeTransactionBlock"), 1);
    assert_eq!(report.chain_id, "4c78adac");
    assert_eq!(report.balance, 1_000_000_000);

    let record = &report.record;
    assert_eq!(record.method, NotarizationMethod::Locked);
    let locking = record.lock_metadata().unwrap();
    assert_eq!(locking.update_lock, TimeLock::UntilDestroyed);
    assert_eq!(locking.transfer_lock, TimeLock::UntilDestroyed);
    assert_eq!(locking.delete_lock, report.request.delete_lock());
    assert_eq!(record.state, *report.request.state());
}

#[tokio::test]
async fn test_steps_run_in_order() {
    let node = MockNode::new();
    let url = start_node(&node).await;

    http_workflow(&url, test_config(1)).run().await.unwrap();

    assert_eq!(
        node.rpc_calls(),
        vec![
            "iotax_getBalance",
            "iota_getChainIdentifier",
            "iota_executeTransactionBlock",
            "iota_getObject",
        ]
    );
}

#[tokio::test]
async fn test_unpaid_faucet_stops_the_run() {
    let node = MockNode::new();
    node.set_fund_amount(0);
    let url = start_node(&node).await;

    let err = http_workflow(&url, test_config(2)).run().await.unwrap_err();

    assert!(err.to_string().contains("Balance is still 0"));
    assert_eq!(node.count_calls("iotax_getBalance"), 2);
    assert_eq!(node.count_calls("iota_executeTransactionBlock"), 0);
}

#[tokio::test]
async fn test_faucet_http_error() {
    let node = MockNode::new();
    node.set_faucet_status(429);
    let url = start_node(&node).await;

    let err = http_workflow(&url, test_config(1)).run().await.unwrap_err();

    assert!(matches!(err, Error::Faucet(ref msg) if msg.contains("429")));
    assert!(node.rpc_calls().is_empty());
}

#[tokio::test]
async fn test_dynamic_record_rejected_over_http() {
    let node = MockNode::new();
    node.contract.set_method("Dynamic");
    let url = start_node(&node).await;

    let err = http_workflow(&url, test_config(1)).run().await.unwrap_err();

    assert!(matches!(err, Error::InvariantViolation { field: "method", .. }));
}

#[tokio::test]
async fn test_submitted_transaction_is_signed_by_sender() {
    let node = MockNode::new();
    let url = start_node(&node).await;

    let report = http_workflow(&url, test_config(1)).run().await.unwrap();

    // The node only records transactions whose signature verified
    let submitted = node.contract.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].sender, report.sender);
    assert!(matches!(submitted[0].call.arguments[0], CallArg::Bytes(_)));
}

#[tokio::test]
async fn test_ledger_http_status_error() {
    let node = MockNode::new();
    let url = start_node(&node).await;
    let ledger = HttpLedgerClient::new(http_client(), &format!("{url}/missing"));

    let err = ledger.chain_identifier().await.unwrap_err();

    assert!(matches!(err, Error::Http(ref msg) if msg.contains("404")));
}

#[tokio::test]
async fn test_missing_object_over_http() {
    let node = MockNode::new();
    let url = start_node(&node).await;
    let ledger = HttpLedgerClient::new(http_client(), &url);

    let id = format!("0x{}", "ab".repeat(32)).parse().unwrap();
    let err = ledger.get_object(&id).await.unwrap_err();

    assert!(matches!(err, Error::MissingObject(_)));
    assert!(err.to_string().contains("notExists"));
}

#[tokio::test]
async fn test_unreachable_node() {
    // Nothing listens on the discard port
    let ledger = HttpLedgerClient::new(http_client(), "http://127.0.0.1:9");

    let err = ledger.chain_identifier().await.unwrap_err();

    assert!(matches!(err, Error::Http(_)));
}
