use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use locked_notary::application::{CallArg, StatePayload};
use locked_notary::{
    Error, LockedNotarizationWorkflow, NotarizationMethod, TimeLock, WorkflowConfig,
};

use crate::emulator::PACKAGE_ID;
use crate::mocks::{MockFaucet, MockLedger};

fn test_config() -> WorkflowConfig {
    WorkflowConfig {
        package_id: Some(PACKAGE_ID.to_string()),
        balance_attempts: 3,
        balance_interval: Duration::ZERO,
        ..WorkflowConfig::default()
    }
}

fn workflow(
    config: WorkflowConfig,
    faucet: &Arc<MockFaucet>,
    ledger: &Arc<MockLedger>,
) -> LockedNotarizationWorkflow {
    LockedNotarizationWorkflow::new(config, faucet.clone(), ledger.clone())
}

#[cfg(test)]
mod funding_tests {
    use super::*;

    #[tokio::test]
    async fn test_zero_balance_aborts_before_notarization() {
        let faucet = Arc::new(MockFaucet::default());
        let ledger = Arc::new(MockLedger::with_balances(&[0]));

        let result = workflow(test_config(), &faucet, &ledger).run().await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Balance is still 0"));
        assert!(matches!(err, Error::ZeroBalance { attempts: 3, .. }));
        assert_eq!(ledger.balance_reads(), 3);
        assert_eq!(ledger.executions(), 0);
        assert!(ledger.contract.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_single_attempt_reads_once() {
        let faucet = Arc::new(MockFaucet::default());
        let ledger = Arc::new(MockLedger::with_balances(&[0]));
        let config = WorkflowConfig {
            balance_attempts: 1,
            ..test_config()
        };

        let err = workflow(config, &faucet, &ledger).run().await.unwrap_err();

        assert!(err.to_string().contains("Balance is still 0"));
        assert_eq!(ledger.balance_reads(), 1);
    }

    #[tokio::test]
    async fn test_balance_arriving_late_is_accepted() {
        let faucet = Arc::new(MockFaucet::default());
        let ledger = Arc::new(MockLedger::with_balances(&[0, 0, 500]));

        let report = workflow(test_config(), &faucet, &ledger).run().await.unwrap();

        assert_eq!(report.balance, 500);
        assert_eq!(ledger.balance_reads(), 3);
        assert_eq!(ledger.executions(), 1);
    }

    #[tokio::test]
    async fn test_faucet_rejection_propagates() {
        let faucet = Arc::new(MockFaucet::rejecting());
        let ledger = Arc::new(MockLedger::funded());

        let err = workflow(test_config(), &faucet, &ledger).run().await.unwrap_err();

        assert!(matches!(err, Error::Faucet(_)));
        assert_eq!(ledger.balance_reads(), 0);
    }

    #[tokio::test]
    async fn test_faucet_is_asked_for_the_sender() {
        let faucet = Arc::new(MockFaucet::default());
        let ledger = Arc::new(MockLedger::funded());

        let report = workflow(test_config(), &faucet, &ledger).run().await.unwrap();

        assert_eq!(faucet.requests(), vec![report.sender]);
        assert_eq!(ledger.contract.submitted()[0].sender, report.sender);
    }
}

#[cfg(test)]
mod submission_tests {
    use super::*;

    #[tokio::test]
    async fn test_funded_run_submits_exactly_once() {
        let faucet = Arc::new(MockFaucet::default());
        let ledger = Arc::new(MockLedger::funded());

        let report = workflow(test_config(), &faucet, &ledger).run().await.unwrap();

        assert_eq!(ledger.executions(), 1);
        assert_eq!(ledger.contract.submitted().len(), 1);
        assert_eq!(report.package_id, PACKAGE_ID);
    }

    #[tokio::test]
    async fn test_state_is_submitted_as_bytes_only() {
        let faucet = Arc::new(MockFaucet::default());
        let ledger = Arc::new(MockLedger::funded());

        workflow(test_config(), &faucet, &ledger).run().await.unwrap();

        let call = &ledger.contract.submitted()[0].call;
        let state_args: Vec<_> = call
            .arguments
            .iter()
            .filter(|arg| matches!(arg, CallArg::Bytes(_) | CallArg::Text(_)))
            .collect();
        assert_eq!(state_args.len(), 1);
        assert!(matches!(state_args[0], CallArg::Bytes(_)));
    }

    #[tokio::test]
    async fn test_text_state_when_configured() {
        let faucet = Arc::new(MockFaucet::default());
        let ledger = Arc::new(MockLedger::funded());
        let config = WorkflowConfig {
            state: StatePayload::Text("plain words".to_string()),
            ..test_config()
        };

        workflow(config, &faucet, &ledger).run().await.unwrap();

        let call = &ledger.contract.submitted()[0].call;
        assert_eq!(call.arguments[0], CallArg::Text("plain words".to_string()));
    }

    #[tokio::test]
    async fn test_delete_lock_is_one_day_ahead() {
        let faucet = Arc::new(MockFaucet::default());
        let ledger = Arc::new(MockLedger::funded());

        let expected = Utc::now().timestamp() + 86_400;
        workflow(test_config(), &faucet, &ledger).run().await.unwrap();

        let call = &ledger.contract.submitted()[0].call;
        match call.arguments[4] {
            CallArg::TimeLock(TimeLock::UnlockAt(at)) => {
                assert!((i64::from(at) - expected).abs() <= 5, "unlock at {at}");
            }
            ref other => panic!("Expected UnlockAt delete lock, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_package_fails_before_submission() {
        let faucet = Arc::new(MockFaucet::default());
        let ledger = Arc::new(MockLedger::funded());
        let config = WorkflowConfig {
            package_id: None,
            ..test_config()
        };

        let err = workflow(config, &faucet, &ledger).run().await.unwrap_err();

        assert!(matches!(err, Error::Config(_)));
        assert!(faucet.requests().is_empty());
        assert_eq!(ledger.balance_reads(), 0);
        assert_eq!(ledger.executions(), 0);
    }

    #[tokio::test]
    async fn test_blank_package_fails_before_funding() {
        let faucet = Arc::new(MockFaucet::default());
        let ledger = Arc::new(MockLedger::funded());
        let config = WorkflowConfig {
            package_id: Some("  ".to_string()),
            ..test_config()
        };

        let err = workflow(config, &faucet, &ledger).run().await.unwrap_err();

        assert!(matches!(err, Error::Config(_)));
        assert!(faucet.requests().is_empty());
        assert_eq!(ledger.balance_reads(), 0);
    }

    #[tokio::test]
    async fn test_failed_execution_is_reported() {
        let faucet = Arc::new(MockFaucet::default());
        let ledger = Arc::new(MockLedger::funded());
        ledger.contract.set_failure("InsufficientGas");

        let err = workflow(test_config(), &faucet, &ledger).run().await.unwrap_err();

        assert!(matches!(err, Error::TransactionFailed(_)));
        assert!(err.to_string().contains("InsufficientGas"));
    }
}

#[cfg(test)]
mod verification_tests {
    use super::*;

    #[tokio::test]
    async fn test_locked_record_passes_all_checks() {
        let faucet = Arc::new(MockFaucet::default());
        let ledger = Arc::new(MockLedger::funded());

        let report = workflow(test_config(), &faucet, &ledger).run().await.unwrap();

        let record = &report.record;
        assert_eq!(record.method, NotarizationMethod::Locked);
        let locking = record.lock_metadata().unwrap();
        assert_eq!(locking.update_lock, TimeLock::UntilDestroyed);
        assert_eq!(locking.transfer_lock, TimeLock::UntilDestroyed);
        assert_eq!(record.state_version_count, 0);
        assert_eq!(
            record.immutable_metadata.description.as_deref(),
            Some("This metadata will not change")
        );
        assert_eq!(
            record.updatable_metadata.as_deref(),
            Some("This metadata can be changed")
        );
    }

    #[tokio::test]
    async fn test_dynamic_record_fails_method_check() {
        let faucet = Arc::new(MockFaucet::default());
        let ledger = Arc::new(MockLedger::funded());
        ledger.contract.set_method("Dynamic");

        let err = workflow(test_config(), &faucet, &ledger).run().await.unwrap_err();

        match err {
            Error::InvariantViolation {
                field,
                expected,
                actual,
            } => {
                assert_eq!(field, "method");
                assert_eq!(expected, "Locked");
                assert_eq!(actual, "Dynamic");
            }
            other => panic!("Expected invariant violation, got {other}"),
        }
        assert_eq!(ledger.executions(), 1);
    }

    #[tokio::test]
    async fn test_report_renders_record() {
        let faucet = Arc::new(MockFaucet::default());
        let ledger = Arc::new(MockLedger::funded());

        let report = workflow(test_config(), &faucet, &ledger).run().await.unwrap();
        let rendered = report.to_string();

        assert!(rendered.starts_with("Locked notarization created on localnet"));
        assert!(rendered.contains(&report.record.id.to_string()));
        assert!(rendered.contains("method:              Locked"));
        assert!(rendered.contains("update lock:         UntilDestroyed"));
        assert!(rendered.contains("\"Important document content\""));
    }
}
