use std::fmt::Display;

use crate::domain::{NotarizationMethod, OnChainNotarization, TimeLock};
use crate::error::Error;

fn ensure<T: PartialEq + Display>(
    field: &'static str,
    expected: T,
    actual: T,
) -> Result<(), Error> {
    if expected == actual {
        return Ok(());
    }
    Err(Error::InvariantViolation {
        field,
        expected: expected.to_string(),
        actual: actual.to_string(),
    })
}

/// Checks a freshly created locked notarization
///
/// The method must be `Locked` and the locking metadata must be present.
/// Update and transfer must both be locked until the record is destroyed.
pub fn check_locked(record: &OnChainNotarization) -> Result<(), Error> {
    ensure("method", NotarizationMethod::Locked, record.method)?;

    let locking = record
        .lock_metadata()
        .ok_or_else(|| Error::InvariantViolation {
            field: "immutable_metadata.locking",
            expected: "present".to_string(),
            actual: "absent".to_string(),
        })?;

    ensure(
        "update_lock",
        TimeLock::UntilDestroyed.name(),
        locking.update_lock.name(),
    )?;
    ensure(
        "transfer_lock",
        TimeLock::UntilDestroyed.name(),
        locking.transfer_lock.name(),
    )?;

    Ok(())
}
