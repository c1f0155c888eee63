use crate::domain::{State, TimeLock};
use crate::error::Error;

/// Everything needed to create one locked notarization
///
/// Produced by [`LockedNotarizationBuilder::finish`] and immutable from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockedNotarizationRequest {
    state: State,
    immutable_description: Option<String>,
    updatable_metadata: Option<String>,
    delete_lock: TimeLock,
}

impl LockedNotarizationRequest {
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn immutable_description(&self) -> Option<&str> {
        self.immutable_description.as_deref()
    }

    pub fn updatable_metadata(&self) -> Option<&str> {
        self.updatable_metadata.as_deref()
    }

    pub fn delete_lock(&self) -> TimeLock {
        self.delete_lock
    }
}

/// Accumulates a locked notarization step by step
#[derive(Debug, Default)]
#[must_use = "the builder does nothing until `finish` is called"]
pub struct LockedNotarizationBuilder {
    states: Vec<State>,
    immutable_description: Option<String>,
    updatable_metadata: Option<String>,
    delete_lock: Option<TimeLock>,
}

impl LockedNotarizationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bytes_state(mut self, data: Vec<u8>, metadata: Option<String>) -> Self {
        self.states.push(State::from_bytes(data, metadata));
        self
    }

    pub fn with_string_state(mut self, data: impl Into<String>, metadata: Option<String>) -> Self {
        self.states.push(State::from_string(data.into(), metadata));
        self
    }

    pub fn with_delete_lock(mut self, lock: TimeLock) -> Self {
        self.delete_lock = Some(lock);
        self
    }

    pub fn with_immutable_description(mut self, description: impl Into<String>) -> Self {
        self.immutable_description = Some(description.into());
        self
    }

    pub fn with_updatable_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.updatable_metadata = Some(metadata.into());
        self
    }

    pub fn finish(mut self) -> Result<LockedNotarizationRequest, Error> {
        if self.states.len() > 1 {
            return Err(Error::Builder(
                "exactly one state representation may be supplied".to_string(),
            ));
        }
        let state = self
            .states
            .pop()
            .ok_or_else(|| Error::Builder("state is required".to_string()))?;

        let delete_lock = self.delete_lock.unwrap_or(TimeLock::None);
        // An UntilDestroyed delete lock could never be released
        if delete_lock == TimeLock::UntilDestroyed {
            return Err(Error::Builder(
                "delete lock cannot be UntilDestroyed".to_string(),
            ));
        }

        Ok(LockedNotarizationRequest {
            state,
            immutable_description: self.immutable_description,
            updatable_metadata: self.updatable_metadata,
            delete_lock,
        })
    }
}
