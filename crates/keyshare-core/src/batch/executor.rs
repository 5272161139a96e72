//! Concurrent, failure-isolating execution of one operation over many targets.

use std::fmt::Display;
use std::future::Future;

use futures::future::join_all;
use tracing::debug;

use crate::error::{KeyshareError, Result};

/// Most targets accepted in one batch, to avoid flooding the remote service.
pub const MAX_BATCH_TARGETS: usize = 75;

/// Per-target result of a batch operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome<R> {
    Success(R),
    /// Human-readable reason the item failed.
    Failure(String),
}

impl<R> BatchOutcome<R> {
    /// Capture any error as the failure variant.
    pub fn from_result<E: Display>(result: std::result::Result<R, E>) -> Self {
        match result {
            Ok(value) => BatchOutcome::Success(value),
            Err(err) => BatchOutcome::Failure(err.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BatchOutcome::Success(_))
    }

    pub fn success(&self) -> Option<&R> {
        match self {
            BatchOutcome::Success(value) => Some(value),
            BatchOutcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            BatchOutcome::Success(_) => None,
            BatchOutcome::Failure(message) => Some(message),
        }
    }

    /// Single-target commands: surface the failure as a command-level error.
    pub fn into_result(self) -> Result<R> {
        match self {
            BatchOutcome::Success(value) => Ok(value),
            BatchOutcome::Failure(message) => Err(KeyshareError::ItemOperationFailed(message)),
        }
    }
}

impl<R, E: Display> From<std::result::Result<R, E>> for BatchOutcome<R> {
    fn from(result: std::result::Result<R, E>) -> Self {
        BatchOutcome::from_result(result)
    }
}

/// Outcomes of a batch, one per input target, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult<R> {
    outcomes: Vec<BatchOutcome<R>>,
}

impl<R> BatchResult<R> {
    pub fn new(outcomes: Vec<BatchOutcome<R>>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[BatchOutcome<R>] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<BatchOutcome<R>> {
        self.outcomes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BatchOutcome<R>> {
        self.outcomes.iter()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    /// Successful values and failure messages, each in input order.
    pub fn partition(&self) -> (Vec<&R>, Vec<&str>) {
        let mut successes = Vec::new();
        let mut failures = Vec::new();
        for outcome in &self.outcomes {
            match outcome {
                BatchOutcome::Success(value) => successes.push(value),
                BatchOutcome::Failure(message) => failures.push(message.as_str()),
            }
        }
        (successes, failures)
    }
}

impl<'a, R> IntoIterator for &'a BatchResult<R> {
    type Item = &'a BatchOutcome<R>;
    type IntoIter = std::slice::Iter<'a, BatchOutcome<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

/// Reject batches larger than [`MAX_BATCH_TARGETS`] before any work starts.
pub fn check_batch_size(count: usize) -> Result<()> {
    if count > MAX_BATCH_TARGETS {
        return Err(KeyshareError::BatchTooLarge {
            count,
            limit: MAX_BATCH_TARGETS,
        });
    }
    Ok(())
}

/// Start `operation` for every target at once and wait for all of them.
///
/// The operation reports failure through [`BatchOutcome::Failure`], so one
/// item can never abort the others. There is no early exit and no timeout.
/// The result lists outcomes in target order regardless of completion order.
pub async fn run_batch<T, R, F, Fut>(targets: Vec<T>, operation: F) -> BatchResult<R>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = BatchOutcome<R>>,
{
    let count = targets.len();
    debug!(targets = count, "starting batch");

    let pending: Vec<Fut> = targets.into_iter().map(operation).collect();
    let result = BatchResult::new(join_all(pending).await);

    for message in result.iter().filter_map(BatchOutcome::failure) {
        debug!(error = %message, "batch item failed");
    }
    debug!(
        succeeded = result.success_count(),
        failed = result.failure_count(),
        "batch finished"
    );
    result
}
