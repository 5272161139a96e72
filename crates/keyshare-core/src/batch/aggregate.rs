//! Success/failure summaries over a finished batch.

use serde::Serialize;

use super::executor::{BatchOutcome, BatchResult};

/// Counts and failure messages of a batch, ready for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub success_count: usize,
    pub failure_count: usize,
    /// Failure messages in target order.
    pub failures: Vec<String>,
}

impl BatchReport {
    pub fn from_result<R>(result: &BatchResult<R>) -> Self {
        let failures: Vec<String> = result
            .iter()
            .filter_map(BatchOutcome::failure)
            .map(str::to_string)
            .collect();
        Self {
            success_count: result.len() - failures.len(),
            failure_count: failures.len(),
            failures,
        }
    }

    pub fn total(&self) -> usize {
        self.success_count + self.failure_count
    }

    pub fn all_succeeded(&self) -> bool {
        self.failure_count == 0
    }

    /// e.g. `3 files successfully encrypted.`; `None` when nothing succeeded.
    pub fn success_line(&self, subject: &str, verb: &str) -> Option<String> {
        (self.success_count > 0)
            .then(|| format!("{} {} successfully {}.", self.success_count, subject, verb))
    }

    /// e.g. `1 file(s) failed to be encrypted.`; `None` when nothing failed.
    pub fn failure_line(&self, subject: &str, verb: &str) -> Option<String> {
        (self.failure_count > 0)
            .then(|| format!("{} {} failed to be {}.", self.failure_count, subject, verb))
    }
}

impl<R> From<&BatchResult<R>> for BatchReport {
    fn from(result: &BatchResult<R>) -> Self {
        BatchReport::from_result(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed() -> BatchResult<u32> {
        BatchResult::new(vec![
            BatchOutcome::Success(1),
            BatchOutcome::Failure("first".to_string()),
            BatchOutcome::Success(2),
            BatchOutcome::Failure("second".to_string()),
        ])
    }

    #[test]
    fn test_report_counts_and_order() {
        let report = BatchReport::from(&mixed());
        assert_eq!(report.success_count, 2);
        assert_eq!(report.failure_count, 2);
        assert_eq!(report.total(), 4);
        assert_eq!(report.failures, vec!["first", "second"]);
        assert!(!report.all_succeeded());
    }

    #[test]
    fn test_summary_lines() {
        let report = BatchReport::from(&mixed());
        assert_eq!(
            report.success_line("files", "encrypted").as_deref(),
            Some("2 files successfully encrypted.")
        );
        assert_eq!(
            report.failure_line("file(s)", "encrypted").as_deref(),
            Some("2 file(s) failed to be encrypted.")
        );
    }

    #[test]
    fn test_summary_lines_omitted_when_zero() {
        let report = BatchReport::from(&BatchResult::<u32>::new(vec![BatchOutcome::Success(7)]));
        assert!(report.failure_line("file(s)", "decrypted").is_none());
        assert!(report.all_succeeded());

        let empty = BatchReport::default();
        assert!(empty.success_line("files", "decrypted").is_none());
    }
}
