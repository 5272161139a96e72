//! Partial-failure batch execution.
//!
//! - **executor**: Runs one operation over every target concurrently, one outcome per target
//! - **aggregate**: Success/failure counts and summary lines

mod aggregate;
mod executor;

pub use aggregate::BatchReport;
pub use executor::{check_batch_size, run_batch, BatchOutcome, BatchResult, MAX_BATCH_TARGETS};
