//! # Keyshare Core
//!
//! Core library for Keyshare - a CLI for encrypting files to users and groups
//! through a remote key-management service.
//!
//! This crate holds the domain logic that is independent of the terminal:
//! turning user-typed group references into canonical IDs, and fanning
//! per-item remote operations out over a list of targets while tolerating
//! partial failure.
//!
//! ## Architecture
//!
//! - **group**: Group records and the `id^` escaped reference syntax
//! - **service**: Contracts for the remote directory and key service
//! - **resolve**: Resolution cache, reference resolver, disambiguation prompter
//! - **batch**: Concurrent batch executor and result aggregation

pub mod batch;
pub mod error;
pub mod group;
pub mod resolve;
pub mod service;

pub use batch::{
    check_batch_size, run_batch, BatchOutcome, BatchReport, BatchResult, MAX_BATCH_TARGETS,
};
pub use error::{KeyshareError, Result};
pub use group::{GroupId, GroupName, GroupRecord, GroupReference, GROUP_ID_PREFIX};
pub use resolve::{
    ChoicePrompter, Disambiguator, GroupMaps, LineSource, NameEntry, ResolutionCache, Resolver,
    UnresolvedPolicy,
};
pub use service::{GroupDirectory, KeyService};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
