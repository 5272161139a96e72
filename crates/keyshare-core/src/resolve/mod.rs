//! Group reference resolution.
//!
//! This module provides:
//! - **cache**: Process-lifetime directory cache indexed by name and ID
//! - **resolver**: Escaped-ID bypass, name lookup, ordered list resolution
//! - **prompt**: Interactive choice between groups sharing a name

mod cache;
pub mod prompt;
mod resolver;

pub use cache::{GroupMaps, NameEntry, ResolutionCache};
pub use prompt::{parse_choice, ChoicePrompter, Disambiguator, LineSource};
pub use resolver::{Resolver, UnresolvedPolicy};
