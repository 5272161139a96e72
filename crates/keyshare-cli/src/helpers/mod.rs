//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Identifier validation used by clap (`parsing`)
//! - Terminal prompts and the disambiguation line source (`input`)
//! - File command inputs and outputs (`files`)

pub mod files;
mod input;
mod parsing;

// Re-export public API
pub use input::{
    confirm, confirm_by_retyping, prompt_new_passphrase, prompt_passphrase, TerminalLines,
};
pub use parsing::{
    parse_device_id, parse_group_name, parse_group_reference, parse_user_id,
};
