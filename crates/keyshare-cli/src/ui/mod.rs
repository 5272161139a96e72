//! UI primitives for the Keyshare CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, color, unicode, quiet)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badges and colour styling
//! - **Render**: Tables, headers, hints, batch summaries, errors
//! - **Format**: Timestamps and flags

mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use mode::{FormatFlag, OutputMode};
pub use theme::Badge;

pub use render::{
    badge, blank_line, candidate_table, detail_table, header, info, print, print_batch_summary,
    print_error, table, Column,
};

pub use format::{format_datetime, yes_no};
