//! Rendering primitives for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, NOTHING, UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use keyshare_core::{BatchReport, GroupName, GroupRecord};

use super::context::UiContext;
use super::format::format_datetime;
use super::mode::OutputMode;
use super::theme::{bold, dim, Badge};

/// Render a header line for a command.
///
/// Pretty mode: "Keyshare · group list (context)"
/// Plain mode: "keyshare group list"
pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Pretty => {
            let title = bold("Keyshare", ctx.color);
            match context {
                Some(c) => format!("{} \u{00B7} {} ({})", title, command, c),
                None => format!("{} \u{00B7} {}", title, command),
            }
        }
        OutputMode::Plain => format!("keyshare {}", command),
        OutputMode::Json => String::new(),
    }
}

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let label = kind.paint(kind.label(ctx.unicode), ctx.color);
    if message.is_empty() {
        label
    } else {
        format!("{} {}", label, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", dim(&format!("{}:", key), ctx.color), value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line.
pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", dim("Hint:", ctx.color), text)
    } else {
        format!("hint={}", text)
    }
}

/// Column definition for table rendering.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self { header }
    }
}

/// Render rows as a bordered table (pretty) or tab-separated lines (plain).
pub fn table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = Table::new();
    if ctx.unicode {
        table.load_preset(UTF8_FULL).apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(columns.iter().map(|c| {
        let cell = Cell::new(c.header);
        if ctx.color {
            cell.add_attribute(Attribute::Bold)
        } else {
            cell
        }
    }));
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Borderless two-column listing for detail views.
pub fn detail_table(ctx: &UiContext, rows: &[(&str, String)]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|(key, value)| kv(ctx, key, value))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = Table::new();
    table.load_preset(NOTHING);
    for (key, value) in rows {
        let mut label = Cell::new(key);
        if ctx.color {
            label = label.add_attribute(Attribute::Dim);
        }
        table.add_row(vec![label, Cell::new(value)]);
    }
    table.to_string()
}

/// Candidate listing shown before asking which same-named group to use.
pub fn candidate_table(name: &GroupName, candidates: &[GroupRecord]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Option", "ID", "Admin", "Member", "Created", "Updated"]);
    for (index, group) in candidates.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            group.id.to_string(),
            group.is_admin.to_string(),
            group.is_member.to_string(),
            format_datetime(&group.created, true),
            format_datetime(&group.updated, true),
        ]);
    }
    format!(
        "Multiple groups found with the provided name '{}', which one do you want to use?\n{}",
        name, table
    )
}

/// Summary lines for a finished batch: successes, failures, then one line per failure.
pub fn batch_summary(
    ctx: &UiContext,
    report: &BatchReport,
    success_subject: &str,
    failure_subject: &str,
    verb: &str,
) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(line) = report.success_line(success_subject, verb) {
        lines.push(badge(ctx, Badge::Ok, &line));
    }
    if let Some(line) = report.failure_line(failure_subject, verb) {
        lines.push(badge(ctx, Badge::Err, &line));
        for failure in &report.failures {
            lines.push(format!("  {}", Badge::Err.paint(failure, ctx.color)));
        }
    }
    lines
}

/// Print a batch summary, as JSON in JSON mode.
///
/// `to_stderr` keeps stdout clean when it carries document bytes.
pub fn print_batch_summary(
    ctx: &UiContext,
    report: &BatchReport,
    success_subject: &str,
    failure_subject: &str,
    verb: &str,
    to_stderr: bool,
) -> anyhow::Result<()> {
    if ctx.mode.is_json() {
        let json = serde_json::to_string_pretty(report)?;
        if to_stderr {
            eprintln!("{}", json);
        } else {
            println!("{}", json);
        }
        return Ok(());
    }
    for line in batch_summary(ctx, report, success_subject, failure_subject, verb) {
        if to_stderr {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Print a message to stdout unless in JSON mode.
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() {
        println!("{}", message);
    }
}

/// Print an informational line; suppressed by `--quiet` and JSON mode.
pub fn info(ctx: &UiContext, message: &str) {
    if !ctx.quiet {
        print(ctx, message);
    }
}

/// Print an empty line (only in pretty mode).
pub fn blank_line(ctx: &UiContext) {
    if ctx.mode.is_pretty() && !ctx.quiet {
        println!();
    }
}

/// Format an error message with optional hint.
///
/// Pretty mode: "[ERR] message" with optional "Hint: ..." on next line
/// Plain mode: "error=message" with optional "hint=suggestion"
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = Vec::new();
    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Err, message));
        if let Some(h) = error_hint {
            lines.push(hint(ctx, h));
        }
    } else {
        lines.push(format!("error={}", message));
        if let Some(h) = error_hint {
            lines.push(format!("hint={}", h));
        }
    }
    lines.join("\n")
}

/// Print an error message to stderr with optional hint.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use keyshare_core::{BatchOutcome, BatchResult, GroupId};

    fn pretty_ctx() -> UiContext {
        UiContext {
            mode: OutputMode::Pretty,
            ..UiContext::plain()
        }
    }

    #[test]
    fn test_header_modes() {
        assert_eq!(header(&UiContext::plain(), "group list", None), "keyshare group list");
        assert_eq!(
            header(&pretty_ctx(), "group info", Some("ops")),
            "Keyshare \u{00B7} group info (ops)"
        );
    }

    #[test]
    fn test_kv_plain_normalizes_key() {
        assert_eq!(kv(&UiContext::plain(), "Document ID", "d1"), "document_id=d1");
        assert_eq!(kv(&pretty_ctx(), "Name", "ops"), "Name: ops");
    }

    #[test]
    fn test_plain_table_is_tab_separated() {
        let rows = vec![vec!["a".to_string(), "b".to_string()]];
        let out = table(&UiContext::plain(), &[Column::new("X"), Column::new("Y")], &rows);
        assert_eq!(out, "a\tb");
    }

    #[test]
    fn test_candidate_table_columns() {
        let now = Utc::now();
        let record = GroupRecord {
            id: GroupId::new("gid2"),
            name: Some(GroupName::new("dup")),
            is_admin: true,
            is_member: true,
            created: now,
            updated: now,
        };
        let out = candidate_table(&GroupName::new("dup"), &[record]);
        for column in ["Option", "ID", "Admin", "Member", "Created", "Updated"] {
            assert!(out.contains(column), "missing column {}", column);
        }
        assert!(out.contains("gid2"));
        assert!(out.starts_with("Multiple groups found with the provided name 'dup'"));
    }

    #[test]
    fn test_batch_summary_lines() {
        let result = BatchResult::new(vec![
            BatchOutcome::Success(()),
            BatchOutcome::Failure("b.txt: not readable".to_string()),
        ]);
        let report = BatchReport::from(&result);
        let lines = batch_summary(&UiContext::plain(), &report, "files", "file(s)", "encrypted");
        assert_eq!(
            lines,
            vec![
                "[OK] 1 files successfully encrypted.",
                "[ERR] 1 file(s) failed to be encrypted.",
                "  b.txt: not readable",
            ]
        );
    }

    #[test]
    fn test_error_message_plain() {
        let msg = error_message(&UiContext::plain(), "boom", Some("try again"));
        assert_eq!(msg, "error=boom\nhint=try again");
    }
}
