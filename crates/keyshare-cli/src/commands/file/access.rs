use std::path::Path;

use serde::Serialize;

use keyshare_core::service::{AccessFailure, AccessList, AccessResult, Grantee};
use keyshare_core::{
    check_batch_size, BatchOutcome, BatchReport, GroupMaps, KeyService, UnresolvedPolicy,
};

use crate::app::AppContext;
use crate::cli::AccessArgs;
use crate::helpers::files::{display_name, read_input};
use crate::ui::{print, print_batch_summary, table, Column, UiContext};

use super::run_files;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccessChange {
    Grant,
    Revoke,
}

impl AccessChange {
    fn action(self) -> &'static str {
        match self {
            AccessChange::Grant => "grant",
            AccessChange::Revoke => "revoke",
        }
    }

    fn columns(self) -> [Column; 3] {
        match self {
            AccessChange::Grant => [
                Column::new("File"),
                Column::new("Successful Grants"),
                Column::new("Failed Grants"),
            ],
            AccessChange::Revoke => [
                Column::new("File"),
                Column::new("Successful Revokes"),
                Column::new("Failed Revokes"),
            ],
        }
    }
}

/// Access change applied to one file.
struct FileAccess {
    file: String,
    result: AccessResult,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct AccessRow {
    file: String,
    succeeded: Vec<String>,
    failed: Vec<String>,
}

pub async fn handle_grant(ctx: &AppContext<'_>, args: &AccessArgs) -> anyhow::Result<()> {
    change_access(ctx, args, AccessChange::Grant).await
}

pub async fn handle_revoke(ctx: &AppContext<'_>, args: &AccessArgs) -> anyhow::Result<()> {
    change_access(ctx, args, AccessChange::Revoke).await
}

async fn change_access(
    ctx: &AppContext<'_>,
    args: &AccessArgs,
    change: AccessChange,
) -> anyhow::Result<()> {
    check_batch_size(args.files.len())?;
    let ui = ctx.ui_context();
    let service = ctx.service()?;
    let mut resolver = ctx.resolver()?;
    let groups = resolver
        .resolve_many(&args.groups, UnresolvedPolicy::Echo)
        .await?;
    let access = AccessList::new(args.users.clone(), groups);

    let service_ref = service.as_ref();
    let access_ref = &access;
    let result = run_files(&args.files, |path| async move {
        BatchOutcome::from_result(apply_change(service_ref, &path, access_ref, change).await)
    })
    .await?;

    // Names only matter for display; fall back to IDs if the directory is unavailable.
    let names = if access.groups.is_empty() {
        None
    } else {
        resolver.groups().await.ok()
    };
    let rows: Vec<AccessRow> = result
        .iter()
        .filter_map(BatchOutcome::success)
        .map(|applied| access_row(applied, names))
        .collect();
    let report = BatchReport::from(&result);

    if ui.mode.is_json() {
        let json = serde_json::json!({ "files": rows, "summary": report });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }
    if !rows.is_empty() {
        print(&ui, &render_rows(&ui, change, &rows));
    }
    if result.len() == 1 {
        return Ok(());
    }
    print_batch_summary(&ui, &report, "files", "file(s)", "updated", false)
}

async fn apply_change<S: KeyService + ?Sized>(
    service: &S,
    path: &Path,
    access: &AccessList,
    change: AccessChange,
) -> Result<FileAccess, String> {
    let file = display_name(path);
    let data = read_input(path).await?;
    let id = service.document_id(&data).await.map_err(|_| {
        format!(
            "Failed to parse '{}'. File doesn't appear to be an encrypted file.",
            file
        )
    })?;
    let result = match change {
        AccessChange::Grant => service.document_grant(&id, access).await,
        AccessChange::Revoke => service.document_revoke(&id, access).await,
    }
    .map_err(|e| format!("Failed to {} access to '{}': {}", change.action(), file, e))?;
    Ok(FileAccess { file, result })
}

fn grantee_label(grantee: &Grantee, names: Option<&GroupMaps>) -> String {
    match grantee {
        Grantee::User(user) => user.to_string(),
        Grantee::Group(id) => names
            .map(|maps| maps.display_name(id))
            .unwrap_or_else(|| id.to_string()),
    }
}

fn failure_label(failure: &AccessFailure, names: Option<&GroupMaps>) -> String {
    let label = grantee_label(&failure.grantee, names);
    // Service errors mention the group ID; show the name the user typed instead.
    let error = match &failure.grantee {
        Grantee::Group(id) => failure.error.replace(id.as_str(), &label),
        Grantee::User(_) => failure.error.clone(),
    };
    format!("{} ({})", label, error)
}

fn access_row(applied: &FileAccess, names: Option<&GroupMaps>) -> AccessRow {
    AccessRow {
        file: applied.file.clone(),
        succeeded: applied
            .result
            .succeeded
            .iter()
            .map(|grantee| grantee_label(grantee, names))
            .collect(),
        failed: applied
            .result
            .failed
            .iter()
            .map(|failure| failure_label(failure, names))
            .collect(),
    }
}

fn render_rows(ui: &UiContext, change: AccessChange, rows: &[AccessRow]) -> String {
    let separator = if ui.mode.is_pretty() { "\n" } else { ", " };
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.file.clone(),
                row.succeeded.join(separator),
                row.failed.join(separator),
            ]
        })
        .collect();
    table(ui, &change.columns(), &cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use keyshare_core::service::UserId;
    use keyshare_core::{GroupId, GroupName, GroupRecord};

    fn maps() -> GroupMaps {
        let now = Utc::now();
        GroupMaps::from_records(vec![GroupRecord {
            id: GroupId::new("g-71"),
            name: Some(GroupName::new("ops")),
            is_admin: true,
            is_member: true,
            created: now,
            updated: now,
        }])
    }

    #[test]
    fn test_rows_show_group_names() {
        let maps = maps();
        let applied = FileAccess {
            file: "plan.txt.iron".to_string(),
            result: AccessResult {
                succeeded: vec![
                    Grantee::User(UserId::new("a@example.com")),
                    Grantee::Group(GroupId::new("g-71")),
                ],
                failed: vec![AccessFailure {
                    grantee: Grantee::Group(GroupId::new("nope")),
                    error: "Group nope not found".to_string(),
                }],
            },
        };
        let row = access_row(&applied, Some(&maps));
        assert_eq!(row.succeeded, vec!["a@example.com", "ops"]);
        assert_eq!(row.failed, vec!["nope (Group nope not found)"]);
    }

    #[test]
    fn test_failure_error_mentions_name() {
        let maps = maps();
        let failure = AccessFailure {
            grantee: Grantee::Group(GroupId::new("g-71")),
            error: "Already shared with g-71".to_string(),
        };
        assert_eq!(
            failure_label(&failure, Some(&maps)),
            "ops (Already shared with ops)"
        );
    }

    #[test]
    fn test_ids_without_directory() {
        let grantee = Grantee::Group(GroupId::new("g-71"));
        assert_eq!(grantee_label(&grantee, None), "g-71");
    }

    #[test]
    fn test_plain_rows_are_single_line() {
        let rows = vec![AccessRow {
            file: "a.iron".to_string(),
            succeeded: vec!["x@example.com".to_string(), "ops".to_string()],
            failed: Vec::new(),
        }];
        let out = render_rows(&UiContext::plain(), AccessChange::Grant, &rows);
        assert_eq!(out, "a.iron\tx@example.com, ops\t");
    }
}
