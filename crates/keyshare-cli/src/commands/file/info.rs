use std::path::Path;

use serde::Serialize;

use keyshare_core::service::DocumentMetadata;
use keyshare_core::{check_batch_size, BatchOutcome, KeyService};

use crate::app::AppContext;
use crate::cli::FileInfoArgs;
use crate::helpers::files::{display_name, read_input};
use crate::ui::{badge, format_datetime, print, table, Badge, Column, UiContext};

use super::run_files;

const COLUMNS: [Column; 5] = [
    Column::new("File"),
    Column::new("Users with access"),
    Column::new("Groups with access"),
    Column::new("Created"),
    Column::new("Updated"),
];

#[derive(Debug, Serialize)]
struct FileInfo {
    file: String,
    #[serde(flatten)]
    metadata: DocumentMetadata,
}

pub async fn handle_info(ctx: &AppContext<'_>, args: &FileInfoArgs) -> anyhow::Result<()> {
    check_batch_size(args.files.len())?;
    let ui = ctx.ui_context();
    let service = ctx.service()?;
    let service = service.as_ref();

    let result = run_files(&args.files, |path| async move {
        BatchOutcome::from_result(inspect_file(service, &path).await)
    })
    .await?;
    let (found, failures) = result.partition();

    if ui.mode.is_json() {
        let json = serde_json::json!({ "files": found, "failures": failures });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }
    if !found.is_empty() {
        print(&ui, &render_info(&ui, &found));
    }
    for failure in failures {
        println!("{}", badge(&ui, Badge::Err, failure));
    }
    Ok(())
}

async fn inspect_file<S: KeyService + ?Sized>(service: &S, path: &Path) -> Result<FileInfo, String> {
    let file = display_name(path);
    let data = read_input(path).await?;
    let id = service.document_id(&data).await.map_err(|_| {
        format!(
            "Failed to parse '{}'. File doesn't appear to be an encrypted file.",
            file
        )
    })?;
    let metadata = service
        .document_metadata(&id)
        .await
        .map_err(|e| format!("Failed to get metadata for {}: {}.", file, e))?;
    Ok(FileInfo { file, metadata })
}

fn render_info(ui: &UiContext, found: &[&FileInfo]) -> String {
    let pretty = ui.mode.is_pretty();
    let separator = if pretty { "\n" } else { ", " };
    let rows: Vec<Vec<String>> = found
        .iter()
        .map(|info| {
            let visible = &info.metadata.visible_to;
            let users: Vec<String> = visible.users.iter().map(|u| u.to_string()).collect();
            let groups: Vec<String> = visible
                .groups
                .iter()
                .map(|group| {
                    let name = group.name.as_ref().map_or("UNNAMED", |n| n.as_str());
                    format!("{} ({})", name, group.id)
                })
                .collect();
            vec![
                info.file.clone(),
                users.join(separator),
                groups.join(separator),
                format_datetime(&info.metadata.created, pretty),
                format_datetime(&info.metadata.updated, pretty),
            ]
        })
        .collect();
    table(ui, &COLUMNS, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use keyshare_core::service::{
        DocumentAssociation, DocumentId, UserId, VisibleGroup, VisibleTo,
    };
    use keyshare_core::{GroupId, GroupName};

    #[test]
    fn test_plain_rows_list_access() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let info = FileInfo {
            file: "notes.md.iron".to_string(),
            metadata: DocumentMetadata {
                id: DocumentId::new("d1"),
                name: None,
                association: DocumentAssociation::Owner,
                visible_to: VisibleTo {
                    users: vec![UserId::new("a@example.com")],
                    groups: vec![
                        VisibleGroup {
                            id: GroupId::new("g1"),
                            name: Some(GroupName::new("ops")),
                        },
                        VisibleGroup {
                            id: GroupId::new("g2"),
                            name: None,
                        },
                    ],
                },
                created: at,
                updated: at,
            },
        };
        let out = render_info(&UiContext::plain(), &[&info]);
        assert!(out.starts_with("notes.md.iron\ta@example.com\tops (g1), UNNAMED (g2)\t"));
        assert!(out.contains("2024-03-01T12:00:00+00:00"));
    }
}
