use keyshare_core::service::{GroupDetails, UserId};
use keyshare_core::KeyService;

use crate::app::AppContext;
use crate::cli::GroupTargetArgs;
use crate::ui::{detail_table, format_datetime, print, yes_no, UiContext};

use super::resolve_group;

pub async fn handle_info(ctx: &AppContext<'_>, args: &GroupTargetArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let service = ctx.service()?;
    let (_, id) = resolve_group(ctx, &args.group).await?;

    let details = service
        .group_get(&id)
        .await
        .map_err(|e| anyhow::anyhow!("Getting group info failed: {}", e))?;

    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&details)?);
        return Ok(());
    }
    print(&ui, &details_view(&ui, &details));
    Ok(())
}

fn details_view(ui: &UiContext, details: &GroupDetails) -> String {
    let pretty = ui.mode.is_pretty();
    let separator = if pretty { "\n" } else { "," };
    let record = &details.record;
    detail_table(
        ui,
        &[
            ("Group", record.name.as_ref().map_or("None", |n| n.as_str()).to_string()),
            ("ID", record.id.to_string()),
            ("Admin", yes_no(record.is_admin, ui.unicode).to_string()),
            ("Member", yes_no(record.is_member, ui.unicode).to_string()),
            ("Created", format_datetime(&record.created, pretty)),
            ("Updated", format_datetime(&record.updated, pretty)),
            ("Admins", join_users(details.admins.as_deref(), separator)),
            ("Members", join_users(details.members.as_deref(), separator)),
        ],
    )
}

fn join_users(users: Option<&[UserId]>, separator: &str) -> String {
    users
        .unwrap_or_default()
        .iter()
        .map(UserId::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::group;

    #[test]
    fn test_plain_details() {
        let details = GroupDetails {
            record: group("g1", None, true),
            admins: Some(vec![UserId::new("a@example.com")]),
            members: Some(vec![
                UserId::new("a@example.com"),
                UserId::new("b@example.com"),
            ]),
        };
        let out = details_view(&UiContext::plain(), &details);
        assert!(out.contains("group=None"));
        assert!(out.contains("id=g1"));
        assert!(out.contains("admin=yes"));
        assert!(out.contains("members=a@example.com,b@example.com"));
    }
}
