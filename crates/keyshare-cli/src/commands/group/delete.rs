use keyshare_core::service::GroupDetails;
use keyshare_core::KeyService;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::GroupDeleteArgs;
use crate::helpers::confirm_by_retyping;
use crate::ui::{badge, info, Badge, UiContext};

use super::{admin_details, resolve_group};

const CONFIRM_PROMPT: &str =
    "Please enter the group identifier (without prefix) again to confirm its deletion";

pub async fn handle_delete(ctx: &AppContext<'_>, args: &GroupDeleteArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let service = ctx.service()?;
    let (mut resolver, id) = resolve_group(ctx, &args.group).await?;
    let details = admin_details(service.as_ref(), &id, "delete").await?;

    if !args.force {
        eprintln!("{}", deletion_warning(&ui, &details));
        // Reuses the disambiguation prompt's stdin reader.
        let expected = args.group.value();
        let source = resolver.prompter_mut().source_mut();
        if !confirm_by_retyping(source, CONFIRM_PROMPT, expected).await? {
            anyhow::bail!(
                "Group confirmation failed. Original group provided was '{}' but the confirmation value did not match.",
                expected
            );
        }
    }

    let deleted = service
        .group_delete(&id)
        .await
        .map_err(|e| anyhow::anyhow!("Group delete request failed: {}", e))?;
    debug!(group_id = %deleted, "group deleted");

    if ui.mode.is_json() {
        println!("{}", serde_json::json!({ "id": deleted }));
        return Ok(());
    }
    info(&ui, &badge(&ui, Badge::Ok, "Group successfully deleted!"));
    Ok(())
}

fn deletion_warning(ui: &UiContext, details: &GroupDetails) -> String {
    let count = |list: Option<&Vec<_>>| list.map_or(0, Vec::len);
    badge(
        ui,
        Badge::Warn,
        &format!(
            "Deleting a group will cause all documents encrypted to only that group to no longer be decryptable! \
The group you are trying to delete has {} admin(s) and {} member(s).",
            count(details.admins.as_ref()),
            count(details.members.as_ref())
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::group;
    use keyshare_core::service::UserId;

    #[test]
    fn test_warning_counts_users() {
        let details = GroupDetails {
            record: group("g1", Some("ops"), true),
            admins: Some(vec![UserId::new("a@example.com")]),
            members: None,
        };
        let warning = deletion_warning(&UiContext::plain(), &details);
        assert!(warning.contains("has 1 admin(s) and 0 member(s)"));
    }
}
