use keyshare_core::{GroupRecord, KeyService};

use crate::app::AppContext;
use crate::cli::GroupCreateArgs;
use crate::errors::CliError;
use crate::ui::{badge, info, print, table, yes_no, Badge, Column, UiContext};

pub async fn handle_create(ctx: &AppContext<'_>, args: &GroupCreateArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let service = ctx.service()?;
    let mut resolver = ctx.resolver()?;

    if resolver.name_exists(&args.name).await? {
        return Err(CliError::invalid_input(format!(
            "You are already in a group with the name '{}'.",
            args.name
        ))
        .into());
    }

    let group = service
        .group_create(&args.name)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create group {}: {}", args.name, e))?;

    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&group)?);
        return Ok(());
    }
    info(&ui, &badge(&ui, Badge::Ok, "New group successfully created."));
    print(&ui, &created_table(&ui, &group));
    Ok(())
}

fn created_table(ui: &UiContext, group: &GroupRecord) -> String {
    let columns = [
        Column::new("Group Name"),
        Column::new("Group ID"),
        Column::new("Admin"),
        Column::new("Member"),
    ];
    let row = vec![
        group.display_name().to_string(),
        group.id.to_string(),
        yes_no(group.is_admin, ui.unicode).to_string(),
        yes_no(group.is_member, ui.unicode).to_string(),
    ];
    table(ui, &columns, &[row])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::group;

    #[test]
    fn test_created_row() {
        let out = created_table(&UiContext::plain(), &group("g-9", Some("ops"), true));
        assert_eq!(out, "ops\tg-9\tyes\tyes");
    }
}
