use keyshare_core::KeyService;

use crate::app::AppContext;
use crate::cli::GroupRenameArgs;
use crate::errors::CliError;
use crate::ui::{badge, info, Badge};

use super::{admin_details, resolve_group};

pub async fn handle_rename(ctx: &AppContext<'_>, args: &GroupRenameArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let service = ctx.service()?;
    let (mut resolver, id) = resolve_group(ctx, &args.group).await?;

    if resolver.name_exists(&args.new_name).await? {
        return Err(CliError::invalid_input(format!(
            "You are already in a group with the name '{}'. Please pick a different name.",
            args.new_name
        ))
        .into());
    }
    admin_details(service.as_ref(), &id, "rename").await?;

    let group = service
        .group_rename(&id, &args.new_name)
        .await
        .map_err(|e| anyhow::anyhow!("Group could not be updated: {}", e))?;

    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&group)?);
        return Ok(());
    }
    info(&ui, &badge(&ui, Badge::Ok, "Group name successfully updated."));
    Ok(())
}
