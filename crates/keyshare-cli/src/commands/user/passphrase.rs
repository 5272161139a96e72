use zeroize::Zeroizing;

use keyshare_core::KeyService;

use crate::app::AppContext;
use crate::helpers::{prompt_new_passphrase, prompt_passphrase};
use crate::ui::{badge, info, Badge};

pub async fn handle_change_passphrase(ctx: &AppContext<'_>) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let service = ctx.service()?;

    let current = Zeroizing::new(prompt_passphrase("Current passphrase")?);
    let new = Zeroizing::new(prompt_new_passphrase()?);

    service
        .change_passphrase(&current, &new)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to change your passphrase: {}", e))?;

    info(&ui, &badge(&ui, Badge::Ok, "Passphrase successfully changed!"));
    Ok(())
}
