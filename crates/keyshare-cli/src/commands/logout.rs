use keyshare_core::KeyService;
use tracing::debug;

use crate::app::{clear_credentials, AppContext};
use crate::cli::LogoutArgs;
use crate::helpers::confirm;
use crate::ui::{badge, info, Badge};

pub async fn handle_logout(ctx: &AppContext<'_>, args: &LogoutArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context();

    if !args.force && !confirm("Really deauthorize this device and remove local private keys?")? {
        return Ok(());
    }

    // The local keys are removed even when the service can't be told.
    let revoked = match ctx.service() {
        Ok(service) => service.device_delete(None).await.map_err(anyhow::Error::from),
        Err(err) => Err(err),
    };
    match revoked {
        Ok(device) => debug!(device_id = %device, "device keys revoked"),
        Err(err) => {
            debug!(error = %err, "device revocation failed");
            eprintln!(
                "{}",
                badge(
                    &ui,
                    Badge::Warn,
                    "Failed to deauthorize device keys from the key service, but still attempting to delete local device keys."
                )
            );
        }
    }

    clear_credentials(ctx.config()?).map_err(|e| {
        anyhow::anyhow!("Failed to remove local device keys: {}", e)
    })?;
    info(
        &ui,
        &badge(
            &ui,
            Badge::Ok,
            "You have been logged out. Log in again to authorize this device.",
        ),
    );
    Ok(())
}
