use serde::Serialize;

use keyshare_core::service::UserId;
use keyshare_core::KeyService;

use crate::app::AppContext;
use crate::cli::UserLookupArgs;
use crate::ui::{print, table, Badge, Column, UiContext};

#[derive(Debug, Serialize, PartialEq, Eq)]
struct KeyStatus {
    user: UserId,
    has_keys: bool,
}

pub async fn handle_lookup(ctx: &AppContext<'_>, args: &UserLookupArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let service = ctx.service()?;
    let found = service
        .user_key_exists(&args.users)
        .await
        .map_err(|e| anyhow::anyhow!("Unable to retrieve user public keys - {}", e))?;
    let statuses = in_request_order(&args.users, &found);

    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }
    print(&ui, &lookup_table(&ui, &statuses));
    Ok(())
}

/// One status per requested user; users the service left out have no keys.
fn in_request_order(users: &[UserId], found: &[(UserId, bool)]) -> Vec<KeyStatus> {
    users
        .iter()
        .map(|user| KeyStatus {
            user: user.clone(),
            has_keys: found
                .iter()
                .any(|(id, has_keys)| id == user && *has_keys),
        })
        .collect()
}

fn lookup_table(ui: &UiContext, statuses: &[KeyStatus]) -> String {
    let rows: Vec<Vec<String>> = statuses
        .iter()
        .map(|status| {
            let (badge, text) = if status.has_keys {
                (Badge::Ok, "has public keys")
            } else {
                (Badge::Err, "user has not generated keys yet")
            };
            vec![status.user.to_string(), badge.paint(text, ui.color)]
        })
        .collect();
    table(ui, &[Column::new("User ID"), Column::new("Public Key")], &rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_users_have_no_keys() {
        let users = vec![UserId::new("b@example.com"), UserId::new("a@example.com")];
        let found = vec![(UserId::new("a@example.com"), true)];
        let statuses = in_request_order(&users, &found);
        assert_eq!(
            statuses,
            vec![
                KeyStatus {
                    user: UserId::new("b@example.com"),
                    has_keys: false
                },
                KeyStatus {
                    user: UserId::new("a@example.com"),
                    has_keys: true
                },
            ]
        );
    }

    #[test]
    fn test_plain_table() {
        let statuses = vec![KeyStatus {
            user: UserId::new("a@example.com"),
            has_keys: true,
        }];
        assert_eq!(
            lookup_table(&UiContext::plain(), &statuses),
            "a@example.com\thas public keys"
        );
    }
}
