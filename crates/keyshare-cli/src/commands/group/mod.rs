//! Group commands. Each targets one group, resolved with unknown names failing.

mod create;
mod delete;
mod info;
mod list;
mod members;
mod rename;

use keyshare_core::service::GroupDetails;
use keyshare_core::{GroupId, GroupReference, KeyService};

use crate::app::{AppContext, GroupResolver};

pub use create::handle_create;
pub use delete::handle_delete;
pub use info::handle_info;
pub use list::handle_list;
pub use members::{handle_members, MemberEdit};
pub use rename::handle_rename;

/// Resolve a single group reference, keeping the resolver for later prompts and lookups.
async fn resolve_group(
    ctx: &AppContext<'_>,
    reference: &GroupReference,
) -> anyhow::Result<(GroupResolver, GroupId)> {
    let mut resolver = ctx.resolver()?;
    let id = resolver.resolve(reference).await?;
    Ok((resolver, id))
}

/// Fetch details and refuse unless the caller administers the group.
async fn admin_details<S: KeyService + ?Sized>(
    service: &S,
    id: &GroupId,
    action: &str,
) -> anyhow::Result<GroupDetails> {
    let details = service
        .group_get(id)
        .await
        .map_err(|e| anyhow::anyhow!("Was not able to retrieve information about {}: {}", id, e))?;
    if !details.record.is_admin {
        anyhow::bail!(
            "You aren't currently an admin of '{}' so you may not {} it.",
            details.record.display_name(),
            action
        );
    }
    Ok(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::{group, FakeService};

    #[tokio::test]
    async fn test_non_admin_is_refused() {
        let service = FakeService {
            groups: vec![group("g1", Some("ops"), false)],
            ..FakeService::default()
        };
        let err = admin_details(&service, &GroupId::new("g1"), "delete")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "You aren't currently an admin of 'ops' so you may not delete it."
        );
    }

    #[tokio::test]
    async fn test_admin_gets_details() {
        let service = FakeService {
            groups: vec![group("g1", None, true)],
            ..FakeService::default()
        };
        let details = admin_details(&service, &GroupId::new("g1"), "rename")
            .await
            .unwrap();
        assert_eq!(details.record.display_name(), "g1");
    }

    #[tokio::test]
    async fn test_missing_group_reports_id() {
        let err = admin_details(&FakeService::default(), &GroupId::new("gone"), "delete")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("about gone"));
    }
}
