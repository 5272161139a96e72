use std::slice;

use keyshare_core::service::UserId;
use keyshare_core::{check_batch_size, run_batch, BatchOutcome, BatchReport, GroupId, KeyService};

use crate::app::AppContext;
use crate::cli::GroupUsersArgs;
use crate::ui::print_batch_summary;

use super::resolve_group;

/// A membership or admin change, applied one user at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberEdit {
    AddMember,
    RemoveMember,
    AddAdmin,
    RemoveAdmin,
}

impl MemberEdit {
    fn subjects(self) -> (&'static str, &'static str) {
        match self {
            MemberEdit::AddMember | MemberEdit::RemoveMember => ("members", "member(s)"),
            MemberEdit::AddAdmin | MemberEdit::RemoveAdmin => ("admins", "admin(s)"),
        }
    }

    fn verb(self) -> &'static str {
        match self {
            MemberEdit::AddMember | MemberEdit::AddAdmin => "added",
            MemberEdit::RemoveMember | MemberEdit::RemoveAdmin => "removed",
        }
    }

    async fn apply<S: KeyService + ?Sized>(
        self,
        service: &S,
        group: &GroupId,
        user: &UserId,
    ) -> Result<UserId, String> {
        let users = slice::from_ref(user);
        let result = match self {
            MemberEdit::AddMember => service.group_add_members(group, users).await,
            MemberEdit::RemoveMember => service.group_remove_members(group, users).await,
            MemberEdit::AddAdmin => service.group_add_admins(group, users).await,
            MemberEdit::RemoveAdmin => service.group_remove_admins(group, users).await,
        }
        .map_err(|e| format!("{}: {}", user, e))?;

        match result.failed.into_iter().next() {
            Some(failure) => Err(format!("{}: {}", failure.user, failure.error)),
            None => Ok(user.clone()),
        }
    }
}

pub async fn handle_members(
    ctx: &AppContext<'_>,
    args: &GroupUsersArgs,
    edit: MemberEdit,
) -> anyhow::Result<()> {
    check_batch_size(args.users.len())?;
    let ui = ctx.ui_context();
    let service = ctx.service()?;
    let (_, id) = resolve_group(ctx, &args.group).await?;

    let report = edit_users(service.as_ref(), &id, args.users.clone(), edit).await;
    let (success_subject, failure_subject) = edit.subjects();
    print_batch_summary(
        &ui,
        &report,
        success_subject,
        failure_subject,
        edit.verb(),
        false,
    )
}

async fn edit_users<S: KeyService + ?Sized>(
    service: &S,
    group: &GroupId,
    users: Vec<UserId>,
    edit: MemberEdit,
) -> BatchReport {
    let result = run_batch(users, |user| async move {
        BatchOutcome::from_result(edit.apply(service, group, &user).await)
    })
    .await;
    BatchReport::from(&result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::FakeService;

    #[tokio::test]
    async fn test_rejected_user_fails_alone() {
        let service = FakeService {
            rejected_users: vec![UserId::new("ghost@example.com")],
            ..FakeService::default()
        };
        let users = vec![
            UserId::new("a@example.com"),
            UserId::new("ghost@example.com"),
            UserId::new("b@example.com"),
        ];
        let report = edit_users(&service, &GroupId::new("g1"), users, MemberEdit::AddAdmin).await;
        assert_eq!(report.success_count, 2);
        assert_eq!(report.failure_count, 1);
        assert_eq!(report.failures, vec!["ghost@example.com: User does not exist"]);
        assert_eq!(
            report.success_line("admins", "added").as_deref(),
            Some("2 admins successfully added.")
        );
    }

    #[test]
    fn test_wording() {
        assert_eq!(MemberEdit::RemoveMember.subjects(), ("members", "member(s)"));
        assert_eq!(MemberEdit::RemoveMember.verb(), "removed");
    }
}
