//! Keyshare CLI - encrypt files and share them with users and groups
//!
//! This is the command-line interface for Keyshare. Cryptography happens in
//! the remote key service; this binary resolves group references, fans work
//! out over files, users and devices, and reports per-item results.

use clap::Parser;

mod app;
mod cli;
mod client;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod ui;

use crate::app::AppContext;
use crate::cli::{Cli, Commands, FileCommand, GroupCommand, UserCommand};
use crate::commands::{file, group, logout, user};
use crate::errors::{classify, Exit};
use crate::ui::print_error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx).await {
        let code = match classify(&e) {
            Exit::Cancelled => return,
            Exit::Failed(code) => code,
        };
        let ui_ctx = ctx.ui_context();
        let error_msg = format!("{}", e);
        let (message, hint) = split_hint(&error_msg);
        print_error(&ui_ctx, message, hint);
        std::process::exit(code);
    }
}

/// Separate a trailing "Hint: ..." line from an error message.
fn split_hint(error: &str) -> (&str, Option<&str>) {
    match error.find("\nHint:") {
        Some(idx) => (&error[..idx], Some(error[idx + 1..].trim_start_matches("Hint:").trim())),
        None => (error, None),
    }
}

async fn run(ctx: &AppContext<'_>) -> anyhow::Result<()> {
    match &ctx.cli().command {
        Commands::File(args) => match &args.command {
            FileCommand::Encrypt(args) => file::handle_encrypt(ctx, args).await,
            FileCommand::Decrypt(args) => file::handle_decrypt(ctx, args).await,
            FileCommand::Grant(args) => file::handle_grant(ctx, args).await,
            FileCommand::Revoke(args) => file::handle_revoke(ctx, args).await,
            FileCommand::Info(args) => file::handle_info(ctx, args).await,
        },
        Commands::Group(args) => match &args.command {
            GroupCommand::Create(args) => group::handle_create(ctx, args).await,
            GroupCommand::List => group::handle_list(ctx).await,
            GroupCommand::Info(args) => group::handle_info(ctx, args).await,
            GroupCommand::Rename(args) => group::handle_rename(ctx, args).await,
            GroupCommand::Delete(args) => group::handle_delete(ctx, args).await,
            GroupCommand::AddMember(args) => {
                group::handle_members(ctx, args, group::MemberEdit::AddMember).await
            }
            GroupCommand::RemoveMember(args) => {
                group::handle_members(ctx, args, group::MemberEdit::RemoveMember).await
            }
            GroupCommand::AddAdmin(args) => {
                group::handle_members(ctx, args, group::MemberEdit::AddAdmin).await
            }
            GroupCommand::RemoveAdmin(args) => {
                group::handle_members(ctx, args, group::MemberEdit::RemoveAdmin).await
            }
        },
        Commands::User(args) => match &args.command {
            UserCommand::Lookup(args) => user::handle_lookup(ctx, args).await,
            UserCommand::DeviceList => user::handle_device_list(ctx).await,
            UserCommand::DeviceDelete(args) => user::handle_device_delete(ctx, args).await,
            UserCommand::ChangePassphrase => user::handle_change_passphrase(ctx).await,
        },
        Commands::Logout(args) => logout::handle_logout(ctx, args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_hint() {
        let (message, hint) =
            split_hint("No device credentials found.\nHint: Log in on this device first.");
        assert_eq!(message, "No device credentials found.");
        assert_eq!(hint, Some("Log in on this device first."));

        assert_eq!(split_hint("plain failure"), ("plain failure", None));
    }
}
