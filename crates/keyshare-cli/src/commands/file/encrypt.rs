use std::path::Path;

use keyshare_core::service::{AccessList, Grantee};
use keyshare_core::{BatchOutcome, BatchReport, KeyService, UnresolvedPolicy};
use tracing::debug;

use crate::app::AppContext;
use crate::cli::EncryptArgs;
use crate::helpers::files::{
    display_name, encrypted_output_path, read_input, read_stdin, remove_source, Output,
};
use crate::ui::print_batch_summary;

use super::{check_file_targets, print_warnings, print_written, run_files, Written};

pub async fn handle_encrypt(ctx: &AppContext<'_>, args: &EncryptArgs) -> anyhow::Result<()> {
    if !args.stdin {
        check_file_targets(&args.files, args.out.as_deref())?;
    }
    let ui = ctx.ui_context();
    let service = ctx.service()?;

    // Unknown group names are passed through; the service reports them per file.
    let groups = if args.groups.is_empty() {
        Vec::new()
    } else {
        let mut resolver = ctx.resolver()?;
        resolver
            .resolve_many(&args.groups, UnresolvedPolicy::Echo)
            .await?
    };
    let access = AccessList::new(args.users.clone(), groups);
    debug!(users = access.users.len(), groups = access.groups.len(), "encrypting with access list");

    if args.stdin {
        let out = args
            .out
            .as_deref()
            .map(Output::from_arg)
            .ok_or_else(|| anyhow::anyhow!("--stdin requires --out"))?;
        let to_stdout = out.is_stdout();
        let data = read_stdin().await?;
        let written = encrypt_bytes(service.as_ref(), &data, None, out, &access)
            .await
            .map_err(anyhow::Error::msg)?;
        print_warnings(&ui, &written.warnings);
        if args.delete {
            print_warnings(&ui, &["Unable to delete source as it was a stream.".to_string()]);
        }
        print_written(&ui, "encrypted", &written, to_stdout);
        return Ok(());
    }

    let service = service.as_ref();
    let access = &access;
    let out = args.out.as_deref();
    let delete = args.delete;
    let to_stdout = out.map(Output::from_arg).is_some_and(|o| o.is_stdout());
    let result = run_files(&args.files, |path| async move {
        BatchOutcome::from_result(encrypt_file(service, &path, out, access, delete).await)
    })
    .await?;

    for written in result.iter().filter_map(BatchOutcome::success) {
        print_warnings(&ui, &written.warnings);
    }
    if let [BatchOutcome::Success(written)] = result.outcomes() {
        print_written(&ui, "encrypted", written, to_stdout);
        return Ok(());
    }
    print_batch_summary(
        &ui,
        &BatchReport::from(&result),
        "files",
        "file(s)",
        "encrypted",
        to_stdout,
    )
}

async fn encrypt_file<S: KeyService + ?Sized>(
    service: &S,
    path: &Path,
    out: Option<&Path>,
    access: &AccessList,
    delete: bool,
) -> Result<Written, String> {
    let name = display_name(path);
    let output = match out {
        Some(out) => Output::from_arg(out),
        None => Output::File(encrypted_output_path(path)),
    };
    if let Output::File(target) = &output {
        if target.exists() {
            return Err(format!(
                "{}: Output file '{}' already exists.",
                name,
                target.display()
            ));
        }
    }

    let data = read_input(path).await?;
    let mut written = encrypt_bytes(service, &data, Some(&name), output, access)
        .await
        .map_err(|e| format!("{}: {}", name, e))?;
    if delete {
        written.warnings.extend(remove_source(path));
    }
    Ok(written)
}

async fn encrypt_bytes<S: KeyService + ?Sized>(
    service: &S,
    data: &[u8],
    name: Option<&str>,
    output: Output,
    access: &AccessList,
) -> Result<Written, String> {
    let document = service
        .document_encrypt(data, name, access)
        .await
        .map_err(|e| format!("Failed to encrypt: {}", e))?;
    output.write(&document.data)?;

    let warnings = document
        .grants
        .failed
        .iter()
        .map(|failure| {
            let grantee = match &failure.grantee {
                Grantee::User(user) => format!("user '{}'", user),
                Grantee::Group(group) => format!("group '{}'", group),
            };
            format!("Failed to share document {} with {}: {}", document.id, grantee, failure.error)
        })
        .collect();
    Ok(Written {
        output: output.describe(),
        warnings,
    })
}
