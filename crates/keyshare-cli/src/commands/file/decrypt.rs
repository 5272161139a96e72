use std::path::Path;

use keyshare_core::{BatchOutcome, BatchReport, KeyService};

use crate::app::AppContext;
use crate::cli::DecryptArgs;
use crate::helpers::files::{
    decrypted_output_path, display_name, read_input, read_stdin, remove_source, Output,
};
use crate::ui::print_batch_summary;

use super::{check_file_targets, print_warnings, print_written, run_files, Written};

pub async fn handle_decrypt(ctx: &AppContext<'_>, args: &DecryptArgs) -> anyhow::Result<()> {
    if !args.stdin {
        check_file_targets(&args.files, args.out.as_deref())?;
    }
    let ui = ctx.ui_context();
    let service = ctx.service()?;

    if args.stdin {
        let out = args
            .out
            .as_deref()
            .map(Output::from_arg)
            .ok_or_else(|| anyhow::anyhow!("--stdin requires --out"))?;
        let to_stdout = out.is_stdout();
        let data = read_stdin().await?;
        let written = decrypt_bytes(service.as_ref(), &data, out)
            .await
            .map_err(anyhow::Error::msg)?;
        if args.delete {
            print_warnings(&ui, &["Unable to delete source as it was a stream.".to_string()]);
        }
        print_written(&ui, "decrypted", &written, to_stdout);
        return Ok(());
    }

    let service = service.as_ref();
    let out = args.out.as_deref();
    let delete = args.delete;
    let to_stdout = out.map(Output::from_arg).is_some_and(|o| o.is_stdout());
    let result = run_files(&args.files, |path| async move {
        BatchOutcome::from_result(decrypt_file(service, &path, out, delete).await)
    })
    .await?;

    for written in result.iter().filter_map(BatchOutcome::success) {
        print_warnings(&ui, &written.warnings);
    }
    if let [BatchOutcome::Success(written)] = result.outcomes() {
        print_written(&ui, "decrypted", written, to_stdout);
        return Ok(());
    }
    print_batch_summary(
        &ui,
        &BatchReport::from(&result),
        "files",
        "file(s)",
        "decrypted",
        to_stdout,
    )
}

async fn decrypt_file<S: KeyService + ?Sized>(
    service: &S,
    path: &Path,
    out: Option<&Path>,
    delete: bool,
) -> Result<Written, String> {
    let name = display_name(path);
    let output = match out {
        Some(out) => Output::from_arg(out),
        None => Output::File(decrypted_output_path(path)?),
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

    let data = read_input(path)
        .await
        .map_err(|e| format!("Failed to read bytes of '{}': {}", name, e))?;
    let mut written = decrypt_bytes(service, &data, output)
        .await
        .map_err(|e| format!("{}: {}", name, e))?;
    if delete {
        written.warnings.extend(remove_source(path));
    }
    Ok(written)
}

async fn decrypt_bytes<S: KeyService + ?Sized>(
    service: &S,
    data: &[u8],
    output: Output,
) -> Result<Written, String> {
    let document = service
        .document_decrypt(data)
        .await
        .map_err(|e| format!("Failed to decrypt encrypted document: {}", e))?;
    output.write(&document.data)?;
    Ok(Written {
        output: output.describe(),
        warnings: Vec::new(),
    })
}
