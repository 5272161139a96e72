//! File commands: each input file is one target of a concurrent batch.

mod access;
mod decrypt;
mod encrypt;
mod info;

use std::future::Future;
use std::path::{Path, PathBuf};

use keyshare_core::{check_batch_size, run_batch, BatchOutcome, BatchResult};

use crate::errors::CliError;
use crate::ui::{info, Badge, UiContext};

pub use access::{handle_grant, handle_revoke};
pub use decrypt::handle_decrypt;
pub use encrypt::handle_encrypt;
pub use info::handle_info;

/// Batch-wide argument checks, run before any remote call.
fn check_file_targets(files: &[PathBuf], out: Option<&Path>) -> anyhow::Result<()> {
    check_batch_size(files.len())?;
    if out.is_some() && files.len() > 1 {
        return Err(CliError::invalid_input("Cannot use '-o' flag with multiple files.").into());
    }
    Ok(())
}

/// Run `operation` over the files. A lone file is a single-target command:
/// its failure becomes the command's error instead of a summary line.
async fn run_files<R, F, Fut>(
    files: &[PathBuf],
    mut operation: F,
) -> anyhow::Result<BatchResult<R>>
where
    F: FnMut(PathBuf) -> Fut,
    Fut: Future<Output = BatchOutcome<R>>,
{
    match files {
        [path] => {
            let value = operation(path.clone()).await.into_result()?;
            Ok(BatchResult::new(vec![BatchOutcome::Success(value)]))
        }
        _ => Ok(run_batch(files.to_vec(), operation).await),
    }
}

/// A file that was processed, with any non-fatal problems along the way.
struct Written {
    output: String,
    warnings: Vec<String>,
}

/// Single-file confirmation; goes to stderr when stdout carries the document.
fn print_written(ui: &UiContext, verb: &str, written: &Written, to_stderr: bool) {
    let message = format!("File successfully {} and written to {}", verb, written.output);
    if !to_stderr {
        info(ui, &message);
    } else if !ui.quiet && !ui.mode.is_json() {
        eprintln!("{}", message);
    }
}

fn print_warnings<'a>(ui: &UiContext, warnings: impl IntoIterator<Item = &'a String>) {
    for warning in warnings {
        if ui.mode.is_json() {
            eprintln!("warning={}", warning);
        } else {
            eprintln!("{} {}", Badge::Warn.paint(Badge::Warn.label(ui.unicode), ui.color), warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_flag_needs_single_file() {
        let files = vec![PathBuf::from("a"), PathBuf::from("b")];
        let err = check_file_targets(&files, Some(Path::new("out"))).unwrap_err();
        assert!(err.to_string().contains("multiple files"));
        assert!(check_file_targets(&files, None).is_ok());
    }

    #[tokio::test]
    async fn test_single_file_failure_is_command_error() {
        let files = vec![PathBuf::from("missing.iron")];
        let err = run_files(&files, |path| async move {
            BatchOutcome::<()>::Failure(format!("{}: not found", path.display()))
        })
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "missing.iron: not found");
        assert!(matches!(
            err.downcast_ref::<keyshare_core::KeyshareError>(),
            Some(keyshare_core::KeyshareError::ItemOperationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_several_files_isolate_failures() {
        let files = vec![PathBuf::from("a"), PathBuf::from("b")];
        let result = run_files(&files, |path| async move {
            if path == Path::new("a") {
                BatchOutcome::Failure("a failed".to_string())
            } else {
                BatchOutcome::Success(path)
            }
        })
        .await
        .unwrap();
        assert_eq!(result.failure_count(), 1);
        assert_eq!(result.success_count(), 1);
    }

    #[test]
    fn test_batch_limit_applies() {
        let files: Vec<PathBuf> = (0..76).map(|i| PathBuf::from(format!("f{}", i))).collect();
        assert!(check_file_targets(&files, None).is_err());
    }
}
