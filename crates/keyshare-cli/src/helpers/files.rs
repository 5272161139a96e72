//! Reading inputs and writing outputs for file commands.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tokio::io::AsyncReadExt;

use crate::constants::{ENCRYPTED_EXTENSION, STDOUT_MARKER};

/// Where a command's bytes go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl Output {
    /// `-` means stdout.
    pub fn from_arg(path: &Path) -> Self {
        if path == Path::new(STDOUT_MARKER) {
            Output::Stdout
        } else {
            Output::File(path.to_path_buf())
        }
    }

    pub fn is_stdout(&self) -> bool {
        matches!(self, Output::Stdout)
    }

    /// Write all of `data`. Existing files are never overwritten.
    pub fn write(&self, data: &[u8]) -> Result<(), String> {
        match self {
            Output::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(data)
                    .and_then(|_| stdout.flush())
                    .map_err(|e| format!("Failed to write to stdout: {}", e))
            }
            Output::File(path) => {
                let mut file = OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(path)
                    .map_err(|e| {
                        format!(
                            "Couldn't create a file at the desired output path '{}': {}",
                            path.display(),
                            e
                        )
                    })?;
                file.write_all(data)
                    .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))
            }
        }
    }

    /// How to refer to this output in messages.
    pub fn describe(&self) -> String {
        match self {
            Output::Stdout => "stdout".to_string(),
            Output::File(path) => path.display().to_string(),
        }
    }
}

/// Default encrypted output: the input path with `.iron` appended.
pub fn encrypted_output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".");
    name.push(ENCRYPTED_EXTENSION);
    PathBuf::from(name)
}

/// Default decrypted output: the input path without its last extension.
pub fn decrypted_output_path(input: &Path) -> Result<PathBuf, String> {
    if input.extension().is_none() {
        return Err(format!(
            "Failed to extract default output file name from input path {}.",
            input.display()
        ));
    }
    Ok(input.with_extension(""))
}

/// Read a whole input file.
pub async fn read_input(path: &Path) -> Result<Vec<u8>, String> {
    tokio::fs::read(path).await.map_err(|e| {
        format!(
            "Provided path '{}' doesn't exist or is not readable: {}",
            path.display(),
            e
        )
    })
}

/// Read stdin to the end.
pub async fn read_stdin() -> anyhow::Result<Vec<u8>> {
    let mut data = Vec::new();
    tokio::io::stdin()
        .read_to_end(&mut data)
        .await
        .map_err(|e| anyhow::anyhow!("Error reading stdin: {}", e))?;
    Ok(data)
}

/// Remove a source file after it was processed; failure is only a warning.
pub fn remove_source(path: &Path) -> Option<String> {
    std::fs::remove_file(path).err().map(|_| {
        format!(
            "Unable to delete source file '{}' as it is not writable.",
            path.display()
        )
    })
}

/// File name for display, falling back to the whole path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
