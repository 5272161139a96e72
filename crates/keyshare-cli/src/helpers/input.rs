//! Interactive input: line prompts on stdin, hidden passphrases, confirmations.

use std::io::Write;

use async_trait::async_trait;
use dialoguer::{Confirm, Password};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use keyshare_core::{KeyshareError, LineSource};

/// Line prompts on stderr, answers from stdin.
pub struct TerminalLines {
    lines: Lines<BufReader<Stdin>>,
}

impl Default for TerminalLines {
    fn default() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

#[async_trait]
impl LineSource for TerminalLines {
    fn show(&mut self, text: &str) {
        eprintln!("{}", text);
    }

    async fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        eprint!("{}: ", prompt);
        std::io::stderr().flush()?;
        self.lines.next_line().await
    }
}

/// Ask the user to retype `expected`. `Ok(false)` on mismatch; closed input cancels.
pub async fn confirm_by_retyping<S: LineSource + ?Sized>(
    source: &mut S,
    prompt: &str,
    expected: &str,
) -> keyshare_core::Result<bool> {
    match source.read_line(prompt).await {
        Ok(Some(answer)) => Ok(answer.trim() == expected),
        Ok(None) | Err(_) => Err(KeyshareError::UserCancelled),
    }
}

/// Yes/no confirmation; an interrupted prompt counts as cancellation.
pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact_opt()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))?
        .ok_or_else(|| anyhow::Error::from(KeyshareError::UserCancelled))
}

pub fn prompt_passphrase(prompt: &str) -> anyhow::Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))
}

pub fn prompt_new_passphrase() -> anyhow::Result<String> {
    Password::new()
        .with_prompt("New passphrase")
        .with_confirmation("Confirm new passphrase", "Passphrases do not match")
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Canned(VecDeque<String>);

    #[async_trait]
    impl LineSource for Canned {
        fn show(&mut self, _text: &str) {}

        async fn read_line(&mut self, _prompt: &str) -> std::io::Result<Option<String>> {
            Ok(self.0.pop_front())
        }
    }

    #[tokio::test]
    async fn test_retype_confirmation() {
        let mut source = Canned(VecDeque::from(vec!["ops ".to_string(), "nope".to_string()]));
        assert!(confirm_by_retyping(&mut source, "Type", "ops").await.unwrap());
        assert!(!confirm_by_retyping(&mut source, "Type", "ops").await.unwrap());
        let err = confirm_by_retyping(&mut source, "Type", "ops").await.unwrap_err();
        assert!(err.is_cancelled());
    }
}
