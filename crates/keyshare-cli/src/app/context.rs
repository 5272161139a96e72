//! Application context for the Keyshare CLI.
//!
//! Bundles CLI arguments with lazily loaded configuration and the remote
//! service client, so handlers only pay for what they use.

use std::sync::Arc;
use std::time::Duration;

use once_cell::unsync::OnceCell;

use keyshare_core::{ChoicePrompter, Resolver};

use crate::cli::Cli;
use crate::client::HttpKeyService;
use crate::config::KeyshareConfig;
use crate::helpers::TerminalLines;
use crate::ui::{candidate_table, UiContext};

use super::credentials::{load_credentials, DeviceCredentials};
use super::resolver::{load_config, resolve_service_url};

/// Group resolver used by every command: one directory cache per process,
/// disambiguation prompts on the terminal.
pub type GroupResolver = Resolver<Arc<HttpKeyService>, ChoicePrompter<TerminalLines>>;

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<KeyshareConfig>,
    service: OnceCell<Arc<HttpKeyService>>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
            service: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn config(&self) -> anyhow::Result<&KeyshareConfig> {
        self.config.get_or_try_init(load_config)
    }

    pub fn credentials(&self) -> anyhow::Result<DeviceCredentials> {
        load_credentials(self.cli.keyfile.as_deref(), self.config()?)
    }

    /// The key service client, built on first use from config and credentials.
    pub fn service(&self) -> anyhow::Result<Arc<HttpKeyService>> {
        self.service
            .get_or_try_init(|| {
                let config = self.config()?;
                let credentials = self.credentials()?;
                let url = resolve_service_url(config);
                let timeout = Duration::from_secs(config.service.timeout_seconds);
                HttpKeyService::new(&url, timeout, &credentials).map(Arc::new)
            })
            .cloned()
    }

    /// A resolver backed by the key service's group directory.
    pub fn resolver(&self) -> anyhow::Result<GroupResolver> {
        let prompter = ChoicePrompter::new(TerminalLines::default()).with_renderer(candidate_table);
        Ok(Resolver::new(self.service()?, prompter))
    }

    /// UI context from global output flags.
    pub fn ui_context(&self) -> UiContext {
        UiContext::from_env(
            self.cli.json,
            self.cli.format,
            self.cli.no_color,
            self.cli.ascii,
            self.cli.quiet,
        )
    }
}
