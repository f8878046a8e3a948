//! Application context for the Notekeeper CLI.
//!
//! Bundles CLI arguments with lazily-loaded settings and key material, and
//! hands out stores that borrow the key.

use anyhow::Context;
use once_cell::unsync::OnceCell;
use tracing::debug;

use notekeeper_core::storage::AuthenticatedUser;
use notekeeper_core::{KeyManager, NoteStore, NotesError, SqliteStore};

use crate::cli::Cli;
use crate::errors::CliError;
use crate::helpers::prompt_password;
use crate::ui::UiContext;

use super::settings::Settings;

/// Application context shared by every command handler.
pub struct AppContext<'a> {
    cli: &'a Cli,
    settings: OnceCell<Settings>,
    keys: OnceCell<KeyManager>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            settings: OnceCell::new(),
            keys: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Build the UI context for a command.
    pub fn ui(&self, json: bool) -> UiContext {
        UiContext::from_env(json, self.cli.quiet)
    }

    /// Get the resolved settings, loading the config file lazily.
    pub fn settings(&self) -> anyhow::Result<&Settings> {
        self.settings.get_or_try_init(|| Settings::load(self.cli))
    }

    /// Get the encryption key, creating the key file on first use.
    pub fn keys(&self) -> anyhow::Result<&KeyManager> {
        self.keys.get_or_try_init(|| {
            let path = self.settings()?.key_file();
            KeyManager::obtain(path)
                .with_context(|| format!("Failed to load key file {}", path.display()))
        })
    }

    /// Open the store, creating the schema if needed.
    pub fn store(&self) -> anyhow::Result<SqliteStore<'_>> {
        let settings = self.settings()?;
        let keys = self.keys()?;
        debug!(database = %settings.database().display(), "opening store");
        SqliteStore::open(settings.database(), keys, settings.hash_cost).with_context(|| {
            format!(
                "Failed to open database {}",
                settings.database().display()
            )
        })
    }

    /// The account selected with --user / NOTEKEEPER_USER.
    pub fn username(&self) -> anyhow::Result<&str> {
        self.cli
            .user
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                CliError::invalid_input(
                    "No account selected; pass --user <NAME> or set NOTEKEEPER_USER",
                )
                .into()
            })
    }

    /// Authenticate `username` against `store` with a prompted password.
    pub fn login(
        &self,
        store: &dyn NoteStore,
        username: &str,
    ) -> anyhow::Result<AuthenticatedUser> {
        let password = prompt_password()?;
        match store.authenticate(username, &password)? {
            Some(user) => Ok(user),
            None => Err(NotesError::AuthenticationFailed.into()),
        }
    }

    /// Authenticate the --user account.
    pub fn session(&self, store: &dyn NoteStore) -> anyhow::Result<AuthenticatedUser> {
        self.login(store, self.username()?)
    }
}
