//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI. Core errors are
//! classified here too, so handlers can simply propagate with `?`.

use std::fmt;

use notekeeper_core::NotesError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (account, note)
    NotFound { message: String, hint: String },

    /// Authentication failed (unknown user or wrong password)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// Feature reserved for premium accounts
    PremiumRequired { message: String, hint: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, .. } | CliError::PremiumRequired { message, .. } => {
                write!(f, "{}", message)
            }
            CliError::AuthFailed { message, .. } => write!(f, "{}", message),
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Create a PremiumRequired error pointing at `notekeeper upgrade`.
    pub fn premium_required(feature: &str) -> Self {
        CliError::PremiumRequired {
            message: format!("{} is a premium feature", feature),
            hint: "Run `notekeeper upgrade` to unlock premium features.".to_string(),
        }
    }

    /// Hint line shown under the error, if any.
    pub fn hint(&self) -> Option<&str> {
        match self {
            CliError::NotFound { hint, .. } | CliError::PremiumRequired { hint, .. } => {
                Some(hint)
            }
            CliError::AuthFailed { hint, .. } => hint.as_deref(),
            CliError::InvalidInput(_) => None,
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::PremiumRequired { .. } => exit_codes::PREMIUM_REQUIRED,
        }
    }

    /// Map a core error onto a CLI error, if it has a dedicated exit code.
    pub fn from_core(err: &NotesError) -> Option<Self> {
        let mapped = match err {
            NotesError::WeakPassword(_)
            | NotesError::DuplicateUsername(_)
            | NotesError::InvalidInput(_) => CliError::invalid_input(err.to_string()),
            NotesError::AuthenticationFailed => CliError::auth_failed_with_hint(
                "Invalid username or password",
                "Check --user and NOTEKEEPER_PASSWORD.",
            ),
            NotesError::UserNotFound(id) => CliError::not_found(
                format!("Account {} not found", id),
                "Run `notekeeper register <USERNAME>` to create one.",
            ),
            NotesError::NoteNotFound(id) => CliError::not_found(
                format!("Note {} not found", id),
                "Run `notekeeper notes list` to find note IDs.",
            ),
            NotesError::PremiumRequired => CliError::premium_required("This"),
            _ => return None,
        };
        Some(mapped)
    }
}

/// Classify an error chain into an exit code and an optional hint.
pub fn classify(err: &anyhow::Error) -> (i32, Option<String>) {
    for cause in err.chain() {
        if let Some(cli) = cause.downcast_ref::<CliError>() {
            return (cli.exit_code(), cli.hint().map(str::to_string));
        }
        if let Some(core) = cause.downcast_ref::<NotesError>() {
            if let Some(cli) = CliError::from_core(core) {
                return (cli.exit_code(), cli.hint().map(str::to_string));
            }
        }
    }
    (exit_codes::GENERAL, None)
}
