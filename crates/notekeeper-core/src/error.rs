//! Error types for Notekeeper core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.

use thiserror::Error;

use crate::crypto::PasswordRule;
use crate::storage::types::{NoteId, UserId};

/// Result type alias for Notekeeper operations.
pub type Result<T> = std::result::Result<T, NotesError>;

/// Core error type for Notekeeper operations.
#[derive(Debug, Error)]
pub enum NotesError {
    /// Password rejected by the strength policy
    #[error("Weak password: {0}")]
    WeakPassword(PasswordRule),

    /// Username is already registered
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// Unknown user or wrong password; the two are never distinguished
    #[error("Invalid username or password")]
    AuthenticationFailed,

    /// Note body could not be decrypted (wrong key, corruption, bad format)
    #[error("Decryption error: {0}")]
    Decryption(String),

    /// Database could not be opened or a statement failed
    #[error("Storage unavailable: {source}")]
    StorageUnavailable {
        #[from]
        source: rusqlite::Error,
    },

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Key file is unreadable or malformed
    #[error("Key file error: {0}")]
    KeyFile(String),

    /// Hashing or cipher setup failure
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// No user with this ID
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// No note with this ID owned by the caller
    #[error("Note not found: {0}")]
    NoteNotFound(NoteId),

    /// Operation is reserved for premium accounts
    #[error("This feature requires a premium account")]
    PremiumRequired,

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<PasswordRule> for NotesError {
    fn from(rule: PasswordRule) -> Self {
        NotesError::WeakPassword(rule)
    }
}
