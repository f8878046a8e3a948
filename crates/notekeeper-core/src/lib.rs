//! # Notekeeper Core
//!
//! Core library for Notekeeper - a personal note keeper that stores note
//! bodies encrypted at rest under per-user accounts.
//!
//! This crate provides the credential and encrypted-storage logic
//! independent of any front end.
//!
//! ## Architecture
//!
//! - **crypto**: Key manager (note body encryption) and password policy/hashing
//! - **storage**: Note store trait and the SQLite implementation
//! - **fs**: Filesystem helpers for publishing secret files
//!
//! The key manager is a leaf: the store borrows it to encrypt on write and
//! decrypt on read, and it never depends on the store.

pub mod crypto;
pub mod error;
pub mod fs;
pub mod storage;

pub use crypto::{validate_password_strength, HashCost, KeyManager, PasswordRule};
pub use error::{NotesError, Result};
pub use storage::{NoteStore, SqliteStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
