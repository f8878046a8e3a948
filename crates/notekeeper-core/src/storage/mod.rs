//! Storage abstraction for Notekeeper.
//!
//! This module defines the `NoteStore` trait and core types for
//! interacting with credential and encrypted note storage.
//!
//! ## Architecture
//!
//! - `SqliteStore`: one SQLite database file holding `users` and `notes`
//! - Note bodies are encrypted by the `KeyManager` before they are written
//!
//! ## Security
//!
//! Stores are responsible for:
//! - Encrypting note bodies on write and decrypting them on read
//! - Keeping password verifiers out of every value they return
//! - Scoping note access to the owning user

pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export public types
pub use sqlite::SqliteStore;
pub use traits::NoteStore;
pub use types::{
    AuthenticatedUser, Note, NoteContent, NoteId, User, UserId, UNDECRYPTABLE_PLACEHOLDER,
};
