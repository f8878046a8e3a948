//! Note store trait definition.
//!
//! The `NoteStore` trait defines the credential and note operations the
//! front end relies on. Implementations own their schema and call the key
//! manager before anything reaches persistent storage.

use super::types::{AuthenticatedUser, Note, NoteId, User, UserId};
use crate::error::Result;

/// Credential and encrypted note storage.
///
/// All implementations must ensure:
/// - Note bodies are encrypted before they are written
/// - Passwords are stored only as salted one-way verifiers
/// - Note reads and mutations are scoped to the owning user
pub trait NoteStore {
    // --- Account operations ---

    /// Register a new account.
    ///
    /// # Returns
    ///
    /// Returns the ID of the new user.
    ///
    /// # Errors
    ///
    /// - `NotesError::InvalidInput` if the username is empty
    /// - `NotesError::WeakPassword` if the password fails the strength policy
    /// - `NotesError::DuplicateUsername` if the username is taken
    fn register(&self, username: &str, password: &str) -> Result<UserId>;

    /// Check a username/password pair.
    ///
    /// Returns `Ok(None)` both for an unknown username and for a wrong
    /// password; callers cannot tell the two apart.
    fn authenticate(&self, username: &str, password: &str) -> Result<Option<AuthenticatedUser>>;

    /// Mark an account as premium. Calling it again is a no-op.
    fn upgrade_to_premium(&self, user_id: UserId) -> Result<()>;

    /// Look up an account by ID.
    fn get_user(&self, user_id: UserId) -> Result<Option<User>>;

    // --- Note operations ---

    /// Encrypt and store a new note for `user_id`.
    ///
    /// The note is visible to the next `list_notes` call for the same user.
    fn add_note(&self, user_id: UserId, title: &str, content: &str) -> Result<NoteId>;

    /// List all notes owned by `user_id`, oldest first.
    ///
    /// A note whose body cannot be decrypted is returned with
    /// `NoteContent::Undecryptable` instead of failing the whole listing.
    fn list_notes(&self, user_id: UserId) -> Result<Vec<Note>>;

    /// Get a single note owned by `user_id`.
    fn get_note(&self, user_id: UserId, note_id: NoteId) -> Result<Option<Note>>;

    /// Replace the title and body of a note owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `NotesError::NoteNotFound` if no such note belongs to the user.
    fn update_note(&self, user_id: UserId, note_id: NoteId, title: &str, content: &str)
        -> Result<()>;

    /// Delete a note owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `NotesError::NoteNotFound` if no such note belongs to the user.
    fn delete_note(&self, user_id: UserId, note_id: NoteId) -> Result<()>;

    /// Case-insensitive search over titles and decrypted bodies.
    ///
    /// # Errors
    ///
    /// Returns `NotesError::PremiumRequired` for non-premium accounts.
    fn search_notes(&self, user_id: UserId, query: &str) -> Result<Vec<Note>>;
}
