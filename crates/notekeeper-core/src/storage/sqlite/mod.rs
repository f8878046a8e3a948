//! SQLite note store.
//!
//! Users and notes live in a single SQLite database file. Every operation
//! opens its own connection and drops it before returning, so no handle is
//! held between calls. Note bodies are encrypted with the borrowed
//! [`KeyManager`] before they are written.

mod row;
pub mod schema;

use std::fs;
use std::os::raw::c_int;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use rusqlite::{ffi, params, Connection, OptionalExtension};
use tracing::{debug, warn};

use crate::crypto::{
    burn_hash_work, hash_password, validate_password_strength, verify_password, HashCost,
    KeyManager,
};
use crate::error::{NotesError, Result};
use crate::storage::traits::NoteStore;
use crate::storage::types::{AuthenticatedUser, Note, NoteId, User, UserId};

use row::{user_from_row, CredentialRow, NoteRow};

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed credential and note store.
pub struct SqliteStore<'k> {
    path: PathBuf,
    keys: &'k KeyManager,
    hash_cost: HashCost,
}

impl<'k> SqliteStore<'k> {
    /// Open the database at `path`, creating the file and schema if needed.
    ///
    /// Safe to call on every startup: existing data is kept.
    pub fn open(path: &Path, keys: &'k KeyManager, hash_cost: HashCost) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let store = Self {
            path: path.to_path_buf(),
            keys,
            hash_cost,
        };
        store.ensure_schema()?;
        debug!(path = %path.display(), "opened note store");
        Ok(store)
    }

    /// Create any missing tables and columns.
    pub fn ensure_schema(&self) -> Result<()> {
        let mut conn = self.connect()?;
        schema::ensure_schema(&mut conn)
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    /// Verify against a stored verifier; unreadable verifiers never match.
    fn check_verifier(&self, password: &str, verifier: &str) -> bool {
        match verify_password(password, verifier) {
            Ok(matched) => matched,
            Err(err) => {
                warn!(%err, "stored password verifier could not be used");
                false
            }
        }
    }
}

impl NoteStore for SqliteStore<'_> {
    fn register(&self, username: &str, password: &str) -> Result<UserId> {
        if username.trim().is_empty() {
            return Err(NotesError::InvalidInput(
                "Username cannot be empty".to_string(),
            ));
        }
        validate_password_strength(password)?;

        let verifier = hash_password(password, &self.hash_cost)?;
        let conn = self.connect()?;
        let inserted = conn.execute(
            "INSERT INTO users (username, password_hash, is_premium, created_at)
             VALUES (?1, ?2, 0, ?3)",
            params![username, verifier.as_bytes(), Utc::now().to_rfc3339()],
        );

        match inserted {
            Ok(_) => {
                let id = UserId(conn.last_insert_rowid());
                debug!(user_id = %id, "registered user");
                Ok(id)
            }
            Err(err) if is_constraint(&err, ffi::SQLITE_CONSTRAINT_UNIQUE) => {
                Err(NotesError::DuplicateUsername(username.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn authenticate(&self, username: &str, password: &str) -> Result<Option<AuthenticatedUser>> {
        let credentials = {
            let conn = self.connect()?;
            conn.query_row(
                "SELECT id, username, password_hash, is_premium FROM users WHERE username = ?1",
                [username],
                CredentialRow::from_row,
            )
            .optional()?
        };

        let Some(credentials) = credentials else {
            // One Argon2 run, the same work as checking a real verifier.
            burn_hash_work(password, &self.hash_cost)?;
            debug!("login rejected");
            return Ok(None);
        };

        if !self.check_verifier(password, &credentials.verifier) {
            debug!("login rejected");
            return Ok(None);
        }

        debug!(user_id = %credentials.id, "login accepted");
        Ok(Some(AuthenticatedUser {
            id: credentials.id,
            username: credentials.username,
            is_premium: credentials.is_premium,
        }))
    }

    fn upgrade_to_premium(&self, user_id: UserId) -> Result<()> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE users SET is_premium = 1 WHERE id = ?1",
            [user_id],
        )?;
        if changed == 0 {
            return Err(NotesError::UserNotFound(user_id));
        }
        debug!(user_id = %user_id, "upgraded user to premium");
        Ok(())
    }

    fn get_user(&self, user_id: UserId) -> Result<Option<User>> {
        let conn = self.connect()?;
        let user = conn
            .query_row(
                "SELECT id, username, is_premium, created_at FROM users WHERE id = ?1",
                [user_id],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    fn add_note(&self, user_id: UserId, title: &str, content: &str) -> Result<NoteId> {
        let encrypted = self.keys.encrypt(content)?;
        let now = Utc::now().to_rfc3339();

        let conn = self.connect()?;
        let inserted = conn.execute(
            "INSERT INTO notes (user_id, title, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![user_id, title, encrypted, now],
        );

        match inserted {
            Ok(_) => {
                let id = NoteId(conn.last_insert_rowid());
                debug!(user_id = %user_id, note_id = %id, "added note");
                Ok(id)
            }
            Err(err) if is_constraint(&err, ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => {
                Err(NotesError::UserNotFound(user_id))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn list_notes(&self, user_id: UserId) -> Result<Vec<Note>> {
        let rows = {
            let conn = self.connect()?;
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM notes WHERE user_id = ?1 ORDER BY id",
                NoteRow::COLUMNS
            ))?;
            let rows = stmt
                .query_map([user_id], NoteRow::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };

        Ok(rows
            .into_iter()
            .map(|row| row.into_note(self.keys))
            .collect())
    }

    fn get_note(&self, user_id: UserId, note_id: NoteId) -> Result<Option<Note>> {
        let conn = self.connect()?;
        let row = conn
            .query_row(
                &format!(
                    "SELECT {} FROM notes WHERE id = ?1 AND user_id = ?2",
                    NoteRow::COLUMNS
                ),
                params![note_id, user_id],
                NoteRow::from_row,
            )
            .optional()?;
        Ok(row.map(|row| row.into_note(self.keys)))
    }

    fn update_note(
        &self,
        user_id: UserId,
        note_id: NoteId,
        title: &str,
        content: &str,
    ) -> Result<()> {
        let encrypted = self.keys.encrypt(content)?;

        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE notes SET title = ?1, content = ?2, updated_at = ?3
             WHERE id = ?4 AND user_id = ?5",
            params![title, encrypted, Utc::now().to_rfc3339(), note_id, user_id],
        )?;
        if changed == 0 {
            return Err(NotesError::NoteNotFound(note_id));
        }
        debug!(user_id = %user_id, note_id = %note_id, "updated note");
        Ok(())
    }

    fn delete_note(&self, user_id: UserId, note_id: NoteId) -> Result<()> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "DELETE FROM notes WHERE id = ?1 AND user_id = ?2",
            params![note_id, user_id],
        )?;
        if changed == 0 {
            return Err(NotesError::NoteNotFound(note_id));
        }
        debug!(user_id = %user_id, note_id = %note_id, "deleted note");
        Ok(())
    }

    fn search_notes(&self, user_id: UserId, query: &str) -> Result<Vec<Note>> {
        let user = self
            .get_user(user_id)?
            .ok_or(NotesError::UserNotFound(user_id))?;
        if !user.is_premium {
            return Err(NotesError::PremiumRequired);
        }

        // Bodies are encrypted, so matching happens after decryption.
        let query = query.to_lowercase();
        let mut notes = self.list_notes(user_id)?;
        notes.retain(|note| note.matches(&query));
        Ok(notes)
    }
}

fn is_constraint(err: &rusqlite::Error, extended_code: c_int) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _) if failure.extended_code == extended_code
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::PasswordRule;
    use crate::storage::types::NoteContent;
    use tempfile::{tempdir, TempDir};

    const PASSWORD: &str = "Abc123!@";

    fn fast_cost() -> HashCost {
        HashCost {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }

    fn test_keys() -> KeyManager {
        KeyManager::from_bytes([11u8; 32])
    }

    fn open_store<'k>(dir: &TempDir, keys: &'k KeyManager) -> SqliteStore<'k> {
        SqliteStore::open(&dir.path().join("notes.db"), keys, fast_cost()).unwrap()
    }

    #[test]
    fn test_register_and_authenticate() {
        let dir = tempdir().unwrap();
        let keys = test_keys();
        let store = open_store(&dir, &keys);

        let id = store.register("alice", PASSWORD).unwrap();
        let user = store.authenticate("alice", PASSWORD).unwrap().unwrap();

        assert_eq!(user.id, id);
        assert_eq!(user.username, "alice");
        assert!(!user.is_premium);
    }

    #[test]
    fn test_wrong_password_and_unknown_user_look_the_same() {
        let dir = tempdir().unwrap();
        let keys = test_keys();
        let store = open_store(&dir, &keys);
        store.register("alice", PASSWORD).unwrap();

        let wrong = store.authenticate("alice", "Abc123!#").unwrap();
        let unknown = store.authenticate("mallory", PASSWORD).unwrap();

        assert_eq!(wrong, None);
        assert_eq!(unknown, None);
    }

    #[test]
    fn test_usernames_are_case_sensitive() {
        let dir = tempdir().unwrap();
        let keys = test_keys();
        let store = open_store(&dir, &keys);

        store.register("alice", PASSWORD).unwrap();
        store.register("Alice", PASSWORD).unwrap();
        assert!(store.authenticate("ALICE", PASSWORD).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let dir = tempdir().unwrap();
        let keys = test_keys();
        let store = open_store(&dir, &keys);

        store.register("alice", PASSWORD).unwrap();
        let result = store.register("alice", "Xyz789$%");
        assert!(matches!(result, Err(NotesError::DuplicateUsername(name)) if name == "alice"));
    }

    #[test]
    fn test_weak_password_rejected_before_insert() {
        let dir = tempdir().unwrap();
        let keys = test_keys();
        let store = open_store(&dir, &keys);

        let result = store.register("alice", "abc123!@");
        assert!(matches!(
            result,
            Err(NotesError::WeakPassword(PasswordRule::MissingUppercase))
        ));
        // The name is still free.
        store.register("alice", PASSWORD).unwrap();
    }

    #[test]
    fn test_empty_username_rejected() {
        let dir = tempdir().unwrap();
        let keys = test_keys();
        let store = open_store(&dir, &keys);

        assert!(matches!(
            store.register("   ", PASSWORD),
            Err(NotesError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_password_stored_as_verifier() {
        let dir = tempdir().unwrap();
        let keys = test_keys();
        let store = open_store(&dir, &keys);
        store.register("alice", PASSWORD).unwrap();

        let conn = store.connect().unwrap();
        let stored: Vec<u8> = conn
            .query_row(
                "SELECT password_hash FROM users WHERE username = 'alice'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        let stored = String::from_utf8(stored).unwrap();
        assert!(stored.starts_with("$argon2id$"));
        assert!(!stored.contains(PASSWORD));
    }

    #[test]
    fn test_upgrade_is_idempotent() {
        let dir = tempdir().unwrap();
        let keys = test_keys();
        let store = open_store(&dir, &keys);
        let id = store.register("alice", PASSWORD).unwrap();

        store.upgrade_to_premium(id).unwrap();
        store.upgrade_to_premium(id).unwrap();

        let user = store.authenticate("alice", PASSWORD).unwrap().unwrap();
        assert!(user.is_premium);
        assert!(store.get_user(id).unwrap().unwrap().is_premium);
    }

    #[test]
    fn test_upgrade_unknown_user() {
        let dir = tempdir().unwrap();
        let keys = test_keys();
        let store = open_store(&dir, &keys);

        assert!(matches!(
            store.upgrade_to_premium(UserId(99)),
            Err(NotesError::UserNotFound(UserId(99)))
        ));
    }

    #[test]
    fn test_note_lifecycle() {
        let dir = tempdir().unwrap();
        let keys = test_keys();
        let store = open_store(&dir, &keys);
        let user = store.register("alice", PASSWORD).unwrap();

        let id = store.add_note(user, "Groceries", "milk, eggs").unwrap();
        let notes = store.list_notes(user).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, id);
        assert_eq!(notes[0].title, "Groceries");
        assert_eq!(
            notes[0].content,
            NoteContent::Decrypted("milk, eggs".to_string())
        );

        store
            .update_note(user, id, "Groceries", "milk, eggs, bread")
            .unwrap();
        let note = store.get_note(user, id).unwrap().unwrap();
        assert_eq!(note.content.as_text(), Some("milk, eggs, bread"));

        store.delete_note(user, id).unwrap();
        assert!(store.list_notes(user).unwrap().is_empty());
        assert!(store.get_note(user, id).unwrap().is_none());
    }

    #[test]
    fn test_bodies_are_encrypted_at_rest() {
        let dir = tempdir().unwrap();
        let keys = test_keys();
        let store = open_store(&dir, &keys);
        let user = store.register("alice", PASSWORD).unwrap();
        store.add_note(user, "t", "PLAINTEXT_MARKER_123").unwrap();

        let conn = store.connect().unwrap();
        let stored: String = conn
            .query_row("SELECT content FROM notes", [], |row| row.get(0))
            .unwrap();
        assert!(!stored.contains("PLAINTEXT_MARKER_123"));
        assert_eq!(keys.decrypt(&stored).unwrap(), "PLAINTEXT_MARKER_123");
    }

    #[test]
    fn test_add_note_for_unknown_user() {
        let dir = tempdir().unwrap();
        let keys = test_keys();
        let store = open_store(&dir, &keys);

        assert!(matches!(
            store.add_note(UserId(42), "t", "c"),
            Err(NotesError::UserNotFound(UserId(42)))
        ));
    }

    #[test]
    fn test_notes_are_scoped_to_owner() {
        let dir = tempdir().unwrap();
        let keys = test_keys();
        let store = open_store(&dir, &keys);
        let alice = store.register("alice", PASSWORD).unwrap();
        let bob = store.register("bob", PASSWORD).unwrap();

        let note = store.add_note(alice, "private", "alice only").unwrap();

        assert!(store.list_notes(bob).unwrap().is_empty());
        assert!(store.get_note(bob, note).unwrap().is_none());
        assert!(matches!(
            store.update_note(bob, note, "x", "y"),
            Err(NotesError::NoteNotFound(_))
        ));
        assert!(matches!(
            store.delete_note(bob, note),
            Err(NotesError::NoteNotFound(_))
        ));

        let notes = store.list_notes(alice).unwrap();
        assert_eq!(notes[0].content.as_text(), Some("alice only"));
    }

    #[test]
    fn test_bad_note_does_not_hide_others() {
        let dir = tempdir().unwrap();
        let keys = test_keys();
        let store = open_store(&dir, &keys);
        let user = store.register("alice", PASSWORD).unwrap();

        let first = store.add_note(user, "first", "one").unwrap();
        let broken = store.add_note(user, "broken", "two").unwrap();
        let third = store.add_note(user, "third", "three").unwrap();

        let conn = store.connect().unwrap();
        conn.execute(
            "UPDATE notes SET content = 'garbage' WHERE id = ?1",
            [broken],
        )
        .unwrap();

        let notes = store.list_notes(user).unwrap();
        let ids: Vec<NoteId> = notes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![first, broken, third]);
        assert_eq!(notes[0].content.as_text(), Some("one"));
        assert!(notes[1].content.is_undecryptable());
        assert_eq!(notes[1].content.to_string(), "[Decryption Error]");
        assert_eq!(notes[2].content.as_text(), Some("three"));
    }

    #[test]
    fn test_non_text_columns_do_not_hide_others() {
        let dir = tempdir().unwrap();
        let keys = test_keys();
        let store = open_store(&dir, &keys);
        let user = store.register("alice", PASSWORD).unwrap();

        let good = store.add_note(user, "good", "readable").unwrap();
        let blob_body = store.add_note(user, "blob body", "x").unwrap();
        let blob_title = store.add_note(user, "blob title", "kept body").unwrap();

        let conn = store.connect().unwrap();
        conn.execute(
            "UPDATE notes SET content = x'deadbeef' WHERE id = ?1",
            [blob_body],
        )
        .unwrap();
        conn.execute("UPDATE notes SET title = x'ff' WHERE id = ?1", [blob_title])
            .unwrap();

        let notes = store.list_notes(user).unwrap();
        let ids: Vec<NoteId> = notes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![good, blob_body, blob_title]);
        assert_eq!(notes[0].content.as_text(), Some("readable"));
        assert_eq!(notes[1].title, "blob body");
        assert!(notes[1].content.is_undecryptable());
        assert_eq!(notes[2].title, "");
        assert_eq!(notes[2].content.as_text(), Some("kept body"));

        let note = store.get_note(user, blob_body).unwrap().unwrap();
        assert!(note.content.is_undecryptable());

        store.upgrade_to_premium(user).unwrap();
        let found = store.search_notes(user, "blob").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, blob_body);
    }

    #[test]
    fn test_unknown_user_costs_one_hash() {
        let dir = tempdir().unwrap();
        let keys = test_keys();
        let cost = HashCost {
            memory_kib: 4096,
            iterations: 2,
            parallelism: 1,
        };
        let path = dir.path().join("notes.db");
        SqliteStore::open(&path, &keys, cost)
            .unwrap()
            .register("alice", PASSWORD)
            .unwrap();

        // A fresh store per login, as each CLI run opens its own.
        let fastest = |username: &str| {
            (0..5)
                .map(|_| {
                    let store = SqliteStore::open(&path, &keys, cost).unwrap();
                    let started = std::time::Instant::now();
                    assert!(store.authenticate(username, "Wrong123!").unwrap().is_none());
                    started.elapsed()
                })
                .min()
                .unwrap()
        };

        let known = fastest("alice");
        let unknown = fastest("mallory");
        assert!(
            unknown < known * 3 / 2,
            "unknown user took {:?}, known user {:?}",
            unknown,
            known
        );
    }

    #[test]
    fn test_search_requires_premium() {
        let dir = tempdir().unwrap();
        let keys = test_keys();
        let store = open_store(&dir, &keys);
        let user = store.register("alice", PASSWORD).unwrap();
        store.add_note(user, "Recipes", "Pancakes").unwrap();
        store.add_note(user, "Work", "standup notes").unwrap();

        assert!(matches!(
            store.search_notes(user, "pan"),
            Err(NotesError::PremiumRequired)
        ));

        store.upgrade_to_premium(user).unwrap();
        let found = store.search_notes(user, "PAN").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Recipes");
        assert_eq!(store.search_notes(user, "").unwrap().len(), 2);
    }

    #[test]
    fn test_reopen_keeps_data() {
        let dir = tempdir().unwrap();
        let keys = test_keys();
        let user = {
            let store = open_store(&dir, &keys);
            let user = store.register("alice", PASSWORD).unwrap();
            store.add_note(user, "kept", "still here").unwrap();
            user
        };

        let store = open_store(&dir, &keys);
        let notes = store.list_notes(user).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content.as_text(), Some("still here"));
    }
}
