//! Row types for database queries.

use chrono::{DateTime, Utc};
use rusqlite::types::ValueRef;
use rusqlite::Row;
use tracing::warn;

use crate::crypto::KeyManager;
use crate::storage::types::{Note, NoteContent, NoteId, User, UserId};

/// Raw row data from the notes table, before decryption.
#[derive(Debug)]
pub struct NoteRow {
    pub id: NoteId,
    pub title: Option<String>,
    /// `None` when the stored value is not UTF-8 text.
    pub content: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl NoteRow {
    /// Columns: `id, title, content, created_at, updated_at`.
    pub const COLUMNS: &'static str = "id, title, content, created_at, updated_at";

    ///
    /// A wrong-typed title or body only affects this row, never the query.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let id: NoteId = row.get(0)?;
        let title = text_column(row, 1)?;
        if title.is_none() && !matches!(row.get_ref(1)?, ValueRef::Null) {
            warn!(note_id = %id, "note title is not stored as text");
        }
        Ok(Self {
            id,
            title,
            content: text_column(row, 2)?,
            created_at: text_column(row, 3)?,
            updated_at: text_column(row, 4)?,
        })
    }

    /// Decrypt the body, substituting `NoteContent::Undecryptable` on failure.
    pub fn into_note(self, keys: &KeyManager) -> Note {
        let content = match self.content.as_deref().map(|token| keys.decrypt(token)) {
            Some(Ok(text)) => NoteContent::Decrypted(text),
            Some(Err(err)) => {
                warn!(note_id = %self.id, %err, "note body could not be decrypted");
                NoteContent::Undecryptable
            }
            None => {
                warn!(note_id = %self.id, "note body is not stored as text");
                NoteContent::Undecryptable
            }
        };

        Note {
            id: self.id,
            title: self.title.unwrap_or_default(),
            content,
            created_at: parse_timestamp(self.created_at.as_deref()),
            updated_at: parse_timestamp(self.updated_at.as_deref()),
        }
    }
}

/// Account row including the password verifier.
#[derive(Debug)]
pub struct CredentialRow {
    pub id: UserId,
    pub username: String,
    pub verifier: String,
    pub is_premium: bool,
}

impl CredentialRow {
    /// Columns: `id, username, password_hash, is_premium`.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        // Verifiers are written as BLOBs but older rows may hold TEXT.
        let verifier = match row.get_ref(2)? {
            ValueRef::Blob(bytes) | ValueRef::Text(bytes) => {
                String::from_utf8_lossy(bytes).into_owned()
            }
            _ => String::new(),
        };
        Ok(Self {
            id: row.get(0)?,
            username: row.get(1)?,
            verifier,
            is_premium: row.get::<_, Option<bool>>(3)?.unwrap_or(false),
        })
    }
}

/// Columns: `id, username, is_premium, created_at`.
pub fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let created_at: Option<String> = row.get(3)?;
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        is_premium: row.get::<_, Option<bool>>(2)?.unwrap_or(false),
        created_at: parse_timestamp(created_at.as_deref()),
    })
}

/// UTF-8 text, or `None` for NULL and every other storage class.
fn text_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().map(str::to_string),
        _ => None,
    })
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
