//! Core data types for the storage layer.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// Placeholder shown in place of a note body that could not be decrypted.
pub const UNDECRYPTABLE_PLACEHOLDER: &str = "[Decryption Error]";

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map($name)
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.0))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map($name)
            }
        }
    };
}

row_id!(
    /// Row ID of a user account.
    UserId
);

row_id!(
    /// Row ID of a note.
    NoteId
);

/// Public view of a user account (never includes the password verifier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    /// Unique, case-sensitive login name
    pub username: String,

    pub is_premium: bool,

    /// Registration time (absent for accounts created by older versions)
    pub created_at: Option<DateTime<Utc>>,
}

/// Identity returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: String,
    pub is_premium: bool,
}

/// Decrypted body of a note, or a marker that decryption failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum NoteContent {
    Decrypted(String),
    Undecryptable,
}

impl NoteContent {
    /// The decrypted text, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            NoteContent::Decrypted(text) => Some(text),
            NoteContent::Undecryptable => None,
        }
    }

    pub fn is_undecryptable(&self) -> bool {
        matches!(self, NoteContent::Undecryptable)
    }
}

impl fmt::Display for NoteContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteContent::Decrypted(text) => f.write_str(text),
            NoteContent::Undecryptable => f.write_str(UNDECRYPTABLE_PLACEHOLDER),
        }
    }
}

/// A note as returned to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,

    /// Title (may be empty)
    pub title: String,

    pub content: NoteContent,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Whether `query` (already lowercased) occurs in the title or body.
    pub(crate) fn matches(&self, query: &str) -> bool {
        if self.title.to_lowercase().contains(query) {
            return true;
        }
        self.content
            .as_text()
            .map(|text| text.to_lowercase().contains(query))
            .unwrap_or(false)
    }
}
