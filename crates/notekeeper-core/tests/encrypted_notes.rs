use std::fs;

use notekeeper_core::storage::{NoteContent, NoteStore, SqliteStore, UserId};
use notekeeper_core::{HashCost, KeyManager, NotesError};
use tempfile::tempdir;

const PASSWORD: &str = "Abc123!@";

fn fast_cost() -> HashCost {
    HashCost {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    }
}

#[test]
fn test_notes_survive_restart_with_same_key_file() {
    let dir = tempdir().expect("tempdir should be available");
    let db_path = dir.path().join("data").join("notes.db");
    let key_path = dir.path().join("data").join("notes.key");

    let user = {
        let keys = KeyManager::obtain(&key_path).expect("key should be generated");
        let store = SqliteStore::open(&db_path, &keys, fast_cost()).expect("open should succeed");
        let user = store.register("alice", PASSWORD).expect("register should succeed");
        store
            .add_note(user, "Diary", "Dear diary, héllo wörld ✨")
            .expect("add should succeed");
        user
    };

    let keys = KeyManager::obtain(&key_path).expect("key should be loaded");
    let store = SqliteStore::open(&db_path, &keys, fast_cost()).expect("reopen should succeed");
    let login = store
        .authenticate("alice", PASSWORD)
        .expect("authenticate should succeed")
        .expect("credentials should match");
    assert_eq!(login.id, user);

    let notes = store.list_notes(user).expect("list should succeed");
    assert_eq!(notes.len(), 1);
    assert_eq!(
        notes[0].content,
        NoteContent::Decrypted("Dear diary, héllo wörld ✨".to_string())
    );
}

#[test]
fn test_lost_key_file_leaves_notes_undecryptable() {
    let dir = tempdir().expect("tempdir should be available");
    let db_path = dir.path().join("notes.db");
    let key_path = dir.path().join("notes.key");

    let user = {
        let keys = KeyManager::obtain(&key_path).expect("key should be generated");
        let store = SqliteStore::open(&db_path, &keys, fast_cost()).expect("open should succeed");
        let user = store.register("alice", PASSWORD).expect("register should succeed");
        store.add_note(user, "Secret", "gone").expect("add should succeed");
        user
    };

    fs::remove_file(&key_path).expect("key file should be removable");

    let keys = KeyManager::obtain(&key_path).expect("a new key should be generated");
    let store = SqliteStore::open(&db_path, &keys, fast_cost()).expect("reopen should succeed");

    // Titles stay readable and the listing itself still succeeds.
    let notes = store.list_notes(user).expect("list should succeed");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Secret");
    assert!(notes[0].content.is_undecryptable());

    // New notes written under the new key are fine.
    store.add_note(user, "Fresh", "new key").expect("add should succeed");
    let notes = store.list_notes(user).expect("list should succeed");
    assert_eq!(notes[1].content.as_text(), Some("new key"));
}

#[test]
fn test_store_usable_through_trait_object() {
    let dir = tempdir().expect("tempdir should be available");
    let keys = KeyManager::generate().expect("key should be generated");
    let sqlite = SqliteStore::open(&dir.path().join("notes.db"), &keys, fast_cost())
        .expect("open should succeed");
    let store: &dyn NoteStore = &sqlite;

    let first = store.register("alice", PASSWORD).expect("register should succeed");
    assert!(matches!(
        store.register("alice", PASSWORD),
        Err(NotesError::DuplicateUsername(_))
    ));

    let note = store.add_note(first, "", "").expect("placeholder note");
    let listed = store.list_notes(first).expect("list should succeed");
    assert_eq!(listed[0].id, note);
    assert_eq!(listed[0].title, "");
    assert_eq!(listed[0].content.as_text(), Some(""));

    assert!(store.get_user(UserId(first.0 + 100)).expect("lookup").is_none());
}

#[test]
fn test_legacy_database_is_upgraded_in_place() {
    let dir = tempdir().expect("tempdir should be available");
    let db_path = dir.path().join("notes.db");
    {
        let conn = rusqlite::Connection::open(&db_path).expect("open legacy db");
        conn.execute_batch(
            r#"
            CREATE TABLE users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                password_hash BLOB NOT NULL,
                is_premium INTEGER DEFAULT 0
            );
            CREATE TABLE notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                title TEXT,
                content TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id)
            );
            INSERT INTO users (username, password_hash, is_premium)
                VALUES ('legacy', x'2432622431322461626364', 1);
            INSERT INTO notes (user_id, title, content)
                VALUES (1, 'old note', 'gAAAAABfernet-token');
            "#,
        )
        .expect("seed legacy schema");
    }

    let keys = KeyManager::generate().expect("key should be generated");
    let store = SqliteStore::open(&db_path, &keys, fast_cost()).expect("open should upgrade");

    // Old verifiers never match, and say nothing about why.
    assert!(store
        .authenticate("legacy", PASSWORD)
        .expect("authenticate should not error")
        .is_none());

    let user = store.get_user(UserId(1)).expect("lookup").expect("user kept");
    assert!(user.is_premium);
    assert!(user.created_at.is_none());

    let notes = store.list_notes(UserId(1)).expect("list should succeed");
    assert_eq!(notes[0].title, "old note");
    assert!(notes[0].content.is_undecryptable());

    // Registration keeps working on the upgraded schema.
    store.register("newcomer", PASSWORD).expect("register should succeed");
}
