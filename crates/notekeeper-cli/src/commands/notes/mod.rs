//! Note commands. Every handler authenticates the --user account first.

mod delete;
mod edit;
mod export;
mod list;
mod new;
mod show;

use serde_json::json;

use notekeeper_core::storage::Note;

use crate::app::AppContext;
use crate::cli::NotesCommand;
use crate::ui::format::format_datetime;

pub fn handle_notes(ctx: &AppContext, command: &NotesCommand) -> anyhow::Result<()> {
    match command {
        NotesCommand::New => new::handle_new(ctx),
        NotesCommand::Add(args) => new::handle_add(ctx, args),
        NotesCommand::List(args) => list::handle_list(ctx, args),
        NotesCommand::Show(args) => show::handle_show(ctx, args),
        NotesCommand::Edit(args) => edit::handle_edit(ctx, args),
        NotesCommand::Delete(args) => delete::handle_delete(ctx, args),
        NotesCommand::Search(args) => list::handle_search(ctx, args),
        NotesCommand::Export(args) => export::handle_export(ctx, args),
    }
}

/// JSON shape shared by `list`, `show` and `search`.
fn note_json(note: &Note) -> serde_json::Value {
    json!({
        "id": note.id,
        "title": note.title,
        "body": note.content.to_string(),
        "decrypted": !note.content.is_undecryptable(),
        "created_at": note.created_at.as_ref().map(|dt| format_datetime(Some(dt), false)),
        "updated_at": note.updated_at.as_ref().map(|dt| format_datetime(Some(dt), false)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use notekeeper_core::storage::{NoteContent, NoteId};

    #[test]
    fn test_note_json_marks_undecryptable_body() {
        let note = Note {
            id: NoteId(3),
            title: "Old".to_string(),
            content: NoteContent::Undecryptable,
            created_at: None,
            updated_at: None,
        };

        let value = note_json(&note);
        assert_eq!(value["id"], 3);
        assert_eq!(value["body"], "[Decryption Error]");
        assert_eq!(value["decrypted"], false);
        assert!(value["created_at"].is_null());
    }
}
