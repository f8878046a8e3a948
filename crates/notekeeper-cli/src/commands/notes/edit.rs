use notekeeper_core::storage::NoteContent;
use notekeeper_core::{NoteStore, NotesError};

use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::errors::CliError;
use crate::helpers::read_note_body;
use crate::ui::render::print;

/// Replace a note's title and/or body.
///
/// With only `--title`, the existing body is kept. Otherwise the body comes
/// from `--body`, stdin, or the editor seeded with the current text.
pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(false);
    let store = ctx.store()?;
    let user = ctx.session(&store)?;

    let note = store
        .get_note(user.id, args.id)?
        .ok_or(NotesError::NoteNotFound(args.id))?;

    let body = match (&args.body, &args.title, &note.content) {
        (Some(body), _, _) => body.clone(),
        (None, Some(_), NoteContent::Decrypted(text)) => text.clone(),
        (None, _, NoteContent::Undecryptable) => {
            return Err(CliError::invalid_input(format!(
                "Note {} cannot be decrypted; pass --body to replace its contents",
                note.id
            ))
            .into());
        }
        (None, None, NoteContent::Decrypted(text)) => {
            read_note_body(args.no_input, None, Some(text))?
        }
    };
    let title = args.title.as_deref().unwrap_or(&note.title);

    store.update_note(user.id, note.id, title, &body)?;
    print(&ui, &format!("Updated note {}", note.id));
    Ok(())
}
