use notekeeper_core::{NoteStore, NotesError};

use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::ui::format::format_datetime;
use crate::ui::render::{kv, print_json, print_result};

use super::note_json;

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(args.json);
    let store = ctx.store()?;
    let user = ctx.session(&store)?;

    let note = store
        .get_note(user.id, args.id)?
        .ok_or(NotesError::NoteNotFound(args.id))?;

    if ui.mode.is_json() {
        return print_json(&note_json(&note));
    }

    let pretty = ui.mode.is_pretty();
    let lines = [
        kv(&ui, "ID", &note.id.to_string()),
        kv(&ui, "Title", &note.title),
        kv(&ui, "Created", &format_datetime(note.created_at.as_ref(), pretty)),
        kv(&ui, "Updated", &format_datetime(note.updated_at.as_ref(), pretty)),
        String::new(),
        note.content.to_string(),
    ];
    print_result(&ui, &lines.join("\n"));
    Ok(())
}
