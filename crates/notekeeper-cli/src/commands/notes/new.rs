use notekeeper_core::NoteStore;

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::constants::UNTITLED;
use crate::helpers::read_note_body;
use crate::ui::render::print_result;

/// Create an "Untitled" note with an empty body.
pub fn handle_new(ctx: &AppContext) -> anyhow::Result<()> {
    let ui = ctx.ui(false);
    let store = ctx.store()?;
    let user = ctx.session(&store)?;

    let note_id = store.add_note(user.id, UNTITLED, "")?;
    print_result(&ui, &note_id.to_string());
    Ok(())
}

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(false);
    let store = ctx.store()?;
    let user = ctx.session(&store)?;
    let body = read_note_body(args.no_input, args.body.clone(), None)?;

    let note_id = store.add_note(user.id, &args.title, &body)?;
    print_result(&ui, &note_id.to_string());
    Ok(())
}
