use notekeeper_core::NoteStore;

use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::ui::render::print;

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(false);
    let store = ctx.store()?;
    let user = ctx.session(&store)?;

    store.delete_note(user.id, args.id)?;
    print(&ui, &format!("Deleted note {}", args.id));
    Ok(())
}
