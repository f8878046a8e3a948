use notekeeper_core::storage::Note;
use notekeeper_core::NoteStore;

use crate::app::AppContext;
use crate::cli::{JsonArgs, SearchArgs};
use crate::errors::CliError;
use crate::ui::format::{format_datetime, preview, single_line, truncate};
use crate::ui::render::{hint, print, print_json, print_result, table};
use crate::ui::UiContext;

use super::note_json;

pub fn handle_list(ctx: &AppContext, args: &JsonArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(args.json);
    let store = ctx.store()?;
    let user = ctx.session(&store)?;

    let notes = store.list_notes(user.id)?;
    render_notes(&ui, &notes)?;
    if notes.is_empty() {
        print(&ui, &hint(&ui, "Run `notekeeper notes add --title <TITLE>` to write one."));
    }
    Ok(())
}

pub fn handle_search(ctx: &AppContext, args: &SearchArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(args.json);
    let store = ctx.store()?;
    let user = ctx.session(&store)?;
    if !user.is_premium {
        return Err(CliError::premium_required("Search").into());
    }

    let notes = store.search_notes(user.id, &args.query)?;
    render_notes(&ui, &notes)?;
    if notes.is_empty() {
        print(&ui, &format!("No notes match \"{}\"", args.query));
    }
    Ok(())
}

fn render_notes(ui: &UiContext, notes: &[Note]) -> anyhow::Result<()> {
    if ui.mode.is_json() {
        let values: Vec<_> = notes.iter().map(note_json).collect();
        return print_json(&values);
    }
    if notes.is_empty() {
        return Ok(());
    }

    let pretty = ui.mode.is_pretty();
    let rows: Vec<Vec<String>> = notes
        .iter()
        .map(|note| {
            vec![
                note.id.to_string(),
                truncate(&single_line(&note.title), 40),
                preview(&note.content.to_string(), 60),
                format_datetime(note.updated_at.as_ref(), pretty),
            ]
        })
        .collect();
    print_result(ui, &table(ui, &["ID", "TITLE", "PREVIEW", "UPDATED"], &rows));
    Ok(())
}
