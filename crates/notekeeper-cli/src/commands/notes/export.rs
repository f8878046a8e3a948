use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::warn;

use notekeeper_core::storage::{Note, NoteContent};
use notekeeper_core::NoteStore;

use crate::app::AppContext;
use crate::cli::ExportArgs;
use crate::constants::UNTITLED;
use crate::errors::CliError;
use crate::ui::render::{kv, print};

const MAX_STEM_CHARS: usize = 100;

/// Write each decryptable note to `<dir>/<title>.txt`.
pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(false);
    let store = ctx.store()?;
    let user = ctx.session(&store)?;
    if !user.is_premium {
        return Err(CliError::premium_required("Export").into());
    }

    let dir = PathBuf::from(&args.dir);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let notes = store.list_notes(user.id)?;
    let report = export_notes(&dir, &notes)?;

    print(
        &ui,
        &format!(
            "Exported {} note(s) to {}",
            report.written.len(),
            dir.display()
        ),
    );
    if !report.skipped.is_empty() {
        let ids: Vec<String> = report.skipped.iter().map(|n| n.to_string()).collect();
        print(&ui, &kv(&ui, "Skipped (undecryptable)", &ids.join(", ")));
    }
    Ok(())
}

#[derive(Debug, Default)]
struct ExportReport {
    written: Vec<PathBuf>,
    skipped: Vec<i64>,
}

fn export_notes(dir: &Path, notes: &[Note]) -> anyhow::Result<ExportReport> {
    let mut report = ExportReport::default();
    let mut used = HashSet::new();

    for note in notes {
        let body = match &note.content {
            NoteContent::Decrypted(text) => text,
            NoteContent::Undecryptable => {
                warn!(note_id = %note.id, "skipping undecryptable note during export");
                report.skipped.push(note.id.0);
                continue;
            }
        };

        let name = unique_name(&mut used, &file_stem(&note.title), note.id.0);
        let path = dir.join(format!("{}.txt", name));
        notekeeper_core::fs::write_atomic(&path, body.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        report.written.push(path);
    }

    Ok(report)
}

/// Claim the first free name among `stem`, `stem-<id>`, `stem-<id>-2`, ...
///
/// Names are compared case-insensitively.
fn unique_name(used: &mut HashSet<String>, stem: &str, id: i64) -> String {
    let mut candidate = stem.to_string();
    let mut attempt = 1;
    while !used.insert(candidate.to_lowercase()) {
        candidate = if attempt == 1 {
            format!("{}-{}", stem, id)
        } else {
            format!("{}-{}-{}", stem, id, attempt)
        };
        attempt += 1;
    }
    candidate
}

/// Turn a note title into a safe file name stem.
fn file_stem(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_STEM_CHARS)
        .collect();
    let trimmed = cleaned.trim().trim_start_matches('.').trim();

    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}
