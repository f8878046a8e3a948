//! Rendering primitives for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table as ComfyTable};
use serde::Serialize;

use super::context::UiContext;

/// Render a table.
///
/// Pretty mode: rounded comfy-table with a dim header row
/// Plain mode: tab-separated values (no header)
pub fn table(ctx: &UiContext, headers: &[&str], rows: &[Vec<String>]) -> String {
    if ctx.mode.is_pretty() {
        let mut table = ComfyTable::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);

        let header_cells: Vec<Cell> = headers
            .iter()
            .map(|h| {
                let mut cell = Cell::new(h);
                if ctx.color {
                    cell = cell.add_attribute(Attribute::Dim);
                }
                cell
            })
            .collect();
        table.set_header(header_cells);

        for row in rows {
            table.add_row(row);
        }

        table.to_string()
    } else {
        rows.iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value"
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{}: {}", key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line.
pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("Hint: {}", text)
    } else {
        format!("hint={}", text)
    }
}

/// Print an informational message to stdout.
///
/// Suppressed in JSON and quiet modes.
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() && !ctx.quiet {
        println!("{}", message);
    }
}

/// Print command output to stdout. Only JSON mode suppresses it.
pub fn print_result(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() && !message.is_empty() {
        println!("{}", message);
    }
}

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format an error message with optional hint.
///
/// Pretty mode: "Error: message" with optional "Hint: ..." on next line
/// Plain mode: "error=message" with optional "hint=suggestion"
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(format!("Error: {}", message));
    } else {
        lines.push(format!("error={}", message));
    }
    if let Some(h) = error_hint {
        lines.push(hint(ctx, h));
    }

    lines.join("\n")
}

/// Print an error message to stderr with optional hint.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::mode::OutputMode;

    fn plain_ctx() -> UiContext {
        UiContext {
            color: false,
            mode: OutputMode::Plain,
            quiet: false,
        }
    }

    fn pretty_ctx() -> UiContext {
        UiContext {
            color: false,
            mode: OutputMode::Pretty,
            quiet: false,
        }
    }

    #[test]
    fn test_plain_table_has_no_header() {
        let rows = vec![
            vec!["1".to_string(), "Groceries".to_string()],
            vec!["2".to_string(), "Ideas".to_string()],
        ];
        let out = table(&plain_ctx(), &["ID", "TITLE"], &rows);
        assert_eq!(out, "1\tGroceries\n2\tIdeas");
    }

    #[test]
    fn test_pretty_table_includes_header() {
        let rows = vec![vec!["1".to_string(), "Groceries".to_string()]];
        let out = table(&pretty_ctx(), &["ID", "TITLE"], &rows);
        assert!(out.contains("TITLE"));
        assert!(out.contains("Groceries"));
    }

    #[test]
    fn test_kv_modes() {
        assert_eq!(kv(&plain_ctx(), "Account Tier", "premium"), "account_tier=premium");
        assert_eq!(kv(&pretty_ctx(), "Account Tier", "premium"), "Account Tier: premium");
    }

    #[test]
    fn test_error_message_with_hint() {
        let out = error_message(&plain_ctx(), "Note 4 not found", Some("List notes"));
        assert_eq!(out, "error=Note 4 not found\nhint=List notes");

        let out = error_message(&pretty_ctx(), "Note 4 not found", None);
        assert_eq!(out, "Error: Note 4 not found");
    }
}
