//! UI primitives for the Notekeeper CLI.
//!
//! - **Context**: Environment detection (TTY, color)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Render**: Tables, key-value lines, hints, errors
//! - **Format**: String utilities (truncate, previews, timestamps)

mod context;
pub mod format;
mod mode;
pub mod render;

pub use context::UiContext;
