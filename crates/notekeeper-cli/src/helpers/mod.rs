//! Helper functions for the CLI.
//!
//! This module provides input helpers for reading passwords and note bodies.

mod input;

pub use input::{prompt_new_password, prompt_password, read_note_body};
