//! Application-level utilities for the Notekeeper CLI.
//!
//! This module provides:
//! - Path and cost resolution from flags, env vars and the config file
//! - The per-invocation context (lazy key loading, store access, sessions)

mod context;
mod settings;

pub use context::AppContext;
