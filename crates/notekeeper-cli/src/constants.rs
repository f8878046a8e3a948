//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const GENERAL: i32 = 1;

    /// Resource not found (account, note).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments (weak password, taken username).
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (unknown user or wrong password).
    pub const AUTH_FAILED: i32 = 5;

    /// The account tier does not include the requested feature.
    pub const PREMIUM_REQUIRED: i32 = 6;
}

/// Password environment variable, read before prompting.
pub const PASSWORD_ENV: &str = "NOTEKEEPER_PASSWORD";

/// Log filter environment variable.
pub const LOG_ENV: &str = "NOTEKEEPER_LOG";

/// Title used for notes created without one.
pub const UNTITLED: &str = "Untitled";
