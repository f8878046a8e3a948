//! Command handlers.

mod account;
mod init;
mod misc;
mod notes;

pub use account::{handle_login, handle_password_check, handle_register, handle_upgrade};
pub use init::handle_init;
pub use misc::handle_completions;
pub use notes::handle_notes;
