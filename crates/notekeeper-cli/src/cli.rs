use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use notekeeper_core::storage::NoteId;
use notekeeper_core::VERSION;

/// Notekeeper - per-user encrypted notes backed by SQLite
#[derive(Parser)]
#[command(name = "notekeeper")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = "NOTEKEEPER_CONFIG", value_name = "PATH")]
    pub config: Option<String>,

    /// Path to the notes database
    #[arg(long, global = true, env = "NOTEKEEPER_DB", value_name = "PATH")]
    pub db: Option<String>,

    /// Path to the symmetric key file
    #[arg(long, global = true, env = "NOTEKEEPER_KEY_FILE", value_name = "PATH")]
    pub key_file: Option<String>,

    /// Account to act as
    #[arg(short, long, global = true, env = "NOTEKEEPER_USER", value_name = "NAME")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default config and create the database and key file
    Init(InitArgs),

    /// Create a new account
    Register(RegisterArgs),

    /// Check credentials and show the account tier
    Login(LoginArgs),

    /// Evaluate a password against the strength policy
    PasswordCheck(PasswordCheckArgs),

    /// Upgrade the current account to premium
    Upgrade,

    /// Manage notes for the current account
    #[command(subcommand)]
    Notes(NotesCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `register` command
#[derive(Args)]
pub struct RegisterArgs {
    /// Username for the new account
    #[arg(value_name = "USERNAME")]
    pub username: String,
}

/// Arguments for the `login` command
#[derive(Args)]
pub struct LoginArgs {
    /// Username to check (defaults to --user)
    #[arg(value_name = "USERNAME")]
    pub username: Option<String>,
}

/// Arguments for the `password-check` command
#[derive(Args)]
pub struct PasswordCheckArgs {
    /// Password to evaluate
    #[arg(value_name = "PASSWORD")]
    pub password: String,
}

#[derive(Subcommand)]
pub enum NotesCommand {
    /// Create an empty "Untitled" note
    New,

    /// Add a note
    Add(AddArgs),

    /// List notes
    List(JsonArgs),

    /// Show a note
    Show(ShowArgs),

    /// Edit a note's title or body
    Edit(EditArgs),

    /// Delete a note
    Delete(DeleteArgs),

    /// Search notes by title or body (premium)
    Search(SearchArgs),

    /// Export every note to a directory as text files (premium)
    Export(ExportArgs),
}

/// Arguments for the `notes add` command
#[derive(Args)]
pub struct AddArgs {
    /// Note title
    #[arg(short, long)]
    pub title: String,

    /// Note body (overrides stdin/editor)
    #[arg(long)]
    pub body: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Shared `--json` flag
#[derive(Args)]
pub struct JsonArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `notes show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Note ID
    #[arg(value_name = "ID")]
    pub id: NoteId,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `notes edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Note ID
    #[arg(value_name = "ID")]
    pub id: NoteId,

    /// New title (keeps the current title when omitted)
    #[arg(short, long)]
    pub title: Option<String>,

    /// New body (overrides stdin/editor)
    #[arg(long)]
    pub body: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `notes delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Note ID
    #[arg(value_name = "ID")]
    pub id: NoteId,
}

/// Arguments for the `notes search` command
#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for (case-insensitive)
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `notes export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Directory to write `<title>.txt` files into
    #[arg(value_name = "DIR")]
    pub dir: String,
}
