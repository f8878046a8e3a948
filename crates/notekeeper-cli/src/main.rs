//! Notekeeper CLI - per-user encrypted notes
//!
//! This is the command-line interface for Notekeeper. It provides a
//! user-friendly interface to the core library functionality.

use clap::Parser;

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod ui;

use app::AppContext;
use cli::{Cli, Commands};
use commands::{
    handle_completions, handle_init, handle_login, handle_notes, handle_password_check,
    handle_register, handle_upgrade,
};
use errors::classify;
use ui::render::print_error;

fn main() {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    let config_level = ctx
        .settings()
        .ok()
        .and_then(|settings| settings.log_level.clone());
    logging::init(config_level.as_deref(), ctx.quiet());

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui(false);
        let (code, hint) = classify(&e);
        print_error(&ui_ctx, &format!("{:#}", e), hint.as_deref());
        std::process::exit(code);
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    let Some(command) = &cli.command else {
        print_quickstart();
        return Ok(());
    };

    match command {
        Commands::Init(args) => handle_init(ctx, args),
        Commands::Register(args) => handle_register(ctx, args),
        Commands::Login(args) => handle_login(ctx, args),
        Commands::PasswordCheck(args) => handle_password_check(ctx, args),
        Commands::Upgrade => handle_upgrade(ctx),
        Commands::Notes(command) => handle_notes(ctx, command),
        Commands::Completions { shell } => handle_completions(*shell),
    }
}

fn print_quickstart() {
    println!("Notekeeper - per-user encrypted notes");
    println!();
    println!("Get started:");
    println!("  notekeeper init");
    println!("  notekeeper register <USERNAME>");
    println!("  notekeeper --user <USERNAME> notes add --title \"First note\" --body \"...\"");
    println!();
    println!("Run `notekeeper --help` for all commands.");
}
