use tracing::info;

use notekeeper_core::crypto::STRONG_PASSWORD_MESSAGE;
use notekeeper_core::{validate_password_strength, NoteStore, NotesError};

use crate::app::AppContext;
use crate::cli::{LoginArgs, PasswordCheckArgs, RegisterArgs};
use crate::helpers::prompt_new_password;
use crate::ui::render::{kv, print, print_result};

pub fn handle_register(ctx: &AppContext, args: &RegisterArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(false);
    let store = ctx.store()?;
    let password = prompt_new_password()?;

    let user_id = store.register(&args.username, &password)?;
    info!(%user_id, "account registered");

    print(&ui, "User registered successfully!");
    print(&ui, &kv(&ui, "User ID", &user_id.to_string()));
    Ok(())
}

pub fn handle_login(ctx: &AppContext, args: &LoginArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(false);
    let store = ctx.store()?;
    let username = match args.username.as_deref() {
        Some(name) => name,
        None => ctx.username()?,
    };

    let user = ctx.login(&store, username)?;

    print(&ui, &format!("Logged in as {}", user.username));
    print_result(&ui, &kv(&ui, "Tier", tier_name(user.is_premium)));
    Ok(())
}

pub fn handle_password_check(ctx: &AppContext, args: &PasswordCheckArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(false);
    validate_password_strength(&args.password).map_err(NotesError::from)?;
    print_result(&ui, STRONG_PASSWORD_MESSAGE);
    Ok(())
}

pub fn handle_upgrade(ctx: &AppContext) -> anyhow::Result<()> {
    let ui = ctx.ui(false);
    let store = ctx.store()?;
    let user = ctx.session(&store)?;

    if user.is_premium {
        print(&ui, &format!("{} is already a Premium user.", user.username));
        return Ok(());
    }

    store.upgrade_to_premium(user.id)?;
    print(&ui, "You are now a Premium user!");
    Ok(())
}

fn tier_name(is_premium: bool) -> &'static str {
    if is_premium {
        "premium"
    } else {
        "free"
    }
}
