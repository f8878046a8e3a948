use notekeeper_core::VERSION;

use crate::app::AppContext;
use crate::cli::InitArgs;
use crate::config::{write_config, NotekeeperConfig};
use crate::errors::CliError;
use crate::ui::render::{hint, kv, print};

/// Write the config file, then create the key file and database schema.
///
/// Existing key files and databases are reused, never replaced.
pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui = ctx.ui(false);
    let settings = ctx.settings()?;

    if settings.config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {} (use --force to overwrite)",
            settings.config_path.display()
        ))
        .into());
    }

    let mut config = NotekeeperConfig::new(settings.database.clone(), settings.key_file.clone());
    config.security.hash_memory_kib = settings.hash_cost.memory_kib;
    config.security.hash_iterations = settings.hash_cost.iterations;
    config.security.hash_parallelism = settings.hash_cost.parallelism;
    config.log.level = settings.log_level.clone();
    write_config(&settings.config_path, &config)?;

    // Opening the store creates the key file and schema.
    ctx.store()?;

    print(&ui, &format!("Initialized notekeeper {}", VERSION));
    print(&ui, &kv(&ui, "Config", &settings.config_path.display().to_string()));
    print(&ui, &kv(&ui, "Database", &settings.database().display().to_string()));
    print(&ui, &kv(&ui, "Key file", &settings.key_file().display().to_string()));
    print(
        &ui,
        &hint(&ui, "Back up the key file; notes cannot be read without it."),
    );
    Ok(())
}
