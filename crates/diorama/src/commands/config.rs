use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::{self, Config};

pub fn run(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> anyhow::Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();
    let options = config::resolve_options(&[&config.option_overrides()]);

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();
    println!("  {:<26}{}", "defaults.theme", config.theme().cyan());
    println!(
        "  {:<26}{}",
        "defaults.class_name",
        if options.class_name.is_empty() {
            "(none)".dimmed()
        } else {
            options.class_name.cyan()
        }
    );
    println!(
        "  {:<26}{}",
        "defaults.footer",
        match &options.footer {
            Some(footer) => footer.cyan(),
            None => "(none)".dimmed(),
        }
    );
    println!(
        "  {:<26}{}",
        "defaults.navigation",
        options.navigation.to_string().cyan()
    );
    println!(
        "  {:<26}{}",
        "defaults.swipe_to_change",
        options.swipe_to_change.to_string().cyan()
    );
    println!(
        "  {:<26}{}",
        "defaults.presenter_notes",
        options.presenter_notes.to_string().cyan()
    );
    Ok(())
}

fn set(key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    tracing::debug!(key, value, path = %path.display(), "config updated");
    println!(
        "{} {key} = {value} ({})",
        "Saved".green().bold(),
        path.display()
    );
    Ok(())
}
