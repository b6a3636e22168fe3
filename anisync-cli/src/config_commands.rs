use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use anisync_core::{load_config, save_config, SyncConfig};

use crate::cli::ConfigCommands;

pub fn handle(cmd: ConfigCommands, config_path: &Path) -> Result<()> {
    match cmd {
        ConfigCommands::Show { json } => show_config(config_path, json),
        ConfigCommands::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
        ConfigCommands::Init { force } => init_config(config_path, force),
    }
}

fn show_config(config_path: &Path, json: bool) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(account) = config.hummingbird.as_mut() {
        account.auth_token = mask_secret(&account.auth_token);
    }
    if let Some(account) = config.myanimelist.as_mut() {
        account.password = mask_secret(&account.password);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("{}", "Sync Configuration:".cyan().bold());
    println!("  Primary: {}", config.primary);
    let replicas: Vec<String> = config.replicas.iter().map(ToString::to_string).collect();
    let replicas = if replicas.is_empty() { "-".to_string() } else { replicas.join(", ") };
    println!("  Replicas: {replicas}");
    println!("  Push timeout: {}s", config.push_timeout_secs);
    if let Some(account) = &config.hummingbird {
        println!("  Hummingbird: {} (token {})", account.username, account.auth_token);
    }
    if let Some(account) = &config.myanimelist {
        println!("  MyAnimeList: {} (password {})", account.username, account.password);
    }
    Ok(())
}

fn init_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", config_path.display());
    }
    save_config(config_path, &SyncConfig::default())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("{} Wrote {}", "✓".green(), config_path.display());
    Ok(())
}

fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars.iter().take(4).collect();
    let tail: String = chars.iter().skip(chars.len() - 4).collect();
    format!("{head}...{tail}")
}
