//! `mailcheck config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::{Config, KEYS};
use crate::output::OutputFormat;

pub fn execute(ctx: &Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(ctx),
        ConfigCommands::Set { key, value } => set_config(&key, &value),
        ConfigCommands::Path => show_path(),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(config)?);
        }
        _ => {
            println!("{}", "Current Configuration:".bold());
            println!();

            for (key, _) in KEYS {
                let value = display_value(config, key)
                    .unwrap_or_else(|| "(not set)".dimmed().to_string());
                println!("  {} {}", format!("{key}:").bold(), value);
            }
        }
    }

    Ok(())
}

fn display_value(config: &Config, key: &str) -> Option<String> {
    match key {
        "resolver_url" => config.resolver_url.clone(),
        "relay_url" => config.relay_url.clone(),
        "list_id" => config.list_id.clone(),
        "source" => config.source.clone(),
        "selectors" => (!config.selectors.is_empty()).then(|| config.selectors.join(",")),
        "timeout_secs" => config.timeout_secs.map(|t| t.to_string()),
        "output_format" => config.output_format.map(|f| f.to_string()),
        _ => None,
    }
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    if value.trim().is_empty() {
        println!("{} {} cleared.", "Success:".green().bold(), key.cyan());
    } else {
        println!("{} {} set to {}.", "Success:".green().bold(), key.cyan(), value.trim());
    }

    Ok(())
}

fn show_path() -> Result<()> {
    let path = Config::path()?;
    println!("{}", path.display());
    Ok(())
}
