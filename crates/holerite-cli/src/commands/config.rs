//! Config command - manage configuration.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use holerite_core::models::config::HoleriteConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key ("extraction.tolerance_cents", or a shortcut:
        /// "tolerance", "keywords")
        key: String,
    },

    /// List the deduction keywords in effect
    Keywords,

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(),
        ConfigCommand::Init(init_args) => init_config(init_args),
        ConfigCommand::Get { key } => get_config(&key),
        ConfigCommand::Keywords => list_keywords(),
        ConfigCommand::Path => show_path(),
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("holerite")
        .join("config.json")
}

fn show_config() -> anyhow::Result<()> {
    let config_path = default_config_path();

    let config = if config_path.exists() {
        HoleriteConfig::from_file(&config_path)?
    } else {
        println!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
        HoleriteConfig::default()
    };

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(default_config_path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    // Create parent directory if needed
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let config = HoleriteConfig::default();
    config.save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );
    println!(
        "   {} deduction keywords, tolerance {} centavo(s)",
        config.extraction.deduction_keywords.len(),
        config.extraction.tolerance_cents
    );

    Ok(())
}

fn get_config(key: &str) -> anyhow::Result<()> {
    let config_path = default_config_path();

    let config = if config_path.exists() {
        HoleriteConfig::from_file(&config_path)?
    } else {
        HoleriteConfig::default()
    };

    // Shortcuts for the two values people actually tune.
    let key = match key {
        "tolerance" => "extraction.tolerance_cents",
        "keywords" => "extraction.deduction_keywords",
        key => key,
    };

    // Convert config to JSON for key lookup
    let json = serde_json::to_value(&config)?;

    // Navigate the key path
    let parts: Vec<&str> = key.split('.').collect();
    let mut current = &json;

    for part in &parts {
        current = current
            .get(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    }

    println!("{}", serde_json::to_string_pretty(current)?);

    Ok(())
}

fn list_keywords() -> anyhow::Result<()> {
    let config_path = default_config_path();

    let config = if config_path.exists() {
        HoleriteConfig::from_file(&config_path)?
    } else {
        HoleriteConfig::default()
    };

    if config.extraction.deduction_keywords.is_empty() {
        println!(
            "{} No deduction keywords configured; every row will classify as an earning.",
            style("!").yellow()
        );
        return Ok(());
    }

    for keyword in &config.extraction.deduction_keywords {
        println!("{}", keyword);
    }

    Ok(())
}

fn show_path() -> anyhow::Result<()> {
    let config_path = default_config_path();

    println!("Configuration file: {}", config_path.display());

    if config_path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'holerite config init' to create a configuration file.");
    }

    Ok(())
}
