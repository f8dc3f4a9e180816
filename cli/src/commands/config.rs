use crate::commands::{print_info, print_success};
use crate::config::{Config, OutputFormat};
use anyhow::Result;
use colored::*;

pub fn show(config: &Config) -> Result<()> {
    match &config.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Text => {
            println!("\n{}", "Current Configuration".bold().green());
            println!("{}", "=".repeat(50));

            println!("{:<16} {}", "Default unit", config.default_unit.yellow());
            let rate = config
                .fiat_rate
                .map(|rate| rate.to_string())
                .unwrap_or_else(|| "not set".to_string());
            println!("{:<16} {}", "Fiat rate", rate);
            println!("{:<16} {:?}", "Output format", config.output_format);
            println!(
                "{:<16} {}",
                "Debug mode",
                if config.debug { "Enabled".yellow() } else { "Disabled".red() }
            );

            println!("\nConfig file: {}", Config::config_path()?.display().to_string().cyan());
        }
    }

    Ok(())
}

pub fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    print_success(&format!("Set {} to: {}", key, value));
    Ok(())
}

pub fn reset() -> Result<()> {
    Config::default().save()?;
    print_info("Configuration reset to defaults");
    Ok(())
}
