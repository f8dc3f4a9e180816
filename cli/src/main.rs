// NOVA units CLI
// Converts amounts between NOVA denominations and fiat values

use anyhow::Result;
use clap::{Parser, Subcommand};
use nova_units::util::logging::init_logging;
use nova_units::Amount;
use nova_units_cli::commands::{self, convert, print_error};
use nova_units_cli::config::{Config, OutputFormat};
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "nova-units")]
#[command(about = "Convert NOVA amounts between denominations and fiat", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, env = "NOVA_UNITS_DEBUG")]
    debug: bool,

    /// Output format (json, text)
    #[arg(short, long, global = true, env = "NOVA_UNITS_FORMAT")]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount into one or all denominations
    Convert {
        /// Amount, either a number or "<number> <code>"
        #[arg(value_name = "AMOUNT", allow_hyphen_values = true)]
        amount: String,

        /// Denomination of a bare number
        #[arg(long)]
        from: Option<String>,

        /// Target denomination; all denominations when omitted
        #[arg(long)]
        to: Option<String>,
    },

    /// Value an amount in fiat
    Fiat {
        /// Amount, either a number or "<number> <code>"
        #[arg(value_name = "AMOUNT", allow_hyphen_values = true)]
        amount: String,

        /// Fiat price of one NOVA
        #[arg(short, long, env = "NOVA_UNITS_RATE")]
        rate: Option<f64>,

        /// Denomination of a bare number
        #[arg(long)]
        from: Option<String>,
    },

    /// Convert a fiat value into NOVA denominations
    FromFiat {
        /// Fiat value
        #[arg(value_name = "FIAT", allow_hyphen_values = true)]
        fiat: f64,

        /// Fiat price of one NOVA
        #[arg(short, long, env = "NOVA_UNITS_RATE")]
        rate: Option<f64>,

        /// Target denomination; all denominations when omitted
        #[arg(long)]
        to: Option<String>,
    },

    /// Show the denomination table
    Table,

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
    /// Reset to defaults
    Reset,
}

fn main() {
    if let Err(e) = run() {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load()?;

    // Override with CLI arguments
    if let Some(format) = cli.format {
        config.output_format = format;
    }
    if cli.debug {
        config.debug = true;
    }

    let level = if config.debug { Level::DEBUG } else { Level::WARN };
    init_logging(Some(level)).map_err(anyhow::Error::msg)?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Convert { amount, from, to } => {
            let amount = convert::parse_amount(&amount, from.as_deref(), &config)?;
            let conversions = convert::convert(&amount, to.as_deref())?;
            convert::show_conversions(&conversions, &config.output_format)?;
        }
        Commands::Fiat { amount, rate, from } => {
            let rate = config.resolve_rate(rate)?;
            let amount = convert::parse_amount(&amount, from.as_deref(), &config)?;
            let value = convert::fiat(&amount, rate)?;
            convert::show_fiat(&value, &config.output_format)?;
        }
        Commands::FromFiat { fiat, rate, to } => {
            let rate = config.resolve_rate(rate)?;
            let amount = Amount::from_fiat(fiat, rate)?;
            let conversions = convert::convert(&amount, to.as_deref())?;
            convert::show_conversions(&conversions, &config.output_format)?;
        }
        Commands::Table => {
            convert::show_table(&config.output_format)?;
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::show(&config)?,
            ConfigCommands::Set { key, value } => commands::config::set(&key, &value)?,
            ConfigCommands::Reset => commands::config::reset()?,
        },
    }

    Ok(())
}
