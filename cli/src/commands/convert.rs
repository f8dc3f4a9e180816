use crate::commands::print_info;
use crate::config::{Config, OutputFormat};
use anyhow::{Context, Result};
use colored::*;
use nova_units::types::units::FIAT_PRECISION;
use nova_units::{Amount, Denomination, DenominationEntry};
use serde::Serialize;
use tracing::debug;

/// One converted value, as printed by the conversion commands
#[derive(Debug, Serialize, PartialEq)]
pub struct Conversion {
    pub novas: i64,
    pub value: String,
    pub code: String,
}

impl Conversion {
    fn new(amount: &Amount, denomination: Denomination) -> Self {
        Self {
            novas: amount.as_novas(),
            value: amount.to_fixed(denomination),
            code: denomination.code().to_string(),
        }
    }
}

/// Fiat value of an amount
#[derive(Debug, Serialize, PartialEq)]
pub struct FiatValue {
    pub novas: i64,
    pub nova: String,
    pub rate: f64,
    pub fiat: String,
}

/// Parse `input` as `"<amount> <code>"`, or as a bare number in `from`
/// (falling back to the configured default unit)
pub fn parse_amount(input: &str, from: Option<&str>, config: &Config) -> Result<Amount> {
    if input.split_whitespace().count() > 1 {
        return input
            .parse::<Amount>()
            .with_context(|| format!("Failed to parse amount: {}", input));
    }

    let denomination = match from {
        Some(code) => code.parse::<Denomination>()?,
        None => config.default_denomination()?,
    };
    let value = input
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid amount: {}", input))?;

    debug!(value, unit = %denomination, "Parsed amount");
    Ok(Amount::new(value, denomination)?)
}

/// Convert an amount into one denomination, or into all of them
pub fn convert(amount: &Amount, to: Option<&str>) -> Result<Vec<Conversion>> {
    let conversions = match to {
        Some(code) => vec![Conversion::new(amount, code.parse::<Denomination>()?)],
        None => Denomination::ALL
            .iter()
            .map(|denomination| Conversion::new(amount, *denomination))
            .collect(),
    };
    Ok(conversions)
}

/// Fiat value of `amount` at `rate`
pub fn fiat(amount: &Amount, rate: f64) -> Result<FiatValue> {
    let mut fiat = amount.fiat_decimal(rate)?;
    fiat.rescale(FIAT_PRECISION);
    Ok(FiatValue {
        novas: amount.as_novas(),
        nova: amount.to_fixed(Denomination::Nova),
        rate,
        fiat: fiat.to_string(),
    })
}

pub fn show_conversions(conversions: &[Conversion], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(conversions)?);
        }
        OutputFormat::Text => {
            for conversion in conversions {
                println!("{:>24} {}", conversion.value.bright_white(), conversion.code.cyan());
            }
        }
    }
    Ok(())
}

pub fn show_fiat(value: &FiatValue, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        OutputFormat::Text => {
            println!(
                "{} NOVA @ {} = {}",
                value.nova.bright_white(),
                value.rate,
                value.fiat.green().bold()
            );
        }
    }
    Ok(())
}

pub fn show_table(format: &OutputFormat) -> Result<()> {
    let entries: Vec<DenominationEntry> = Denomination::ALL
        .iter()
        .map(|denomination| *denomination.entry())
        .collect();

    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = entries
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "code": entry.code,
                        "scale": entry.scale,
                        "precision": entry.precision,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Text => {
            println!("{}", "Denominations".bold().green());
            println!("{}", "=".repeat(40));
            println!("{:<8} {:>16} {:>10}", "Code", "Novas per unit", "Precision");
            for entry in &entries {
                println!(
                    "{:<8} {:>16} {:>10}",
                    entry.code.cyan(),
                    entry.scale,
                    entry.precision
                );
            }
            print_info("1 NOVA = 100,000,000 novas");
        }
    }
    Ok(())
}
