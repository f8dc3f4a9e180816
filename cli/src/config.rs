use anyhow::{anyhow, bail, Context, Result};
use dirs::home_dir;
use nova_units::Denomination;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Denomination assumed when an amount has no code
    pub default_unit: String,

    /// Fiat price of one NOVA used when `--rate` is omitted
    pub fiat_rate: Option<f64>,

    /// Output format (json, text)
    pub output_format: OutputFormat,

    /// Enable debug logging
    pub debug: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Text,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            _ => bail!("Invalid output format: {}. Must be: json or text", s),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_unit: Denomination::Nova.code().to_string(),
            fiat_rate: None,
            output_format: OutputFormat::Text,
            debug: false,
        }
    }
}

impl Config {
    /// Load configuration from the default file, or defaults if there is none
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, or defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(config_dir) = path.parent() {
            fs::create_dir_all(config_dir).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = home_dir().context("Failed to get home directory")?;
        Ok(home.join(".supernova").join("units").join("config.toml"))
    }

    /// Check the unit code and rate against the denomination table
    pub fn validate(&self) -> Result<()> {
        self.default_denomination()?;
        if let Some(rate) = self.fiat_rate {
            if !(rate.is_finite() && rate > 0.0) {
                bail!("Invalid fiat_rate {}: must be a positive number", rate);
            }
        }
        Ok(())
    }

    /// The configured default denomination
    pub fn default_denomination(&self) -> Result<Denomination> {
        self.default_unit
            .parse::<Denomination>()
            .with_context(|| format!("Invalid default_unit in config: {}", self.default_unit))
    }

    /// Fiat rate from the command line, falling back to the configured one
    pub fn resolve_rate(&self, rate: Option<f64>) -> Result<f64> {
        rate.or(self.fiat_rate)
            .ok_or_else(|| anyhow!("No exchange rate given: pass --rate or set fiat_rate"))
    }

    /// Update one setting by key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key.to_lowercase().as_str() {
            "default_unit" | "unit" => {
                let denomination = value.parse::<Denomination>()?;
                self.default_unit = denomination.code().to_string();
            }
            "fiat_rate" | "rate" => {
                if value.eq_ignore_ascii_case("none") {
                    self.fiat_rate = None;
                } else {
                    let rate = value
                        .parse::<f64>()
                        .with_context(|| format!("Invalid rate: {}", value))?;
                    self.fiat_rate = Some(rate);
                }
            }
            "output_format" | "format" => {
                self.output_format = value.parse()?;
            }
            "debug" => {
                self.debug = value
                    .parse::<bool>()
                    .with_context(|| format!("Invalid boolean: {}", value))?;
            }
            _ => bail!("Unknown configuration key: {}", key),
        }
        self.validate()
    }
}
