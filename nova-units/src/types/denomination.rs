//! NOVA denomination table
//!
//! The table maps each denomination code to its scale (novas per one unit of
//! the denomination) and its display precision in decimal digits. Entries are
//! ordered from the largest denomination down to the indivisible nova.

use crate::error::{UnitError, UnitResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The number of novas (smallest unit) in one NOVA
/// 1 NOVA = 10^8 novas (following Bitcoin's model: 1 BTC = 10^8 satoshis)
pub const NOVAS_PER_NOVA: i64 = 100_000_000;

/// One row of the denomination table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DenominationEntry {
    /// Canonical code, used on output
    pub code: &'static str,
    /// Novas per one unit of this denomination
    pub scale: i64,
    /// Decimal digits shown when converting into this denomination
    pub precision: u32,
}

/// Denomination table, indexed by `Denomination as usize`
pub static DENOMINATION_TABLE: [DenominationEntry; 4] = [
    DenominationEntry {
        code: "NOVA",
        scale: NOVAS_PER_NOVA,
        precision: 8,
    },
    DenominationEntry {
        code: "mNOVA",
        scale: 100_000,
        precision: 5,
    },
    DenominationEntry {
        code: "uNOVA",
        scale: 100,
        precision: 2,
    },
    DenominationEntry {
        code: "novas",
        scale: 1,
        precision: 0,
    },
];

/// Currency denominations for Supernova
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Denomination {
    /// The primary unit (1 NOVA)
    Nova = 0,
    /// milli-nova (0.001 NOVA)
    MilliNova = 1,
    /// micro-nova (0.000001 NOVA), also known as "bits"
    MicroNova = 2,
    /// nova (0.00000001 NOVA) - smallest indivisible unit
    Novas = 3,
}

impl Denomination {
    /// All denominations in table order
    pub const ALL: [Denomination; 4] = [
        Denomination::Nova,
        Denomination::MilliNova,
        Denomination::MicroNova,
        Denomination::Novas,
    ];

    /// The table row for this denomination
    pub fn entry(self) -> &'static DenominationEntry {
        &DENOMINATION_TABLE[self as usize]
    }

    /// Novas per one unit of this denomination
    pub fn scale(self) -> i64 {
        self.entry().scale
    }

    /// Decimal digits kept when converting into this denomination
    pub fn precision(self) -> u32 {
        self.entry().precision
    }

    /// Canonical code
    pub fn code(self) -> &'static str {
        self.entry().code
    }

    /// Get the unit name
    pub fn name(self) -> &'static str {
        match self {
            Denomination::Nova => "nova",
            Denomination::MilliNova => "millinova",
            Denomination::MicroNova => "micronova",
            Denomination::Novas => "novas",
        }
    }
}

/// Resolve a denomination code to its `(scale, precision)` pair
pub fn lookup(code: &str) -> UnitResult<(i64, u32)> {
    let denomination = code.parse::<Denomination>()?;
    Ok((denomination.scale(), denomination.precision()))
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Denomination {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nova" => Ok(Denomination::Nova),
            "mnova" | "millinova" => Ok(Denomination::MilliNova),
            "unova" | "μnova" | "µnova" | "micronova" | "bits" => {
                Ok(Denomination::MicroNova)
            }
            "novas" | "nova-atoms" => Ok(Denomination::Novas),
            _ => {
                debug!(code = s, "Rejected unknown denomination code");
                Err(UnitError::UnknownCode(s.to_string()))
            }
        }
    }
}

impl TryFrom<String> for Denomination {
    type Error = UnitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Denomination> for String {
    fn from(value: Denomination) -> Self {
        value.code().to_string()
    }
}
