//! NOVA amounts and conversions
//!
//! An [`Amount`] holds a single signed count of novas (the smallest unit,
//! 1 NOVA = 10^8 novas). Every other representation is derived from that
//! count and the denomination table on demand.
//!
//! Rounding is half away from zero, applied to the exact decimal value of the
//! caller's number (its shortest round-trip representation), so
//! `1.234567895` NOVA is always `123456790` novas regardless of how the
//! binary float happens to sit next to the midpoint.

use crate::error::{UnitError, UnitResult};
use crate::types::denomination::Denomination;
use crate::types::plain::PlainAmount;
use crate::util::precondition::check_object_fields;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Decimal places kept when converting into a fiat amount
pub const FIAT_PRECISION: u32 = 2;

const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// What an amount is expressed in: a denomination or a fiat exchange rate
///
/// A rate is the price of one NOVA in the reference currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    /// One of the NOVA denominations
    Unit(Denomination),
    /// Fiat price of one NOVA
    Rate(f64),
}

impl From<Denomination> for Target {
    fn from(value: Denomination) -> Self {
        Target::Unit(value)
    }
}

impl From<f64> for Target {
    fn from(value: f64) -> Self {
        Target::Rate(value)
    }
}

/// Represents an amount in NOVA currency
/// Internally stores the value in novas, the smallest indivisible unit
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "PlainAmount", try_from = "PlainAmount")]
pub struct Amount {
    novas: i64,
}

impl Amount {
    /// Create an amount from a value expressed in a denomination or at a fiat rate
    ///
    /// With [`Target::Rate`] the value is a fiat amount: it is divided by the
    /// rate and then treated as NOVA. The rate is validated before anything else.
    pub fn new(amount: f64, target: impl Into<Target>) -> UnitResult<Self> {
        let (value, denomination) = match target.into() {
            Target::Unit(denomination) => (exact_amount(amount)?, denomination),
            Target::Rate(rate) => {
                let rate = exact_rate(rate)?;
                let value = exact_amount(amount)?
                    .checked_div(rate)
                    .ok_or(UnitError::ConversionOverflow)?;
                (value, Denomination::Nova)
            }
        };

        let novas = value
            .checked_mul(Decimal::from(denomination.scale()))
            .map(|raw| raw.round_dp_with_strategy(0, ROUNDING))
            .and_then(|raw| raw.to_i64())
            .ok_or_else(|| {
                debug!(amount, unit = %denomination, "Amount exceeds the novas range");
                UnitError::ConversionOverflow
            })?;

        trace!(novas, unit = %denomination, "Amount constructed");
        Ok(Self { novas })
    }

    /// Create an amount from a value and a denomination code such as `"mNOVA"`
    pub fn with_code(amount: f64, code: &str) -> UnitResult<Self> {
        let denomination = code.parse::<Denomination>()?;
        Self::new(amount, denomination)
    }

    /// Create a new Amount from NOVA (the primary unit)
    pub fn from_nova(nova: f64) -> UnitResult<Self> {
        Self::new(nova, Denomination::Nova)
    }

    /// Create a new Amount from mNOVA
    pub fn from_milli(milli: f64) -> UnitResult<Self> {
        Self::new(milli, Denomination::MilliNova)
    }

    /// Alias of [`Amount::from_milli`]
    pub fn from_millis(millis: f64) -> UnitResult<Self> {
        Self::from_milli(millis)
    }

    /// Create a new Amount from uNOVA
    pub fn from_micro(micro: f64) -> UnitResult<Self> {
        Self::new(micro, Denomination::MicroNova)
    }

    /// Alias of [`Amount::from_micro`]; a "bit" is one uNOVA
    pub fn from_bits(bits: f64) -> UnitResult<Self> {
        Self::from_micro(bits)
    }

    /// Create a new Amount from novas (smallest unit)
    pub const fn from_novas(novas: i64) -> Self {
        Self { novas }
    }

    /// Create a new Amount from a fiat value and the fiat price of one NOVA
    pub fn from_fiat(amount: f64, rate: f64) -> UnitResult<Self> {
        Self::new(amount, Target::Rate(rate))
    }

    /// Create a new Amount from a plain record in any recognized denomination
    pub fn from_plain(plain: PlainAmount) -> UnitResult<Self> {
        Self::with_code(plain.amount, &plain.code)
    }

    /// Create a new Amount from a JSON `{"amount": .., "code": ..}` object
    ///
    /// Anything other than an object carrying both fields is rejected with
    /// [`UnitError::InvalidArgument`] before the code or amount are looked at.
    pub fn from_plain_object(value: &serde_json::Value) -> UnitResult<Self> {
        check_object_fields(value, &["amount", "code"])?;
        let plain = PlainAmount::deserialize(value)
            .map_err(|e| UnitError::InvalidArgument(e.to_string()))?;
        Self::from_plain(plain)
    }

    /// The zero amount
    pub const fn zero() -> Self {
        Self { novas: 0 }
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.novas == 0
    }

    /// Check if the amount is below zero
    pub const fn is_negative(&self) -> bool {
        self.novas < 0
    }

    /// Get the raw amount in novas
    pub const fn as_novas(&self) -> i64 {
        self.novas
    }

    /// Convert into a denomination or, given a rate, into fiat
    pub fn to(&self, target: impl Into<Target>) -> UnitResult<f64> {
        match target.into() {
            Target::Unit(denomination) => Ok(self.to_unit(denomination)),
            Target::Rate(rate) => self.at_rate(rate),
        }
    }

    /// Convert into the denomination named by `code`
    pub fn to_code(&self, code: &str) -> UnitResult<f64> {
        let denomination = code.parse::<Denomination>()?;
        Ok(self.to_unit(denomination))
    }

    /// Get the amount in the specified denomination, rounded to its precision
    pub fn to_unit(&self, denomination: Denomination) -> f64 {
        decimal_to_f64(self.to_decimal(denomination))
    }

    /// Exact decimal value in the specified denomination, rounded to its precision
    pub fn to_decimal(&self, denomination: Denomination) -> Decimal {
        (Decimal::from(self.novas) / Decimal::from(denomination.scale()))
            .round_dp_with_strategy(denomination.precision(), ROUNDING)
    }

    /// Fiat value of this amount, rounded to cents
    pub fn at_rate(&self, rate: f64) -> UnitResult<f64> {
        self.fiat_decimal(rate).map(decimal_to_f64)
    }

    /// Exact decimal fiat value of this amount, rounded to cents
    pub fn fiat_decimal(&self, rate: f64) -> UnitResult<Decimal> {
        let rate = exact_rate(rate)?;
        self.to_decimal(Denomination::Nova)
            .checked_mul(rate)
            .map(|fiat| fiat.round_dp_with_strategy(FIAT_PRECISION, ROUNDING))
            .ok_or(UnitError::ConversionOverflow)
    }

    /// Canonical record, always expressed in NOVA
    pub fn to_plain_object(&self) -> PlainAmount {
        PlainAmount::new(self.to_nova(), Denomination::Nova.code())
    }

    /// Value in the specified denomination, padded to exactly its precision
    pub fn to_fixed(&self, denomination: Denomination) -> String {
        let mut value = self.to_decimal(denomination);
        value.rescale(denomination.precision());
        value.to_string()
    }

    /// Format the amount in the specified denomination with its full precision
    pub fn format_with_unit(&self, denomination: Denomination) -> String {
        format!("{} {}", self.to_fixed(denomination), denomination.code())
    }
}

/// One read accessor per denomination, plus the matching `to_*` alias
macro_rules! denomination_accessors {
    ($($(#[$meta:meta])* $accessor:ident, $alias:ident => $denomination:ident;)*) => {
        impl Amount {
            $(
                $(#[$meta])*
                pub fn $accessor(&self) -> f64 {
                    self.to_unit(Denomination::$denomination)
                }

                $(#[$meta])*
                pub fn $alias(&self) -> f64 {
                    self.to_unit(Denomination::$denomination)
                }
            )*
        }
    };
}

denomination_accessors! {
    /// Value in NOVA, 8 decimal places
    nova, to_nova => Nova;
    /// Value in mNOVA, 5 decimal places
    milli, to_milli => MilliNova;
    /// Value in uNOVA, 2 decimal places
    micro, to_micro => MicroNova;
    /// Value in novas
    novas, to_novas => Novas;
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.novas, Denomination::Novas.code())
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Amount: {}>", self)
    }
}

impl FromStr for Amount {
    type Err = UnitError;

    /// Parse `"<amount> <code>"`, e.g. `"1.5 mNOVA"` or `"150 novas"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(value), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(UnitError::InvalidArgument(format!(
                "expected \"<amount> <code>\", got {:?}",
                s
            )));
        };

        let amount = value
            .parse::<f64>()
            .map_err(|_| UnitError::InvalidArgument(format!("invalid amount: {}", value)))?;
        Self::with_code(amount, code)
    }
}

impl From<Amount> for PlainAmount {
    fn from(value: Amount) -> Self {
        value.to_plain_object()
    }
}

impl TryFrom<PlainAmount> for Amount {
    type Error = UnitError;

    fn try_from(value: PlainAmount) -> Result<Self, Self::Error> {
        Amount::from_plain(value)
    }
}

/// Exact decimal value of `value`, taken from its shortest round-trip representation
fn decimal_from_f64(value: f64) -> Option<Decimal> {
    Decimal::from_str(&value.to_string()).ok()
}

fn exact_amount(amount: f64) -> UnitResult<Decimal> {
    if !amount.is_finite() {
        debug!(amount, "Rejected non-finite amount");
        return Err(UnitError::InvalidAmount(amount));
    }
    decimal_from_f64(amount).ok_or(UnitError::ConversionOverflow)
}

fn exact_rate(rate: f64) -> UnitResult<Decimal> {
    if !(rate.is_finite() && rate > 0.0) {
        debug!(rate, "Rejected exchange rate");
        return Err(UnitError::InvalidRate(rate));
    }
    // A valid rate outside the decimal range cannot take part in a conversion
    decimal_from_f64(rate)
        .filter(|r| !r.is_zero())
        .ok_or(UnitError::ConversionOverflow)
}

/// Nearest f64 to `value`, parsed from its decimal representation
fn decimal_to_f64(value: Decimal) -> f64 {
    // Decimal always prints a parseable number; NaN only marks an impossible path
    value.to_string().parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_conversions() {
        let amount = Amount::from_nova(1.0).unwrap();
        assert_eq!(amount.as_novas(), 100_000_000);
        assert_eq!(amount.to_novas(), 100_000_000.0);
        assert_eq!(amount.to_milli(), 1000.0);
        assert_eq!(amount.to_micro(), 1_000_000.0);

        let amount = Amount::from_novas(50_000_000);
        assert_eq!(amount.to_nova(), 0.5);

        let amount = Amount::from_micro(1_000_000.0).unwrap();
        assert_eq!(amount.to_nova(), 1.0);

        let amount = Amount::from_milli(1.5).unwrap();
        assert_eq!(amount.as_novas(), 150_000);
        assert_eq!(Amount::from_millis(1.5).unwrap(), amount);

        assert_eq!(
            Amount::from_bits(250.0).unwrap(),
            Amount::from_micro(250.0).unwrap()
        );
    }

    #[test]
    fn test_construction_by_code() {
        let amount = Amount::with_code(2.0, "mNOVA").unwrap();
        assert_eq!(amount.as_novas(), 200_000);

        assert_eq!(
            Amount::with_code(2.0, "kNOVA"),
            Err(UnitError::UnknownCode("kNOVA".to_string()))
        );
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(Amount::from_nova(1.234567895).unwrap().as_novas(), 123_456_790);
        assert_eq!(Amount::from_nova(-1.234567895).unwrap().as_novas(), -123_456_790);
        assert_eq!(Amount::from_nova(1.234567894).unwrap().as_novas(), 123_456_789);

        // 0.5 of a nova
        assert_eq!(Amount::new(0.5, Denomination::Novas).unwrap().as_novas(), 1);
        assert_eq!(Amount::new(-0.5, Denomination::Novas).unwrap().as_novas(), -1);
        assert_eq!(Amount::new(2.5, Denomination::Novas).unwrap().as_novas(), 3);

        // 0.000005 NOVA is exactly half of a uNOVA step
        assert_eq!(Amount::from_micro(0.005).unwrap().as_novas(), 1);
    }

    #[test]
    fn test_conversion_rounds_to_target_precision() {
        let amount = Amount::from_novas(123_456_789);
        assert_eq!(amount.to_nova(), 1.23456789);
        assert_eq!(amount.to_milli(), 1234.56789);
        assert_eq!(amount.to_micro(), 1_234_567.89);
        assert_eq!(amount.to_novas(), 123_456_789.0);

        let amount = Amount::from_novas(-150);
        assert_eq!(amount.to_micro(), -1.5);
    }

    #[test]
    fn test_to_dispatch() {
        let amount = Amount::from_nova(2.0).unwrap();
        assert_eq!(amount.to(Denomination::MilliNova).unwrap(), 2000.0);
        assert_eq!(amount.to(100.0).unwrap(), 200.0);
        assert_eq!(amount.to_code("bits").unwrap(), 2_000_000.0);
        assert!(amount.to_code("satoshis").unwrap_err().is_unknown_code());
    }

    #[test]
    fn test_fiat_conversion() {
        let amount = Amount::from_fiat(100.0, 25_000.0).unwrap();
        assert_eq!(amount.as_novas(), 400_000);
        assert_eq!(amount.at_rate(25_000.0).unwrap(), 100.0);

        let amount = Amount::from_nova(0.12345678).unwrap();
        assert_eq!(amount.at_rate(10.0).unwrap(), 1.23);
        assert_eq!(
            amount.fiat_decimal(10.0).unwrap(),
            Decimal::from_str("1.23").unwrap()
        );
    }

    #[test]
    fn test_invalid_rate_rejected() {
        assert_eq!(Amount::from_fiat(10.0, 0.0), Err(UnitError::InvalidRate(0.0)));
        assert_eq!(Amount::from_fiat(10.0, -3.0), Err(UnitError::InvalidRate(-3.0)));
        assert!(Amount::from_fiat(10.0, f64::NAN).unwrap_err().is_invalid_rate());
        assert!(Amount::from_fiat(10.0, f64::INFINITY).unwrap_err().is_invalid_rate());

        let amount = Amount::from_nova(1.0).unwrap();
        assert_eq!(amount.at_rate(0.0), Err(UnitError::InvalidRate(0.0)));
        assert_eq!(amount.to(-1.0), Err(UnitError::InvalidRate(-1.0)));
    }

    #[test]
    fn test_unrepresentable_rate_overflows() {
        assert_eq!(Amount::from_fiat(0.0, 1e-29), Err(UnitError::ConversionOverflow));
        assert_eq!(Amount::from_fiat(1.0, 1e30), Err(UnitError::ConversionOverflow));

        let amount = Amount::from_nova(1.0).unwrap();
        assert_eq!(amount.at_rate(1e-29), Err(UnitError::ConversionOverflow));
    }

    #[test]
    fn test_large_amount_converts_to_nearest_f64() {
        let amount = Amount::from_novas(4_181_523_307_712_907);
        assert_eq!(amount.to_nova(), 41815233.07712907);
        assert_eq!(Amount::from_novas(-4_181_523_307_712_907).to_nova(), -41815233.07712907);
        assert_eq!(amount.to_plain_object(), PlainAmount::new(41815233.07712907, "NOVA"));

        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, r#"{"amount":41815233.07712907,"code":"NOVA"}"#);
        assert_eq!(serde_json::from_str::<Amount>(&json).unwrap(), amount);
    }

    #[test]
    fn test_rate_checked_before_amount() {
        assert_eq!(
            Amount::from_fiat(f64::NAN, -1.0),
            Err(UnitError::InvalidRate(-1.0))
        );
    }

    #[test]
    fn test_invalid_amount_and_overflow() {
        assert!(matches!(
            Amount::from_nova(f64::INFINITY),
            Err(UnitError::InvalidAmount(_))
        ));
        assert!(matches!(
            Amount::from_nova(f64::NAN),
            Err(UnitError::InvalidAmount(_))
        ));
        assert_eq!(Amount::from_nova(1e12), Err(UnitError::ConversionOverflow));
        assert_eq!(Amount::from_nova(1e40), Err(UnitError::ConversionOverflow));
    }

    #[test]
    fn test_accessors_match_conversions() {
        let amount = Amount::from_novas(987_654_321);
        for denomination in Denomination::ALL {
            assert_eq!(amount.to(denomination).unwrap(), amount.to_unit(denomination));
        }
        assert_eq!(amount.nova(), amount.to_nova());
        assert_eq!(amount.milli(), amount.to_milli());
        assert_eq!(amount.micro(), amount.to_micro());
        assert_eq!(amount.novas(), amount.to_novas());
    }

    #[test]
    fn test_plain_object_is_normalized() {
        let amount = Amount::with_code(1500.0, "uNOVA").unwrap();
        let plain = amount.to_plain_object();
        assert_eq!(plain, PlainAmount::new(0.0015, "NOVA"));

        let json = serde_json::to_value(amount).unwrap();
        assert_eq!(json, json!({ "amount": 0.0015, "code": "NOVA" }));
    }

    #[test]
    fn test_from_plain_object() {
        let amount = Amount::from_plain_object(&json!({ "amount": 3, "code": "mNOVA" })).unwrap();
        assert_eq!(amount.as_novas(), 300_000);

        assert!(matches!(
            Amount::from_plain_object(&json!("3 mNOVA")),
            Err(UnitError::InvalidArgument(_))
        ));
        assert!(matches!(
            Amount::from_plain_object(&json!({ "amount": 3 })),
            Err(UnitError::InvalidArgument(_))
        ));
        assert!(matches!(
            Amount::from_plain_object(&json!({ "amount": "three", "code": "NOVA" })),
            Err(UnitError::InvalidArgument(_))
        ));
        assert_eq!(
            Amount::from_plain_object(&json!({ "amount": 3, "code": "BTC" })),
            Err(UnitError::UnknownCode("BTC".to_string()))
        );
    }

    #[test]
    fn test_deserialize_any_code() {
        let amount: Amount = serde_json::from_str(r#"{"amount": 42, "code": "novas"}"#).unwrap();
        assert_eq!(amount, Amount::from_novas(42));

        assert!(serde_json::from_str::<Amount>(r#"{"amount": 1, "code": "XYZ"}"#).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::from_nova(1.5).unwrap().to_string(), "150000000 novas");
        assert_eq!(Amount::zero().to_string(), "0 novas");
        assert_eq!(Amount::from_novas(-7).to_string(), "-7 novas");
        assert_eq!(format!("{:?}", Amount::from_novas(42)), "<Amount: 42 novas>");
    }

    #[test]
    fn test_format_with_unit() {
        let amount = Amount::from_nova(1.5).unwrap();
        assert_eq!(amount.format_with_unit(Denomination::Nova), "1.50000000 NOVA");
        assert_eq!(amount.format_with_unit(Denomination::MilliNova), "1500.00000 mNOVA");
        assert_eq!(amount.format_with_unit(Denomination::MicroNova), "1500000.00 uNOVA");
        assert_eq!(amount.format_with_unit(Denomination::Novas), "150000000 novas");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("1.5 mNOVA".parse::<Amount>().unwrap().as_novas(), 150_000);
        assert_eq!("150 novas".parse::<Amount>().unwrap().as_novas(), 150);
        assert_eq!(
            "-2 NOVA".parse::<Amount>().unwrap(),
            Amount::from_novas(-200_000_000)
        );

        // Display output parses back to the same amount
        let amount = Amount::from_novas(123_456);
        assert_eq!(amount.to_string().parse::<Amount>().unwrap(), amount);

        assert!(matches!("1.5".parse::<Amount>(), Err(UnitError::InvalidArgument(_))));
        assert!(matches!("one NOVA".parse::<Amount>(), Err(UnitError::InvalidArgument(_))));
        assert!("1 NOVA extra".parse::<Amount>().is_err());
        assert!("1 BTC".parse::<Amount>().unwrap_err().is_unknown_code());
    }

    #[test]
    fn test_zero_and_sign() {
        assert!(Amount::zero().is_zero());
        assert!(Amount::default().is_zero());
        assert!(Amount::from_novas(-1).is_negative());
        assert!(!Amount::from_novas(1).is_negative());
        assert!(Amount::from_novas(1) > Amount::from_novas(-1));
    }
}
