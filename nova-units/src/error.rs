//! Error handling for NOVA unit operations
//!
//! Every fallible operation in this crate returns [`UnitResult`]. Variants carry
//! the offending input so callers can report it back without re-deriving it.

use thiserror::Error;

/// Error type for currency unit operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UnitError {
    /// Exchange rate was zero, negative or not a finite number
    #[error("Invalid rate: {0} (must be a positive number)")]
    InvalidRate(f64),

    /// Denomination code is not in the denomination table
    #[error("Unknown unit code: {0}")]
    UnknownCode(String),

    /// Argument failed a precondition before any domain validation ran
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Amount was NaN or infinite
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    /// Conversion overflow
    #[error("Conversion overflow: value exceeds the representable novas range")]
    ConversionOverflow,
}

impl UnitError {
    /// Whether the error was caused by a bad exchange rate
    pub fn is_invalid_rate(&self) -> bool {
        matches!(self, UnitError::InvalidRate(_))
    }

    /// Whether the error was caused by an unrecognized denomination code
    pub fn is_unknown_code(&self) -> bool {
        matches!(self, UnitError::UnknownCode(_))
    }
}

/// Result type alias for unit operations
pub type UnitResult<T> = Result<T, UnitError>;
