//! Plain `{amount, code}` record, the wire form of an [`Amount`](super::Amount)

use serde::{Deserialize, Serialize};

/// Serialized amount record
///
/// On output `code` is always the primary denomination. On input any
/// recognized denomination code is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlainAmount {
    /// Value expressed in `code`
    pub amount: f64,
    /// Denomination code
    pub code: String,
}

impl PlainAmount {
    /// Create a new plain record
    pub fn new(amount: f64, code: impl Into<String>) -> Self {
        Self {
            amount,
            code: code.into(),
        }
    }
}
