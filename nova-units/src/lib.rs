// Supernova Units Library
// NOVA denominations, amounts and fiat conversion

// Enforce panic-free code in production
#![cfg_attr(not(test), warn(clippy::unwrap_used))]
#![cfg_attr(not(test), warn(clippy::expect_used))]
#![cfg_attr(not(test), warn(clippy::panic))]
// Test-specific allows
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod error;
pub mod types;
pub mod util;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export commonly used types
pub use crate::error::{UnitError, UnitResult};
pub use crate::types::denomination::{lookup, Denomination, DenominationEntry};
pub use crate::types::plain::PlainAmount;
pub use crate::types::units::{Amount, Target};
