pub mod denomination;
pub mod plain;
pub mod units;

// Re-export main types
pub use denomination::{lookup, Denomination, DenominationEntry, DENOMINATION_TABLE};
pub use plain::PlainAmount;
pub use units::{Amount, Target};
