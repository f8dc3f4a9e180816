//! Argument precondition checks
//!
//! These run before any domain validation so malformed input is rejected with
//! a generic argument error instead of a unit-specific one.

use crate::error::{UnitError, UnitResult};

/// Fail with [`UnitError::InvalidArgument`] unless `condition` holds
pub fn check_argument(condition: bool, message: &str) -> UnitResult<()> {
    if condition {
        Ok(())
    } else {
        Err(UnitError::InvalidArgument(message.to_string()))
    }
}

/// Require `value` to be a JSON object carrying every field in `fields`
pub fn check_object_fields(value: &serde_json::Value, fields: &[&str]) -> UnitResult<()> {
    check_argument(value.is_object(), "argument is expected to be an object")?;
    for field in fields {
        if value.get(field).is_none() {
            return Err(UnitError::InvalidArgument(format!(
                "argument is missing the `{}` field",
                field
            )));
        }
    }
    Ok(())
}
