//! Utility functions for the units library
//!
//! Provides the argument precondition helpers used by the factories
//! and the tracing subscriber setup used by binaries.

pub mod logging;
pub mod precondition;
