//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, resolver defaults, snapshot layout)
//! - CLI option types and parsing
//! - The library `Config` struct

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, Opt};
