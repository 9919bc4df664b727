//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources of a run:
//! - Logger
//! - DNS resolver context
//! - Public Suffix List

mod logger;
mod resolver;

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::{init_resolver, resolver_opts};

/// Initializes the Public Suffix List extractor.
///
/// # Returns
///
/// A `psl::List` backed by the list compiled into the `psl` crate.
pub fn init_extractor() -> psl::List {
    psl::List
}
