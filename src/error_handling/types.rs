//! Error type definitions.

use std::path::PathBuf;

use log::SetLoggerError;
use thiserror::Error;

use crate::dns::RecordKind;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Outcome of a single DNS query that produced no usable answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The name exists but holds no records of the requested type.
    #[error("no records of the requested type")]
    NoAnswer,

    /// The queried nameserver says the name does not exist (NXDOMAIN).
    #[error("name does not exist")]
    NameDoesNotExist,

    /// Timeouts, SERVFAIL, refused queries and other network failures.
    #[error("DNS transport failure: {0}")]
    Transport(String),
}

impl LookupError {
    /// True for the two definitive negative answers a nameserver can give.
    pub fn is_negative(&self) -> bool {
        matches!(self, LookupError::NoAnswer | LookupError::NameDoesNotExist)
    }
}

/// Run-level errors.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// A label could not be converted to its ASCII-compatible form.
    #[error("Unable to convert domain '{domain}' to punycode: {reason}")]
    Encoding {
        /// Domain as entered by the user
        domain: String,
        /// Description of the failing label
        reason: String,
    },

    /// Neither the domain nor its registrable apex has NS records.
    #[error("No NS found for {domain}")]
    NoAuthorityFound {
        /// Canonical domain that was searched
        domain: String,
    },

    /// A discovered nameserver hostname has no usable A records.
    #[error("Failed to resolve nameserver {host}: {source}")]
    NameserverUnresolvable {
        /// Nameserver hostname from the NS answer
        host: String,
        /// Underlying lookup failure
        source: LookupError,
    },

    /// A query failed for a reason other than a definitive negative answer.
    #[error("{kind} lookup for {name} failed: {source}")]
    Lookup {
        /// Queried name
        name: String,
        /// Queried record type
        kind: RecordKind,
        /// Underlying lookup failure
        source: LookupError,
    },

    /// Reading or writing a snapshot file failed.
    #[error("Snapshot I/O error for {}: {source}", .path.display())]
    Io {
        /// Snapshot file or directory
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A snapshot document could not be parsed or rendered.
    #[error("Snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SnapshotError {
    /// Whether the run has to stop. Only a missing authority is recoverable.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SnapshotError::NoAuthorityFound { .. })
    }
}
