//! Error types.
//!
//! Errors are split by how the caller reacts to them:
//! - **`LookupError`**: the outcome of a single DNS query. `NoAnswer` and
//!   `NameDoesNotExist` are expected and handled locally; `Transport` is not.
//! - **`SnapshotError`**: run-level failures. Everything except
//!   `NoAuthorityFound` aborts the run before a snapshot is written.
//! - **`InitializationError`**: logger setup failures in the binary.

mod types;

// Re-export public API
pub use types::{InitializationError, LookupError, SnapshotError};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::RecordKind;

    #[test]
    fn test_no_authority_found_is_not_fatal() {
        let err = SnapshotError::NoAuthorityFound {
            domain: "test.invalid".to_string(),
        };
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_lookup_failures_are_fatal() {
        let err = SnapshotError::Lookup {
            name: "example.com".to_string(),
            kind: RecordKind::MX,
            source: LookupError::Transport("request timed out".to_string()),
        };
        assert!(err.is_fatal());
        assert_eq!(
            err.to_string(),
            "MX lookup for example.com failed: DNS transport failure: request timed out"
        );
    }

    #[test]
    fn test_encoding_error_message_names_the_domain() {
        let err = SnapshotError::Encoding {
            domain: "bad domain".to_string(),
            reason: "invalid label".to_string(),
        };
        assert!(err.is_fatal());
        assert!(err.to_string().contains("bad domain"));
    }

    #[test]
    fn test_lookup_error_expected_outcomes() {
        assert!(LookupError::NoAnswer.is_negative());
        assert!(LookupError::NameDoesNotExist.is_negative());
        assert!(!LookupError::Transport("refused".to_string()).is_negative());
    }
}
