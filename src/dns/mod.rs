//! DNS resolution against a domain's own nameservers.
//!
//! This module provides the resolution pipeline:
//! - Authoritative nameserver discovery (NS for the name and its apex)
//! - Record gathering with ordered fallback across nameservers
//! - DMARC augmentation for apex domains
//!
//! All queries go through a `ResolverContext`, created once per run, whose
//! active nameserver list shrinks as nameservers prove unresponsive.

mod authority;
mod context;
mod dmarc;
mod gather;
mod records;
mod transport;

// Re-export public API
pub use authority::discover_authority;
pub use context::ResolverContext;
pub use dmarc::augment_dmarc;
pub use gather::{gather_records, query_with_fallback};
pub use records::{RecordKind, ResolutionResult, DMARC_KINDS};
pub use transport::{DnsTransport, HickoryTransport};
