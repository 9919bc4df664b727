//! Record types and the per-domain resolution result.

use std::collections::BTreeMap;

use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// Record types gathered for every domain, in query order.
///
/// The declaration order is the iteration order of `RecordKind::iter()` and
/// therefore the order in which the gatherer queries (and may drop
/// nameservers).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, EnumIter,
)]
#[allow(clippy::upper_case_acronyms)]
pub enum RecordKind {
    /// IPv4 address
    A,
    /// IPv6 address
    AAAA,
    /// Certification authority authorization
    CAA,
    /// Canonical name (alias)
    CNAME,
    /// Mail exchanger
    MX,
    /// Service locator
    SRV,
    /// Domain name pointer
    PTR,
    /// Start of authority
    SOA,
    /// Text
    TXT,
    /// Authoritative nameserver
    NS,
}

/// Record types looked up under `_dmarc.<apex>`.
pub const DMARC_KINDS: [RecordKind; 2] = [RecordKind::CNAME, RecordKind::TXT];

/// Answers gathered for one name.
///
/// Serializes as a flat object keyed by record type, with the DMARC answers
/// nested under `_dmarc`:
///
/// ```json
/// { "A": ["192.0.2.1"], "TXT": ["v=spf1 -all"], "_dmarc": { "TXT": ["v=DMARC1; p=reject"] } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    /// Values per record type, in server response order
    #[serde(flatten)]
    pub records: BTreeMap<RecordKind, Vec<String>>,

    /// Values found under `_dmarc.<apex>`
    #[serde(rename = "_dmarc", skip_serializing_if = "BTreeMap::is_empty")]
    pub dmarc: BTreeMap<RecordKind, Vec<String>>,
}

impl ResolutionResult {
    /// True when neither the main mapping nor the DMARC mapping holds anything.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.dmarc.is_empty()
    }

    /// Values stored for `kind`, if the type produced any answer.
    pub fn get(&self, kind: RecordKind) -> Option<&[String]> {
        self.records.get(&kind).map(Vec::as_slice)
    }
}
