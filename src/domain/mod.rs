//! Domain name normalization and Public Suffix List helpers.
//!
//! This module turns user input into the canonical form used on the wire and
//! derives the pieces of a name that depend on the Public Suffix List (PSL):
//! - `DomainName::parse()` - Canonicalizes a display-form domain (IDNA)
//! - `registrable_domain()` - Finds the eTLD+1 apex of a canonical name
//! - `subdomain_prefix()` - Derives the snapshot key (`@` or the subdomain labels)

use log::info;
use psl::{List, Psl};

use crate::config::APEX_PREFIX;
use crate::error_handling::SnapshotError;

/// A domain in both its user-facing and its wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainName {
    display: String,
    canonical: String,
}

impl DomainName {
    /// Parses a human-entered domain and computes its canonical form.
    ///
    /// Emits a `punycode-converted` notice when the two forms differ.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Encoding` if any label cannot be made
    /// ASCII-compatible. The run must be aborted in that case.
    pub fn parse(input: &str) -> Result<Self, SnapshotError> {
        let display = input.trim().to_string();
        let canonical = to_canonical(&display)?;
        if canonical != display {
            info!("punycode-converted: {display} to {canonical}");
        }
        Ok(Self { display, canonical })
    }

    /// The domain as the user typed it, for messages only.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The ASCII-compatible form used for every query and for file names.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Name of the DMARC policy record for this domain (`_dmarc.<canonical>`).
    pub fn dmarc_name(&self) -> String {
        format!("{}.{}", crate::config::DMARC_LABEL, self.canonical)
    }
}

/// Converts a display-form domain into its canonical ASCII-compatible form.
///
/// Labels containing an underscore (`_dmarc`, `_sip`, ...) are structural and
/// not valid IDNA input, so they are passed through unchanged. Every other
/// label goes through UTS #46 processing with STD3 rules. A single trailing
/// root dot is accepted and dropped.
///
/// # Errors
///
/// Returns `SnapshotError::Encoding` for empty names, empty labels and labels
/// that IDNA rejects.
pub fn to_canonical(domain: &str) -> Result<String, SnapshotError> {
    let trimmed = domain.trim();
    let name = trimmed.strip_suffix('.').unwrap_or(trimmed);
    let encoding_error = |reason: String| SnapshotError::Encoding {
        domain: domain.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(encoding_error("empty domain".to_string()));
    }

    let mut labels = Vec::new();
    for label in name.split('.') {
        if label.is_empty() {
            return Err(encoding_error("empty label".to_string()));
        }
        if label.contains('_') {
            labels.push(label.to_string());
            continue;
        }
        let encoded = idna::domain_to_ascii_strict(label)
            .map_err(|e| encoding_error(format!("label '{label}': {e}")))?;
        labels.push(encoded);
    }

    Ok(labels.join("."))
}

/// Returns the registrable domain (eTLD+1) of a canonical name.
///
/// Names whose suffix is not on the list fall under the PSL default rule, so
/// `test.invalid` is its own registrable domain. A name that is itself a
/// public suffix has no eTLD+1 and is returned unchanged.
///
/// # Arguments
///
/// * `list` - The Public Suffix List instance
/// * `canonical` - A name already in canonical form
pub fn registrable_domain(list: &List, canonical: &str) -> String {
    match list.domain(canonical.as_bytes()) {
        Some(domain) => String::from_utf8_lossy(domain.as_bytes()).to_string(),
        None => canonical.to_string(),
    }
}

/// True when `canonical` is its own registrable domain.
pub fn is_apex(canonical: &str, apex: &str) -> bool {
    canonical.eq_ignore_ascii_case(apex)
}

/// Derives the snapshot grouping key for `canonical`.
///
/// An apex maps to `@`; a subdomain maps to its labels left of the apex
/// (`www.example.com` under `example.com` gives `www`).
pub fn subdomain_prefix(canonical: &str, apex: &str) -> String {
    if is_apex(canonical, apex) {
        return APEX_PREFIX.to_string();
    }
    canonical
        .strip_suffix(apex)
        .and_then(|rest| rest.strip_suffix('.'))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(canonical)
        .to_string()
}
