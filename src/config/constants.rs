//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including DNS timeouts, resolver defaults and snapshot layout parameters.

use std::net::{IpAddr, Ipv4Addr};

// Network operation timeouts
/// DNS query timeout in seconds
/// Authoritative servers usually answer well below a second; 3s keeps a dead
/// nameserver from stalling the sequential run for long.
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// Attempts per nameserver before hickory gives up on it
pub const DNS_ATTEMPTS: usize = 2;
/// Port used for every plain-text DNS query
pub const DNS_PORT: u16 = 53;

/// Upstream resolver used for nameserver discovery, and for every query when
/// no authoritative nameserver can be found.
pub const DEFAULT_BOOTSTRAP_RESOLVER: IpAddr = IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8));

/// Directory holding one `<canonical-domain>.json` snapshot per domain
pub const DEFAULT_DATA_DIR: &str = "data";

/// Label prefixed to an apex domain to look up its DMARC policy
pub const DMARC_LABEL: &str = "_dmarc";
/// Snapshot key used when the queried name is its own registrable domain
pub const APEX_PREFIX: &str = "@";
/// Indentation of the persisted JSON (kept stable for version-control diffs)
pub const SNAPSHOT_INDENT: &[u8] = b"    ";
