//! dns_snapshot library: DNS records straight from a domain's own nameservers
//!
//! This library discovers the nameservers that are authoritative for a domain,
//! gathers a fixed set of record types from them with ordered fallback when a
//! nameserver does not really serve the zone, and keeps the result as a
//! diff-stable JSON snapshot that is only rewritten when it changed.
//!
//! # Example
//!
//! ```no_run
//! use dns_snapshot::{run_snapshot, Config};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     domain: "example.com".to_string(),
//!     no_file: true,
//!     ..Default::default()
//! };
//!
//! let report = run_snapshot(&config).await?;
//! println!("{}", report.json);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Queries are awaited one after the
//! other; a current-thread runtime is all it needs.

#![warn(missing_docs)]

pub mod config;
pub mod dns;
pub mod domain;
pub mod error_handling;
pub mod initialization;
pub mod snapshot;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{LookupError, SnapshotError};
pub use run::{
    collect_snapshot, persist_snapshot, run_snapshot, run_snapshot_with, SnapshotReport,
};

// Internal run module (wires the pipeline stages together)
mod run {
    use std::net::IpAddr;
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use log::{info, warn};

    use crate::config::{Config, APEX_PREFIX};
    use crate::dns::{augment_dmarc, discover_authority, gather_records};
    use crate::dns::{DnsTransport, ResolverContext};
    use crate::domain::{is_apex, registrable_domain, subdomain_prefix, DomainName};
    use crate::error_handling::SnapshotError;
    use crate::initialization::{init_extractor, init_resolver};
    use crate::snapshot::{snapshot_changed, Snapshot, SnapshotStore};

    /// Results of a snapshot run.
    #[derive(Debug, Clone)]
    pub struct SnapshotReport {
        /// The inspected domain
        pub domain: DomainName,
        /// Gathered records and their prefix
        pub snapshot: Snapshot,
        /// The rendered snapshot document
        pub json: String,
        /// Nameservers still active at the end of the run
        pub nameservers: Vec<IpAddr>,
        /// Whether authoritative nameservers were found (otherwise the
        /// bootstrap resolver answered everything)
        pub authority_found: bool,
        /// Snapshot file location, unless persistence was skipped
        pub path: Option<PathBuf>,
        /// Whether the snapshot file was (re)written
        pub written: bool,
    }

    /// Runs the full pipeline for `config.domain`.
    ///
    /// Normalizes the domain, discovers its nameservers, gathers records,
    /// adds DMARC records for apex domains and, unless `config.no_file` is
    /// set, writes the snapshot when it differs from the stored one.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain cannot be encoded, a nameserver cannot
    /// be resolved, a query fails at the transport level, or the snapshot
    /// file cannot be read or written. Nothing is written in that case.
    pub async fn run_snapshot(config: &Config) -> Result<SnapshotReport> {
        run_snapshot_with(config, init_resolver(config)).await
    }

    /// Same as `run_snapshot`, over a caller-supplied resolver context.
    pub async fn run_snapshot_with<T: DnsTransport>(
        config: &Config,
        mut ctx: ResolverContext<T>,
    ) -> Result<SnapshotReport> {
        let domain = DomainName::parse(&config.domain)?;

        let (snapshot, authority_found) = collect_snapshot(&mut ctx, &domain)
            .await
            .with_context(|| format!("Failed to gather DNS records for {}", domain.display()))?;
        let json = snapshot.to_pretty_json()?;
        let (path, written) = persist_snapshot(config, &domain, &snapshot, &json)?;

        Ok(SnapshotReport {
            domain,
            snapshot,
            json,
            nameservers: ctx.active_servers().to_vec(),
            authority_found,
            path,
            written,
        })
    }

    /// Writes `json` to the snapshot store when it differs from the stored
    /// snapshot.
    ///
    /// # Returns
    ///
    /// The snapshot path (`None` when `config.no_file` is set) and whether the
    /// file was written.
    pub fn persist_snapshot(
        config: &Config,
        domain: &DomainName,
        snapshot: &Snapshot,
        json: &str,
    ) -> Result<(Option<PathBuf>, bool)> {
        if config.no_file {
            return Ok((None, false));
        }

        let store = SnapshotStore::new(&config.data_dir);
        let previous = store
            .load(domain.canonical())
            .context("Failed to read the previous snapshot")?;
        if !snapshot_changed(previous.as_ref(), snapshot)? {
            return Ok((Some(store.path_for(domain.canonical())), false));
        }

        if previous.is_some() {
            info!("Data difference occurred!");
        }
        let path = store
            .write(domain.canonical(), json)
            .context("Failed to write snapshot")?;
        Ok((Some(path), true))
    }

    /// Discovers, gathers and augments the records of one domain.
    ///
    /// Separate from `run_snapshot` so the pipeline can run against any
    /// `DnsTransport`.
    ///
    /// # Returns
    ///
    /// The snapshot and whether authoritative nameservers were found.
    pub async fn collect_snapshot<T: DnsTransport>(
        ctx: &mut ResolverContext<T>,
        domain: &DomainName,
    ) -> Result<(Snapshot, bool), SnapshotError> {
        let canonical = domain.canonical();
        let apex = registrable_domain(&init_extractor(), canonical);

        let authority_found = match discover_authority(ctx, canonical, &apex).await {
            Ok(_) => true,
            Err(e) if !e.is_fatal() => {
                warn!(
                    "No NS found for {}; querying {} instead",
                    domain.display(),
                    ctx.bootstrap()
                );
                false
            }
            Err(e) => return Err(e),
        };

        let mut records = gather_records(ctx, canonical).await?;

        let prefix = if is_apex(canonical, &apex) {
            augment_dmarc(ctx, domain, &mut records).await?;
            APEX_PREFIX.to_string()
        } else {
            subdomain_prefix(canonical, &apex)
        };
        info!("subdomainprefix: {prefix}");

        Ok((Snapshot { prefix, records }, authority_found))
    }
}
