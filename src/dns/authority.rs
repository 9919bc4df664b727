//! Authoritative nameserver discovery.

use std::net::IpAddr;

use log::{info, warn};

use crate::dns::{DnsTransport, RecordKind, ResolverContext};
use crate::error_handling::{LookupError, SnapshotError};

/// Finds the nameservers authoritative for `canonical` and installs them.
///
/// NS records are asked for both the name itself and its registrable apex,
/// through the bootstrap resolver. This catches delegation at the
/// registrable-domain boundary (the common case) as well as delegated
/// subdomains. The union of both answers is resolved to A records and the
/// flattened address list becomes the context's active set.
///
/// # Arguments
///
/// * `ctx` - Resolver context; reset to the bootstrap resolver first
/// * `canonical` - The domain in canonical form
/// * `apex` - The registrable domain of `canonical`
///
/// # Returns
///
/// The installed nameserver addresses, ordered by candidate hostname and
/// then by answer order. Duplicate addresses are kept.
///
/// # Errors
///
/// - `SnapshotError::NoAuthorityFound` if neither name has NS records. Not
///   fatal: the context stays on the bootstrap resolver.
/// - `SnapshotError::NameserverUnresolvable` if a candidate hostname has no
///   A records or its lookup fails.
/// - `SnapshotError::Lookup` on transport failures of the NS queries.
pub async fn discover_authority<T: DnsTransport>(
    ctx: &mut ResolverContext<T>,
    canonical: &str,
    apex: &str,
) -> Result<Vec<IpAddr>, SnapshotError> {
    ctx.reset_to_bootstrap();

    let direct = lookup_nameservers(ctx, canonical).await?;
    if direct.is_empty() {
        info!("No direct NS found!");
    }

    let inherited = lookup_nameservers(ctx, apex).await?;
    if inherited.is_empty() {
        info!("No NS for registrable domain {apex} found!");
    }

    let mut candidates: Vec<String> = Vec::new();
    for host in direct.into_iter().chain(inherited) {
        if !candidates.contains(&host) {
            candidates.push(host);
        }
    }

    if candidates.is_empty() {
        return Err(SnapshotError::NoAuthorityFound {
            domain: canonical.to_string(),
        });
    }

    let mut addresses = Vec::new();
    for host in &candidates {
        let answers = ctx.lookup(host, RecordKind::A).await.map_err(|source| {
            SnapshotError::NameserverUnresolvable {
                host: host.clone(),
                source,
            }
        })?;
        for answer in answers {
            match answer.parse::<IpAddr>() {
                Ok(ip) => addresses.push(ip),
                Err(_) => warn!("Ignoring malformed A record {answer:?} for nameserver {host}"),
            }
        }
    }

    if addresses.is_empty() {
        // Every answer was malformed; report it against the first candidate
        return Err(SnapshotError::NameserverUnresolvable {
            host: candidates[0].clone(),
            source: LookupError::NoAnswer,
        });
    }

    ctx.install(addresses.clone());
    info!("NS found: {addresses:?}");
    Ok(addresses)
}

/// Queries NS records for `name`, treating both negative answers as "none".
///
/// Hostnames are returned without the trailing root dot.
async fn lookup_nameservers<T: DnsTransport>(
    ctx: &ResolverContext<T>,
    name: &str,
) -> Result<Vec<String>, SnapshotError> {
    match ctx.lookup(name, RecordKind::NS).await {
        Ok(hosts) => Ok(hosts
            .into_iter()
            .map(|host| host.trim_end_matches('.').to_string())
            .filter(|host| !host.is_empty())
            .collect()),
        Err(e) if e.is_negative() => Ok(Vec::new()),
        Err(source) => Err(SnapshotError::Lookup {
            name: name.to_string(),
            kind: RecordKind::NS,
            source,
        }),
    }
}
