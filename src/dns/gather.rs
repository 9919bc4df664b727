//! Record gathering with ordered nameserver fallback.

use log::info;
use strum::IntoEnumIterator;

use crate::dns::{DnsTransport, RecordKind, ResolutionResult, ResolverContext};
use crate::error_handling::{LookupError, SnapshotError};

/// Queries every `RecordKind` for `canonical` against the active nameservers.
///
/// A "does not exist" answer is taken as a sign that the current nameserver
/// does not really serve the zone: it is dropped from the context for the
/// rest of the run and the query is repeated against the remaining list (see
/// `query_with_fallback`). Types without answers are left out of the result.
///
/// If the whole pass produced nothing while more than one nameserver is
/// still active, one more nameserver is dropped and the full pass runs once
/// more.
///
/// # Errors
///
/// Returns `SnapshotError::Lookup` when a query fails for a reason other
/// than a definitive negative answer.
pub async fn gather_records<T: DnsTransport>(
    ctx: &mut ResolverContext<T>,
    canonical: &str,
) -> Result<ResolutionResult, SnapshotError> {
    let mut result = ResolutionResult::default();
    gather_pass(ctx, canonical, &mut result).await?;

    if result.records.is_empty() && ctx.active_servers().len() > 1 {
        if let Some(removed) = ctx.drop_current() {
            info!(
                "Nothing resolved for {canonical}; removed {removed} and retrying with {:?}",
                ctx.active_servers()
            );
        }
        gather_pass(ctx, canonical, &mut result).await?;
    }

    Ok(result)
}

async fn gather_pass<T: DnsTransport>(
    ctx: &mut ResolverContext<T>,
    canonical: &str,
    result: &mut ResolutionResult,
) -> Result<(), SnapshotError> {
    for kind in RecordKind::iter() {
        if let Some(values) = query_with_fallback(ctx, canonical, kind).await? {
            result.records.insert(kind, values);
        }
    }
    Ok(())
}

/// Runs one query, dropping nameservers from the front while they answer
/// NXDOMAIN.
///
/// Each retry goes to the whole reduced list, not to a single host. The loop
/// ends on the first answer, on a NoAnswer, or when only one nameserver is
/// left.
///
/// # Returns
///
/// `Some(values)` on an answer, `None` when the type stays absent.
pub async fn query_with_fallback<T: DnsTransport>(
    ctx: &mut ResolverContext<T>,
    name: &str,
    kind: RecordKind,
) -> Result<Option<Vec<String>>, SnapshotError> {
    let lookup_failed = |source: LookupError| SnapshotError::Lookup {
        name: name.to_string(),
        kind,
        source,
    };

    match ctx.lookup(name, kind).await {
        Ok(values) => return Ok(Some(values)),
        Err(LookupError::NoAnswer) => return Ok(None),
        Err(LookupError::NameDoesNotExist) => {}
        Err(source) => return Err(lookup_failed(source)),
    }

    if let Some(current) = ctx.active_servers().first() {
        info!("No resolving answer from {current}");
    }

    while let Some(removed) = ctx.drop_current() {
        info!(
            "Removed non-answering {removed} from list and fallback to {:?}",
            ctx.active_servers()
        );
        match ctx.lookup(name, kind).await {
            Ok(values) => return Ok(Some(values)),
            Err(LookupError::NoAnswer) => return Ok(None),
            Err(LookupError::NameDoesNotExist) => continue,
            Err(source) => return Err(lookup_failed(source)),
        }
    }

    Ok(None)
}
