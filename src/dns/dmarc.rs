//! DMARC augmentation for apex domains.

use log::info;

use crate::dns::{DnsTransport, ResolutionResult, ResolverContext, DMARC_KINDS};
use crate::domain::DomainName;
use crate::error_handling::SnapshotError;

/// Adds the CNAME and TXT records found under `_dmarc.<domain>` to `result`.
///
/// Only meaningful for apex domains; the caller decides. Each type is looked
/// up independently and a negative answer only produces a notice. Entries
/// already present in `result.dmarc` are kept as they are.
///
/// # Errors
///
/// Returns `SnapshotError::Lookup` on transport failures.
pub async fn augment_dmarc<T: DnsTransport>(
    ctx: &ResolverContext<T>,
    domain: &DomainName,
    result: &mut ResolutionResult,
) -> Result<(), SnapshotError> {
    let name = domain.dmarc_name();
    for kind in DMARC_KINDS {
        match ctx.lookup(&name, kind).await {
            Ok(values) => {
                result.dmarc.entry(kind).or_insert(values);
            }
            Err(e) if e.is_negative() => {
                info!(
                    "no dmarc-{}-info for {} found.",
                    kind.to_string().to_lowercase(),
                    domain.display()
                );
            }
            Err(source) => {
                return Err(SnapshotError::Lookup {
                    name: name.clone(),
                    kind,
                    source,
                })
            }
        }
    }
    Ok(())
}
