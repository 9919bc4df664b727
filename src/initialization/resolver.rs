//! DNS resolver initialization.
//!
//! This module builds the resolver context a run queries through, with
//! timeouts and ordering suited to talking to authoritative servers one at a
//! time.

use std::time::Duration;

use hickory_resolver::config::{ResolverOpts, ServerOrderingStrategy};

use crate::config::{Config, DNS_ATTEMPTS};
use crate::dns::{HickoryTransport, ResolverContext};

/// Resolver options applied to every query.
///
/// - Servers are contacted strictly in list order and one at a time, so the
///   first server in the context really is the one that answered.
/// - `ndots = 0` keeps search domains from being appended.
///
/// # Arguments
///
/// * `timeout` - Per-query timeout
pub fn resolver_opts(timeout: Duration) -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = DNS_ATTEMPTS;
    opts.ndots = 0;
    opts.num_concurrent_reqs = 1;
    opts.server_ordering_strategy = ServerOrderingStrategy::UserProvidedOrder;
    opts
}

/// Initializes the resolver context for a run.
///
/// The context starts out pointed at `config.bootstrap`; authority discovery
/// later swaps in the domain's own nameservers.
///
/// # Returns
///
/// A `ResolverContext` using the hickory transport.
pub fn init_resolver(config: &Config) -> ResolverContext<HickoryTransport> {
    let opts = resolver_opts(Duration::from_secs(config.timeout_seconds));
    ResolverContext::new(HickoryTransport::new(opts), config.bootstrap)
}
