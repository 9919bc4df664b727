//! Per-run resolver state.

use std::net::IpAddr;

use log::debug;

use crate::dns::{DnsTransport, RecordKind};
use crate::error_handling::LookupError;

/// The resolver of a single run: one transport plus the ordered list of
/// nameservers every query goes to.
///
/// The active list starts as the bootstrap resolver, is replaced once by the
/// authoritative set, and afterwards only shrinks from the front. It never
/// becomes empty.
#[derive(Debug)]
pub struct ResolverContext<T> {
    transport: T,
    bootstrap: IpAddr,
    active: Vec<IpAddr>,
}

impl<T: DnsTransport> ResolverContext<T> {
    /// Creates a context whose active set is the bootstrap resolver alone.
    pub fn new(transport: T, bootstrap: IpAddr) -> Self {
        Self {
            transport,
            bootstrap,
            active: vec![bootstrap],
        }
    }

    /// Nameservers the next query will be sent to, in order.
    pub fn active_servers(&self) -> &[IpAddr] {
        &self.active
    }

    /// The upstream resolver used before (or instead of) the authoritative set.
    pub fn bootstrap(&self) -> IpAddr {
        self.bootstrap
    }

    /// The transport queries are sent through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Points the context back at the bootstrap resolver.
    pub fn reset_to_bootstrap(&mut self) {
        self.active = vec![self.bootstrap];
    }

    /// Replaces the active set. An empty list is ignored.
    pub fn install(&mut self, servers: Vec<IpAddr>) {
        if servers.is_empty() {
            return;
        }
        self.active = servers;
    }

    /// Removes the current (first) nameserver if another one remains behind it.
    ///
    /// # Returns
    ///
    /// The removed address, or `None` when only one server is left.
    pub fn drop_current(&mut self) -> Option<IpAddr> {
        if self.active.len() > 1 {
            Some(self.active.remove(0))
        } else {
            None
        }
    }

    /// Sends one query to the active set.
    pub async fn lookup(&self, name: &str, kind: RecordKind) -> Result<Vec<String>, LookupError> {
        debug!("Querying {kind} for {name} via {:?}", self.active);
        self.transport.query(&self.active, name, kind).await
    }
}
