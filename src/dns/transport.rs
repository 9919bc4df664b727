//! Network access for DNS queries.
//!
//! `DnsTransport` is the seam between the resolution algorithm and the wire.
//! `HickoryTransport` is the production implementation; tests plug in
//! scripted transports instead.

use std::future::Future;
use std::net::IpAddr;

use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::{Name, RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

use crate::config::DNS_PORT;
use crate::dns::RecordKind;
use crate::error_handling::LookupError;

/// Sends one query to an ordered list of nameservers.
///
/// Implementations try `servers` in the given order and report the first
/// definitive answer. A negative answer from a server is final for that
/// query; it is up to the caller to drop the server and ask again.
pub trait DnsTransport {
    /// Queries `name` for records of `kind`.
    ///
    /// # Returns
    ///
    /// The textual record values in server response order. An empty answer is
    /// reported as `LookupError::NoAnswer`, never as `Ok(vec![])`.
    fn query(
        &self,
        servers: &[IpAddr],
        name: &str,
        kind: RecordKind,
    ) -> impl Future<Output = Result<Vec<String>, LookupError>>;
}

impl From<RecordKind> for RecordType {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::A => RecordType::A,
            RecordKind::AAAA => RecordType::AAAA,
            RecordKind::CAA => RecordType::CAA,
            RecordKind::CNAME => RecordType::CNAME,
            RecordKind::MX => RecordType::MX,
            RecordKind::SRV => RecordType::SRV,
            RecordKind::PTR => RecordType::PTR,
            RecordKind::SOA => RecordType::SOA,
            RecordKind::TXT => RecordType::TXT,
            RecordKind::NS => RecordType::NS,
        }
    }
}

/// `DnsTransport` backed by `hickory-resolver`.
///
/// A fresh resolver is built for every query from the server list it is
/// handed, so nothing is cached between queries and a dropped nameserver is
/// never contacted again.
#[derive(Debug, Clone)]
pub struct HickoryTransport {
    opts: ResolverOpts,
}

impl HickoryTransport {
    /// Creates a transport that applies `opts` to every query.
    pub fn new(opts: ResolverOpts) -> Self {
        Self { opts }
    }
}

impl DnsTransport for HickoryTransport {
    async fn query(
        &self,
        servers: &[IpAddr],
        name: &str,
        kind: RecordKind,
    ) -> Result<Vec<String>, LookupError> {
        if servers.is_empty() {
            return Err(LookupError::Transport(
                "no nameservers configured".to_string(),
            ));
        }

        // Canonical names are already ASCII; from_ascii keeps `_dmarc` labels intact
        let fqdn = Name::from_ascii(format!("{name}."))
            .map_err(|e| LookupError::Transport(format!("invalid name {name}: {e}")))?;

        let config = ResolverConfig::from_parts(
            None,
            vec![],
            NameServerConfigGroup::from_ips_clear(servers, DNS_PORT, true),
        );
        let resolver = TokioAsyncResolver::tokio(config, self.opts.clone());

        let record_type = RecordType::from(kind);
        match resolver.lookup(fqdn, record_type).await {
            Ok(lookup) => {
                // Answers may carry the CNAME chain; keep only the requested type
                let values: Vec<String> = lookup
                    .record_iter()
                    .filter(|record| record.record_type() == record_type)
                    .filter_map(|record| record.data())
                    .map(format_rdata)
                    .collect();
                if values.is_empty() {
                    Err(LookupError::NoAnswer)
                } else {
                    Ok(values)
                }
            }
            Err(e) => {
                let err = classify_resolve_error(&e);
                if let LookupError::Transport(_) = err {
                    log::debug!("{kind} lookup for {name} via {servers:?} failed: {e}");
                }
                Err(err)
            }
        }
    }
}

/// Renders a record value in presentation format.
///
/// TXT records can contain multiple strings; they are joined without a
/// separator so a long SPF or DKIM value reads as one string.
pub(crate) fn format_rdata(rdata: &RData) -> String {
    match rdata {
        RData::TXT(txt) => txt
            .iter()
            .map(|bytes| String::from_utf8_lossy(bytes).to_string())
            .collect::<Vec<String>>()
            .join(""),
        other => other.to_string(),
    }
}

/// Maps a hickory error onto the three outcomes the algorithm distinguishes.
fn classify_resolve_error(err: &ResolveError) -> LookupError {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => match *response_code {
            ResponseCode::NXDomain => LookupError::NameDoesNotExist,
            ResponseCode::NoError => LookupError::NoAnswer,
            _ => LookupError::Transport(err.to_string()),
        },
        _ => LookupError::Transport(err.to_string()),
    }
}
