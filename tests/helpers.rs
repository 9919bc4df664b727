// Shared test helpers: a scripted DNS network and a log capture.
//
// Used by several test files; each pulls this in with `mod helpers;`.

#![allow(dead_code)] // Not every test file uses every helper

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::sync::{Mutex, Once};
use std::thread::{self, ThreadId};

use log::{Level, LevelFilter, Log, Metadata, Record};

use dns_snapshot::dns::{DnsTransport, RecordKind};
use dns_snapshot::LookupError;

pub const BOOTSTRAP: &str = "8.8.8.8";

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

/// Zone data keyed by (server, name, type). Anything unscripted is NXDOMAIN.
#[derive(Default)]
pub struct FakeNetwork {
    zone: HashMap<(IpAddr, String, RecordKind), Vec<String>>,
    unreachable: HashSet<(IpAddr, String, RecordKind)>,
    pub servers_asked: RefCell<Vec<IpAddr>>,
}

impl FakeNetwork {
    pub fn with(mut self, server: &str, name: &str, kind: RecordKind, values: &[&str]) -> Self {
        self.zone.insert(
            (ip(server), name.to_string(), kind),
            values.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    /// Makes this query time out instead of answering.
    pub fn timing_out(mut self, server: &str, name: &str, kind: RecordKind) -> Self {
        self.unreachable.insert((ip(server), name.to_string(), kind));
        self
    }
}

impl DnsTransport for FakeNetwork {
    async fn query(
        &self,
        servers: &[IpAddr],
        name: &str,
        kind: RecordKind,
    ) -> Result<Vec<String>, LookupError> {
        let first = servers[0];
        self.servers_asked.borrow_mut().push(first);
        let key = (first, name.to_string(), kind);
        if self.unreachable.contains(&key) {
            return Err(LookupError::Transport("request timed out".to_string()));
        }
        self.zone
            .get(&key)
            .cloned()
            .ok_or(LookupError::NameDoesNotExist)
    }
}

/// Records every log line together with the thread that emitted it, so
/// tests running in parallel only see their own lines.
struct CaptureLogger {
    lines: Mutex<Vec<(ThreadId, Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((thread::current().id(), record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static CAPTURE: CaptureLogger = CaptureLogger {
    lines: Mutex::new(Vec::new()),
};
static INSTALL: Once = Once::new();

/// Installs the capturing logger for this test binary with `max_level`.
///
/// Only the first call sets the level; a test binary should stick to one.
pub fn capture_logs(max_level: LevelFilter) {
    INSTALL.call_once(|| {
        log::set_logger(&CAPTURE).expect("another logger is already installed");
        log::set_max_level(max_level);
    });
}

/// Log lines emitted so far by the current thread.
pub fn logs_on_this_thread() -> Vec<(Level, String)> {
    let me = thread::current().id();
    CAPTURE
        .lines
        .lock()
        .unwrap()
        .iter()
        .filter(|(thread, _, _)| *thread == me)
        .map(|(_, level, line)| (*level, line.clone()))
        .collect()
}

/// True if the current thread logged a line at `level` containing `needle`.
pub fn logged(level: Level, needle: &str) -> bool {
    logs_on_this_thread()
        .iter()
        .any(|(l, line)| *l == level && line.contains(needle))
}
