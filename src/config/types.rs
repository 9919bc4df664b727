//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_BOOTSTRAP_RESOLVER, DEFAULT_DATA_DIR, DNS_TIMEOUT_SECS};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: `#`-prefixed human-readable lines with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options for the `dns_snapshot` binary.
#[derive(Debug, Parser)]
#[command(
    name = "dns_snapshot",
    about = "Get DNS information for a domain name from its authoritative nameservers"
)]
pub struct Opt {
    /// The domain name you want to inspect
    #[arg(short, long)]
    pub domain: String,

    /// Do not write the result to <data-dir>/<domain>.json
    #[arg(short, long)]
    pub nofile: bool,

    /// Do not print notices and warnings
    #[arg(short, long)]
    pub quiet: bool,

    /// Directory holding the JSON snapshots
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Upstream resolver used to discover the authoritative nameservers
    #[arg(long, default_value_t = DEFAULT_BOOTSTRAP_RESOLVER)]
    pub bootstrap: IpAddr,

    /// Per-query DNS timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use dns_snapshot::Config;
///
/// let config = Config {
///     domain: "example.com".to_string(),
///     no_file: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Domain to inspect, in display form
    pub domain: String,

    /// Skip reading and writing the snapshot file
    pub no_file: bool,

    /// Suppress notices and warnings.
    ///
    /// The library logs through the `log` facade and never reads this flag;
    /// it takes effect through `effective_log_level` when the logger is set
    /// up, as the `dns_snapshot` binary does.
    pub quiet: bool,

    /// Directory holding the JSON snapshots
    pub data_dir: PathBuf,

    /// Upstream resolver used before the authoritative set is installed
    pub bootstrap: IpAddr,

    /// Per-query DNS timeout in seconds
    pub timeout_seconds: u64,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Config {
    /// Level the logger should actually run at.
    ///
    /// Quiet mode caps output at errors no matter what `log_level` says.
    pub fn effective_log_level(&self) -> log::LevelFilter {
        let level = log::LevelFilter::from(self.log_level.clone());
        if self.quiet {
            level.min(log::LevelFilter::Error)
        } else {
            level
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: String::new(),
            no_file: false,
            quiet: false,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            bootstrap: DEFAULT_BOOTSTRAP_RESOLVER,
            timeout_seconds: DNS_TIMEOUT_SECS,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            domain: opt.domain,
            no_file: opt.nofile,
            quiet: opt.quiet,
            data_dir: opt.data_dir,
            bootstrap: opt.bootstrap,
            timeout_seconds: opt.timeout_seconds,
            log_level: opt.log_level,
            log_format: opt.log_format,
        }
    }
}
