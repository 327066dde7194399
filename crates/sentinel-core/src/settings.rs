use clap::Parser;
use std::path::PathBuf;

use crate::models::EngineConfig;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Per-client DNS query feature extraction for exfiltration triage
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dns-sentinel",
    about = "Per-client DNS query feature extraction for exfiltration triage",
    version
)]
pub struct Settings {
    /// Run mode: analyze an existing log, or generate a synthetic one
    #[arg(long, default_value = "analyze", value_parser = ["analyze", "simulate"])]
    pub mode: String,

    /// Query log to analyze (CSV with header)
    #[arg(long, default_value = "queries_export.csv")]
    pub input: PathBuf,

    /// Output path for the generated log in simulate mode
    #[arg(long, default_value = "queries_export.csv")]
    pub output: PathBuf,

    /// Number of synthetic records generated in simulate mode
    #[arg(long, default_value = "500")]
    pub samples: usize,

    /// Report format
    #[arg(long, default_value = "table", value_parser = ["table", "json"])]
    pub format: String,

    /// Response code counted as NXDOMAIN
    #[arg(long, default_value = "3")]
    pub nxdomain_rcode: i64,

    /// Drop query names shorter than this during analysis (0 disables)
    #[arg(long, default_value = "0")]
    pub min_qname_len: usize,

    /// Drop localhost / .local / loopback records during analysis
    #[arg(long)]
    pub drop_local: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,
}

impl Settings {
    /// Engine configuration derived from the policy flags.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            nxdomain_rcode: self.nxdomain_rcode,
            min_qname_len: self.min_qname_len,
            drop_local: self.drop_local,
        }
    }
}
