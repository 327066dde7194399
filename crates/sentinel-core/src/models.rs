use serde::{Deserialize, Serialize};

/// Response code counted as NXDOMAIN unless overridden.
pub const DEFAULT_NXDOMAIN_RCODE: i64 = 3;

/// Knobs that were hard-coded policy in the original collector, exposed as
/// configuration so callers can tune them per deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// DNS response code treated as NXDOMAIN. No other code is special-cased.
    pub nxdomain_rcode: i64,
    /// Query names shorter than this are dropped by the noise filter.
    /// `0` disables the length check.
    pub min_qname_len: usize,
    /// When set, drop localhost / `.local` / loopback records at ingestion.
    pub drop_local: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            nxdomain_rcode: DEFAULT_NXDOMAIN_RCODE,
            min_qname_len: 0,
            drop_local: false,
        }
    }
}

/// One observed DNS query, as delivered by the query source.
///
/// The core computation consumes `timestamp`, `client_id`, `query_name` and
/// `response_code`; the remaining columns are carried so a record set can be
/// exported back out unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRecord {
    /// Observation time in epoch seconds.
    pub timestamp: f64,
    /// Identity of the client that issued the query (source address).
    pub client_id: String,
    /// Source port of the query.
    #[serde(default)]
    pub client_port: u16,
    /// Fully-qualified query name, possibly with a trailing root dot.
    pub query_name: String,
    /// Query type mnemonic (`A`, `TXT`, ...), unused by the core.
    #[serde(default)]
    pub query_type: String,
    /// DNS response code.
    pub response_code: i64,
    /// Number of answer records in the response, unused by the core.
    #[serde(default)]
    pub answer_count: u32,
    /// Raw payload length in bytes, unused by the core.
    #[serde(default)]
    pub raw_len: u32,
}

// ── ClientAccumulator ─────────────────────────────────────────────────────────

/// Mutable per-client state built up during one ingestion pass.
///
/// Created lazily on the first record for a new client, updated for every
/// following record, and converted into an immutable [`ClientSample`] via
/// [`ClientAccumulator::freeze`] once ingestion completes. Nothing downstream
/// ever sees the mutable form.
#[derive(Debug, Clone)]
pub struct ClientAccumulator {
    client_id: String,
    query_count: u64,
    first_timestamp: f64,
    last_timestamp: f64,
    subdomain_lengths: Vec<usize>,
    subdomains: Vec<String>,
    nxdomain_count: u64,
}

impl ClientAccumulator {
    /// Fresh accumulator for `client_id`.
    ///
    /// Timestamps start at the infinities so any real timestamp overwrites
    /// them; a client with exactly one query ends up with `first == last`.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            query_count: 0,
            first_timestamp: f64::INFINITY,
            last_timestamp: f64::NEG_INFINITY,
            subdomain_lengths: Vec::new(),
            subdomains: Vec::new(),
            nxdomain_count: 0,
        }
    }

    /// Fold one record into the running state.
    ///
    /// `subdomain` is the label sequence already extracted from the query
    /// name; an empty subdomain contributes nothing to the length/entropy
    /// series but still counts as a query.
    pub fn observe(&mut self, timestamp: f64, subdomain: &str, is_nxdomain: bool) {
        self.query_count += 1;
        self.first_timestamp = self.first_timestamp.min(timestamp);
        self.last_timestamp = self.last_timestamp.max(timestamp);
        if !subdomain.is_empty() {
            self.subdomain_lengths.push(subdomain.len());
            self.subdomains.push(subdomain.to_string());
        }
        if is_nxdomain {
            self.nxdomain_count += 1;
        }
    }

    /// Freeze into the read-only sample used by all downstream computation.
    pub fn freeze(self) -> ClientSample {
        ClientSample {
            client_id: self.client_id,
            query_count: self.query_count,
            first_timestamp: self.first_timestamp,
            last_timestamp: self.last_timestamp,
            subdomain_lengths: self.subdomain_lengths,
            subdomains: self.subdomains,
            nxdomain_count: self.nxdomain_count,
        }
    }
}

// ── ClientSample ──────────────────────────────────────────────────────────────

/// Finalized, read-only per-client observation set.
#[derive(Debug, Clone)]
pub struct ClientSample {
    /// Grouping key, unique per sample.
    pub client_id: String,
    /// Total queries observed for this client.
    pub query_count: u64,
    /// Earliest observed timestamp (epoch seconds).
    pub first_timestamp: f64,
    /// Latest observed timestamp (epoch seconds).
    pub last_timestamp: f64,
    /// One entry per record with a non-empty subdomain, in arrival order.
    pub subdomain_lengths: Vec<usize>,
    /// Raw subdomain text, parallel to `subdomain_lengths`.
    pub subdomains: Vec<String>,
    /// Queries answered with the configured NXDOMAIN code.
    pub nxdomain_count: u64,
}

impl ClientSample {
    /// Width of the observation window in seconds.
    ///
    /// Exactly `0.0` for a single-query client; meaningless (negative
    /// infinity spread) only for the never-observed case, which ingestion
    /// cannot produce.
    pub fn time_window(&self) -> f64 {
        self.last_timestamp - self.first_timestamp
    }
}

// ── Derived values ────────────────────────────────────────────────────────────

/// Behavioral feature vector for one client, derived purely from its
/// finalized [`ClientSample`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientFeatures {
    /// Client identity.
    pub client_id: String,
    /// Queries per minute over the client's observation window; `0.0` when
    /// the window is too narrow to normalize against.
    pub query_rate_per_minute: f64,
    /// Mean length of the client's extracted subdomains.
    pub avg_subdomain_length: f64,
    /// Longest extracted subdomain.
    pub max_subdomain_length: usize,
    /// Mean Shannon entropy of the client's subdomains, in bits.
    pub avg_entropy_bits: f64,
    /// NXDOMAIN responses as a percentage of total queries.
    pub nxdomain_pct: f64,
    /// Absolute NXDOMAIN count.
    pub nxdomain_count: u64,
    /// Total queries observed.
    pub total_queries: u64,
}

/// Min / median / max of the per-client query-rate distribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateStats {
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

/// Mean / max over the union of every client's subdomain lengths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LengthStats {
    pub mean: f64,
    pub max: usize,
}

/// Mean / max over the union of every client's per-subdomain entropies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntropyStats {
    pub mean: f64,
    pub max: f64,
}

/// Corpus-wide reduction over all clients, one per analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusSummary {
    /// Number of distinct clients.
    pub total_clients: usize,
    /// Sum of `total_queries` over all clients.
    pub total_queries: u64,
    /// Sum of `nxdomain_count` over all clients.
    pub total_nxdomain: u64,
    /// Mean queries per client.
    pub avg_queries_per_client: f64,
    /// Distribution of per-client query rates.
    pub query_rate: RateStats,
    /// Distribution over all subdomain lengths, not per-client averages.
    pub subdomain_length: LengthStats,
    /// Distribution over all per-subdomain entropies.
    pub entropy: EntropyStats,
    /// `total_nxdomain / total_queries × 100`, `0.0` with no queries.
    pub overall_nxdomain_pct: f64,
}
