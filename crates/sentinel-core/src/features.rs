//! Per-client feature computation.
//!
//! Every feature is a pure function of a finalized [`ClientSample`]; there is
//! no cross-client dependency and no ordering dependency between features.

use crate::entropy::shannon_entropy;
use crate::models::{ClientFeatures, ClientSample};

/// Observation windows at or below this width (seconds) yield a rate of 0.0.
///
/// A single query, or a burst recorded within clock resolution, would
/// otherwise divide by a near-zero window and report an absurd rate.
pub const MIN_RATE_WINDOW_SECS: f64 = 0.1;

/// Stateless collection of per-client feature calculations.
pub struct FeatureCalculator;

impl FeatureCalculator {
    /// Derive the full feature vector for one client.
    pub fn compute(sample: &ClientSample) -> ClientFeatures {
        ClientFeatures {
            client_id: sample.client_id.clone(),
            query_rate_per_minute: Self::query_rate_per_minute(sample),
            avg_subdomain_length: Self::avg_subdomain_length(sample),
            max_subdomain_length: Self::max_subdomain_length(sample),
            avg_entropy_bits: Self::avg_entropy_bits(sample),
            nxdomain_pct: Self::nxdomain_pct(sample),
            nxdomain_count: sample.nxdomain_count,
            total_queries: sample.query_count,
        }
    }

    /// Queries per minute, normalized over the client's observation window.
    ///
    /// Returns `0.0` when the window is at or below
    /// [`MIN_RATE_WINDOW_SECS`] — a meaningful rate cannot be computed for a
    /// single query or an instantaneous burst.
    pub fn query_rate_per_minute(sample: &ClientSample) -> f64 {
        let window = sample.time_window();
        if window <= MIN_RATE_WINDOW_SECS {
            return 0.0;
        }
        (sample.query_count as f64 / window) * 60.0
    }

    /// Mean subdomain length; `0.0` when the client had no parseable
    /// subdomains.
    pub fn avg_subdomain_length(sample: &ClientSample) -> f64 {
        if sample.subdomain_lengths.is_empty() {
            return 0.0;
        }
        let sum: usize = sample.subdomain_lengths.iter().sum();
        sum as f64 / sample.subdomain_lengths.len() as f64
    }

    /// Longest subdomain; `0` when the client had no parseable subdomains.
    pub fn max_subdomain_length(sample: &ClientSample) -> usize {
        sample.subdomain_lengths.iter().copied().max().unwrap_or(0)
    }

    /// Mean Shannon entropy over the client's subdomains; `0.0` when empty.
    pub fn avg_entropy_bits(sample: &ClientSample) -> f64 {
        if sample.subdomains.is_empty() {
            return 0.0;
        }
        let total: f64 = sample.subdomains.iter().map(|s| shannon_entropy(s)).sum();
        total / sample.subdomains.len() as f64
    }

    /// NXDOMAIN responses as a percentage of total queries.
    ///
    /// Defined as `0.0` for a zero-query sample even though ingestion only
    /// creates accumulators on first sight of a record.
    pub fn nxdomain_pct(sample: &ClientSample) -> f64 {
        if sample.query_count == 0 {
            return 0.0;
        }
        sample.nxdomain_count as f64 / sample.query_count as f64 * 100.0
    }
}
