//! Aggregate reporting: reducing per-client features into the corpus summary.

use std::collections::HashMap;

use sentinel_core::entropy::shannon_entropy;
use sentinel_core::models::{
    ClientFeatures, ClientSample, CorpusSummary, EntropyStats, LengthStats, RateStats,
};
use sentinel_core::stats::{mean, median};

/// Compute the feature vector for every sample and rank the result.
///
/// Ranking is by `total_queries` descending with `client_id` ascending as the
/// tie-break, so the order is deterministic regardless of map iteration or
/// input permutation.
pub fn ranked_features(samples: &HashMap<String, ClientSample>) -> Vec<ClientFeatures> {
    use sentinel_core::features::FeatureCalculator;

    let mut features: Vec<ClientFeatures> =
        samples.values().map(FeatureCalculator::compute).collect();
    features.sort_by(|a, b| {
        b.total_queries
            .cmp(&a.total_queries)
            .then_with(|| a.client_id.cmp(&b.client_id))
    });
    features
}

/// Reduce all per-client features and samples into one [`CorpusSummary`].
///
/// Length and entropy distributions are taken over the union of every
/// client's subdomains, not over per-client averages. Iteration follows the
/// ranked feature order so repeated runs reduce in the same order and yield
/// bit-identical floating-point results.
pub fn summarize(
    features: &[ClientFeatures],
    samples: &HashMap<String, ClientSample>,
) -> CorpusSummary {
    let total_clients = features.len();
    let total_queries: u64 = features.iter().map(|f| f.total_queries).sum();
    let total_nxdomain: u64 = features.iter().map(|f| f.nxdomain_count).sum();

    let avg_queries_per_client = if total_clients > 0 {
        total_queries as f64 / total_clients as f64
    } else {
        0.0
    };

    // Per-client rate distribution. The finite/non-negative filter is a
    // safety net: the guarded rate formula cannot currently produce such
    // values, but a future formula change must not silently poison the
    // distribution.
    let mut rates: Vec<f64> = features
        .iter()
        .map(|f| f.query_rate_per_minute)
        .filter(|r| r.is_finite() && *r >= 0.0)
        .collect();
    rates.sort_by(f64::total_cmp);

    let query_rate = RateStats {
        min: rates.first().copied().unwrap_or(0.0),
        median: median(&rates),
        max: rates.last().copied().unwrap_or(0.0),
    };

    // Union distributions, walked in ranked order for determinism.
    let mut all_lengths: Vec<usize> = Vec::new();
    let mut all_entropies: Vec<f64> = Vec::new();
    for feature in features {
        if let Some(sample) = samples.get(&feature.client_id) {
            all_lengths.extend(sample.subdomain_lengths.iter().copied());
            all_entropies.extend(sample.subdomains.iter().map(|s| shannon_entropy(s)));
        }
    }

    let length_values: Vec<f64> = all_lengths.iter().map(|&l| l as f64).collect();
    let subdomain_length = LengthStats {
        mean: mean(&length_values),
        max: all_lengths.iter().copied().max().unwrap_or(0),
    };

    let entropy = EntropyStats {
        mean: mean(&all_entropies),
        max: all_entropies.iter().copied().fold(0.0, f64::max),
    };

    let overall_nxdomain_pct = if total_queries > 0 {
        total_nxdomain as f64 / total_queries as f64 * 100.0
    } else {
        0.0
    };

    CorpusSummary {
        total_clients,
        total_queries,
        total_nxdomain,
        avg_queries_per_client,
        query_rate,
        subdomain_length,
        entropy,
        overall_nxdomain_pct,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
