//! Record ingestion: grouping raw query records into per-client accumulators.
//!
//! First stage of the two-pass design — the full record set is grouped and
//! frozen before any feature is computed.

use std::collections::HashMap;

use sentinel_core::domain::{extract_subdomain, is_noisy_query};
use sentinel_core::models::{ClientAccumulator, ClientSample, EngineConfig, QueryRecord};
use tracing::debug;

/// Result of one grouping pass.
#[derive(Debug, Clone)]
pub struct GroupOutcome {
    /// Finalized per-client samples. Map order is irrelevant; only content
    /// matters.
    pub samples: HashMap<String, ClientSample>,
    /// Records dropped by the configurable noise filter, counted separately
    /// from malformed rows.
    pub filtered: u64,
}

/// Group `records` into per-client accumulators and freeze them.
///
/// Accumulators are created lazily on the first record for a new client and
/// updated in place afterwards: query count, running min/max timestamps,
/// NXDOMAIN count (against the configured response code) and the parallel
/// subdomain series. The map is owned by the caller through the returned
/// outcome; no state survives the call.
pub fn group_records(records: &[QueryRecord], config: &EngineConfig) -> GroupOutcome {
    let mut accumulators: HashMap<String, ClientAccumulator> = HashMap::new();
    let mut filtered = 0u64;

    for record in records {
        if is_noisy_query(&record.query_name, &record.client_id, config) {
            filtered += 1;
            continue;
        }

        let subdomain = extract_subdomain(&record.query_name);
        let is_nxdomain = record.response_code == config.nxdomain_rcode;

        accumulators
            .entry(record.client_id.clone())
            .or_insert_with(|| ClientAccumulator::new(record.client_id.clone()))
            .observe(record.timestamp, &subdomain, is_nxdomain);
    }

    debug!(
        "Grouped {} records into {} clients ({} filtered)",
        records.len(),
        accumulators.len(),
        filtered
    );

    let samples = accumulators
        .into_iter()
        .map(|(client_id, acc)| (client_id, acc.freeze()))
        .collect();

    GroupOutcome { samples, filtered }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ts: f64, client: &str, qname: &str, rcode: i64) -> QueryRecord {
        QueryRecord {
            timestamp: ts,
            client_id: client.to_string(),
            client_port: 5353,
            query_name: qname.to_string(),
            query_type: "A".to_string(),
            response_code: rcode,
            answer_count: 1,
            raw_len: 100,
        }
    }

    #[test]
    fn test_groups_by_client() {
        let records = vec![
            record(0.0, "10.0.0.1", "www.example.com.", 0),
            record(10.0, "10.0.0.2", "mail.example.com.", 0),
            record(20.0, "10.0.0.1", "ftp.example.com.", 0),
        ];
        let outcome = group_records(&records, &EngineConfig::default());

        assert_eq!(outcome.samples.len(), 2);
        assert_eq!(outcome.samples["10.0.0.1"].query_count, 2);
        assert_eq!(outcome.samples["10.0.0.2"].query_count, 1);
        assert_eq!(outcome.filtered, 0);
    }

    #[test]
    fn test_nxdomain_counted_against_configured_code() {
        let records = vec![
            record(0.0, "10.0.0.1", "a.example.com.", 3),
            record(1.0, "10.0.0.1", "b.example.com.", 2),
        ];

        let default_outcome = group_records(&records, &EngineConfig::default());
        assert_eq!(default_outcome.samples["10.0.0.1"].nxdomain_count, 1);

        let custom = EngineConfig {
            nxdomain_rcode: 2,
            ..EngineConfig::default()
        };
        let custom_outcome = group_records(&records, &custom);
        assert_eq!(custom_outcome.samples["10.0.0.1"].nxdomain_count, 1);
    }

    #[test]
    fn test_empty_subdomain_skips_series_but_counts_query() {
        let records = vec![
            record(0.0, "10.0.0.1", "example.com.", 0),
            record(1.0, "10.0.0.1", "www.example.com.", 0),
        ];
        let outcome = group_records(&records, &EngineConfig::default());
        let sample = &outcome.samples["10.0.0.1"];

        assert_eq!(sample.query_count, 2);
        assert_eq!(sample.subdomains, vec!["www".to_string()]);
    }

    #[test]
    fn test_noise_filter_counts_separately() {
        let config = EngineConfig {
            min_qname_len: 3,
            drop_local: true,
            ..EngineConfig::default()
        };
        let records = vec![
            record(0.0, "10.0.0.1", "a", 0),
            record(1.0, "10.0.0.1", "printer.local", 0),
            record(2.0, "10.0.0.1", "www.example.com.", 0),
        ];
        let outcome = group_records(&records, &config);

        assert_eq!(outcome.filtered, 2);
        assert_eq!(outcome.samples["10.0.0.1"].query_count, 1);
    }

    #[test]
    fn test_order_independence() {
        let mut records = vec![
            record(0.0, "10.0.0.1", "www.example.com.", 0),
            record(120.0, "10.0.0.1", "mail.example.com.", 3),
            record(60.0, "10.0.0.2", "a.b.example.com.", 0),
        ];
        let forward = group_records(&records, &EngineConfig::default());
        records.reverse();
        let backward = group_records(&records, &EngineConfig::default());

        let f = &forward.samples["10.0.0.1"];
        let b = &backward.samples["10.0.0.1"];
        assert_eq!(f.query_count, b.query_count);
        assert_eq!(f.first_timestamp, b.first_timestamp);
        assert_eq!(f.last_timestamp, b.last_timestamp);
        assert_eq!(f.nxdomain_count, b.nxdomain_count);
        // Arrival order of the subdomain series differs, content does not.
        let mut fs = f.subdomains.clone();
        let mut bs = b.subdomains.clone();
        fs.sort();
        bs.sort();
        assert_eq!(fs, bs);
    }

    #[test]
    fn test_no_records_yields_no_clients() {
        let outcome = group_records(&[], &EngineConfig::default());
        assert!(outcome.samples.is_empty());
    }
}
