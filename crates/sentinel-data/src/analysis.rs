//! Main analysis pipeline for DNS Sentinel.
//!
//! Orchestrates loading, grouping, feature computation and the corpus
//! reduction, returning an [`AnalysisReport`] ready for the presentation
//! layer.

use std::path::Path;

use chrono::Utc;
use sentinel_core::error::Result;
use sentinel_core::models::{ClientFeatures, CorpusSummary, EngineConfig};
use tracing::info;

use crate::extractor::group_records;
use crate::reader::load_query_log;
use crate::summary::{ranked_features, summarize};

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this report was generated.
    pub generated_at: String,
    /// Number of records successfully parsed from the log.
    pub records_processed: usize,
    /// Rows dropped because they were malformed.
    pub records_skipped: u64,
    /// Records dropped by the configurable noise filter.
    pub records_filtered: u64,
    /// Number of distinct clients observed.
    pub clients: usize,
    /// Wall-clock seconds spent loading the log.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent grouping and computing features.
    pub compute_time_seconds: f64,
}

/// The complete output of [`analyze_queries`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct AnalysisReport {
    /// Per-client feature vectors, ranked by query count descending.
    pub per_client: Vec<ClientFeatures>,
    /// Corpus-wide summary statistics.
    pub summary: CorpusSummary,
    /// Metadata about this run.
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full analysis pipeline over the query log at `path`.
///
/// 1. Load and parse the CSV log (malformed rows skipped, empty log fatal).
/// 2. Group records into per-client accumulators and freeze them.
/// 3. Compute the per-client feature vectors and rank them.
/// 4. Reduce everything into the [`CorpusSummary`].
///
/// The pipeline is a pure function of the file contents and `config`:
/// repeated runs over the same input yield identical features and summary.
pub fn analyze_queries(path: &Path, config: &EngineConfig) -> Result<AnalysisReport> {
    let load_start = std::time::Instant::now();
    let outcome = load_query_log(path)?;
    let load_time = load_start.elapsed().as_secs_f64();

    let compute_start = std::time::Instant::now();
    let grouped = group_records(&outcome.records, config);
    let per_client = ranked_features(&grouped.samples);
    let summary = summarize(&per_client, &grouped.samples);
    let compute_time = compute_start.elapsed().as_secs_f64();

    info!(
        "Analyzed {} records from {} clients ({} skipped, {} filtered)",
        outcome.records.len(),
        per_client.len(),
        outcome.skipped,
        grouped.filtered
    );

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        records_processed: outcome.records.len(),
        records_skipped: outcome.skipped,
        records_filtered: grouped.filtered,
        clients: per_client.len(),
        load_time_seconds: load_time,
        compute_time_seconds: compute_time,
    };

    Ok(AnalysisReport {
        per_client,
        summary,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_core::error::SentinelError;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const HEADER: &str = "ts,client_ip,client_port,qname,qtype,response_code,answer_count,raw_len";

    fn write_log(dir: &Path, lines: &[&str]) -> PathBuf {
        let path = dir.join("queries.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    // ── analyze_queries ───────────────────────────────────────────────────────

    #[test]
    fn test_end_to_end_two_record_scenario() {
        let dir = TempDir::new().unwrap();
        let exfil_label = "xk2j9fq7w3mz8rt4v6ya5bc1dehginop2lsu0wxj"; // 40 chars
        let row2 = format!("120,10.0.0.1,5353,{exfil_label}.example.com.,TXT,3,0,300");
        let path = write_log(
            dir.path(),
            &[
                HEADER,
                "0,10.0.0.1,5353,www.example.com.,A,0,1,120",
                &row2,
            ],
        );

        let report = analyze_queries(&path, &EngineConfig::default()).unwrap();
        assert_eq!(report.per_client.len(), 1);

        let features = &report.per_client[0];
        assert_eq!(features.client_id, "10.0.0.1");
        assert_eq!(features.total_queries, 2);
        assert_eq!(features.nxdomain_count, 1);
        assert!((features.nxdomain_pct - 50.0).abs() < 1e-12);
        // 2 queries over 120 s × 60 = 1 query per minute.
        assert!((features.query_rate_per_minute - 1.0).abs() < 1e-12);
        assert_eq!(features.max_subdomain_length, 40);
        // The long random label pushes the mean well above entropy("www").
        let www_entropy = sentinel_core::entropy::shannon_entropy("www");
        assert!(features.avg_entropy_bits > www_entropy + 1.0);
    }

    #[test]
    fn test_malformed_row_does_not_change_counts() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            dir.path(),
            &[
                HEADER,
                "0,10.0.0.1,5353,www.example.com.,A,0,1,120",
                "60,10.0.0.1,5353,mail.example.com.,A,BADCODE,1,120",
            ],
        );

        let report = analyze_queries(&path, &EngineConfig::default()).unwrap();
        assert_eq!(report.per_client[0].total_queries, 1);
        assert_eq!(report.metadata.records_skipped, 1);
    }

    #[test]
    fn test_missing_file_propagates() {
        let err = analyze_queries(
            Path::new("/tmp/sentinel-missing-input.csv"),
            &EngineConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SentinelError::FileRead { .. }));
    }

    #[test]
    fn test_header_only_file_propagates_empty_input() {
        let dir = TempDir::new().unwrap();
        let path = write_log(dir.path(), &[HEADER]);
        let err = analyze_queries(&path, &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, SentinelError::EmptyInput(_)));
    }

    #[test]
    fn test_idempotent_runs_are_identical() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            dir.path(),
            &[
                HEADER,
                "0,10.0.0.1,1,www.example.com.,A,0,1,120",
                "60,10.0.0.1,1,abc.example.com.,A,3,0,90",
                "30,10.0.0.2,1,a.b.example.com.,A,0,1,200",
            ],
        );

        let first = analyze_queries(&path, &EngineConfig::default()).unwrap();
        let second = analyze_queries(&path, &EngineConfig::default()).unwrap();
        assert_eq!(first.per_client, second.per_client);
        assert_eq!(first.summary, second.summary);
    }

    #[test]
    fn test_permuted_input_same_features_and_summary() {
        let dir = TempDir::new().unwrap();
        let rows = [
            "0,10.0.0.1,1,www.example.com.,A,0,1,120",
            "60,10.0.0.1,1,abc.example.com.,A,3,0,90",
            "30,10.0.0.2,1,a.b.example.com.,A,0,1,200",
        ];
        let forward = write_log(dir.path(), &[HEADER, rows[0], rows[1], rows[2]]);
        let report_fwd = analyze_queries(&forward, &EngineConfig::default()).unwrap();

        let dir2 = TempDir::new().unwrap();
        let backward = write_log(dir2.path(), &[HEADER, rows[2], rows[0], rows[1]]);
        let report_bwd = analyze_queries(&backward, &EngineConfig::default()).unwrap();

        assert_eq!(report_fwd.per_client, report_bwd.per_client);
        assert_eq!(report_fwd.summary, report_bwd.summary);
    }

    #[test]
    fn test_metadata_fields_populated() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            dir.path(),
            &[HEADER, "0,10.0.0.1,1,www.example.com.,A,0,1,120"],
        );

        let report = analyze_queries(&path, &EngineConfig::default()).unwrap();
        assert!(!report.metadata.generated_at.is_empty());
        assert_eq!(report.metadata.records_processed, 1);
        assert_eq!(report.metadata.clients, 1);
        assert!(report.metadata.load_time_seconds >= 0.0);
        assert!(report.metadata.compute_time_seconds >= 0.0);
    }

    #[test]
    fn test_noise_filter_reported_in_metadata() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            dir.path(),
            &[
                HEADER,
                "0,10.0.0.1,1,a,0,0,1,120",
                "60,10.0.0.1,1,www.example.com.,A,0,1,120",
            ],
        );

        let config = EngineConfig {
            min_qname_len: 3,
            ..EngineConfig::default()
        };
        let report = analyze_queries(&path, &config).unwrap();
        assert_eq!(report.metadata.records_filtered, 1);
        assert_eq!(report.per_client[0].total_queries, 1);
    }
}
