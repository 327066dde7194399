//! Query-name parsing: subdomain extraction and the ingestion noise filter.

use crate::models::EngineConfig;

/// Extract the subdomain portion of a fully-qualified query name.
///
/// Strips one trailing root-label dot if present, splits on `.`, and treats
/// the last two labels as "base domain + TLD":
///
/// * 0 or 1 label → `""` (nothing precedes the base domain)
/// * exactly 2 labels → the first label (`sub.base`)
/// * 3+ labels → all labels except the last two, joined by `.`
///
/// Known limitation: the effective TLD is assumed to be exactly the last
/// label, so multi-label suffixes like `.co.uk` are split incorrectly
/// (`www.example.co.uk` → `www.example`). This mirrors the heuristic the
/// feature baselines were built on and is kept deliberately; do not replace
/// it with public-suffix-list logic.
pub fn extract_subdomain(query_name: &str) -> String {
    if query_name.is_empty() {
        return String::new();
    }

    let domain = query_name.strip_suffix('.').unwrap_or(query_name);
    let labels: Vec<&str> = domain.split('.').collect();

    match labels.len() {
        0 | 1 => String::new(),
        2 => labels[0].to_string(),
        n => labels[..n - 2].join("."),
    }
}

/// Whether a record should be dropped by the configurable noise filter.
///
/// The original collector hard-coded these exclusions at capture time; here
/// they are policy knobs on [`EngineConfig`] and both default to off for
/// analysis, so a pre-filtered log is not filtered twice.
///
/// * Names shorter than `min_qname_len` are dropped (`0` disables).
/// * With `drop_local` set, localhost names, `.local` names and loopback
///   addresses (`127.*` as the query name or the client) are dropped.
pub fn is_noisy_query(query_name: &str, client_id: &str, config: &EngineConfig) -> bool {
    let name = query_name.trim();

    if config.min_qname_len > 0 && name.len() < config.min_qname_len {
        return true;
    }

    if config.drop_local
        && (name.contains("localhost")
            || name.ends_with(".local")
            || name.ends_with(".local.")
            || name.starts_with("127.")
            || client_id.starts_with("127."))
    {
        return true;
    }

    false
}
