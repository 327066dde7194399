//! Text rendering of the analysis report.
//!
//! Presentation only: every number here is computed upstream; this module
//! just lays the per-client table and the summary block out as fixed-width
//! text.

use sentinel_data::analysis::AnalysisReport;

const RULE_WIDTH: usize = 100;

/// Render the full report (per-client table plus summary block).
pub fn render(report: &AnalysisReport) -> String {
    let mut out = String::new();
    render_client_table(report, &mut out);
    render_summary(report, &mut out);
    out
}

fn render_client_table(report: &AnalysisReport, out: &mut String) {
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push_str("\nDNS FEATURE EXTRACTION RESULTS\n");
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!(
        "{:<18} {:>10} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}\n",
        "Client",
        "Queries",
        "Query Rate",
        "Avg Sub Len",
        "Max Sub Len",
        "Avg Entropy",
        "NXDOMAIN %",
        "NXDOMAIN #"
    ));
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    for f in &report.per_client {
        out.push_str(&format!(
            "{:<18} {:>10} {:>12.2} {:>12.2} {:>12} {:>12.4} {:>11.2}% {:>12}\n",
            f.client_id,
            f.total_queries,
            f.query_rate_per_minute,
            f.avg_subdomain_length,
            f.max_subdomain_length,
            f.avg_entropy_bits,
            f.nxdomain_pct,
            f.nxdomain_count
        ));
    }
}

fn render_summary(report: &AnalysisReport, out: &mut String) {
    let s = &report.summary;

    out.push('\n');
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push_str("\nSUMMARY STATISTICS\n");
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');

    out.push_str(&format!("Total Clients: {}\n", s.total_clients));
    out.push_str(&format!("Total Queries: {}\n", s.total_queries));
    out.push_str(&format!(
        "Average Queries per Client: {:.2}\n",
        s.avg_queries_per_client
    ));
    out.push_str(&format!(
        "Overall NXDOMAIN Frequency: {:.2}% ({}/{})\n",
        s.overall_nxdomain_pct, s.total_nxdomain, s.total_queries
    ));
    out.push('\n');
    out.push_str("Query Rate Statistics (queries/minute):\n");
    out.push_str(&format!(
        "  Min: {:.2}, Median: {:.2}, Max: {:.2}\n",
        s.query_rate.min, s.query_rate.median, s.query_rate.max
    ));
    out.push('\n');
    out.push_str("Subdomain Length Statistics:\n");
    out.push_str(&format!(
        "  Average: {:.2}, Max: {}\n",
        s.subdomain_length.mean, s.subdomain_length.max
    ));
    out.push('\n');
    out.push_str("Entropy Statistics (bits):\n");
    out.push_str(&format!(
        "  Average: {:.4}, Max: {:.4}\n",
        s.entropy.mean, s.entropy.max
    ));
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
}

// ── Tests ─────────────────────────────────────────────────────────────────────
