//! CSV export of query-record sequences.

use std::io::Write;
use std::path::Path;

use sentinel_core::error::{Result, SentinelError};
use sentinel_core::models::QueryRecord;
use tracing::debug;

/// Header matching the collector's export column order.
pub const CSV_HEADER: &str = "ts,client_ip,client_port,qname,qtype,response_code,answer_count,raw_len";

/// Write `records` to `path` as CSV, header first.
///
/// Integral timestamps are rendered without a fractional part so a
/// write/read round trip preserves the original values. Embedded double
/// quotes in text fields are doubled.
pub fn export_csv(path: &Path, records: &[QueryRecord]) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|source| SentinelError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = std::io::BufWriter::new(file);

    let write_err = |source| SentinelError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    writeln!(out, "{}", CSV_HEADER).map_err(write_err)?;
    for record in records {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{}",
            format_timestamp(record.timestamp),
            sanitize(&record.client_id),
            record.client_port,
            sanitize(&record.query_name),
            sanitize(&record.query_type),
            record.response_code,
            record.answer_count,
            record.raw_len
        )
        .map_err(write_err)?;
    }
    out.flush().map_err(write_err)?;

    debug!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}

/// Render a timestamp, dropping the fractional part when it is integral.
fn format_timestamp(ts: f64) -> String {
    if ts.fract() == 0.0 {
        format!("{:.0}", ts)
    } else {
        format!("{}", ts)
    }
}

/// Double embedded quotes so the row stays one record.
fn sanitize(field: &str) -> String {
    field.replace('"', "\"\"")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
