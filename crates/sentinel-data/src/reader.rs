//! CSV query-log loading for DNS Sentinel.
//!
//! Reads record rows exported by the collector (column order
//! `ts,client_ip,client_port,qname,qtype,response_code,answer_count,raw_len`)
//! and converts them into [`QueryRecord`] structs for downstream processing.

use std::io::BufRead;
use std::path::Path;

use sentinel_core::error::{Result, SentinelError};
use sentinel_core::models::QueryRecord;
use tracing::debug;

/// Minimum number of columns a data row must carry.
const EXPECTED_COLUMNS: usize = 8;

/// Outcome of one load pass over a query log.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// Successfully parsed records, in file order.
    pub records: Vec<QueryRecord>,
    /// Rows dropped because they failed field parsing.
    pub skipped: u64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a CSV query log from `path`.
///
/// The first line is the header and is always skipped, never parsed as data.
/// Blank lines are ignored. A row with fewer than eight columns, or with a
/// non-numeric timestamp or response code, is skipped with a diagnostic log;
/// it never aborts the run.
///
/// Errors:
/// * [`SentinelError::FileRead`] when the file cannot be opened.
/// * [`SentinelError::EmptyInput`] when the file holds a header (or nothing)
///   but zero data rows — distinct from a valid run that yields no clients.
pub fn load_query_log(path: &Path) -> Result<LoadOutcome> {
    let file = std::fs::File::open(path).map_err(|source| SentinelError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = std::io::BufReader::new(file);

    let mut records: Vec<QueryRecord> = Vec::new();
    let mut skipped = 0u64;
    let mut data_rows = 0u64;

    for (index, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|source| SentinelError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        // Header row.
        if index == 0 {
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        data_rows += 1;

        match parse_record(trimmed) {
            Some(record) => records.push(record),
            None => {
                skipped += 1;
                debug!("Skipping malformed row {} in {}", index + 1, path.display());
            }
        }
    }

    if data_rows == 0 {
        return Err(SentinelError::EmptyInput(path.to_path_buf()));
    }

    debug!(
        "Loaded {} records from {} ({} skipped)",
        records.len(),
        path.display(),
        skipped
    );

    Ok(LoadOutcome { records, skipped })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Parse one data row, returning `None` when a required field is malformed.
///
/// The core consumes columns 0 (timestamp), 1 (client), 3 (query name) and
/// 5 (response code); the remaining columns are carried through and parse
/// failures there fall back to defaults rather than dropping the row.
fn parse_record(line: &str) -> Option<QueryRecord> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < EXPECTED_COLUMNS {
        return None;
    }

    let timestamp: f64 = fields[0].trim().parse().ok()?;
    let response_code: i64 = fields[5].trim().parse().ok()?;

    Some(QueryRecord {
        timestamp,
        client_id: fields[1].trim().to_string(),
        client_port: fields[2].trim().parse().unwrap_or_default(),
        query_name: fields[3].trim().to_string(),
        query_type: fields[4].trim().to_string(),
        response_code,
        answer_count: fields[6].trim().parse().unwrap_or_default(),
        raw_len: fields[7].trim().parse().unwrap_or_default(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
