//! Synthetic query-log generation ("simulate" mode).
//!
//! Produces a realistic-ish sample dataset so the analyzer can be exercised
//! without live capture: mostly benign `www.<domain>` lookups with occasional
//! long or high-entropy labels emulating exfiltration, and occasional
//! NXDOMAIN responses.

use chrono::Utc;
use rand::rngs::ThreadRng;
use rand::Rng;
use sentinel_core::models::QueryRecord;

const BASE_DOMAINS: [&str; 5] = [
    "example.com.",
    "google.com.",
    "bing.com.",
    "malicious.example.",
    "random-domain.net.",
];

const QUERY_TYPES: [&str; 5] = ["A", "AAAA", "TXT", "MX", "CNAME"];

/// Fraction of names given a high-entropy base32-style label.
const HIGH_ENTROPY_SHARE: f64 = 0.05;
/// Fraction of the remaining names given an overlong alphabetic label.
const LONG_LABEL_SHARE: f64 = 0.05;
/// Fraction of responses marked NXDOMAIN.
const NXDOMAIN_SHARE: f64 = 0.05;

/// Synthetic query-record generator.
pub struct SampleGenerator {
    rng: ThreadRng,
}

impl SampleGenerator {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }

    /// Generate `n` records with timestamps spread over the last hour.
    pub fn generate(&mut self, n: usize) -> Vec<QueryRecord> {
        let now = Utc::now().timestamp() as f64;
        (0..n).map(|_| self.next_record(now)).collect()
    }

    fn next_record(&mut self, now: f64) -> QueryRecord {
        let timestamp = now - self.rng.random_range(0..3600) as f64;
        let client_id = format!("192.168.1.{}", self.rng.random_range(2..250));
        let base = BASE_DOMAINS[self.rng.random_range(0..BASE_DOMAINS.len())];

        let query_name = if self.rng.random_bool(HIGH_ENTROPY_SHARE) {
            format!("{}.{}", self.random_base32(40), base)
        } else if self.rng.random_bool(LONG_LABEL_SHARE) {
            format!("{}.{}", self.random_alpha(60), base)
        } else {
            format!("www.{}", base)
        };

        let response_code = if self.rng.random_bool(NXDOMAIN_SHARE) { 3 } else { 0 };
        let answer_count = if response_code == 0 {
            self.rng.random_range(0..3)
        } else {
            0
        };

        QueryRecord {
            timestamp,
            client_id,
            client_port: self.rng.random_range(1024..65535),
            query_name,
            query_type: QUERY_TYPES[self.rng.random_range(0..QUERY_TYPES.len())].to_string(),
            response_code,
            answer_count,
            raw_len: self.rng.random_range(50..400),
        }
    }

    fn random_alpha(&mut self, len: usize) -> String {
        const CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
        (0..len)
            .map(|_| CHARS[self.rng.random_range(0..CHARS.len())] as char)
            .collect()
    }

    fn random_base32(&mut self, len: usize) -> String {
        const CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz23456";
        (0..len)
            .map(|_| CHARS[self.rng.random_range(0..CHARS.len())] as char)
            .collect()
    }
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_requested_count() {
        let mut generator = SampleGenerator::new();
        assert_eq!(generator.generate(0).len(), 0);
        assert_eq!(generator.generate(250).len(), 250);
    }

    #[test]
    fn test_records_are_well_formed() {
        let mut generator = SampleGenerator::new();
        let now = Utc::now().timestamp() as f64;

        for record in generator.generate(500) {
            assert!(record.timestamp <= now + 1.0);
            assert!(record.timestamp >= now - 3601.0);
            assert!(record.client_id.starts_with("192.168.1."));
            assert!((1024..65535).contains(&record.client_port));
            assert!(record.query_name.ends_with('.'));
            assert!(QUERY_TYPES.contains(&record.query_type.as_str()));
            assert!(record.response_code == 0 || record.response_code == 3);
            if record.response_code == 3 {
                assert_eq!(record.answer_count, 0);
            }
            assert!((50..400).contains(&record.raw_len));
        }
    }

    #[test]
    fn test_sample_contains_benign_names() {
        // With 5% exfil shares, a 200-record sample all but certainly holds
        // plain www lookups.
        let mut generator = SampleGenerator::new();
        let records = generator.generate(200);
        assert!(records.iter().any(|r| r.query_name.starts_with("www.")));
    }

    #[test]
    fn test_label_helpers_honor_length_and_alphabet() {
        let mut generator = SampleGenerator::new();

        let alpha = generator.random_alpha(60);
        assert_eq!(alpha.len(), 60);
        assert!(alpha.bytes().all(|b| b.is_ascii_lowercase()));

        let base32 = generator.random_base32(40);
        assert_eq!(base32.len(), 40);
        assert!(base32
            .bytes()
            .all(|b| b.is_ascii_lowercase() || (b'2'..=b'6').contains(&b)));
    }
}
