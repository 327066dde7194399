//! Shannon entropy over query-name labels.
//!
//! High-entropy subdomains are the classic signature of DNS tunneling and
//! algorithmically generated names, which is why the per-client feature set
//! carries an average entropy figure.

/// Shannon entropy of `s` in bits.
///
/// Builds a frequency table over the bytes of the string (case-sensitive, no
/// Unicode normalization) and computes `H = -Σ p·log2(p)` over the symbols
/// that actually occur, so absent symbols never contribute a `0·log2(0)`
/// term. Empty input yields `0.0`.
///
/// A string of one repeated character comes out as exactly `0.0`
/// (`p == 1.0`, `log2(1) == 0`); a string of all-distinct characters comes
/// out as `log2(len)` within floating-point tolerance.
#[inline]
pub fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq = [0u32; 256];
    for &byte in s.as_bytes() {
        freq[byte as usize] += 1;
    }

    let len = s.len() as f64;
    let mut entropy = 0.0;
    for &count in &freq {
        if count > 0 {
            let p = count as f64 / len;
            entropy -= p * p.log2();
        }
    }
    entropy
}
