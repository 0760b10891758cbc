//! Log sanitization utilities
//!
//! Keeps verification tokens, DKIM tokens and session credentials from being
//! fully exposed in debug/error logs.

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Canonical header lines whose value must never reach the log.
const SECRET_HEADERS: &[&str] = &["x-amz-security-token"];

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit, otherwise the first
/// `TRUNCATE_LIMIT` bytes (on a char boundary) plus the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Masks secret header values inside a SigV4 canonical request.
///
/// Canonical headers are `name:value` lines with lowercase names.
pub fn redact_canonical_request(canonical: &str) -> String {
    canonical
        .lines()
        .map(|line| match line.split_once(':') {
            Some((name, _)) if SECRET_HEADERS.contains(&name) => format!("{name}:***"),
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
