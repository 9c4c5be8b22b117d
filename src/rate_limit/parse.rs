//! Rate-limit header parsing.
//!
//! The upstream API has emitted throttling metadata under several header-name
//! conventions over time, so each field is probed under three variants; the
//! first present, parsable value wins.

use reqwest::header::HeaderMap;

/// Normalized view of upstream throttling headers.
///
/// Derived per response and never persisted. Every field is optional because
/// the API may omit any of the headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Total request allowance in the current window.
    pub limit: Option<u64>,
    /// Requests remaining in the current window.
    pub remaining: Option<u64>,
    /// Epoch seconds at which the window resets.
    pub reset_epoch_seconds: Option<u64>,
    /// Server-dictated wait before the next request, in seconds.
    pub retry_after_seconds: Option<u64>,
}

const LIMIT_HEADERS: [&str; 3] = ["X-Rate-Limit-Limit", "X-RateLimit-Limit", "RateLimit-Limit"];
const REMAINING_HEADERS: [&str; 3] = [
    "X-Rate-Limit-Remaining",
    "X-RateLimit-Remaining",
    "RateLimit-Remaining",
];
const RESET_HEADERS: [&str; 3] = ["X-Rate-Limit-Reset", "X-RateLimit-Reset", "RateLimit-Reset"];

/// Reads the first parsable integer value among the candidate header names.
fn header_u64(headers: &HeaderMap, names: &[&str]) -> Option<u64> {
    names.iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse().ok())
    })
}

/// Parses rate-limit metadata from response headers.
///
/// Absent or unparsable headers leave the corresponding field unset; this
/// function never fails and has no side effects. The executor is responsible
/// for low-water-mark logging.
pub fn parse(headers: &HeaderMap) -> RateLimitInfo {
    RateLimitInfo {
        limit: header_u64(headers, &LIMIT_HEADERS),
        remaining: header_u64(headers, &REMAINING_HEADERS),
        reset_epoch_seconds: header_u64(headers, &RESET_HEADERS),
        retry_after_seconds: header_u64(headers, &["Retry-After"]),
    }
}
