//! Header helpers for probing a resource.

use reqwest::header::{HeaderMap, ACCEPT_RANGES, CONTENT_LENGTH};

/// Header carrying the original upstream `Content-Length` when an
/// intermediary rewrites it on ranged responses.
pub const X_LENGTH_BACKUP: &str = "x-length-backup";

/// Whether the headers advertise `Accept-Ranges: bytes`.
pub fn accepts_byte_ranges(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT_RANGES)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().eq_ignore_ascii_case("bytes"))
        .unwrap_or(false)
}

/// Parse a header as an unsigned integer.
///
/// Returns None if the header is missing or if its value is not an u64.
pub fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

/// Total length of a resource from a probe response.
///
/// With `compatibility_mode`, [`X_LENGTH_BACKUP`] wins over
/// `Content-Length` whenever it is present and parseable.
pub fn resource_length(headers: &HeaderMap, compatibility_mode: bool) -> Option<u64> {
    if compatibility_mode {
        if let Some(length) = header_u64(headers, X_LENGTH_BACKUP) {
            return Some(length);
        }
    }
    header_u64(headers, CONTENT_LENGTH.as_str())
}

/// Parse Content-Range header to extract total size.
///
/// Content-Range header format: "bytes start-end/total"
///
/// ```rust
/// use rangedl::http::parse_content_range_total;
///
/// assert_eq!(parse_content_range_total("bytes 0-1023/2048"), Some(2048));
/// assert_eq!(parse_content_range_total("bytes 0-1023/*"), None);
/// ```
pub fn parse_content_range_total(content_range: &str) -> Option<u64> {
    content_range
        .split_once('/')
        .and_then(|(_, size)| size.trim().parse::<u64>().ok())
}

/// Parse the `start-end` bounds of a Content-Range header.
///
/// ```rust
/// use rangedl::http::parse_content_range_bounds;
///
/// assert_eq!(parse_content_range_bounds("bytes 200-1023/1024"), Some((200, 1023)));
/// assert_eq!(parse_content_range_bounds("bytes */1024"), None);
/// ```
pub fn parse_content_range_bounds(content_range: &str) -> Option<(u64, u64)> {
    let spec = content_range.trim().strip_prefix("bytes")?.trim_start();
    let bounds = spec.split_once('/').map_or(spec, |(bounds, _)| bounds);
    let (start, end) = bounds.split_once('-')?;
    Some((start.trim().parse().ok()?, end.trim().parse().ok()?))
}
