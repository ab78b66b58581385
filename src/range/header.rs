//! `Range` header parsing and the forwarding contract.
//!
//! A proxy that forwards ranged requests upstream must reshape them with
//! exactly the policy the downloading side uses. [`forward_range`] is that
//! shared step: parse the incoming header, clamp it, format it again.

use super::validator::{validate_range, RangeValidationOptions};
use super::ByteRange;
use crate::error::{Error, Result};

/// Parse a `Range` header value such as `bytes=0-1023`.
///
/// Lenient in the same way forwarding proxies are: each bound is read from
/// its leading digits (`12abc` is `12`), a start without digits becomes `0`
/// and an end without digits becomes `total_length - 1`. Only the first
/// range of a multi-range value is used.
///
/// ```rust
/// use rangedl::range::{parse_range_header, ByteRange};
///
/// assert_eq!(parse_range_header("bytes=100-", 1000)?, ByteRange::new(100, 999));
/// # Ok::<(), rangedl::Error>(())
/// ```
pub fn parse_range_header(value: &str, total_length: u64) -> Result<ByteRange> {
    let spec = value
        .trim()
        .strip_prefix("bytes=")
        .ok_or_else(|| Error::InvalidRange(format!("unsupported range unit in {:?}", value)))?;

    let first = spec.split(',').next().unwrap_or_default();
    let (start, end) = first.split_once('-').unwrap_or((first, ""));

    let start = leading_number(start).unwrap_or(0);
    let end = leading_number(end).unwrap_or_else(|| total_length.saturating_sub(1));

    Ok(ByteRange::new(start, end))
}

fn leading_number(value: &str) -> Option<u64> {
    let value = value.trim_start();
    let digits = value
        .find(|c: char| !c.is_ascii_digit())
        .map_or(value, |end| &value[..end]);
    digits.parse().ok()
}

/// Reshape an incoming `Range` header for forwarding upstream.
///
/// Returns the header value to send, or `None` when the range cannot be
/// satisfied and the request should go upstream without a `Range` header.
pub fn forward_range(
    value: &str,
    total_length: u64,
    options: &RangeValidationOptions,
) -> Result<Option<String>> {
    let requested = parse_range_header(value, total_length)?;
    let validated = validate_range(requested, total_length, options)?;
    Ok(validated.map(|range| range.header_value()))
}
