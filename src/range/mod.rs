//! Byte ranges: validation, chunk planning and `Range` header handling.
//!
//! The same clamping policy is used on both sides of a range-forwarding
//! proxy, so a client never asks for a range that the proxy reshapes
//! differently before sending it upstream.
//!
//! - [`validator`] - clamp and validate a range against a resource length
//! - [`plan`] - split a resource into fixed-size chunks
//! - [`header`] - parse and format `Range: bytes=<start>-<end>` values
//!
//! # Examples
//!
//! ```rust
//! use rangedl::range::{plan_chunks, validate_range, ByteRange, RangeValidationOptions};
//!
//! let chunks = plan_chunks(2_500_000, 1024 * 1024);
//! assert_eq!(chunks.len(), 3);
//! assert_eq!(chunks[2], ByteRange::new(2_097_152, 2_499_999));
//!
//! let clamped = validate_range(ByteRange::new(10, 500), 100, &RangeValidationOptions::default())?;
//! assert_eq!(clamped, Some(ByteRange::new(10, 99)));
//! # Ok::<(), rangedl::Error>(())
//! ```

pub mod header;
pub mod plan;
pub mod validator;

pub use header::{forward_range, parse_range_header};
pub use plan::plan_chunks;
pub use validator::{
    is_range_valid, validate_range, validate_ranges, ExceedPolicy, RangeValidationOptions,
    DEFAULT_MAX_RANGE_SIZE,
};

/// An inclusive byte range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRange {
    /// First byte offset (inclusive).
    pub start: u64,
    /// Last byte offset (inclusive).
    pub end: u64,
}

impl ByteRange {
    /// Create a new [`ByteRange`].
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Number of bytes covered, `0` when `end < start`.
    pub fn len(&self) -> u64 {
        if self.end < self.start {
            0
        } else {
            self.end - self.start + 1
        }
    }

    /// Whether the range covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// HTTP `Range` header value: `bytes=<start>-<end>`.
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}
