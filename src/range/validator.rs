//! Range clamping and validation.
//!
//! [`validate_range`] never touches the network: it is a request-shaping
//! decision made before any transfer starts.

use super::ByteRange;
use crate::error::{Error, Result};

/// Default maximum range size: 10 MiB.
pub const DEFAULT_MAX_RANGE_SIZE: u64 = 10 * 1024 * 1024;

/// What to do when a range is larger than the configured maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExceedPolicy {
    /// Shrink the range to the maximum size.
    #[default]
    Clamp,
    /// Fail with [`Error::RangeTooLarge`].
    Throw,
    /// Treat the range as unsatisfiable.
    ReturnNone,
}

/// Options for [`validate_range`] and [`validate_ranges`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeValidationOptions {
    /// Maximum range size in bytes. `None` or `Some(0)` disables the limit.
    pub max_range_size: Option<u64>,
    /// Policy applied when the limit is exceeded.
    pub on_exceed_max: ExceedPolicy,
}

impl Default for RangeValidationOptions {
    fn default() -> Self {
        Self {
            max_range_size: Some(DEFAULT_MAX_RANGE_SIZE),
            on_exceed_max: ExceedPolicy::Clamp,
        }
    }
}

impl RangeValidationOptions {
    /// Options with no size limit.
    pub fn unlimited() -> Self {
        Self {
            max_range_size: None,
            ..Self::default()
        }
    }

    /// Set the maximum range size.
    pub fn max_range_size(mut self, max: Option<u64>) -> Self {
        self.max_range_size = max;
        self
    }

    /// Set the policy applied to oversized ranges.
    pub fn on_exceed_max(mut self, policy: ExceedPolicy) -> Self {
        self.on_exceed_max = policy;
        self
    }

    fn limit(&self) -> Option<u64> {
        self.max_range_size.filter(|max| *max > 0)
    }
}

/// Clamp `range` against a resource of `total_length` bytes.
///
/// Returns `Ok(None)` when `start` is past the end of the resource. The end
/// is clamped to the last byte of the resource, then the size limit is
/// applied according to [`RangeValidationOptions::on_exceed_max`].
///
/// An inverted range (`end < start`) is passed through with its end clamped;
/// use [`is_range_valid`] to reject it.
pub fn validate_range(
    range: ByteRange,
    total_length: u64,
    options: &RangeValidationOptions,
) -> Result<Option<ByteRange>> {
    if range.start >= total_length {
        return Ok(None);
    }

    let mut end = range.end.min(total_length - 1);
    // zero for inverted ranges, so they never exceed the limit
    let size = ByteRange::new(range.start, end).len();

    if let Some(max) = options.limit() {
        if size > max {
            match options.on_exceed_max {
                ExceedPolicy::Throw => return Err(Error::RangeTooLarge { size, max }),
                ExceedPolicy::ReturnNone => return Ok(None),
                ExceedPolicy::Clamp => {
                    end = (range.start + max - 1).min(total_length - 1);
                }
            }
        }
    }

    Ok(Some(ByteRange::new(range.start, end)))
}

/// Validate every range, dropping the unsatisfiable ones. Order is preserved.
pub fn validate_ranges(
    ranges: &[ByteRange],
    total_length: u64,
    options: &RangeValidationOptions,
) -> Result<Vec<ByteRange>> {
    let mut validated = Vec::with_capacity(ranges.len());
    for range in ranges {
        if let Some(range) = validate_range(*range, total_length, options)? {
            validated.push(range);
        }
    }
    Ok(validated)
}

/// Check a range without reshaping it.
pub fn is_range_valid(range: ByteRange, total_length: u64, max_range_size: Option<u64>) -> bool {
    if range.start >= total_length || range.end < range.start {
        return false;
    }

    match max_range_size {
        Some(max) if max > 0 => range.len() <= max,
        _ => true,
    }
}
