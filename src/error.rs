//! Error handling for the rangedl library.
//!
//! This module provides centralized error handling for every stage of a
//! download: range validation, probing, chunk transfers and cancellation.
//! Chunk-level failures are retried inside the task and only the terminal
//! one is surfaced as an [`Error`].

use thiserror::Error;

/// Errors that can happen when using rangedl.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// This variant captures internal errors that don't fit into other categories,
    /// such as a resource too large to be buffered in memory.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A transfer failed: transport error or non-success HTTP status.
    ///
    /// Chunk transfers are retried with backoff before this is surfaced;
    /// probe and single-stream transfers are not retried.
    #[error("Network error while downloading {url}: {reason}")]
    Network {
        /// URL of the resource being downloaded.
        url: String,
        /// What went wrong.
        reason: String,
    },

    /// The task's cancellation signal fired. Never retried.
    #[error("Download cancelled")]
    Cancelled,

    /// A requested range exceeds the configured maximum range size.
    #[error("Range size {size} exceeds maximum allowed size {max}")]
    RangeTooLarge {
        /// Size of the (end-clamped) requested range.
        size: u64,
        /// Configured maximum.
        max: u64,
    },

    /// A `Range` header value could not be understood.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Error from the Reqwest library while building a client.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },
}

impl Error {
    /// Build a [`Error::Network`] for `url`.
    pub fn network(url: impl ToString, reason: impl ToString) -> Self {
        Error::Network {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error is the result of a cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// Whether this error is a network failure.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network { .. })
    }
}

/// Result type alias for operations that can fail with a rangedl error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_display() {
        let err = Error::network("http://example.com/a.bin", "unexpected status 503");
        assert_eq!(
            err.to_string(),
            "Network error while downloading http://example.com/a.bin: unexpected status 503"
        );
        assert!(err.is_network());
        assert!(!err.is_cancelled());
    }

    #[test]
    fn test_cancelled_is_distinct() {
        assert!(Error::Cancelled.is_cancelled());
        assert!(!Error::Cancelled.is_network());
    }

    #[test]
    fn test_range_too_large_display() {
        let err = Error::RangeTooLarge { size: 20, max: 10 };
        assert_eq!(
            err.to_string(),
            "Range size 20 exceeds maximum allowed size 10"
        );
    }
}
