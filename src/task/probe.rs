//! The HEAD probe run before committing to a download strategy.

use crate::error::{Error, Result};
use crate::http::{accepts_byte_ranges, resource_length};

use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use tracing::debug;

/// What a probe learned about a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProbeOutcome {
    /// The server advertised `Accept-Ranges: bytes` on a successful response.
    pub accepts_ranges: bool,
    /// Total length of the resource, when known.
    pub length: Option<u64>,
}

impl ProbeOutcome {
    /// Outcome forcing a single-stream download.
    pub fn unsupported() -> Self {
        Self::default()
    }

    /// The length to split into chunks, or `None` when the resource has to
    /// be fetched in a single stream. Empty resources always go through a
    /// single stream.
    pub fn chunkable_length(&self) -> Option<u64> {
        match self.length {
            Some(length) if self.accepts_ranges && length > 0 => Some(length),
            _ => None,
        }
    }
}

/// Issue a HEAD request for `url` and read range support and length.
///
/// A non-success response is not an error: it yields
/// [`ProbeOutcome::unsupported`] and the caller falls back to a plain GET,
/// which reports the real failure if there is one. Transport errors are
/// returned as [`Error::Network`].
pub async fn probe(
    client: &ClientWithMiddleware,
    url: &Url,
    compatibility_mode: bool,
) -> Result<ProbeOutcome> {
    let response = client
        .head(url.clone())
        .send()
        .await
        .map_err(|e| Error::network(url, e))?;

    if !response.status().is_success() {
        debug!(%url, status = %response.status(), "Probe unsuccessful");
        return Ok(ProbeOutcome::unsupported());
    }

    let headers = response.headers();
    if !accepts_byte_ranges(headers) {
        debug!(%url, "Range requests not advertised");
        return Ok(ProbeOutcome::unsupported());
    }

    let outcome = ProbeOutcome {
        accepts_ranges: true,
        length: resource_length(headers, compatibility_mode),
    };
    debug!(%url, length = ?outcome.length, "Probe complete");
    Ok(outcome)
}
