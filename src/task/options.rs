//! Per-task configuration.

use std::time::Duration;

/// Default number of concurrent chunk workers per task.
pub const DEFAULT_MAX_THREADS: usize = 4;
/// Default chunk size: 1 MiB.
pub const DEFAULT_CHUNK_SIZE: u64 = 1024 * 1024;
/// Default number of retries per chunk.
pub const DEFAULT_MAX_RETRIES: u32 = 2;
/// Default base delay of the exponential backoff.
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_millis(300);

/// Options controlling how a single resource is downloaded.
///
/// Every field has a default; leaving a field alone and setting it to its
/// default value behave identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTaskOptions {
    /// Maximum number of chunk requests in flight for one task.
    pub max_threads: usize,
    /// Size of each chunk in bytes.
    pub chunk_size: u64,
    /// Retries per chunk after the first attempt.
    pub max_retries: u32,
    /// Backoff before retry `n` is `retry_base_delay * 2^n`.
    pub retry_base_delay: Duration,
    /// Prefer the `X-Length-Backup` header over `Content-Length` when probing.
    pub compatibility_mode: bool,
}

impl Default for DownloadTaskOptions {
    fn default() -> Self {
        Self {
            max_threads: DEFAULT_MAX_THREADS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay: DEFAULT_RETRY_BASE_DELAY,
            compatibility_mode: false,
        }
    }
}

impl DownloadTaskOptions {
    /// Set the maximum number of concurrent chunk workers.
    pub fn max_threads(mut self, max_threads: usize) -> Self {
        self.max_threads = max_threads;
        self
    }

    /// Set the chunk size in bytes.
    pub fn chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the number of retries per chunk.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base delay of the exponential backoff.
    pub fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Enable or disable compatibility mode.
    pub fn compatibility_mode(mut self, enabled: bool) -> Self {
        self.compatibility_mode = enabled;
        self
    }

    /// Delay to wait after failed attempt number `attempt` (zero-based).
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.retry_base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Chunk size actually used: at least one byte.
    pub(crate) fn effective_chunk_size(&self) -> u64 {
        self.chunk_size.max(1)
    }

    /// Number of workers for a plan of `chunks` chunks.
    pub(crate) fn worker_count(&self, chunks: usize) -> usize {
        self.max_threads.max(1).min(chunks)
    }
}
