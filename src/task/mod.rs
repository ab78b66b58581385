//! Single-resource downloads.
//!
//! A [`DownloadTask`] probes a resource, then either streams it in one
//! request or splits it into byte-range chunks fetched by a bounded pool of
//! workers, each chunk retried with exponential backoff.
//!
//! - `task` - the [`DownloadTask`] state machine and chunk workers
//! - `options` - [`DownloadTaskOptions`] and their defaults
//! - `probe` - the HEAD probe deciding between the two strategies
//! - `progress` - the shared byte counter with per-attempt rollback
//!
//! # Examples
//!
//! ```rust,no_run
//! use rangedl::http::{create_http_client, HttpClientConfig};
//! use rangedl::task::{DownloadTask, DownloadTaskOptions};
//! use rangedl::DownloadItem;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let item = DownloadItem::try_from("https://example.com/large.bin")?;
//! let task = DownloadTask::new(client, item, DownloadTaskOptions::default().max_threads(8));
//! let bytes = task.download().await?;
//! # Ok(())
//! # }
//! ```

pub mod options;
pub mod probe;
pub(crate) mod progress;
#[allow(clippy::module_inception)]
pub mod task;

pub use options::{
    DownloadTaskOptions, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_RETRIES, DEFAULT_MAX_THREADS,
    DEFAULT_RETRY_BASE_DELAY,
};
pub use probe::{probe, ProbeOutcome};
pub use task::{DownloadTask, TaskState};
