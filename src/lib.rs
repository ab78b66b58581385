//! rangedl downloads HTTP(S) resources into memory, splitting each one into
//! byte-range chunks fetched concurrently with per-chunk retry.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rangedl::{DownloadItem, DownloaderBuilder, Error};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let reqwest_rs = "https://github.com/seanmonstar/reqwest/archive/refs/tags/v0.11.9.zip";
//! let downloader = DownloaderBuilder::new().max_threads(8).build()?;
//! downloader.add_download(DownloadItem::try_from(reqwest_rs)?);
//! downloader.start_downloads().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`range`] - Byte ranges, chunk planning, range validation and `Range` header handling
//! - [`task`] - The per-resource [`DownloadTask`] with its probe and chunk workers
//! - [`downloader`] - The queue-driven [`Downloader`] and [`DownloaderBuilder`]
//! - [`download`] - Download items, observers and summaries
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client setup and header helpers
//! - [`progress`] - Progress bar styling and display management

pub mod download;
pub mod downloader;
pub mod error;
pub mod http;
pub mod progress;
pub mod range;
pub mod task;

pub use download::{Callbacks, DownloadItem, DownloadObserver, NoopObserver, Status, Summary};
pub use downloader::{Downloader, DownloaderBuilder, DownloaderOptions};
pub use error::{Error, Result};
pub use http::{
    create_http_client, parse_content_range_bounds, parse_content_range_total, HttpClientConfig,
};
pub use progress::{ProgressBarOpts, StyleOptions};
pub use range::{
    forward_range, is_range_valid, parse_range_header, plan_chunks, validate_range,
    validate_ranges, ByteRange, ExceedPolicy, RangeValidationOptions,
};
pub use task::{DownloadTask, DownloadTaskOptions, TaskState};
