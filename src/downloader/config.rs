//! Configuration structures and defaults for the downloader.
//!
//! [`DownloaderOptions`] carries the download semantics (lane count and the
//! per-task options). [`DownloaderConfig`] adds everything around them: the
//! HTTP client setup and the progress display.
//!
//! # Examples
//!
//! ```rust
//! use rangedl::downloader::DownloaderOptions;
//! use rangedl::task::DownloadTaskOptions;
//!
//! let options = DownloaderOptions::default()
//!     .max_concurrent_downloads(5)
//!     .task_options(DownloadTaskOptions::default().max_threads(8));
//!
//! assert_eq!(options.max_concurrent_downloads, 5);
//! assert_eq!(options.task_options.max_threads, 8);
//! ```

use crate::http::HttpClientConfig;
use crate::progress::StyleOptions;
use crate::task::DownloadTaskOptions;

use reqwest_middleware::ClientWithMiddleware;

/// Default number of items downloaded at the same time.
pub const DEFAULT_MAX_CONCURRENT_DOWNLOADS: usize = 3;

/// Options controlling how a [`Downloader`](super::Downloader) schedules work.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloaderOptions {
    /// Number of lanes, i.e. items downloaded at the same time.
    pub max_concurrent_downloads: usize,
    /// Options handed to every [`DownloadTask`](crate::task::DownloadTask).
    pub task_options: DownloadTaskOptions,
}

impl Default for DownloaderOptions {
    fn default() -> Self {
        Self {
            max_concurrent_downloads: DEFAULT_MAX_CONCURRENT_DOWNLOADS,
            task_options: DownloadTaskOptions::default(),
        }
    }
}

impl DownloaderOptions {
    /// Set the number of lanes.
    pub fn max_concurrent_downloads(mut self, max_concurrent_downloads: usize) -> Self {
        self.max_concurrent_downloads = max_concurrent_downloads;
        self
    }

    /// Set the per-task options.
    pub fn task_options(mut self, task_options: DownloadTaskOptions) -> Self {
        self.task_options = task_options;
        self
    }

    /// Lane count actually used; at least one.
    pub(crate) fn lanes(&self) -> usize {
        self.max_concurrent_downloads.max(1)
    }
}

/// Configuration structure for the downloader.
#[derive(Clone, Default)]
pub struct DownloaderConfig {
    /// Scheduling and transfer options.
    pub options: DownloaderOptions,
    /// Setup of the HTTP client, unless one is injected.
    pub http: HttpClientConfig,
    /// Prebuilt client used instead of building one from `http`.
    pub client: Option<ClientWithMiddleware>,
    /// Downloader style options.
    pub style_options: StyleOptions,
    /// Hide main progress bar for single item runs.
    pub single_file_progress: bool,
}

impl std::fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("options", &self.options)
            .field("http", &self.http)
            .field("client", &self.client.is_some())
            .field("style_options", &self.style_options)
            .field("single_file_progress", &self.single_file_progress)
            .finish()
    }
}
