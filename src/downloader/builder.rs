//! Builder pattern implementation for creating Downloader instances.
//!
//! This module provides the [`DownloaderBuilder`] struct that implements the builder
//! pattern for configuring and creating [`Downloader`] instances. Every setter
//! overrides one field of the defaults; fields left alone keep them.
//!
//! # Examples
//!
//! ## Basic Builder Usage
//!
//! ```rust
//! use rangedl::downloader::DownloaderBuilder;
//!
//! # fn example() -> Result<(), rangedl::Error> {
//! let downloader = DownloaderBuilder::new()
//!     .max_concurrent_downloads(5)
//!     .max_threads(8)
//!     .max_retries(3)
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Headers and Compatibility Mode
//!
//! ```rust
//! use rangedl::downloader::DownloaderBuilder;
//! use reqwest::header::{HeaderValue, USER_AGENT};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new()
//!     .header(USER_AGENT, HeaderValue::from_static("MyApp/1.0"))
//!     .compatibility_mode(true)
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Hidden Progress Bars
//!
//! ```rust
//! use rangedl::downloader::DownloaderBuilder;
//!
//! // Create a downloader with no visible progress bars
//! let downloader = DownloaderBuilder::hidden().build();
//! ```

use super::config::{DownloaderConfig, DownloaderOptions};
use super::downloader::Downloader;
use crate::error::Result;
use crate::http::create_http_client;
use crate::progress::{ProgressBarOpts, StyleOptions};
use crate::task::DownloadTaskOptions;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest_middleware::ClientWithMiddleware;
use std::time::Duration;

/// A builder used to create a [`Downloader`].
///
/// ```rust
/// # fn main() -> Result<(), rangedl::Error> {
/// use rangedl::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().max_concurrent_downloads(2).chunk_size(512 * 1024).build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Convenience function to hide the progress bars.
    pub fn hidden() -> Self {
        let mut builder = DownloaderBuilder::default();
        builder.config.style_options =
            StyleOptions::new(ProgressBarOpts::hidden(), ProgressBarOpts::hidden());
        builder
    }

    /// Replace all scheduling and transfer options at once.
    pub fn options(mut self, options: DownloaderOptions) -> Self {
        self.config.options = options;
        self
    }

    /// Set the number of items downloaded at the same time.
    pub fn max_concurrent_downloads(mut self, max_concurrent_downloads: usize) -> Self {
        self.config.options.max_concurrent_downloads = max_concurrent_downloads;
        self
    }

    /// Replace the per-task options at once.
    pub fn task_options(mut self, task_options: DownloadTaskOptions) -> Self {
        self.config.options.task_options = task_options;
        self
    }

    /// Set the number of concurrent chunk requests per item.
    pub fn max_threads(mut self, max_threads: usize) -> Self {
        self.config.options.task_options.max_threads = max_threads;
        self
    }

    /// Set the chunk size in bytes.
    pub fn chunk_size(mut self, chunk_size: u64) -> Self {
        self.config.options.task_options.chunk_size = chunk_size;
        self
    }

    /// Set the number of retries per chunk.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.options.task_options.max_retries = max_retries;
        self
    }

    /// Set the delay before the first chunk retry. It doubles on each attempt.
    pub fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.config.options.task_options.retry_base_delay = delay;
        self
    }

    /// Read the resource length from `X-Length-Backup` when the probe has it.
    pub fn compatibility_mode(mut self, enabled: bool) -> Self {
        self.config.options.task_options.compatibility_mode = enabled;
        self
    }

    /// Set the number of transport-level retries for transient failures.
    ///
    /// Off by default. These happen below the chunk retry loop, so each
    /// chunk attempt may issue up to `retries + 1` requests.
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.http.retries = retries;
        self
    }

    /// Route every request through `proxy`.
    pub fn proxy(mut self, proxy: reqwest::Proxy) -> Self {
        self.config.http.proxy = Some(proxy);
        self
    }

    /// Set the downloader style options.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Hide the main progress bar when downloading a single item.
    ///
    /// The item's own bar is still shown. The main bar is still shown when
    /// downloading several items.
    pub fn single_file_progress(mut self, single_file: bool) -> Self {
        self.config.single_file_progress = single_file;
        self
    }

    /// Use a prebuilt client instead of building one.
    ///
    /// `retries`, `proxy` and the headers are then ignored.
    pub fn client(mut self, client: ClientWithMiddleware) -> Self {
        self.config.client = Some(client);
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.http.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers sent with every request.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be merged into a single one.
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue, HeaderMap};
    /// use rangedl::downloader::DownloaderBuilder;
    ///
    /// let ua = HeaderValue::from_static("curl/7.87");
    ///
    /// let builder = DownloaderBuilder::new()
    ///     .headers(HeaderMap::from_iter([(header::USER_AGENT, ua)]));
    /// ```
    ///
    /// See also [`header()`].
    ///
    /// [`header()`]: DownloaderBuilder::header
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.http.headers = Some(new);
        self
    }

    /// Add one http header sent with every request.
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue};
    /// use rangedl::downloader::DownloaderBuilder;
    ///
    /// let builder = DownloaderBuilder::new()
    ///     .header(header::USER_AGENT, HeaderValue::from_static("rangedl"))
    ///     .header(header::AUTHORIZATION, HeaderValue::from_static("Basic aGk6MTIzNDU2Cg=="));
    /// ```
    ///
    /// See also [`headers()`].
    ///
    /// [`headers()`]: DownloaderBuilder::headers
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.http.headers = Some(new);
        self
    }

    /// Create the [`Downloader`] with the specified options.
    ///
    /// Fails only when the HTTP client cannot be built.
    pub fn build(self) -> Result<Downloader> {
        let DownloaderConfig {
            options,
            http,
            client,
            style_options,
            single_file_progress,
        } = self.config;

        let client = match client {
            Some(client) => client,
            None => create_http_client(http)?,
        };

        Ok(Downloader::new(
            client,
            options,
            style_options,
            single_file_progress,
        ))
    }
}
