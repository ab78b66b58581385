//! Downloader module containing the queue, builder pattern, and configuration.
//!
//! This module provides the main [`Downloader`] struct and its associated builder pattern
//! for configuring and running a FIFO queue of in-memory downloads with a bounded
//! number of concurrent items.
//!
//! # Overview
//!
//! The downloader module is organized into three main components:
//!
//! - `downloader` - Core Downloader struct: queue, lanes and cancellation
//! - `builder` - DownloaderBuilder for flexible configuration using the builder pattern
//! - `config` - Options and configuration structures with their defaults
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use rangedl::downloader::DownloaderBuilder;
//! use rangedl::download::DownloadItem;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new().build()?;
//!
//! downloader.add_downloads(vec![
//!     DownloadItem::try_from("https://example.com/file1.zip")?,
//!     DownloadItem::try_from("https://example.com/file2.pdf")?,
//! ]);
//!
//! let summaries = downloader.start_downloads().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Cancelling From Elsewhere
//!
//! ```rust,no_run
//! use rangedl::downloader::DownloaderBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::hidden().build()?;
//! let handle = downloader.clone();
//! tokio::spawn(async move {
//!     tokio::time::sleep(std::time::Duration::from_secs(5)).await;
//!     handle.cancel_all_downloads();
//! });
//! downloader.start_downloads().await;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
#[allow(clippy::module_inception)]
pub mod downloader;

pub use builder::DownloaderBuilder;
pub use config::{DownloaderConfig, DownloaderOptions, DEFAULT_MAX_CONCURRENT_DOWNLOADS};
pub use downloader::Downloader;
