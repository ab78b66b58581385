//! Download summary functionality.
//!
//! This module contains the [`Summary`] struct and [`Status`] enum describing
//! how each dispatched item ended. Items dropped from the queue by a cancel
//! never started and get no summary.
//!
//! # Examples
//!
//! ```rust
//! use rangedl::download::{Status, Summary};
//! use reqwest::Url;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let url = Url::parse("https://example.com/file.zip")?;
//! let summary = Summary::new(url, 2048).with_status(Status::Success);
//!
//! match summary.status() {
//!     Status::Success => println!("Downloaded {} bytes", summary.size()),
//!     Status::Fail(msg) => println!("Download failed: {}", msg),
//!     Status::Cancelled => println!("Download cancelled"),
//!     Status::NotStarted => println!("Download not yet started"),
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::Error;
use reqwest::Url;

/// Download status enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Download failed with error message
    Fail(String),
    /// Download not yet started
    NotStarted,
    /// Download was cancelled while running
    Cancelled,
    /// Download completed successfully
    Success,
}

/// Represents the outcome of one dispatched download item.
#[derive(Debug, Clone)]
pub struct Summary {
    /// URL of the item.
    url: Url,
    /// Download size in bytes.
    size: u64,
    /// Status.
    status: Status,
}

impl Summary {
    /// Create a new [`Summary`].
    pub fn new(url: Url, size: u64) -> Self {
        Self {
            url,
            size,
            status: Status::NotStarted,
        }
    }

    /// Build the summary matching a task's error.
    pub fn from_error(url: Url, size: u64, error: &Error) -> Self {
        let summary = Self::new(url, size);
        if error.is_cancelled() {
            summary.with_status(Status::Cancelled)
        } else {
            summary.fail(error)
        }
    }

    /// Attach a status to a [`Summary`].
    pub fn with_status(self, status: Status) -> Self {
        Self { status, ..self }
    }

    /// Get the summary's URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the summary's size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get a reference to the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Whether the item completed successfully.
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Mark the summary as failed with a message.
    pub fn fail(self, msg: impl std::fmt::Display) -> Self {
        Self {
            status: Status::Fail(format!("{}", msg)),
            ..self
        }
    }
}
