//! The unit of work handed to a [`Downloader`](crate::Downloader).

use super::observer::{DownloadObserver, NoopObserver};
use crate::error::Error;

use reqwest::Url;
use std::convert::TryFrom;
use std::fmt;
use std::sync::Arc;

/// Represents a resource to be downloaded into memory.
///
/// Items are immutable once enqueued; cloning shares the observer.
#[derive(Clone)]
pub struct DownloadItem {
    /// URL of the resource to download.
    pub url: Url,
    observer: Arc<dyn DownloadObserver>,
}

impl fmt::Debug for DownloadItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadItem")
            .field("url", &self.url.as_str())
            .finish_non_exhaustive()
    }
}

impl DownloadItem {
    /// Creates a new [`DownloadItem`] with no observer.
    pub fn new(url: &Url) -> Self {
        Self {
            url: url.clone(),
            observer: Arc::new(NoopObserver),
        }
    }

    /// Attach an observer, replacing the current one.
    pub fn with_observer<O>(self, observer: O) -> Self
    where
        O: DownloadObserver + 'static,
    {
        self.with_shared_observer(Arc::new(observer))
    }

    /// Attach an already shared observer, replacing the current one.
    pub fn with_shared_observer(self, observer: Arc<dyn DownloadObserver>) -> Self {
        Self { observer, ..self }
    }

    /// The observer notified about this item.
    pub fn observer(&self) -> &dyn DownloadObserver {
        self.observer.as_ref()
    }

    /// A display name for the item: the last path segment of the URL,
    /// percent-decoded, or the host when the path is empty.
    pub fn filename(&self) -> String {
        let segment = self
            .url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty());

        match segment {
            Some(segment) => form_urlencoded::parse(segment.as_bytes())
                .map(|(key, val)| [key, val].concat())
                .collect(),
            None => self.url.host_str().unwrap_or_default().to_string(),
        }
    }
}

impl TryFrom<&Url> for DownloadItem {
    type Error = crate::error::Error;

    fn try_from(value: &Url) -> Result<Self, Self::Error> {
        match value.scheme() {
            "http" | "https" => Ok(DownloadItem::new(value)),
            scheme => Err(Error::InvalidUrl(format!(
                "The url \"{}\" uses unsupported scheme \"{}\"",
                value, scheme
            ))),
        }
    }
}

impl TryFrom<&str> for DownloadItem {
    type Error = crate::error::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Url::parse(value)
            .map_err(|e| {
                Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", value, e))
            })
            .and_then(|u| DownloadItem::try_from(&u))
    }
}
