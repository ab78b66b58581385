//! Per-item notifications.

use crate::error::Error;

use std::fmt;
use std::sync::Arc;

/// Receives the events of one download item.
///
/// Every method has a no-op default. Methods may be called from any worker
/// of the item's task, hence `Send + Sync`.
pub trait DownloadObserver: Send + Sync {
    /// Bytes written so far out of the resource's total length.
    ///
    /// Non-decreasing except when a failing chunk attempt is rolled back.
    /// On success the last call reports `loaded == total`.
    fn on_progress(&self, _loaded: u64, _total: u64) {}

    /// The complete resource.
    fn on_success(&self, _data: Vec<u8>) {}

    /// The task failed or was cancelled while running.
    fn on_failed(&self, _error: &Error) {}
}

/// An observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl DownloadObserver for NoopObserver {}

type ProgressFn = Arc<dyn Fn(u64, u64) + Send + Sync>;
type SuccessFn = Arc<dyn Fn(Vec<u8>) + Send + Sync>;
type FailedFn = Arc<dyn Fn(&Error) + Send + Sync>;

/// A [`DownloadObserver`] assembled from closures.
///
/// ```rust
/// use rangedl::download::{Callbacks, DownloadObserver};
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use std::sync::Arc;
///
/// let seen = Arc::new(AtomicU64::new(0));
/// let sink = seen.clone();
/// let callbacks = Callbacks::new().on_progress(move |loaded, _| sink.store(loaded, Ordering::SeqCst));
/// DownloadObserver::on_progress(&callbacks, 42, 100);
/// assert_eq!(seen.load(Ordering::SeqCst), 42);
/// ```
#[derive(Default, Clone)]
pub struct Callbacks {
    progress: Option<ProgressFn>,
    success: Option<SuccessFn>,
    failed: Option<FailedFn>,
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_progress", &self.progress.is_some())
            .field("on_success", &self.success.is_some())
            .field("on_failed", &self.failed.is_some())
            .finish()
    }
}

impl Callbacks {
    /// Callbacks that do nothing until set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the progress callback.
    pub fn on_progress<F>(mut self, f: F) -> Self
    where
        F: Fn(u64, u64) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(f));
        self
    }

    /// Set the success callback.
    pub fn on_success<F>(mut self, f: F) -> Self
    where
        F: Fn(Vec<u8>) + Send + Sync + 'static,
    {
        self.success = Some(Arc::new(f));
        self
    }

    /// Set the failure callback.
    pub fn on_failed<F>(mut self, f: F) -> Self
    where
        F: Fn(&Error) + Send + Sync + 'static,
    {
        self.failed = Some(Arc::new(f));
        self
    }
}

impl DownloadObserver for Callbacks {
    fn on_progress(&self, loaded: u64, total: u64) {
        if let Some(ref f) = self.progress {
            f(loaded, total);
        }
    }

    fn on_success(&self, data: Vec<u8>) {
        if let Some(ref f) = self.success {
            f(data);
        }
    }

    fn on_failed(&self, error: &Error) {
        if let Some(ref f) = self.failed {
            f(error);
        }
    }
}
