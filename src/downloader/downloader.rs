//! Core downloader implementation: the FIFO queue and its lanes.
//!
//! [`Downloader::start_downloads`] runs a fixed number of lanes. Each lane
//! pops the next queued item, downloads it with a [`DownloadTask`], notifies
//! the item's observer and loops until the queue is empty. A failing item
//! never affects the others.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rangedl::download::{Callbacks, DownloadItem};
//! use rangedl::downloader::DownloaderBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new().max_concurrent_downloads(2).build()?;
//!
//! let item = DownloadItem::try_from("https://example.com/file1.zip")?
//!     .with_observer(Callbacks::new().on_success(|data| println!("got {} bytes", data.len())));
//! downloader.add_download(item);
//! downloader.add_download(DownloadItem::try_from("https://example.com/file2.pdf")?);
//!
//! for summary in downloader.start_downloads().await {
//!     println!("{} - {:?}", summary.url(), summary.status());
//! }
//! # Ok(())
//! # }
//! ```

use super::config::DownloaderOptions;
use crate::download::{DownloadItem, Status, Summary};
use crate::progress::{ProgressDisplay, StyleOptions};
use crate::task::{DownloadTask, DownloadTaskOptions};

use futures::future::join_all;
use indicatif::ProgressBar;
use reqwest_middleware::ClientWithMiddleware;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Represents the download controller.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main() -> Result<(), rangedl::Error> {
/// use rangedl::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build()?;
/// # Ok(())
/// # }
/// ```
///
/// Clones share the same queue and running tasks, so one clone can cancel
/// what another is running.
#[derive(Clone)]
pub struct Downloader {
    shared: Arc<Shared>,
}

struct Shared {
    client: ClientWithMiddleware,
    options: DownloaderOptions,
    style_options: StyleOptions,
    single_file_progress: bool,
    queue: Mutex<VecDeque<DownloadItem>>,
    live: Mutex<HashMap<u64, Arc<DownloadTask>>>,
    next_id: AtomicU64,
}

impl fmt::Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("options", &self.shared.options)
            .field("pending", &self.pending_downloads())
            .field("active", &self.active_downloads())
            .finish()
    }
}

impl Downloader {
    /// Creates a new Downloader with the given client and options.
    pub(crate) fn new(
        client: ClientWithMiddleware,
        options: DownloaderOptions,
        style_options: StyleOptions,
        single_file_progress: bool,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                client,
                options,
                style_options,
                single_file_progress,
                queue: Mutex::new(VecDeque::new()),
                live: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Gets the scheduling and transfer options.
    pub fn options(&self) -> &DownloaderOptions {
        &self.shared.options
    }

    /// Gets the number of lanes.
    pub fn max_concurrent_downloads(&self) -> usize {
        self.shared.options.max_concurrent_downloads
    }

    /// Gets the options handed to every task.
    pub fn task_options(&self) -> &DownloadTaskOptions {
        &self.shared.options.task_options
    }

    /// Number of items waiting in the queue.
    pub fn pending_downloads(&self) -> usize {
        self.lock_queue().len()
    }

    /// Number of tasks currently running.
    pub fn active_downloads(&self) -> usize {
        self.lock_live().len()
    }

    /// Append an item to the queue.
    pub fn add_download(&self, item: DownloadItem) {
        debug!(url = %item.url, "Queued");
        self.lock_queue().push_back(item);
    }

    /// Append several items to the queue, in order.
    pub fn add_downloads<I>(&self, items: I)
    where
        I: IntoIterator<Item = DownloadItem>,
    {
        let mut queue = self.lock_queue();
        for item in items {
            debug!(url = %item.url, "Queued");
            queue.push_back(item);
        }
    }

    /// Download everything in the queue.
    ///
    /// Items added while this runs are picked up by the running lanes.
    /// Returns one [`Summary`] per dispatched item, grouped by lane, once
    /// every lane is idle. Items removed by
    /// [`cancel_all_downloads`](Self::cancel_all_downloads) before being
    /// dispatched get none.
    pub async fn start_downloads(&self) -> Vec<Summary> {
        let progress_display = ProgressDisplay::new(
            self.shared.style_options.clone(),
            self.pending_downloads(),
            self.shared.single_file_progress,
        );

        let lanes = (0..self.shared.options.lanes()).map(|lane| self.run_lane(lane, &progress_display));
        let summaries = join_all(lanes).await.into_iter().flatten().collect();

        progress_display.finish();
        summaries
    }

    /// Drop every queued item and shut down every running task.
    ///
    /// Dropped items get no callback and never reach the network. Running
    /// tasks fail with [`Error::Cancelled`](crate::Error::Cancelled) and
    /// their observers get `on_failed`.
    pub fn cancel_all_downloads(&self) {
        let mut queue = self.lock_queue();
        let dropped = queue.len();
        queue.clear();

        let live = self.lock_live();
        debug!(dropped, running = live.len(), "Cancelling all downloads");
        for task in live.values() {
            task.shutdown();
        }
    }

    async fn run_lane(&self, lane: usize, progress_display: &ProgressDisplay) -> Vec<Summary> {
        let mut summaries = Vec::new();

        while let Some((id, task, pb)) = self.next_task(progress_display) {
            let url = task.item().url.clone();
            debug!(lane, %url, "Starting download");

            let summary = match task.download().await {
                Ok(data) => {
                    let size = data.len() as u64;
                    debug!(lane, %url, size, "Download completed");
                    task.item().observer().on_success(data);
                    Summary::new(url, size).with_status(Status::Success)
                }
                Err(error) => {
                    if error.is_cancelled() {
                        debug!(lane, %url, "Download cancelled");
                    } else {
                        warn!(lane, %url, %error, "Download failed");
                    }
                    task.item().observer().on_failed(&error);
                    Summary::from_error(url, task.downloaded(), &error)
                }
            };

            self.lock_live().remove(&id);
            progress_display.finish_child(pb);
            progress_display.increment_main();
            summaries.push(summary);
        }

        summaries
    }

    /// Pop the next item and register its task as live, atomically with
    /// respect to [`cancel_all_downloads`](Self::cancel_all_downloads).
    fn next_task(
        &self,
        progress_display: &ProgressDisplay,
    ) -> Option<(u64, Arc<DownloadTask>, ProgressBar)> {
        let mut queue = self.lock_queue();
        let item = queue.pop_front()?;

        let pb = progress_display.create_child_progress(item.filename());
        let task = DownloadTask::new(
            self.shared.client.clone(),
            item,
            self.shared.options.task_options.clone(),
        )
        .with_progress_bar(pb.clone());
        let task = Arc::new(task);

        let id = self.shared.next_id.fetch_add(1, Ordering::SeqCst);
        self.lock_live().insert(id, task.clone());
        Some((id, task, pb))
    }

    fn lock_queue(&self) -> MutexGuard<'_, VecDeque<DownloadItem>> {
        self.shared.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_live(&self) -> MutexGuard<'_, HashMap<u64, Arc<DownloadTask>>> {
        self.shared.live.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
