//! The per-resource download state machine.
//!
//! ```text
//! Idle -> Probing -> SingleStream -> Completed | Failed | Cancelled
//!                 \-> Chunked ------/
//! ```
//!
//! In the chunked path the resource is preallocated and split into
//! disjoint regions, one per chunk. Workers claim chunk indices from a
//! shared atomic cursor and each region is only ever written by the worker
//! holding its chunk, so the regions need no coordination beyond the
//! cursor and the shared byte counter.

use super::options::DownloadTaskOptions;
use super::probe::probe;
use super::progress::ProgressCounter;
use crate::download::DownloadItem;
use crate::error::{Error, Result};
use crate::http::{parse_content_range_bounds, parse_content_range_total};
use crate::range::{plan_chunks, ByteRange};

use futures::future::try_join_all;
use futures::StreamExt;
use indicatif::ProgressBar;
use reqwest::header::{CONTENT_RANGE, RANGE};
use reqwest::StatusCode;
use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Lifecycle of a [`DownloadTask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Created, `download()` not called yet.
    Idle,
    /// Waiting for the HEAD probe.
    Probing,
    /// Fetching the whole resource in one request.
    SingleStream,
    /// Fetching byte-range chunks.
    Chunked,
    /// The resource was fully downloaded.
    Completed,
    /// A transfer failed permanently.
    Failed,
    /// The task was shut down.
    Cancelled,
}

impl TaskState {
    /// Whether no further transition can happen.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Failed | TaskState::Cancelled
        )
    }
}

/// One chunk's region of the task buffer.
type ChunkSlot<'a> = Mutex<&'a mut [u8]>;

/// Downloads one resource into memory.
///
/// `download()` runs the transfer; `shutdown()` may be called concurrently
/// from anywhere holding a reference (share the task through an `Arc`).
pub struct DownloadTask {
    client: ClientWithMiddleware,
    item: DownloadItem,
    options: DownloadTaskOptions,
    shutdown: CancellationToken,
    progress: ProgressCounter,
    state: Mutex<TaskState>,
    progress_bar: Option<ProgressBar>,
}

impl fmt::Debug for DownloadTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadTask")
            .field("item", &self.item)
            .field("options", &self.options)
            .field("state", &self.state())
            .field("downloaded", &self.downloaded())
            .field("file_size", &self.file_size())
            .finish()
    }
}

impl DownloadTask {
    /// Creates an idle task for `item`.
    pub fn new(client: ClientWithMiddleware, item: DownloadItem, options: DownloadTaskOptions) -> Self {
        Self {
            client,
            item,
            options,
            shutdown: CancellationToken::new(),
            progress: ProgressCounter::default(),
            state: Mutex::new(TaskState::Idle),
            progress_bar: None,
        }
    }

    /// Mirror progress onto a terminal progress bar.
    pub fn with_progress_bar(mut self, progress_bar: ProgressBar) -> Self {
        self.progress_bar = Some(progress_bar);
        self
    }

    /// The item being downloaded.
    pub fn item(&self) -> &DownloadItem {
        &self.item
    }

    /// The options this task runs with.
    pub fn options(&self) -> &DownloadTaskOptions {
        &self.options
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TaskState {
        *self.lock_state()
    }

    /// Bytes durably written so far.
    pub fn downloaded(&self) -> u64 {
        self.progress.downloaded()
    }

    /// Total size of the resource, once known.
    pub fn file_size(&self) -> Option<u64> {
        self.progress.file_size()
    }

    /// Whether [`shutdown`](Self::shutdown) was called.
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Cancel the task.
    ///
    /// In-flight requests are aborted, no further chunk starts and a running
    /// [`download`](Self::download) fails with [`Error::Cancelled`].
    /// Calling it again has no effect.
    pub fn shutdown(&self) -> bool {
        if !self.shutdown.is_cancelled() {
            debug!(url = %self.item.url, "Shutdown requested");
            self.shutdown.cancel();
        }
        true
    }

    /// Download the resource and return its bytes.
    ///
    /// May only be called once per task.
    pub async fn download(&self) -> Result<Vec<u8>> {
        {
            let mut state = self.lock_state();
            if *state != TaskState::Idle {
                return Err(Error::Internal(format!(
                    "download of {} was already started",
                    self.item.url
                )));
            }
            *state = TaskState::Probing;
        }

        let result = self.run().await;

        let terminal = match &result {
            Ok(_) => TaskState::Completed,
            Err(e) if e.is_cancelled() => TaskState::Cancelled,
            Err(_) => TaskState::Failed,
        };
        self.set_state(terminal);
        result
    }

    async fn run(&self) -> Result<Vec<u8>> {
        if self.shutdown.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let url = &self.item.url;
        debug!(%url, "Probing");
        let outcome = self
            .cancellable(probe(&self.client, url, self.options.compatibility_mode))
            .await?;

        match outcome.chunkable_length() {
            Some(length) => self.download_chunked(length).await,
            None => self.download_single_stream().await,
        }
    }

    async fn download_single_stream(&self) -> Result<Vec<u8>> {
        self.set_state(TaskState::SingleStream);
        let url = &self.item.url;
        debug!(%url, "Downloading in a single stream");

        let response = self.send(self.client.get(url.clone())).await?;
        let body = self
            .cancellable(async { response.bytes().await.map_err(|e| Error::network(url, e)) })
            .await?;

        let length = body.len() as u64;
        self.progress.set_file_size(length);
        self.progress.set_downloaded(length);
        if let Some(pb) = &self.progress_bar {
            pb.set_length(length);
        }
        self.report(length);

        Ok(body.to_vec())
    }

    async fn download_chunked(&self, length: u64) -> Result<Vec<u8>> {
        self.set_state(TaskState::Chunked);
        let url = &self.item.url;

        let capacity = usize::try_from(length).map_err(|_| {
            Error::Internal(format!("{} bytes cannot be buffered in memory", length))
        })?;
        self.progress.set_file_size(length);
        if let Some(pb) = &self.progress_bar {
            pb.set_length(length);
        }

        let chunk_size = self.options.effective_chunk_size();
        let plan = plan_chunks(length, chunk_size);
        let workers = self.options.worker_count(plan.len());
        debug!(%url, length, chunks = plan.len(), workers, "Downloading in chunks");

        let mut buffer = vec![0u8; capacity];
        {
            let region_size = usize::try_from(chunk_size).unwrap_or(usize::MAX);
            let slots: Vec<ChunkSlot<'_>> = buffer.chunks_mut(region_size).map(Mutex::new).collect();
            debug_assert_eq!(slots.len(), plan.len());

            let cursor = AtomicUsize::new(0);
            let pool = (0..workers).map(|_| self.chunk_worker(&plan, &slots, &cursor));
            try_join_all(pool).await?;
        }

        Ok(buffer)
    }

    /// Claim chunks until none remain.
    async fn chunk_worker(
        &self,
        plan: &[ByteRange],
        slots: &[ChunkSlot<'_>],
        cursor: &AtomicUsize,
    ) -> Result<()> {
        loop {
            let index = cursor.fetch_add(1, Ordering::SeqCst);
            let (Some(range), Some(slot)) = (plan.get(index), slots.get(index)) else {
                return Ok(());
            };
            self.download_chunk(*range, slot).await?;
        }
    }

    /// Download one chunk, retrying with exponential backoff.
    async fn download_chunk(&self, range: ByteRange, slot: &ChunkSlot<'_>) -> Result<()> {
        let url = &self.item.url;
        let mut attempt = 0u32;

        loop {
            let mut added = 0u64;
            let error = match self.fetch_chunk(range, slot, &mut added).await {
                Ok(()) => return Ok(()),
                Err(Error::Cancelled) => return Err(Error::Cancelled),
                Err(error) => error,
            };

            if added > 0 {
                let loaded = self.progress.rollback(added);
                self.report(loaded);
            }

            let reason = match error {
                Error::Network { reason, .. } => reason,
                other => other.to_string(),
            };

            if attempt >= self.options.max_retries {
                warn!(%url, start = range.start, end = range.end, attempts = attempt + 1, %reason, "Chunk failed");
                return Err(Error::network(
                    url,
                    format!(
                        "bytes {}-{} failed after {} attempts: {}",
                        range.start,
                        range.end,
                        attempt + 1,
                        reason
                    ),
                ));
            }

            let delay = self.options.backoff_delay(attempt);
            warn!(%url, start = range.start, end = range.end, attempt, ?delay, %reason, "Chunk failed, retrying");
            self.cancellable(async {
                tokio::time::sleep(delay).await;
                Ok(())
            })
            .await?;
            attempt += 1;
        }
    }

    /// One attempt at a chunk. Writes start at the chunk's first byte, so a
    /// retry overwrites whatever a failed attempt left behind.
    ///
    /// Anything but `206` for exactly the requested bytes is rejected before
    /// the body is read, unless the chunk is the whole resource.
    async fn fetch_chunk(
        &self,
        range: ByteRange,
        slot: &ChunkSlot<'_>,
        added: &mut u64,
    ) -> Result<()> {
        let url = &self.item.url;
        let request = self
            .client
            .get(url.clone())
            .header(RANGE, range.header_value());
        let response = self.send(request).await?;

        let status = response.status();
        let whole_resource = range.start == 0 && self.progress.file_size() == Some(range.len());
        if status != StatusCode::PARTIAL_CONTENT && !whole_resource {
            return Err(Error::network(
                url,
                format!(
                    "expected 206 Partial Content for {}, got {}",
                    range.header_value(),
                    status
                ),
            ));
        }

        let content_range = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok());
        if let Some(content_range) = content_range {
            if let Some((start, end)) = parse_content_range_bounds(content_range) {
                if start != range.start || end != range.end {
                    return Err(Error::network(
                        url,
                        format!("received bytes {}-{} for {}", start, end, range.header_value()),
                    ));
                }
            }
            if let Some(total) = parse_content_range_total(content_range) {
                if Some(total) != self.progress.file_size() {
                    return Err(Error::network(
                        url,
                        format!("resource length changed to {} bytes", total),
                    ));
                }
            }
        }

        let expected = range.len();
        let mut written = 0u64;
        let mut body = response.bytes_stream();

        loop {
            let next = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => return Err(Error::Cancelled),
                next = body.next() => next,
            };
            let Some(fragment) = next else { break };
            let fragment = fragment.map_err(|e| Error::network(url, e))?;
            if fragment.is_empty() {
                continue;
            }

            let len = fragment.len() as u64;
            if written + len > expected {
                return Err(Error::network(
                    url,
                    format!(
                        "received more than the {} bytes requested by {}",
                        expected,
                        range.header_value()
                    ),
                ));
            }

            {
                let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
                let region: &mut [u8] = &mut guard;
                let offset = written as usize;
                region[offset..offset + fragment.len()].copy_from_slice(&fragment);
            }

            written += len;
            *added += len;
            let loaded = self.progress.add(len);
            self.report(loaded);
        }

        if written != expected {
            return Err(Error::network(
                url,
                format!("short body: {} of {} bytes", written, expected),
            ));
        }
        Ok(())
    }

    /// Send a request, racing it against shutdown, and require a success status.
    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let url = &self.item.url;
        let response = self
            .cancellable(async { request.send().await.map_err(|e| Error::network(url, e)) })
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::network(url, format!("unexpected status {}", status)));
        }
        Ok(response)
    }

    async fn cancellable<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => Err(Error::Cancelled),
            res = fut => res,
        }
    }

    fn report(&self, loaded: u64) {
        let total = self.progress.file_size().unwrap_or(loaded);
        self.item.observer().on_progress(loaded, total);
        if let Some(pb) = &self.progress_bar {
            pb.set_position(loaded);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, TaskState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, next: TaskState) {
        let mut state = self.lock_state();
        if !state.is_terminal() {
            *state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{create_http_client, HttpClientConfig};

    fn idle_task() -> DownloadTask {
        let client = create_http_client(HttpClientConfig::default()).unwrap();
        let item = DownloadItem::try_from("http://127.0.0.1:9/never.bin").unwrap();
        DownloadTask::new(client, item, DownloadTaskOptions::default())
    }

    #[test]
    fn test_new_task_is_idle() {
        let task = idle_task();
        assert_eq!(task.state(), TaskState::Idle);
        assert_eq!(task.downloaded(), 0);
        assert_eq!(task.file_size(), None);
        assert!(!task.is_shutdown());
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let task = idle_task();
        assert!(task.shutdown());
        assert!(task.shutdown());
        assert!(task.is_shutdown());
    }

    #[tokio::test]
    async fn test_shutdown_before_download() {
        let task = idle_task();
        task.shutdown();
        let err = task.download().await.unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(task.state(), TaskState::Cancelled);
    }

    #[tokio::test]
    async fn test_download_runs_once() {
        let task = idle_task();
        task.shutdown();
        let _ = task.download().await;
        assert!(matches!(task.download().await, Err(Error::Internal(_))));
        assert_eq!(task.state(), TaskState::Cancelled);
    }

    #[test]
    fn test_terminal_states() {
        assert!(TaskState::Completed.is_terminal());
        assert!(TaskState::Failed.is_terminal());
        assert!(TaskState::Cancelled.is_terminal());
        assert!(!TaskState::Chunked.is_terminal());
        assert!(!TaskState::Idle.is_terminal());
    }
}
