//! Byte accounting shared by a task's workers.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

const UNKNOWN: i64 = -1;

/// The `downloaded` counter and the resource size of one task.
#[derive(Debug)]
pub(crate) struct ProgressCounter {
    downloaded: AtomicU64,
    file_size: AtomicI64,
}

impl Default for ProgressCounter {
    fn default() -> Self {
        Self {
            downloaded: AtomicU64::new(0),
            file_size: AtomicI64::new(UNKNOWN),
        }
    }
}

impl ProgressCounter {
    pub(crate) fn set_file_size(&self, size: u64) {
        let size = i64::try_from(size).unwrap_or(i64::MAX);
        self.file_size.store(size, Ordering::SeqCst);
    }

    pub(crate) fn file_size(&self) -> Option<u64> {
        u64::try_from(self.file_size.load(Ordering::SeqCst)).ok()
    }

    pub(crate) fn downloaded(&self) -> u64 {
        self.downloaded.load(Ordering::SeqCst)
    }

    pub(crate) fn set_downloaded(&self, value: u64) {
        self.downloaded.store(value, Ordering::SeqCst);
    }

    /// Add `n` bytes and return the new total.
    pub(crate) fn add(&self, n: u64) -> u64 {
        self.downloaded.fetch_add(n, Ordering::SeqCst) + n
    }

    /// Remove `n` bytes counted by a failed attempt and return the new total.
    pub(crate) fn rollback(&self, n: u64) -> u64 {
        let previous = self
            .downloaded
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| {
                Some(v.saturating_sub(n))
            })
            .unwrap_or_else(|v| v);
        previous.saturating_sub(n)
    }
}
