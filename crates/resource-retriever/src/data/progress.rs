use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};

/// Opaque identity of a transfer handle.
///
/// Progress records carry it so an observer can tell which handle produced
/// an update, and two retrievals can be checked to have used the same one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(u64);

impl HandleId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        HandleId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle#{}", self.0)
    }
}

/// Byte counts and timing of the most recent transfer update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    /// Total expected bytes, if the source reported a size.
    pub total_bytes: Option<u64>,

    /// Bytes received so far.
    pub bytes_transferred: u64,

    /// Wall-clock time of the update.
    pub updated_at: Option<DateTime<Utc>>,

    /// Handle that performed the transfer.
    pub handle: Option<HandleId>,
}

impl Progress {
    pub fn new(total_bytes: Option<u64>, bytes_transferred: u64, handle: HandleId) -> Self {
        Self {
            total_bytes,
            bytes_transferred,
            updated_at: Some(Utc::now()),
            handle: Some(handle),
        }
    }

    /// Percentage of completion, `None` when the total is unknown.
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        self.total_bytes.map(|total| {
            if total == 0 {
                100.0
            } else {
                (self.bytes_transferred as f64 / total as f64) * 100.0
            }
        })
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_bytes
            .is_some_and(|total| self.bytes_transferred >= total)
    }
}

/// Shared progress cell written by one retriever and readable from any
/// thread.
///
/// Clones observe the same record. A retriever overwrites it on every
/// update and never resets it, so it reflects the latest transfer only.
#[derive(Debug, Clone, Default)]
pub struct ProgressMonitor {
    inner: Arc<Mutex<Progress>>,
}

impl ProgressMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Progress {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, progress: Progress) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = progress;
    }

    /// Returns `true` if both monitors share one record.
    pub fn same_record(&self, other: &ProgressMonitor) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
