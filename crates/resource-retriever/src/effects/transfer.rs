use std::io::{ErrorKind, Read};
use std::ops::ControlFlow;
use std::path::Path;

use crate::core::Resolved;
use crate::data::{HandleId, MemoryResource, Progress, ProgressMonitor, RetrieverOptions};
use crate::effects::TransferHandle;
use crate::error::FetchError;

/// Per-call progress observer. Returning [`ControlFlow::Break`] aborts the
/// transfer at the next update.
pub type Observer<'a> = &'a mut dyn FnMut(&Progress) -> ControlFlow<()>;

const MAX_SIZE: u64 = u32::MAX as u64;

/// Upper bound on the up-front allocation trusted from a Content-Length.
const MAX_PREALLOC: u64 = 64 * 1024 * 1024;

/// Executes fetches for resolved targets and publishes their progress.
#[derive(Debug)]
pub struct TransferEngine {
    handle:  TransferHandle,
    monitor: ProgressMonitor,
}

impl TransferEngine {
    pub fn new(options: &RetrieverOptions) -> Result<Self, FetchError> {
        Ok(Self::with_monitor(
            TransferHandle::open(options)?,
            ProgressMonitor::new(),
        ))
    }

    pub fn with_monitor(handle: TransferHandle, monitor: ProgressMonitor) -> Self {
        Self { handle, monitor }
    }

    pub fn handle(&self) -> &TransferHandle {
        &self.handle
    }

    pub fn monitor(&self) -> &ProgressMonitor {
        &self.monitor
    }

    /// Fetch `target` fully into memory, blocking until done.
    pub fn fetch(
        &mut self,
        target: &Resolved,
        observer: Observer<'_>,
    ) -> Result<MemoryResource, FetchError> {
        tracing::debug!(resource = %target, strategy = %target.strategy(), "fetching");
        let resource = match target {
            Resolved::Local(path) => self.fetch_local(path, observer),
            Resolved::Network(url) => self.fetch_network(url, observer),
        }?;
        tracing::debug!(resource = %target, bytes = resource.size(), "fetched");
        Ok(resource)
    }

    fn fetch_local(
        &mut self,
        path: &Path,
        observer: Observer<'_>,
    ) -> Result<MemoryResource, FetchError> {
        let buffer = resource_fs::read_exact(path, MAX_SIZE)?;
        let len = buffer.len() as u64;
        report(&self.monitor, self.handle.id(), Some(len), len, observer)?;
        MemoryResource::try_from(buffer).map_err(|_| FetchError::TooLarge(len))
    }

    fn fetch_network(
        &mut self,
        url: &str,
        observer: Observer<'_>,
    ) -> Result<MemoryResource, FetchError> {
        let id = self.handle.id();
        let chunk_size = self.handle.chunk_size();
        let mut response = self.handle.begin(url).send().map_err(|e| {
            tracing::warn!(url, error = %e, "transfer failed");
            FetchError::transfer(&e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "transfer returned error status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let total = response.content_length();
        let mut buffer = Vec::with_capacity(total.map_or(0, |t| t.min(MAX_PREALLOC) as usize));
        let mut chunk = vec![0u8; chunk_size];
        report(&self.monitor, id, total, 0, observer)?;

        loop {
            let n = match response.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::warn!(url, error = %e, "transfer interrupted");
                    return Err(FetchError::transfer(&e));
                }
            };
            buffer.extend_from_slice(&chunk[..n]);
            let received = buffer.len() as u64;
            if received > MAX_SIZE {
                return Err(FetchError::TooLarge(received));
            }
            tracing::trace!(url, received, total, "received chunk");
            report(&self.monitor, id, total, received, observer)?;
        }

        let received = buffer.len() as u64;
        MemoryResource::try_from(buffer).map_err(|_| FetchError::TooLarge(received))
    }
}

fn report(
    monitor: &ProgressMonitor,
    handle: HandleId,
    total: Option<u64>,
    transferred: u64,
    observer: Observer<'_>,
) -> Result<(), FetchError> {
    let progress = Progress::new(total, transferred, handle);
    monitor.set(progress);
    match observer(&progress) {
        ControlFlow::Continue(()) => Ok(()),
        ControlFlow::Break(()) => {
            tracing::debug!(%handle, transferred, "transfer aborted by observer");
            Err(FetchError::Aborted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn engine() -> TransferEngine {
        TransferEngine::new(&RetrieverOptions::default()).unwrap()
    }

    #[test]
    fn test_fetch_local_records_progress() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, b"rate: 10\n").unwrap();

        let mut engine = engine();
        let mut seen = Vec::new();
        let resource = engine
            .fetch(&Resolved::Local(path), &mut |p: &Progress| {
                seen.push(*p);
                ControlFlow::Continue(())
            })
            .unwrap();

        assert_eq!(resource.as_slice(), b"rate: 10\n");
        assert_eq!(seen.len(), 1);
        let progress = engine.monitor().get();
        assert_eq!(progress.total_bytes, Some(9));
        assert_eq!(progress.bytes_transferred, 9);
        assert_eq!(progress.handle, Some(engine.handle().id()));
        assert!(progress.updated_at.is_some());
        assert_eq!(engine.handle().transfers(), 0);
    }

    #[test]
    fn test_fetch_local_missing() {
        let dir = tempdir().unwrap();
        let mut engine = engine();

        let err = engine
            .fetch(
                &Resolved::Local(dir.path().join("missing.bin")),
                &mut |_: &Progress| ControlFlow::Continue(()),
            )
            .unwrap_err();
        assert!(matches!(err, FetchError::Io(resource_fs::Error::NotFound { .. })));
        assert_eq!(engine.monitor().get(), Progress::default());
    }

    #[test]
    fn test_observer_break_aborts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"abc").unwrap();

        let err = engine()
            .fetch(&Resolved::Local(path), &mut |_: &Progress| ControlFlow::Break(()))
            .unwrap_err();
        assert!(matches!(err, FetchError::Aborted));
    }
}
