use std::ops::ControlFlow;

use resource_package::{PackageLocator, SearchPathLocator};

use crate::core::resolve;
use crate::data::{HandleId, MemoryResource, Progress, ProgressMonitor, RetrieverOptions};
use crate::effects::TransferEngine;
use crate::error::{FetchError, RetrievalError, Result};

/// Retrieves resources by identifier into memory.
///
/// A retriever owns one transfer handle for its whole life so repeated
/// retrievals from the same host keep connections open. It is not `Clone`;
/// `get` takes `&mut self`, so calls on one retriever are sequential.
///
/// # Examples
///
/// ```no_run
/// use resource_retriever::Retriever;
///
/// let mut retriever = Retriever::new()?;
/// let resource = retriever.get("package://robot_description/urdf/robot.urdf")?;
/// println!("{} bytes", resource.size());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Retriever<L = SearchPathLocator> {
    locator: L,
    engine:  TransferEngine,
}

impl Retriever<SearchPathLocator> {
    /// Build a retriever that finds packages through the environment search
    /// path (see [`SearchPathLocator::from_env`]).
    pub fn new() -> std::result::Result<Self, FetchError> {
        Self::with_locator(SearchPathLocator::from_env())
    }
}

impl<L: PackageLocator> Retriever<L> {
    pub fn with_locator(locator: L) -> std::result::Result<Self, FetchError> {
        Self::with_options(locator, RetrieverOptions::default())
    }

    pub fn with_options(
        locator: L,
        options: RetrieverOptions,
    ) -> std::result::Result<Self, FetchError> {
        Ok(Self {
            locator,
            engine: TransferEngine::new(&options)?,
        })
    }

    /// Retrieve `identifier` fully into memory.
    ///
    /// Accepts `package://<name>/<path>`, `file://<path>`, bare filesystem
    /// paths and network URLs.
    ///
    /// # Errors
    ///
    /// Any failure is returned as a [`RetrievalError`] carrying the
    /// identifier and the stage that failed.
    pub fn get(&mut self, identifier: &str) -> Result<MemoryResource> {
        self.get_with_progress(identifier, |_| ControlFlow::Continue(()))
    }

    /// Like [`get`](Self::get), also handing every progress update to
    /// `observer`. Returning [`ControlFlow::Break`] cancels the transfer.
    pub fn get_with_progress<F>(
        &mut self,
        identifier: &str,
        mut observer: F,
    ) -> Result<MemoryResource>
    where
        F: FnMut(&Progress) -> ControlFlow<()>,
    {
        let target = resolve(identifier, &self.locator)
            .map_err(|e| RetrievalError::resolve(identifier, e))?;
        self.engine
            .fetch(&target, &mut observer)
            .map_err(|e| RetrievalError::fetch(identifier, e))
    }

    /// Latest progress record written by this retriever.
    pub fn progress(&self) -> Progress {
        self.engine.monitor().get()
    }

    pub fn set_progress(&self, progress: Progress) {
        self.engine.monitor().set(progress);
    }

    /// A handle on the progress record for polling from other threads.
    pub fn monitor(&self) -> ProgressMonitor {
        self.engine.monitor().clone()
    }

    pub fn handle_id(&self) -> HandleId {
        self.engine.handle().id()
    }

    /// Number of network transfers performed through the owned handle.
    pub fn transfers(&self) -> u64 {
        self.engine.handle().transfers()
    }

    pub fn locator(&self) -> &L {
        &self.locator
    }
}
