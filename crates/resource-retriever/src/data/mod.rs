//! Immutable data types for resource retrieval.
//!
//! This module contains the returned buffer type, the progress record and
//! the retriever configuration. None of them perform I/O.

pub mod memory;
pub mod options;
pub mod progress;

pub use memory::MemoryResource;
pub use options::RetrieverOptions;
pub use progress::{HandleId, Progress, ProgressMonitor};
