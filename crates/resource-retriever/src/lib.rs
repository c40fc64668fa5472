//! Resolve resource identifiers into in-memory bytes.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Returned buffers, progress records and configuration
//! - [`core`] - Pure identifier classification and `package://` rewriting
//! - [`effects`] - Local reads and network transfers over a reusable handle
//!
//! [`Retriever`] ties them together behind a single `get` call.
//!
//! # Identifiers
//!
//! - `package://<name>/<relative-path>` - looked up through a
//!   [`PackageLocator`](resource_package::PackageLocator), then read locally
//! - `file://<path>` or a bare path - read from the local filesystem
//! - anything else - fetched as a network URL
//!
//! # Progress
//!
//! Each retriever publishes updates to its own [`ProgressMonitor`], which can
//! be cloned and polled from another thread while a transfer runs. The record
//! is overwritten by every update and reflects the most recent transfer only.

pub mod core;
pub mod data;
pub mod effects;
mod error;
mod retriever;

pub use data::{HandleId, MemoryResource, Progress, ProgressMonitor, RetrieverOptions};
pub use error::{FetchError, ResolveError, Result, RetrievalError, Stage};
pub use retriever::Retriever;

pub use resource_package::{ChainLocator, MapLocator, PackageLocator, SearchPathLocator};
