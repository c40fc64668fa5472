//! I/O for resource retrieval.
//!
//! The [`TransferHandle`] owns the reusable network session, and the
//! [`TransferEngine`] drives local reads and network transfers through it
//! while publishing progress.

mod handle;
mod transfer;

pub use handle::TransferHandle;
pub use transfer::{Observer, TransferEngine};
