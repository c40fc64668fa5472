//! Whole-file read primitives.
//!
//! Files are read in one shot into a buffer sized from their metadata, so a
//! file that shrinks while being read is reported as [`Error::Truncated`]
//! instead of silently returning fewer bytes.
//!
//! The retriever reads through [`read_exact`] with its size limit.
//! [`file_len`] and [`read_file`] are the unbounded counterparts for other
//! callers of this crate.

mod error;
mod read;

pub use error::{Error, Result, from_io};
pub use read::{file_len, read_exact, read_file};
