//! Error types for package lookup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("package '{0}' not found")]
    UnknownPackage(String),

    #[error("invalid package name '{0}'")]
    InvalidName(String),

    #[error("invalid package search path: {0}")]
    SearchPath(String),
}

pub type Result<T> = std::result::Result<T, Error>;
