//! Error types for resource-retriever.
//!
//! Every failure reaching a caller is a [`RetrievalError`]. It renders as
//! `Error retrieving file [<identifier>]: <detail>` and keeps the stage and
//! the lower-level error for callers that want to match on them.

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Stage of a retrieval at which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Rewriting the identifier, before any I/O.
    Resolution,
    /// Reading a local file.
    Io,
    /// Network transfer.
    Transfer,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Resolution => write!(f, "resolution"),
            Stage::Io => write!(f, "io"),
            Stage::Transfer => write!(f, "transfer"),
        }
    }
}

/// Failure while turning an identifier into a fetchable target.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Could not parse package:// format into file:// format")]
    MalformedPackageUri,

    #[error("Package [{0}] does not exist")]
    UnknownPackage(String),

    #[error(transparent)]
    Locator(resource_package::Error),
}

impl From<resource_package::Error> for ResolveError {
    fn from(e: resource_package::Error) -> Self {
        match e {
            resource_package::Error::UnknownPackage(name) => ResolveError::UnknownPackage(name),
            other => ResolveError::Locator(other),
        }
    }
}

/// Failure while fetching a resolved target.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Io(#[from] resource_fs::Error),

    #[error("{0}")]
    Transfer(String),

    #[error("HTTP response code said error: {0}")]
    Status(u16),

    #[error("transfer aborted by progress callback")]
    Aborted,

    #[error("resource too large: received {0} bytes, limit is {max}", max = u32::MAX)]
    TooLarge(u64),

    #[error("failed to create transfer handle: {0}")]
    Handle(String),
}

impl FetchError {
    pub fn stage(&self) -> Stage {
        match self {
            FetchError::Io(_) => Stage::Io,
            _ => Stage::Transfer,
        }
    }

    /// Flatten an error and its sources into one line.
    pub(crate) fn transfer(err: &(dyn std::error::Error + 'static)) -> Self {
        FetchError::Transfer(describe(err))
    }
}

pub(crate) fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[derive(Debug, Error)]
enum Cause {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// The single error kind surfaced by [`Retriever`](crate::Retriever).
#[derive(Debug, Error)]
#[error("Error retrieving file [{identifier}]: {cause}")]
pub struct RetrievalError {
    identifier: String,
    #[source]
    cause:      Cause,
}

impl RetrievalError {
    pub fn resolve(identifier: impl Into<String>, err: ResolveError) -> Self {
        Self {
            identifier: identifier.into(),
            cause:      Cause::Resolve(err),
        }
    }

    pub fn fetch(identifier: impl Into<String>, err: FetchError) -> Self {
        Self {
            identifier: identifier.into(),
            cause:      Cause::Fetch(err),
        }
    }

    pub fn stage(&self) -> Stage {
        match &self.cause {
            Cause::Resolve(_) => Stage::Resolution,
            Cause::Fetch(e) => e.stage(),
        }
    }

    /// The identifier exactly as the caller passed it.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The lower-level message, without the identifier prefix.
    pub fn detail(&self) -> String {
        self.cause.to_string()
    }

    pub fn as_resolve(&self) -> Option<&ResolveError> {
        match &self.cause {
            Cause::Resolve(e) => Some(e),
            Cause::Fetch(_) => None,
        }
    }

    pub fn as_fetch(&self) -> Option<&FetchError> {
        match &self.cause {
            Cause::Fetch(e) => Some(e),
            Cause::Resolve(_) => None,
        }
    }
}
