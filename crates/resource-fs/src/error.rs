use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("not a regular file: {}", path.display())]
    NotAFile { path: PathBuf },

    #[error("file too large: {} is {len} bytes", path.display())]
    TooLarge { path: PathBuf, len: u64 },

    #[error("truncated read: {} expected {expected} bytes, got {actual}", path.display())]
    Truncated {
        path:     PathBuf,
        expected: u64,
        actual:   u64,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn path(&self) -> &Path {
        match self {
            Error::NotFound { path }
            | Error::PermissionDenied { path }
            | Error::NotAFile { path }
            | Error::TooLarge { path, .. }
            | Error::Truncated { path, .. }
            | Error::Read { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub fn from_io(path: &Path, err: std::io::Error) -> Error {
    let path = path.to_path_buf();
    match err.kind() {
        std::io::ErrorKind::NotFound => Error::NotFound { path },
        std::io::ErrorKind::PermissionDenied => Error::PermissionDenied { path },
        _ => Error::Read { path, source: err },
    }
}
