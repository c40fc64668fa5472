use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::{Error, Result, from_io};

/// Return the length of a regular file without reading it.
///
/// Applies the same not-a-file check as [`read_exact`], so a caller can size
/// a resource before committing to read it.
pub fn file_len(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path).map_err(|e| from_io(path, e))?;
    if !metadata.is_file() {
        return Err(Error::NotAFile {
            path: path.to_path_buf(),
        });
    }
    Ok(metadata.len())
}

/// Read an entire file into a buffer of exactly its reported size.
///
/// Fails with [`Error::TooLarge`] before allocating when the file is longer
/// than `limit`, and with [`Error::Truncated`] when the file yields fewer
/// bytes than its metadata promised.
pub fn read_exact(path: impl AsRef<Path>, limit: u64) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| from_io(path, e))?;
    let metadata = file.metadata().map_err(|e| from_io(path, e))?;
    if !metadata.is_file() {
        return Err(Error::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let len = metadata.len();
    if len > limit {
        return Err(Error::TooLarge {
            path: path.to_path_buf(),
            len,
        });
    }
    let expected = usize::try_from(len).map_err(|_| Error::TooLarge {
        path: path.to_path_buf(),
        len,
    })?;

    let mut buffer = vec![0u8; expected];
    let mut filled = 0;
    while filled < expected {
        match file.read(&mut buffer[filled..]) {
            Ok(0) => {
                return Err(Error::Truncated {
                    path: path.to_path_buf(),
                    expected: len,
                    actual: filled as u64,
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(from_io(path, e)),
        }
    }

    tracing::trace!(path = %path.display(), bytes = len, "read file");
    Ok(buffer)
}

/// Read an entire file with no size limit.
///
/// Equivalent to [`read_exact`] with a limit of `u64::MAX`.
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    read_exact(path, u64::MAX)
}
