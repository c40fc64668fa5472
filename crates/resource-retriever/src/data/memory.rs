use std::ops::Deref;

use bytes::Bytes;

/// A retrieved resource held in memory, with its size.
///
/// The data is reference counted, so clones and slices taken from
/// [`MemoryResource::bytes`] share one allocation. `size` never exceeds the
/// length of `data`, and a default value owns no data and has size zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MemoryResource {
    data: Bytes,
    size: u32,
}

impl MemoryResource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of valid bytes.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.size as usize
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.size as usize]
    }

    /// Shared handle to the valid bytes.
    pub fn bytes(&self) -> Bytes {
        self.data.slice(..self.size as usize)
    }

    pub fn into_bytes(self) -> Bytes {
        let mut data = self.data;
        data.truncate(self.size as usize);
        data
    }
}

impl TryFrom<Vec<u8>> for MemoryResource {
    type Error = std::num::TryFromIntError;

    fn try_from(buffer: Vec<u8>) -> Result<Self, Self::Error> {
        let size = u32::try_from(buffer.len())?;
        Ok(Self {
            data: Bytes::from(buffer),
            size,
        })
    }
}

impl TryFrom<Bytes> for MemoryResource {
    type Error = std::num::TryFromIntError;

    fn try_from(data: Bytes) -> Result<Self, Self::Error> {
        let size = u32::try_from(data.len())?;
        Ok(Self { data, size })
    }
}

impl Deref for MemoryResource {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsRef<[u8]> for MemoryResource {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}
