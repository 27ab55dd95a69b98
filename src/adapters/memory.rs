//! In-memory backing store.

use crate::error::{Error, Result};
use crate::store::{expect_exact, ByteSource};
use bytes::Bytes;

/// A [`ByteSource`] over an owned, already-buffered archive.
///
/// This is the adapter the test suite exercises the core against, since it
/// needs no filesystem or network fixture to construct.
pub struct MemorySource {
    data: Bytes,
}

impl MemorySource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        MemorySource { data: data.into() }
    }
}

impl ByteSource for MemorySource {
    fn size(&self) -> Result<u64> {
        Ok(self.data.len() as u64)
    }

    fn pread(&self, offset: u64, length: usize) -> Result<Bytes> {
        let start = usize::try_from(offset)
            .map_err(|_| Error::adapter("offset out of range for in-memory source"))?;
        let end = start
            .checked_add(length)
            .ok_or_else(|| Error::adapter("range overflow for in-memory source"))?;
        if end > self.data.len() {
            return Err(Error::adapter(format!(
                "read [{start}, {end}) out of bounds for {}-byte buffer",
                self.data.len()
            )));
        }
        expect_exact(self.data.slice(start..end), length)
    }
}
