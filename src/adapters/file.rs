//! Local-file backing store.

use crate::error::Result;
use crate::store::{expect_exact, ByteSource};
use bytes::Bytes;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Mutex;

/// A [`ByteSource`] backed by a local file handle.
///
/// `File` positioning is shared mutable state (`seek` then `read` is not
/// atomic), so reads are serialised behind a mutex even though the archive
/// core itself never calls into a single source concurrently.
pub struct FileSource {
    file: Mutex<File>,
    len: u64,
}

impl FileSource {
    /// Opens `path` and caches its size.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        Ok(FileSource {
            file: Mutex::new(file),
            len,
        })
    }

    /// Wraps an already-open file handle, reading its size from metadata.
    pub fn from_file(file: File) -> Result<Self> {
        let len = file.metadata()?.len();
        Ok(FileSource {
            file: Mutex::new(file),
            len,
        })
    }
}

impl ByteSource for FileSource {
    fn size(&self) -> Result<u64> {
        Ok(self.len)
    }

    fn pread(&self, offset: u64, length: usize) -> Result<Bytes> {
        let mut file = self.file.lock().expect("file source mutex poisoned");
        file.seek(SeekFrom::Start(offset))?;
        let mut buf = vec![0u8; length];
        file.read_exact(&mut buf)?;
        expect_exact(Bytes::from(buf), length)
    }
}
