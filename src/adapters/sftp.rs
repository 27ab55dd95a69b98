//! SFTP backing store over an established `ssh2` session.

use crate::error::Result;
use crate::store::{expect_exact, ByteSource};
use bytes::Bytes;
use ssh2::Sftp;
use std::io::{Read, Seek, SeekFrom};
use std::sync::Mutex;

/// A [`ByteSource`] backed by a remote file reached over SFTP.
///
/// Holds its own [`ssh2::File`] handle; like [`FileSource`](super::FileSource),
/// positioning is shared mutable state, so reads are serialised.
pub struct SftpSource {
    file: Mutex<ssh2::File>,
    len: u64,
}

impl SftpSource {
    /// Opens `remote_path` over `sftp` and caches its size via `stat`.
    pub fn open(sftp: &Sftp, remote_path: &str) -> Result<Self> {
        let path = std::path::Path::new(remote_path);
        let file = sftp.open(path)?;
        let len = file.stat()?.size.unwrap_or(0);
        Ok(SftpSource {
            file: Mutex::new(file),
            len,
        })
    }
}

impl ByteSource for SftpSource {
    fn size(&self) -> Result<u64> {
        Ok(self.len)
    }

    fn pread(&self, offset: u64, length: usize) -> Result<Bytes> {
        let mut file = self.file.lock().expect("sftp source mutex poisoned");
        file.seek(SeekFrom::Start(offset))?;
        let mut buf = vec![0u8; length];
        file.read_exact(&mut buf)?;
        expect_exact(Bytes::from(buf), length)
    }
}
