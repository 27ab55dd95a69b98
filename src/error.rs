//! Error types for the streaming ZIP reader.

use std::io;

/// Result type for zip-stream-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds that can occur while locating, parsing, or streaming a ZIP archive.
///
/// The message text on each variant is part of the interface: callers and tests
/// are allowed to match on the rendered string.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid zip file, missing EOCD record")]
    MissingEOCD,

    #[error("Invalid zip file, invalid central directory")]
    InvalidCentralDirectory,

    #[error("Invalid zip file, invalid central directory file header")]
    InvalidCDFileHeader,

    #[error("Invalid zip file, found overlapping zip entries")]
    OverlappingEntries,

    #[error("Compression method {0} is not supported")]
    UnsupportedCompression(u16),

    #[error("File {0} not present in the zip")]
    EntryNotFound(String),

    #[error("CRC mismatch. expected: {expected} got: {got}")]
    CRCMismatch { expected: u32, got: u32 },

    #[error("Invalid zip file, invalid local file header")]
    InvalidLocalFileHeader,

    #[error("adapter error: {0}")]
    Adapter(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[cfg(feature = "sftp")]
    #[error("sftp error: {0}")]
    Sftp(#[from] ssh2::Error),
}

impl Error {
    /// A backing-store `pread`/`size` failure, or a short read that violates the
    /// adapter contract (returning fewer than the requested bytes without an error).
    pub fn adapter(msg: impl Into<String>) -> Self {
        Error::Adapter(msg.into())
    }
}
