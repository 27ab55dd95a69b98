//! The backing-store capability the archive core is generic over.
//!
//! Anything that can report its total size and serve positional, exact-length
//! reads can back an [`Archive`](crate::archive::Archive) — a local file, an
//! in-memory buffer, an object store, or a remote file reached over SFTP. The
//! core never assumes the store is seekable or stateful between calls; each
//! [`ByteSource::pread`] call is self-contained.

use crate::error::{Error, Result};
use bytes::Bytes;

/// A positional, random-access byte source.
///
/// Implementations must be safe to call from a single thread of control; the
/// archive core never calls `pread`/`size` concurrently on the same instance,
/// though it does not require `Sync` either (adapters that are cheap to clone,
/// e.g. ones wrapping a client handle, can still be shared across independently
/// opened archives).
pub trait ByteSource {
    /// Total size of the backing object, in bytes.
    fn size(&self) -> Result<u64>;

    /// Read exactly `length` bytes starting at `offset`.
    ///
    /// Implementations MUST return exactly `length` bytes or an error — a short
    /// read without an error is an adapter contract violation and callers are
    /// entitled to treat it as [`Error::Adapter`].
    fn pread(&self, offset: u64, length: usize) -> Result<Bytes>;
}

/// Validates that an adapter returned exactly as many bytes as requested,
/// converting a silent short read into a proper protocol error.
pub(crate) fn expect_exact(buf: Bytes, length: usize) -> Result<Bytes> {
    if buf.len() != length {
        return Err(Error::adapter(format!(
            "adapter returned {} bytes, expected exactly {}",
            buf.len(),
            length
        )));
    }
    Ok(buf)
}
