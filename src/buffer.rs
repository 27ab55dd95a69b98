//! A sliding, bidirectional read window over a [`ByteSource`], used by the EOCD
//! locator (backward) and the central-directory parser (forward).
//!
//! Both buffer flavours amortise positional reads into coalesced ranges of at
//! least `chunk_size` bytes, so that a byte-at-a-time scan (the EOCD backward
//! walk) or a field-at-a-time parse (the central-directory forward walk) does
//! not turn into one backing-store round-trip per byte or per field.

use crate::error::Error;
use crate::store::ByteSource;
use bytes::Bytes;

/// Default coalescing chunk size for buffered reads.
pub(crate) const DEFAULT_CHUNK_SIZE: usize = 65_000;

/// A buffer-internal fault, distinct from the archive-level [`Error`] enum:
/// the EOCD locator and central-directory parser translate these into the
/// appropriate domain error for their call site.
#[derive(Debug)]
pub(crate) enum BufferFault {
    /// The requested count exceeds the addressable range.
    ShortRead,
    /// `move_*_by(k)` was asked to move further than is currently buffered.
    InvalidCount,
    /// The backing store itself failed.
    Source(Error),
}

impl From<Error> for BufferFault {
    fn from(e: Error) -> Self {
        BufferFault::Source(e)
    }
}

pub(crate) type BufferResult<T> = std::result::Result<T, BufferFault>;

/// Forward-reading window, used by the central-directory parser.
///
/// `next_chunk(n)` returns the next `n` bytes starting at the window's current
/// start without consuming them; `move_forward_by(k)` then advances the start.
pub(crate) struct ForwardBuffer<'a, S: ByteSource + ?Sized> {
    source: &'a S,
    chunk_size: usize,
    /// Exclusive upper bound of the addressable range.
    limit: u64,
    /// Current window start, in file-absolute terms.
    start: u64,
    /// Buffered bytes for `[start, start + data.len())`.
    data: Vec<u8>,
}

impl<'a, S: ByteSource + ?Sized> ForwardBuffer<'a, S> {
    pub(crate) fn new(source: &'a S, start: u64, limit: u64) -> Self {
        ForwardBuffer {
            source,
            chunk_size: DEFAULT_CHUNK_SIZE,
            limit,
            start,
            data: Vec::new(),
        }
    }

    pub(crate) fn position(&self) -> u64 {
        self.start
    }

    pub(crate) fn next_chunk(&mut self, n: usize) -> BufferResult<Bytes> {
        let n_u64 = n as u64;
        if self.limit.saturating_sub(self.start) < n_u64 {
            return Err(BufferFault::ShortRead);
        }
        if self.data.len() < n {
            let need = n - self.data.len();
            let to_read = need.max(self.chunk_size);
            let read_start = self.start + self.data.len() as u64;
            let read_end = (read_start + to_read as u64).min(self.limit);
            if read_end > read_start {
                let got = self.source.pread(read_start, (read_end - read_start) as usize)?;
                self.data.extend_from_slice(&got);
            }
            if self.data.len() < n {
                return Err(BufferFault::ShortRead);
            }
        }
        Ok(Bytes::copy_from_slice(&self.data[..n]))
    }

    pub(crate) fn move_forward_by(&mut self, k: usize) -> BufferResult<()> {
        if k > self.data.len() {
            return Err(BufferFault::InvalidCount);
        }
        self.data.drain(0..k);
        self.start += k as u64;
        Ok(())
    }
}

/// Backward-reading window, used by the EOCD locator.
///
/// `next_chunk(n)` returns the last `n` bytes ending at the window's current
/// end without consuming them; `move_backward_by(k)` then retreats the end.
pub(crate) struct BackwardBuffer<'a, S: ByteSource + ?Sized> {
    source: &'a S,
    chunk_size: usize,
    /// File offset where `data` begins.
    buf_start: u64,
    /// Buffered bytes for `[buf_start, buf_start + data.len())`.
    data: Vec<u8>,
    /// Current window end (exclusive), in file-absolute terms.
    end: u64,
}

impl<'a, S: ByteSource + ?Sized> BackwardBuffer<'a, S> {
    pub(crate) fn new(source: &'a S, end: u64) -> Self {
        BackwardBuffer {
            source,
            chunk_size: DEFAULT_CHUNK_SIZE,
            buf_start: end,
            data: Vec::new(),
            end,
        }
    }

    pub(crate) fn end(&self) -> u64 {
        self.end
    }

    pub(crate) fn next_chunk(&mut self, n: usize) -> BufferResult<Bytes> {
        let n_u64 = n as u64;
        if self.end < n_u64 {
            return Err(BufferFault::ShortRead);
        }
        let required_start = self.end - n_u64;
        if required_start < self.buf_start {
            let needed = self.buf_start - required_start;
            let to_read = needed.max(self.chunk_size as u64);
            let new_buf_start = self.buf_start.saturating_sub(to_read);
            let read_len = (self.buf_start - new_buf_start) as usize;
            let got = self.source.pread(new_buf_start, read_len)?;
            let mut merged = Vec::with_capacity(read_len + self.data.len());
            merged.extend_from_slice(&got);
            merged.extend_from_slice(&self.data);
            self.data = merged;
            self.buf_start = new_buf_start;
        }
        let offset = (required_start - self.buf_start) as usize;
        Ok(Bytes::copy_from_slice(&self.data[offset..offset + n]))
    }

    pub(crate) fn move_backward_by(&mut self, k: usize) -> BufferResult<()> {
        let buffered = self.end - self.buf_start;
        if k as u64 > buffered {
            return Err(BufferFault::InvalidCount);
        }
        self.end -= k as u64;
        Ok(())
    }
}
