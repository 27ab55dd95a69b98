//! The streaming entry reader: re-reads the local file header to find the
//! compressed-data start, then composes a chunk reader, a decompressor
//! (identity for STORED, raw inflate for DEFLATE), and a CRC-32 verifier into
//! a single pull-driven, single-shot byte-chunk iterator.

use crate::entry::EntryDescriptor;
use crate::error::{Error, Result};
use crate::store::ByteSource;
use bytes::Bytes;
use flate2::{Decompress, FlushDecompress, Status};
use std::collections::VecDeque;

const LOCAL_FILE_HEADER_SIGNATURE: [u8; 4] = 0x0403_4b50u32.to_le_bytes();

/// Options recognised by [`Archive::stream`](crate::archive::Archive::stream).
#[derive(Debug, Clone, Copy)]
pub struct StreamOptions {
    /// Size of each positional read against the compressed range. Every
    /// non-final input chunk has exactly this many bytes.
    pub chunk_size: usize,
}

impl Default for StreamOptions {
    fn default() -> Self {
        StreamOptions { chunk_size: 65_000 }
    }
}

/// Per-entry-stream lifecycle: `Init` and
/// `Reading` are folded into `pos < end`, `Finalising` is the CRC check after
/// the inflater is flushed, and `Done`/`Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Reading,
    Finalising,
    Done,
    Failed,
}

enum Decoder {
    Stored,
    Deflate(Box<Decompress>),
}

/// A lazy, single-shot sequence of decompressed byte chunks for one entry.
///
/// Dropping the iterator before exhaustion releases the inflater state
/// without running the CRC check: early abandonment means CRC is not verified.
pub struct EntryStream<'a, S: ByteSource + ?Sized> {
    source: &'a S,
    decoder: Decoder,
    pos: u64,
    end: u64,
    chunk_size: usize,
    crc: crc32fast::Hasher,
    expected_crc: u32,
    state: State,
    pending: VecDeque<Bytes>,
}

impl<'a, S: ByteSource + ?Sized> EntryStream<'a, S> {
    pub(crate) fn open(
        source: &'a S,
        entry: &EntryDescriptor,
        opts: StreamOptions,
    ) -> Result<Self> {
        let header = source.pread(entry.local_header_offset, 30)?;
        if header[0..4] != LOCAL_FILE_HEADER_SIGNATURE {
            return Err(Error::InvalidLocalFileHeader);
        }
        let compression_method = u16::from_le_bytes([header[8], header[9]]);
        let file_name_length = u16::from_le_bytes([header[26], header[27]]) as u64;
        let extra_field_length = u16::from_le_bytes([header[28], header[29]]) as u64;

        let data_start =
            entry.local_header_offset + 30 + file_name_length + extra_field_length;
        let data_end = data_start + entry.compressed_size;

        let decoder = match compression_method {
            0 => Decoder::Stored,
            8 => Decoder::Deflate(Box::new(Decompress::new(false))),
            other => return Err(Error::UnsupportedCompression(other)),
        };

        Ok(EntryStream {
            source,
            decoder,
            pos: data_start,
            end: data_end,
            chunk_size: opts.chunk_size,
            crc: crc32fast::Hasher::new(),
            expected_crc: entry.crc32,
            state: State::Reading,
            pending: VecDeque::new(),
        })
    }
}

impl<'a, S: ByteSource + ?Sized> Iterator for EntryStream<'a, S> {
    type Item = Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(chunk) = self.pending.pop_front() {
                self.crc.update(&chunk);
                return Some(Ok(chunk));
            }

            match self.state {
                State::Failed | State::Done => return None,
                State::Reading => {
                    if self.pos >= self.end {
                        self.state = State::Finalising;
                        continue;
                    }
                    let want = self.chunk_size.min((self.end - self.pos) as usize);
                    let raw = match self.source.pread(self.pos, want) {
                        Ok(raw) => raw,
                        Err(e) => {
                            self.state = State::Failed;
                            return Some(Err(e));
                        }
                    };
                    self.pos += want as u64;
                    let is_final = self.pos >= self.end;

                    match &mut self.decoder {
                        Decoder::Stored => self.pending.push_back(raw),
                        Decoder::Deflate(inflater) => {
                            let flush = if is_final {
                                FlushDecompress::Finish
                            } else {
                                FlushDecompress::None
                            };
                            match inflate_into(inflater, &raw, flush) {
                                Ok(out) => {
                                    if !out.is_empty() {
                                        self.pending.push_back(Bytes::from(out));
                                    }
                                }
                                Err(e) => {
                                    self.state = State::Failed;
                                    return Some(Err(e));
                                }
                            }
                        }
                    }
                    continue;
                }
                State::Finalising => {
                    if let Decoder::Deflate(inflater) = &mut self.decoder {
                        match inflate_into(inflater, &[], FlushDecompress::Finish) {
                            Ok(out) if !out.is_empty() => {
                                self.pending.push_back(Bytes::from(out));
                                continue;
                            }
                            Ok(_) => {}
                            Err(e) => {
                                self.state = State::Failed;
                                return Some(Err(e));
                            }
                        }
                    }

                    let got = self.crc.clone().finalize();
                    if got != self.expected_crc {
                        self.state = State::Failed;
                        return Some(Err(Error::CRCMismatch {
                            expected: self.expected_crc,
                            got,
                        }));
                    }
                    self.state = State::Done;
                    return None;
                }
            }
        }
    }
}

/// Drives `decompress.decompress` until all of `input` is consumed (or the
/// stream ends), returning the bytes produced.
fn inflate_into(decompress: &mut Decompress, input: &[u8], flush: FlushDecompress) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut remaining = input;
    let mut scratch = [0u8; 32 * 1024];

    loop {
        let before_in = decompress.total_in();
        let before_out = decompress.total_out();
        let status = decompress
            .decompress(remaining, &mut scratch, flush)
            .map_err(|e| Error::adapter(format!("inflate error: {e}")))?;

        let consumed = (decompress.total_in() - before_in) as usize;
        let produced = (decompress.total_out() - before_out) as usize;
        out.extend_from_slice(&scratch[..produced]);
        remaining = &remaining[consumed..];

        if status == Status::StreamEnd {
            break;
        }
        if remaining.is_empty() && produced == 0 {
            break;
        }
    }

    Ok(out)
}
