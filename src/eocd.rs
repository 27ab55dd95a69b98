//! Locates the End-Of-Central-Directory record (and its ZIP64 variant) by a
//! bounded backward scan through the archive's trailing comment.

use crate::buffer::{BackwardBuffer, BufferFault};
use crate::error::{Error, Result};
use crate::store::ByteSource;

const EOCD_SIGNATURE: [u8; 4] = 0x0605_4b50u32.to_le_bytes();
const ZIP64_LOCATOR_SIGNATURE: [u8; 4] = 0x0706_4b50u32.to_le_bytes();
const ZIP64_EOCD_SIGNATURE: [u8; 4] = 0x0606_4b50u32.to_le_bytes();

/// Maximum trailing comment the locator will scan through before giving up.
const MAX_COMMENT_SCAN: u64 = 5 * 1024 * 1024;

/// The EOCD record, promoted to 64-bit fields after any ZIP64 upgrade.
/// Transient: consumed once during `open` and not retained afterward.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Eocd {
    pub(crate) total_entries: u64,
    pub(crate) cd_size: u64,
    pub(crate) cd_offset: u64,
}

pub(crate) fn locate<S: ByteSource + ?Sized>(source: &S) -> Result<Eocd> {
    let size = source.size()?;
    let mut buf = BackwardBuffer::new(source, size);
    let mut consumed: u64 = 0;

    let eocd_offset = loop {
        let chunk = match buf.next_chunk(22) {
            Ok(c) => c,
            Err(BufferFault::ShortRead) => return Err(Error::MissingEOCD),
            Err(BufferFault::InvalidCount) => return Err(Error::MissingEOCD),
            Err(BufferFault::Source(e)) => return Err(e),
        };

        let comment_length = u16::from_le_bytes([chunk[20], chunk[21]]) as u64;
        if chunk[0..4] == EOCD_SIGNATURE && comment_length == consumed {
            log::debug!("found EOCD candidate after scanning {consumed} trailing bytes");
            let eocd_offset = buf.end() - 22;
            buf.move_backward_by(22).map_err(|_| Error::MissingEOCD)?;
            break eocd_offset;
        }

        buf.move_backward_by(1).map_err(|_| Error::MissingEOCD)?;
        consumed += 1;
        if consumed > MAX_COMMENT_SCAN {
            return Err(Error::MissingEOCD);
        }
    };

    let chunk = match buf.next_chunk(22) {
        Ok(c) => c,
        Err(BufferFault::Source(e)) => return Err(e),
        Err(_) => return Err(Error::MissingEOCD),
    };
    let total_entries_16 = u16::from_le_bytes([chunk[10], chunk[11]]);
    let cd_size_32 = u32::from_le_bytes([chunk[12], chunk[13], chunk[14], chunk[15]]);
    let cd_offset_32 = u32::from_le_bytes([chunk[16], chunk[17], chunk[18], chunk[19]]);

    let eocd32 = Eocd {
        total_entries: total_entries_16 as u64,
        cd_size: cd_size_32 as u64,
        cd_offset: cd_offset_32 as u64,
    };

    try_zip64_upgrade(source, &mut buf, eocd_offset, eocd32)
}

fn try_zip64_upgrade<S: ByteSource + ?Sized>(
    source: &S,
    buf: &mut BackwardBuffer<'_, S>,
    eocd_offset: u64,
    fallback: Eocd,
) -> Result<Eocd> {
    let locator = match buf.next_chunk(20) {
        Ok(c) => c,
        Err(BufferFault::Source(e)) => return Err(e),
        Err(_) => return Ok(fallback),
    };

    if locator[0..4] != ZIP64_LOCATOR_SIGNATURE {
        return Ok(fallback);
    }

    let _ = eocd_offset;
    let zip64_eocd_offset = u64::from_le_bytes(locator[8..16].try_into().unwrap());

    let record = source.pread(zip64_eocd_offset, 56)?;
    if record[0..4] != ZIP64_EOCD_SIGNATURE {
        return Err(Error::MissingEOCD);
    }

    let total_entries = u64::from_le_bytes(record[32..40].try_into().unwrap());
    let cd_size = u64::from_le_bytes(record[40..48].try_into().unwrap());
    let cd_offset = u64::from_le_bytes(record[48..56].try_into().unwrap());

    log::debug!("upgraded to ZIP64 EOCD: {total_entries} entries, cd at {cd_offset}");

    Ok(Eocd {
        total_entries,
        cd_size,
        cd_offset,
    })
}
