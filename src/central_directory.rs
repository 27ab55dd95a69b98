//! Decodes central-directory records into entry descriptors, merging ZIP64
//! extra-field overrides and enforcing the non-overlap (anti zip-bomb)
//! invariant as each record is parsed.

use crate::buffer::{BufferFault, ForwardBuffer};
use crate::datetime::decode_msdos_datetime;
use crate::entry::EntryDescriptor;
use crate::eocd::Eocd;
use crate::error::{Error, Result};
use crate::range_tree::RangeTree;
use crate::store::ByteSource;
use std::collections::HashMap;

const CENTRAL_DIRECTORY_SIGNATURE: [u8; 4] = 0x0201_4b50u32.to_le_bytes();
const ZIP64_EXTRA_ID: u16 = 0x0001;

/// Central-directory entries in on-disk order, plus a name-keyed lookup for
/// streaming. Duplicate names overwrite earlier entries in the lookup but
/// every record still participates in the overlap check.
pub(crate) struct CentralDirectory {
    pub(crate) order: Vec<String>,
    pub(crate) by_name: HashMap<String, EntryDescriptor>,
}

pub(crate) fn parse<S: ByteSource + ?Sized>(source: &S, eocd: Eocd) -> Result<CentralDirectory> {
    let limit = eocd
        .cd_offset
        .checked_add(eocd.cd_size)
        .ok_or(Error::InvalidCentralDirectory)?;
    let mut buf = ForwardBuffer::new(source, eocd.cd_offset, limit);
    let mut tree = RangeTree::new();
    let mut order = Vec::new();
    let mut by_name = HashMap::new();

    let mut index: u64 = 0;
    while buf.position() < limit {
        let header = match buf.next_chunk(46) {
            Ok(h) => h,
            Err(BufferFault::ShortRead) => return Err(Error::InvalidCentralDirectory),
            Err(BufferFault::InvalidCount) => return Err(Error::InvalidCentralDirectory),
            Err(BufferFault::Source(e)) => return Err(e),
        };

        if header[0..4] != CENTRAL_DIRECTORY_SIGNATURE {
            return Err(if index == 0 {
                Error::InvalidCDFileHeader
            } else {
                Error::InvalidCentralDirectory
            });
        }

        let bit_flag = u16::from_le_bytes([header[8], header[9]]);
        let compression_method = u16::from_le_bytes([header[10], header[11]]);
        let last_mod_time = u16::from_le_bytes([header[12], header[13]]);
        let last_mod_date = u16::from_le_bytes([header[14], header[15]]);
        let crc32 = u32::from_le_bytes(header[16..20].try_into().unwrap());
        let compressed_size_32 = u32::from_le_bytes(header[20..24].try_into().unwrap());
        let uncompressed_size_32 = u32::from_le_bytes(header[24..28].try_into().unwrap());
        let file_name_length = u16::from_le_bytes([header[28], header[29]]) as usize;
        let extra_field_length = u16::from_le_bytes([header[30], header[31]]) as usize;
        let comment_length = u16::from_le_bytes([header[32], header[33]]) as usize;
        let local_header_offset_32 = u32::from_le_bytes(header[42..46].try_into().unwrap());

        buf.move_forward_by(46).map_err(|_| Error::InvalidCentralDirectory)?;

        let name_bytes = read_and_advance(&mut buf, file_name_length)?;
        let extra_bytes = read_and_advance(&mut buf, extra_field_length)?;
        let _comment_bytes = read_and_advance(&mut buf, comment_length)?;

        let file_name = String::from_utf8_lossy(&name_bytes).into_owned();

        let mut compressed_size = compressed_size_32 as u64;
        let mut uncompressed_size = uncompressed_size_32 as u64;
        let mut local_header_offset = local_header_offset_32 as u64;

        let need_uncompressed = uncompressed_size_32 == 0xFFFF_FFFF;
        let need_compressed = compressed_size_32 == 0xFFFF_FFFF;
        let need_offset = local_header_offset_32 == 0xFFFF_FFFF;

        if need_uncompressed || need_compressed || need_offset {
            if let Some((u, c, o)) = find_zip64_overrides(
                &extra_bytes,
                need_uncompressed,
                need_compressed,
                need_offset,
            ) {
                if let Some(u) = u {
                    uncompressed_size = u;
                }
                if let Some(c) = c {
                    compressed_size = c;
                }
                if let Some(o) = o {
                    local_header_offset = o;
                }
            }
        }

        if tree.overlaps(local_header_offset, compressed_size) {
            return Err(Error::OverlappingEntries);
        }
        tree.insert(local_header_offset, compressed_size);

        let last_modified_datetime = decode_msdos_datetime(last_mod_date, last_mod_time);

        let descriptor = EntryDescriptor {
            file_name: file_name.clone(),
            bit_flag,
            compression_method,
            last_modified_datetime,
            crc32,
            compressed_size,
            uncompressed_size,
            local_header_offset,
        };

        if !by_name.contains_key(&file_name) {
            order.push(file_name.clone());
        }
        by_name.insert(file_name, descriptor);

        index += 1;
    }

    if index != eocd.total_entries {
        return Err(Error::InvalidCentralDirectory);
    }

    log::debug!("parsed {} central directory records", order.len());

    Ok(CentralDirectory { order, by_name })
}

fn read_and_advance<S: ByteSource + ?Sized>(
    buf: &mut ForwardBuffer<'_, S>,
    len: usize,
) -> Result<bytes::Bytes> {
    if len == 0 {
        return Ok(bytes::Bytes::new());
    }
    let data = match buf.next_chunk(len) {
        Ok(d) => d,
        Err(BufferFault::ShortRead) => return Err(Error::InvalidCentralDirectory),
        Err(BufferFault::InvalidCount) => return Err(Error::InvalidCentralDirectory),
        Err(BufferFault::Source(e)) => return Err(e),
    };
    buf.move_forward_by(len)
        .map_err(|_| Error::InvalidCentralDirectory)?;
    Ok(data)
}

/// Walks the `{id:16, size:16, data:size}` extra-field TLVs looking for the
/// ZIP64 record (id 0x0001) and pulls 64-bit overrides from it in the fixed
/// order `[uncompressed, compressed, offset]`, consuming only the overrides
/// that were actually sentinelled with `0xFFFFFFFF`.
fn find_zip64_overrides(
    extra: &[u8],
    need_uncompressed: bool,
    need_compressed: bool,
    need_offset: bool,
) -> Option<(Option<u64>, Option<u64>, Option<u64>)> {
    let mut i = 0usize;
    while i + 4 <= extra.len() {
        let id = u16::from_le_bytes([extra[i], extra[i + 1]]);
        let size = u16::from_le_bytes([extra[i + 2], extra[i + 3]]) as usize;
        let data_start = i + 4;
        if data_start + size > extra.len() {
            break;
        }
        if id == ZIP64_EXTRA_ID {
            let data = &extra[data_start..data_start + size];
            let mut cursor = 0usize;
            let mut uncompressed = None;
            let mut compressed = None;
            let mut offset = None;

            if need_uncompressed && cursor + 8 <= data.len() {
                uncompressed = Some(u64::from_le_bytes(data[cursor..cursor + 8].try_into().unwrap()));
                cursor += 8;
            }
            if need_compressed && cursor + 8 <= data.len() {
                compressed = Some(u64::from_le_bytes(data[cursor..cursor + 8].try_into().unwrap()));
                cursor += 8;
            }
            if need_offset && cursor + 8 <= data.len() {
                offset = Some(u64::from_le_bytes(data[cursor..cursor + 8].try_into().unwrap()));
            }

            return Some((uncompressed, compressed, offset));
        }
        i = data_start + size;
    }
    None
}
