//! Hand-rolled ZIP archive construction shared by the integration tests.
//!
//! Every test builds its fixture at the byte level rather than shipping a
//! binary `.zip` file, so the exact bytes under test are visible in the test
//! itself.

use std::io::Write;

pub struct EntrySpec {
    pub name: &'static str,
    /// 0 = stored, 8 = deflate
    pub method: u16,
    pub data: Vec<u8>,
}

pub fn stored(name: &'static str, data: &[u8]) -> EntrySpec {
    EntrySpec { name, method: 0, data: data.to_vec() }
}

pub fn deflated(name: &'static str, data: &[u8]) -> EntrySpec {
    EntrySpec { name, method: 8, data: data.to_vec() }
}

/// Encodes `entries` into a well-formed ZIP archive (32-bit fields, no
/// ZIP64), returning the full archive bytes.
pub fn build_archive(entries: &[EntrySpec]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut local_offsets = Vec::new();
    let mut payloads = Vec::new();

    for entry in entries {
        let local_offset = out.len() as u32;
        local_offsets.push(local_offset);

        let payload = match entry.method {
            0 => entry.data.clone(),
            8 => raw_deflate(&entry.data),
            other => panic!("unsupported test fixture compression method {other}"),
        };
        let crc = crc32fast::hash(&entry.data);

        out.extend_from_slice(&0x0403_4b50u32.to_le_bytes());
        out.extend_from_slice(&20u16.to_le_bytes()); // version needed
        out.extend_from_slice(&0u16.to_le_bytes()); // flags
        out.extend_from_slice(&entry.method.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes()); // mod time
        out.extend_from_slice(&0u16.to_le_bytes()); // mod date
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&(entry.data.len() as u32).to_le_bytes());
        out.extend_from_slice(&(entry.name.len() as u16).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes()); // extra len
        out.extend_from_slice(entry.name.as_bytes());
        out.extend_from_slice(&payload);

        payloads.push((crc, payload.len() as u32, entry.data.len() as u32));
    }

    let cd_start = out.len() as u32;
    for (i, entry) in entries.iter().enumerate() {
        let (crc, compressed_size, uncompressed_size) = payloads[i];
        out.extend_from_slice(&0x0201_4b50u32.to_le_bytes());
        out.extend_from_slice(&20u16.to_le_bytes()); // version made by
        out.extend_from_slice(&20u16.to_le_bytes()); // version needed
        out.extend_from_slice(&0u16.to_le_bytes()); // flags
        out.extend_from_slice(&entry.method.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes()); // mod time
        out.extend_from_slice(&0u16.to_le_bytes()); // mod date
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&compressed_size.to_le_bytes());
        out.extend_from_slice(&uncompressed_size.to_le_bytes());
        out.extend_from_slice(&(entry.name.len() as u16).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes()); // extra len
        out.extend_from_slice(&0u16.to_le_bytes()); // comment len
        out.extend_from_slice(&0u16.to_le_bytes()); // disk start
        out.extend_from_slice(&0u16.to_le_bytes()); // internal attrs
        out.extend_from_slice(&0u32.to_le_bytes()); // external attrs
        out.extend_from_slice(&local_offsets[i].to_le_bytes());
        out.extend_from_slice(entry.name.as_bytes());
    }
    let cd_size = out.len() as u32 - cd_start;

    out.extend_from_slice(&0x0605_4b50u32.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // disk number
    out.extend_from_slice(&0u16.to_le_bytes()); // disk with cd
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    out.extend_from_slice(&cd_size.to_le_bytes());
    out.extend_from_slice(&cd_start.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // comment len

    out
}

/// Raw (headerless) DEFLATE, matching what `flate2::Decompress::new(false)`
/// expects to read back.
pub fn raw_deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}
