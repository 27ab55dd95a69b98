//! "Quoted overlap" zip-bomb defense: two central-directory records pointing
//! at overlapping compressed-data ranges must be rejected before any entry
//! is streamed.

use zip_stream_core::{Archive, Error, MemorySource};

fn cd_record(name: &str, local_header_offset: u32, compressed_size: u32) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&0x0201_4b50u32.to_le_bytes());
    out.extend_from_slice(&20u16.to_le_bytes());
    out.extend_from_slice(&20u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // stored
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // crc, irrelevant: rejected before streaming
    out.extend_from_slice(&compressed_size.to_le_bytes());
    out.extend_from_slice(&compressed_size.to_le_bytes());
    out.extend_from_slice(&(name.len() as u16).to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&local_header_offset.to_le_bytes());
    out.extend_from_slice(name.as_bytes());
    out
}

/// Builds an archive whose two central-directory records claim overlapping
/// `[local_header_offset, local_header_offset + compressed_size)` ranges.
/// The local file headers themselves are never read in this path (the
/// overlap is rejected while still parsing the central directory), so they
/// are omitted entirely.
fn build_overlapping_archive() -> Vec<u8> {
    let mut out = Vec::new();
    let cd_start = out.len() as u32;
    let first = cd_record("first.bin", 0, 1000);
    let second = cd_record("second.bin", 500, 1000);
    out.extend_from_slice(&first);
    out.extend_from_slice(&second);
    let cd_size = out.len() as u32 - cd_start;

    out.extend_from_slice(&0x0605_4b50u32.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&cd_size.to_le_bytes());
    out.extend_from_slice(&cd_start.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out
}

#[test]
fn overlapping_entries_are_rejected_while_parsing_the_central_directory() {
    let bytes = build_overlapping_archive();
    let err = Archive::open(MemorySource::new(bytes)).unwrap_err();
    assert!(matches!(err, Error::OverlappingEntries));
}

#[test]
fn non_overlapping_entries_are_accepted() {
    let mut out = Vec::new();
    let cd_start = out.len() as u32;
    let first = cd_record("first.bin", 0, 500);
    let second = cd_record("second.bin", 500, 500);
    out.extend_from_slice(&first);
    out.extend_from_slice(&second);
    let cd_size = out.len() as u32 - cd_start;

    out.extend_from_slice(&0x0605_4b50u32.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&cd_size.to_le_bytes());
    out.extend_from_slice(&cd_start.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());

    let archive = Archive::open(MemorySource::new(out)).unwrap();
    assert_eq!(archive.len(), 2);
}
