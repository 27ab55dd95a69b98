#[path = "support.rs"]
mod support;

use support::{build_archive, stored};
use zip_stream_core::{Archive, MemorySource, StreamOptions};

#[test]
fn small_chunk_size_still_reassembles_the_full_stored_payload() {
    let data: Vec<u8> = (0..250_000u32).map(|i| (i % 256) as u8).collect();
    let bytes = build_archive(&[stored("big.bin", &data)]);
    let archive = Archive::open(MemorySource::new(bytes)).unwrap();

    let opts = StreamOptions { chunk_size: 4096 };
    let mut out = Vec::new();
    let mut chunk_count = 0;
    for chunk in archive.stream_with_options("big.bin", opts).unwrap() {
        let chunk = chunk.unwrap();
        assert!(chunk.len() <= 4096);
        out.extend_from_slice(&chunk);
        chunk_count += 1;
    }
    assert_eq!(out, data);
    assert!(chunk_count >= data.len() / 4096);
}

#[test]
fn default_chunk_size_reassembles_a_small_payload_in_one_chunk() {
    let data = b"small enough to fit in a single default-sized chunk";
    let bytes = build_archive(&[stored("small.bin", data)]);
    let archive = Archive::open(MemorySource::new(bytes)).unwrap();

    let mut stream = archive.stream("small.bin").unwrap();
    let first = stream.next().unwrap().unwrap();
    assert_eq!(&first[..], data);
    assert!(stream.next().is_none());
}
