//! # zip-stream-core: backing-store-agnostic streaming ZIP reader
//!
//! A small ZIP reader whose archive core never touches a file descriptor or
//! socket directly. All archive I/O goes through the [`ByteSource`] trait, so
//! the same EOCD scan, central-directory parser, and streaming decompressor
//! work whether the bytes live in a local file, an in-memory buffer, an S3
//! object, or a file reached over SFTP.
//!
//! ## Quick start
//!
//! ```no_run
//! use zip_stream_core::{Archive, FileSource};
//!
//! let source = FileSource::open("archive.zip")?;
//! let archive = Archive::open(source)?;
//!
//! for entry in archive.list() {
//!     println!("{}: {} bytes", entry.file_name, entry.uncompressed_size);
//! }
//!
//! for chunk in archive.stream("file.txt")? {
//!     let chunk = chunk?;
//!     // do something with chunk
//! }
//! # Ok::<(), zip_stream_core::Error>(())
//! ```
//!
//! ## Zip-bomb defense
//!
//! While parsing the central directory, every entry's compressed-data range
//! is checked against a range tree of previously seen entries; archives where
//! two entries claim overlapping byte ranges ("quoted overlap" zip bombs) are
//! rejected with [`Error::OverlappingEntries`] before any entry is streamed.

mod adapters;
mod archive;
mod buffer;
mod central_directory;
mod datetime;
mod entry;
mod eocd;
mod error;
mod range_tree;
mod store;
mod stream;

pub use adapters::{FileSource, MemorySource};
#[cfg(feature = "cloud-s3")]
pub use adapters::S3Source;
#[cfg(feature = "sftp")]
pub use adapters::SftpSource;

pub use archive::Archive;
pub use entry::Entry;
pub use error::{Error, Result};
pub use store::ByteSource;
pub use stream::{EntryStream, StreamOptions};
