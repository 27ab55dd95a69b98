//! Concrete [`ByteSource`](crate::store::ByteSource) adapters.
//!
//! These are convenience implementations, not part of the core's correctness
//! surface: the archive reader is generic over the trait and is exercised in
//! this crate's test suite primarily through [`MemorySource`].

mod file;
mod memory;

#[cfg(feature = "cloud-s3")]
pub mod s3;

#[cfg(feature = "sftp")]
pub mod sftp;

pub use file::FileSource;
pub use memory::MemorySource;

#[cfg(feature = "cloud-s3")]
pub use s3::S3Source;

#[cfg(feature = "sftp")]
pub use sftp::SftpSource;
