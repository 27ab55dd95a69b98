//! Entry descriptors: the internal central-directory record and the public
//! view exposed to callers of [`Archive::list`](crate::archive::Archive::list).

use chrono::NaiveDateTime;

/// Internal representation of a single central-directory record, after ZIP64
/// merge.
#[derive(Debug, Clone)]
pub(crate) struct EntryDescriptor {
    pub(crate) file_name: String,
    #[allow(dead_code)]
    pub(crate) bit_flag: u16,
    pub(crate) compression_method: u16,
    pub(crate) last_modified_datetime: Option<NaiveDateTime>,
    pub(crate) crc32: u32,
    pub(crate) compressed_size: u64,
    pub(crate) uncompressed_size: u64,
    pub(crate) local_header_offset: u64,
}

/// A read-only view of one archive entry, as returned by
/// [`Archive::list`](crate::archive::Archive::list).
///
/// Names ending in `/` denote directories, which always have zero sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub file_name: String,
    pub last_modified_datetime: Option<NaiveDateTime>,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
}

impl Entry {
    /// True if this entry's name denotes a directory rather than a file.
    pub fn is_dir(&self) -> bool {
        self.file_name.ends_with('/')
    }
}

impl From<&EntryDescriptor> for Entry {
    fn from(d: &EntryDescriptor) -> Self {
        Entry {
            file_name: d.file_name.clone(),
            last_modified_datetime: d.last_modified_datetime,
            compressed_size: d.compressed_size,
            uncompressed_size: d.uncompressed_size,
        }
    }
}
