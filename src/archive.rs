//! The public entry point: open a backing store, list its entries, and
//! stream one by name.

use crate::central_directory::{self, CentralDirectory};
use crate::entry::Entry;
use crate::eocd;
use crate::error::{Error, Result};
use crate::store::ByteSource;
use crate::stream::{EntryStream, StreamOptions};

/// A parsed ZIP archive sitting on top of an arbitrary [`ByteSource`].
///
/// Opening an archive reads only the EOCD record and the central directory;
/// entry bodies are not touched until [`Archive::stream`] is called.
pub struct Archive<S: ByteSource + ?Sized> {
    central_directory: CentralDirectory,
    source: Box<S>,
}

impl<S: ByteSource> Archive<S> {
    /// Locates the EOCD record, upgrades it to ZIP64 fields if present, and
    /// parses the central directory, rejecting archives with overlapping
    /// entries.
    pub fn open(source: S) -> Result<Self> {
        let eocd = eocd::locate(&source)?;
        let central_directory = central_directory::parse(&source, eocd)?;
        Ok(Archive {
            central_directory,
            source: Box::new(source),
        })
    }
}

impl<S: ByteSource + ?Sized> Archive<S> {
    /// Entries in central-directory order.
    pub fn list(&self) -> Vec<Entry> {
        self.central_directory
            .order
            .iter()
            .map(|name| Entry::from(&self.central_directory.by_name[name]))
            .collect()
    }

    /// Number of entries in the central directory.
    pub fn len(&self) -> usize {
        self.central_directory.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.central_directory.order.is_empty()
    }

    /// Opens a lazy, decompressing byte-chunk stream for the named entry,
    /// using the default chunk size.
    pub fn stream(&self, file_name: &str) -> Result<EntryStream<'_, S>> {
        self.stream_with_options(file_name, StreamOptions::default())
    }

    /// As [`Archive::stream`], with control over the read chunk size.
    pub fn stream_with_options(
        &self,
        file_name: &str,
        opts: StreamOptions,
    ) -> Result<EntryStream<'_, S>> {
        let descriptor = self
            .central_directory
            .by_name
            .get(file_name)
            .ok_or_else(|| Error::EntryNotFound(file_name.to_string()))?;
        EntryStream::open(self.source.as_ref(), descriptor, opts)
    }
}
