//! An interval set over non-negative integers, used to defend against
//! "quoted overlap" zip-bomb constructions: central-directory entries whose
//! `[local_header_offset, local_header_offset + compressed_size)` ranges
//! collide, so that extracting every entry re-decompresses the same bytes.
//!
//! Backed by a `BTreeMap<start, end>` rather than a dedicated interval tree —
//! a balanced ordered map already gives `O(log n)` insert and the neighbour
//! lookups an overlap query needs, and insertions arrive in central-directory
//! order rather than offset order, so no rebalancing-on-sorted-input pathology
//! applies.

use std::collections::BTreeMap;

/// A set of half-open `[start, end)` intervals supporting overlap queries.
#[derive(Default)]
pub(crate) struct RangeTree {
    // start -> end
    intervals: BTreeMap<u64, u64>,
}

impl RangeTree {
    pub(crate) fn new() -> Self {
        RangeTree {
            intervals: BTreeMap::new(),
        }
    }

    /// True iff `[offset, offset + length)` intersects any stored interval.
    ///
    /// Sufficient to check both directions of containment: whether `offset`
    /// itself falls inside an existing interval, and whether any existing
    /// interval's start falls inside the new range — covers every overlap
    /// case as long as all intervals have length >= 1.
    pub(crate) fn overlaps(&self, offset: u64, length: u64) -> bool {
        if length == 0 {
            return false;
        }
        let end = offset + length;

        if let Some((_, &existing_end)) = self.intervals.range(..=offset).next_back() {
            if existing_end > offset {
                return true;
            }
        }

        self.intervals.range(offset..end).next().is_some()
    }

    /// Adds `[offset, offset + length)` to the set.
    pub(crate) fn insert(&mut self, offset: u64, length: u64) {
        self.intervals.insert(offset, offset + length);
    }
}
