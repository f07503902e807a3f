use std::ops::Range;

use log::trace;

use crate::{compare::SuffixComparator, type_model::OffsetElement};

const BUCKET_COUNT: usize = 256;

/// Partition of a suffix array by the first byte of each suffix.
///
/// The boundaries are ranks into the suffix array, so the cache stays valid as long as the
/// suffix array it was built from is unchanged. Bucket `c` is `bounds[c]..bounds[c + 1]`,
/// which makes the buckets contiguous and gap-free by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BucketCache {
    bounds: [usize; BUCKET_COUNT + 1],
}

impl BucketCache {
    pub(crate) fn empty() -> Self {
        Self {
            bounds: [0; BUCKET_COUNT + 1],
        }
    }

    /// Every lookup for the one byte string `{c + 1}` starts where the previous bucket ended,
    /// so each binary search only covers the part of the suffix array not yet assigned.
    pub(crate) fn build<O: OffsetElement>(
        comparator: SuffixComparator<'_>,
        suffix_array: &[O],
    ) -> Self {
        let mut bounds = [0; BUCKET_COUNT + 1];
        let mut position = 0;

        for c in 0..u8::MAX {
            bounds[c as usize] = position;

            let next_byte = [c + 1];
            position += suffix_array[position..]
                .partition_point(|&o| comparator.suffix_is_less(o.to_offset(), &next_byte));
        }

        bounds[BUCKET_COUNT - 1] = position;
        bounds[BUCKET_COUNT] = suffix_array.len();

        trace!(
            "built bucket cache over {} suffixes, {} buckets occupied",
            suffix_array.len(),
            bounds.windows(2).filter(|w| w[0] < w[1]).count()
        );

        Self { bounds }
    }

    #[inline]
    pub(crate) fn range(&self, first_byte: u8) -> Range<usize> {
        let c = first_byte as usize;
        self.bounds[c]..self.bounds[c + 1]
    }
}
