/*!
 * The [`SuffixIndex`]: a suffix array over a borrowed byte buffer that answers lower bound queries.
 *
 * The index is built by [`SuffixIndex::reset`] and answers queries through `&self`, so a fully built
 * index can be shared between threads. Every `reset` discards the previous suffix array and
 * bucket cache and rebuilds both from scratch.
 *
 * ```
 * use suffix_index::SuffixIndex;
 *
 * let text = b"banana";
 * let index = SuffixIndex::from_text(text).unwrap();
 *
 * // suffixes in order: a, ana, anana, banana, na, nana
 * assert_eq!(index.lower_bound(b"an"), 1);
 * assert_eq!(index.prefix_range(b"an"), 1..3);
 * assert_eq!(index.offset_at(3), Some(0));
 * ```
 *
 * # Lower bounds and buckets
 *
 * A query only ever searches the suffixes that begin with the same byte as the query. The
 * boundaries of these buckets are computed once per `reset`, so a query is a table lookup followed
 * by a binary search over one bucket.
 *
 * # Offset width
 *
 * The suffix array uses `i32` offsets for texts shorter than
 * [`NARROW_MAXIMUM_TEXT_SIZE`](crate::NARROW_MAXIMUM_TEXT_SIZE) and `i64` offsets otherwise. This is
 * invisible to queries; see [`OffsetWidth`] for forcing the wide representation.
 */

use either::Either;
use log::{debug, warn};

use std::ops::Range;

use crate::{
    buckets::BucketCache,
    compare::SuffixComparator,
    error::SuffixIndexError,
    sort::{Libsais, SuffixSort},
    type_model::{OffsetElement, OffsetWidth, ResolvedWidth},
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum SortedOffsets {
    Narrow(Vec<i32>),
    Wide(Vec<i64>),
}

macro_rules! dispatch_width {
    ($sorted_offsets:expr, $suffix_array:ident => $body:expr) => {
        match $sorted_offsets {
            SortedOffsets::Narrow($suffix_array) => $body,
            SortedOffsets::Wide($suffix_array) => $body,
        }
    };
}

impl SortedOffsets {
    fn len(&self) -> usize {
        dispatch_width!(self, suffix_array => suffix_array.len())
    }
}

/// Position in the source text that shares a common prefix with a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixMatch {
    pub offset: usize,
    pub len: usize,
}

/// Suffix array of a borrowed text together with a cache of its leading byte buckets.
#[derive(Debug)]
pub struct SuffixIndex<'t, S: SuffixSort = Libsais> {
    text: &'t [u8],
    suffix_array: Option<SortedOffsets>,
    buckets: BucketCache,
    backend: S,
    offset_width: OffsetWidth,
}

impl<'t> SuffixIndex<'t, Libsais> {
    /// An empty index using the single threaded `libsais` backend.
    pub fn new() -> Self {
        Self::with_backend(Libsais::single_threaded())
    }

    /// Builds the index for `text` with the default configuration.
    pub fn from_text(text: &'t [u8]) -> Result<Self, SuffixIndexError> {
        let mut index = Self::new();
        index.reset(text)?;
        Ok(index)
    }
}

impl Default for SuffixIndex<'_, Libsais> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t, S: SuffixSort> SuffixIndex<'t, S> {
    /// An empty index that sorts suffixes with `backend`.
    pub fn with_backend(backend: S) -> Self {
        Self {
            text: &[],
            suffix_array: None,
            buckets: BucketCache::empty(),
            backend,
            offset_width: OffsetWidth::Auto,
        }
    }

    /// Takes effect on the next [`SuffixIndex::reset`].
    pub fn with_offset_width(self, offset_width: OffsetWidth) -> Self {
        Self {
            offset_width,
            ..self
        }
    }

    /// Discards the current index and builds a new one for `text`.
    ///
    /// If sorting fails, the index is left empty.
    pub fn reset(&mut self, text: &'t [u8]) -> Result<(), SuffixIndexError> {
        self.clear();

        let width = self.offset_width.resolve(text.len());

        let sorted = match width {
            ResolvedWidth::Narrow => self.backend.sort::<i32>(text).map(SortedOffsets::Narrow),
            ResolvedWidth::Wide => self.backend.sort::<i64>(text).map(SortedOffsets::Wide),
        };

        let suffix_array = sorted.map_err(|source| {
            warn!(
                "suffix sorting of {} bytes with {} failed: {source}",
                text.len(),
                self.backend.name()
            );
            SuffixIndexError::SortFailure {
                backend: self.backend.name(),
                source,
            }
        })?;

        debug_assert_eq!(suffix_array.len(), text.len());

        let comparator = SuffixComparator::new(text);
        self.buckets = dispatch_width!(&suffix_array, sa => BucketCache::build(comparator, sa));
        self.suffix_array = Some(suffix_array);
        self.text = text;

        debug!(
            "indexed {} bytes with {:?} offsets using {}",
            text.len(),
            width,
            self.backend.name()
        );

        Ok(())
    }

    /// Builds the index for the window `range` of `source`. Offsets and query results are
    /// relative to the start of the window.
    pub fn reset_within(
        &mut self,
        source: &'t [u8],
        range: Range<usize>,
    ) -> Result<(), SuffixIndexError> {
        if range.start > range.end || range.end > source.len() {
            self.clear();

            return Err(SuffixIndexError::InvalidRange {
                start: range.start,
                end: range.end,
                len: source.len(),
            });
        }

        self.reset(&source[range])
    }

    /// Releases the suffix array and forgets the text. Calling this on an empty index does nothing.
    pub fn clear(&mut self) {
        self.text = &[];
        self.suffix_array = None;
        self.buckets = BucketCache::empty();
    }

    /// The rank of the first suffix that is not less than `query`.
    ///
    /// All suffixes at smaller ranks are less than `query`. An empty query, as well as any
    /// query against an empty index, returns 0.
    pub fn lower_bound(&self, query: &[u8]) -> usize {
        let (Some(suffix_array), Some(&first_byte)) = (&self.suffix_array, query.first()) else {
            return 0;
        };

        let comparator = SuffixComparator::new(self.text);
        let bucket = self.buckets.range(first_byte);

        dispatch_width!(suffix_array, sa => lower_bound_in(comparator, sa, bucket, query))
    }

    /// The ranks of all suffixes that start with `query`.
    ///
    /// The range starts at [`SuffixIndex::lower_bound`] and is empty if `query` does not occur in
    /// the text. Every suffix starts with the empty query.
    pub fn prefix_range(&self, query: &[u8]) -> Range<usize> {
        let (Some(suffix_array), Some(&first_byte)) = (&self.suffix_array, query.first()) else {
            return 0..self.len();
        };

        let comparator = SuffixComparator::new(self.text);
        let bucket = self.buckets.range(first_byte);

        dispatch_width!(suffix_array, sa => prefix_range_in(comparator, sa, bucket, query))
    }

    /// A position in the text whose suffix shares the longest common prefix with `query`.
    ///
    /// Returns `None` if no suffix shares even the first byte. With an inexact backend, the
    /// result is not guaranteed to be the longest match.
    pub fn longest_match(&self, query: &[u8]) -> Option<SuffixMatch> {
        let rank = self.lower_bound(query);
        let comparator = SuffixComparator::new(self.text);

        [Some(rank), rank.checked_sub(1)]
            .into_iter()
            .flatten()
            .filter_map(|rank| self.offset_at(rank))
            .map(|offset| SuffixMatch {
                offset,
                len: comparator.common_prefix_len(offset, query),
            })
            .filter(|m| m.len > 0)
            .reduce(|best, m| if m.len > best.len { m } else { best })
    }

    /// Start offset of the suffix at `rank`.
    pub fn offset_at(&self, rank: usize) -> Option<usize> {
        let suffix_array = self.suffix_array.as_ref()?;

        dispatch_width!(suffix_array, sa => sa.get(rank).map(|o| o.to_offset()))
    }

    /// Ranks of the suffixes that start with `first_byte`.
    pub fn bucket(&self, first_byte: u8) -> Range<usize> {
        self.buckets.range(first_byte)
    }

    /// The raw suffix array, in whichever width was chosen for the text.
    pub fn offsets(&self) -> Option<Either<&[i32], &[i64]>> {
        self.suffix_array.as_ref().map(|suffix_array| match suffix_array {
            SortedOffsets::Narrow(sa) => Either::Left(sa.as_slice()),
            SortedOffsets::Wide(sa) => Either::Right(sa.as_slice()),
        })
    }

    pub fn text(&self) -> &'t [u8] {
        self.text
    }

    pub fn len(&self) -> usize {
        self.suffix_array.as_ref().map_or(0, SortedOffsets::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the last [`SuffixIndex::reset`] succeeded and the index was not cleared since.
    pub fn is_ready(&self) -> bool {
        self.suffix_array.is_some()
    }

    pub fn uses_wide_offsets(&self) -> bool {
        matches!(self.suffix_array, Some(SortedOffsets::Wide(_)))
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn offset_width(&self) -> OffsetWidth {
        self.offset_width
    }
}

fn lower_bound_in<O: OffsetElement>(
    comparator: SuffixComparator<'_>,
    suffix_array: &[O],
    bucket: Range<usize>,
    query: &[u8],
) -> usize {
    bucket.start
        + suffix_array[bucket]
            .partition_point(|&o| comparator.suffix_is_less(o.to_offset(), query))
}

fn prefix_range_in<O: OffsetElement>(
    comparator: SuffixComparator<'_>,
    suffix_array: &[O],
    bucket: Range<usize>,
    query: &[u8],
) -> Range<usize> {
    let start = lower_bound_in(comparator, suffix_array, bucket.clone(), query);
    let end = start
        + suffix_array[start..bucket.end]
            .partition_point(|&o| comparator.suffix_starts_with(o.to_offset(), query));

    start..end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::ComparisonSort;

    #[test]
    fn banana() {
        let index = SuffixIndex::from_text(b"banana").unwrap();

        assert_eq!(index.offsets(), Some(Either::Left([5, 3, 1, 0, 4, 2].as_slice())));
        assert_eq!(index.lower_bound(b"an"), 1);
        assert_eq!(index.lower_bound(b"ba"), 3);
        assert_eq!(index.lower_bound(b"z"), 6);
        assert_eq!(index.lower_bound(b""), 0);
    }

    #[test]
    fn states() {
        let text = b"abracadabra";
        let mut index = SuffixIndex::new();
        assert!(!index.is_ready());
        assert_eq!(index.lower_bound(b"a"), 0);

        index.reset(text).unwrap();
        assert!(index.is_ready());
        assert_eq!(index.len(), text.len());

        index.clear();
        assert!(!index.is_ready());
        assert!(index.is_empty());
        assert!(index.text().is_empty());
        assert_eq!(index.lower_bound(b"a"), 0);
        assert_eq!(index.bucket(b'a'), 0..0);

        index.clear();
        assert!(!index.is_ready());
    }

    #[test]
    fn invalid_range_clears() {
        let source = b"abracadabra";
        let mut index = SuffixIndex::with_backend(ComparisonSort::exact());
        index.reset(source).unwrap();

        #[allow(clippy::reversed_empty_ranges)]
        let err = index.reset_within(source, 5..3).unwrap_err();

        assert_eq!(
            err,
            SuffixIndexError::InvalidRange {
                start: 5,
                end: 3,
                len: 11
            }
        );
        assert!(!index.is_ready());

        assert!(index.reset_within(source, 0..12).is_err());
        assert!(!index.is_ready());
    }

    #[test]
    fn window_offsets_are_relative() {
        let source = b"xxbananaxx";
        let mut index = SuffixIndex::new();
        index.reset_within(source, 2..8).unwrap();

        assert_eq!(index.text(), b"banana");
        assert_eq!(index.offset_at(0), Some(5));
        assert_eq!(index.lower_bound(b"x"), 6);
    }

    #[test]
    fn forced_wide_offsets() {
        let mut index = SuffixIndex::with_backend(ComparisonSort::exact())
            .with_offset_width(OffsetWidth::Wide);
        index.reset(b"banana").unwrap();

        assert!(index.uses_wide_offsets());
        assert_eq!(index.offsets(), Some(Either::Right([5i64, 3, 1, 0, 4, 2].as_slice())));
        assert_eq!(index.lower_bound(b"na"), 4);
    }

    #[test]
    fn longest_match_picks_neighbor() {
        let index = SuffixIndex::from_text(b"banana").unwrap();

        assert_eq!(
            index.longest_match(b"anax"),
            Some(SuffixMatch { offset: 1, len: 3 })
        );
        assert_eq!(
            index.longest_match(b"nab"),
            Some(SuffixMatch { offset: 2, len: 2 })
        );
        assert_eq!(index.longest_match(b"z"), None);
        assert_eq!(index.longest_match(b""), None);
    }
}
