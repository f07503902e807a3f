/*!
 * Lexicographic ordering of byte strings.
 *
 * Bytes are compared as unsigned values, the first difference decides and a proper prefix
 * is smaller than the longer string. This is exactly the [`Ord`] implementation of `[u8]`,
 * which also keeps equal strings "not less" and therefore forms a strict weak ordering that
 * [`slice::partition_point`] and the sort functions of the standard library can rely on.
 */

use std::{
    cmp::{self, Ordering},
    num::NonZeroUsize,
};

/// Default comparison cap of [`ComparisonSort::bounded`](crate::sort::ComparisonSort::bounded).
pub const DEFAULT_MAX_COMPARE_LEN: NonZeroUsize = NonZeroUsize::new(4 * 1024).unwrap();

/// Returns whether `a` is strictly less than `b`.
#[inline]
pub fn is_less(a: &[u8], b: &[u8]) -> bool {
    a < b
}

/// Compares `a` and `b`, looking at no more than `max_len` bytes of either string.
///
/// Strings that agree on their first `max_len` bytes compare as equal, which makes the result
/// of a sort using this comparison only an approximation of the suffix array. Lower bound
/// queries must always use [`is_less`].
#[inline]
pub fn compare_capped(a: &[u8], b: &[u8], max_len: usize) -> Ordering {
    let a = &a[..cmp::min(a.len(), max_len)];
    let b = &b[..cmp::min(b.len(), max_len)];

    a.cmp(b)
}

/// Compares the suffixes of a text against each other or against query strings.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SuffixComparator<'t> {
    text: &'t [u8],
}

impl<'t> SuffixComparator<'t> {
    pub(crate) fn new(text: &'t [u8]) -> Self {
        Self { text }
    }

    #[inline]
    pub(crate) fn suffix(&self, offset: usize) -> &'t [u8] {
        &self.text[offset..]
    }

    #[inline]
    pub(crate) fn suffix_is_less(&self, offset: usize, query: &[u8]) -> bool {
        is_less(self.suffix(offset), query)
    }

    #[inline]
    pub(crate) fn suffix_starts_with(&self, offset: usize, query: &[u8]) -> bool {
        self.suffix(offset).starts_with(query)
    }

    /// Length of the common prefix of the suffix at `offset` and `query`.
    pub(crate) fn common_prefix_len(&self, offset: usize, query: &[u8]) -> usize {
        self.suffix(offset)
            .iter()
            .zip(query)
            .take_while(|(a, b)| a == b)
            .count()
    }
}
