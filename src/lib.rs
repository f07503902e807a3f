/*!
 * A suffix array index over a borrowed byte buffer, for finding common substrings of binary blobs.
 *
 * [`SuffixIndex`] sorts all suffixes of a source buffer and answers lower bound queries: for any
 * byte string, it finds the first rank in the suffix array whose suffix is not less than that
 * string. A diffing engine uses this to locate the positions in the source that share the longest
 * prefix with some position of the target.
 *
 * ```
 * use suffix_index::{SuffixIndex, SuffixMatch};
 *
 * let old = b"the quick brown fox";
 * let index = SuffixIndex::from_text(old).unwrap();
 *
 * let new = b"brown foxes";
 * assert_eq!(
 *     index.longest_match(new),
 *     Some(SuffixMatch { offset: 10, len: 9 })
 * );
 * ```
 *
 * # Sorting backends
 *
 * The suffix array is produced by a [`SuffixSort`](sort::SuffixSort) backend. The default is
 * [`Libsais`](sort::Libsais), which wraps the linear-time C library `libsais`. The
 * [`ComparisonSort`](sort::ComparisonSort) backend is a plain comparison sort, with a bounded
 * variant that trades exactness for running time on long repetitive inputs. See [`sort`] for details.
 *
 * # Crate features
 *
 * * `openmp`: enables `libsais`' OpenMP support and [`Libsais::multi_threaded`](sort::Libsais).
 *   Requires an OpenMP runtime on the build machine.
 *
 * # Logging
 *
 * Index construction reports through the [`log`] facade. No logger is installed by this crate.
 */

mod buckets;

pub mod compare;
pub mod error;
pub mod sort;
pub mod suffix_index;
pub mod type_model;

#[doc(inline)]
pub use error::{SortError, SuffixIndexError};

#[doc(inline)]
pub use sort::{ComparisonSort, Libsais, SuffixSort};

#[doc(inline)]
pub use suffix_index::{SuffixIndex, SuffixMatch};

#[doc(inline)]
pub use type_model::{OffsetElement, OffsetWidth, ResolvedWidth, ThreadCount};

/// Texts shorter than this are indexed with `i32` offsets, longer ones with `i64` offsets.
pub const NARROW_MAXIMUM_TEXT_SIZE: usize = 2147483647;

mod sealed {
    pub trait Sealed {}
}
