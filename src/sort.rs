/*!
 * Backends that produce the suffix array of a text, see [`SuffixSort`].
 *
 * [`Libsais`] is the default. It runs the linear-time [Suffix Array Induced Sort] implementation of
 * the C library `libsais` and produces the exact suffix array.
 *
 * [`ComparisonSort`] sorts all offsets with a comparison sort. The [exact](ComparisonSort::exact)
 * variant is only practical for small inputs. The [bounded](ComparisonSort::bounded) variant caps
 * every comparison at a fixed number of bytes, which bounds the running time on long repetitive
 * inputs but yields an order that is only approximately a suffix array in that case.
 *
 * [Suffix Array Induced Sort]: https://www.doi.org/10.1109/TC.2010.188
 */

use std::num::NonZeroUsize;

use crate::{
    compare::{self, DEFAULT_MAX_COMPARE_LEN},
    error::{IntoSortResult, SortError},
    type_model::{OffsetElement, ThreadCount},
};

/// A suffix sorting subroutine.
///
/// Implementations return a permutation of `0..text.len()` such that the suffixes starting at
/// consecutive entries are in ascending lexicographic order. An empty text yields an empty array.
pub trait SuffixSort {
    fn sort<O: OffsetElement>(&self, text: &[u8]) -> Result<Vec<O>, SortError>;

    fn name(&self) -> &'static str;

    /// Whether the produced order is always the exact suffix array.
    fn is_exact(&self) -> bool {
        true
    }
}

fn checked_text_len<O: OffsetElement>(text: &[u8]) -> Result<O, SortError> {
    O::text_len(text.len()).ok_or(SortError::TextTooLarge {
        len: text.len(),
        max: O::MAX_TEXT_LEN,
    })
}

/// Suffix sorting by the C library `libsais`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Libsais {
    thread_count: ThreadCount,
}

impl Libsais {
    pub fn single_threaded() -> Self {
        Self {
            thread_count: ThreadCount::fixed(1),
        }
    }

    /// Uses the OpenMP based functions of `libsais`.
    #[cfg(feature = "openmp")]
    pub fn multi_threaded(thread_count: ThreadCount) -> Self {
        Self { thread_count }
    }

    pub fn thread_count(&self) -> ThreadCount {
        self.thread_count
    }

    #[cfg(feature = "openmp")]
    unsafe fn run<O: OffsetElement>(
        &self,
        text: &[u8],
        suffix_array_buffer: &mut [O],
        text_len: O,
    ) -> O {
        if self.thread_count.value == 1 {
            unsafe { O::run_libsais(text.as_ptr(), suffix_array_buffer.as_mut_ptr(), text_len) }
        } else {
            let num_threads = O::from_offset(self.thread_count.value.into());
            unsafe {
                O::run_libsais_omp(
                    text.as_ptr(),
                    suffix_array_buffer.as_mut_ptr(),
                    text_len,
                    num_threads,
                )
            }
        }
    }

    #[cfg(not(feature = "openmp"))]
    unsafe fn run<O: OffsetElement>(
        &self,
        text: &[u8],
        suffix_array_buffer: &mut [O],
        text_len: O,
    ) -> O {
        unsafe { O::run_libsais(text.as_ptr(), suffix_array_buffer.as_mut_ptr(), text_len) }
    }
}

impl Default for Libsais {
    fn default() -> Self {
        Self::single_threaded()
    }
}

impl SuffixSort for Libsais {
    fn sort<O: OffsetElement>(&self, text: &[u8]) -> Result<Vec<O>, SortError> {
        let text_len = checked_text_len::<O>(text)?;
        let mut suffix_array_buffer = vec![O::zero(); text.len()];

        if text.is_empty() {
            return Ok(suffix_array_buffer);
        }

        // SAFETY:
        // text len is checked above to fit the offset type
        // the suffix array buffer has exactly the length of the text
        let return_code = unsafe { self.run(text, &mut suffix_array_buffer, text_len) };

        return_code.into_empty_sort_result()?;

        Ok(suffix_array_buffer)
    }

    fn name(&self) -> &'static str {
        "libsais"
    }
}

/// Suffix sorting by comparing suffixes with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonSort {
    max_compare_len: Option<NonZeroUsize>,
}

impl ComparisonSort {
    /// Compares suffixes over their full length. Produces the exact suffix array, but a single
    /// comparison can take time linear in the text length, so the worst case of the whole sort
    /// is `O(n² log n)`.
    pub fn exact() -> Self {
        Self {
            max_compare_len: None,
        }
    }

    /// Compares at most [`DEFAULT_MAX_COMPARE_LEN`] bytes of every suffix.
    pub fn bounded() -> Self {
        Self::bounded_to(DEFAULT_MAX_COMPARE_LEN)
    }

    /// Compares at most `max_compare_len` bytes of every suffix. Suffixes that agree on that many
    /// bytes end up in an unspecified relative order. The cap is at least one byte, so suffixes
    /// always stay ordered by their first byte.
    pub fn bounded_to(max_compare_len: NonZeroUsize) -> Self {
        Self {
            max_compare_len: Some(max_compare_len),
        }
    }

    pub fn max_compare_len(&self) -> Option<NonZeroUsize> {
        self.max_compare_len
    }
}

impl SuffixSort for ComparisonSort {
    fn sort<O: OffsetElement>(&self, text: &[u8]) -> Result<Vec<O>, SortError> {
        checked_text_len::<O>(text)?;

        let mut suffix_array: Vec<O> = (0..text.len()).map(O::from_offset).collect();

        match self.max_compare_len {
            None => suffix_array
                .sort_unstable_by(|&a, &b| text[a.to_offset()..].cmp(&text[b.to_offset()..])),
            Some(max_len) => suffix_array.sort_unstable_by(|&a, &b| {
                compare::compare_capped(
                    &text[a.to_offset()..],
                    &text[b.to_offset()..],
                    max_len.get(),
                )
            }),
        }

        Ok(suffix_array)
    }

    fn name(&self) -> &'static str {
        match self.max_compare_len {
            None => "comparison sort",
            Some(_) => "bounded comparison sort",
        }
    }

    fn is_exact(&self) -> bool {
        self.max_compare_len.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANANA_SUFFIX_ARRAY: [usize; 6] = [5, 3, 1, 0, 4, 2];

    fn as_offsets<O: OffsetElement>(suffix_array: &[O]) -> Vec<usize> {
        suffix_array.iter().map(|o| o.to_offset()).collect()
    }

    #[test]
    fn libsais_banana() {
        let narrow = Libsais::single_threaded().sort::<i32>(b"banana").unwrap();
        let wide = Libsais::single_threaded().sort::<i64>(b"banana").unwrap();

        assert_eq!(as_offsets(&narrow), BANANA_SUFFIX_ARRAY);
        assert_eq!(as_offsets(&wide), BANANA_SUFFIX_ARRAY);
    }

    #[test]
    fn comparison_sort_banana() {
        let exact = ComparisonSort::exact().sort::<i32>(b"banana").unwrap();
        let bounded = ComparisonSort::bounded().sort::<i64>(b"banana").unwrap();

        assert_eq!(as_offsets(&exact), BANANA_SUFFIX_ARRAY);
        assert_eq!(as_offsets(&bounded), BANANA_SUFFIX_ARRAY);
    }

    #[test]
    fn empty_text() {
        assert!(Libsais::default().sort::<i32>(&[]).unwrap().is_empty());
        assert!(ComparisonSort::exact().sort::<i64>(&[]).unwrap().is_empty());
    }

    #[test]
    fn exactness_labels() {
        assert!(Libsais::default().is_exact());
        assert!(ComparisonSort::exact().is_exact());
        assert!(!ComparisonSort::bounded().is_exact());
        assert_eq!(
            ComparisonSort::bounded().max_compare_len(),
            Some(DEFAULT_MAX_COMPARE_LEN)
        );
    }

    #[test]
    fn bounded_sort_is_approximate_on_repetitive_text() {
        // with a cap of 2, the suffixes "aab", "aaab" and "aaaab" only differ after the cap
        let text = b"aaaab";
        let suffix_array = ComparisonSort::bounded_to(NonZeroUsize::new(2).unwrap())
            .sort::<i32>(text)
            .unwrap();

        let mut offsets = as_offsets(&suffix_array);
        offsets.sort_unstable();
        assert_eq!(offsets, [0, 1, 2, 3, 4]);

        for pair in suffix_array.windows(2) {
            let previous = &text[pair[0].to_offset()..];
            let current = &text[pair[1].to_offset()..];
            assert!(previous[..previous.len().min(2)] <= current[..current.len().min(2)]);
        }
    }

    #[test]
    fn one_byte_cap_orders_by_first_byte() {
        let text = b"nabanaab";
        let suffix_array = ComparisonSort::bounded_to(NonZeroUsize::MIN)
            .sort::<i64>(text)
            .unwrap();

        let first_bytes: Vec<u8> = suffix_array.iter().map(|o| text[o.to_offset()]).collect();
        assert_eq!(first_bytes, b"aaaabbnn");
    }
}
