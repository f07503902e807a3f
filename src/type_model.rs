/*!
 * Offset widths of the suffix array, most likely not relevant to you.
 *
 * Suffix arrays of texts shorter than [`NARROW_MAXIMUM_TEXT_SIZE`](crate::NARROW_MAXIMUM_TEXT_SIZE)
 * are stored with `i32` offsets, everything else with `i64` offsets. This halves the memory of the
 * index for the common case. The comparator, bucket cache and queries are generic over
 * [`OffsetElement`], so they are written once for both widths.
 */

use libsais_sys::{libsais, libsais64};
use num_traits::PrimInt;

use std::ptr;

use crate::{NARROW_MAXIMUM_TEXT_SIZE, sealed::Sealed};

/// Integer type used to store suffix start offsets. Implemented for `i32` (narrow) and `i64` (wide).
pub trait OffsetElement:
    Sealed + PrimInt + Into<i64> + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
    /// The largest text length for which this width can be used.
    const MAX_TEXT_LEN: u64;

    const WIDTH: ResolvedWidth;

    /// The offset must be at most [`Self::MAX_TEXT_LEN`].
    fn from_offset(offset: usize) -> Self;

    fn to_offset(self) -> usize;

    fn text_len(len: usize) -> Option<Self> {
        (len as u64 <= Self::MAX_TEXT_LEN).then(|| Self::from_offset(len))
    }

    /// Runs `libsais` for this width.
    ///
    /// # Safety
    ///
    /// `text_ptr` must point to `text_len` readable bytes and `suffix_array_buffer_ptr` to
    /// `text_len` writable elements.
    unsafe fn run_libsais(
        text_ptr: *const u8,
        suffix_array_buffer_ptr: *mut Self,
        text_len: Self,
    ) -> Self;

    /// Runs the OpenMP version of `libsais` for this width.
    ///
    /// # Safety
    ///
    /// Same as [`OffsetElement::run_libsais`].
    #[cfg(feature = "openmp")]
    unsafe fn run_libsais_omp(
        text_ptr: *const u8,
        suffix_array_buffer_ptr: *mut Self,
        text_len: Self,
        num_threads: Self,
    ) -> Self;
}

macro_rules! offset_element_impl {
    (
        $offset_type:ty,
        $width:expr,
        $libsais_mod:ident,
        $libsais_fn:ident,
        $libsais_omp_fn:ident
    ) => {
        impl Sealed for $offset_type {}

        impl OffsetElement for $offset_type {
            const MAX_TEXT_LEN: u64 = <$offset_type>::MAX as u64 - 1;

            const WIDTH: ResolvedWidth = $width;

            fn from_offset(offset: usize) -> Self {
                offset as $offset_type
            }

            fn to_offset(self) -> usize {
                self as usize
            }

            unsafe fn run_libsais(
                text_ptr: *const u8,
                suffix_array_buffer_ptr: *mut Self,
                text_len: Self,
            ) -> Self {
                unsafe {
                    $libsais_mod::$libsais_fn(
                        text_ptr,
                        suffix_array_buffer_ptr,
                        text_len,
                        0,
                        ptr::null_mut(),
                    )
                }
            }

            #[cfg(feature = "openmp")]
            unsafe fn run_libsais_omp(
                text_ptr: *const u8,
                suffix_array_buffer_ptr: *mut Self,
                text_len: Self,
                num_threads: Self,
            ) -> Self {
                unsafe {
                    $libsais_mod::$libsais_omp_fn(
                        text_ptr,
                        suffix_array_buffer_ptr,
                        text_len,
                        0,
                        ptr::null_mut(),
                        num_threads,
                    )
                }
            }
        }
    };
}

offset_element_impl!(i32, ResolvedWidth::Narrow, libsais, libsais, libsais_omp);
offset_element_impl!(i64, ResolvedWidth::Wide, libsais64, libsais64, libsais64_omp);

/// Policy for choosing the offset width of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetWidth {
    /// `i32` offsets whenever the text is short enough, `i64` otherwise.
    #[default]
    Auto,
    /// Always `i64` offsets.
    Wide,
}

impl OffsetWidth {
    pub fn resolve(self, text_len: usize) -> ResolvedWidth {
        match self {
            Self::Auto if text_len < NARROW_MAXIMUM_TEXT_SIZE => ResolvedWidth::Narrow,
            _ => ResolvedWidth::Wide,
        }
    }
}

/// The offset width actually used for a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedWidth {
    Narrow,
    Wide,
}

/// Number of threads for the OpenMP based sorting. A value of 0 lets OpenMP decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadCount {
    pub(crate) value: u16,
}

impl ThreadCount {
    pub fn openmp_default() -> Self {
        Self { value: 0 }
    }

    pub fn fixed(thread_count: u16) -> Self {
        Self {
            value: thread_count,
        }
    }

    pub fn value(self) -> u16 {
        self.value
    }
}
