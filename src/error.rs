use crate::type_model::OffsetElement;

/// Failure of a [`SuffixSort`](crate::sort::SuffixSort) backend.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortError {
    #[error("the sorting backend rejected its input")]
    InvalidInput,
    #[error("the sorting backend ran out of memory")]
    OutOfMemory,
    #[error("text of length {len} does not fit the offset width (maximum {max})")]
    TextTooLarge { len: usize, max: u64 },
    #[error("the sorting backend failed with return code {return_code}")]
    Unknown { return_code: i64 },
}

impl SortError {
    fn from_return_code(return_code: i64) -> Self {
        match return_code {
            0 => panic!("Return code does not indicate an error"),
            -1 => Self::InvalidInput,
            -2 => Self::OutOfMemory,
            _ => Self::Unknown { return_code },
        }
    }
}

/// Errors returned by [`SuffixIndex`](crate::SuffixIndex) construction.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixIndexError {
    #[error("invalid source range {start}..{end} for a buffer of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },
    #[error("suffix sorting with the {backend} backend failed")]
    SortFailure {
        backend: &'static str,
        #[source]
        source: SortError,
    },
}

pub(crate) trait IntoSortResult {
    fn into_empty_sort_result(self) -> Result<(), SortError>;
}

impl<O: OffsetElement> IntoSortResult for O {
    fn into_empty_sort_result(self) -> Result<(), SortError> {
        let return_code: i64 = self.into();

        if return_code != 0 {
            Err(SortError::from_return_code(return_code))
        } else {
            Ok(())
        }
    }
}
