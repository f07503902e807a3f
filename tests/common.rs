#![allow(unused)]

use rand::{Rng, SeedableRng, rngs::StdRng};
use suffix_index::{OffsetElement, SuffixIndex, SuffixSort};

use either::Either;

pub fn offsets<S: SuffixSort>(index: &SuffixIndex<'_, S>) -> Vec<usize> {
    match index.offsets() {
        None => Vec::new(),
        Some(Either::Left(narrow)) => narrow.iter().map(|o| o.to_offset()).collect(),
        Some(Either::Right(wide)) => wide.iter().map(|o| o.to_offset()).collect(),
    }
}

pub fn is_permutation(text: &[u8], maybe_suffix_array: &[usize]) -> bool {
    let mut seen = vec![false; text.len()];

    if maybe_suffix_array.len() != text.len() {
        return false;
    }

    for &offset in maybe_suffix_array {
        if offset >= text.len() || seen[offset] {
            return false;
        }
        seen[offset] = true;
    }

    true
}

pub fn is_suffix_array(text: &[u8], maybe_suffix_array: &[usize]) -> bool {
    if !is_permutation(text, maybe_suffix_array) {
        return false;
    }

    for indices in maybe_suffix_array.windows(2) {
        if text[indices[0]..] > text[indices[1]..] {
            return false;
        }
    }

    true
}

pub fn brute_force_lower_bound(text: &[u8], suffix_array: &[usize], query: &[u8]) -> usize {
    suffix_array
        .iter()
        .take_while(|&&offset| &text[offset..] < query)
        .count()
}

pub fn random_text(rng: &mut StdRng, len: usize, alphabet_size: u8) -> Vec<u8> {
    (0..len).map(|_| rng.random_range(0..alphabet_size)).collect()
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn repetitive_text(len: usize) -> Vec<u8> {
    b"abcab".iter().copied().cycle().take(len).collect()
}
