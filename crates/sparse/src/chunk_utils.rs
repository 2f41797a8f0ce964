//! Helpers for slicing a document into chunks, for exercising incremental
//! input in tests, benches and fuzzing.
use alloc::vec::Vec;

/// Splits `payload` at the given byte offsets.
///
/// Offsets are sorted, clamped to the payload and moved forward to the next
/// char boundary; duplicates and empty pieces are dropped. Concatenating the
/// result always yields `payload`.
///
/// ```
/// use sparse::chunk_utils::split_at_offsets;
///
/// assert_eq!(split_at_offsets("a { b }", &[3, 1, 99]), ["a", " {", " b }"]);
/// assert_eq!(split_at_offsets("\u{e9}x", &[1]), ["\u{e9}", "x"]);
/// ```
#[must_use]
pub fn split_at_offsets<'a>(payload: &'a str, offsets: &[usize]) -> Vec<&'a str> {
    let mut cuts: Vec<usize> = offsets
        .iter()
        .map(|&offset| {
            let mut cut = offset.min(payload.len());
            while !payload.is_char_boundary(cut) {
                cut += 1;
            }
            cut
        })
        .collect();
    cuts.sort_unstable();
    cuts.dedup();

    let mut chunks = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts.into_iter().chain([payload.len()]) {
        if cut > start {
            chunks.push(&payload[start..cut]);
            start = cut;
        }
    }
    chunks
}

/// Splits `payload` into `parts` roughly equal chunks without breaking a
/// UTF-8 code point.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &str, parts: usize) -> Vec<&str> {
    assert!(parts > 0, "cannot split into zero parts");
    let size = payload.len().div_ceil(parts).max(1);
    let offsets: Vec<usize> = (1..parts).map(|i| i * size).collect();
    split_at_offsets(payload, &offsets)
}
