/// Split `payload` into approximately equal-sized chunks.
///
/// Chunks may end inside a multi-byte sequence; the filter is expected to
/// produce the same output however its input is split.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    if payload.is_empty() {
        return Vec::new();
    }
    payload.chunks(payload.len().div_ceil(parts)).collect()
}
