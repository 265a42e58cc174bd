//! Pseudo-random byte dumps, for generating filter input.

use std::io::Write;

use crate::rng::{SeededRng, UniformSource};

/// Bytes generated per write.
const BLOCK: usize = 8 * 1024;

/// Seed actually used for `seed`: `0` is an alias for `1`.
#[must_use]
pub fn effective_seed(seed: u64) -> u64 {
    if seed == 0 { 1 } else { seed }
}

/// Writes `len` pseudo-random bytes to `sink`. Each byte is the high byte of
/// one 32-bit draw, so the same seed and length always give the same dump,
/// and a shorter dump is a prefix of a longer one.
///
/// # Errors
///
/// Any error from `sink`.
pub fn emit<W: Write>(seed: u64, len: u64, mut sink: W) -> std::io::Result<W> {
    let mut rng = SeededRng::new(effective_seed(seed));
    let mut block = [0u8; BLOCK];
    let mut remaining = len;
    while remaining > 0 {
        let n = usize::try_from(remaining).map_or(BLOCK, |r| r.min(BLOCK));
        for byte in &mut block[..n] {
            *byte = rng.next_u32().to_be_bytes()[0];
        }
        sink.write_all(&block[..n])?;
        remaining -= n as u64;
    }
    sink.flush()?;
    Ok(sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_is_exact() {
        for len in [0, 1, 7, BLOCK as u64, BLOCK as u64 + 3] {
            let out = emit(5, len, Vec::new()).unwrap();
            assert_eq!(out.len() as u64, len);
        }
    }

    #[test]
    fn shorter_dump_is_prefix() {
        let long = emit(11, 3 * BLOCK as u64 + 17, Vec::new()).unwrap();
        let short = emit(11, 100, Vec::new()).unwrap();
        assert_eq!(&long[..100], &short[..]);
    }

    #[test]
    fn zero_seed_aliases_one() {
        assert_eq!(
            emit(0, 64, Vec::new()).unwrap(),
            emit(1, 64, Vec::new()).unwrap()
        );
        assert_ne!(
            emit(1, 64, Vec::new()).unwrap(),
            emit(2, 64, Vec::new()).unwrap()
        );
    }
}
