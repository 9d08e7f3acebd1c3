//! Byte-pattern fixtures.
//!
//! Fill a block with a pattern derived from a seed, then verify it later.
//! Distinct seeds for neighbouring blocks expose writes that spill across
//! block boundaries.

use std::fmt;

/// Byte expected at `index` for `seed`.
fn pattern_byte(seed: u8, index: usize) -> u8 {
    (index % 251) as u8 ^ seed
}

/// Fill `bytes` with the pattern for `seed`.
pub fn fill_pattern(bytes: &mut [u8], seed: u8) {
    for (i, b) in bytes.iter_mut().enumerate() {
        *b = pattern_byte(seed, i);
    }
}

/// First position where a block differs from its expected pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatternMismatch {
    pub index: usize,
    pub expected: u8,
    pub found: u8,
}

impl fmt::Display for PatternMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pattern mismatch at offset {}: expected {:#04x}, found {:#04x}",
            self.index, self.expected, self.found
        )
    }
}

/// Check that `bytes` still holds the pattern for `seed`.
pub fn verify_pattern(bytes: &[u8], seed: u8) -> Result<(), PatternMismatch> {
    match bytes
        .iter()
        .enumerate()
        .find(|&(i, &b)| b != pattern_byte(seed, i))
    {
        Some((index, &found)) => Err(PatternMismatch {
            index,
            expected: pattern_byte(seed, index),
            found,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_then_verify() {
        let mut buf = vec![0u8; 600];
        fill_pattern(&mut buf, 7);
        assert_eq!(verify_pattern(&buf, 7), Ok(()));
    }

    #[test]
    fn corruption_is_located() {
        let mut buf = vec![0u8; 64];
        fill_pattern(&mut buf, 1);
        buf[40] ^= 0xFF;
        let err = verify_pattern(&buf, 1).unwrap_err();
        assert_eq!(err.index, 40);
        assert_ne!(err.expected, err.found);
    }

    #[test]
    fn different_seeds_differ() {
        let mut buf = vec![0u8; 16];
        fill_pattern(&mut buf, 3);
        assert!(verify_pattern(&buf, 4).is_err());
    }
}
