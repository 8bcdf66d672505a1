//! Constant-time operations.

use subtle::ConstantTimeEq;

/// Compare two byte slices in constant time.
///
/// Slices of different length compare unequal immediately; the length of a
/// signature is not secret.
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_slices() {
        assert!(constant_time_compare(b"GET&a&b", b"GET&a&b"));
    }

    #[test]
    fn test_different_slices() {
        assert!(!constant_time_compare(b"GET&a&b", b"GET&a&c"));
    }

    #[test]
    fn test_different_lengths() {
        assert!(!constant_time_compare(b"signature", b"sig"));
    }

    #[test]
    fn test_empty_slices() {
        assert!(constant_time_compare(b"", b""));
    }
}
