//! Overflow-checked size arithmetic.
//!
//! All element counts, byte counts, and offsets derived from caller input go
//! through these helpers so that overflow surfaces as an error before it can
//! reach an allocation or a pointer offset.

use dynbuf_common::{Result, error::Error};

/// Computes `a + b`, failing with `Overflow` when the sum exceeds `usize::MAX`.
#[inline]
pub fn checked_add(a: usize, b: usize, context: &'static str) -> Result<usize> {
    a.checked_add(b).ok_or_else(|| overflow(context))
}

/// Computes `a - b`, failing with `Overflow` when `a < b`.
#[inline]
pub fn checked_sub(a: usize, b: usize, context: &'static str) -> Result<usize> {
    a.checked_sub(b).ok_or_else(|| overflow(context))
}

/// Computes `a * b`, failing with `Overflow` when the product exceeds
/// `usize::MAX`. A zero factor yields zero.
#[inline]
pub fn checked_mul(a: usize, b: usize, context: &'static str) -> Result<usize> {
    a.checked_mul(b).ok_or_else(|| overflow(context))
}

#[cold]
fn overflow(context: &'static str) -> Error {
    Error::overflow(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynbuf_common::error::ErrorKind;

    #[test]
    fn test_checked_add() {
        assert_eq!(checked_add(2, 3, "test").unwrap(), 5);
        assert_eq!(checked_add(usize::MAX, 0, "test").unwrap(), usize::MAX);
        assert!(checked_add(usize::MAX, 1, "test").is_err());
    }

    #[test]
    fn test_checked_sub() {
        assert_eq!(checked_sub(5, 3, "test").unwrap(), 2);
        assert_eq!(checked_sub(3, 3, "test").unwrap(), 0);
        assert!(checked_sub(2, 3, "test").is_err());
    }

    #[test]
    fn test_checked_mul() {
        assert_eq!(checked_mul(6, 7, "test").unwrap(), 42);
        assert_eq!(checked_mul(0, usize::MAX, "test").unwrap(), 0);
        assert_eq!(checked_mul(usize::MAX, 0, "test").unwrap(), 0);
        assert!(checked_mul(usize::MAX / 2 + 1, 2, "test").is_err());
    }

    #[test]
    fn test_overflow_carries_context() {
        let err = checked_mul(usize::MAX, 2, "slot offset").unwrap_err();
        match err.kind() {
            ErrorKind::Overflow { context } => assert_eq!(context, "slot offset"),
            other => panic!("unexpected error kind: {other:?}"),
        }
    }
}
