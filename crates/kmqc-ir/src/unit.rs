//! Addressable units: qubits and qudit register slots.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// A single addressable qubit or multi-level register slot.
///
/// Equality is by index: two units with the same index are interchangeable.
/// The index is fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Unit(u32);

/// A unit addressed as a two-level qubit.
pub type Qubit = Unit;

/// A unit addressed as a slot of a multi-level register.
pub type Qudit = Unit;

impl Unit {
    /// Create a unit from a non-negative index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        Unit(index)
    }

    /// The index carried by this unit.
    #[inline]
    pub const fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.0)
    }
}

impl From<u32> for Unit {
    fn from(index: u32) -> Self {
        Unit(index)
    }
}

impl From<Unit> for u32 {
    fn from(unit: Unit) -> Self {
        unit.0
    }
}

/// Coercion into a [`Unit`].
///
/// Accepts either an existing unit or a raw integer index. Signed integers
/// fail with [`IrError::NegativeIndex`] when negative; wide integers fail with
/// [`IrError::IndexOverflow`] when they do not fit. Gate factories take
/// `impl IntoUnit` so callers may pass either representation.
pub trait IntoUnit {
    /// Normalize `self` to a unit.
    fn into_unit(self) -> IrResult<Unit>;
}

impl IntoUnit for Unit {
    #[inline]
    fn into_unit(self) -> IrResult<Unit> {
        Ok(self)
    }
}

impl IntoUnit for &Unit {
    #[inline]
    fn into_unit(self) -> IrResult<Unit> {
        Ok(*self)
    }
}

impl IntoUnit for u32 {
    #[inline]
    fn into_unit(self) -> IrResult<Unit> {
        Ok(Unit(self))
    }
}

macro_rules! impl_into_unit_unsigned {
    ($($t:ty),*) => {$(
        impl IntoUnit for $t {
            fn into_unit(self) -> IrResult<Unit> {
                u32::try_from(self)
                    .map(Unit)
                    .map_err(|_| IrError::IndexOverflow { index: self as u64 })
            }
        }
    )*};
}

macro_rules! impl_into_unit_signed {
    ($($t:ty),*) => {$(
        impl IntoUnit for $t {
            fn into_unit(self) -> IrResult<Unit> {
                if self < 0 {
                    return Err(IrError::NegativeIndex { index: self as i64 });
                }
                u32::try_from(self)
                    .map(Unit)
                    .map_err(|_| IrError::IndexOverflow { index: self as u64 })
            }
        }
    )*};
}

impl_into_unit_unsigned!(u8, u16, u64, usize);
impl_into_unit_signed!(i8, i16, i32, i64, isize);

/// Coerce a raw index or an existing unit into a [`Unit`].
pub fn to_unit(value: impl IntoUnit) -> IrResult<Unit> {
    value.into_unit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_display() {
        assert_eq!(format!("{}", Unit::new(3)), "u3");
    }

    #[test]
    fn test_unit_equality_is_by_index() {
        assert_eq!(Unit::new(2), to_unit(2_i32).unwrap());
        assert_ne!(Unit::new(2), Unit::new(3));
    }

    #[test]
    fn test_coercion_is_idempotent() {
        let unit = to_unit(7_usize).unwrap();
        assert_eq!(to_unit(unit).unwrap(), unit);
        assert_eq!(to_unit(&unit).unwrap(), unit);
    }

    #[test]
    fn test_negative_index_rejected() {
        assert_eq!(
            to_unit(-1_i64),
            Err(IrError::NegativeIndex { index: -1 })
        );
    }

    #[test]
    fn test_oversized_index_rejected() {
        let big = u64::from(u32::MAX) + 1;
        assert!(matches!(
            to_unit(big),
            Err(IrError::IndexOverflow { index }) if index == big
        ));
    }

    #[test]
    fn test_unit_serializes_as_plain_index() {
        let json = serde_json::to_string(&Unit::new(5)).unwrap();
        assert_eq!(json, "5");
    }
}
