//! The unsigned variant and its native conversion lattice.

use super::error::ConversionFailed;
use super::signed::SignedWide;
use super::{Unsigned, Wide};

/// An unsigned register value of arbitrary declared width.
///
/// The stored digit vector carries one bit more than the declared
/// width.  That guard bit keeps the transient two's-complement form
/// unambiguous: an all-ones `N`-bit magnitude reads as `2^N - 1`, not
/// as `-1`, because the bit above it is zero.  Wrap-around still
/// happens modulo `2^N`; the guard bit never survives into a value at
/// rest.
///
/// ```
/// use widenum::uwide;
///
/// let v = uwide!(4; 9);
/// assert_eq!(&v + 8u64, 17u64);       // result is wide enough not to wrap
/// let mut w = v.clone();
/// w += 8u64;                          // but assignment wraps modulo 2^4
/// assert_eq!(w, 1u64);
/// ```
pub type UnsignedWide = Wide<Unsigned>;

macro_rules! unsigned_from_native {
    ($($t:ty => $w:expr),* $(,)?) => {$(
        impl From<$t> for UnsignedWide {
            fn from(v: $t) -> UnsignedWide {
                UnsignedWide::from_u64_width(v as u64, $w)
            }
        }
    )*};
}

unsigned_from_native!(u8 => 8, u16 => 16, u32 => 32, u64 => 64, usize => 64);

/// Signed natives convert fallibly; the width covers the source's
/// non-negative range.
macro_rules! unsigned_try_from_signed_native {
    ($($t:ty => $w:expr),* $(,)?) => {$(
        impl TryFrom<$t> for UnsignedWide {
            type Error = ConversionFailed;

            fn try_from(v: $t) -> Result<UnsignedWide, ConversionFailed> {
                if v < 0 {
                    Err(ConversionFailed::TooSmall)
                } else {
                    Ok(UnsignedWide::from_u64_width(v as u64, $w))
                }
            }
        }
    )*};
}

unsigned_try_from_signed_native!(i8 => 7, i16 => 15, i32 => 31, i64 => 63, isize => 63);

impl From<&SignedWide> for UnsignedWide {
    /// Keeps the declared width; negative values wrap modulo `2^width`.
    fn from(v: &SignedWide) -> UnsignedWide {
        UnsignedWide::from_parts(v.sign, v.width, v.digits.clone())
    }
}

impl From<SignedWide> for UnsignedWide {
    fn from(v: SignedWide) -> UnsignedWide {
        UnsignedWide::from_parts(v.sign, v.width, v.digits)
    }
}

impl TryFrom<&UnsignedWide> for u64 {
    type Error = ConversionFailed;

    fn try_from(v: &UnsignedWide) -> Result<u64, ConversionFailed> {
        if v.mag_digits().len() > 2 {
            return Err(ConversionFailed::TooLarge);
        }
        Ok(v.mag_low_u64())
    }
}

impl TryFrom<&UnsignedWide> for i64 {
    type Error = ConversionFailed;

    fn try_from(v: &UnsignedWide) -> Result<i64, ConversionFailed> {
        if v.mag_digits().len() > 2 || v.mag_low_u64() > i64::MAX as u64 {
            return Err(ConversionFailed::TooLarge);
        }
        Ok(v.mag_low_u64() as i64)
    }
}

#[cfg(test)]
mod tests;
