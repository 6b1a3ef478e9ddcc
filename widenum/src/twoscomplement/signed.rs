//! The signed variant and its native conversion lattice.

use super::error::ConversionFailed;
use super::unsigned::UnsignedWide;
use super::{Sign, Signed, Wide};

/// A signed register value of arbitrary declared width.
///
/// The value behaves like an `N`-bit two's-complement register:
/// construction and compound assignment wrap at the declared width,
/// while binary operators return results wide enough that the
/// operation itself cannot overflow.  Reads past the declared width
/// see the sign bit extended indefinitely.
///
/// ```
/// use widenum::swide;
///
/// let v = swide!(8; -100);
/// assert_eq!(&v + &v, -200i64);       // result is 9 bits wide
/// let mut w = v.clone();
/// w += &v;                            // but assignment wraps at 8
/// assert_eq!(w, 56i64);
/// ```
pub type SignedWide = Wide<Signed>;

/// Construction from an unsigned native widens by one bit over the
/// source's value width so every value fits positively.
macro_rules! signed_from_unsigned_native {
    ($($t:ty => $w:expr),* $(,)?) => {$(
        impl From<$t> for SignedWide {
            fn from(v: $t) -> SignedWide {
                SignedWide::from_u64_width(v as u64, $w)
            }
        }
    )*};
}

signed_from_unsigned_native!(u8 => 9, u16 => 17, u32 => 33, u64 => 65, usize => 65);

macro_rules! signed_from_signed_native {
    ($($t:ty => $w:expr),* $(,)?) => {$(
        impl From<$t> for SignedWide {
            fn from(v: $t) -> SignedWide {
                SignedWide::from_i64_width(v as i64, $w)
            }
        }
    )*};
}

signed_from_signed_native!(i8 => 8, i16 => 16, i32 => 32, i64 => 64, isize => 64);

impl From<&UnsignedWide> for SignedWide {
    /// Widens by one bit, so every unsigned value converts losslessly.
    fn from(v: &UnsignedWide) -> SignedWide {
        SignedWide::from_parts(v.sign, v.width + 1, v.digits.clone())
    }
}

impl From<UnsignedWide> for SignedWide {
    fn from(v: UnsignedWide) -> SignedWide {
        SignedWide::from_parts(v.sign, v.width + 1, v.digits)
    }
}

impl TryFrom<&SignedWide> for i64 {
    type Error = ConversionFailed;

    fn try_from(v: &SignedWide) -> Result<i64, ConversionFailed> {
        if v.mag_digits().len() > 2 {
            return Err(match v.sign {
                Sign::Negative => ConversionFailed::TooSmall,
                _ => ConversionFailed::TooLarge,
            });
        }
        let m = v.mag_low_u64();
        match v.sign {
            Sign::Negative => {
                if m > 1u64 << 63 {
                    Err(ConversionFailed::TooSmall)
                } else {
                    // 2^63 wraps to i64::MIN, which is its own negation.
                    Ok((m as i64).wrapping_neg())
                }
            }
            _ => {
                if m > i64::MAX as u64 {
                    Err(ConversionFailed::TooLarge)
                } else {
                    Ok(m as i64)
                }
            }
        }
    }
}

impl TryFrom<&SignedWide> for u64 {
    type Error = ConversionFailed;

    fn try_from(v: &SignedWide) -> Result<u64, ConversionFailed> {
        if v.sign == Sign::Negative {
            return Err(ConversionFailed::TooSmall);
        }
        if v.mag_digits().len() > 2 {
            return Err(ConversionFailed::TooLarge);
        }
        Ok(v.mag_low_u64())
    }
}
