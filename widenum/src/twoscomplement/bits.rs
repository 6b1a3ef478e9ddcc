//! Bitwise operators, shifts, bit access, sub-range extraction and
//! the packed word-buffer exchange format.
//!
//! Unlike the arithmetic in [`super::arith`], everything here works on
//! the transient two's-complement image: both operands are
//! materialized at the result's storage width (which sign-extends a
//! negative operand and zero-extends the rest), the digit-wise kernel
//! op runs, and the sign is re-derived from the resulting pattern.
//! The one exception is `!`, which is cheaper in sign-magnitude form
//! since `!a == -a - 1`.

use std::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, ShlAssign, Shr,
    ShrAssign,
};

use tracing::{event, Level};

use super::arith::{native_parts_i64, native_parts_u64};
use super::signed::SignedWide;
use super::unsigned::UnsignedWide;
use super::{repr, Sign, Signed, Signedness, Wide};
use crate::digitvec::{self, digits_for, Digit, DIGIT_BITS};

/// Two's-complement image of `sign * digits` over exactly `bits`
/// bits, in a buffer sized for `bits`.
fn image_parts(sign: Sign, digits: &[Digit], bits: usize) -> Vec<Digit> {
    let mut out = vec![0; digits_for(bits)];
    let n = digits.len().min(out.len());
    out[..n].copy_from_slice(&digits[..n]);
    repr::to_twos_complement(sign, bits, &mut out);
    out
}

fn bit_parts<V: Signedness>(
    op: fn(&mut [Digit], &[Digit]),
    ls: Sign,
    ld: &[Digit],
    lw: usize,
    rs: Sign,
    rd: &[Digit],
    rw: usize,
) -> Wide<V> {
    let width = lw.max(rw);
    let bits = Wide::<V>::storage_bits_for(width);
    let mut out = image_parts(ls, ld, bits);
    let rhs = image_parts(rs, rd, bits);
    op(&mut out, &rhs);
    let sign = repr::sign_from_twos_complement(V::SIGNED, bits, &mut out);
    Wide::from_parts(sign, width, out)
}

fn and_parts<V: Signedness>(
    ls: Sign,
    ld: &[Digit],
    lw: usize,
    rs: Sign,
    rd: &[Digit],
    rw: usize,
) -> Wide<V> {
    bit_parts(digitvec::and_into, ls, ld, lw, rs, rd, rw)
}

fn or_parts<V: Signedness>(
    ls: Sign,
    ld: &[Digit],
    lw: usize,
    rs: Sign,
    rd: &[Digit],
    rw: usize,
) -> Wide<V> {
    bit_parts(digitvec::or_into, ls, ld, lw, rs, rd, rw)
}

fn xor_parts<V: Signedness>(
    ls: Sign,
    ld: &[Digit],
    lw: usize,
    rs: Sign,
    rd: &[Digit],
    rw: usize,
) -> Wide<V> {
    bit_parts(digitvec::xor_into, ls, ld, lw, rs, rd, rw)
}

macro_rules! bit_binop {
    ($imp:ident, $method:ident, $core:ident) => {
        impl<V: Signedness> $imp<&Wide<V>> for &Wide<V> {
            type Output = Wide<V>;
            fn $method(self, rhs: &Wide<V>) -> Wide<V> {
                $core::<V>(self.sign, &self.digits, self.width, rhs.sign, &rhs.digits, rhs.width)
            }
        }
        impl<V: Signedness> $imp<Wide<V>> for &Wide<V> {
            type Output = Wide<V>;
            fn $method(self, rhs: Wide<V>) -> Wide<V> {
                self.$method(&rhs)
            }
        }
        impl<V: Signedness> $imp<&Wide<V>> for Wide<V> {
            type Output = Wide<V>;
            fn $method(self, rhs: &Wide<V>) -> Wide<V> {
                (&self).$method(rhs)
            }
        }
        impl<V: Signedness> $imp<Wide<V>> for Wide<V> {
            type Output = Wide<V>;
            fn $method(self, rhs: Wide<V>) -> Wide<V> {
                (&self).$method(&rhs)
            }
        }
    };
}

bit_binop!(BitAnd, bitand, and_parts);
bit_binop!(BitOr, bitor, or_parts);
bit_binop!(BitXor, bitxor, xor_parts);

/// Mixed signed/unsigned bitwise operators follow the arithmetic
/// rule: the result is signed and the unsigned operand counts its
/// guard bit toward the width.
macro_rules! bit_mixed_binop {
    ($imp:ident, $method:ident, $core:ident) => {
        impl $imp<&UnsignedWide> for &SignedWide {
            type Output = SignedWide;
            fn $method(self, rhs: &UnsignedWide) -> SignedWide {
                $core::<Signed>(
                    self.sign,
                    &self.digits,
                    self.width,
                    rhs.sign,
                    &rhs.digits,
                    rhs.width + 1,
                )
            }
        }
        impl $imp<&SignedWide> for &UnsignedWide {
            type Output = SignedWide;
            fn $method(self, rhs: &SignedWide) -> SignedWide {
                $core::<Signed>(
                    self.sign,
                    &self.digits,
                    self.width + 1,
                    rhs.sign,
                    &rhs.digits,
                    rhs.width,
                )
            }
        }
        impl $imp<UnsignedWide> for SignedWide {
            type Output = SignedWide;
            fn $method(self, rhs: UnsignedWide) -> SignedWide {
                (&self).$method(&rhs)
            }
        }
        impl $imp<SignedWide> for UnsignedWide {
            type Output = SignedWide;
            fn $method(self, rhs: SignedWide) -> SignedWide {
                (&self).$method(&rhs)
            }
        }
    };
}

bit_mixed_binop!(BitAnd, bitand, and_parts);
bit_mixed_binop!(BitOr, bitor, or_parts);
bit_mixed_binop!(BitXor, bitxor, xor_parts);

macro_rules! bit_native_binop {
    ($imp:ident, $method:ident, $core:ident, $t:ty, $parts:ident) => {
        impl<V: Signedness> $imp<$t> for &Wide<V> {
            type Output = Wide<V>;
            fn $method(self, rhs: $t) -> Wide<V> {
                let (s, d) = $parts(rhs);
                $core::<V>(self.sign, &self.digits, self.width, s, &d, 64)
            }
        }
        impl<V: Signedness> $imp<$t> for Wide<V> {
            type Output = Wide<V>;
            fn $method(self, rhs: $t) -> Wide<V> {
                (&self).$method(rhs)
            }
        }
        impl<V: Signedness> $imp<&Wide<V>> for $t {
            type Output = Wide<V>;
            fn $method(self, rhs: &Wide<V>) -> Wide<V> {
                let (s, d) = $parts(self);
                $core::<V>(s, &d, 64, rhs.sign, &rhs.digits, rhs.width)
            }
        }
        impl<V: Signedness> $imp<Wide<V>> for $t {
            type Output = Wide<V>;
            fn $method(self, rhs: Wide<V>) -> Wide<V> {
                self.$method(&rhs)
            }
        }
    };
}

bit_native_binop!(BitAnd, bitand, and_parts, i64, native_parts_i64);
bit_native_binop!(BitOr, bitor, or_parts, i64, native_parts_i64);
bit_native_binop!(BitXor, bitxor, xor_parts, i64, native_parts_i64);
bit_native_binop!(BitAnd, bitand, and_parts, u64, native_parts_u64);
bit_native_binop!(BitOr, bitor, or_parts, u64, native_parts_u64);
bit_native_binop!(BitXor, bitxor, xor_parts, u64, native_parts_u64);

macro_rules! bit_op_assign {
    ($imp:ident, $method:ident, $core:ident) => {
        impl<V: Signedness, W: Signedness> $imp<&Wide<W>> for Wide<V> {
            fn $method(&mut self, rhs: &Wide<W>) {
                let r =
                    $core::<V>(self.sign, &self.digits, self.width, rhs.sign, &rhs.digits, rhs.width);
                self.assign(&r);
            }
        }
        impl<V: Signedness, W: Signedness> $imp<Wide<W>> for Wide<V> {
            fn $method(&mut self, rhs: Wide<W>) {
                self.$method(&rhs);
            }
        }
        impl<V: Signedness> $imp<i64> for Wide<V> {
            fn $method(&mut self, rhs: i64) {
                let (s, d) = native_parts_i64(rhs);
                let r = $core::<V>(self.sign, &self.digits, self.width, s, &d, 64);
                self.assign(&r);
            }
        }
        impl<V: Signedness> $imp<u64> for Wide<V> {
            fn $method(&mut self, rhs: u64) {
                let (s, d) = native_parts_u64(rhs);
                let r = $core::<V>(self.sign, &self.digits, self.width, s, &d, 64);
                self.assign(&r);
            }
        }
    };
}

bit_op_assign!(BitAndAssign, bitand_assign, and_parts);
bit_op_assign!(BitOrAssign, bitor_assign, or_parts);
bit_op_assign!(BitXorAssign, bitxor_assign, xor_parts);

impl<V: Signedness> Not for &Wide<V> {
    type Output = Wide<V>;
    fn not(self) -> Wide<V> {
        let mut digits = self.digits.clone();
        let sign = match self.sign {
            Sign::Zero => {
                digits[0] = 1;
                Sign::Negative
            }
            Sign::Positive => {
                digitvec::add_small_into(&mut digits, 1);
                Sign::Negative
            }
            Sign::Negative => {
                digitvec::sub_small_into(&mut digits, 1);
                Sign::Positive
            }
        };
        Wide::from_parts(sign, self.width, digits)
    }
}

impl<V: Signedness> Not for Wide<V> {
    type Output = Wide<V>;
    fn not(self) -> Wide<V> {
        (&self).not()
    }
}

impl<V: Signedness> Shl<usize> for &Wide<V> {
    type Output = Wide<V>;

    /// Shifting left grows the declared width by the shift amount, so
    /// no bit is ever dropped off the top.
    fn shl(self, n: usize) -> Wide<V> {
        if n == 0 {
            return self.clone();
        }
        let width = self.width + n;
        let mut digits = vec![0; digits_for(Wide::<V>::storage_bits_for(width))];
        digits[..self.digits.len()].copy_from_slice(&self.digits);
        digitvec::shift_left(&mut digits, n);
        Wide::from_parts(self.sign, width, digits)
    }
}

impl<V: Signedness> Shr<usize> for &Wide<V> {
    type Output = Wide<V>;

    /// Shifting right keeps the declared width and fills vacated high
    /// positions with the sign bit (zeros for the unsigned variant).
    fn shr(self, n: usize) -> Wide<V> {
        if n == 0 || self.sign == Sign::Zero {
            return self.clone();
        }
        // The image is taken over the whole buffer rather than the
        // storage width so a negative value's sign bits already reach
        // the top digit before the fill takes over.
        let full = self.digits.len() * DIGIT_BITS;
        let mut digits = image_parts(self.sign, &self.digits, full);
        digitvec::shift_right(&mut digits, n, self.sign == Sign::Negative);
        let bits = self.storage_bits();
        let sign = repr::sign_from_twos_complement(V::SIGNED, bits, &mut digits);
        Wide::from_parts(sign, self.width, digits)
    }
}

impl<V: Signedness> Shl<usize> for Wide<V> {
    type Output = Wide<V>;
    fn shl(self, n: usize) -> Wide<V> {
        (&self).shl(n)
    }
}

impl<V: Signedness> Shr<usize> for Wide<V> {
    type Output = Wide<V>;
    fn shr(self, n: usize) -> Wide<V> {
        (&self).shr(n)
    }
}

/// A negative shift amount leaves the operand unchanged.
macro_rules! wide_signed_shift_count {
    ($t:ty) => {
        impl<V: Signedness> Shl<$t> for &Wide<V> {
            type Output = Wide<V>;
            fn shl(self, n: $t) -> Wide<V> {
                if n <= 0 {
                    self.clone()
                } else {
                    self.shl(n as usize)
                }
            }
        }
        impl<V: Signedness> Shr<$t> for &Wide<V> {
            type Output = Wide<V>;
            fn shr(self, n: $t) -> Wide<V> {
                if n <= 0 {
                    self.clone()
                } else {
                    self.shr(n as usize)
                }
            }
        }
        impl<V: Signedness> Shl<$t> for Wide<V> {
            type Output = Wide<V>;
            fn shl(self, n: $t) -> Wide<V> {
                (&self).shl(n)
            }
        }
        impl<V: Signedness> Shr<$t> for Wide<V> {
            type Output = Wide<V>;
            fn shr(self, n: $t) -> Wide<V> {
                (&self).shr(n)
            }
        }
    };
}

wide_signed_shift_count!(i32);
wide_signed_shift_count!(i64);

macro_rules! wide_wide_shift {
    ($imp:ident, $method:ident) => {
        impl<V: Signedness, W: Signedness> $imp<&Wide<W>> for &Wide<V> {
            type Output = Wide<V>;
            fn $method(self, n: &Wide<W>) -> Wide<V> {
                match n.shift_amount() {
                    None => self.clone(),
                    Some(k) => self.$method(k as usize),
                }
            }
        }
        impl<V: Signedness, W: Signedness> $imp<Wide<W>> for &Wide<V> {
            type Output = Wide<V>;
            fn $method(self, n: Wide<W>) -> Wide<V> {
                self.$method(&n)
            }
        }
        impl<V: Signedness, W: Signedness> $imp<&Wide<W>> for Wide<V> {
            type Output = Wide<V>;
            fn $method(self, n: &Wide<W>) -> Wide<V> {
                (&self).$method(n)
            }
        }
        impl<V: Signedness, W: Signedness> $imp<Wide<W>> for Wide<V> {
            type Output = Wide<V>;
            fn $method(self, n: Wide<W>) -> Wide<V> {
                (&self).$method(&n)
            }
        }
    };
}

wide_wide_shift!(Shl, shl);
wide_wide_shift!(Shr, shr);

macro_rules! wide_shift_assign {
    ($t:ty) => {
        impl<V: Signedness> ShlAssign<$t> for Wide<V> {
            fn shl_assign(&mut self, n: $t) {
                *self = &*self << n;
            }
        }
        impl<V: Signedness> ShrAssign<$t> for Wide<V> {
            fn shr_assign(&mut self, n: $t) {
                *self = &*self >> n;
            }
        }
    };
}

wide_shift_assign!(usize);
wide_shift_assign!(i32);
wide_shift_assign!(i64);

impl<V: Signedness, W: Signedness> ShlAssign<&Wide<W>> for Wide<V> {
    fn shl_assign(&mut self, n: &Wide<W>) {
        *self = &*self << n;
    }
}

impl<V: Signedness, W: Signedness> ShrAssign<&Wide<W>> for Wide<V> {
    fn shr_assign(&mut self, n: &Wide<W>) {
        *self = &*self >> n;
    }
}

impl<V: Signedness, W: Signedness> ShlAssign<Wide<W>> for Wide<V> {
    fn shl_assign(&mut self, n: Wide<W>) {
        *self = &*self << &n;
    }
}

impl<V: Signedness, W: Signedness> ShrAssign<Wide<W>> for Wide<V> {
    fn shr_assign(&mut self, n: Wide<W>) {
        *self = &*self >> &n;
    }
}

impl<V: Signedness> Wide<V> {
    /// Shift amount carried by a wide value: `None` for a negative
    /// amount (shifts by a negative count are no-ops), otherwise the
    /// low 64 bits of the magnitude.
    pub(crate) fn shift_amount(&self) -> Option<u64> {
        if self.sign == Sign::Negative {
            return None;
        }
        Some(self.mag_low_u64())
    }

    /// Bit `i` of the two's-complement image.  Positions at or above
    /// the declared width read the sign-extension bit.
    pub fn test(&self, i: usize) -> bool {
        if i >= self.width {
            return self.sign == Sign::Negative;
        }
        match self.sign {
            Sign::Negative => digitvec::twos_bit(&self.digits, i),
            _ => digitvec::test_bit(&self.digits, i),
        }
    }

    /// Set bit `i` of the two's-complement image.  Out-of-range
    /// indices are a no-op.
    pub fn set(&mut self, i: usize) {
        self.put_bit(i, true);
    }

    /// Clear bit `i` of the two's-complement image.  Out-of-range
    /// indices are a no-op.
    pub fn clear(&mut self, i: usize) {
        self.put_bit(i, false);
    }

    fn put_bit(&mut self, i: usize, value: bool) {
        if i >= self.width {
            event!(
                Level::DEBUG,
                "bit index {} is outside the declared width {}",
                i,
                self.width
            );
            return;
        }
        let bits = self.storage_bits();
        repr::to_twos_complement(self.sign, bits, &mut self.digits);
        digitvec::assign_bit(&mut self.digits, i, value);
        self.sign = repr::sign_from_twos_complement(V::SIGNED, bits, &mut self.digits);
    }

    /// Mirror the declared width's bits of the two's-complement image
    /// in place.
    pub fn reverse(&mut self) {
        let bits = self.storage_bits();
        repr::to_twos_complement(self.sign, bits, &mut self.digits);
        digitvec::reverse_bits(&mut self.digits, self.width);
        self.sign = repr::sign_from_twos_complement(V::SIGNED, bits, &mut self.digits);
    }

    /// Bits `l` down to `r` of the two's-complement image as a new
    /// unsigned value of width `|l - r| + 1`.  Giving the indices in
    /// ascending order (`l < r`) reverses the extracted bits.  Indices
    /// are clamped to the declared width; a range lying entirely
    /// outside it, or a zero operand, yields the one-bit zero.
    pub fn range(&self, l: usize, r: usize) -> UnsignedWide {
        if self.sign == Sign::Zero || l.min(r) >= self.width {
            return UnsignedWide::new(1);
        }
        let hi = self.width - 1;
        let (l, r) = (l.min(hi), r.min(hi));
        let (lo, top, reversed) = if l >= r { (r, l, false) } else { (l, r, true) };
        let width = top - lo + 1;
        let mut out = image_parts(self.sign, &self.digits, self.storage_bits());
        digitvec::shift_right(&mut out, lo, false);
        digitvec::mask_top(&mut out, width);
        if reversed {
            digitvec::reverse_bits(&mut out, width);
        }
        UnsignedWide::from_parts(Sign::Positive, width, out)
    }

    /// Write the two's-complement image at the declared width into a
    /// flat word buffer, filling positions above the width with the
    /// sign bit.  The buffer must hold exactly `ceil(width / 32)`
    /// words.
    pub fn to_packed(&self, buf: &mut [u32]) {
        let nd = digits_for(self.width);
        if buf.len() != nd {
            panic!(
                "packed buffer holds {} words but width {} needs {}",
                buf.len(),
                self.width,
                nd
            );
        }
        let image = image_parts(self.sign, &self.digits, self.width);
        buf.copy_from_slice(&image[..nd]);
        let r = self.width % DIGIT_BITS;
        if self.sign == Sign::Negative && r != 0 {
            buf[nd - 1] |= !0 << r;
        }
    }

    /// Replace this value with the two's-complement image read from a
    /// flat word buffer, re-deriving the sign from the pattern.  The
    /// buffer must hold exactly `ceil(width / 32)` words.
    pub fn from_packed(&mut self, buf: &[u32]) {
        let nd = digits_for(self.width);
        if buf.len() != nd {
            panic!(
                "packed buffer holds {} words but width {} needs {}",
                buf.len(),
                self.width,
                nd
            );
        }
        self.digits.fill(0);
        self.digits[..nd].copy_from_slice(buf);
        digitvec::mask_top(&mut self.digits, self.width);
        self.sign = repr::sign_from_twos_complement(V::SIGNED, self.width, &mut self.digits);
    }
}
