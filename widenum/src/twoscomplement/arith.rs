//! Arithmetic: addition, subtraction, multiplication, division,
//! remainder, negation and the one-step increments.
//!
//! Everything here is sign-magnitude case analysis: equal signs add
//! magnitudes, differing signs subtract the smaller magnitude from
//! the larger and keep the larger's sign, multiplicative signs
//! multiply.  Binary operators return a fresh value wide enough that
//! the arithmetic itself cannot wrap (add and sub one bit wider than
//! the wider operand, mul the sum of the widths, div the dividend's
//! width, rem the narrower width).  Compound assignments keep the
//! receiver's declared width and wrap through the normalize round
//! trip, exactly like a store into a register of that width.

use std::cmp::Ordering;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

use tracing::{event, Level};

use super::error::DivisionByZero;
use super::signed::SignedWide;
use super::unsigned::UnsignedWide;
use super::{repr, Sign, Signed, Signedness, Wide};
use crate::digitvec::{self, digits_for, Digit};

/// Sign and little-endian magnitude of a native integer.  The
/// magnitude is exact; it is never reduced into a declared width, so
/// a native operand behaves like a 64-bit register holding it.
pub(crate) fn native_parts_i64(v: i64) -> (Sign, [Digit; 2]) {
    let sign = match v {
        0 => Sign::Zero,
        _ if v < 0 => Sign::Negative,
        _ => Sign::Positive,
    };
    let mag = v.unsigned_abs();
    (sign, [mag as Digit, (mag >> 32) as Digit])
}

pub(crate) fn native_parts_u64(v: u64) -> (Sign, [Digit; 2]) {
    let sign = if v == 0 { Sign::Zero } else { Sign::Positive };
    (sign, [v as Digit, (v >> 32) as Digit])
}

/// Add `rhs_sign * rhs` into `(acc_sign, acc)` in sign-magnitude
/// form, returning the accumulated sign.  Digits of `rhs` beyond
/// `acc`'s length are ignored; callers size `acc` so that anything
/// ignored lies above the storage width and would be wrapped away
/// regardless.
fn accumulate(acc_sign: Sign, acc: &mut [Digit], rhs_sign: Sign, rhs: &[Digit]) -> Sign {
    let rhs = &rhs[..rhs.len().min(acc.len())];
    match (acc_sign, rhs_sign) {
        (_, Sign::Zero) => acc_sign,
        (Sign::Zero, _) => {
            acc[..rhs.len()].copy_from_slice(rhs);
            rhs_sign
        }
        _ if acc_sign == rhs_sign => {
            digitvec::add_into(acc, rhs);
            acc_sign
        }
        _ => match digitvec::compare(acc, rhs) {
            Ordering::Greater => {
                digitvec::sub_into(acc, rhs);
                acc_sign
            }
            Ordering::Less => {
                let mut larger = rhs.to_vec();
                larger.resize(acc.len(), 0);
                digitvec::sub_into(&mut larger, acc);
                acc.copy_from_slice(&larger);
                rhs_sign
            }
            Ordering::Equal => {
                acc.fill(0);
                Sign::Zero
            }
        },
    }
}

fn add_parts<V: Signedness>(
    ls: Sign,
    ld: &[Digit],
    lw: usize,
    rs: Sign,
    rd: &[Digit],
    rw: usize,
) -> Wide<V> {
    let width = lw.max(rw) + 1;
    let mut digits = vec![0; digits_for(Wide::<V>::storage_bits_for(width))];
    let n = ld.len().min(digits.len());
    digits[..n].copy_from_slice(&ld[..n]);
    let sign = accumulate(ls, &mut digits, rs, rd);
    Wide::from_parts(sign, width, digits)
}

fn sub_parts<V: Signedness>(
    ls: Sign,
    ld: &[Digit],
    lw: usize,
    rs: Sign,
    rd: &[Digit],
    rw: usize,
) -> Wide<V> {
    add_parts(ls, ld, lw, rs.opposite(), rd, rw)
}

fn mul_parts<V: Signedness>(
    ls: Sign,
    ld: &[Digit],
    lw: usize,
    rs: Sign,
    rd: &[Digit],
    rw: usize,
) -> Wide<V> {
    let width = lw + rw;
    let sign = ls.product(rs);
    if sign == Sign::Zero {
        return Wide::new(width);
    }
    let a = &ld[..digitvec::nonzero_len(ld)];
    let b = &rd[..digitvec::nonzero_len(rd)];
    let mut out = vec![0; a.len() + b.len()];
    if b.len() == 1 {
        let alen = a.len();
        out[..alen].copy_from_slice(a);
        out[alen] = digitvec::mul_small_into(&mut out[..alen], b[0]);
    } else {
        digitvec::mul(a, b, &mut out);
    }
    Wide::from_parts(sign, width, out)
}

/// Quotient and remainder in one pass.  The quotient truncates toward
/// zero at the dividend's declared width; the remainder takes the
/// dividend's sign at the narrower of the two widths.
fn div_rem_parts<V: Signedness>(
    ls: Sign,
    ld: &[Digit],
    lw: usize,
    rs: Sign,
    rd: &[Digit],
    rw: usize,
) -> Result<(Wide<V>, Wide<V>), DivisionByZero> {
    let q_width = lw;
    let r_width = lw.min(rw);
    if rs == Sign::Zero {
        event!(Level::WARN, "attempt to divide a width-{} value by zero", lw);
        return Err(DivisionByZero {
            zero_dividend: ls == Sign::Zero,
        });
    }
    if ls == Sign::Zero {
        return Ok((Wide::new(q_width), Wide::new(r_width)));
    }
    let q_sign = ls.product(rs);
    let a = &ld[..digitvec::nonzero_len(ld)];
    let b = &rd[..digitvec::nonzero_len(rd)];
    Ok(match digitvec::compare(a, b) {
        Ordering::Less => (
            Wide::new(q_width),
            Wide::from_parts(ls, r_width, a.to_vec()),
        ),
        Ordering::Equal => (
            Wide::from_parts(q_sign, q_width, vec![1]),
            Wide::new(r_width),
        ),
        Ordering::Greater => {
            let mut q = vec![0; a.len()];
            let mut r = vec![0; a.len()];
            digitvec::div_rem(a, b, &mut q, &mut r);
            (
                Wide::from_parts(q_sign, q_width, q),
                Wide::from_parts(ls, r_width, r),
            )
        }
    })
}

fn div_parts<V: Signedness>(
    ls: Sign,
    ld: &[Digit],
    lw: usize,
    rs: Sign,
    rd: &[Digit],
    rw: usize,
) -> Wide<V> {
    match div_rem_parts(ls, ld, lw, rs, rd, rw) {
        Ok((q, _)) => q,
        Err(e) => panic!("{}", e),
    }
}

fn rem_parts<V: Signedness>(
    ls: Sign,
    ld: &[Digit],
    lw: usize,
    rs: Sign,
    rd: &[Digit],
    rw: usize,
) -> Wide<V> {
    match div_rem_parts(ls, ld, lw, rs, rd, rw) {
        Ok((_, r)) => r,
        Err(e) => panic!("{}", e),
    }
}

impl<V: Signedness> Wide<V> {
    /// Quotient truncated toward zero, at this value's declared
    /// width.  Unlike the `/` operator this reports a zero divisor
    /// instead of panicking.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, DivisionByZero> {
        div_rem_parts(self.sign, &self.digits, self.width, rhs.sign, &rhs.digits, rhs.width)
            .map(|(q, _)| q)
    }

    /// Remainder with the dividend's sign, at the narrower declared
    /// width.  Unlike the `%` operator this reports a zero divisor
    /// instead of panicking.
    pub fn checked_rem(&self, rhs: &Self) -> Result<Self, DivisionByZero> {
        div_rem_parts(self.sign, &self.digits, self.width, rhs.sign, &rhs.digits, rhs.width)
            .map(|(_, r)| r)
    }

    /// Magnitude of the value at the same declared width.  The most
    /// negative signed value wraps to itself, as in hardware.
    pub fn abs(&self) -> Self {
        let sign = match self.sign {
            Sign::Negative => Sign::Positive,
            s => s,
        };
        Wide::from_parts(sign, self.width, self.digits.clone())
    }

    fn accumulate_assign(&mut self, rs: Sign, rd: &[Digit]) {
        self.sign = accumulate(self.sign, &mut self.digits, rs, rd);
        self.sign = repr::normalize(V::SIGNED, self.storage_bits(), self.sign, &mut self.digits);
    }

    /// Add one in place, wrapping at the declared width.
    pub fn increment(&mut self) {
        match self.sign {
            Sign::Zero => {
                self.digits[0] = 1;
                self.sign = Sign::Positive;
            }
            Sign::Positive => {
                digitvec::add_small_into(&mut self.digits, 1);
            }
            Sign::Negative => {
                digitvec::sub_small_into(&mut self.digits, 1);
            }
        }
        self.sign = repr::normalize(V::SIGNED, self.storage_bits(), self.sign, &mut self.digits);
    }

    /// Subtract one in place, wrapping at the declared width.
    pub fn decrement(&mut self) {
        match self.sign {
            Sign::Zero => {
                self.digits[0] = 1;
                self.sign = Sign::Negative;
            }
            Sign::Positive => {
                digitvec::sub_small_into(&mut self.digits, 1);
            }
            Sign::Negative => {
                digitvec::add_small_into(&mut self.digits, 1);
            }
        }
        self.sign = repr::normalize(V::SIGNED, self.storage_bits(), self.sign, &mut self.digits);
    }

    /// Add one in place, returning the value from before the step.
    pub fn post_increment(&mut self) -> Self {
        let prior = self.clone();
        self.increment();
        prior
    }

    /// Subtract one in place, returning the value from before the
    /// step.
    pub fn post_decrement(&mut self) -> Self {
        let prior = self.clone();
        self.decrement();
        prior
    }
}

/// Stamp the four owned/borrowed operand combinations of a binary
/// operator over one core function taking both operands as parts.
macro_rules! wide_binop {
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

wide_binop!(Add, add, add_parts);
wide_binop!(Sub, sub, sub_parts);
wide_binop!(Mul, mul, mul_parts);
wide_binop!(Div, div, div_parts);
wide_binop!(Rem, rem, rem_parts);

/// Mixed signed/unsigned operators produce a signed result; the
/// unsigned operand counts its guard bit toward the width so every
/// one of its values fits the signed reading.
macro_rules! wide_mixed_binop {
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

wide_mixed_binop!(Add, add, add_parts);
wide_mixed_binop!(Sub, sub, sub_parts);
wide_mixed_binop!(Mul, mul, mul_parts);
wide_mixed_binop!(Div, div, div_parts);
wide_mixed_binop!(Rem, rem, rem_parts);

/// Stamp a binary operator against a native integer type, in both
/// operand orders.  The native side is treated as a 64-bit register.
macro_rules! wide_native_binop {
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

wide_native_binop!(Add, add, add_parts, i64, native_parts_i64);
wide_native_binop!(Sub, sub, sub_parts, i64, native_parts_i64);
wide_native_binop!(Mul, mul, mul_parts, i64, native_parts_i64);
wide_native_binop!(Div, div, div_parts, i64, native_parts_i64);
wide_native_binop!(Rem, rem, rem_parts, i64, native_parts_i64);
wide_native_binop!(Add, add, add_parts, u64, native_parts_u64);
wide_native_binop!(Sub, sub, sub_parts, u64, native_parts_u64);
wide_native_binop!(Mul, mul, mul_parts, u64, native_parts_u64);
wide_native_binop!(Div, div, div_parts, u64, native_parts_u64);
wide_native_binop!(Rem, rem, rem_parts, u64, native_parts_u64);

impl<V: Signedness, W: Signedness> AddAssign<&Wide<W>> for Wide<V> {
    fn add_assign(&mut self, rhs: &Wide<W>) {
        self.accumulate_assign(rhs.sign, &rhs.digits);
    }
}

impl<V: Signedness, W: Signedness> SubAssign<&Wide<W>> for Wide<V> {
    fn sub_assign(&mut self, rhs: &Wide<W>) {
        self.accumulate_assign(rhs.sign.opposite(), &rhs.digits);
    }
}

impl<V: Signedness, W: Signedness> MulAssign<&Wide<W>> for Wide<V> {
    fn mul_assign(&mut self, rhs: &Wide<W>) {
        let prod =
            mul_parts::<V>(self.sign, &self.digits, self.width, rhs.sign, &rhs.digits, rhs.width);
        self.assign(&prod);
    }
}

impl<V: Signedness, W: Signedness> DivAssign<&Wide<W>> for Wide<V> {
    fn div_assign(&mut self, rhs: &Wide<W>) {
        let q =
            div_parts::<V>(self.sign, &self.digits, self.width, rhs.sign, &rhs.digits, rhs.width);
        self.assign(&q);
    }
}

impl<V: Signedness, W: Signedness> RemAssign<&Wide<W>> for Wide<V> {
    fn rem_assign(&mut self, rhs: &Wide<W>) {
        let r =
            rem_parts::<V>(self.sign, &self.digits, self.width, rhs.sign, &rhs.digits, rhs.width);
        self.assign(&r);
    }
}

macro_rules! forward_assign {
    ($imp:ident, $method:ident) => {
        impl<V: Signedness, W: Signedness> $imp<Wide<W>> for Wide<V> {
            fn $method(&mut self, rhs: Wide<W>) {
                self.$method(&rhs);
            }
        }
    };
}

forward_assign!(AddAssign, add_assign);
forward_assign!(SubAssign, sub_assign);
forward_assign!(MulAssign, mul_assign);
forward_assign!(DivAssign, div_assign);
forward_assign!(RemAssign, rem_assign);

macro_rules! wide_native_assign {
    ($t:ty, $parts:ident) => {
        impl<V: Signedness> AddAssign<$t> for Wide<V> {
            fn add_assign(&mut self, rhs: $t) {
                let (s, d) = $parts(rhs);
                self.accumulate_assign(s, &d);
            }
        }
        impl<V: Signedness> SubAssign<$t> for Wide<V> {
            fn sub_assign(&mut self, rhs: $t) {
                let (s, d) = $parts(rhs);
                self.accumulate_assign(s.opposite(), &d);
            }
        }
        impl<V: Signedness> MulAssign<$t> for Wide<V> {
            fn mul_assign(&mut self, rhs: $t) {
                let (s, d) = $parts(rhs);
                let prod = mul_parts::<V>(self.sign, &self.digits, self.width, s, &d, 64);
                self.assign(&prod);
            }
        }
        impl<V: Signedness> DivAssign<$t> for Wide<V> {
            fn div_assign(&mut self, rhs: $t) {
                let (s, d) = $parts(rhs);
                let q = div_parts::<V>(self.sign, &self.digits, self.width, s, &d, 64);
                self.assign(&q);
            }
        }
        impl<V: Signedness> RemAssign<$t> for Wide<V> {
            fn rem_assign(&mut self, rhs: $t) {
                let (s, d) = $parts(rhs);
                let r = rem_parts::<V>(self.sign, &self.digits, self.width, s, &d, 64);
                self.assign(&r);
            }
        }
    };
}

wide_native_assign!(i64, native_parts_i64);
wide_native_assign!(u64, native_parts_u64);

impl<V: Signedness> Neg for &Wide<V> {
    type Output = Wide<V>;
    fn neg(self) -> Wide<V> {
        Wide::from_parts(self.sign.opposite(), self.width, self.digits.clone())
    }
}

impl<V: Signedness> Neg for Wide<V> {
    type Output = Wide<V>;
    fn neg(self) -> Wide<V> {
        Wide::from_parts(self.sign.opposite(), self.width, self.digits)
    }
}
