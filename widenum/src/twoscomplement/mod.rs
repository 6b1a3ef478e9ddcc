//! Arbitrary-width two's-complement register values.
//!
//! A [`Wide`] value models a hardware register of a caller-declared
//! bit width: [`SignedWide`](signed::SignedWide) reads the top bit of
//! that width as a sign in the usual two's-complement way, while
//! [`UnsignedWide`](unsigned::UnsignedWide) reads every bit as
//! magnitude.  At rest a value is a sign flag plus a little-endian
//! magnitude (sign-magnitude form); the two's-complement image of the
//! declared width is materialized only transiently, for bitwise,
//! shift and bit-indexed operations, and the sign is re-derived from
//! the bits before the result can be observed.  Arithmetic results
//! wrap at a declared width exactly the way the corresponding register
//! would.
//!
//! The unsigned variant reserves one extra storage bit above the
//! declared width (the guard bit), so that an all-ones magnitude is
//! never mistaken for a negative two's-complement pattern when the
//! two variants exchange digits.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::Serialize;

#[cfg(test)]
use test_strategy::Arbitrary;

use crate::digitvec::{self, digits_for, Digit};

mod arith;
mod bits;
mod cmp;
pub mod error;
pub mod format;
mod parse;
mod repr;
pub mod signed;
pub mod unsigned;

/// Sign of a value at rest.  The magnitude digits never encode the
/// sign; a value is negative only when this flag says so, and the flag
/// is `Zero` exactly when every digit is zero.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum Sign {
    Negative = -1,
    Zero = 0,
    Positive = 1,
}

impl Sign {
    /// Sign of a product (or quotient) of values with these signs.
    pub fn product(self, other: Sign) -> Sign {
        match (self, other) {
            (Sign::Zero, _) | (_, Sign::Zero) => Sign::Zero,
            _ if self == other => Sign::Positive,
            _ => Sign::Negative,
        }
    }

    /// Sign of the negated value.
    pub fn opposite(self) -> Sign {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Signed {}
    impl Sealed for super::Unsigned {}
}

/// Per-variant policy: everything that distinguishes the signed
/// reading of a digit vector from the unsigned one.
pub trait Signedness: private::Sealed {
    /// Whether the top bit of the declared width reads as a sign.
    const SIGNED: bool;
    /// Name shown in `Debug` output.
    const NAME: &'static str;
}

/// Marker for the signed reading.
#[derive(Clone, Copy, Debug)]
pub enum Signed {}

impl Signedness for Signed {
    const SIGNED: bool = true;
    const NAME: &'static str = "SignedWide";
}

/// Marker for the unsigned reading.
#[derive(Clone, Copy, Debug)]
pub enum Unsigned {}

impl Signedness for Unsigned {
    const SIGNED: bool = false;
    const NAME: &'static str = "UnsignedWide";
}

/// Trait common to both the signed and the unsigned value types.
pub trait WideCommon {
    /// Declared width in bits.
    fn width(&self) -> usize;
    /// Sign of the value.
    fn signum(&self) -> Sign;
}

/// An integer that behaves like a register of exactly `width` bits.
///
/// Use the [`signed::SignedWide`] and [`unsigned::UnsignedWide`]
/// aliases; the variant marker only selects the [`Signedness`]
/// policy.
#[derive(Serialize)]
pub struct Wide<V: Signedness> {
    sign: Sign,
    width: usize,
    digits: Vec<Digit>,
    #[serde(skip)]
    _variant: PhantomData<V>,
}

// Hand-written: a derived Clone would carry a `V: Clone` bound that
// code generic over `Signedness` alone cannot meet.
impl<V: Signedness> Clone for Wide<V> {
    fn clone(&self) -> Self {
        Wide {
            sign: self.sign,
            width: self.width,
            digits: self.digits.clone(),
            _variant: PhantomData,
        }
    }
}

impl<V: Signedness> Wide<V> {
    /// Storage width for a declared width: identical for the signed
    /// variant, one guard bit more for the unsigned one.
    pub(crate) fn storage_bits_for(width: usize) -> usize {
        if V::SIGNED {
            width
        } else {
            width + 1
        }
    }

    pub(crate) fn storage_bits(&self) -> usize {
        Self::storage_bits_for(self.width)
    }

    /// A zero value of the given declared width.
    ///
    /// # Panics
    ///
    /// Panics if `width` is zero; zero-width numbers are not allowed.
    pub fn new(width: usize) -> Self {
        Self::from_parts(Sign::Zero, width, Vec::new())
    }

    /// Build a value from explicit parts.  The buffer is resized for
    /// the declared width and the sign is re-derived from the bits by
    /// the normalize round trip; every operation funnels its result
    /// through here.
    pub(crate) fn from_parts(sign: Sign, width: usize, mut digits: Vec<Digit>) -> Self {
        assert!(width > 0, "zero-width numbers are not allowed");
        let storage = Self::storage_bits_for(width);
        digits.resize(digits_for(storage), 0);
        let sign = repr::normalize(V::SIGNED, storage, sign, &mut digits);
        Wide {
            sign,
            width,
            digits,
            _variant: PhantomData,
        }
    }

    /// The value of `v`, reduced into the declared width like a
    /// register load.
    pub fn from_u64_width(v: u64, width: usize) -> Self {
        let sign = if v == 0 { Sign::Zero } else { Sign::Positive };
        Self::from_parts(sign, width, vec![v as Digit, (v >> 32) as Digit])
    }

    /// The value of `v`, reduced into the declared width like a
    /// register load.
    pub fn from_i64_width(v: i64, width: usize) -> Self {
        let sign = match v {
            0 => Sign::Zero,
            _ if v < 0 => Sign::Negative,
            _ => Sign::Positive,
        };
        let mag = v.unsigned_abs();
        Self::from_parts(sign, width, vec![mag as Digit, (mag >> 32) as Digit])
    }

    /// Declared width in bits.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn signum(&self) -> Sign {
        self.sign
    }

    pub fn is_zero(&self) -> bool {
        self.sign == Sign::Zero
    }

    pub fn is_negative(&self) -> bool {
        self.sign == Sign::Negative
    }

    pub fn is_positive(&self) -> bool {
        self.sign == Sign::Positive
    }

    /// Largest value of the given declared width: all ones for the
    /// unsigned variant, all ones below the sign bit for the signed
    /// one.
    pub fn max_value(width: usize) -> Self {
        let mut v = Self::new(width);
        let ones = if V::SIGNED { width - 1 } else { width };
        if ones > 0 {
            v.digits.fill(Digit::MAX);
            digitvec::mask_top(&mut v.digits, ones);
            v.sign = Sign::Positive;
        }
        v
    }

    /// Smallest value of the given declared width: zero for the
    /// unsigned variant, `-2^(width-1)` for the signed one.
    pub fn min_value(width: usize) -> Self {
        let mut v = Self::new(width);
        if V::SIGNED {
            digitvec::set_bit(&mut v.digits, width - 1);
            v.sign = Sign::Negative;
        }
        v
    }

    /// Width-preserving assignment: copy the value of `rhs` (either
    /// variant) into this value's declared width, wrapping like any
    /// register load.
    pub fn assign<W: Signedness>(&mut self, rhs: &Wide<W>) {
        let n = self.digits.len().min(rhs.digits.len());
        self.digits[..n].copy_from_slice(&rhs.digits[..n]);
        self.digits[n..].fill(0);
        self.sign = repr::normalize(V::SIGNED, self.storage_bits(), rhs.sign, &mut self.digits);
    }

    /// Magnitude digits with leading zeros trimmed.
    pub(crate) fn mag_digits(&self) -> &[Digit] {
        &self.digits[..digitvec::nonzero_len(&self.digits)]
    }

    /// Low 64 bits of the magnitude.
    pub(crate) fn mag_low_u64(&self) -> u64 {
        let lo = self.digits.first().copied().unwrap_or(0) as u64;
        let hi = self.digits.get(1).copied().unwrap_or(0) as u64;
        hi << 32 | lo
    }

    /// The two's-complement image of this value over exactly `bits`
    /// bits, in a fresh buffer.  Wider targets sign-extend, narrower
    /// targets truncate.
    pub(crate) fn twos_image(&self, bits: usize) -> Vec<Digit> {
        let mut image = vec![0; digits_for(bits)];
        let n = image.len().min(self.digits.len());
        image[..n].copy_from_slice(&self.digits[..n]);
        repr::to_twos_complement(self.sign, bits, &mut image);
        image
    }
}

impl<V: Signedness> WideCommon for Wide<V> {
    fn width(&self) -> usize {
        self.width
    }

    fn signum(&self) -> Sign {
        self.sign
    }
}

impl<V: Signedness> Default for Wide<V> {
    /// The 1-bit zero.
    fn default() -> Self {
        Self::new(1)
    }
}

impl<V: Signedness> From<&Wide<V>> for f64 {
    /// Lossy by nature: magnitudes beyond 53 bits round.
    fn from(v: &Wide<V>) -> f64 {
        let mut x = 0.0f64;
        for &d in v.mag_digits().iter().rev() {
            x = x * 4294967296.0 + d as f64;
        }
        if v.sign == Sign::Negative {
            -x
        } else {
            x
        }
    }
}

impl<V: Signedness> fmt::Debug for Wide<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{width: {}, value: {}}}", V::NAME, self.width, self)
    }
}

impl<V: Signedness> Hash for Wide<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equality compares values across widths, so the hash must
        // ignore the width and any leading zero digits.
        (self.sign as i8).hash(state);
        for d in self.mag_digits() {
            d.hash(state);
        }
    }
}
