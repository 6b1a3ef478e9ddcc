//! Conversions between the at-rest sign-magnitude representation and
//! the transient two's-complement form.
//!
//! These functions are the only place where the sign flag and the
//! digit vector trade information.  A result's sign is always
//! re-derived from its bit pattern here, never assumed by the caller.

use super::Sign;
use crate::digitvec::{self, Digit};

/// Rewrite `digits` (a magnitude) as the two's-complement image of
/// `sign * magnitude` over exactly `bits` bits.  Negative values are
/// complemented and incremented; bits at or above `bits` are then
/// cleared, so later shift or bitwise steps never see stale sign
/// bits.  With a buffer sized for a target width other than the
/// source's this is also the trimmed conversion: the negate-then-mask
/// sequence sign-extends into wider buffers and truncates into
/// narrower ones.
pub(crate) fn to_twos_complement(sign: Sign, bits: usize, digits: &mut [Digit]) {
    if sign == Sign::Negative {
        digitvec::negate_into(digits);
    }
    digitvec::mask_top(digits, bits);
}

/// Re-derive a sign from a two's-complement image over `bits` bits,
/// folding the image back into a magnitude.  Only the signed reading
/// inspects the top bit; the unsigned reading never infers Negative.
pub(crate) fn sign_from_twos_complement(signed: bool, bits: usize, digits: &mut [Digit]) -> Sign {
    if digitvec::is_zero(digits) {
        return Sign::Zero;
    }
    if signed && digitvec::test_bit(digits, bits - 1) {
        digitvec::negate_into(digits);
        digitvec::mask_top(digits, bits);
        Sign::Negative
    } else {
        Sign::Positive
    }
}

/// The normalize round trip (sign-magnitude to two's-complement and
/// back) over the storage width: this is where fixed-width wrap
/// happens.  The unsigned variant wraps modulo the declared width
/// (one bit below storage), so the guard bit never survives to rest.
pub(crate) fn normalize(
    signed: bool,
    storage_bits: usize,
    sign: Sign,
    digits: &mut [Digit],
) -> Sign {
    if sign == Sign::Zero {
        digits.fill(0);
        return Sign::Zero;
    }
    to_twos_complement(sign, storage_bits, digits);
    if signed {
        sign_from_twos_complement(true, storage_bits, digits)
    } else {
        digitvec::mask_top(digits, storage_bits - 1);
        if digitvec::is_zero(digits) {
            Sign::Zero
        } else {
            Sign::Positive
        }
    }
}


#[cfg(test)]
mod normalize_proptests {
    use num_bigint::BigInt;
    use test_strategy::{proptest, Arbitrary};

    use super::*;

    #[derive(Debug, Arbitrary)]
    struct NormalizeInput {
        sign: Sign,
        magnitude: u64,
        #[strategy(1usize..=70)]
        width: usize,
    }

    fn value_of(sign: Sign, digits: &[Digit]) -> BigInt {
        let s = match sign {
            Sign::Negative => num_bigint::Sign::Minus,
            Sign::Zero => num_bigint::Sign::NoSign,
            Sign::Positive => num_bigint::Sign::Plus,
        };
        BigInt::from_slice(s, digits)
    }

    fn input_digits(magnitude: u64) -> Vec<Digit> {
        vec![magnitude as Digit, (magnitude >> 32) as Digit, 0]
    }

    #[proptest]
    fn signed_normalize_is_reduction_modulo_two_to_the_width(input: NormalizeInput) {
        let mut digits = input_digits(input.magnitude);
        let before = value_of(input.sign, &digits);
        let sign = normalize(true, input.width, input.sign, &mut digits);
        let modulus = BigInt::from(1) << input.width;
        let half = BigInt::from(1) << (input.width - 1);
        let mut expected = ((before % &modulus) + &modulus) % &modulus;
        if expected >= half {
            expected -= &modulus;
        }
        assert_eq!(value_of(sign, &digits), expected);
        if sign == Sign::Zero {
            assert!(digits.iter().all(|d| *d == 0));
        }
    }

    #[proptest]
    fn unsigned_normalize_wraps_below_the_guard_bit(input: NormalizeInput) {
        let storage = input.width + 1;
        let mut digits = input_digits(input.magnitude);
        let before = value_of(input.sign, &digits);
        let sign = normalize(false, storage, input.sign, &mut digits);
        let modulus = BigInt::from(1) << input.width;
        let expected = ((before % &modulus) + &modulus) % &modulus;
        assert_ne!(sign, Sign::Negative);
        assert_eq!(value_of(sign, &digits), expected);
    }
}
