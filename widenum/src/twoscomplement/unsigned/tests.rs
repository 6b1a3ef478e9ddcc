use super::super::error::{ConversionFailed, DivisionByZero};
use super::super::format::Base;
use super::super::signed::SignedWide;
use super::UnsignedWide;
use crate::{swide, uwide};

#[test]
fn test_new_and_bounds() {
    let v = UnsignedWide::new(8);
    assert_eq!(v.width(), 8);
    assert!(v.is_zero());
    assert_eq!(UnsignedWide::max_value(8), 255u64);
    assert!(UnsignedWide::min_value(8).is_zero());
    assert_eq!(UnsignedWide::max_value(1), 1u64);
}

#[test]
fn test_construction_wraps_at_the_declared_width() {
    assert_eq!(UnsignedWide::from_u64_width(256, 8), 0u64);
    assert_eq!(UnsignedWide::from_u64_width(300, 8), 44u64);
    assert_eq!(uwide!(4; 9), 9u64);
    assert_eq!(uwide!(4; 16), 0u64);
}

#[test]
fn test_the_top_bit_is_not_a_sign() {
    let v = uwide!(8; 255);
    assert!(v.is_positive());
    assert_eq!(v, 255u64);
    assert!(v.test(7));
    assert!(!v.test(8));
    assert!(!v.test(100));
}

#[test]
fn test_binary_subtraction_wraps_at_the_result_width() {
    let a = uwide!(4; 3);
    let b = uwide!(4; 9);
    let d = &a - &b;
    assert_eq!(d.width(), 5);
    assert_eq!(d, 26u64);

    // Assignment wraps at the receiver's width instead.
    let mut c = a;
    c -= &b;
    assert_eq!(c.width(), 4);
    assert_eq!(c, 10u64);
}

#[test]
fn test_addition_never_wraps() {
    let sum = uwide!(4; 15) + uwide!(4; 15);
    assert_eq!(sum.width(), 5);
    assert_eq!(sum, 30u64);
}

#[test]
fn test_division_and_remainder() {
    assert_eq!(uwide!(8; 100) / uwide!(8; 7), 14u64);
    assert_eq!(uwide!(8; 100) % uwide!(4; 7), 2u64);
    assert_eq!((uwide!(8; 100) % uwide!(4; 7)).width(), 4);
    assert_eq!(
        uwide!(8; 1).checked_div(&uwide!(8; 0)),
        Err(DivisionByZero {
            zero_dividend: false
        })
    );
    assert_eq!(
        uwide!(8; 0).checked_rem(&uwide!(8; 0)),
        Err(DivisionByZero {
            zero_dividend: true
        })
    );
}

#[test]
fn test_masking_with_a_bit_pattern() {
    assert_eq!(uwide!(4; 10) & uwide!(4; 12), 8u64);
    assert_eq!(uwide!(4; 10) | uwide!(4; 12), 14u64);
    assert_eq!(uwide!(4; 10) ^ uwide!(4; 12), 6u64);
}

#[test]
fn test_not_flips_every_bit_of_the_width() {
    assert_eq!(!uwide!(4; 10), 5u64);
    assert_eq!(!uwide!(4; 0), 15u64);
    assert!((!uwide!(4; 15)).is_zero());
}

#[test]
fn test_right_shift_is_logical() {
    let v = uwide!(8; 0x80);
    assert_eq!(&v >> 3usize, 16u64);
    assert_eq!((&v >> 3usize).width(), 8);
    assert!((&v >> 10usize).is_zero());
    let grown = &v << 2usize;
    assert_eq!(grown.width(), 10);
    assert_eq!(grown, 0x200u64);
}

#[test]
fn test_increment_and_decrement_wrap() {
    let mut v = uwide!(4; 15);
    v.increment();
    assert!(v.is_zero());
    v.decrement();
    assert_eq!(v, 15u64);
    assert_eq!(v.post_decrement(), 15u64);
    assert_eq!(v, 14u64);
}

#[test]
fn test_native_operands() {
    let v = uwide!(4; 9);
    assert_eq!(&v + 8u64, 17u64);
    assert_eq!(&v + (-3i64), 6u64);
    assert_eq!(20u64 / &uwide!(8; 5), 4u64);
    let mut w = v;
    w += 8u64;
    assert_eq!(w, 1u64);
}

#[test]
fn test_conversions_between_the_variants() {
    let u = uwide!(8; 255);
    let s = SignedWide::from(&u);
    assert_eq!(s.width(), 9);
    assert_eq!(s, 255i64);
    assert_eq!(UnsignedWide::from(&s).width(), 9);
    assert_eq!(UnsignedWide::from(&s), 255u64);

    // A negative signed value wraps into the unsigned width.
    assert_eq!(UnsignedWide::from(&swide!(8; -1)), 255u64);
    assert_eq!(UnsignedWide::from(&swide!(8; -1)).width(), 8);
}

#[test]
fn test_native_conversion_widths() {
    assert_eq!(UnsignedWide::from(200u8).width(), 8);
    assert_eq!(UnsignedWide::from(200u8), 200u64);
    assert_eq!(UnsignedWide::from(u64::MAX).width(), 64);

    let v = UnsignedWide::try_from(100i8).unwrap();
    assert_eq!(v.width(), 7);
    assert_eq!(v, 100u64);
    assert_eq!(UnsignedWide::try_from(-5i32), Err(ConversionFailed::TooSmall));
    assert!(UnsignedWide::try_from(0i64).unwrap().is_zero());
}

#[test]
fn test_extraction_to_native_integers() {
    assert_eq!(u64::try_from(&UnsignedWide::from(u64::MAX)), Ok(u64::MAX));
    assert_eq!(
        i64::try_from(&UnsignedWide::from(u64::MAX)),
        Err(ConversionFailed::TooLarge)
    );
    assert_eq!(i64::try_from(&uwide!(8; 100)), Ok(100i64));

    let big = UnsignedWide::from(u64::MAX) + 1u64;
    assert_eq!(u64::try_from(&big), Err(ConversionFailed::TooLarge));
}

#[test]
fn test_range_and_reverse() {
    assert_eq!(uwide!(4; 0b1011).range(3, 1), 5u64);
    assert_eq!(uwide!(4; 0b1011).range(0, 2), 6u64);
    let mut v = uwide!(4; 0b0010);
    v.reverse();
    assert_eq!(v, 4u64);
}

#[test]
fn test_packed_words_have_no_sign_fill() {
    let v = uwide!(8; 255);
    let mut buf = [0u32; 1];
    v.to_packed(&mut buf);
    assert_eq!(buf[0], 0xFF);

    let mut back = UnsignedWide::new(4);
    back.from_packed(&[0xFFFF_FFFF]);
    assert_eq!(back, 15u64);
}

#[test]
fn test_base_strings_cover_the_declared_width() {
    let v = uwide!(4; 15);
    assert_eq!(v.to_base_string(Base::Hex, true), "0xF");
    assert_eq!(v.to_base_string(Base::Dec, true), "0d15");
    assert_eq!(v.to_base_string(Base::Oct, true), "0o17");
    assert_eq!(v.to_base_string(Base::Bin, true), "0b1111");

    // Negative text wraps into the unsigned width.
    assert_eq!(UnsignedWide::from_str_width("-5", 4).unwrap(), 11u64);
}

#[test]
fn test_display_and_debug() {
    assert_eq!(format!("{}", uwide!(8; 255)), "255");
    assert_eq!(
        format!("{:?}", uwide!(8; 255)),
        "UnsignedWide{width: 8, value: 255}"
    );
}

#[test]
fn test_equality_and_ordering() {
    assert_eq!(uwide!(8; 5), uwide!(16; 5));
    assert!(uwide!(4; 2) < uwide!(4; 7));
    assert!(uwide!(4; 2) < 3u64);
    assert!(3u64 > uwide!(4; 2));
    assert!(-1i64 < uwide!(4; 0));
}

#[test]
fn test_f64_export() {
    assert_eq!(f64::from(&uwide!(8; 200)), 200.0);
}

#[cfg(test)]
mod arithmetic_proptests {
    use num_bigint::BigUint;
    use test_strategy::{proptest, Arbitrary};

    use super::super::UnsignedWide;

    fn to_biguint(v: &UnsignedWide) -> BigUint {
        BigUint::from_slice(v.mag_digits())
    }

    #[derive(Debug, Arbitrary)]
    struct BinaryOperands {
        left: u64,
        right: u64,
    }

    #[derive(Debug, Arbitrary)]
    struct WrapInput {
        value: u64,
        #[strategy(1usize..=80)]
        width: usize,
    }

    #[proptest]
    fn arithmetic_matches_biguint(input: BinaryOperands) {
        let a = UnsignedWide::from(input.left);
        let b = UnsignedWide::from(input.right);
        let ba = BigUint::from(input.left);
        let bb = BigUint::from(input.right);

        assert_eq!(to_biguint(&(&a + &b)), &ba + &bb);
        assert_eq!(to_biguint(&(&a * &b)), &ba * &bb);
        if input.right != 0 {
            assert_eq!(to_biguint(&(&a / &b)), &ba / &bb);
            assert_eq!(to_biguint(&(&a % &b)), &ba % &bb);
        }
    }

    #[proptest]
    fn subtraction_wraps_at_the_result_width(input: BinaryOperands) {
        let a = UnsignedWide::from(input.left);
        let b = UnsignedWide::from(input.right);
        let modulus = BigUint::from(1u8) << 65;
        let expected =
            ((&modulus + BigUint::from(input.left)) - BigUint::from(input.right)) % &modulus;
        assert_eq!(to_biguint(&(&a - &b)), expected);
    }

    #[proptest]
    fn assignment_wraps_like_the_native_type(input: BinaryOperands) {
        let mut sum = UnsignedWide::from(input.left);
        sum += UnsignedWide::from(input.right);
        assert_eq!(sum, input.left.wrapping_add(input.right));

        let mut diff = UnsignedWide::from(input.left);
        diff -= UnsignedWide::from(input.right);
        assert_eq!(diff, input.left.wrapping_sub(input.right));

        let mut prod = UnsignedWide::from(input.left);
        prod *= UnsignedWide::from(input.right);
        assert_eq!(prod, input.left.wrapping_mul(input.right));
    }

    #[proptest]
    fn construction_wraps_modulo_the_width(input: WrapInput) {
        let v = UnsignedWide::from_u64_width(input.value, input.width);
        let expected = BigUint::from(input.value) % (BigUint::from(1u8) << input.width);
        assert_eq!(to_biguint(&v), expected);
    }

    #[proptest]
    fn increment_then_decrement_restores(input: WrapInput) {
        let mut v = UnsignedWide::from_u64_width(input.value, input.width);
        let before = v.clone();
        v.increment();
        v.decrement();
        assert_eq!(v, before);
    }
}

#[cfg(test)]
mod bitwise_proptests {
    use test_strategy::{proptest, Arbitrary};

    use super::super::UnsignedWide;

    #[derive(Debug, Arbitrary)]
    struct BinaryOperands {
        left: u64,
        right: u64,
    }

    #[derive(Debug, Arbitrary)]
    struct WrapInput {
        value: u64,
        #[strategy(1usize..=80)]
        width: usize,
    }

    #[derive(Debug, Arbitrary)]
    struct ShiftInput {
        value: u64,
        #[strategy(0usize..64)]
        amount: usize,
    }

    #[proptest]
    fn bitwise_operators_match_the_native_ones(input: BinaryOperands) {
        let a = UnsignedWide::from(input.left);
        let b = UnsignedWide::from(input.right);
        assert_eq!(&a & &b, input.left & input.right);
        assert_eq!(&a | &b, input.left | input.right);
        assert_eq!(&a ^ &b, input.left ^ input.right);
    }

    #[proptest]
    fn complement_pairs_with_the_maximum(input: WrapInput) {
        let v = UnsignedWide::from_u64_width(input.value, input.width);
        assert_eq!(!!&v, v);
        assert_eq!(!&v + &v, UnsignedWide::max_value(input.width));
    }

    #[proptest]
    fn right_shift_matches_the_native_one(input: ShiftInput) {
        let v = UnsignedWide::from(input.value);
        assert_eq!(&v >> input.amount, input.value >> input.amount);
    }

    #[proptest]
    fn shifting_left_then_right_restores(input: ShiftInput) {
        let v = UnsignedWide::from(input.value);
        assert_eq!((&v << input.amount) >> input.amount, v);
    }
}

#[cfg(test)]
mod codec_proptests {
    use test_strategy::{proptest, Arbitrary};

    use super::super::super::format::Base;
    use super::super::UnsignedWide;

    #[derive(Debug, Arbitrary)]
    struct CodecInput {
        value: u64,
        #[strategy(1usize..=72)]
        width: usize,
    }

    #[proptest]
    fn base_strings_round_trip_in_every_base(input: CodecInput) {
        let v = UnsignedWide::from_u64_width(input.value, input.width);
        for base in [Base::Bin, Base::Oct, Base::Dec, Base::Hex] {
            let text = v.to_base_string(base, true);
            let back = UnsignedWide::from_str_width(&text, input.width).unwrap();
            assert_eq!(back, v);
        }
    }

    #[proptest]
    fn display_matches_the_native_rendering(value: u64) {
        assert_eq!(UnsignedWide::from(value).to_string(), value.to_string());
    }
}
