use super::*;

/// Spread a u128 over four little-endian digits.
fn digits(n: u128) -> Vec<Digit> {
    vec![n as Digit, (n >> 32) as Digit, (n >> 64) as Digit, (n >> 96) as Digit]
}

/// Reassemble up to four little-endian digits into a u128.
fn value(v: &[Digit]) -> u128 {
    assert!(v.len() <= 4);
    v.iter().rev().fold(0u128, |acc, d| (acc << 32) | *d as u128)
}

#[test]
fn test_digits_for() {
    assert_eq!(digits_for(0), 0);
    assert_eq!(digits_for(1), 1);
    assert_eq!(digits_for(32), 1);
    assert_eq!(digits_for(33), 2);
    assert_eq!(digits_for(64), 2);
    assert_eq!(digits_for(65), 3);
}

#[test]
fn test_nonzero_len_skips_leading_zero_digits() {
    assert_eq!(nonzero_len(&[]), 0);
    assert_eq!(nonzero_len(&[0, 0, 0]), 0);
    assert_eq!(nonzero_len(&[7, 0, 0]), 1);
    assert_eq!(nonzero_len(&[0, 0, 1]), 3);
}

#[test]
fn test_compare_ignores_length_differences() {
    assert_eq!(compare(&[5], &[5, 0, 0]), Ordering::Equal);
    assert_eq!(compare(&[5], &[6, 0]), Ordering::Less);
    assert_eq!(compare(&[0, 1], &[Digit::MAX]), Ordering::Greater);
    assert_eq!(compare(&[1, 2], &[2, 2]), Ordering::Less);
    assert_eq!(compare(&[], &[0]), Ordering::Equal);
}

#[test]
fn test_add_into_ripples_carry() {
    let mut a = vec![Digit::MAX, Digit::MAX, 0];
    assert_eq!(add_into(&mut a, &[1]), 0);
    assert_eq!(a, vec![0, 0, 1]);
}

#[test]
fn test_add_into_reports_carry_out() {
    let mut a = vec![Digit::MAX];
    assert_eq!(add_into(&mut a, &[1]), 1);
    assert_eq!(a, vec![0]);
}

#[test]
fn test_sub_into_borrows_across_digits() {
    let mut a = vec![0, 0, 1];
    assert_eq!(sub_into(&mut a, &[1]), 0);
    assert_eq!(a, vec![Digit::MAX, Digit::MAX, 0]);
}

#[test]
fn test_small_scalar_ops() {
    let mut a = vec![Digit::MAX - 1, 0];
    add_small_into(&mut a, 3);
    assert_eq!(a, vec![1, 1]);
    sub_small_into(&mut a, 2);
    assert_eq!(a, vec![Digit::MAX, 0]);

    let mut b = digits(1_000_000_007);
    assert_eq!(mul_small_into(&mut b, 10), 0);
    assert_eq!(div_small_into(&mut b, 10), 0);
    assert_eq!(value(&b), 1_000_000_007);
    assert_eq!(div_small_into(&mut b, 16), 7);
}

#[test]
fn test_mul_small_returns_dropped_carry() {
    let mut a = vec![0x8000_0000];
    assert_eq!(mul_small_into(&mut a, 2), 1);
    assert_eq!(a, vec![0]);
}

#[test]
fn test_mul_schoolbook() {
    // (2^32 - 1)^2 = 0xFFFF_FFFE_0000_0001
    let mut out = vec![0; 2];
    mul(&[Digit::MAX], &[Digit::MAX], &mut out);
    assert_eq!(out, vec![1, 0xFFFF_FFFE]);

    let a = digits(0x0123_4567_89AB_CDEF);
    let b = digits(0xFEDC_BA98);
    let mut out = vec![0; 8];
    mul(&a[..2], &b[..1], &mut out);
    assert_eq!(value(&out[..4]), 0x0123_4567_89AB_CDEF * 0xFEDC_BA98);
}

#[test]
fn test_div_rem_long_division() {
    let a = digits(0x1234_5678_9ABC_DEF0_1122_3344u128);
    let b = digits(0xFFF1_2345);
    let mut q = vec![0; a.len()];
    let mut r = vec![0; a.len()];
    div_rem(&a, &b, &mut q, &mut r);
    assert_eq!(value(&q), 0x1234_5678_9ABC_DEF0_1122_3344u128 / 0xFFF1_2345);
    assert_eq!(value(&r), 0x1234_5678_9ABC_DEF0_1122_3344u128 % 0xFFF1_2345);
}

#[test]
fn test_shift_left_across_digit_boundaries() {
    for n in [0, 1, 31, 32, 33, 63, 64, 95] {
        let mut v = digits(0x0123_4567_89AB_CDEF);
        shift_left(&mut v, n);
        assert_eq!(value(&v), 0x0123_4567_89AB_CDEFu128 << n, "shift by {}", n);
    }
    let mut v = digits(1);
    shift_left(&mut v, 128);
    assert!(is_zero(&v));
}

#[test]
fn test_shift_right_zero_fill() {
    for n in [0, 1, 31, 32, 33, 63, 64, 127] {
        let mut v = digits(0xF123_4567_89AB_CDEF_0011_2233_4455_6677);
        shift_right(&mut v, n, false);
        assert_eq!(
            value(&v),
            0xF123_4567_89AB_CDEF_0011_2233_4455_6677u128 >> n,
            "shift by {}",
            n
        );
    }
}

#[test]
fn test_shift_right_one_fill() {
    let mut v = digits(0x8000_0000_0000_0000_0000_0000_0000_0000);
    shift_right(&mut v, 33, true);
    let expected = (0x8000_0000_0000_0000_0000_0000_0000_0000u128 >> 33)
        | (u128::MAX << (128 - 33));
    assert_eq!(value(&v), expected);

    let mut v = digits(0);
    shift_right(&mut v, 200, true);
    assert_eq!(v, vec![Digit::MAX; 4]);
}

#[test]
fn test_mask_top_clears_high_bits() {
    let mut v = vec![Digit::MAX; 3];
    mask_top(&mut v, 37);
    assert_eq!(v, vec![Digit::MAX, 0x1F, 0]);
    mask_top(&mut v, 0);
    assert!(is_zero(&v));
    // A mask wider than the buffer leaves it alone.
    let mut v = vec![Digit::MAX];
    mask_top(&mut v, 200);
    assert_eq!(v, vec![Digit::MAX]);
}

#[test]
fn test_negate_into_is_twos_complement() {
    let mut v = digits(5);
    negate_into(&mut v);
    assert_eq!(value(&v), 5u128.wrapping_neg());
    negate_into(&mut v);
    assert_eq!(value(&v), 5);
}

#[test]
fn test_bit_accessors() {
    let mut v = vec![0; 2];
    set_bit(&mut v, 0);
    set_bit(&mut v, 33);
    assert!(test_bit(&v, 0));
    assert!(test_bit(&v, 33));
    assert!(!test_bit(&v, 32));
    assert!(!test_bit(&v, 1000));
    clear_bit(&mut v, 33);
    assert_eq!(v, vec![1, 0]);
    assign_bit(&mut v, 5, true);
    assert_eq!(v, vec![0b100001, 0]);
}

#[test]
fn test_twos_bit_matches_materialized_negation() {
    for m in [1u128, 5, 0x1_0000_0000, 0xFFFF_FFFF, 0xDEAD_BEEF_0000_0000] {
        let v = digits(m);
        let mut image = digits(m);
        negate_into(&mut image);
        for i in 0..128 {
            assert_eq!(twos_bit(&v, i), test_bit(&image, i), "value {:#x} bit {}", m, i);
        }
        // Beyond the buffer a nonzero magnitude keeps its sign bits.
        assert!(twos_bit(&v, 1000));
    }
    assert!(!twos_bit(&[0, 0], 7));
}

#[test]
fn test_reverse_bits() {
    let mut v = vec![0b1011];
    reverse_bits(&mut v, 4);
    assert_eq!(v, vec![0b1101]);
    // A mirror over 40 bits crosses the digit boundary.
    let mut v = vec![0b1, 0];
    reverse_bits(&mut v, 40);
    assert_eq!(v, vec![0, 0x80]);
    reverse_bits(&mut v, 40);
    assert_eq!(v, vec![1, 0]);
}

mod kernel_proptests {
    use super::*;
    use test_strategy::{proptest, Arbitrary};

    #[derive(Debug, Arbitrary)]
    struct TwoMagnitudes {
        #[strategy(0..=u128::MAX >> 1)]
        left: u128,
        #[strategy(0..=u128::MAX >> 1)]
        right: u128,
    }

    #[proptest]
    fn addition_matches_u128(input: TwoMagnitudes) {
        let mut a = digits(input.left);
        add_into(&mut a, &digits(input.right));
        assert_eq!(value(&a), input.left + input.right);
    }

    #[proptest]
    fn subtraction_matches_u128(input: TwoMagnitudes) {
        let (hi, lo) = if input.left >= input.right {
            (input.left, input.right)
        } else {
            (input.right, input.left)
        };
        let mut a = digits(hi);
        assert_eq!(sub_into(&mut a, &digits(lo)), 0);
        assert_eq!(value(&a), hi - lo);
    }

    #[proptest]
    fn multiplication_matches_u128(
        #[strategy(0..=u64::MAX as u128)] a: u128,
        #[strategy(0..=u64::MAX as u128)] b: u128,
    ) {
        let mut out = vec![0; 8];
        mul(&digits(a)[..2], &digits(b)[..2], &mut out);
        assert_eq!(value(&out[..4]), a * b);
        assert!(is_zero(&out[4..]));
    }

    #[proptest]
    fn division_matches_u128(
        #[strategy(0..=u128::MAX >> 1)] a: u128,
        #[strategy(1..=u128::MAX >> 1)] b: u128,
    ) {
        let (av, bv) = (digits(a), digits(b));
        let mut q = vec![0; av.len()];
        let mut r = vec![0; av.len()];
        div_rem(&av, &bv, &mut q, &mut r);
        assert_eq!(value(&q), a / b);
        assert_eq!(value(&r), a % b);
    }

    #[proptest]
    fn shifts_match_u128(#[strategy(0..=u128::MAX)] a: u128, #[strategy(0..140usize)] n: usize) {
        let mut left = digits(a);
        shift_left(&mut left, n);
        let expected = if n >= 128 { 0 } else { a << n };
        assert_eq!(value(&left), expected);

        let mut right = digits(a);
        shift_right(&mut right, n, false);
        let expected = if n >= 128 { 0 } else { a >> n };
        assert_eq!(value(&right), expected);
    }
}
