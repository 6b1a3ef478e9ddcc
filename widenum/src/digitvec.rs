//! Primitive operations on little-endian vectors of 32-bit digits.
//!
//! Everything here works on plain digit slices: no sign flag, no
//! declared width, no allocation.  The value layer in
//! [`crate::twoscomplement`] owns the buffers, decides how many digits
//! they hold, and interprets the results; the functions in this module
//! only run the carry chains, shifts and masks.

use std::cmp::Ordering;

pub(crate) type Digit = u32;

/// Number of value bits in one digit.
pub(crate) const DIGIT_BITS: usize = 32;

/// Number of digits needed to hold `bits` bits.
pub(crate) const fn digits_for(bits: usize) -> usize {
    (bits + DIGIT_BITS - 1) / DIGIT_BITS
}

pub(crate) fn is_zero(v: &[Digit]) -> bool {
    v.iter().all(|d| *d == 0)
}

/// Length of `v` with the most significant zero digits skipped.
pub(crate) fn nonzero_len(v: &[Digit]) -> usize {
    v.iter().rposition(|d| *d != 0).map_or(0, |i| i + 1)
}

/// Magnitude comparison.  The shorter operand is implicitly
/// zero-extended, so slices of different lengths compare by value.
pub(crate) fn compare(a: &[Digit], b: &[Digit]) -> Ordering {
    let la = nonzero_len(a);
    let lb = nonzero_len(b);
    if la != lb {
        return la.cmp(&lb);
    }
    for i in (0..la).rev() {
        if a[i] != b[i] {
            return a[i].cmp(&b[i]);
        }
    }
    Ordering::Equal
}

/// In-place `a += b`, rippling the carry through the rest of `a`.
/// Requires `a.len() >= b.len()`.  A carry out of the top digit is
/// returned rather than stored.
pub(crate) fn add_into(a: &mut [Digit], b: &[Digit]) -> Digit {
    debug_assert!(a.len() >= b.len());
    let mut carry: u64 = 0;
    for (i, bd) in b.iter().enumerate() {
        let sum = a[i] as u64 + *bd as u64 + carry;
        a[i] = sum as Digit;
        carry = sum >> DIGIT_BITS;
    }
    let mut i = b.len();
    while carry != 0 && i < a.len() {
        let sum = a[i] as u64 + carry;
        a[i] = sum as Digit;
        carry = sum >> DIGIT_BITS;
        i += 1;
    }
    carry as Digit
}

/// In-place `a -= b`.  The caller guarantees `a >= b` numerically; a
/// nonzero return means the borrow ran off the top and that guarantee
/// was broken.
pub(crate) fn sub_into(a: &mut [Digit], b: &[Digit]) -> Digit {
    debug_assert!(b.len() <= a.len() || is_zero(&b[a.len()..]));
    let mut borrow = false;
    for i in 0..a.len() {
        let bd = if i < b.len() { b[i] } else { 0 };
        let (d, b1) = a[i].overflowing_sub(bd);
        let (d, b2) = d.overflowing_sub(borrow as Digit);
        a[i] = d;
        borrow = b1 || b2;
        if i >= b.len() && !borrow {
            break;
        }
    }
    borrow as Digit
}

pub(crate) fn add_small_into(a: &mut [Digit], k: Digit) -> Digit {
    let mut carry = k as u64;
    for d in a.iter_mut() {
        if carry == 0 {
            return 0;
        }
        let sum = *d as u64 + carry;
        *d = sum as Digit;
        carry = sum >> DIGIT_BITS;
    }
    carry as Digit
}

/// In-place `a -= k` for a single-digit `k <= a`.
pub(crate) fn sub_small_into(a: &mut [Digit], k: Digit) -> Digit {
    let mut borrow = k;
    for d in a.iter_mut() {
        if borrow == 0 {
            return 0;
        }
        let (nd, b) = d.overflowing_sub(borrow);
        *d = nd;
        borrow = b as Digit;
    }
    borrow
}

/// In-place `a *= k`.  A carry out of the top digit is returned; when
/// the buffer is sized for a declared width, dropping that carry is
/// exactly the wrap the width calls for.
pub(crate) fn mul_small_into(a: &mut [Digit], k: Digit) -> Digit {
    let mut carry: u64 = 0;
    for d in a.iter_mut() {
        let p = *d as u64 * k as u64 + carry;
        *d = p as Digit;
        carry = p >> DIGIT_BITS;
    }
    carry as Digit
}

/// In-place `a /= k`, returning the remainder.  `k` must be nonzero.
pub(crate) fn div_small_into(a: &mut [Digit], k: Digit) -> Digit {
    debug_assert!(k != 0);
    let mut rem: u64 = 0;
    for d in a.iter_mut().rev() {
        let cur = (rem << DIGIT_BITS) | *d as u64;
        *d = (cur / k as u64) as Digit;
        rem = cur % k as u64;
    }
    rem as Digit
}

/// Schoolbook multiply of magnitudes into `out`, which must hold at
/// least `a.len() + b.len()` digits and is cleared first.
pub(crate) fn mul(a: &[Digit], b: &[Digit], out: &mut [Digit]) {
    debug_assert!(out.len() >= a.len() + b.len());
    out.fill(0);
    for (i, ad) in a.iter().enumerate() {
        if *ad == 0 {
            continue;
        }
        let mut carry: u64 = 0;
        for (j, bd) in b.iter().enumerate() {
            let cur = out[i + j] as u64 + *ad as u64 * *bd as u64 + carry;
            out[i + j] = cur as Digit;
            carry = cur >> DIGIT_BITS;
        }
        let mut idx = i + b.len();
        while carry != 0 {
            let cur = out[idx] as u64 + carry;
            out[idx] = cur as Digit;
            carry = cur >> DIGIT_BITS;
            idx += 1;
        }
    }
}

/// Restoring long division of magnitudes: `q = a / b`, `r = a % b`.
/// `b` must be nonzero and `q` and `r` must each hold `a.len()`
/// digits.  Works one bit at a time from the top of `a`, shifting the
/// partial remainder up and subtracting `b` back out wherever it fits.
pub(crate) fn div_rem(a: &[Digit], b: &[Digit], q: &mut [Digit], r: &mut [Digit]) {
    debug_assert!(!is_zero(b));
    debug_assert!(q.len() >= a.len() && r.len() >= a.len());
    q.fill(0);
    r.fill(0);
    let bits = nonzero_len(a) * DIGIT_BITS;
    for i in (0..bits).rev() {
        shift_left(r, 1);
        if test_bit(a, i) {
            r[0] |= 1;
        }
        if compare(r, b) != Ordering::Less {
            sub_into(r, b);
            set_bit(q, i);
        }
    }
}

/// Shift `v` toward the most significant end by `n` bits, dropping
/// bits shifted out of the top.  Whole-digit moves first, then a
/// single sub-digit pass.
pub(crate) fn shift_left(v: &mut [Digit], n: usize) {
    if n == 0 || v.is_empty() {
        return;
    }
    let nd = n / DIGIT_BITS;
    let nb = n % DIGIT_BITS;
    if nd >= v.len() {
        v.fill(0);
        return;
    }
    if nd > 0 {
        for i in (nd..v.len()).rev() {
            v[i] = v[i - nd];
        }
        v[..nd].fill(0);
    }
    if nb > 0 {
        let mut carry = 0;
        for d in v.iter_mut() {
            let out = *d >> (DIGIT_BITS - nb);
            *d = (*d << nb) | carry;
            carry = out;
        }
    }
}

/// Shift `v` toward the least significant end by `n` bits.  `fill`
/// gives the bit value shifted in at the top; the value layer passes
/// the sign bit of the two's-complement image.
pub(crate) fn shift_right(v: &mut [Digit], n: usize, fill: bool) {
    if n == 0 || v.is_empty() {
        return;
    }
    let filler: Digit = if fill { Digit::MAX } else { 0 };
    let nd = n / DIGIT_BITS;
    let nb = n % DIGIT_BITS;
    if nd >= v.len() {
        v.fill(filler);
        return;
    }
    if nd > 0 {
        let len = v.len();
        for i in 0..len - nd {
            v[i] = v[i + nd];
        }
        v[len - nd..].fill(filler);
    }
    if nb > 0 {
        for i in 0..v.len() {
            let high = if i + 1 < v.len() {
                v[i + 1] << (DIGIT_BITS - nb)
            } else {
                filler << (DIGIT_BITS - nb)
            };
            v[i] = (v[i] >> nb) | high;
        }
    }
}

/// Digit-wise AND; the shorter operand is zero-extended.
pub(crate) fn and_into(a: &mut [Digit], b: &[Digit]) {
    for (i, d) in a.iter_mut().enumerate() {
        *d &= b.get(i).copied().unwrap_or(0);
    }
}

/// Digit-wise OR; the shorter operand is zero-extended.
pub(crate) fn or_into(a: &mut [Digit], b: &[Digit]) {
    for (i, d) in a.iter_mut().enumerate() {
        *d |= b.get(i).copied().unwrap_or(0);
    }
}

/// Digit-wise XOR; the shorter operand is zero-extended.
pub(crate) fn xor_into(a: &mut [Digit], b: &[Digit]) {
    for (i, d) in a.iter_mut().enumerate() {
        *d ^= b.get(i).copied().unwrap_or(0);
    }
}

/// Complement every digit in place.
pub(crate) fn not_into(v: &mut [Digit]) {
    for d in v.iter_mut() {
        *d = !*d;
    }
}

/// Two's-complement negate: complement every digit, then add one.
pub(crate) fn negate_into(v: &mut [Digit]) {
    not_into(v);
    add_small_into(v, 1);
}

/// Clear every bit of `v` at or above bit position `bits`.
pub(crate) fn mask_top(v: &mut [Digit], bits: usize) {
    let nd = digits_for(bits);
    if nd > v.len() {
        return;
    }
    v[nd..].fill(0);
    let r = bits % DIGIT_BITS;
    if r != 0 {
        v[nd - 1] &= (1 << r) - 1;
    }
}

/// Bit `i` of `v`, reading positions beyond the buffer as zero.
pub(crate) fn test_bit(v: &[Digit], i: usize) -> bool {
    v.get(i / DIGIT_BITS)
        .map_or(false, |d| (d >> (i % DIGIT_BITS)) & 1 == 1)
}

pub(crate) fn set_bit(v: &mut [Digit], i: usize) {
    v[i / DIGIT_BITS] |= 1 << (i % DIGIT_BITS);
}

pub(crate) fn clear_bit(v: &mut [Digit], i: usize) {
    v[i / DIGIT_BITS] &= !(1 << (i % DIGIT_BITS));
}

pub(crate) fn assign_bit(v: &mut [Digit], i: usize, value: bool) {
    if value {
        set_bit(v, i);
    } else {
        clear_bit(v, i);
    }
}

/// Bit `i` of the two's-complement image of the magnitude `v`, without
/// materializing the image.  Below the lowest set digit the image is
/// zero, the lowest nonzero digit becomes its wrapping negation, every
/// digit above that is complemented, and past the end of the buffer
/// the image of a nonzero magnitude continues as all ones.
pub(crate) fn twos_bit(v: &[Digit], i: usize) -> bool {
    let lowest = match v.iter().position(|d| *d != 0) {
        None => return false,
        Some(k) => k,
    };
    let di = i / DIGIT_BITS;
    let digit = if di < lowest {
        0
    } else if di == lowest {
        v[di].wrapping_neg()
    } else {
        !v.get(di).copied().unwrap_or(0)
    };
    (digit >> (i % DIGIT_BITS)) & 1 == 1
}

/// Mirror the low `width` bits of `v` in place.
pub(crate) fn reverse_bits(v: &mut [Digit], width: usize) {
    if width < 2 {
        return;
    }
    let (mut i, mut j) = (0, width - 1);
    while i < j {
        let (bi, bj) = (test_bit(v, i), test_bit(v, j));
        assign_bit(v, i, bj);
        assign_bit(v, j, bi);
        i += 1;
        j -= 1;
    }
}

#[cfg(test)]
mod tests;
