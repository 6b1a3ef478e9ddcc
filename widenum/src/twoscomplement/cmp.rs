//! Equality and ordering.
//!
//! `==` and `<` are the primitives: sign rank first, then magnitude,
//! with the magnitude order flipped when both values are negative.
//! Every other comparison derives from those two through the standard
//! traits.  Values compare as mathematical integers; the declared
//! width never participates, so a 4-bit five equals a 64-bit five,
//! across variants and against native integers alike.

use std::cmp::Ordering;

use super::arith::{native_parts_i64, native_parts_u64};
use super::{Sign, Signedness, Wide};
use crate::digitvec::{self, Digit};

pub(crate) fn cmp_parts(ls: Sign, ld: &[Digit], rs: Sign, rd: &[Digit]) -> Ordering {
    let rank = (ls as i8).cmp(&(rs as i8));
    if rank != Ordering::Equal {
        return rank;
    }
    match ls {
        Sign::Zero => Ordering::Equal,
        Sign::Positive => digitvec::compare(ld, rd),
        Sign::Negative => digitvec::compare(rd, ld),
    }
}

impl<V: Signedness, W: Signedness> PartialEq<Wide<W>> for Wide<V> {
    fn eq(&self, other: &Wide<W>) -> bool {
        cmp_parts(self.sign, &self.digits, other.sign, &other.digits) == Ordering::Equal
    }
}

impl<V: Signedness> Eq for Wide<V> {}

impl<V: Signedness, W: Signedness> PartialOrd<Wide<W>> for Wide<V> {
    fn partial_cmp(&self, other: &Wide<W>) -> Option<Ordering> {
        Some(cmp_parts(self.sign, &self.digits, other.sign, &other.digits))
    }
}

impl<V: Signedness> Ord for Wide<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_parts(self.sign, &self.digits, other.sign, &other.digits)
    }
}

impl<V: Signedness> PartialEq<i64> for Wide<V> {
    fn eq(&self, other: &i64) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl<V: Signedness> PartialOrd<i64> for Wide<V> {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        let (s, d) = native_parts_i64(*other);
        Some(cmp_parts(self.sign, &self.digits, s, &d))
    }
}

impl<V: Signedness> PartialEq<u64> for Wide<V> {
    fn eq(&self, other: &u64) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl<V: Signedness> PartialOrd<u64> for Wide<V> {
    fn partial_cmp(&self, other: &u64) -> Option<Ordering> {
        let (s, d) = native_parts_u64(*other);
        Some(cmp_parts(self.sign, &self.digits, s, &d))
    }
}

impl<V: Signedness> PartialEq<Wide<V>> for i64 {
    fn eq(&self, other: &Wide<V>) -> bool {
        other == self
    }
}

impl<V: Signedness> PartialOrd<Wide<V>> for i64 {
    fn partial_cmp(&self, other: &Wide<V>) -> Option<Ordering> {
        other.partial_cmp(self).map(Ordering::reverse)
    }
}

impl<V: Signedness> PartialEq<Wide<V>> for u64 {
    fn eq(&self, other: &Wide<V>) -> bool {
        other == self
    }
}

impl<V: Signedness> PartialOrd<Wide<V>> for u64 {
    fn partial_cmp(&self, other: &Wide<V>) -> Option<Ordering> {
        other.partial_cmp(self).map(Ordering::reverse)
    }
}
