//! The `widenum` crate models the integer registers of simulated
//! hardware: values with a caller-declared bit width that is fixed
//! for the lifetime of the value, at any width from one bit upward.
//! Wherever a result cannot be represented in the width that must
//! hold it, it wraps exactly the way the corresponding register
//! would, so a design modelled on these types misbehaves in the same
//! ways the real device does.

mod digitvec;

pub mod prelude;
pub mod twoscomplement;

pub use crate::twoscomplement::error::{ConversionFailed, DivisionByZero, ParseNumError};
pub use crate::twoscomplement::format::{Base, FormatOptions, Justify};
pub use crate::twoscomplement::signed::SignedWide;
pub use crate::twoscomplement::unsigned::UnsignedWide;
pub use crate::twoscomplement::{Sign, Signed, Signedness, Unsigned, Wide, WideCommon};

#[macro_export]
macro_rules! swide {
    ($w:expr; $v:expr) => {
        $crate::SignedWide::from_i64_width($v, $w)
    };
}

#[macro_export]
macro_rules! uwide {
    ($w:expr; $v:expr) => {
        $crate::UnsignedWide::from_u64_width($v, $w)
    };
}

#[test]
fn test_swide() {
    use prelude::SignedWide;
    let m: SignedWide = swide!(8; -5);
    let n: SignedWide = SignedWide::from_i64_width(-5, 8);
    assert_eq!(m, n);
    assert_eq!(m.width(), 8);
}

#[test]
fn test_uwide() {
    use prelude::UnsignedWide;
    let p: UnsignedWide = uwide!(12; 0o7777);
    let q: UnsignedWide = UnsignedWide::from_u64_width(0o7777, 12);
    assert_eq!(p, q);
    assert_eq!(p, 0o7777u64);
}
