//! Errors for native-type conversion, text parsing and division.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use super::format::Base;

/// Returned when a value does not fit the requested native type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConversionFailed {
    TooLarge,
    TooSmall,
}

impl Display for ConversionFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConversionFailed::TooLarge => f.write_str("value is too large for the target type"),
            ConversionFailed::TooSmall => f.write_str("value is too small for the target type"),
        }
    }
}

impl Error for ConversionFailed {}

/// Returned when text cannot be read as a number.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseNumError {
    /// There was no input at all.
    Empty,
    /// A sign or base tag with no digits after it.
    MissingDigits,
    /// A character that is not a digit of the base being read.
    InvalidDigit { ch: char, base: Base },
    /// The input's base tag names a different base than the context
    /// the number is being read in.
    BaseConflict { tagged: Base, ambient: Base },
}

impl Display for ParseNumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseNumError::Empty => f.write_str("empty input"),
            ParseNumError::MissingDigits => f.write_str("no digits after the sign or base tag"),
            ParseNumError::InvalidDigit { ch, base } => {
                write!(f, "{:?} is not a valid {} digit", ch, base)
            }
            ParseNumError::BaseConflict { tagged, ambient } => {
                write!(f, "input tagged as {} but read in a {} context", tagged, ambient)
            }
        }
    }
}

impl Error for ParseNumError {}

/// Returned by checked division when the divisor is zero.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DivisionByZero {
    /// Whether the dividend was zero as well.
    pub zero_dividend: bool,
}

impl Display for DivisionByZero {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.zero_dividend {
            f.write_str("division of zero by zero")
        } else {
            f.write_str("division by zero")
        }
    }
}

impl Error for DivisionByZero {}
