//! Textual input: the tag-and-sign scanner, `FromStr`, width-bounded
//! parsing and line-oriented reading.
//!
//! A token is one optional sign, one optional base tag (`0b`, `0o`,
//! `0d`, `0x`, either case, sign allowed on either side of it) and a
//! run of digits.  Without a tag the ambient base applies, and absent
//! both the token reads as decimal.  Digits accumulate into the
//! magnitude one at a time through the kernel's small-scalar multiply
//! and add.

use std::io::{self, BufRead};
use std::str::FromStr;

use super::error::ParseNumError;
use super::format::Base;
use super::{Sign, Signedness, Wide};
use crate::digitvec::{self, Digit};

fn scan(s: &str, ambient: Option<Base>) -> Result<(Sign, Base, &str), ParseNumError> {
    let mut rest = s.trim();
    if rest.is_empty() {
        return Err(ParseNumError::Empty);
    }
    let mut negative = None;
    if let Some(r) = rest.strip_prefix('-') {
        negative = Some(true);
        rest = r;
    } else if let Some(r) = rest.strip_prefix('+') {
        negative = Some(false);
        rest = r;
    }
    let bytes = rest.as_bytes();
    let mut tagged = None;
    if bytes.len() >= 2 && bytes[0] == b'0' {
        tagged = match bytes[1] {
            b'b' | b'B' => Some(Base::Bin),
            b'o' | b'O' => Some(Base::Oct),
            b'd' | b'D' => Some(Base::Dec),
            b'x' | b'X' => Some(Base::Hex),
            _ => None,
        };
        if tagged.is_some() {
            rest = &rest[2..];
        }
    }
    if tagged.is_some() && negative.is_none() {
        if let Some(r) = rest.strip_prefix('-') {
            negative = Some(true);
            rest = r;
        } else if let Some(r) = rest.strip_prefix('+') {
            negative = Some(false);
            rest = r;
        }
    }
    let base = match (tagged, ambient) {
        (Some(tagged), Some(ambient)) if tagged != ambient => {
            return Err(ParseNumError::BaseConflict { tagged, ambient });
        }
        (Some(tagged), _) => tagged,
        (None, Some(ambient)) => ambient,
        (None, None) => Base::Dec,
    };
    if rest.is_empty() {
        return Err(ParseNumError::MissingDigits);
    }
    let sign = if negative == Some(true) {
        Sign::Negative
    } else {
        Sign::Positive
    };
    Ok((sign, base, rest))
}

fn accumulate(digits: &str, base: Base) -> Result<Vec<Digit>, ParseNumError> {
    let radix = base.radix();
    let mut mag: Vec<Digit> = vec![0];
    for ch in digits.chars() {
        let d = ch
            .to_digit(radix)
            .ok_or(ParseNumError::InvalidDigit { ch, base })?;
        let carry = digitvec::mul_small_into(&mut mag, radix);
        if carry != 0 {
            mag.push(carry);
        }
        let carry = digitvec::add_small_into(&mut mag, d);
        if carry != 0 {
            mag.push(carry);
        }
    }
    Ok(mag)
}

/// Scan plus accumulate: sign, magnitude and the conservative width
/// estimate from the digit count (one binary digit is one bit; octal
/// digits carry three bits, decimal and hexadecimal four; one more
/// bit leaves room for the sign).
fn parse_parts(s: &str, ambient: Option<Base>) -> Result<(Sign, Vec<Digit>, usize), ParseNumError> {
    let (sign, base, digits) = scan(s, ambient)?;
    let n = digits.chars().count();
    let mag = accumulate(digits, base)?;
    let width = match base {
        Base::Bin => n + 1,
        Base::Oct => 3 * n + 1,
        Base::Dec | Base::Hex => 4 * n + 1,
    };
    Ok((sign, mag, width))
}

impl<V: Signedness> FromStr for Wide<V> {
    type Err = ParseNumError;

    /// Parse with the width inferred from the digit count.  An
    /// all-zero input shrinks to the canonical one-bit zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (sign, mag, width) = parse_parts(s, None)?;
        if digitvec::is_zero(&mag) {
            return Ok(Wide::new(1));
        }
        Ok(Wide::from_parts(sign, width, mag))
    }
}

impl<V: Signedness> Wide<V> {
    /// Parse into an explicit declared width.  The accumulated value
    /// wraps at that width like an assignment into a register, so
    /// formatted output round-trips through a same-width parse.
    pub fn from_str_width(s: &str, width: usize) -> Result<Self, ParseNumError> {
        let (sign, mag, _) = parse_parts(s, None)?;
        Ok(Wide::from_parts(sign, width, mag))
    }

    /// Parse into this value, keeping its declared width.  On error
    /// the value is left unchanged.
    pub fn assign_str(&mut self, s: &str) -> Result<(), ParseNumError> {
        *self = Self::from_str_width(s, self.width)?;
        Ok(())
    }

    /// Read one newline-terminated token under an optional ambient
    /// base, keeping the declared width.  Parse failures map to
    /// [`io::ErrorKind::InvalidData`]; the value is unchanged on any
    /// error.
    pub fn read_text<R: BufRead>(
        &mut self,
        reader: &mut R,
        ambient: Option<Base>,
    ) -> io::Result<()> {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        let (sign, mag, _) = parse_parts(line.trim(), ambient)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        *self = Wide::from_parts(sign, self.width, mag);
        Ok(())
    }
}
