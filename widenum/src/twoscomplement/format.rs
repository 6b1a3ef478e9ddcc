//! Textual output: the width-driven `to_base_string` image dump, the
//! standard formatting traits and the stream-style `FormatOptions`
//! rendering.
//!
//! `to_base_string` prints the two's-complement image and sizes its
//! field from the declared width alone, so every value of one width
//! prints with the same digit count.  `Display` and `format_with`
//! print sign plus magnitude instead.

use std::fmt;
use std::io::{self, Write};

use super::{Sign, Signedness, Wide};
use crate::digitvec::{self, Digit};

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

fn digit_char(d: Digit, uppercase: bool) -> char {
    let c = DIGITS[d as usize] as char;
    if uppercase {
        c
    } else {
        c.to_ascii_lowercase()
    }
}

/// Numeral base of a textual rendering or parse.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Base {
    Bin,
    Oct,
    Dec,
    Hex,
}

impl Base {
    pub(crate) fn radix(self) -> Digit {
        match self {
            Base::Bin => 2,
            Base::Oct => 8,
            Base::Dec => 10,
            Base::Hex => 16,
        }
    }

    pub(crate) fn tag(self) -> &'static str {
        match self {
            Base::Bin => "0b",
            Base::Oct => "0o",
            Base::Dec => "0d",
            Base::Hex => "0x",
        }
    }

    /// Digit count and bit count of the output field for a value of
    /// the given declared width.  Octal and decimal fields carry three
    /// bits per digit, hexadecimal four.
    pub(crate) fn field_for(self, width: usize) -> (usize, usize) {
        match self {
            Base::Bin => (width, width),
            Base::Oct | Base::Dec => {
                let nd = (width + 2) / 3;
                (nd, 3 * nd)
            }
            Base::Hex => {
                let nd = (width + 3) / 4;
                (nd, 4 * nd)
            }
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Base::Bin => "binary",
            Base::Oct => "octal",
            Base::Dec => "decimal",
            Base::Hex => "hexadecimal",
        })
    }
}

/// Placement of the fill characters within a padded field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Justify {
    Left,
    Right,
    /// Fill goes between the sign and the base prefix.
    Internal,
}

/// Explicit rendering configuration for [`Wide::format_with`] and
/// [`Wide::write_text`], standing in for ambient stream state.
#[derive(Clone, Debug)]
pub struct FormatOptions {
    pub base: Base,
    /// Minimum total field width in characters; shorter renderings
    /// are padded with `fill`.
    pub width: usize,
    pub fill: char,
    pub justify: Justify,
    /// Print `+` in front of non-negative values.
    pub show_sign: bool,
    /// Print the base prefix: `0b`, `0` (octal, omitted for zero) or
    /// `0x`; decimal has none.
    pub show_base: bool,
    /// Uppercase hexadecimal digits and prefix.
    pub uppercase: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            base: Base::Dec,
            width: 0,
            fill: ' ',
            justify: Justify::Right,
            show_sign: false,
            show_base: false,
            uppercase: false,
        }
    }
}

impl<V: Signedness> Wide<V> {
    /// Magnitude in the given base, no padding, `"0"` for zero.
    fn mag_string(&self, base: Base, uppercase: bool) -> String {
        let mut digits = self.mag_digits().to_vec();
        let mut idx: Vec<Digit> = Vec::new();
        while !digitvec::is_zero(&digits) {
            idx.push(digitvec::div_small_into(&mut digits, base.radix()));
        }
        if idx.is_empty() {
            idx.push(0);
        }
        let mut s = String::with_capacity(idx.len());
        for &d in idx.iter().rev() {
            s.push(digit_char(d, uppercase));
        }
        s
    }

    /// Two's-complement image digits over the base's output field,
    /// zero-padded to the field's digit count.
    fn image_digits(&self, base: Base, uppercase: bool) -> String {
        let (nd, nb) = base.field_for(self.width);
        let mut image = self.twos_image(nb);
        let mut idx: Vec<Digit> = Vec::with_capacity(nd);
        while !digitvec::is_zero(&image) {
            idx.push(digitvec::div_small_into(&mut image, base.radix()));
        }
        idx.resize(nd, 0);
        let mut s = String::with_capacity(nd);
        for &d in idx.iter().rev() {
            s.push(digit_char(d, uppercase));
        }
        s
    }

    /// Render the two's-complement image in the given base.  The
    /// digit count depends only on the declared width, never on the
    /// value, so a negative value prints as its wrapped bit pattern
    /// (`-1` at width 8 prints as `"0d511"` in decimal: nine bits of
    /// ones over three octal-sized digits).  `formatted` prepends the
    /// base tag.
    pub fn to_base_string(&self, base: Base, formatted: bool) -> String {
        let digits = self.image_digits(base, true);
        if formatted {
            let mut s = String::with_capacity(digits.len() + 2);
            s.push_str(base.tag());
            s.push_str(&digits);
            s
        } else {
            digits
        }
    }

    /// Render sign plus magnitude under the explicit options record.
    pub fn format_with(&self, options: &FormatOptions) -> String {
        let digits = self.mag_string(options.base, options.uppercase);
        let sign = if self.sign == Sign::Negative {
            "-"
        } else if options.show_sign {
            "+"
        } else {
            ""
        };
        let prefix = if options.show_base {
            match options.base {
                Base::Dec => "",
                Base::Bin => "0b",
                Base::Oct => {
                    if self.sign == Sign::Zero {
                        ""
                    } else {
                        "0"
                    }
                }
                Base::Hex => {
                    if options.uppercase {
                        "0X"
                    } else {
                        "0x"
                    }
                }
            }
        } else {
            ""
        };
        let body = sign.len() + prefix.len() + digits.len();
        let pad = options.width.saturating_sub(body);
        let mut s = String::with_capacity(body + pad);
        match options.justify {
            Justify::Right => {
                for _ in 0..pad {
                    s.push(options.fill);
                }
                s.push_str(sign);
                s.push_str(prefix);
                s.push_str(&digits);
            }
            Justify::Left => {
                s.push_str(sign);
                s.push_str(prefix);
                s.push_str(&digits);
                for _ in 0..pad {
                    s.push(options.fill);
                }
            }
            Justify::Internal => {
                s.push_str(sign);
                for _ in 0..pad {
                    s.push(options.fill);
                }
                s.push_str(prefix);
                s.push_str(&digits);
            }
        }
        s
    }

    /// Write the [`Wide::format_with`] rendering to a byte stream.
    pub fn write_text<W: Write>(&self, writer: &mut W, options: &FormatOptions) -> io::Result<()> {
        writer.write_all(self.format_with(options).as_bytes())
    }
}

impl<V: Signedness> fmt::Display for Wide<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(self.sign != Sign::Negative, "", &self.mag_string(Base::Dec, false))
    }
}

impl<V: Signedness> fmt::Binary for Wide<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0b", &self.image_digits(Base::Bin, false))
    }
}

impl<V: Signedness> fmt::Octal for Wide<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0o", &self.image_digits(Base::Oct, false))
    }
}

impl<V: Signedness> fmt::LowerHex for Wide<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.image_digits(Base::Hex, false))
    }
}

impl<V: Signedness> fmt::UpperHex for Wide<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.image_digits(Base::Hex, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{swide, uwide};

    #[test]
    fn test_to_base_string_field_depends_on_width_not_value() {
        let minus_one = swide!(8; -1);
        assert_eq!(minus_one.to_base_string(Base::Bin, false), "11111111");
        assert_eq!(minus_one.to_base_string(Base::Bin, true), "0b11111111");
        // Nine image bits over three digits in octal and decimal.
        assert_eq!(minus_one.to_base_string(Base::Oct, true), "0o777");
        assert_eq!(minus_one.to_base_string(Base::Dec, true), "0d511");
        assert_eq!(minus_one.to_base_string(Base::Hex, true), "0xFF");

        let five = swide!(8; 5);
        assert_eq!(five.to_base_string(Base::Bin, false), "00000101");
        assert_eq!(five.to_base_string(Base::Hex, false), "05");
        assert_eq!(uwide!(4; 10).to_base_string(Base::Bin, false), "1010");
    }

    #[test]
    fn test_to_base_string_of_zero_is_all_zeros() {
        assert_eq!(swide!(8; 0).to_base_string(Base::Bin, false), "00000000");
        assert_eq!(swide!(8; 0).to_base_string(Base::Hex, true), "0x00");
    }

    #[test]
    fn test_display_prints_sign_and_magnitude() {
        assert_eq!(format!("{}", swide!(16; -42)), "-42");
        assert_eq!(format!("{:+}", swide!(16; 7)), "+7");
        assert_eq!(format!("{:>6}", swide!(16; -42)), "   -42");
        assert_eq!(format!("{:08}", swide!(16; -42)), "-0000042");
        assert_eq!(format!("{}", uwide!(4; 15)), "15");
    }

    #[test]
    fn test_radix_traits_print_the_image() {
        assert_eq!(format!("{:#b}", swide!(4; -3)), "0b1101");
        assert_eq!(format!("{:x}", swide!(8; -1)), "ff");
        assert_eq!(format!("{:#X}", swide!(8; -1)), "0xFF");
        assert_eq!(format!("{:o}", swide!(8; -1)), "777");
    }

    #[test]
    fn test_format_with_places_fill_per_justification() {
        let v = swide!(16; -255);
        let mut options = FormatOptions {
            base: Base::Hex,
            width: 8,
            fill: '.',
            show_base: true,
            ..FormatOptions::default()
        };
        assert_eq!(v.format_with(&options), "...-0xff");
        options.justify = Justify::Left;
        assert_eq!(v.format_with(&options), "-0xff...");
        options.justify = Justify::Internal;
        assert_eq!(v.format_with(&options), "-...0xff");
        options.uppercase = true;
        assert_eq!(v.format_with(&options), "-...0XFF");
        // Without a sign the fill still precedes the prefix.
        options.uppercase = false;
        assert_eq!(uwide!(16; 255).format_with(&options), "....0xff");
    }

    #[test]
    fn test_format_with_octal_prefix_suppressed_for_zero() {
        let options = FormatOptions {
            base: Base::Oct,
            show_base: true,
            ..FormatOptions::default()
        };
        assert_eq!(swide!(8; 0).format_with(&options), "0");
        assert_eq!(swide!(8; 9).format_with(&options), "011");
    }

    #[test]
    fn test_format_with_show_sign() {
        let options = FormatOptions {
            show_sign: true,
            ..FormatOptions::default()
        };
        assert_eq!(swide!(8; 3).format_with(&options), "+3");
        assert_eq!(swide!(8; 0).format_with(&options), "+0");
        assert_eq!(swide!(8; -3).format_with(&options), "-3");
    }

    #[test]
    fn test_write_text_matches_format_with() {
        let v = uwide!(12; 0o1234);
        let options = FormatOptions {
            base: Base::Oct,
            show_base: true,
            ..FormatOptions::default()
        };
        let mut out = Vec::new();
        v.write_text(&mut out, &options).unwrap();
        assert_eq!(out, b"01234");
    }
}
