//! The prelude exports the register value types and everything a
//! caller needs to construct, convert and render them.  Providing
//! these types is the main purpose of the crate.
pub use super::twoscomplement::error::*;
pub use super::twoscomplement::format::*;
pub use super::twoscomplement::signed::*;
pub use super::twoscomplement::unsigned::*;
pub use super::twoscomplement::{Sign, Signed, Signedness, Unsigned, Wide, WideCommon};
pub use super::{swide, uwide};
