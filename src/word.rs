use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, OptionError, Radix};

/// Byte order used when rendering or reading word text. Field packing is
/// unaffected; `Little` only reverses the four byte groups of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endian {
    #[default]
    Big,
    Little,
}

impl FromStr for Endian {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "big" => Ok(Endian::Big),
            "little" => Ok(Endian::Little),
            _ => Err(OptionError::InvalidEndian(s.to_string())),
        }
    }
}

impl fmt::Display for Endian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endian::Big => f.write_str("big"),
            Endian::Little => f.write_str("little"),
        }
    }
}

/// A raw 32-bit RV32I instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstructionWord(pub u32);

impl InstructionWord {
    pub const BITS: usize = 32;
    pub const HEX_DIGITS: usize = 8;

    pub fn bits(self) -> u32 {
        self.0
    }

    fn ordered(self, endian: Endian) -> u32 {
        match endian {
            Endian::Big => self.0,
            Endian::Little => self.0.swap_bytes(),
        }
    }

    /// 8 lowercase hex digits, no prefix.
    pub fn to_hex(self, endian: Endian) -> String {
        format!("{:08x}", self.ordered(endian))
    }

    /// 32 `0`/`1` characters, no prefix.
    pub fn to_binary(self, endian: Endian) -> String {
        format!("{:032b}", self.ordered(endian))
    }

    /// Parse exactly 8 hex digits, optionally prefixed with `0x`.
    pub fn from_hex(text: &str, endian: Endian) -> Result<Self, CodecError> {
        let digits = strip_prefix(text.trim(), "0x");
        let raw = parse_digits(digits, Radix::Hex, Self::HEX_DIGITS, 16)?;
        Ok(Self(raw).reordered(endian))
    }

    /// Parse exactly 32 binary digits, optionally prefixed with `0b`.
    pub fn from_binary(text: &str, endian: Endian) -> Result<Self, CodecError> {
        let digits = strip_prefix(text.trim(), "0b");
        let raw = parse_digits(digits, Radix::Binary, Self::BITS, 2)?;
        Ok(Self(raw).reordered(endian))
    }

    /// Parse either rendering. A `0x`/`0b` prefix selects the radix; without
    /// one, 32 characters are read as binary and anything else as hex.
    pub fn parse(text: &str, endian: Endian) -> Result<Self, CodecError> {
        let t = text.trim();
        if has_prefix(t, "0b") || (!has_prefix(t, "0x") && t.len() == Self::BITS) {
            Self::from_binary(t, endian)
        } else {
            Self::from_hex(t, endian)
        }
    }

    fn reordered(self, endian: Endian) -> Self {
        Self(self.ordered(endian))
    }
}

impl From<u32> for InstructionWord {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<InstructionWord> for u32 {
    fn from(word: InstructionWord) -> Self {
        word.0
    }
}

impl fmt::Display for InstructionWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl fmt::LowerHex for InstructionWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::Binary for InstructionWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

fn has_prefix(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(prefix))
}

fn strip_prefix<'a>(text: &'a str, prefix: &str) -> &'a str {
    if has_prefix(text, prefix) {
        &text[prefix.len()..]
    } else {
        text
    }
}

fn parse_digits(digits: &str, radix: Radix, expected: usize, base: u32) -> Result<u32, CodecError> {
    let found = digits.chars().count();
    if found != expected {
        return Err(CodecError::WordLength { radix, expected, found });
    }
    if let Some(digit) = digits.chars().find(|c| !c.is_digit(base)) {
        return Err(CodecError::InvalidDigit {
            radix,
            digit,
            text: digits.to_string(),
        });
    }
    // Length and digits are checked above, so this cannot overflow.
    u32::from_str_radix(digits, base).map_err(|_| CodecError::WordLength { radix, expected, found })
}
