use std::fmt;

use crate::instructions::{Format, Mnemonic};

/// Textual radix of a rendered instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Hex,
    Binary,
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Radix::Hex => f.write_str("hex"),
            Radix::Binary => f.write_str("binary"),
        }
    }
}

/// Failures at the word boundary: malformed word text, words that are not
/// RV32I, and typed constructors called with the wrong mnemonic.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("malformed {radix} word: expected {expected} digits, found {found}")]
    WordLength {
        radix: Radix,
        expected: usize,
        found: usize,
    },
    #[error("invalid {radix} digit {digit:?} in {text:?}")]
    InvalidDigit {
        radix: Radix,
        digit: char,
        text: String,
    },
    #[error("unknown opcode {opcode:#09b} in word {word:#010x}")]
    UnknownOpcode { word: u32, opcode: u8 },
    #[error(
        "no RV32I instruction for opcode {opcode:#09b}, funct3 {funct3:#05b}, funct7 {funct7:#09b} (word {word:#010x})"
    )]
    UnmappedFunct {
        word: u32,
        opcode: u8,
        funct3: u8,
        funct7: u8,
    },
    #[error("{mnemonic} is a {actual:?}-format instruction, not {expected:?}")]
    FormatMismatch {
        mnemonic: Mnemonic,
        expected: Format,
        actual: Format,
    },
}

/// Failures turning one line of assembly text into an instruction.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty instruction")]
    Empty,
    #[error("unknown mnemonic {0:?}")]
    UnknownMnemonic(String),
    #[error("{mnemonic}: expected {expected} operands, found {found}")]
    OperandCount {
        mnemonic: String,
        expected: usize,
        found: usize,
    },
    #[error("{mnemonic}: expected operands `{expected}`, found `{found}`")]
    OperandShape {
        mnemonic: String,
        expected: &'static str,
        found: String,
    },
    #[error("invalid register {0:?} (expected x0..x31)")]
    InvalidRegister(String),
    #[error("invalid immediate {0:?}")]
    InvalidImmediate(String),
    #[error("{mnemonic}: immediate {value} out of range {min}..={max}")]
    ImmediateOutOfRange {
        mnemonic: Mnemonic,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("{mnemonic}: immediate {value} is not a multiple of {align}")]
    Misaligned {
        mnemonic: Mnemonic,
        value: i64,
        align: i64,
    },
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// A [`ParseError`] tagged with its 1-based source line.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {source}")]
pub struct LineError {
    pub line: usize,
    #[source]
    pub source: ParseError,
}

/// Invalid display selector. A usage error, not a codec error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("invalid endianness {0:?}: valid inputs are \"big\" and \"little\"")]
    InvalidEndian(String),
    #[error("invalid mnemonic case {0:?}: valid inputs are \"upper\" and \"lower\"")]
    InvalidCase(String),
}
