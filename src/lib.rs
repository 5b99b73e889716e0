//! Bidirectional codec for RV32I base instructions: assembly text,
//! [`Instruction`] values and raw 32-bit words.

pub mod config;
pub mod decoder;
pub mod disasm;
pub mod encoder;
pub mod error;
pub mod instruction;
pub mod instructions;
pub mod parser;
pub mod word;

pub mod isa {
    pub mod rv32i;
}

pub use config::{CodecConfig, DisasmFlags, MnemonicCase};
pub use decoder::{Decoder, Fields};
pub use error::{CodecError, LineError, OptionError, ParseError, Radix};
pub use instruction::Instruction;
pub use instructions::{Format, ImmSign, Mnemonic};
pub use isa::rv32i::Rv32iDecoder;
pub use parser::{assemble, parse_instruction, parse_program};
pub use word::{Endian, InstructionWord};
