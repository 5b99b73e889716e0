use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::instruction::{sign_extend, Instruction};
use crate::word::{Endian, InstructionWord};

/// Every fixed field of a word plus the five immediate reconstructions.
/// Which of them is meaningful depends on the format chosen by dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fields {
    pub opcode: u8,
    pub rd: u8,
    pub funct3: u8,
    pub rs1: u8,
    /// Also the shift amount of SLLI/SRLI/SRAI.
    pub rs2: u8,
    pub funct7: u8,
    pub imm_i: i32,
    pub imm_s: i32,
    pub imm_b: i32,
    pub imm_u: i32,
    pub imm_j: i32,
}

impl Fields {
    pub fn extract(word: InstructionWord) -> Self {
        let w = word.bits();
        let imm_s = ((w >> 25) << 5) | ((w >> 7) & 0x1f);
        let imm_b = (((w >> 31) & 0x1) << 12)
            | (((w >> 7) & 0x1) << 11)
            | (((w >> 25) & 0x3f) << 5)
            | (((w >> 8) & 0xf) << 1);
        let imm_j = (((w >> 31) & 0x1) << 20)
            | (((w >> 12) & 0xff) << 12)
            | (((w >> 20) & 0x1) << 11)
            | (((w >> 21) & 0x3ff) << 1);
        Self {
            opcode: (w & 0x7f) as u8,
            rd: ((w >> 7) & 0x1f) as u8,
            funct3: ((w >> 12) & 0x7) as u8,
            rs1: ((w >> 15) & 0x1f) as u8,
            rs2: ((w >> 20) & 0x1f) as u8,
            funct7: ((w >> 25) & 0x7f) as u8,
            imm_i: sign_extend(w >> 20, 12),
            imm_s: sign_extend(imm_s, 12),
            imm_b: sign_extend(imm_b, 13),
            imm_u: (w & 0xffff_f000) as i32,
            imm_j: sign_extend(imm_j, 21),
        }
    }
}

pub trait Decoder {
    fn decode(&self, word: InstructionWord) -> Result<Instruction, CodecError>;

    fn decode_hex(&self, text: &str, endian: Endian) -> Result<Instruction, CodecError> {
        self.decode(InstructionWord::from_hex(text, endian)?)
    }

    fn decode_binary(&self, text: &str, endian: Endian) -> Result<Instruction, CodecError> {
        self.decode(InstructionWord::from_binary(text, endian)?)
    }

    /// Decode hex or binary text, see [`InstructionWord::parse`].
    fn decode_str(&self, text: &str, endian: Endian) -> Result<Instruction, CodecError> {
        self.decode(InstructionWord::parse(text, endian)?)
    }
}
