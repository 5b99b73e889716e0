use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::decoder::{Decoder, Fields};
use crate::error::CodecError;
use crate::instruction::Instruction;
use crate::instructions::{Format, ImmSign, InstrDesc, Mnemonic, TABLE};
use crate::word::InstructionWord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Key {
    opcode: u8,
    funct3: Option<u8>,
    funct7: Option<u8>,
}

impl From<&InstrDesc> for Key {
    fn from(d: &InstrDesc) -> Self {
        Self {
            opcode: d.opcode,
            funct3: d.funct3,
            funct7: d.funct7,
        }
    }
}

/// RV32I base decoder.
///
/// Dispatch is a lookup keyed on `(opcode, funct3, funct7)` built from
/// [`TABLE`]. Entries that do not use funct3/funct7 are keyed with `None`
/// there; the table is checked at compile time so that at most one of the
/// three probes in [`Rv32iDecoder::lookup`] can hit.
#[derive(Debug, Clone)]
pub struct Rv32iDecoder {
    by_key: HashMap<Key, Mnemonic>,
    opcodes: HashSet<u8>,
}

impl Rv32iDecoder {
    pub fn new() -> Self {
        let by_key = TABLE.iter().map(|d| (Key::from(d), d.mnemonic)).collect();
        let opcodes = TABLE.iter().map(|d| d.opcode).collect();
        Self { by_key, opcodes }
    }

    /// Resolve the mnemonic for a word's opcode/funct3/funct7.
    pub fn lookup(&self, f: &Fields, word: InstructionWord) -> Result<Mnemonic, CodecError> {
        if !self.opcodes.contains(&f.opcode) {
            return Err(CodecError::UnknownOpcode {
                word: word.bits(),
                opcode: f.opcode,
            });
        }
        let probes = [
            Key { opcode: f.opcode, funct3: None, funct7: None },
            Key { opcode: f.opcode, funct3: Some(f.funct3), funct7: None },
            Key { opcode: f.opcode, funct3: Some(f.funct3), funct7: Some(f.funct7) },
        ];
        probes
            .iter()
            .find_map(|k| self.by_key.get(k).copied())
            .ok_or(CodecError::UnmappedFunct {
                word: word.bits(),
                opcode: f.opcode,
                funct3: f.funct3,
                funct7: f.funct7,
            })
    }
}

impl Default for Rv32iDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for Rv32iDecoder {
    fn decode(&self, word: InstructionWord) -> Result<Instruction, CodecError> {
        let f = Fields::extract(word);
        let mnemonic = self.lookup(&f, word).inspect_err(|e| debug!(%word, error = %e, "decode failed"))?;
        let (rd, rs1, rs2) = (u32::from(f.rd), u32::from(f.rs1), u32::from(f.rs2));

        let inst = match mnemonic.format() {
            Format::R => Instruction::normalized(mnemonic, rd, rs1, rs2, 0),
            Format::RShift => Instruction::normalized(mnemonic, rd, rs1, 0, i32::from(f.rs2)),
            Format::I | Format::ILoad => {
                let imm = match mnemonic.imm_sign() {
                    ImmSign::Signed => f.imm_i,
                    ImmSign::Unsigned => f.imm_i & 0xfff,
                };
                Instruction::normalized(mnemonic, rd, rs1, 0, imm)
            }
            Format::S => Instruction::normalized(mnemonic, 0, rs1, rs2, f.imm_s),
            Format::B => Instruction::normalized(mnemonic, 0, rs1, rs2, f.imm_b),
            Format::U => Instruction::normalized(mnemonic, rd, 0, 0, f.imm_u),
            Format::J => Instruction::normalized(mnemonic, rd, 0, 0, f.imm_j),
        };
        trace!(%word, %mnemonic, "decoded");
        Ok(inst)
    }
}
