use serde::{Deserialize, Serialize};

use crate::config::CodecConfig;
use crate::instructions::{Format, ImmSign, Mnemonic};
use crate::word::InstructionWord;
use crate::{disasm, encoder};

/// One RV32I instruction: a mnemonic plus its operand fields.
///
/// Built by the [`encoder`] constructors, the decoder or the parser, and
/// never mutated afterwards. Fields the format does not carry are zero, and
/// `imm` is always in canonical form for its mnemonic:
///
/// | format   | `imm` holds                                           |
/// |----------|-------------------------------------------------------|
/// | R        | 0                                                     |
/// | RShift   | shift amount, 0..=31                                  |
/// | I, ILoad | 12-bit value, sign-extended or zero-extended by class |
/// | S        | signed 12-bit offset                                  |
/// | B        | signed 13-bit offset, bit 0 clear                     |
/// | U        | full 32-bit value, low 12 bits clear                  |
/// | J        | signed 21-bit offset, bit 0 clear                     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawInstruction")]
pub struct Instruction {
    mnemonic: Mnemonic,
    rd: u8,
    rs1: u8,
    rs2: u8,
    imm: i32,
}

/// Wire form of [`Instruction`]; deserialized values pass through
/// [`Instruction::normalized`] like every other constructor.
#[derive(Deserialize)]
struct RawInstruction {
    mnemonic: Mnemonic,
    #[serde(default)]
    rd: u32,
    #[serde(default)]
    rs1: u32,
    #[serde(default)]
    rs2: u32,
    #[serde(default)]
    imm: i32,
}

impl From<RawInstruction> for Instruction {
    fn from(raw: RawInstruction) -> Self {
        Self::normalized(raw.mnemonic, raw.rd, raw.rs1, raw.rs2, raw.imm)
    }
}

impl Instruction {
    /// Masks every field to its width and drops the ones `mnemonic`'s
    /// format does not encode.
    pub(crate) fn normalized(mnemonic: Mnemonic, rd: u32, rs1: u32, rs2: u32, imm: i32) -> Self {
        let reg = |r: u32| (r & 0x1f) as u8;
        let (rd, rs1, rs2) = match mnemonic.format() {
            Format::R => (reg(rd), reg(rs1), reg(rs2)),
            Format::RShift | Format::I | Format::ILoad => (reg(rd), reg(rs1), 0),
            Format::S | Format::B => (0, reg(rs1), reg(rs2)),
            Format::U | Format::J => (reg(rd), 0, 0),
        };
        Self {
            mnemonic,
            rd,
            rs1,
            rs2,
            imm: canonical_imm(mnemonic, imm),
        }
    }

    pub fn mnemonic(&self) -> Mnemonic {
        self.mnemonic
    }

    pub fn format(&self) -> Format {
        self.mnemonic.format()
    }

    pub fn rd(&self) -> u8 {
        self.rd
    }

    pub fn rs1(&self) -> u8 {
        self.rs1
    }

    pub fn rs2(&self) -> u8 {
        self.rs2
    }

    pub fn imm(&self) -> i32 {
        self.imm
    }

    /// Shift amount of a shift-immediate instruction.
    pub fn shamt(&self) -> Option<u8> {
        (self.format() == Format::RShift).then_some(self.imm as u8)
    }

    pub fn encode(&self) -> InstructionWord {
        encoder::pack(self)
    }

    /// Disassembly with the default display options.
    pub fn disassemble(&self) -> String {
        disasm::fmt_instruction(self, &CodecConfig::default())
    }

    pub fn disassemble_with(&self, cfg: &CodecConfig) -> String {
        disasm::fmt_instruction(self, cfg)
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.disassemble())
    }
}

pub(crate) fn sign_extend(value: u32, bits: u32) -> i32 {
    let s = 32 - bits;
    ((value << s) as i32) >> s
}

fn canonical_imm(mnemonic: Mnemonic, imm: i32) -> i32 {
    let raw = imm as u32;
    match mnemonic.format() {
        Format::R => 0,
        Format::RShift => (raw & 0x1f) as i32,
        Format::I | Format::ILoad => match mnemonic.imm_sign() {
            ImmSign::Signed => sign_extend(raw & 0xfff, 12),
            ImmSign::Unsigned => (raw & 0xfff) as i32,
        },
        Format::S => sign_extend(raw & 0xfff, 12),
        Format::B => sign_extend(raw & 0x1ffe, 13),
        Format::U => (raw & 0xffff_f000) as i32,
        Format::J => sign_extend(raw & 0x1f_fffe, 21),
    }
}
