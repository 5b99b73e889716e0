use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// RV32I encoding format. `RShift` is the R layout reused by the
/// shift-immediate instructions, whose `rs2` slot holds a shift amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    R,
    RShift,
    I,
    ILoad,
    S,
    B,
    U,
    J,
}

/// How an immediate is read back and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImmSign {
    Signed,
    Unsigned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mnemonic {
    Lui,
    Auipc,
    Jal,
    Jalr,
    Beq,
    Bne,
    Blt,
    Bge,
    Bltu,
    Bgeu,
    Lb,
    Lh,
    Lw,
    Lbu,
    Lhu,
    Sb,
    Sh,
    Sw,
    Addi,
    Slti,
    Sltiu,
    Xori,
    Ori,
    Andi,
    Slli,
    Srli,
    Srai,
    Add,
    Sub,
    Sll,
    Slt,
    Sltu,
    Xor,
    Srl,
    Sra,
    Or,
    And,
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub mnemonic: Mnemonic,
    pub name: &'static str,
    pub format: Format,
    pub opcode: u8,
    pub funct3: Option<u8>,
    pub funct7: Option<u8>,
    pub imm: ImmSign,
}

pub const OP_LUI: u8 = 0b011_0111;
pub const OP_AUIPC: u8 = 0b001_0111;
pub const OP_JAL: u8 = 0b110_1111;
pub const OP_JALR: u8 = 0b110_0111;
pub const OP_BRANCH: u8 = 0b110_0011;
pub const OP_LOAD: u8 = 0b000_0011;
pub const OP_STORE: u8 = 0b010_0011;
pub const OP_IMM: u8 = 0b001_0011;
pub const OP_REG: u8 = 0b011_0011;

const F7_ALT: u8 = 0b010_0000;

const fn desc(
    mnemonic: Mnemonic,
    name: &'static str,
    format: Format,
    opcode: u8,
    funct3: Option<u8>,
    funct7: Option<u8>,
    imm: ImmSign,
) -> InstrDesc {
    InstrDesc { mnemonic, name, format, opcode, funct3, funct7, imm }
}

use Format::*;
use ImmSign::*;

/// One entry per mnemonic, in `Mnemonic` discriminant order.
pub const TABLE: &[InstrDesc] = &[
    desc(Mnemonic::Lui, "LUI", U, OP_LUI, None, None, Unsigned),
    desc(Mnemonic::Auipc, "AUIPC", U, OP_AUIPC, None, None, Unsigned),
    desc(Mnemonic::Jal, "JAL", J, OP_JAL, None, None, Signed),
    desc(Mnemonic::Jalr, "JALR", I, OP_JALR, Some(0b000), None, Signed),
    desc(Mnemonic::Beq, "BEQ", B, OP_BRANCH, Some(0b000), None, Signed),
    desc(Mnemonic::Bne, "BNE", B, OP_BRANCH, Some(0b001), None, Signed),
    desc(Mnemonic::Blt, "BLT", B, OP_BRANCH, Some(0b100), None, Signed),
    desc(Mnemonic::Bge, "BGE", B, OP_BRANCH, Some(0b101), None, Signed),
    desc(Mnemonic::Bltu, "BLTU", B, OP_BRANCH, Some(0b110), None, Signed),
    desc(Mnemonic::Bgeu, "BGEU", B, OP_BRANCH, Some(0b111), None, Signed),
    desc(Mnemonic::Lb, "LB", ILoad, OP_LOAD, Some(0b000), None, Signed),
    desc(Mnemonic::Lh, "LH", ILoad, OP_LOAD, Some(0b001), None, Signed),
    desc(Mnemonic::Lw, "LW", ILoad, OP_LOAD, Some(0b010), None, Signed),
    desc(Mnemonic::Lbu, "LBU", ILoad, OP_LOAD, Some(0b100), None, Signed),
    desc(Mnemonic::Lhu, "LHU", ILoad, OP_LOAD, Some(0b101), None, Signed),
    desc(Mnemonic::Sb, "SB", S, OP_STORE, Some(0b000), None, Signed),
    desc(Mnemonic::Sh, "SH", S, OP_STORE, Some(0b001), None, Signed),
    desc(Mnemonic::Sw, "SW", S, OP_STORE, Some(0b010), None, Signed),
    desc(Mnemonic::Addi, "ADDI", I, OP_IMM, Some(0b000), None, Signed),
    desc(Mnemonic::Slti, "SLTI", I, OP_IMM, Some(0b010), None, Signed),
    desc(Mnemonic::Sltiu, "SLTIU", I, OP_IMM, Some(0b011), None, Signed),
    desc(Mnemonic::Xori, "XORI", I, OP_IMM, Some(0b100), None, Unsigned),
    desc(Mnemonic::Ori, "ORI", I, OP_IMM, Some(0b110), None, Unsigned),
    desc(Mnemonic::Andi, "ANDI", I, OP_IMM, Some(0b111), None, Unsigned),
    desc(Mnemonic::Slli, "SLLI", RShift, OP_IMM, Some(0b001), Some(0), Unsigned),
    desc(Mnemonic::Srli, "SRLI", RShift, OP_IMM, Some(0b101), Some(0), Unsigned),
    desc(Mnemonic::Srai, "SRAI", RShift, OP_IMM, Some(0b101), Some(F7_ALT), Unsigned),
    desc(Mnemonic::Add, "ADD", R, OP_REG, Some(0b000), Some(0), Unsigned),
    desc(Mnemonic::Sub, "SUB", R, OP_REG, Some(0b000), Some(F7_ALT), Unsigned),
    desc(Mnemonic::Sll, "SLL", R, OP_REG, Some(0b001), Some(0), Unsigned),
    desc(Mnemonic::Slt, "SLT", R, OP_REG, Some(0b010), Some(0), Unsigned),
    desc(Mnemonic::Sltu, "SLTU", R, OP_REG, Some(0b011), Some(0), Unsigned),
    desc(Mnemonic::Xor, "XOR", R, OP_REG, Some(0b100), Some(0), Unsigned),
    desc(Mnemonic::Srl, "SRL", R, OP_REG, Some(0b101), Some(0), Unsigned),
    desc(Mnemonic::Sra, "SRA", R, OP_REG, Some(0b101), Some(F7_ALT), Unsigned),
    desc(Mnemonic::Or, "OR", R, OP_REG, Some(0b110), Some(0), Unsigned),
    desc(Mnemonic::And, "AND", R, OP_REG, Some(0b111), Some(0), Unsigned),
];

const fn field_overlaps(a: Option<u8>, b: Option<u8>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => x == y,
        _ => true,
    }
}

const fn descs_overlap(a: &InstrDesc, b: &InstrDesc) -> bool {
    a.opcode == b.opcode && field_overlaps(a.funct3, b.funct3) && field_overlaps(a.funct7, b.funct7)
}

/// True when every `(opcode, funct3, funct7)` key in `table` selects at most
/// one entry. An entry that leaves funct3/funct7 unspecified matches any
/// value there, so it must not share an opcode (and funct3) with another.
pub const fn is_unambiguous(table: &[InstrDesc]) -> bool {
    let mut i = 0;
    while i < table.len() {
        let mut j = i + 1;
        while j < table.len() {
            if descs_overlap(&table[i], &table[j]) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const fn is_indexed(table: &[InstrDesc]) -> bool {
    let mut i = 0;
    while i < table.len() {
        if table[i].mnemonic as usize != i {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(is_unambiguous(TABLE), "RV32I dispatch table has colliding entries");
const _: () = assert!(is_indexed(TABLE), "RV32I table is out of mnemonic order");

impl Mnemonic {
    pub fn desc(self) -> &'static InstrDesc {
        &TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.desc().name
    }

    pub fn format(self) -> Format {
        self.desc().format
    }

    pub fn imm_sign(self) -> ImmSign {
        self.desc().imm
    }

    /// Case-insensitive lookup of a canonical mnemonic.
    pub fn from_name(name: &str) -> Option<Self> {
        TABLE
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .map(|d| d.mnemonic)
    }

    pub fn all() -> impl Iterator<Item = Mnemonic> {
        TABLE.iter().map(|d| d.mnemonic)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mnemonic {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ParseError::UnknownMnemonic(s.to_string()))
    }
}
