//! Typed instruction construction and bit packing.
//!
//! Constructors never fail on operand values: register indices are taken
//! modulo 32 and immediates are truncated to their field width. They fail
//! only when the mnemonic belongs to another format.

use tracing::trace;

use crate::error::CodecError;
use crate::instruction::Instruction;
use crate::instructions::{Format, Mnemonic};
use crate::word::InstructionWord;

/// Operand set accepted by [`build`]. Fields the format does not use are
/// ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Operands {
    pub rd: u32,
    pub rs1: u32,
    pub rs2: u32,
    pub imm: i32,
}

/// Build any instruction from a full operand set.
pub fn build(mnemonic: Mnemonic, ops: Operands) -> Instruction {
    Instruction::normalized(mnemonic, ops.rd, ops.rs1, ops.rs2, ops.imm)
}

fn expect_format(mnemonic: Mnemonic, allowed: &[Format]) -> Result<(), CodecError> {
    let actual = mnemonic.format();
    if allowed.contains(&actual) {
        Ok(())
    } else {
        Err(CodecError::FormatMismatch {
            mnemonic,
            expected: allowed[0],
            actual,
        })
    }
}

pub fn r_type(mnemonic: Mnemonic, rd: u32, rs1: u32, rs2: u32) -> Result<Instruction, CodecError> {
    expect_format(mnemonic, &[Format::R])?;
    Ok(Instruction::normalized(mnemonic, rd, rs1, rs2, 0))
}

pub fn shift(mnemonic: Mnemonic, rd: u32, rs1: u32, shamt: u32) -> Result<Instruction, CodecError> {
    expect_format(mnemonic, &[Format::RShift])?;
    Ok(Instruction::normalized(mnemonic, rd, rs1, 0, shamt as i32))
}

/// Register-immediate and load instructions (`JALR` included).
pub fn i_type(mnemonic: Mnemonic, rd: u32, rs1: u32, imm: i32) -> Result<Instruction, CodecError> {
    expect_format(mnemonic, &[Format::I, Format::ILoad])?;
    Ok(Instruction::normalized(mnemonic, rd, rs1, 0, imm))
}

pub fn s_type(mnemonic: Mnemonic, rs1: u32, rs2: u32, imm: i32) -> Result<Instruction, CodecError> {
    expect_format(mnemonic, &[Format::S])?;
    Ok(Instruction::normalized(mnemonic, 0, rs1, rs2, imm))
}

/// Bit 0 of `imm` is dropped.
pub fn b_type(mnemonic: Mnemonic, rs1: u32, rs2: u32, imm: i32) -> Result<Instruction, CodecError> {
    expect_format(mnemonic, &[Format::B])?;
    Ok(Instruction::normalized(mnemonic, 0, rs1, rs2, imm))
}

/// `imm` is the 32-bit result value; only its upper 20 bits are kept.
pub fn u_type(mnemonic: Mnemonic, rd: u32, imm: i32) -> Result<Instruction, CodecError> {
    expect_format(mnemonic, &[Format::U])?;
    Ok(Instruction::normalized(mnemonic, rd, 0, 0, imm))
}

/// Bit 0 of `imm` is dropped.
pub fn j_type(mnemonic: Mnemonic, rd: u32, imm: i32) -> Result<Instruction, CodecError> {
    expect_format(mnemonic, &[Format::J])?;
    Ok(Instruction::normalized(mnemonic, rd, 0, 0, imm))
}

/// Pack the fields of `inst` into RV32I bit order for its format.
pub fn pack(inst: &Instruction) -> InstructionWord {
    let d = inst.mnemonic().desc();
    let opcode = u32::from(d.opcode);
    let funct3 = u32::from(d.funct3.unwrap_or(0)) << 12;
    let funct7 = u32::from(d.funct7.unwrap_or(0)) << 25;
    let rd = (u32::from(inst.rd()) & 0x1f) << 7;
    let rs1 = (u32::from(inst.rs1()) & 0x1f) << 15;
    let rs2 = (u32::from(inst.rs2()) & 0x1f) << 20;
    let imm = inst.imm() as u32;

    let raw = match d.format {
        Format::R => funct7 | rs2 | rs1 | funct3 | rd | opcode,
        Format::RShift => funct7 | ((imm & 0x1f) << 20) | rs1 | funct3 | rd | opcode,
        Format::I | Format::ILoad => ((imm & 0xfff) << 20) | rs1 | funct3 | rd | opcode,
        Format::S => {
            let hi = (imm >> 5) & 0x7f;
            let lo = imm & 0x1f;
            (hi << 25) | rs2 | rs1 | funct3 | (lo << 7) | opcode
        }
        Format::B => {
            let b12 = (imm >> 12) & 0x1;
            let b10_5 = (imm >> 5) & 0x3f;
            let b4_1 = (imm >> 1) & 0xf;
            let b11 = (imm >> 11) & 0x1;
            (b12 << 31) | (b10_5 << 25) | rs2 | rs1 | funct3 | (b4_1 << 8) | (b11 << 7) | opcode
        }
        Format::U => (imm & 0xffff_f000) | rd | opcode,
        Format::J => {
            let b20 = (imm >> 20) & 0x1;
            let b10_1 = (imm >> 1) & 0x3ff;
            let b11 = (imm >> 11) & 0x1;
            let b19_12 = (imm >> 12) & 0xff;
            (b20 << 31) | (b10_1 << 21) | (b11 << 20) | (b19_12 << 12) | rd | opcode
        }
    };
    let word = InstructionWord(raw);
    trace!(mnemonic = %d.mnemonic, %word, "packed");
    word
}
