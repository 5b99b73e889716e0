//! One-line RV32I assembly parser.
//!
//! Accepted grammar, one instruction per line:
//!
//! ```text
//! ADD   rd, rs1, rs2        SLLI rd, rs1, shamt
//! ADDI  rd, rs1, imm        LW   rd, imm(rs1)       JALR rd, imm(rs1) | rd, rs1, imm
//! SW    rs2, imm(rs1)       BEQ  rs1, rs2, offset
//! LUI   rd, value           JAL  rd, offset
//! NOP | MV rd, rs | CLR rd
//! ```
//!
//! Registers are `x0`..`x31`; immediates are decimal or `0x` hex, optionally
//! negative. Text after `#` or `;` is a comment.

use tracing::debug;

use crate::encoder::{self, Operands};
use crate::error::{LineError, ParseError};
use crate::instruction::Instruction;
use crate::instructions::{Format, ImmSign, Mnemonic};
use crate::word::InstructionWord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operand {
    Reg(u32),
    Imm(i64),
}

fn parse_reg(tok: &str) -> Option<Result<u32, ParseError>> {
    let digits = tok.strip_prefix('x').or_else(|| tok.strip_prefix('X'))?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(match digits.parse::<u32>() {
        Ok(r) if r < 32 => Ok(r),
        _ => Err(ParseError::InvalidRegister(tok.to_string())),
    })
}

fn parse_num(tok: &str) -> Option<i64> {
    let (neg, body) = match tok.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, tok.strip_prefix('+').unwrap_or(tok)),
    };
    let v = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        i64::from_str_radix(hex, 16).ok()?
    } else if !body.is_empty() && body.chars().all(|c| c.is_ascii_digit()) {
        body.parse::<i64>().ok()?
    } else {
        return None;
    };
    Some(if neg { -v } else { v })
}

fn parse_operand(tok: &str) -> Result<Operand, ParseError> {
    if let Some(reg) = parse_reg(tok) {
        return reg.map(Operand::Reg);
    }
    if let Some(v) = parse_num(tok) {
        return Ok(Operand::Imm(v));
    }
    if tok.starts_with(|c: char| c.is_ascii_alphabetic()) {
        Err(ParseError::InvalidRegister(tok.to_string()))
    } else {
        Err(ParseError::InvalidImmediate(tok.to_string()))
    }
}

/// Strip parentheses and split on commas and whitespace.
fn tokenize(operands: &str) -> Vec<&str> {
    operands
        .split(|c: char| c == ',' || c == '(' || c == ')' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect()
}

fn strip_comment(line: &str) -> &str {
    match line.find(['#', ';']) {
        Some(p) => &line[..p],
        None => line,
    }
}

/// Valid range of an immediate operand and its required alignment.
fn imm_bounds(m: Mnemonic) -> (i64, i64, i64) {
    match m.format() {
        Format::RShift => (0, 31, 1),
        Format::I | Format::ILoad => match m.imm_sign() {
            ImmSign::Signed => (-2048, 2047, 1),
            ImmSign::Unsigned => (-2048, 4095, 1),
        },
        Format::S => (-2048, 2047, 1),
        Format::B => (-4096, 4095, 2),
        Format::J => (-(1 << 20), (1 << 20) - 1, 2),
        Format::U => (i64::from(i32::MIN), i64::from(u32::MAX), 4096),
        Format::R => (0, 0, 1),
    }
}

/// Range-check `value` and convert it to its two's-complement field pattern.
fn check_imm(m: Mnemonic, value: i64) -> Result<i32, ParseError> {
    let (min, max, align) = imm_bounds(m);
    if value < min || value > max {
        return Err(ParseError::ImmediateOutOfRange { mnemonic: m, value, min, max });
    }
    if value % align != 0 {
        return Err(ParseError::Misaligned { mnemonic: m, value, align });
    }
    let width = match m.format() {
        Format::RShift => 5,
        Format::I | Format::ILoad | Format::S => 12,
        Format::B => 13,
        Format::J => 21,
        Format::U | Format::R => 32,
    };
    let mask = (1i64 << width) - 1;
    Ok((value & mask) as u32 as i32)
}

fn shape_of(m: Mnemonic) -> &'static str {
    match m.format() {
        Format::R => "rd, rs1, rs2",
        Format::RShift => "rd, rs1, shamt",
        Format::I if m == Mnemonic::Jalr => "rd, imm(rs1)",
        Format::I => "rd, rs1, imm",
        Format::ILoad => "rd, imm(rs1)",
        Format::S => "rs2, imm(rs1)",
        Format::B => "rs1, rs2, offset",
        Format::U => "rd, imm",
        Format::J => "rd, offset",
    }
}

fn arity(format: Format) -> usize {
    match format {
        Format::U | Format::J => 2,
        _ => 3,
    }
}

fn parse_pseudo(name: &str, ops: &[Operand]) -> Option<Result<Instruction, ParseError>> {
    use Operand::Reg;
    let (expected, shape) = match name.to_ascii_uppercase().as_str() {
        "NOP" => (0, ""),
        "MV" => (2, "rd, rs"),
        "CLR" => (1, "rd"),
        _ => return None,
    };
    if ops.len() != expected {
        return Some(Err(ParseError::OperandCount {
            mnemonic: name.to_string(),
            expected,
            found: ops.len(),
        }));
    }
    let (rd, rs1) = match ops {
        [] => (0, 0),
        [Reg(rd), Reg(rs)] => (*rd, *rs),
        [Reg(rd)] => (*rd, 0),
        _ => {
            return Some(Err(ParseError::OperandShape {
                mnemonic: name.to_string(),
                expected: shape,
                found: fmt_ops(ops),
            }))
        }
    };
    Some(encoder::i_type(Mnemonic::Addi, rd, rs1, 0).map_err(ParseError::from))
}

fn fmt_ops(ops: &[Operand]) -> String {
    ops.iter()
        .map(|o| match o {
            Operand::Reg(r) => format!("x{r}"),
            Operand::Imm(v) => v.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse one instruction. Blank input is [`ParseError::Empty`].
pub fn parse_instruction(text: &str) -> Result<Instruction, ParseError> {
    let s = strip_comment(text).trim();
    let (name, rest) = match s.split_once(char::is_whitespace) {
        Some((n, r)) => (n, r),
        None => (s, ""),
    };
    if name.is_empty() {
        return Err(ParseError::Empty);
    }
    let ops = tokenize(rest)
        .into_iter()
        .map(parse_operand)
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(pseudo) = parse_pseudo(name, &ops) {
        return pseudo;
    }
    let m: Mnemonic = name.parse()?;
    let format = m.format();
    if ops.len() != arity(format) {
        return Err(ParseError::OperandCount {
            mnemonic: m.name().to_string(),
            expected: arity(format),
            found: ops.len(),
        });
    }

    use Operand::{Imm, Reg};
    let shape_err = || ParseError::OperandShape {
        mnemonic: m.name().to_string(),
        expected: shape_of(m),
        found: fmt_ops(&ops),
    };
    let operands = match (format, ops.as_slice()) {
        (Format::R, &[Reg(rd), Reg(rs1), Reg(rs2)]) => Operands { rd, rs1, rs2, imm: 0 },
        (Format::RShift | Format::I, &[Reg(rd), Reg(rs1), Imm(v)]) => Operands { rd, rs1, rs2: 0, imm: check_imm(m, v)? },
        (Format::I, &[Reg(rd), Imm(v), Reg(rs1)]) if m == Mnemonic::Jalr => {
            Operands { rd, rs1, rs2: 0, imm: check_imm(m, v)? }
        }
        (Format::ILoad, &[Reg(rd), Imm(v), Reg(rs1)]) => Operands { rd, rs1, rs2: 0, imm: check_imm(m, v)? },
        (Format::S, &[Reg(rs2), Imm(v), Reg(rs1)]) => Operands { rd: 0, rs1, rs2, imm: check_imm(m, v)? },
        (Format::B, &[Reg(rs1), Reg(rs2), Imm(v)]) => Operands { rd: 0, rs1, rs2, imm: check_imm(m, v)? },
        (Format::U | Format::J, &[Reg(rd), Imm(v)]) => Operands { rd, rs1: 0, rs2: 0, imm: check_imm(m, v)? },
        _ => return Err(shape_err()),
    };
    Ok(encoder::build(m, operands))
}

/// Parse one instruction and pack it.
pub fn assemble(text: &str) -> Result<InstructionWord, ParseError> {
    parse_instruction(text).map(|i| i.encode())
}

/// Parse a source with one instruction per line. Blank and comment-only
/// lines are skipped; the first bad line aborts with its line number.
pub fn parse_program(src: &str) -> Result<Vec<Instruction>, LineError> {
    let mut out = Vec::new();
    for (idx, line) in src.lines().enumerate() {
        if strip_comment(line).trim().is_empty() {
            continue;
        }
        match parse_instruction(line) {
            Ok(inst) => out.push(inst),
            Err(source) => {
                debug!(line = idx + 1, text = line, error = %source, "rejected line");
                return Err(LineError { line: idx + 1, source });
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizer_strips_parentheses() {
        assert_eq!(tokenize("x5, -4(x2)"), vec!["x5", "-4", "x2"]);
        assert_eq!(tokenize(" x1 ,x2,\tx3 "), vec!["x1", "x2", "x3"]);
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_num("10"), Some(10));
        assert_eq!(parse_num("-2048"), Some(-2048));
        assert_eq!(parse_num("0x7ff"), Some(2047));
        assert_eq!(parse_num("-0x10"), Some(-16));
        assert_eq!(parse_num("1O"), None);
        assert_eq!(parse_num("-"), None);
        assert_eq!(parse_num("0x"), None);
        assert_eq!(parse_num("0x-5"), None);
        assert_eq!(parse_num("-0x-5"), None);
        assert_eq!(parse_num("0x+5"), None);
    }

    #[test]
    fn negative_immediates_become_field_patterns() {
        assert_eq!(check_imm(Mnemonic::Addi, -1), Ok(0xfff));
        assert_eq!(check_imm(Mnemonic::Beq, -2), Ok(0x1ffe));
        assert_eq!(check_imm(Mnemonic::Jal, -2), Ok(0x1f_fffe));
        assert_eq!(check_imm(Mnemonic::Lui, 0x1000), Ok(0x1000));
    }

    #[test]
    fn registers_outside_x0_x31_are_rejected() {
        assert_eq!(parse_operand("x31"), Ok(Operand::Reg(31)));
        assert_eq!(
            parse_operand("x32"),
            Err(ParseError::InvalidRegister("x32".into()))
        );
        assert_eq!(
            parse_operand("sp"),
            Err(ParseError::InvalidRegister("sp".into()))
        );
    }

    #[test]
    fn comments_are_ignored() {
        let a = parse_instruction("addi x1, x0, 1 # bump").unwrap();
        let b = parse_instruction("addi x1, x0, 1 ; bump").unwrap();
        assert_eq!(a, b);
        assert_eq!(parse_instruction("  # only a comment"), Err(ParseError::Empty));
    }
}
