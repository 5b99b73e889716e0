use crate::config::{CodecConfig, DisasmFlags};
use crate::instruction::Instruction;
use crate::instructions::Format;

/// Render `inst` in the same grammar the parser accepts.
pub fn fmt_instruction(inst: &Instruction, cfg: &CodecConfig) -> String {
    let name = if cfg.flags.contains(DisasmFlags::UPPERCASE) {
        inst.mnemonic().name().to_string()
    } else {
        inst.mnemonic().name().to_ascii_lowercase()
    };
    let ops = fmt_operands(inst);
    if cfg.flags.contains(DisasmFlags::PAD_MNEMONIC) {
        format!("{:<width$} {}", name, ops, width = cfg.pad)
    } else {
        format!("{} {}", name, ops)
    }
}

pub fn fmt_operands(inst: &Instruction) -> String {
    let (rd, rs1, rs2, imm) = (inst.rd(), inst.rs1(), inst.rs2(), inst.imm());
    match inst.format() {
        Format::R => format!("x{}, x{}, x{}", rd, rs1, rs2),
        Format::RShift | Format::I => format!("x{}, x{}, {}", rd, rs1, imm),
        Format::ILoad => mem(rd, imm, rs1),
        Format::S => mem(rs2, imm, rs1),
        Format::B => format!("x{}, x{}, {}", rs1, rs2, imm),
        // U values are shown unsigned, like the hex rendering.
        Format::U => format!("x{}, {}", rd, imm as u32),
        Format::J => format!("x{}, {}", rd, imm),
    }
}

fn mem(reg: u8, offset: i32, base: u8) -> String {
    format!("x{}, {}(x{})", reg, offset, base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MnemonicCase;
    use crate::encoder;
    use crate::instructions::Mnemonic;

    #[test]
    fn case_and_padding_are_display_only() {
        let i = encoder::i_type(Mnemonic::Addi, 2, 2, -32).unwrap();
        assert_eq!(i.disassemble(), "ADDI x2, x2, -32");
        let cfg = CodecConfig::default()
            .with_case(MnemonicCase::Lower)
            .with_padding(Some(6));
        assert_eq!(fmt_instruction(&i, &cfg), "addi   x2, x2, -32");
    }

    #[test]
    fn memory_operands() {
        let lw = encoder::i_type(Mnemonic::Lw, 5, 2, -4).unwrap();
        assert_eq!(lw.disassemble(), "LW x5, -4(x2)");
        let sb = encoder::s_type(Mnemonic::Sb, 8, 9, 3).unwrap();
        assert_eq!(sb.disassemble(), "SB x9, 3(x8)");
    }

    #[test]
    fn signedness_by_class() {
        let andi = encoder::i_type(Mnemonic::Andi, 1, 1, -1).unwrap();
        assert_eq!(andi.disassemble(), "ANDI x1, x1, 4095");
        let lui = encoder::u_type(Mnemonic::Lui, 1, -4096).unwrap();
        assert_eq!(lui.disassemble(), "LUI x1, 4294963200");
        let bne = encoder::b_type(Mnemonic::Bne, 1, 2, -8).unwrap();
        assert_eq!(bne.disassemble(), "BNE x1, x2, -8");
    }
}
