use proptest::prelude::*;

use rv32i_codec::encoder::{self, Operands};
use rv32i_codec::{parse_instruction, Decoder, Endian, Format, InstructionWord, Mnemonic, Rv32iDecoder};

fn any_mnemonic() -> impl Strategy<Value = Mnemonic> {
    prop::sample::select(Mnemonic::all().collect::<Vec<_>>())
}

fn any_operands() -> impl Strategy<Value = Operands> {
    (any::<u32>(), any::<u32>(), any::<u32>(), any::<i32>())
        .prop_map(|(rd, rs1, rs2, imm)| Operands { rd, rs1, rs2, imm })
}

proptest! {
    #[test]
    fn decode_inverts_encode(m in any_mnemonic(), ops in any_operands()) {
        let dec = Rv32iDecoder::new();
        let inst = encoder::build(m, ops);
        let back = dec.decode(inst.encode()).unwrap();
        prop_assert_eq!(back, inst);
    }

    #[test]
    fn disassembly_reparses(m in any_mnemonic(), ops in any_operands()) {
        let inst = encoder::build(m, ops);
        let text = inst.disassemble();
        prop_assert_eq!(parse_instruction(&text).unwrap(), inst);
    }

    #[test]
    fn renderings_are_fixed_width_and_lossless(raw in any::<u32>(), little in any::<bool>()) {
        let endian = if little { Endian::Little } else { Endian::Big };
        let w = InstructionWord(raw);
        let hex = w.to_hex(endian);
        let bin = w.to_binary(endian);
        prop_assert_eq!(hex.len(), 8);
        prop_assert_eq!(bin.len(), 32);
        prop_assert_eq!(InstructionWord::from_hex(&hex, endian).unwrap(), w);
        prop_assert_eq!(InstructionWord::from_binary(&bin, endian).unwrap(), w);
    }

    #[test]
    fn decoded_words_reencode_bit_exact(raw in any::<u32>()) {
        let dec = Rv32iDecoder::new();
        if let Ok(inst) = dec.decode(InstructionWord(raw)) {
            prop_assert_eq!(inst.encode().bits(), raw);
        }
    }

    #[test]
    fn branch_and_jump_targets_are_even(rs1 in 0u32..32, rs2 in 0u32..32, imm in any::<i32>()) {
        let dec = Rv32iDecoder::new();
        let b = encoder::b_type(Mnemonic::Bge, rs1, rs2, imm).unwrap();
        let j = encoder::j_type(Mnemonic::Jal, rs1, imm).unwrap();
        for inst in [b, j] {
            let back = dec.decode(inst.encode()).unwrap();
            prop_assert_eq!(back.imm() & 1, 0);
            let width = if inst.format() == Format::B { 13 } else { 21 };
            let expected = ((imm & !1) << (32 - width)) >> (32 - width);
            prop_assert_eq!(back.imm(), expected);
        }
    }

    #[test]
    fn twelve_bit_signed_values_round_trip(imm in -2048i32..=2047) {
        let dec = Rv32iDecoder::new();
        let addi = encoder::i_type(Mnemonic::Addi, 1, 2, imm).unwrap();
        prop_assert_eq!(dec.decode(addi.encode()).unwrap().imm(), imm);
        let sw = encoder::s_type(Mnemonic::Sw, 2, 1, imm).unwrap();
        prop_assert_eq!(dec.decode(sw.encode()).unwrap().imm(), imm);
    }
}
