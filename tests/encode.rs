use rv32i_codec::encoder::{self, Operands};
use rv32i_codec::{Endian, Mnemonic};

#[test]
fn jal_packs_scrambled_offset() {
    let jal = encoder::j_type(Mnemonic::Jal, 1, 23424).unwrap();
    let w = jal.encode();
    assert_eq!(w.bits(), 0x3810_50ef);
    assert_eq!(w.to_hex(Endian::Big), "381050ef");
    assert_eq!(w.to_hex(Endian::Little), "ef501038");
    assert_eq!(w.to_binary(Endian::Big).len(), 32);
}

#[test]
fn r_type_layout() {
    let add = encoder::r_type(Mnemonic::Add, 3, 2, 1).unwrap().encode();
    let sub = encoder::r_type(Mnemonic::Sub, 3, 2, 1).unwrap().encode();
    assert_eq!(add.bits(), 0x0011_01b3);
    assert_eq!(sub.bits(), 0x4011_01b3);
    // only funct7 differs
    assert_eq!(add.bits() ^ sub.bits(), 0b010_0000 << 25);
}

#[test]
fn shift_amount_sits_in_rs2_slot() {
    let srai = encoder::shift(Mnemonic::Srai, 1, 2, 3).unwrap().encode();
    let srli = encoder::shift(Mnemonic::Srli, 1, 2, 3).unwrap().encode();
    let slli = encoder::shift(Mnemonic::Slli, 1, 2, 31).unwrap().encode();
    assert_eq!(srai.bits(), 0x4031_5093);
    assert_eq!(srli.bits(), 0x0031_5093);
    assert_eq!(slli.bits(), 0x01f1_1093);
}

#[test]
fn i_and_load_layouts() {
    let cases = [
        (Mnemonic::Addi, 1, 1, -2048, 0x8000_8093u32),
        (Mnemonic::Addi, 1, 1, 2047, 0x7ff0_8093),
        (Mnemonic::Addi, 1, 0, -1, 0xfff0_0093),
        (Mnemonic::Andi, 1, 1, 4095, 0xfff0_f093),
        (Mnemonic::Xori, 3, 4, 255, 0x0ff2_4193),
        (Mnemonic::Lw, 5, 2, -4, 0xffc1_2283),
        (Mnemonic::Lbu, 1, 3, 2047, 0x7ff1_c083),
        (Mnemonic::Jalr, 1, 2, 0, 0x0001_00e7),
    ];
    for (m, rd, rs1, imm, want) in cases {
        let got = encoder::i_type(m, rd, rs1, imm).unwrap().encode().bits();
        assert_eq!(got, want, "{m} x{rd}, x{rs1}, {imm}");
    }
}

#[test]
fn store_branch_upper_layouts() {
    assert_eq!(encoder::s_type(Mnemonic::Sb, 8, 9, 3).unwrap().encode().bits(), 0x0094_01a3);
    assert_eq!(encoder::b_type(Mnemonic::Beq, 1, 2, -4).unwrap().encode().bits(), 0xfe20_8ee3);
    assert_eq!(encoder::b_type(Mnemonic::Bgeu, 5, 6, 4094).unwrap().encode().bits(), 0x7e62_ffe3);
    assert_eq!(encoder::b_type(Mnemonic::Blt, 5, 6, -4096).unwrap().encode().bits(), 0x8062_c063);
    assert_eq!(encoder::u_type(Mnemonic::Lui, 5, 0x1234_5000).unwrap().encode().bits(), 0x1234_52b7);
    assert_eq!(encoder::u_type(Mnemonic::Auipc, 1, 4096).unwrap().encode().bits(), 0x0000_1097);
    assert_eq!(encoder::j_type(Mnemonic::Jal, 0, -1_048_576).unwrap().encode().bits(), 0x8000_006f);
    assert_eq!(encoder::j_type(Mnemonic::Jal, 0, 1_048_574).unwrap().encode().bits(), 0x7fff_f06f);
}

#[test]
fn out_of_range_operands_are_masked() {
    // x33 wraps to x1, 0x1_0005 truncates to 5
    let a = encoder::i_type(Mnemonic::Addi, 33, 0, 0x1_0005).unwrap();
    let b = encoder::i_type(Mnemonic::Addi, 1, 0, 5).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.encode(), b.encode());
}

#[test]
fn odd_branch_offsets_lose_bit_zero() {
    let odd = encoder::b_type(Mnemonic::Bne, 1, 2, 9).unwrap();
    let even = encoder::b_type(Mnemonic::Bne, 1, 2, 8).unwrap();
    assert_eq!(odd.encode(), even.encode());
    let jal = encoder::j_type(Mnemonic::Jal, 1, 23423).unwrap();
    assert_eq!(jal.imm(), 23422);
}

#[test]
fn build_ignores_unused_operands() {
    let ops = Operands { rd: 7, rs1: 3, rs2: 4, imm: 4096 };
    let lui = encoder::build(Mnemonic::Lui, ops);
    assert_eq!((lui.rd(), lui.rs1(), lui.rs2(), lui.imm()), (7, 0, 0, 4096));
}
