use rv32i_codec::{CodecConfig, Decoder, Endian, MnemonicCase, Rv32iDecoder};

#[test]
fn disasm_each_format() {
    let dec = Rv32iDecoder::new();
    let cases = [
        (0x0011_01b3u32, "ADD x3, x2, x1"),
        (0x4031_5093, "SRAI x1, x2, 3"),
        (0x0ff2_4193, "XORI x3, x4, 255"),
        (0xffc1_2283, "LW x5, -4(x2)"),
        (0xfe51_2e23, "SW x5, -4(x2)"),
        (0xfe20_8ee3, "BEQ x1, x2, -4"),
        (0x1234_52b7, "LUI x5, 305418240"),
        (0x3810_50ef, "JAL x1, 23424"),
        (0x0001_00e7, "JALR x1, x2, 0"),
    ];
    for (raw, want) in cases {
        let d = dec.decode(raw.into()).unwrap();
        assert_eq!(d.disassemble(), want);
    }
}

#[test]
fn display_options_do_not_touch_the_word() {
    let dec = Rv32iDecoder::new();
    let d = dec.decode_hex("fe010113", Endian::Big).unwrap();
    let cfg = CodecConfig { endian: Endian::Little, ..CodecConfig::default() }
        .with_case(MnemonicCase::Lower)
        .with_padding(Some(8));
    assert_eq!(d.disassemble_with(&cfg), "addi     x2, x2, -32");
    assert_eq!(d.encode().to_hex(cfg.endian), "130101fe");
    assert_eq!(d.encode().to_hex(Endian::Big), "fe010113");
    assert_eq!(d.to_string(), "ADDI x2, x2, -32");
}
