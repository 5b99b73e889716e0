use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use rv32i_codec::{
    parse_instruction, CodecConfig, Decoder, Endian, Instruction, MnemonicCase, Rv32iDecoder,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Encode or decode a single RV32I instruction"
)]
struct Opts {
    /// Byte order of hex/binary text: big or little
    #[arg(long, default_value_t = Endian::Big)]
    endian: Endian,
    /// Print mnemonics in lower case
    #[arg(long)]
    lower: bool,
    /// Emit a JSON record instead of text
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble one line, e.g. "addi x5, x0, 10"
    Asm { line: String },
    /// Disassemble one hex (8 digits) or binary (32 digits) word
    Disasm { word: String },
}

#[derive(Serialize)]
struct Record<'a> {
    assembly: String,
    hex: String,
    binary: String,
    instruction: &'a Instruction,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let case = if opts.lower { MnemonicCase::Lower } else { MnemonicCase::Upper };
    let cfg = CodecConfig { endian: opts.endian, ..CodecConfig::default() }.with_case(case);

    let inst = match &opts.cmd {
        Command::Asm { line } => parse_instruction(line)?,
        Command::Disasm { word } => Rv32iDecoder::new().decode_str(word, cfg.endian)?,
    };
    let word = inst.encode();
    let rec = Record {
        assembly: inst.disassemble_with(&cfg),
        hex: word.to_hex(cfg.endian),
        binary: word.to_binary(cfg.endian),
        instruction: &inst,
    };

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&rec)?);
    } else {
        println!("{}", rec.assembly);
        println!("{}", rec.hex);
        println!("{}", rec.binary);
    }
    Ok(())
}
