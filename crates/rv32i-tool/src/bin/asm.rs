use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use rv32i_codec::{parse_program, Endian};

#[derive(Parser, Debug)]
#[command(author, version, about = "RV32I assembler (one instruction per line, no labels)")]
struct Opts {
    /// Input assembly file
    #[arg(short, long)]
    input: PathBuf,
    /// Output image
    #[arg(short, long)]
    output: PathBuf,
    /// hex: one word per line (e.g. for $readmemh); bin: one binary word per line;
    /// raw: little-endian bytes
    #[arg(long, value_enum, default_value_t = ImageFormat::Hex)]
    format: ImageFormat,
    /// Byte order of hex/bin text output
    #[arg(long, default_value_t = Endian::Big)]
    endian: Endian,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ImageFormat {
    Hex,
    Bin,
    Raw,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let text = fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;
    let program = parse_program(&text).with_context(|| opts.input.display().to_string())?;
    tracing::info!(instructions = program.len(), "assembled");

    let words = program.iter().map(|i| i.encode());
    let bytes = match opts.format {
        ImageFormat::Raw => words.flat_map(|w| w.bits().to_le_bytes()).collect::<Vec<u8>>(),
        ImageFormat::Hex => words
            .map(|w| w.to_hex(opts.endian) + "\n")
            .collect::<String>()
            .into_bytes(),
        ImageFormat::Bin => words
            .map(|w| w.to_binary(opts.endian) + "\n")
            .collect::<String>()
            .into_bytes(),
    };
    fs::write(&opts.output, &bytes)?;
    Ok(())
}
