use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use rv32i_codec::{Endian, MnemonicCase};
use rv32i_tool::{load_config, load_raw_bin, load_text_image, render_text, rows, strict_rows};

#[derive(Parser, Debug)]
#[command(author, version, about = "RV32I disassembler CLI", long_about = None)]
struct Cli {
    /// Input image: one hex/binary word per line, or raw bytes with --raw
    #[arg(value_name = "IMAGE")]
    input: PathBuf,
    /// Treat the input as a raw little-endian binary
    #[arg(long)]
    raw: bool,
    /// Load address of the first word
    #[arg(long, default_value_t = 0u32, value_parser = parse_u32)]
    base: u32,
    /// Skip N bytes at start of a raw file
    #[arg(long, default_value_t = 0usize)]
    skip: usize,
    /// Limit bytes loaded from a raw file (default: to EOF after --skip)
    #[arg(long)]
    len: Option<usize>,
    /// JSON display configuration (endian, flags, pad)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Byte order of word text, overrides the config file
    #[arg(long)]
    endian: Option<Endian>,
    /// Lower-case mnemonics
    #[arg(long)]
    lower: bool,
    /// Pad mnemonics to N columns
    #[arg(long, value_name = "N")]
    pad: Option<usize>,
    /// Show the binary rendering next to the hex
    #[arg(long)]
    show_binary: bool,
    /// Fail on the first word that is not RV32I
    #[arg(long)]
    strict: bool,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write output to file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_u32(s: &str) -> Result<u32> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u32::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u32>()?)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut cfg = load_config(cli.config.as_deref())?;
    if let Some(e) = cli.endian {
        cfg.endian = e;
    }
    if cli.lower {
        cfg = cfg.with_case(MnemonicCase::Lower);
    }
    if cli.pad.is_some() {
        cfg = cfg.with_padding(cli.pad);
    }

    let img = if cli.raw {
        load_raw_bin(&cli.input, cli.base, cli.skip, cli.len)?
    } else {
        load_text_image(&cli.input, cli.base, cfg.endian)?
    };
    tracing::debug!(words = img.words.len(), base = img.base, end = img.end(), "image loaded");

    let rows = if cli.strict {
        strict_rows(&img, &cfg).map_err(|(addr, e)| anyhow!("{addr:#010x}: {e}"))?
    } else {
        rows(&img, &cfg)
    };
    let text = match cli.format {
        OutputFormat::Text => render_text(&rows, cli.show_binary),
        OutputFormat::Json => serde_json::to_string_pretty(&rows)? + "\n",
    };

    match cli.out {
        Some(path) => std::fs::write(path, text)?,
        None => print!("{text}"),
    }
    Ok(())
}
