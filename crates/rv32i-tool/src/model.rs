use anyhow::{Context, Result};
use std::path::Path;

use rv32i_codec::{Endian, InstructionWord};

/// A contiguous run of instruction words loaded at `base`.
#[derive(Debug, Clone)]
pub struct Image {
    pub base: u32,
    pub words: Vec<InstructionWord>,
}

impl Image {
    pub fn end(&self) -> u32 {
        self.base.wrapping_add(4 * self.words.len() as u32)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, InstructionWord)> + '_ {
        self.words
            .iter()
            .enumerate()
            .map(|(i, w)| (self.base.wrapping_add(4 * i as u32), *w))
    }
}

/// Raw binary of little-endian 32-bit words, as an instruction memory holds them.
pub fn load_raw_bin(path: &Path, base: u32, skip: usize, len: Option<usize>) -> Result<Image> {
    let file = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    anyhow::ensure!(skip <= file.len(), "--skip exceeds file size");
    let mut payload = &file[skip..];
    if let Some(lim) = len {
        anyhow::ensure!(lim <= payload.len(), "--len exceeds remaining file size after skip");
        payload = &payload[..lim];
    }
    anyhow::ensure!(payload.len() % 4 == 0, "image size {} is not a multiple of 4 bytes", payload.len());
    let words = payload
        .chunks_exact(4)
        .map(|c| InstructionWord(u32::from_le_bytes([c[0], c[1], c[2], c[3]])))
        .collect();
    Ok(Image { base, words })
}

/// Text image: one hex or binary word per line; `#`/`;` start a comment.
pub fn parse_text_image(text: &str, base: u32, endian: Endian) -> Result<Image> {
    let mut words = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let s = line.split(['#', ';']).next().unwrap_or("").trim();
        if s.is_empty() {
            continue;
        }
        let w = InstructionWord::parse(s, endian).with_context(|| format!("line {}", i + 1))?;
        words.push(w);
    }
    Ok(Image { base, words })
}

pub fn load_text_image(path: &Path, base: u32, endian: Endian) -> Result<Image> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_text_image(&text, base, endian)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_maps_skip_and_len() {
        let path = std::env::temp_dir().join("_rv32i_tool_test.bin");
        std::fs::write(&path, [0xffu8, 0xff, 0x13, 0x00, 0x00, 0x00, 0x93, 0x02]).unwrap();
        let img = load_raw_bin(&path, 0x1000_0000, 2, Some(4)).unwrap();
        assert_eq!(img.words, vec![InstructionWord(0x0000_0013)]);
        assert_eq!(img.end(), 0x1000_0004);
        assert!(load_raw_bin(&path, 0, 1, None).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn text_image_skips_comments_and_reports_lines() {
        let img = parse_text_image("# boot\n00a00293\n0x00000013 ; nop\n\n", 0x100, Endian::Big).unwrap();
        assert_eq!(img.words.len(), 2);
        assert_eq!(img.end(), 0x108);
        let addrs: Vec<u32> = img.iter().map(|(a, _)| a).collect();
        assert_eq!(addrs, vec![0x100, 0x104]);

        let err = parse_text_image("00000013\n1234\n", 0, Endian::Big).unwrap_err();
        assert!(format!("{err:#}").starts_with("line 2"));
    }
}
