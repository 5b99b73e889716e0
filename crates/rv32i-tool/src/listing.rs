use serde::Serialize;

use rv32i_codec::{CodecConfig, CodecError, Decoder, Instruction, Rv32iDecoder};

use crate::model::Image;

#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub addr: u32,
    pub hex: String,
    pub binary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<Instruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Decode every word of `img`. Undecodable words keep their error in the row.
pub fn rows(img: &Image, cfg: &CodecConfig) -> Vec<Row> {
    let dec = Rv32iDecoder::new();
    img.iter()
        .map(|(addr, word)| {
            let decoded = dec.decode(word);
            Row {
                addr,
                hex: word.to_hex(cfg.endian),
                binary: word.to_binary(cfg.endian),
                asm: decoded.as_ref().ok().map(|i| i.disassemble_with(cfg)),
                instruction: decoded.as_ref().ok().copied(),
                error: decoded.err().map(|e| e.to_string()),
            }
        })
        .collect()
}

/// Like [`rows`], but stops at the first word that is not RV32I.
pub fn strict_rows(img: &Image, cfg: &CodecConfig) -> Result<Vec<Row>, (u32, CodecError)> {
    let dec = Rv32iDecoder::new();
    for (addr, word) in img.iter() {
        dec.decode(word).map_err(|e| (addr, e))?;
    }
    Ok(rows(img, cfg))
}

pub fn render_text(rows: &[Row], show_binary: bool) -> String {
    let mut out = String::new();
    for r in rows {
        let text = match (&r.asm, &r.error) {
            (Some(asm), _) => asm.clone(),
            (None, Some(e)) => format!("<{e}>"),
            (None, None) => String::new(),
        };
        if show_binary {
            out.push_str(&format!("{:#010x}: {} {}  {}\n", r.addr, r.hex, r.binary, text));
        } else {
            out.push_str(&format!("{:#010x}: {}  {}\n", r.addr, r.hex, text));
        }
    }
    out
}
