pub mod listing;
pub mod model;

// Re-export commonly used types/functions for the binaries
pub use listing::{render_text, rows, strict_rows, Row};
pub use model::{load_raw_bin, load_text_image, parse_text_image, Image};

use anyhow::{Context, Result};
use rv32i_codec::CodecConfig;
use std::path::Path;

/// Read a JSON `CodecConfig`, or the default when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<CodecConfig> {
    match path {
        None => Ok(CodecConfig::default()),
        Some(p) => {
            let text = std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", p.display()))
        }
    }
}
