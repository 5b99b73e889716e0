use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::OptionError;
use crate::word::Endian;

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisasmFlags: u8 {
const UPPERCASE = 1 << 0; // mnemonics in upper case
const PAD_MNEMONIC = 1 << 1; // left-justify mnemonics to `pad` columns
}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MnemonicCase {
    Upper,
    Lower,
}

impl FromStr for MnemonicCase {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "upper" => Ok(MnemonicCase::Upper),
            "lower" => Ok(MnemonicCase::Lower),
            _ => Err(OptionError::InvalidCase(s.to_string())),
        }
    }
}

/// Presentation options. None of these change an encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub endian: Endian,
    pub flags: DisasmFlags,
    pub pad: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            endian: Endian::Big,
            flags: DisasmFlags::UPPERCASE,
            pad: 6,
        }
    }
}

impl CodecConfig {
    pub fn with_case(mut self, case: MnemonicCase) -> Self {
        self.flags.set(DisasmFlags::UPPERCASE, case == MnemonicCase::Upper);
        self
    }

    pub fn with_padding(mut self, pad: Option<usize>) -> Self {
        self.flags.set(DisasmFlags::PAD_MNEMONIC, pad.is_some());
        if let Some(p) = pad {
            self.pad = p;
        }
        self
    }

    pub fn case(&self) -> MnemonicCase {
        if self.flags.contains(DisasmFlags::UPPERCASE) {
            MnemonicCase::Upper
        } else {
            MnemonicCase::Lower
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: CodecConfig = serde_json::from_str(r#"{ "endian": "little" }"#).unwrap();
        assert_eq!(cfg.endian, Endian::Little);
        assert_eq!(cfg.flags, DisasmFlags::UPPERCASE);
    }

    #[test]
    fn builders_toggle_flags() {
        let cfg = CodecConfig::default()
            .with_case(MnemonicCase::Lower)
            .with_padding(Some(8));
        assert_eq!(cfg.case(), MnemonicCase::Lower);
        assert!(cfg.flags.contains(DisasmFlags::PAD_MNEMONIC));
        assert_eq!(cfg.pad, 8);
        assert_eq!("Upper".parse::<MnemonicCase>(), Ok(MnemonicCase::Upper));
        assert!("title".parse::<MnemonicCase>().is_err());
    }
}
