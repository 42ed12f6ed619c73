//! Text charsets for string fields.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use encoding_rs::GBK;

use crate::error::JceError;

/// Character set used to turn string fields into bytes and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Charset {
    Utf8,
    #[default]
    Gbk,
}

impl Charset {
    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Gbk => "GBK",
        }
    }

    /// Encodes `text`, failing if a character has no mapping in this charset.
    pub fn encode(self, text: &str) -> Result<Cow<'_, [u8]>, JceError> {
        match self {
            Charset::Utf8 => Ok(Cow::Borrowed(text.as_bytes())),
            Charset::Gbk => {
                let (bytes, _, had_errors) = GBK.encode(text);
                if had_errors {
                    return Err(JceError::UnmappableText { charset: self });
                }
                Ok(bytes)
            }
        }
    }

    /// Decodes `bytes` without replacement characters.
    pub fn decode(self, bytes: &[u8]) -> Result<String, JceError> {
        match self {
            Charset::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|_| JceError::InvalidText { charset: self }),
            Charset::Gbk => GBK
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(Cow::into_owned)
                .ok_or(JceError::InvalidText { charset: self }),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Charset::Utf8),
            "gbk" => Ok(Charset::Gbk),
            other => Err(format!("unknown charset: {other}")),
        }
    }
}
