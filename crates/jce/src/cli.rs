//! Core logic of the `jce-dump` binary: argument parsing and JSON rendering.

use jce_buffers::ByteOrder;

use crate::any::decode_any_with;
use crate::charset::Charset;
use crate::config::JceConfig;
use crate::error::JceError;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum CliError {
    Usage(String),
    Hex(hex::FromHexError),
    Jce(JceError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(e) => write!(f, "{e}\n{USAGE}"),
            CliError::Hex(e) => write!(f, "invalid hex input: {e}"),
            CliError::Jce(e) => write!(f, "{e}"),
            CliError::Json(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<hex::FromHexError> for CliError {
    fn from(e: hex::FromHexError) -> Self {
        CliError::Hex(e)
    }
}

impl From<JceError> for CliError {
    fn from(e: JceError) -> Self {
        CliError::Jce(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

pub const USAGE: &str =
    "usage: jce-dump [--hex] [--charset utf8|gbk] [--little-endian] [--max-depth N]";

// ── Options ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DumpOptions {
    /// Input is hex text rather than raw bytes.
    pub hex: bool,
    pub config: JceConfig,
}

/// Parses arguments, excluding the program name.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<DumpOptions, CliError> {
    let mut options = DumpOptions::default();
    let mut args = args.iter().map(AsRef::as_ref);
    while let Some(arg) = args.next() {
        match arg {
            "--hex" => options.hex = true,
            "--little-endian" => {
                options.config = options.config.with_byte_order(ByteOrder::LittleEndian);
            }
            "--charset" => {
                let name = args
                    .next()
                    .ok_or_else(|| CliError::Usage("--charset needs a value".into()))?;
                let charset: Charset = name.parse().map_err(CliError::Usage)?;
                options.config = options.config.with_charset(charset);
            }
            "--max-depth" => {
                let depth = args
                    .next()
                    .and_then(|n| n.parse().ok())
                    .ok_or_else(|| CliError::Usage("--max-depth needs a number".into()))?;
                options.config = options.config.with_max_depth(depth);
            }
            other => return Err(CliError::Usage(format!("unknown argument: {other}"))),
        }
    }
    Ok(options)
}

// ── jce-dump ──────────────────────────────────────────────────────────────

/// Decodes a payload without a schema and renders it as pretty JSON.
pub fn dump(input: &[u8], options: &DumpOptions) -> Result<String, CliError> {
    let decoded;
    let bytes = if options.hex {
        let digits: Vec<u8> = input
            .iter()
            .copied()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        decoded = hex::decode(digits)?;
        decoded.as_slice()
    } else {
        input
    };
    let record = decode_any_with(bytes, options.config)?;
    let mut json = serde_json::to_string_pretty(&record.to_json())?;
    json.push('\n');
    Ok(json)
}
