//! JCE error taxonomy.

use jce_buffers::BufferError;

use crate::charset::Charset;
use crate::constants::WireType;

/// Problems with a field header itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    #[error("tag {0} exceeds 255")]
    TagOutOfRange(u32),
    #[error("header truncated after the extended-tag marker")]
    Truncated,
    #[error("unknown wire type code {0}")]
    UnknownWireType(u8),
    #[error("expected a byte element header at tag 0, found {wire_type} at tag {tag}")]
    BadSimpleListElement { tag: u32, wire_type: WireType },
}

/// Error returned by every encode and decode operation.
///
/// All variants are fatal for the record being processed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JceError {
    #[error("malformed header: {0}")]
    MalformedHeader(#[from] HeaderError),
    #[error("buffer truncated: needed {needed} bytes, {remaining} remaining")]
    TruncatedBuffer { needed: usize, remaining: usize },
    #[error("tag {tag}: expected {expected}, found wire type {found}")]
    TypeMismatch {
        tag: u32,
        expected: &'static str,
        found: WireType,
    },
    #[error("tag {tag}: value does not fit field type {expected}")]
    ValueMismatch { tag: u32, expected: &'static str },
    #[error("string of {0} bytes exceeds the length limit")]
    OversizedString(usize),
    #[error("byte buffer of {0} bytes exceeds the length limit")]
    OversizedBuffer(usize),
    #[error("invalid length or element count: {0}")]
    InvalidLength(i64),
    #[error("required field {0} is missing")]
    MissingRequiredField(u32),
    #[error("input ended before struct end marker")]
    UnterminatedStruct,
    #[error("nesting deeper than {0} levels")]
    NestingTooDeep(usize),
    #[error("field {tag} supplied after field {previous}")]
    TagOrder { previous: u32, tag: u32 },
    #[error("field {0} supplied more than once")]
    DuplicateField(u32),
    #[error("field {0} is not declared by the schema")]
    UnknownField(u32),
    #[error("text is not valid {charset}")]
    InvalidText { charset: Charset },
    #[error("text cannot be represented in {charset}")]
    UnmappableText { charset: Charset },
}

impl From<BufferError> for JceError {
    fn from(err: BufferError) -> Self {
        let BufferError::EndOfBuffer { needed, remaining } = err;
        JceError::TruncatedBuffer { needed, remaining }
    }
}

pub type Result<T, E = JceError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use jce_buffers::Reader;

    #[test]
    fn reader_overrun_is_truncation() {
        let mut reader = Reader::new(&[0x00, 0x01]);
        let err: JceError = reader.buf(5).unwrap_err().into();
        assert_eq!(
            err,
            JceError::TruncatedBuffer {
                needed: 5,
                remaining: 2
            }
        );
    }
}
