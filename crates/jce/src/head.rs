//! Field header codec: the `(tag, wire type)` pair in front of every value.
//!
//! Tags below 15 share one byte with the type code (`tag << 4 | code`).
//! Tags 15..=255 use the escape nibble `0xF` followed by a byte holding the
//! tag.

use jce_buffers::{Reader, Writer};

use crate::constants::{WireType, MAX_TAG, SHORT_TAG_LIMIT};
use crate::error::{HeaderError, JceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHeader {
    pub tag: u32,
    pub wire_type: WireType,
}

impl TagHeader {
    pub fn new(tag: u32, wire_type: WireType) -> Self {
        Self { tag, wire_type }
    }

    /// Encoded size in bytes.
    pub fn encoded_len(&self) -> usize {
        if self.tag < SHORT_TAG_LIMIT {
            1
        } else {
            2
        }
    }
}

pub fn write_head(writer: &mut Writer, tag: u32, wire_type: WireType) -> Result<(), JceError> {
    if tag < SHORT_TAG_LIMIT {
        writer.u8(((tag as u8) << 4) | wire_type.code());
        return Ok(());
    }
    if tag <= MAX_TAG {
        writer.u8(0xf0 | wire_type.code());
        writer.u8(tag as u8);
        return Ok(());
    }
    Err(HeaderError::TagOutOfRange(tag).into())
}

/// Reads the next header, or `None` when the input is exhausted.
pub fn read_head(reader: &mut Reader<'_>) -> Result<Option<TagHeader>, JceError> {
    if reader.is_at_end() {
        return Ok(None);
    }
    let first = reader.u8()?;
    let code = first & 0x0f;
    let wire_type = WireType::from_code(code).ok_or(HeaderError::UnknownWireType(code))?;
    let mut tag = u32::from(first >> 4);
    if tag == SHORT_TAG_LIMIT {
        tag = u32::from(reader.u8().map_err(|_| HeaderError::Truncated)?);
    }
    Ok(Some(TagHeader { tag, wire_type }))
}

/// Decodes the next header without moving the cursor.
pub fn peek_head(reader: &Reader<'_>) -> Result<Option<TagHeader>, JceError> {
    let mut view = Reader {
        uint8: reader.uint8,
        x: reader.x,
        end: reader.end,
    };
    read_head(&mut view)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(tag: u32, wire_type: WireType) -> Vec<u8> {
        let mut writer = Writer::new();
        write_head(&mut writer, tag, wire_type).unwrap();
        writer.flush()
    }

    #[test]
    fn single_byte_form() {
        assert_eq!(encode(0, WireType::Byte), [0x00]);
        assert_eq!(encode(1, WireType::Zero), [0x1c]);
        assert_eq!(encode(14, WireType::SimpleList), [0xed]);
    }

    #[test]
    fn two_byte_form() {
        assert_eq!(encode(15, WireType::Int), [0xf2, 0x0f]);
        assert_eq!(encode(255, WireType::StructEnd), [0xfb, 0xff]);
    }

    #[test]
    fn tag_over_255_is_rejected() {
        let mut writer = Writer::new();
        assert_eq!(
            write_head(&mut writer, 256, WireType::Byte),
            Err(JceError::MalformedHeader(HeaderError::TagOutOfRange(256)))
        );
        assert!(writer.is_empty());
    }

    #[test]
    fn read_both_forms() {
        let data = [0x9a, 0xfd, 0x7b];
        let mut reader = Reader::new(&data);
        assert_eq!(
            read_head(&mut reader).unwrap(),
            Some(TagHeader::new(9, WireType::StructBegin))
        );
        assert_eq!(
            read_head(&mut reader).unwrap(),
            Some(TagHeader::new(123, WireType::SimpleList))
        );
        assert_eq!(read_head(&mut reader).unwrap(), None);
    }

    #[test]
    fn every_tag_roundtrips() {
        for tag in 0..=MAX_TAG {
            let bytes = encode(tag, WireType::Long);
            let mut reader = Reader::new(&bytes);
            let head = read_head(&mut reader).unwrap().unwrap();
            assert_eq!(head, TagHeader::new(tag, WireType::Long));
            assert_eq!(head.encoded_len(), bytes.len());
        }
    }

    #[test]
    fn truncated_extended_tag() {
        let data = [0xf2];
        let mut reader = Reader::new(&data);
        assert_eq!(
            read_head(&mut reader),
            Err(JceError::MalformedHeader(HeaderError::Truncated))
        );
    }

    #[test]
    fn unknown_code() {
        let data = [0x0e];
        let mut reader = Reader::new(&data);
        assert_eq!(
            read_head(&mut reader),
            Err(JceError::MalformedHeader(HeaderError::UnknownWireType(14)))
        );
    }

    #[test]
    fn peek_does_not_advance() {
        let data = [0x12, 0x00, 0x00, 0x00, 0x01];
        let reader = Reader::new(&data);
        assert_eq!(
            peek_head(&reader).unwrap(),
            Some(TagHeader::new(1, WireType::Int))
        );
        assert_eq!(reader.x, 0);
    }
}
