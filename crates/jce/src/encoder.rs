//! Wire-level JCE encoder.
//!
//! Integers take the narrowest type code that holds them: `0` is a bare
//! `Zero` header, then Byte, Short, Int and Long in turn. Floats are never
//! narrowed.

use jce_buffers::Writer;

use crate::charset::Charset;
use crate::config::JceConfig;
use crate::constants::WireType;
use crate::error::JceError;
use crate::head::write_head;

/// Writes tagged primitives, strings and byte buffers into a [`Writer`].
pub struct JceEncoder {
    pub writer: Writer,
    pub config: JceConfig,
}

impl Default for JceEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JceEncoder {
    pub fn new() -> Self {
        Self::with_config(JceConfig::default())
    }

    pub fn with_config(config: JceConfig) -> Self {
        Self {
            writer: Writer::with_alloc_size(256),
            config,
        }
    }

    /// Returns everything written since the last flush.
    pub fn flush(&mut self) -> Vec<u8> {
        self.writer.flush()
    }

    #[inline]
    pub fn write_head(&mut self, tag: u32, wire_type: WireType) -> Result<(), JceError> {
        write_head(&mut self.writer, tag, wire_type)
    }

    pub fn write_bool(&mut self, value: bool, tag: u32) -> Result<(), JceError> {
        self.write_i8(i8::from(value), tag)
    }

    pub fn write_i8(&mut self, value: i8, tag: u32) -> Result<(), JceError> {
        if value == 0 {
            return self.write_head(tag, WireType::Zero);
        }
        self.write_head(tag, WireType::Byte)?;
        self.writer.i8(value);
        Ok(())
    }

    pub fn write_i16(&mut self, value: i16, tag: u32) -> Result<(), JceError> {
        if let Ok(narrow) = i8::try_from(value) {
            return self.write_i8(narrow, tag);
        }
        self.write_head(tag, WireType::Short)?;
        self.writer.i16(value, self.config.integer_order);
        Ok(())
    }

    pub fn write_i32(&mut self, value: i32, tag: u32) -> Result<(), JceError> {
        if let Ok(narrow) = i16::try_from(value) {
            return self.write_i16(narrow, tag);
        }
        self.write_head(tag, WireType::Int)?;
        self.writer.i32(value, self.config.integer_order);
        Ok(())
    }

    pub fn write_i64(&mut self, value: i64, tag: u32) -> Result<(), JceError> {
        if let Ok(narrow) = i32::try_from(value) {
            return self.write_i32(narrow, tag);
        }
        self.write_head(tag, WireType::Long)?;
        self.writer.i64(value, self.config.integer_order);
        Ok(())
    }

    pub fn write_f32(&mut self, value: f32, tag: u32) -> Result<(), JceError> {
        self.write_head(tag, WireType::Float)?;
        self.writer.f32(value, self.config.float_order);
        Ok(())
    }

    pub fn write_f64(&mut self, value: f64, tag: u32) -> Result<(), JceError> {
        self.write_head(tag, WireType::Double)?;
        self.writer.f64(value, self.config.float_order);
        Ok(())
    }

    /// Writes text in the configured charset.
    pub fn write_str(&mut self, value: &str, tag: u32) -> Result<(), JceError> {
        self.write_str_in(value, tag, self.config.charset)
    }

    /// Writes text as `String1` when it encodes to at most 255 bytes,
    /// `String4` otherwise.
    pub fn write_str_in(&mut self, value: &str, tag: u32, charset: Charset) -> Result<(), JceError> {
        let bytes = charset.encode(value)?;
        let len = bytes.len();
        if len > self.config.max_string_len {
            return Err(JceError::OversizedString(len));
        }
        match u8::try_from(len) {
            Ok(short_len) => {
                self.write_head(tag, WireType::String1)?;
                self.writer.u8(short_len);
            }
            Err(_) => {
                let long_len = u32::try_from(len).map_err(|_| JceError::OversizedString(len))?;
                self.write_head(tag, WireType::String4)?;
                self.writer.u32(long_len, self.config.integer_order);
            }
        }
        self.writer.buf(&bytes);
        Ok(())
    }

    /// Writes a raw byte buffer as a `SimpleList`.
    pub fn write_bytes(&mut self, value: &[u8], tag: u32) -> Result<(), JceError> {
        let len = value.len();
        if len > self.config.max_string_len {
            return Err(JceError::OversizedBuffer(len));
        }
        let count = i32::try_from(len).map_err(|_| JceError::OversizedBuffer(len))?;
        self.write_head(tag, WireType::SimpleList)?;
        self.write_head(0, WireType::Byte)?;
        self.write_i32(count, 0)?;
        self.writer.buf(value);
        Ok(())
    }

    /// Writes a `List` header and element count; the caller writes the
    /// elements at tag 0.
    pub fn write_list_header(&mut self, len: usize, tag: u32) -> Result<(), JceError> {
        let count = i32::try_from(len).map_err(|_| JceError::InvalidLength(len as i64))?;
        self.write_head(tag, WireType::List)?;
        self.write_i32(count, 0)
    }

    /// Writes a `Map` header and entry count; the caller writes each entry
    /// as key at tag 0 and value at tag 1.
    pub fn write_map_header(&mut self, len: usize, tag: u32) -> Result<(), JceError> {
        let count = i32::try_from(len).map_err(|_| JceError::InvalidLength(len as i64))?;
        self.write_head(tag, WireType::Map)?;
        self.write_i32(count, 0)
    }

    pub fn write_struct_begin(&mut self, tag: u32) -> Result<(), JceError> {
        self.write_head(tag, WireType::StructBegin)
    }

    pub fn write_struct_end(&mut self) -> Result<(), JceError> {
        self.write_head(0, WireType::StructEnd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jce_buffers::ByteOrder;

    fn encoded(f: impl FnOnce(&mut JceEncoder) -> Result<(), JceError>) -> Vec<u8> {
        let mut encoder = JceEncoder::new();
        f(&mut encoder).unwrap();
        encoder.flush()
    }

    #[test]
    fn zero_is_header_only() {
        assert_eq!(encoded(|e| e.write_i8(0, 1)), [0x1c]);
        assert_eq!(encoded(|e| e.write_i16(0, 1)), [0x1c]);
        assert_eq!(encoded(|e| e.write_i32(0, 1)), [0x1c]);
        assert_eq!(encoded(|e| e.write_i64(0, 1)), [0x1c]);
        assert_eq!(encoded(|e| e.write_i64(0, 20)), [0xfc, 20]);
        assert_eq!(encoded(|e| e.write_bool(false, 0)), [0x0c]);
    }

    #[test]
    fn cascade_boundaries() {
        assert_eq!(encoded(|e| e.write_i64(127, 0)), [0x00, 0x7f]);
        assert_eq!(encoded(|e| e.write_i64(-128, 0)), [0x00, 0x80]);
        assert_eq!(encoded(|e| e.write_i64(128, 0)), [0x01, 0x00, 0x80]);
        assert_eq!(encoded(|e| e.write_i64(-129, 0)), [0x01, 0xff, 0x7f]);
        assert_eq!(encoded(|e| e.write_i64(32767, 0)), [0x01, 0x7f, 0xff]);
        assert_eq!(
            encoded(|e| e.write_i64(32768, 0)),
            [0x02, 0x00, 0x00, 0x80, 0x00]
        );
        assert_eq!(
            encoded(|e| e.write_i64(i64::from(i32::MAX), 0)),
            [0x02, 0x7f, 0xff, 0xff, 0xff]
        );
        assert_eq!(
            encoded(|e| e.write_i64(i64::from(i32::MAX) + 1, 0)),
            [0x03, 0, 0, 0, 0, 0x80, 0, 0, 0]
        );
    }

    #[test]
    fn bool_true_is_byte_one() {
        assert_eq!(encoded(|e| e.write_bool(true, 2)), [0x20, 0x01]);
    }

    #[test]
    fn floats_keep_full_width() {
        assert_eq!(encoded(|e| e.write_f32(0.0, 0)), [0x04, 0, 0, 0, 0]);
        assert_eq!(
            encoded(|e| e.write_f64(1.0, 0)),
            [0x05, 0x3f, 0xf0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn little_endian_integers() {
        let mut encoder =
            JceEncoder::with_config(JceConfig::default().with_byte_order(ByteOrder::LittleEndian));
        encoder.write_i32(8080, 2).unwrap();
        assert_eq!(encoder.flush(), [0x21, 0x90, 0x1f]);
    }

    #[test]
    fn string_width_selection() {
        let short = "x".repeat(255);
        let bytes = encoded(|e| e.write_str(&short, 0));
        assert_eq!(&bytes[..2], [0x06, 0xff]);
        assert_eq!(bytes.len(), 2 + 255);

        let long = "x".repeat(256);
        let bytes = encoded(|e| e.write_str(&long, 0));
        assert_eq!(&bytes[..5], [0x07, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(bytes.len(), 5 + 256);
    }

    #[test]
    fn string_length_counts_encoded_bytes() {
        // 86 CJK characters are 172 bytes in GBK but 258 in UTF-8.
        let text = "中".repeat(86);
        let gbk = encoded(|e| e.write_str_in(&text, 0, Charset::Gbk));
        assert_eq!(gbk[0], 0x06);
        let utf8 = encoded(|e| e.write_str_in(&text, 0, Charset::Utf8));
        assert_eq!(utf8[0], 0x07);
    }

    #[test]
    fn oversized_string_rejected() {
        let mut encoder =
            JceEncoder::with_config(JceConfig::default().with_max_string_len(4));
        assert_eq!(
            encoder.write_str("hello", 0),
            Err(JceError::OversizedString(5))
        );
        assert_eq!(
            encoder.write_bytes(&[0; 5], 0),
            Err(JceError::OversizedBuffer(5))
        );
    }

    #[test]
    fn simple_list_layout() {
        assert_eq!(
            encoded(|e| e.write_bytes(&[0xde, 0xad], 3)),
            [0x3d, 0x00, 0x00, 0x02, 0xde, 0xad]
        );
        assert_eq!(encoded(|e| e.write_bytes(&[], 0)), [0x0d, 0x00, 0x0c]);
    }

    #[test]
    fn struct_markers() {
        assert_eq!(
            encoded(|e| {
                e.write_struct_begin(1)?;
                e.write_i32(5, 0)?;
                e.write_struct_end()
            }),
            [0x1a, 0x00, 0x05, 0x0b]
        );
    }
}
