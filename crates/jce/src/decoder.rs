//! Wire-level JCE decoder.
//!
//! [`JceDecoder`] walks a buffer forward only. Fields are requested by tag in
//! ascending order; [`JceDecoder::skip_to_tag`] discards anything with a
//! lower tag and reports a field as absent once a higher tag, a `StructEnd`
//! or the end of input is reached.
//!
//! Numeric reads accept any narrower wire type than the one requested, and
//! `Zero` for every numeric type.

use jce_buffers::{ByteOrder, Reader};

use crate::charset::Charset;
use crate::config::JceConfig;
use crate::constants::WireType;
use crate::error::{HeaderError, JceError};
use crate::head::{peek_head, read_head, TagHeader};
use crate::skip::{descend, skip_field, skip_to_struct_end};

/// Reads the payload of an integer-typed field, or `None` if `wire_type` is
/// not one.
pub(crate) fn read_integer(
    reader: &mut Reader<'_>,
    wire_type: WireType,
    order: ByteOrder,
) -> Result<Option<i64>, JceError> {
    Ok(Some(match wire_type {
        WireType::Zero => 0,
        WireType::Byte => reader.i8()?.into(),
        WireType::Short => reader.i16(order)?.into(),
        WireType::Int => reader.i32(order)?.into(),
        WireType::Long => reader.i64(order)?,
        _ => return Ok(None),
    }))
}

/// Reads a collection length written as an integer field at tag 0.
///
/// Each of the `count` items occupies at least `min_item_len` bytes, so a
/// count the remaining input cannot hold is rejected before any allocation.
pub(crate) fn read_count(
    reader: &mut Reader<'_>,
    config: &JceConfig,
    min_item_len: usize,
) -> Result<usize, JceError> {
    let head = read_head(reader)?.ok_or(JceError::TruncatedBuffer {
        needed: 1,
        remaining: 0,
    })?;
    if head.tag != 0 {
        return Err(JceError::MissingRequiredField(0));
    }
    let count = read_integer(reader, head.wire_type, config.integer_order)?.ok_or(
        JceError::TypeMismatch {
            tag: 0,
            expected: "count",
            found: head.wire_type,
        },
    )?;
    let count = usize::try_from(count).map_err(|_| JceError::InvalidLength(count))?;
    let needed = count.saturating_mul(min_item_len);
    let remaining = reader.size();
    if needed > remaining {
        return Err(JceError::TruncatedBuffer { needed, remaining });
    }
    Ok(count)
}

fn mismatch(head: TagHeader, expected: &'static str) -> JceError {
    JceError::TypeMismatch {
        tag: head.tag,
        expected,
        found: head.wire_type,
    }
}

/// Forward-only cursor over one encoded record.
pub struct JceDecoder<'a> {
    pub reader: Reader<'a>,
    pub config: JceConfig,
    depth: usize,
}

impl<'a> JceDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, JceConfig::default())
    }

    pub fn with_config(data: &'a [u8], config: JceConfig) -> Self {
        Self {
            reader: Reader::new(data),
            config,
            depth: 0,
        }
    }

    /// Number of containers currently open.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn peek_head(&self) -> Result<Option<TagHeader>, JceError> {
        peek_head(&self.reader)
    }

    pub fn read_head(&mut self) -> Result<Option<TagHeader>, JceError> {
        read_head(&mut self.reader)
    }

    /// Skips the payload of a field whose header was already consumed.
    pub fn skip_field(&mut self, wire_type: WireType) -> Result<(), JceError> {
        skip_field(&mut self.reader, wire_type, &self.config, self.depth)
    }

    /// Positions the cursor on the payload of field `tag`.
    ///
    /// Lower tags are skipped. Returns the consumed header on a match, or
    /// `None` when the field is absent; in that case the next header is left
    /// unread.
    pub fn skip_to_tag(&mut self, tag: u32) -> Result<Option<TagHeader>, JceError> {
        loop {
            let Some(head) = self.peek_head()? else {
                return Ok(None);
            };
            if head.wire_type == WireType::StructEnd || head.tag > tag {
                return Ok(None);
            }
            self.reader.skip(head.encoded_len())?;
            if head.tag == tag {
                return Ok(Some(head));
            }
            self.skip_field(head.wire_type)?;
        }
    }

    /// Consumes the rest of the current struct, including its `StructEnd`.
    pub fn skip_to_struct_end(&mut self) -> Result<(), JceError> {
        skip_to_struct_end(&mut self.reader, &self.config, self.depth)
    }

    /// Opens one container level.
    pub fn enter(&mut self) -> Result<(), JceError> {
        self.depth = descend(self.depth, &self.config)?;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Reads a collection length at tag 0.
    pub fn read_count(&mut self, min_item_len: usize) -> Result<usize, JceError> {
        read_count(&mut self.reader, &self.config, min_item_len)
    }

    // ── Payloads ─────────────────────────────────────────────────────────────

    /// Any non-zero byte is `true`.
    pub fn bool_payload(&mut self, head: TagHeader) -> Result<bool, JceError> {
        match head.wire_type {
            WireType::Zero => Ok(false),
            WireType::Byte => Ok(self.reader.u8()? != 0),
            _ => Err(mismatch(head, "bool")),
        }
    }

    /// Reads an integer no wider than `widest`.
    fn integer_payload(
        &mut self,
        head: TagHeader,
        widest: WireType,
        expected: &'static str,
    ) -> Result<i64, JceError> {
        let fits = head.wire_type == WireType::Zero
            || (head.wire_type.code() <= widest.code() && head.wire_type.code() <= 3);
        if !fits {
            return Err(mismatch(head, expected));
        }
        read_integer(&mut self.reader, head.wire_type, self.config.integer_order)?
            .ok_or_else(|| mismatch(head, expected))
    }

    pub fn i8_payload(&mut self, head: TagHeader) -> Result<i8, JceError> {
        let n = self.integer_payload(head, WireType::Byte, "byte")?;
        i8::try_from(n).map_err(|_| mismatch(head, "byte"))
    }

    pub fn i16_payload(&mut self, head: TagHeader) -> Result<i16, JceError> {
        let n = self.integer_payload(head, WireType::Short, "short")?;
        i16::try_from(n).map_err(|_| mismatch(head, "short"))
    }

    pub fn i32_payload(&mut self, head: TagHeader) -> Result<i32, JceError> {
        let n = self.integer_payload(head, WireType::Int, "int")?;
        i32::try_from(n).map_err(|_| mismatch(head, "int"))
    }

    pub fn i64_payload(&mut self, head: TagHeader) -> Result<i64, JceError> {
        self.integer_payload(head, WireType::Long, "long")
    }

    pub fn f32_payload(&mut self, head: TagHeader) -> Result<f32, JceError> {
        match head.wire_type {
            WireType::Zero => Ok(0.0),
            WireType::Float => Ok(self.reader.f32(self.config.float_order)?),
            _ => Err(mismatch(head, "float")),
        }
    }

    pub fn f64_payload(&mut self, head: TagHeader) -> Result<f64, JceError> {
        match head.wire_type {
            WireType::Zero => Ok(0.0),
            WireType::Float => Ok(self.reader.f32(self.config.float_order)?.into()),
            WireType::Double => Ok(self.reader.f64(self.config.float_order)?),
            _ => Err(mismatch(head, "double")),
        }
    }

    /// Reads the raw bytes of a `String1`/`String4` payload.
    pub fn text_bytes_payload(&mut self, head: TagHeader) -> Result<&'a [u8], JceError> {
        let len = match head.wire_type {
            WireType::String1 => usize::from(self.reader.u8()?),
            WireType::String4 => self.reader.u32(self.config.integer_order)? as usize,
            _ => return Err(mismatch(head, "text")),
        };
        if len > self.config.max_string_len {
            return Err(JceError::OversizedString(len));
        }
        Ok(self.reader.buf(len)?)
    }

    pub fn text_payload(&mut self, head: TagHeader, charset: Charset) -> Result<String, JceError> {
        let bytes = self.text_bytes_payload(head)?;
        charset.decode(bytes)
    }

    /// Reads a byte buffer written either as a `SimpleList` or as a `List`
    /// of byte elements.
    pub fn bytes_payload(&mut self, head: TagHeader) -> Result<Vec<u8>, JceError> {
        match head.wire_type {
            WireType::SimpleList => {
                let element = self.read_head()?.ok_or(JceError::TruncatedBuffer {
                    needed: 1,
                    remaining: 0,
                })?;
                if element.tag != 0 || element.wire_type != WireType::Byte {
                    return Err(HeaderError::BadSimpleListElement {
                        tag: element.tag,
                        wire_type: element.wire_type,
                    }
                    .into());
                }
                let len = self.read_count(1)?;
                if len > self.config.max_string_len {
                    return Err(JceError::OversizedBuffer(len));
                }
                Ok(self.reader.buf(len)?.to_vec())
            }
            WireType::List => {
                let len = self.read_count(1)?;
                if len > self.config.max_string_len {
                    return Err(JceError::OversizedBuffer(len));
                }
                let mut bytes = Vec::with_capacity(len);
                for _ in 0..len {
                    let element = self.skip_to_tag(0)?.ok_or(JceError::MissingRequiredField(0))?;
                    bytes.push(self.i8_payload(element)? as u8);
                }
                Ok(bytes)
            }
            _ => Err(mismatch(head, "bytes")),
        }
    }

    // ── Tagged reads ─────────────────────────────────────────────────────────

    pub fn read_bool(&mut self, tag: u32) -> Result<Option<bool>, JceError> {
        self.skip_to_tag(tag)?
            .map(|head| self.bool_payload(head))
            .transpose()
    }

    pub fn read_i8(&mut self, tag: u32) -> Result<Option<i8>, JceError> {
        self.skip_to_tag(tag)?
            .map(|head| self.i8_payload(head))
            .transpose()
    }

    pub fn read_i16(&mut self, tag: u32) -> Result<Option<i16>, JceError> {
        self.skip_to_tag(tag)?
            .map(|head| self.i16_payload(head))
            .transpose()
    }

    pub fn read_i32(&mut self, tag: u32) -> Result<Option<i32>, JceError> {
        self.skip_to_tag(tag)?
            .map(|head| self.i32_payload(head))
            .transpose()
    }

    pub fn read_i64(&mut self, tag: u32) -> Result<Option<i64>, JceError> {
        self.skip_to_tag(tag)?
            .map(|head| self.i64_payload(head))
            .transpose()
    }

    pub fn read_f32(&mut self, tag: u32) -> Result<Option<f32>, JceError> {
        self.skip_to_tag(tag)?
            .map(|head| self.f32_payload(head))
            .transpose()
    }

    pub fn read_f64(&mut self, tag: u32) -> Result<Option<f64>, JceError> {
        self.skip_to_tag(tag)?
            .map(|head| self.f64_payload(head))
            .transpose()
    }

    /// Reads text in the configured charset.
    pub fn read_string(&mut self, tag: u32) -> Result<Option<String>, JceError> {
        let charset = self.config.charset;
        self.skip_to_tag(tag)?
            .map(|head| self.text_payload(head, charset))
            .transpose()
    }

    pub fn read_bytes(&mut self, tag: u32) -> Result<Option<Vec<u8>>, JceError> {
        self.skip_to_tag(tag)?
            .map(|head| self.bytes_payload(head))
            .transpose()
    }
}
