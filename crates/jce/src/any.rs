//! Schemaless decoding: values are reconstructed from wire types alone.
//!
//! Useful for inspecting captures. Integer widths follow what was on the
//! wire (`Zero` becomes `Int(0)`), and text that does not decode in the
//! configured charset is kept as bytes.

use crate::config::JceConfig;
use crate::constants::WireType;
use crate::decoder::JceDecoder;
use crate::error::JceError;
use crate::head::TagHeader;
use crate::value::{Record, Value};

/// Decodes every field of a top-level record.
pub fn decode_any_with(data: &[u8], config: JceConfig) -> Result<Record, JceError> {
    let mut decoder = JceDecoder::with_config(data, config);
    let mut record = Record::new();
    while let Some(head) = decoder.read_head()? {
        if head.wire_type == WireType::StructEnd {
            return Err(stray_struct_end(head));
        }
        let value = read_any(&mut decoder, head)?;
        record.push(head.tag, value);
    }
    Ok(record)
}

/// Decodes the payload behind `head` without a schema.
pub fn read_any(decoder: &mut JceDecoder<'_>, head: TagHeader) -> Result<Value, JceError> {
    let order = decoder.config.integer_order;
    let float_order = decoder.config.float_order;
    Ok(match head.wire_type {
        WireType::Zero => Value::Int(0),
        WireType::Byte => Value::Byte(decoder.reader.i8()?),
        WireType::Short => Value::Short(decoder.reader.i16(order)?),
        WireType::Int => Value::Int(decoder.reader.i32(order)?),
        WireType::Long => Value::Long(decoder.reader.i64(order)?),
        WireType::Float => Value::Float(decoder.reader.f32(float_order)?),
        WireType::Double => Value::Double(decoder.reader.f64(float_order)?),
        WireType::String1 | WireType::String4 => {
            let bytes = decoder.text_bytes_payload(head)?;
            match decoder.config.charset.decode(bytes) {
                Ok(text) => Value::Text(text),
                Err(_) => Value::Bytes(bytes.to_vec()),
            }
        }
        WireType::SimpleList => Value::Bytes(decoder.bytes_payload(head)?),
        WireType::List => {
            decoder.enter()?;
            let count = decoder.read_count(1)?;
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                let item_head = next_head(decoder)?;
                items.push(read_any(decoder, item_head)?);
            }
            decoder.leave();
            Value::List(items)
        }
        WireType::Map => {
            decoder.enter()?;
            let count = decoder.read_count(2)?;
            let mut entries = Vec::with_capacity(count);
            for _ in 0..count {
                let key_head = next_head(decoder)?;
                let key = read_any(decoder, key_head)?;
                let value_head = next_head(decoder)?;
                let value = read_any(decoder, value_head)?;
                entries.push((key, value));
            }
            decoder.leave();
            Value::Map(entries)
        }
        WireType::StructBegin => {
            decoder.enter()?;
            let mut record = Record::new();
            loop {
                let field = decoder.read_head()?.ok_or(JceError::UnterminatedStruct)?;
                if field.wire_type == WireType::StructEnd {
                    break;
                }
                let value = read_any(decoder, field)?;
                record.push(field.tag, value);
            }
            decoder.leave();
            Value::Struct(record)
        }
        WireType::StructEnd => return Err(stray_struct_end(head)),
    })
}

fn next_head(decoder: &mut JceDecoder<'_>) -> Result<TagHeader, JceError> {
    let head = decoder.read_head()?.ok_or(JceError::TruncatedBuffer {
        needed: 1,
        remaining: 0,
    })?;
    if head.wire_type == WireType::StructEnd {
        return Err(stray_struct_end(head));
    }
    Ok(head)
}

fn stray_struct_end(head: TagHeader) -> JceError {
    JceError::TypeMismatch {
        tag: head.tag,
        expected: "value",
        found: head.wire_type,
    }
}
