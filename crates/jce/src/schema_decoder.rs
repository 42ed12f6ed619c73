//! Schema-driven decoder for records, collections and nested structs.

use tracing::debug;

use crate::charset::Charset;
use crate::config::JceConfig;
use crate::constants::WireType;
use crate::decoder::JceDecoder;
use crate::error::JceError;
use crate::head::TagHeader;
use crate::schema::{FieldType, StructSchema};
use crate::value::{Record, Value};

/// Decodes bytes into [`Record`]s using a [`StructSchema`].
///
/// Fields on the wire that the schema does not declare are skipped. Input
/// after the last declared field is ignored.
#[derive(Default)]
pub struct JceSchemaDecoder {
    config: JceConfig,
}

impl JceSchemaDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: JceConfig) -> Self {
        Self { config }
    }

    pub fn decode(&self, data: &[u8], schema: &StructSchema) -> Result<Record, JceError> {
        schema.validate()?;
        let mut decoder = JceDecoder::with_config(data, self.config);
        read_fields(&mut decoder, schema)
    }
}

/// Resolves every schema field in tag order from the current position.
///
/// Stops short of the enclosing `StructEnd`, if any.
pub fn read_fields(decoder: &mut JceDecoder<'_>, schema: &StructSchema) -> Result<Record, JceError> {
    let mut record = Record::new();
    for field in schema.fields() {
        match decoder.skip_to_tag(field.tag)? {
            Some(head) => {
                let charset = field.charset.unwrap_or(decoder.config.charset);
                let value = read_value(decoder, head, &field.ty, charset)?;
                record.push(field.tag, value);
            }
            None if field.nullable => debug!(tag = field.tag, "optional field absent"),
            None => return Err(JceError::MissingRequiredField(field.tag)),
        }
    }
    Ok(record)
}

/// Decodes the payload behind `head` as a value of type `ty`.
pub fn read_value(
    decoder: &mut JceDecoder<'_>,
    head: TagHeader,
    ty: &FieldType,
    charset: Charset,
) -> Result<Value, JceError> {
    Ok(match ty {
        FieldType::Bool => Value::Bool(decoder.bool_payload(head)?),
        FieldType::Byte => Value::Byte(decoder.i8_payload(head)?),
        FieldType::Short => Value::Short(decoder.i16_payload(head)?),
        FieldType::Int => Value::Int(decoder.i32_payload(head)?),
        FieldType::Long => Value::Long(decoder.i64_payload(head)?),
        FieldType::Float => Value::Float(decoder.f32_payload(head)?),
        FieldType::Double => Value::Double(decoder.f64_payload(head)?),
        FieldType::Text => Value::Text(decoder.text_payload(head, charset)?),
        FieldType::Bytes => Value::Bytes(decoder.bytes_payload(head)?),
        FieldType::List(element) => read_list(decoder, head, element, charset)?,
        FieldType::Map(key_ty, value_ty) => {
            expect_wire(head, WireType::Map, "map")?;
            decoder.enter()?;
            let count = decoder.read_count(2)?;
            let mut entries = Vec::with_capacity(count);
            for _ in 0..count {
                let key_head = decoder
                    .skip_to_tag(0)?
                    .ok_or(JceError::MissingRequiredField(0))?;
                let key = read_value(decoder, key_head, key_ty, charset)?;
                let value_head = decoder
                    .skip_to_tag(1)?
                    .ok_or(JceError::MissingRequiredField(1))?;
                let value = read_value(decoder, value_head, value_ty, charset)?;
                entries.push((key, value));
            }
            decoder.leave();
            Value::Map(entries)
        }
        FieldType::Struct(schema) => {
            expect_wire(head, WireType::StructBegin, "struct")?;
            decoder.enter()?;
            let record = read_fields(decoder, schema)?;
            decoder.skip_to_struct_end()?;
            decoder.leave();
            Value::Struct(record)
        }
    })
}

fn read_list(
    decoder: &mut JceDecoder<'_>,
    head: TagHeader,
    element: &FieldType,
    charset: Charset,
) -> Result<Value, JceError> {
    // A list of bytes may arrive in the packed form.
    if head.wire_type == WireType::SimpleList && *element == FieldType::Byte {
        let bytes = decoder.bytes_payload(head)?;
        return Ok(Value::List(
            bytes.into_iter().map(|b| Value::Byte(b as i8)).collect(),
        ));
    }
    expect_wire(head, WireType::List, "list")?;
    decoder.enter()?;
    let count = decoder.read_count(1)?;
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        let item_head = decoder
            .skip_to_tag(0)?
            .ok_or(JceError::MissingRequiredField(0))?;
        items.push(read_value(decoder, item_head, element, charset)?);
    }
    decoder.leave();
    Ok(Value::List(items))
}

fn expect_wire(head: TagHeader, wire_type: WireType, expected: &'static str) -> Result<(), JceError> {
    if head.wire_type == wire_type {
        Ok(())
    } else {
        Err(JceError::TypeMismatch {
            tag: head.tag,
            expected,
            found: head.wire_type,
        })
    }
}
