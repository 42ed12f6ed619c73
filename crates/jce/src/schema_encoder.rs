//! Schema-driven encoder for records, collections and nested structs.

use crate::charset::Charset;
use crate::config::JceConfig;
use crate::encoder::JceEncoder;
use crate::error::JceError;
use crate::schema::{FieldType, StructSchema};
use crate::skip::descend;
use crate::value::{Record, Value};

/// Encodes [`Record`]s against a [`StructSchema`].
pub struct JceSchemaEncoder {
    encoder: JceEncoder,
    depth: usize,
}

impl Default for JceSchemaEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JceSchemaEncoder {
    pub fn new() -> Self {
        Self::with_config(JceConfig::default())
    }

    pub fn with_config(config: JceConfig) -> Self {
        Self {
            encoder: JceEncoder::with_config(config),
            depth: 0,
        }
    }

    /// Encodes `record` as a top-level struct body (no begin/end markers).
    ///
    /// Nothing is returned on error; partial output is discarded.
    pub fn encode(&mut self, record: &Record, schema: &StructSchema) -> Result<Vec<u8>, JceError> {
        self.depth = 0;
        let result = schema
            .validate()
            .and_then(|()| self.write_fields(record, schema));
        match result {
            Ok(()) => Ok(self.encoder.flush()),
            Err(err) => {
                self.encoder.writer.reset();
                Err(err)
            }
        }
    }

    fn write_fields(&mut self, record: &Record, schema: &StructSchema) -> Result<(), JceError> {
        check_record(record, schema)?;
        for field in schema.fields() {
            match record.get(field.tag) {
                Some(value) => {
                    let charset = field.charset.unwrap_or(self.encoder.config.charset);
                    self.write_value(value, &field.ty, field.tag, charset)?;
                }
                None if field.nullable => {}
                None => return Err(JceError::MissingRequiredField(field.tag)),
            }
        }
        Ok(())
    }

    fn write_value(
        &mut self,
        value: &Value,
        ty: &FieldType,
        tag: u32,
        charset: Charset,
    ) -> Result<(), JceError> {
        let mismatch = || JceError::ValueMismatch {
            tag,
            expected: ty.name(),
        };
        match ty {
            FieldType::Bool => {
                let b = value.as_bool().ok_or_else(mismatch)?;
                self.encoder.write_bool(b, tag)
            }
            FieldType::Byte => {
                let n = fitting::<i8>(value).ok_or_else(mismatch)?;
                self.encoder.write_i8(n, tag)
            }
            FieldType::Short => {
                let n = fitting::<i16>(value).ok_or_else(mismatch)?;
                self.encoder.write_i16(n, tag)
            }
            FieldType::Int => {
                let n = fitting::<i32>(value).ok_or_else(mismatch)?;
                self.encoder.write_i32(n, tag)
            }
            FieldType::Long => {
                let n = value.as_i64().ok_or_else(mismatch)?;
                self.encoder.write_i64(n, tag)
            }
            FieldType::Float => match *value {
                Value::Float(f) => self.encoder.write_f32(f, tag),
                _ => Err(mismatch()),
            },
            FieldType::Double => {
                let f = value.as_f64().ok_or_else(mismatch)?;
                self.encoder.write_f64(f, tag)
            }
            FieldType::Text => {
                let s = value.as_str().ok_or_else(mismatch)?;
                self.encoder.write_str_in(s, tag, charset)
            }
            FieldType::Bytes => {
                let bytes = value.as_bytes().ok_or_else(mismatch)?;
                self.encoder.write_bytes(bytes, tag)
            }
            FieldType::List(element) => {
                let items = value.as_list().ok_or_else(mismatch)?;
                self.nested(|this| {
                    this.encoder.write_list_header(items.len(), tag)?;
                    for item in items {
                        this.write_value(item, element, 0, charset)?;
                    }
                    Ok(())
                })
            }
            FieldType::Map(key_ty, value_ty) => {
                let entries = value.as_map().ok_or_else(mismatch)?;
                self.nested(|this| {
                    this.encoder.write_map_header(entries.len(), tag)?;
                    for (key, value) in entries {
                        this.write_value(key, key_ty, 0, charset)?;
                        this.write_value(value, value_ty, 1, charset)?;
                    }
                    Ok(())
                })
            }
            FieldType::Struct(schema) => {
                let record = value.as_record().ok_or_else(mismatch)?;
                self.nested(|this| {
                    this.encoder.write_struct_begin(tag)?;
                    this.write_fields(record, schema)?;
                    this.encoder.write_struct_end()
                })
            }
        }
    }

    fn nested(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<(), JceError>,
    ) -> Result<(), JceError> {
        let outer = self.depth;
        self.depth = descend(outer, &self.encoder.config)?;
        let result = f(self);
        self.depth = outer;
        result
    }
}

/// Checks that record tags ascend strictly and are all declared.
fn check_record(record: &Record, schema: &StructSchema) -> Result<(), JceError> {
    let mut previous: Option<u32> = None;
    for tag in record.tags() {
        match previous {
            Some(prev) if tag < prev => return Err(JceError::TagOrder { previous: prev, tag }),
            Some(prev) if tag == prev => return Err(JceError::DuplicateField(tag)),
            _ => {}
        }
        if schema.find(tag).is_none() {
            return Err(JceError::UnknownField(tag));
        }
        previous = Some(tag);
    }
    Ok(())
}

fn fitting<T: TryFrom<i64>>(value: &Value) -> Option<T> {
    value.as_i64().and_then(|n| T::try_from(n).ok())
}
