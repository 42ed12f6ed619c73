//! Typed records: Rust structs that describe their own field table.

use crate::config::JceConfig;
use crate::error::JceError;
use crate::schema::StructSchema;
use crate::schema_decoder::JceSchemaDecoder;
use crate::schema_encoder::JceSchemaEncoder;
use crate::value::{Record, Value};

/// A Rust type with a fixed JCE field table.
///
/// Implementors convert to and from a [`Record`]; encoding and decoding go
/// through the schema codecs so tag ordering, optional fields and skipping
/// behave exactly as for hand-built records.
pub trait JceStruct: Sized {
    fn schema() -> StructSchema;

    fn to_record(&self) -> Record;

    fn from_record(record: Record) -> Result<Self, JceError>;

    /// Wraps the record for use as a nested struct field.
    fn to_value(&self) -> Value {
        Value::Struct(self.to_record())
    }

    /// Unwraps a nested struct field; `tag` is reported on mismatch.
    fn from_value(value: Value, tag: u32) -> Result<Self, JceError> {
        match value {
            Value::Struct(record) => Self::from_record(record),
            _ => Err(JceError::ValueMismatch {
                tag,
                expected: "struct",
            }),
        }
    }
}

pub fn encode_struct<T: JceStruct>(value: &T) -> Result<Vec<u8>, JceError> {
    encode_struct_with(value, JceConfig::default())
}

pub fn encode_struct_with<T: JceStruct>(value: &T, config: JceConfig) -> Result<Vec<u8>, JceError> {
    JceSchemaEncoder::with_config(config).encode(&value.to_record(), &T::schema())
}

pub fn decode_struct<T: JceStruct>(data: &[u8]) -> Result<T, JceError> {
    decode_struct_with(data, JceConfig::default())
}

pub fn decode_struct_with<T: JceStruct>(data: &[u8], config: JceConfig) -> Result<T, JceError> {
    let record = JceSchemaDecoder::with_config(config).decode(data, &T::schema())?;
    T::from_record(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSchema, FieldType};

    #[derive(Debug, Clone, PartialEq)]
    struct Endpoint {
        host: String,
        port: i32,
        weight: Option<i16>,
    }

    impl JceStruct for Endpoint {
        fn schema() -> StructSchema {
            StructSchema::new()
                .field(FieldSchema::required(1, FieldType::Text))
                .field(FieldSchema::required(2, FieldType::Int))
                .field(FieldSchema::optional(3, FieldType::Short))
        }

        fn to_record(&self) -> Record {
            Record::new()
                .with(1, self.host.as_str())
                .with(2, self.port)
                .with_opt(3, self.weight)
        }

        fn from_record(record: Record) -> Result<Self, JceError> {
            Ok(Self {
                host: record
                    .get_str(1)?
                    .ok_or(JceError::MissingRequiredField(1))?
                    .to_owned(),
                port: record.get_i32(2)?.ok_or(JceError::MissingRequiredField(2))?,
                weight: record.get_i16(3)?,
            })
        }
    }

    #[derive(Debug, PartialEq)]
    struct EndpointList {
        endpoints: Vec<Endpoint>,
    }

    impl JceStruct for EndpointList {
        fn schema() -> StructSchema {
            StructSchema::new().field(FieldSchema::required(
                4,
                FieldType::list(FieldType::structure(Endpoint::schema())),
            ))
        }

        fn to_record(&self) -> Record {
            let items = self.endpoints.iter().map(Endpoint::to_value).collect::<Vec<_>>();
            Record::new().with(4, items)
        }

        fn from_record(mut record: Record) -> Result<Self, JceError> {
            let endpoints = match record.take(4) {
                Some(Value::List(items)) => items
                    .into_iter()
                    .map(|item| Endpoint::from_value(item, 4))
                    .collect::<Result<_, _>>()?,
                Some(_) => {
                    return Err(JceError::ValueMismatch {
                        tag: 4,
                        expected: "list",
                    })
                }
                None => return Err(JceError::MissingRequiredField(4)),
            };
            Ok(Self { endpoints })
        }
    }

    #[test]
    fn typed_roundtrip() {
        let list = EndpointList {
            endpoints: vec![
                Endpoint {
                    host: "10.0.0.1".into(),
                    port: 443,
                    weight: Some(3),
                },
                Endpoint {
                    host: "10.0.0.2".into(),
                    port: 0,
                    weight: None,
                },
            ],
        };
        let bytes = encode_struct(&list).unwrap();
        assert_eq!(&bytes[..3], [0x49, 0x00, 0x02]);
        assert_eq!(decode_struct::<EndpointList>(&bytes).unwrap(), list);
    }

    #[test]
    fn missing_field_surfaces() {
        // One endpoint with no port.
        let data = [0x49, 0x00, 0x01, 0x0a, 0x16, 0x01, b'h', 0x0b];
        assert_eq!(
            decode_struct::<EndpointList>(&data),
            Err(JceError::MissingRequiredField(2))
        );
    }
}
