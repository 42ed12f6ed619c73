//! JCE: a tagged, self-describing binary structure codec.
//!
//! Every value is preceded by a header carrying its field tag and wire type,
//! so decoders can skip fields they do not know and records can gain new
//! optional fields without breaking older peers.
//!
//! ```
//! use jce::{decode, encode, FieldSchema, FieldType, Record, StructSchema};
//!
//! let schema = StructSchema::new()
//!     .field(FieldSchema::required(0, FieldType::Text))
//!     .field(FieldSchema::optional(1, FieldType::Int));
//! let record = Record::new().with(0, "A").with(1, 0i32);
//!
//! let bytes = encode(&schema, &record).unwrap();
//! assert_eq!(bytes, [0x06, 0x01, 0x41, 0x1c]);
//! assert_eq!(decode(&schema, &bytes).unwrap(), record);
//! ```

mod any;
mod charset;
mod config;
mod constants;
mod error;
mod head;
mod schema;
mod value;

pub mod cli;
pub mod decoder;
pub mod encoder;
pub mod jce_struct;
pub mod schema_decoder;
pub mod schema_encoder;
pub mod skip;

pub use any::{decode_any_with, read_any};
pub use charset::Charset;
pub use config::{JceConfig, DEFAULT_MAX_DEPTH};
pub use constants::{WireType, MAX_STRING_LENGTH, MAX_TAG};
pub use decoder::JceDecoder;
pub use encoder::JceEncoder;
pub use error::{HeaderError, JceError, Result};
pub use head::{peek_head, read_head, write_head, TagHeader};
pub use jce_buffers::ByteOrder;
pub use jce_struct::{decode_struct, decode_struct_with, encode_struct, encode_struct_with, JceStruct};
pub use schema::{FieldSchema, FieldType, StructSchema};
pub use schema_decoder::JceSchemaDecoder;
pub use schema_encoder::JceSchemaEncoder;
pub use value::{Record, Value};

/// Encodes `record` with the default configuration.
pub fn encode(schema: &StructSchema, record: &Record) -> Result<Vec<u8>> {
    encode_with(schema, record, JceConfig::default())
}

/// Encodes `record` against `schema`. Record fields must be in ascending tag
/// order and declared by the schema.
pub fn encode_with(schema: &StructSchema, record: &Record, config: JceConfig) -> Result<Vec<u8>> {
    JceSchemaEncoder::with_config(config).encode(record, schema)
}

/// Decodes a record with the default configuration.
pub fn decode(schema: &StructSchema, data: &[u8]) -> Result<Record> {
    decode_with(schema, data, JceConfig::default())
}

/// Decodes a record against `schema`, skipping fields it does not declare.
pub fn decode_with(schema: &StructSchema, data: &[u8], config: JceConfig) -> Result<Record> {
    JceSchemaDecoder::with_config(config).decode(data, schema)
}

/// Decodes a record without a schema.
pub fn decode_any(data: &[u8]) -> Result<Record> {
    decode_any_with(data, JceConfig::default())
}
