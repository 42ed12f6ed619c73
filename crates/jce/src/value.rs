//! Decoded values and records.

use serde_json::{Map as JsonMap, Number, Value as JsonValue};

use crate::error::JceError;

/// A single field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bytes(Vec<u8>),
    Text(String),
    List(Vec<Value>),
    /// Entries in wire order.
    Map(Vec<(Value, Value)>),
    Struct(Record),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Byte(_) => "byte",
            Value::Short(_) => "short",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Bytes(_) => "bytes",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Struct(_) => "struct",
        }
    }

    /// Any integer variant widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Byte(n) => Some(n.into()),
            Value::Short(n) => Some(n.into()),
            Value::Int(n) => Some(n.into()),
            Value::Long(n) => Some(n),
            _ => None,
        }
    }

    /// Either float variant widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float(f) => Some(f.into()),
            Value::Double(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Struct(record) => Some(record),
            _ => None,
        }
    }

    /// Renders the value as JSON for inspection.
    ///
    /// Bytes become lowercase hex strings, maps become arrays of
    /// `[key, value]` pairs, and records become objects keyed by tag.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Byte(n) => JsonValue::from(*n),
            Value::Short(n) => JsonValue::from(*n),
            Value::Int(n) => JsonValue::from(*n),
            Value::Long(n) => JsonValue::from(*n),
            Value::Float(f) => float_json(f64::from(*f)),
            Value::Double(f) => float_json(*f),
            Value::Bytes(b) => JsonValue::String(hex::encode(b)),
            Value::Text(s) => JsonValue::String(s.clone()),
            Value::List(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(entries) => JsonValue::Array(
                entries
                    .iter()
                    .map(|(k, v)| JsonValue::Array(vec![k.to_json(), v.to_json()]))
                    .collect(),
            ),
            Value::Struct(record) => record.to_json(),
        }
    }
}

fn float_json(f: f64) -> JsonValue {
    Number::from_f64(f).map_or(JsonValue::Null, JsonValue::Number)
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Vec<u8> => Bytes,
    String => Text,
    Record => Struct,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

/// Tagged field values of one struct, in the order they appear on the wire.
///
/// Absent optional fields have no entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(u32, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tag: u32, value: impl Into<Value>) -> Self {
        self.push(tag, value);
        self
    }

    /// Adds the field only when `value` is `Some`.
    pub fn with_opt<V: Into<Value>>(mut self, tag: u32, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.push(tag, value);
        }
        self
    }

    pub fn push(&mut self, tag: u32, value: impl Into<Value>) {
        self.fields.push((tag, value.into()));
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Value)> {
        self.fields.iter().map(|(tag, value)| (*tag, value))
    }

    pub fn tags(&self) -> impl Iterator<Item = u32> + '_ {
        self.fields.iter().map(|(tag, _)| *tag)
    }

    pub fn into_fields(self) -> Vec<(u32, Value)> {
        self.fields
    }

    pub fn get(&self, tag: u32) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, value)| value)
    }

    pub fn require(&self, tag: u32) -> Result<&Value, JceError> {
        self.get(tag).ok_or(JceError::MissingRequiredField(tag))
    }

    /// Removes and returns the field's value.
    pub fn take(&mut self, tag: u32) -> Option<Value> {
        let at = self.fields.iter().position(|(t, _)| *t == tag)?;
        Some(self.fields.remove(at).1)
    }

    pub fn get_bool(&self, tag: u32) -> Result<Option<bool>, JceError> {
        self.typed(tag, "bool", Value::as_bool)
    }

    pub fn get_i8(&self, tag: u32) -> Result<Option<i8>, JceError> {
        self.typed(tag, "byte", |v| v.as_i64().and_then(|n| n.try_into().ok()))
    }

    pub fn get_i16(&self, tag: u32) -> Result<Option<i16>, JceError> {
        self.typed(tag, "short", |v| v.as_i64().and_then(|n| n.try_into().ok()))
    }

    pub fn get_i32(&self, tag: u32) -> Result<Option<i32>, JceError> {
        self.typed(tag, "int", |v| v.as_i64().and_then(|n| n.try_into().ok()))
    }

    pub fn get_i64(&self, tag: u32) -> Result<Option<i64>, JceError> {
        self.typed(tag, "long", Value::as_i64)
    }

    pub fn get_f64(&self, tag: u32) -> Result<Option<f64>, JceError> {
        self.typed(tag, "double", Value::as_f64)
    }

    pub fn get_str(&self, tag: u32) -> Result<Option<&str>, JceError> {
        self.typed(tag, "text", Value::as_str)
    }

    pub fn get_bytes(&self, tag: u32) -> Result<Option<&[u8]>, JceError> {
        self.typed(tag, "bytes", Value::as_bytes)
    }

    pub fn get_list(&self, tag: u32) -> Result<Option<&[Value]>, JceError> {
        self.typed(tag, "list", Value::as_list)
    }

    pub fn get_map(&self, tag: u32) -> Result<Option<&[(Value, Value)]>, JceError> {
        self.typed(tag, "map", Value::as_map)
    }

    pub fn get_record(&self, tag: u32) -> Result<Option<&Record>, JceError> {
        self.typed(tag, "struct", Value::as_record)
    }

    fn typed<'a, T>(
        &'a self,
        tag: u32,
        expected: &'static str,
        cast: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>, JceError> {
        match self.get(tag) {
            None => Ok(None),
            Some(value) => cast(value)
                .map(Some)
                .ok_or(JceError::ValueMismatch { tag, expected }),
        }
    }

    /// Renders the record as a JSON object keyed by decimal tag.
    pub fn to_json(&self) -> JsonValue {
        let mut object = JsonMap::with_capacity(self.fields.len());
        for (tag, value) in &self.fields {
            object.insert(tag.to_string(), value.to_json());
        }
        JsonValue::Object(object)
    }
}

impl FromIterator<(u32, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (u32, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
