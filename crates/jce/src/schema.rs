//! Field schemas supplied by the caller for each record type.

use std::collections::HashSet;

use crate::charset::Charset;
use crate::constants::MAX_TAG;
use crate::error::{HeaderError, JceError};

/// The declared type of a field, used to pick the codec on encode and the
/// accepted wire types on decode.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Text,
    /// Raw bytes, written as a `SimpleList`.
    Bytes,
    List(Box<FieldType>),
    Map(Box<FieldType>, Box<FieldType>),
    Struct(Box<StructSchema>),
}

impl FieldType {
    pub fn list(element: FieldType) -> Self {
        FieldType::List(Box::new(element))
    }

    pub fn map(key: FieldType, value: FieldType) -> Self {
        FieldType::Map(Box::new(key), Box::new(value))
    }

    pub fn structure(schema: StructSchema) -> Self {
        FieldType::Struct(Box::new(schema))
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Bool => "bool",
            FieldType::Byte => "byte",
            FieldType::Short => "short",
            FieldType::Int => "int",
            FieldType::Long => "long",
            FieldType::Float => "float",
            FieldType::Double => "double",
            FieldType::Text => "text",
            FieldType::Bytes => "bytes",
            FieldType::List(_) => "list",
            FieldType::Map(..) => "map",
            FieldType::Struct(_) => "struct",
        }
    }

    fn validate(&self) -> Result<(), JceError> {
        match self {
            FieldType::List(element) => element.validate(),
            FieldType::Map(key, value) => {
                key.validate()?;
                value.validate()
            }
            FieldType::Struct(schema) => schema.validate(),
            _ => Ok(()),
        }
    }
}

/// One declared field: its tag, type, nullability and optional charset.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub tag: u32,
    pub ty: FieldType,
    pub nullable: bool,
    /// Charset for text in this field, including text nested in its
    /// collections. `None` falls back to the call's configured charset.
    pub charset: Option<Charset>,
}

impl FieldSchema {
    pub fn required(tag: u32, ty: FieldType) -> Self {
        Self {
            tag,
            ty,
            nullable: false,
            charset: None,
        }
    }

    pub fn optional(tag: u32, ty: FieldType) -> Self {
        Self {
            tag,
            ty,
            nullable: true,
            charset: None,
        }
    }

    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = Some(charset);
        self
    }
}

/// The ordered field table of one record type.
///
/// Fields are kept sorted by tag regardless of the order they were added in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructSchema {
    fields: Vec<FieldSchema>,
}

impl StructSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, keeping tag order.
    pub fn field(mut self, field: FieldSchema) -> Self {
        let at = self.fields.partition_point(|f| f.tag <= field.tag);
        self.fields.insert(at, field);
        self
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn find(&self, tag: u32) -> Option<&FieldSchema> {
        self.fields
            .binary_search_by_key(&tag, |f| f.tag)
            .ok()
            .map(|i| &self.fields[i])
    }

    /// Checks tag range and uniqueness, recursing into nested schemas.
    pub fn validate(&self) -> Result<(), JceError> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if field.tag > MAX_TAG {
                return Err(HeaderError::TagOutOfRange(field.tag).into());
            }
            if !seen.insert(field.tag) {
                return Err(JceError::DuplicateField(field.tag));
            }
            field.ty.validate()?;
        }
        Ok(())
    }
}

impl From<Vec<FieldSchema>> for StructSchema {
    fn from(fields: Vec<FieldSchema>) -> Self {
        fields.into_iter().fold(StructSchema::new(), StructSchema::field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_sorted_by_tag() {
        let schema = StructSchema::new()
            .field(FieldSchema::required(5, FieldType::Int))
            .field(FieldSchema::optional(0, FieldType::Text))
            .field(FieldSchema::required(2, FieldType::Bytes));
        let tags: Vec<u32> = schema.fields().iter().map(|f| f.tag).collect();
        assert_eq!(tags, [0, 2, 5]);
        assert_eq!(schema.find(2).map(|f| &f.ty), Some(&FieldType::Bytes));
        assert!(schema.find(3).is_none());
    }

    #[test]
    fn duplicate_tag_rejected() {
        let schema = StructSchema::from(vec![
            FieldSchema::required(1, FieldType::Int),
            FieldSchema::required(1, FieldType::Long),
        ]);
        assert_eq!(schema.validate(), Err(JceError::DuplicateField(1)));
    }

    #[test]
    fn nested_tag_range_checked() {
        let inner = StructSchema::new().field(FieldSchema::required(300, FieldType::Byte));
        let outer = StructSchema::new().field(FieldSchema::required(
            0,
            FieldType::list(FieldType::structure(inner)),
        ));
        assert_eq!(
            outer.validate(),
            Err(JceError::MalformedHeader(HeaderError::TagOutOfRange(300)))
        );
    }
}
