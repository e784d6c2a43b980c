//! Data-driven record decoding.
//!
//! A [`Schema`] is an ordered list of [`FieldDescriptor`]s validated once at
//! construction. Decoding walks the list against a [`Cursor`](crate::Cursor)
//! and collects a [`Record`]. Size sources are resolved to field indices up
//! front, so a schema that passes `Schema::new` never fails on a dangling
//! reference while decoding.

mod field;
mod interpreter;
mod value;

pub use field::{Endian, EnumMap, FieldDescriptor, FieldKind};
pub use value::{FieldValue, Record};

pub(crate) use value::serialize_hex;

use std::collections::HashSet;

use crate::error::{DecodeError, SchemaError};

/// A validated field list plus an optional declared size and a default byte
/// order for fields that do not set their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
    declared_size: usize,
    endian: Endian,
}

impl Schema {
    /// Validate `fields` and build a schema with no declared size.
    ///
    /// # Errors
    /// Returns `DecodeError::Schema` for dangling, forward or non-integer size
    /// sources, duplicate names and missing sizes, and
    /// `DecodeError::UnsupportedFieldKind` when a setting does not apply to
    /// the field's kind.
    pub fn new(mut fields: Vec<FieldDescriptor>) -> Result<Self, DecodeError> {
        let mut seen = HashSet::new();

        for index in 0..fields.len() {
            let field = &fields[index];
            if !seen.insert(field.name.clone()) {
                return Err(SchemaError::DuplicateField {
                    field: field.name.clone(),
                }
                .into());
            }
            check_kind(field)?;
            let source_index = match &field.size_source {
                Some(source) => Some(resolve_source(&fields, index, source)?),
                None => None,
            };
            fields[index].source_index = source_index;
        }

        Ok(Self {
            fields,
            declared_size: 0,
            endian: Endian::default(),
        })
    }

    /// Set the nominal size used for stride reconciliation.
    pub fn with_declared_size(mut self, declared_size: usize) -> Self {
        self.declared_size = declared_size;
        self
    }

    /// Byte order for every field without its own. Nested schemas keep
    /// their own default.
    pub fn with_endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn declared_size(&self) -> usize {
        self.declared_size
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}

fn check_kind(field: &FieldDescriptor) -> Result<(), DecodeError> {
    let unsupported = |reason: String| DecodeError::UnsupportedFieldKind {
        field: field.name.clone(),
        reason,
    };

    if field.encoding.is_some() && !field.kind.is_text() {
        return Err(unsupported(format!(
            "{} fields do not take an encoding",
            field.kind.label()
        )));
    }
    if field.size > 0 && field.size_source.is_some() {
        return Err(unsupported(
            "explicit size and size source are mutually exclusive".to_string(),
        ));
    }

    if let FieldKind::Enum(map) = &field.kind {
        if !map.base().is_integer() {
            return Err(unsupported(format!(
                "enum values must be read as an integer kind, not {}",
                map.base().label()
            )));
        }
    }

    match field.kind {
        FieldKind::Bytes | FieldKind::FixedText if !field.has_size() => {
            Err(SchemaError::MissingSize {
                field: field.name.clone(),
            }
            .into())
        }
        FieldKind::LengthPrefixedText if field.has_size() => Err(unsupported(
            "length-prefixed text carries its own length".to_string(),
        )),
        _ if field.kind.natural_width().is_some() && field.has_size() => Err(unsupported(format!(
            "{} fields have a natural width of {} bytes",
            field.kind.label(),
            field.kind.natural_width().unwrap_or_default()
        ))),
        _ => Ok(()),
    }
}

fn resolve_source(
    fields: &[FieldDescriptor],
    index: usize,
    source: &str,
) -> Result<usize, SchemaError> {
    let field = &fields[index].name;
    let position = fields
        .iter()
        .position(|candidate| candidate.name == source)
        .ok_or_else(|| SchemaError::UnknownSizeSource {
            field: field.clone(),
            source_field: source.to_string(),
        })?;

    if position >= index {
        return Err(SchemaError::ForwardReference {
            field: field.clone(),
            source_field: source.to_string(),
        });
    }
    if !fields[position].kind.is_integer() {
        return Err(SchemaError::NonIntegerSizeSource {
            field: field.clone(),
            source_field: source.to_string(),
        });
    }
    Ok(position)
}
