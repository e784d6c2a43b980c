use super::field::{Endian, FieldDescriptor, FieldKind};
use super::value::{FieldValue, Record};
use super::Schema;
use crate::cursor::Cursor;
use crate::error::{DecodeError, SchemaError};

impl Schema {
    /// Walk the fields against `cursor` without stride reconciliation.
    ///
    /// Most callers want [`Cursor::decode_schema`], which also honours the
    /// declared size and rolls back on failure.
    pub fn decode(&self, cursor: &mut Cursor<'_>) -> Result<Record, DecodeError> {
        let mut record = Record::with_capacity(self.fields.len());
        for field in &self.fields {
            cursor.skip(field.skip)?;
            let size = resolve_size(field, &record)?;
            let big = field.endian.unwrap_or(self.endian) == Endian::Big;
            let value = decode_kind(cursor, field, &field.kind, big, size)?;
            record.push(field.name.clone(), value);
        }
        Ok(record)
    }
}

impl<'a> Cursor<'a> {
    /// Decode one record described by `schema`, then skip any padding its
    /// declared size calls for. On error the cursor is back where it started.
    pub fn decode_schema(&mut self, schema: &Schema) -> Result<Record, DecodeError> {
        let start = self.position();
        let result = schema
            .decode(self)
            .and_then(|record| self.reconcile(start, schema.declared_size()).map(|()| record));
        if result.is_err() {
            self.restore(start);
        }
        result
    }
}

/// `None` when the field has neither an explicit size nor a size source.
fn resolve_size(field: &FieldDescriptor, record: &Record) -> Result<Option<usize>, DecodeError> {
    if field.size > 0 {
        return Ok(Some(field.size));
    }
    let Some(index) = field.source_index else {
        return Ok(None);
    };
    let value = record
        .value_at(index)
        .and_then(FieldValue::as_i128)
        .ok_or_else(|| SchemaError::NonIntegerSizeSource {
            field: field.name.clone(),
            source_field: field.size_source.clone().unwrap_or_default(),
        })?;
    usize::try_from(value)
        .map(Some)
        .map_err(|_| DecodeError::InvalidSize {
            field: field.name.clone(),
            value,
        })
}

fn required_size(field: &FieldDescriptor, size: Option<usize>) -> Result<usize, DecodeError> {
    size.ok_or_else(|| {
        SchemaError::MissingSize {
            field: field.name.clone(),
        }
        .into()
    })
}

// `kind` is passed apart from `field` so enum fields can decode their base.
fn decode_kind(
    cursor: &mut Cursor<'_>,
    field: &FieldDescriptor,
    kind: &FieldKind,
    big: bool,
    size: Option<usize>,
) -> Result<FieldValue, DecodeError> {
    let value = match kind {
        FieldKind::U8 => FieldValue::U8(cursor.read_u8()?),
        FieldKind::I8 => FieldValue::I8(cursor.read_i8()?),
        FieldKind::U16 if big => FieldValue::U16(cursor.read_u16_be()?),
        FieldKind::U16 => FieldValue::U16(cursor.read_u16_le()?),
        FieldKind::I16 if big => FieldValue::I16(cursor.read_i16_be()?),
        FieldKind::I16 => FieldValue::I16(cursor.read_i16_le()?),
        FieldKind::U32 if big => FieldValue::U32(cursor.read_u32_be()?),
        FieldKind::U32 => FieldValue::U32(cursor.read_u32_le()?),
        FieldKind::I32 if big => FieldValue::I32(cursor.read_i32_be()?),
        FieldKind::I32 => FieldValue::I32(cursor.read_i32_le()?),
        FieldKind::U64 if big => FieldValue::U64(cursor.read_u64_be()?),
        FieldKind::U64 => FieldValue::U64(cursor.read_u64_le()?),
        FieldKind::I64 if big => FieldValue::I64(cursor.read_i64_be()?),
        FieldKind::I64 => FieldValue::I64(cursor.read_i64_le()?),
        FieldKind::Bytes => FieldValue::Bytes(cursor.read_bytes(required_size(field, size)?)?),
        FieldKind::FixedText => FieldValue::Text(
            cursor.fixed_text(field.text_encoding(), required_size(field, size)?)?,
        ),
        FieldKind::LengthPrefixedText => {
            FieldValue::Text(cursor.length_prefixed_text(field.text_encoding())?)
        }
        FieldKind::NullTerminatedText => {
            FieldValue::Text(cursor.null_terminated_text(field.text_encoding(), size)?)
        }
        FieldKind::HfsDate if big => FieldValue::Timestamp(cursor.read_hfs_date_be()?),
        FieldKind::HfsDate => FieldValue::Timestamp(cursor.read_hfs_date_le()?),
        FieldKind::UnixDate if big => FieldValue::Timestamp(cursor.read_unix_date_be()?),
        FieldKind::UnixDate => FieldValue::Timestamp(cursor.read_unix_date_le()?),
        FieldKind::Enum(map) => {
            let value = decode_kind(cursor, field, map.base(), big, None)?;
            let name = value
                .as_i128()
                .and_then(|raw| map.name_of(raw))
                .map(str::to_string);
            FieldValue::Enum {
                value: Box::new(value),
                name,
            }
        }
        FieldKind::Structure(schema) => match size {
            None => FieldValue::Record(cursor.decode_schema(schema)?),
            Some(count) => {
                let mut records = Vec::with_capacity(count.min(cursor.remaining()));
                for _ in 0..count {
                    let before = cursor.position();
                    records.push(cursor.decode_schema(schema)?);
                    // An element that reads nothing would repeat `count` times
                    // without ever running out of input.
                    if count > 1 && cursor.position() == before {
                        return Err(DecodeError::InvalidSize {
                            field: field.name.clone(),
                            value: count as i128,
                        });
                    }
                }
                FieldValue::Records(records)
            }
        },
    };
    Ok(value)
}
