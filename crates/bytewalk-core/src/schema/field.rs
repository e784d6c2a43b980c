use std::sync::Arc;

use super::Schema;
use crate::text::TextEncoding;

/// Byte order for multi-byte fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

/// What a field decodes to.
///
/// Integer and date kinds have a natural width. `Bytes` and `FixedText` need
/// a size; for `NullTerminatedText` the size is an optional maximum length;
/// for `Structure` it is an optional element count. `Enum` reads its base
/// integer kind and attaches a variant name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    Bytes,
    FixedText,
    LengthPrefixedText,
    NullTerminatedText,
    HfsDate,
    UnixDate,
    Enum(Arc<EnumMap>),
    Structure(Arc<Schema>),
}

impl FieldKind {
    pub fn structure(schema: Schema) -> Self {
        FieldKind::Structure(Arc::new(schema))
    }

    pub fn enumeration(map: EnumMap) -> Self {
        FieldKind::Enum(Arc::new(map))
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            FieldKind::U8
                | FieldKind::I8
                | FieldKind::U16
                | FieldKind::I16
                | FieldKind::U32
                | FieldKind::I32
                | FieldKind::U64
                | FieldKind::I64
        )
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FieldKind::FixedText | FieldKind::LengthPrefixedText | FieldKind::NullTerminatedText
        )
    }

    /// Width in bytes for kinds that do not take a size.
    pub fn natural_width(&self) -> Option<usize> {
        match self {
            FieldKind::U8 | FieldKind::I8 => Some(1),
            FieldKind::U16 | FieldKind::I16 => Some(2),
            FieldKind::U32 | FieldKind::I32 | FieldKind::HfsDate | FieldKind::UnixDate => Some(4),
            FieldKind::U64 | FieldKind::I64 => Some(8),
            FieldKind::Enum(map) => map.base.natural_width(),
            _ => None,
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            FieldKind::U8 => "u8",
            FieldKind::I8 => "i8",
            FieldKind::U16 => "u16",
            FieldKind::I16 => "i16",
            FieldKind::U32 => "u32",
            FieldKind::I32 => "i32",
            FieldKind::U64 => "u64",
            FieldKind::I64 => "i64",
            FieldKind::Bytes => "bytes",
            FieldKind::FixedText => "fixed text",
            FieldKind::LengthPrefixedText => "length-prefixed text",
            FieldKind::NullTerminatedText => "null-terminated text",
            FieldKind::HfsDate => "hfs date",
            FieldKind::UnixDate => "unix date",
            FieldKind::Enum(_) => "enum",
            FieldKind::Structure(_) => "structure",
        }
    }
}

/// Variant names for an integer field.
///
/// Values without a name still decode; they carry `None` as their name.
///
/// # Examples
/// ```
/// use bytewalk_core::schema::{EnumMap, FieldKind};
///
/// let kind = EnumMap::new(FieldKind::U8)
///     .variant(0x07, "ntfs")
///     .variant(0x83, "linux");
/// assert_eq!(kind.name_of(0x83), Some("linux"));
/// assert_eq!(kind.name_of(0x42), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMap {
    base: FieldKind,
    variants: Vec<(i128, String)>,
}

impl EnumMap {
    pub fn new(base: FieldKind) -> Self {
        Self {
            base,
            variants: Vec::new(),
        }
    }

    pub fn variant(mut self, value: impl Into<i128>, name: impl Into<String>) -> Self {
        self.variants.push((value.into(), name.into()));
        self
    }

    pub fn base(&self) -> &FieldKind {
        &self.base
    }

    /// First name registered for `value`.
    pub fn name_of(&self, value: i128) -> Option<&str> {
        self.variants
            .iter()
            .find(|(candidate, _)| *candidate == value)
            .map(|(_, name)| name.as_str())
    }
}

/// One field of a [`Schema`], built with chained setters.
///
/// # Examples
/// ```
/// use bytewalk_core::schema::{FieldDescriptor, FieldKind};
///
/// let length = FieldDescriptor::new("name_length", FieldKind::U16).big_endian();
/// let name = FieldDescriptor::new("name", FieldKind::FixedText).size_from("name_length");
/// assert_eq!(name.name(), "name");
/// assert_eq!(length.kind(), &FieldKind::U16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub(crate) name: String,
    pub(crate) kind: FieldKind,
    // `None` defers to the schema's byte order.
    pub(crate) endian: Option<Endian>,
    pub(crate) skip: usize,
    pub(crate) size: usize,
    pub(crate) size_source: Option<String>,
    pub(crate) encoding: Option<TextEncoding>,
    // Index of `size_source`, filled in by `Schema::new`.
    pub(crate) source_index: Option<usize>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            endian: None,
            skip: 0,
            size: 0,
            size_source: None,
            encoding: None,
            source_index: None,
        }
    }

    /// Byte order for this field, overriding [`Schema::with_endian`].
    pub fn endian(mut self, endian: Endian) -> Self {
        self.endian = Some(endian);
        self
    }

    pub fn big_endian(self) -> Self {
        self.endian(Endian::Big)
    }

    /// Bytes to skip before the field is read.
    pub fn skip(mut self, bytes: usize) -> Self {
        self.skip = bytes;
        self
    }

    /// Fixed size; `0` keeps the natural width.
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Take the size from an integer field declared earlier in the schema.
    pub fn size_from(mut self, field: impl Into<String>) -> Self {
        self.size_source = Some(field.into());
        self
    }

    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub(crate) fn text_encoding(&self) -> TextEncoding {
        self.encoding.unwrap_or_default()
    }

    pub(crate) fn has_size(&self) -> bool {
        self.size > 0 || self.size_source.is_some()
    }
}
