use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// A decoded field value.
///
/// Serializes as plain JSON data: integers as numbers, byte arrays as
/// lowercase hex, timestamps as RFC 3339 strings, records as objects. Enum
/// values serialize as their variant name, or as the raw number when the
/// value has no name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    Bytes(Vec<u8>),
    Text(String),
    Timestamp(OffsetDateTime),
    Enum {
        value: Box<FieldValue>,
        name: Option<String>,
    },
    Record(Record),
    Records(Vec<Record>),
}

impl FieldValue {
    /// Any integer variant, widened losslessly. Enum values yield their raw
    /// number.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            FieldValue::Enum { value, .. } => value.as_i128(),
            FieldValue::U8(v) => Some(i128::from(*v)),
            FieldValue::I8(v) => Some(i128::from(*v)),
            FieldValue::U16(v) => Some(i128::from(*v)),
            FieldValue::I16(v) => Some(i128::from(*v)),
            FieldValue::U32(v) => Some(i128::from(*v)),
            FieldValue::I32(v) => Some(i128::from(*v)),
            FieldValue::U64(v) => Some(i128::from(*v)),
            FieldValue::I64(v) => Some(i128::from(*v)),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_i128().and_then(|v| u64::try_from(v).ok())
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_i128().and_then(|v| i64::try_from(v).ok())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn variant_name(&self) -> Option<&str> {
        match self {
            FieldValue::Enum { name, .. } => name.as_deref(),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<OffsetDateTime> {
        match self {
            FieldValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            FieldValue::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_records(&self) -> Option<&[Record]> {
        match self {
            FieldValue::Records(records) => Some(records),
            _ => None,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::U8(v) => serializer.serialize_u8(*v),
            FieldValue::I8(v) => serializer.serialize_i8(*v),
            FieldValue::U16(v) => serializer.serialize_u16(*v),
            FieldValue::I16(v) => serializer.serialize_i16(*v),
            FieldValue::U32(v) => serializer.serialize_u32(*v),
            FieldValue::I32(v) => serializer.serialize_i32(*v),
            FieldValue::U64(v) => serializer.serialize_u64(*v),
            FieldValue::I64(v) => serializer.serialize_i64(*v),
            FieldValue::Bytes(bytes) => serialize_hex(bytes, serializer),
            FieldValue::Text(text) => serializer.serialize_str(text),
            FieldValue::Timestamp(ts) => {
                let text = ts.format(&Rfc3339).map_err(S::Error::custom)?;
                serializer.serialize_str(&text)
            }
            FieldValue::Enum {
                name: Some(name), ..
            } => serializer.serialize_str(name),
            FieldValue::Enum { value, name: None } => value.serialize(serializer),
            FieldValue::Record(record) => record.serialize(serializer),
            FieldValue::Records(records) => records.serialize(serializer),
        }
    }
}

/// Field values in declaration order.
///
/// # Examples
/// ```
/// use bytewalk_core::schema::{FieldDescriptor, FieldKind, Schema};
/// use bytewalk_core::Cursor;
///
/// let schema = Schema::new(vec![FieldDescriptor::new("id", FieldKind::U16).big_endian()])?;
/// let record = Cursor::new(&[0x01, 0x02]).decode_schema(&schema)?;
/// assert_eq!(record.get("id").and_then(|v| v.as_u64()), Some(0x0102));
/// # Ok::<(), bytewalk_core::DecodeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, name: String, value: FieldValue) {
        self.fields.push((name, value));
    }

    pub(crate) fn value_at(&self, index: usize) -> Option<&FieldValue> {
        self.fields.get(index).map(|(_, value)| value)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

pub(crate) fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

pub(crate) fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_hex(bytes))
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::{FieldValue, Record, to_hex};

    #[test]
    fn integer_accessors_widen() {
        assert_eq!(FieldValue::I16(-3).as_i64(), Some(-3));
        assert_eq!(FieldValue::I16(-3).as_u64(), None);
        assert_eq!(FieldValue::U64(u64::MAX).as_i64(), None);
        assert_eq!(FieldValue::U64(u64::MAX).as_u64(), Some(u64::MAX));
        assert_eq!(FieldValue::Text("x".to_string()).as_i128(), None);
    }

    #[test]
    fn hex_is_lowercase() {
        assert_eq!(to_hex(&[0x00, 0xAB, 0x7f]), "00ab7f");
    }

    #[test]
    fn record_serializes_in_declaration_order() {
        let mut record = Record::default();
        record.push("zeta".to_string(), FieldValue::U8(1));
        record.push("alpha".to_string(), FieldValue::Bytes(vec![0xde, 0xad]));
        record.push(
            "when".to_string(),
            FieldValue::Timestamp(datetime!(1980-08-21 19:45:00 UTC)),
        );

        let json = serde_json::to_string(&record).expect("record json");
        assert_eq!(
            json,
            r#"{"zeta":1,"alpha":"dead","when":"1980-08-21T19:45:00Z"}"#
        );
    }

    #[test]
    fn nested_records_serialize_as_arrays() {
        let mut inner = Record::default();
        inner.push("v".to_string(), FieldValue::I8(-1));
        let mut outer = Record::default();
        outer.push("items".to_string(), FieldValue::Records(vec![inner.clone(), inner]));

        let value = serde_json::to_value(&outer).expect("record json");
        assert_eq!(value["items"][1]["v"], -1);
        assert_eq!(outer.get("items").and_then(|v| v.as_records()).map(|r| r.len()), Some(2));
    }

    #[test]
    fn enum_values_serialize_by_name() {
        let named = FieldValue::Enum {
            value: Box::new(FieldValue::U8(0x83)),
            name: Some("linux".to_string()),
        };
        let unnamed = FieldValue::Enum {
            value: Box::new(FieldValue::U8(0x42)),
            name: None,
        };
        assert_eq!(named.as_u64(), Some(0x83));
        assert_eq!(named.variant_name(), Some("linux"));
        assert_eq!(unnamed.variant_name(), None);

        let mut record = Record::default();
        record.push("kind".to_string(), named);
        record.push("other".to_string(), unnamed);
        let json = serde_json::to_string(&record).expect("record json");
        assert_eq!(json, r#"{"kind":"linux","other":66}"#);
    }
}
