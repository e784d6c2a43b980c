use super::layout;
use crate::cursor::Cursor;
use crate::error::DecodeError;
use crate::schema::{FieldDescriptor, FieldKind, Record, Schema};

/// Field list of a ZIP local file header, including the variable-length file
/// name and extra field that follow the fixed part.
pub fn local_file_header_schema() -> Result<Schema, DecodeError> {
    Schema::new(vec![
        FieldDescriptor::new("signature", FieldKind::U32),
        FieldDescriptor::new("version_needed", FieldKind::U16),
        FieldDescriptor::new("flags", FieldKind::U16),
        FieldDescriptor::new("compression_method", FieldKind::U16),
        FieldDescriptor::new("last_modified_time", FieldKind::U16),
        FieldDescriptor::new("last_modified_date", FieldKind::U16),
        FieldDescriptor::new("crc32", FieldKind::U32),
        FieldDescriptor::new("compressed_size", FieldKind::U32),
        FieldDescriptor::new("uncompressed_size", FieldKind::U32),
        FieldDescriptor::new(layout::FILE_NAME_LENGTH, FieldKind::U16),
        FieldDescriptor::new(layout::EXTRA_FIELD_LENGTH, FieldKind::U16),
        FieldDescriptor::new("file_name", FieldKind::FixedText).size_from(layout::FILE_NAME_LENGTH),
        FieldDescriptor::new("extra_field", FieldKind::Bytes).size_from(layout::EXTRA_FIELD_LENGTH),
    ])
}

/// Decode the local file header at the start of `payload`.
///
/// Returns `Ok(None)` when the payload does not start with the local file
/// header signature.
pub fn parse_local_file_header(payload: &[u8]) -> Result<Option<Record>, DecodeError> {
    let mut cursor = Cursor::new(payload);
    let signature = cursor.peek(layout::SIGNATURE_LEN)?;
    if signature != layout::LOCAL_FILE_HEADER_SIGNATURE.to_le_bytes() {
        return Ok(None);
    }

    let schema = local_file_header_schema()?;
    cursor.decode_schema(&schema).map(Some)
}

#[cfg(test)]
mod tests {
    use super::parse_local_file_header;
    use crate::error::DecodeError;
    use crate::layouts::zip::layout;
    use crate::schema::FieldValue;

    const HEADER: [u8; 42] = [
        0x50, 0x4B, 0x03, 0x04, 0x14, 0x00, 0x00, 0x00, 0x08, 0x00, 0x63, 0x54, 0x96, 0x56, 0x45,
        0x7F, 0x6A, 0xBD, 0x5B, 0x02, 0x00, 0x00, 0xF4, 0x08, 0x00, 0x00, 0x0C, 0x00, 0x00, 0x00,
        0x41, 0x75, 0x74, 0x6F, 0x42, 0x79, 0x74, 0x65, 0x2E, 0x73, 0x6C, 0x6E,
    ];

    #[test]
    fn parse_valid_header() {
        let record = parse_local_file_header(&HEADER).unwrap().unwrap();
        let int = |name: &str| record.get(name).and_then(FieldValue::as_u64);

        assert_eq!(int("signature"), Some(u64::from(layout::LOCAL_FILE_HEADER_SIGNATURE)));
        assert_eq!(int("version_needed"), Some(20));
        assert_eq!(int("compression_method"), Some(8));
        assert_eq!(int("crc32"), Some(0xBD6A_7F45));
        assert_eq!(int("compressed_size"), Some(603));
        assert_eq!(int("uncompressed_size"), Some(2292));
        assert_eq!(
            record.get("file_name").and_then(FieldValue::as_str),
            Some("AutoByte.sln")
        );
        assert_eq!(record.get("extra_field").and_then(FieldValue::as_bytes), Some(&[][..]));
    }

    #[test]
    fn parse_non_zip() {
        let mut payload = HEADER;
        payload[0] = 0x00;
        assert!(parse_local_file_header(&payload).unwrap().is_none());
    }

    #[test]
    fn parse_truncated_name() {
        let err = parse_local_file_header(&HEADER[..40]).unwrap_err();
        assert!(matches!(err, DecodeError::Underflow { requested: 12, remaining: 10 }));
    }

    #[test]
    fn parse_short_payload() {
        let err = parse_local_file_header(&HEADER[..layout::SIGNATURE_LEN - 1]).unwrap_err();
        assert!(err.to_string().contains("buffer underflow"));
    }
}
