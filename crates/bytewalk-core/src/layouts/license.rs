use serde::Serialize;

use crate::cursor::Cursor;
use crate::error::DecodeError;
use crate::structure::Structure;
use crate::text::TextEncoding;

/// UTF-8 text preceded by a signed little-endian 16-bit byte count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LicenseText {
    pub length: i16,
    pub text: String,
}

impl Structure for LicenseText {
    fn decode(&mut self, cursor: &mut Cursor<'_>) -> Result<usize, DecodeError> {
        self.length = cursor.read_i16_le()?;
        let length = usize::try_from(self.length).map_err(|_| DecodeError::InvalidSize {
            field: "text".to_string(),
            value: i128::from(self.length),
        })?;
        self.text = cursor.fixed_text(TextEncoding::Utf8, length)?;
        Ok(0)
    }
}
