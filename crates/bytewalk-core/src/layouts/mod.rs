//! Ready-made decoders for well-known on-disk structures.
//!
//! Each layout follows the same split:
//! - `layout`: offsets, sizes and magic values (source of truth)
//! - `parser`: decoding on top of the cursor (no direct byte indexing)
//!
//! `mbr` is written by hand against [`Structure`](crate::Structure); `zip`
//! is described as a [`Schema`](crate::schema::Schema).

pub mod license;
pub mod mbr;
pub mod zip;

use serde::Serialize;

use crate::cursor::Cursor;
use crate::error::DecodeError;
use crate::schema::Record;

pub use license::LicenseText;

/// Selects one of the bundled layouts by name.
///
/// # Examples
/// ```
/// use bytewalk_core::layouts::Layout;
///
/// assert_eq!(Layout::from_name("mbr"), Some(Layout::Mbr));
/// assert_eq!(Layout::Mbr.name(), "mbr");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Mbr,
    ZipLocalHeader,
    LicenseText,
}

/// Output of [`Layout::decode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DecodedLayout {
    Mbr(mbr::MasterBootRecord),
    Record(Record),
    LicenseText(LicenseText),
}

impl Layout {
    pub const ALL: [Layout; 3] = [Layout::Mbr, Layout::ZipLocalHeader, Layout::LicenseText];

    pub fn name(self) -> &'static str {
        match self {
            Layout::Mbr => "mbr",
            Layout::ZipLocalHeader => "zip_local_header",
            Layout::LicenseText => "license_text",
        }
    }

    pub fn from_name(name: &str) -> Option<Layout> {
        Layout::ALL.into_iter().find(|layout| layout.name() == name)
    }

    /// Decode `bytes` from the start as this layout.
    ///
    /// # Errors
    /// Propagates decoding errors. The ZIP layout does not check the header
    /// signature; use [`zip::parse_local_file_header`] to reject other data.
    pub fn decode(self, bytes: &[u8]) -> Result<DecodedLayout, DecodeError> {
        let mut cursor = Cursor::new(bytes);
        match self {
            Layout::Mbr => cursor.decode_structure().map(DecodedLayout::Mbr),
            Layout::ZipLocalHeader => {
                let schema = zip::local_file_header_schema()?;
                cursor.decode_schema(&schema).map(DecodedLayout::Record)
            }
            Layout::LicenseText => cursor.decode_structure().map(DecodedLayout::LicenseText),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DecodedLayout, Layout};

    #[test]
    fn names_round_trip() {
        for layout in Layout::ALL {
            assert_eq!(Layout::from_name(layout.name()), Some(layout));
        }
        assert_eq!(Layout::from_name("fat32"), None);
    }

    #[test]
    fn license_layout_decodes() {
        let data = [0x02, 0x00, b'o', b'k'];
        let decoded = Layout::LicenseText.decode(&data).unwrap();
        match decoded {
            DecodedLayout::LicenseText(license) => assert_eq!(license.text, "ok"),
            other => panic!("unexpected layout output: {other:?}"),
        }
    }
}
