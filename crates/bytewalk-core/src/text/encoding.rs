use std::fmt;
use std::str::FromStr;

use encoding_rs::Encoding;

use crate::error::DecodeError;

/// Character encodings understood by the text readers.
///
/// Decoding is lossy: malformed sequences become U+FFFD rather than errors.
/// Legacy code pages go through `encoding_rs`.
///
/// # Examples
/// ```
/// use bytewalk_core::TextEncoding;
///
/// let encoding: TextEncoding = "UTF-16BE".parse()?;
/// assert_eq!(encoding.decode(&[0x00, 0x48, 0x00, 0x69]), "Hi");
/// # Ok::<(), bytewalk_core::DecodeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    Ascii,
    Latin1,
    Utf7,
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
    Legacy(&'static Encoding),
}

impl TextEncoding {
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Ascii => bytes
                .iter()
                .map(|&b| if b.is_ascii() { b as char } else { char::REPLACEMENT_CHARACTER })
                .collect(),
            TextEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
            TextEncoding::Utf7 => decode_utf7(bytes),
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            TextEncoding::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
            TextEncoding::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            TextEncoding::Utf32Le => decode_utf32(bytes, u32::from_le_bytes),
            TextEncoding::Utf32Be => decode_utf32(bytes, u32::from_be_bytes),
            TextEncoding::Legacy(encoding) => {
                encoding.decode_without_bom_handling(bytes).0.into_owned()
            }
        }
    }

    /// Look up a Windows code page number.
    ///
    /// # Errors
    /// Returns `DecodeError::UnknownEncoding` for code pages without a decoder.
    ///
    /// # Examples
    /// ```
    /// use bytewalk_core::TextEncoding;
    ///
    /// let cp1250 = TextEncoding::from_code_page(1250)?;
    /// assert_eq!(cp1250.decode(&[0x9a, 0x9d]), "\u{161}\u{165}");
    /// # Ok::<(), bytewalk_core::DecodeError>(())
    /// ```
    pub fn from_code_page(code_page: u16) -> Result<Self, DecodeError> {
        let legacy = match code_page {
            20127 => return Ok(TextEncoding::Ascii),
            28591 => return Ok(TextEncoding::Latin1),
            65000 => return Ok(TextEncoding::Utf7),
            65001 => return Ok(TextEncoding::Utf8),
            1200 => return Ok(TextEncoding::Utf16Le),
            1201 => return Ok(TextEncoding::Utf16Be),
            12000 => return Ok(TextEncoding::Utf32Le),
            12001 => return Ok(TextEncoding::Utf32Be),
            866 => encoding_rs::IBM866,
            874 => encoding_rs::WINDOWS_874,
            932 => encoding_rs::SHIFT_JIS,
            936 => encoding_rs::GBK,
            949 => encoding_rs::EUC_KR,
            950 => encoding_rs::BIG5,
            1250 => encoding_rs::WINDOWS_1250,
            1251 => encoding_rs::WINDOWS_1251,
            1252 => encoding_rs::WINDOWS_1252,
            1253 => encoding_rs::WINDOWS_1253,
            1254 => encoding_rs::WINDOWS_1254,
            1255 => encoding_rs::WINDOWS_1255,
            1256 => encoding_rs::WINDOWS_1256,
            1257 => encoding_rs::WINDOWS_1257,
            1258 => encoding_rs::WINDOWS_1258,
            10000 => encoding_rs::MACINTOSH,
            20866 => encoding_rs::KOI8_R,
            21866 => encoding_rs::KOI8_U,
            28592 => encoding_rs::ISO_8859_2,
            28593 => encoding_rs::ISO_8859_3,
            28594 => encoding_rs::ISO_8859_4,
            28595 => encoding_rs::ISO_8859_5,
            28596 => encoding_rs::ISO_8859_6,
            28597 => encoding_rs::ISO_8859_7,
            28598 => encoding_rs::ISO_8859_8,
            28603 => encoding_rs::ISO_8859_13,
            28605 => encoding_rs::ISO_8859_15,
            51932 => encoding_rs::EUC_JP,
            54936 => encoding_rs::GB18030,
            _ => {
                return Err(DecodeError::UnknownEncoding {
                    name: format!("code page {code_page}"),
                });
            }
        };
        Ok(TextEncoding::Legacy(legacy))
    }

    fn name(self) -> &'static str {
        match self {
            TextEncoding::Ascii => "ascii",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Utf7 => "utf-7",
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf16Le => "utf-16le",
            TextEncoding::Utf16Be => "utf-16be",
            TextEncoding::Utf32Le => "utf-32le",
            TextEncoding::Utf32Be => "utf-32be",
            TextEncoding::Legacy(encoding) => encoding.name(),
        }
    }
}

// A trailing partial code unit decodes as a single replacement character.
fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let chunks = bytes.chunks_exact(2);
    let partial = !chunks.remainder().is_empty();
    let mut text: String = char::decode_utf16(chunks.map(|c| unit([c[0], c[1]])))
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if partial {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}

fn decode_utf32(bytes: &[u8], unit: fn([u8; 4]) -> u32) -> String {
    let chunks = bytes.chunks_exact(4);
    let partial = !chunks.remainder().is_empty();
    let mut text: String = chunks
        .map(|c| char::from_u32(unit([c[0], c[1], c[2], c[3]])).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if partial {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}

// RFC 2152: `+` opens a modified-base64 run of UTF-16BE units, closed by any
// non-base64 byte. A closing `-` is absorbed and `+-` is a literal plus.
fn decode_utf7(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    let mut units = Vec::new();
    let mut iter = bytes.iter().copied().peekable();

    while let Some(byte) = iter.next() {
        if byte != b'+' {
            text.push(if byte.is_ascii() { byte as char } else { char::REPLACEMENT_CHARACTER });
            continue;
        }
        if iter.next_if_eq(&b'-').is_some() {
            text.push('+');
            continue;
        }

        units.clear();
        let mut bits: u32 = 0;
        let mut width: u32 = 0;
        while let Some(sextet) = iter.peek().copied().and_then(base64_value) {
            iter.next();
            bits = (bits << 6) | u32::from(sextet);
            width += 6;
            if width >= 16 {
                width -= 16;
                units.push((bits >> width) as u16);
                bits &= (1 << width) - 1;
            }
        }
        iter.next_if_eq(&b'-');
        text.extend(
            char::decode_utf16(units.iter().copied())
                .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
        );
    }
    text
}

fn base64_value(byte: u8) -> Option<u8> {
    match byte {
        b'A'..=b'Z' => Some(byte - b'A'),
        b'a'..=b'z' => Some(byte - b'a' + 26),
        b'0'..=b'9' => Some(byte - b'0' + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        let encoding = match normalized.as_str() {
            "ascii" | "us-ascii" => TextEncoding::Ascii,
            "latin-1" | "latin1" | "iso-8859-1" => TextEncoding::Latin1,
            "utf-7" | "utf7" => TextEncoding::Utf7,
            "utf-8" | "utf8" => TextEncoding::Utf8,
            "utf-16" | "utf-16le" | "utf16le" | "unicode" => TextEncoding::Utf16Le,
            "utf-16be" | "utf16be" | "bigendianunicode" => TextEncoding::Utf16Be,
            "utf-32" | "utf-32le" | "utf32le" => TextEncoding::Utf32Le,
            "utf-32be" | "utf32be" => TextEncoding::Utf32Be,
            _ => match Encoding::for_label(s.trim().as_bytes()) {
                Some(encoding) => TextEncoding::Legacy(encoding),
                None => {
                    return Err(DecodeError::UnknownEncoding {
                        name: s.to_string(),
                    });
                }
            },
        };
        Ok(encoding)
    }
}

#[cfg(test)]
mod tests {
    use super::TextEncoding;
    use crate::error::DecodeError;

    #[test]
    fn ascii_replaces_high_bytes() {
        assert_eq!(TextEncoding::Ascii.decode(b"Hi\xe9"), "Hi\u{fffd}");
    }

    #[test]
    fn latin1_maps_bytes_to_code_points() {
        assert_eq!(TextEncoding::Latin1.decode(b"caf\xe9"), "café");
    }

    #[test]
    fn utf8_is_lossy() {
        assert_eq!(TextEncoding::Utf8.decode(b"ok\xff"), "ok\u{fffd}");
        assert_eq!(TextEncoding::Utf8.decode("žluť".as_bytes()), "žluť");
    }

    #[test]
    fn utf16_both_orders() {
        assert_eq!(TextEncoding::Utf16Le.decode(&[0x48, 0x00, 0x69, 0x00]), "Hi");
        assert_eq!(TextEncoding::Utf16Be.decode(&[0x00, 0x48, 0x00, 0x69]), "Hi");
        assert_eq!(TextEncoding::Utf16Le.decode(&[0x3d, 0xd8, 0x00, 0xde]), "😀");
        assert_eq!(TextEncoding::Utf16Le.decode(&[0x48, 0x00, 0x69]), "H\u{fffd}");
    }

    #[test]
    fn utf32_both_orders() {
        assert_eq!(TextEncoding::Utf32Le.decode(&[0x41, 0, 0, 0]), "A");
        assert_eq!(TextEncoding::Utf32Be.decode(&[0, 0, 0, 0x41]), "A");
        assert_eq!(TextEncoding::Utf32Be.decode(&[0, 0x11, 0, 0]), "\u{fffd}");
    }

    #[test]
    fn parse_names_case_insensitive() {
        assert_eq!("UTF8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert_eq!("Unicode".parse::<TextEncoding>().unwrap(), TextEncoding::Utf16Le);
        assert_eq!("utf_32be".parse::<TextEncoding>().unwrap(), TextEncoding::Utf32Be);
        assert_eq!(TextEncoding::Latin1.to_string(), "latin-1");
    }

    #[test]
    fn utf7_shifted_runs() {
        assert_eq!(TextEncoding::Utf7.decode(b"Hi Mom -+Jjo--!"), "Hi Mom -\u{263a}-!");
        assert_eq!(TextEncoding::Utf7.decode(b"A+ImIDkQ."), "A\u{2262}\u{391}.");
        assert_eq!(TextEncoding::Utf7.decode(b"1 +- 1"), "1 + 1");
    }

    #[test]
    fn code_pages() {
        let cp1252 = TextEncoding::from_code_page(1252).unwrap();
        assert_eq!(cp1252.decode(b"\x80 5"), "\u{20ac} 5");
        assert_eq!(cp1252.to_string(), "windows-1252");
        assert_eq!(TextEncoding::from_code_page(65000).unwrap(), TextEncoding::Utf7);
        let cp932 = TextEncoding::from_code_page(932).unwrap();
        assert_eq!(cp932.decode(&[0x82, 0xa0]), "\u{3042}");

        let err = TextEncoding::from_code_page(37).unwrap_err();
        assert!(err.to_string().contains("code page 37"));
    }

    #[test]
    fn parse_legacy_labels() {
        let koi8: TextEncoding = "KOI8-R".parse().unwrap();
        assert_eq!(koi8, TextEncoding::from_code_page(20866).unwrap());
        assert_eq!("UTF-7".parse::<TextEncoding>().unwrap(), TextEncoding::Utf7);
    }

    #[test]
    fn parse_unknown_name() {
        let err = "ebcdic".parse::<TextEncoding>().unwrap_err();
        assert!(matches!(err, DecodeError::UnknownEncoding { .. }));
        assert!(err.to_string().contains("ebcdic"));
    }
}
