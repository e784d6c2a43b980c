use super::encoding::TextEncoding;
use crate::cursor::Cursor;
use crate::error::DecodeError;

impl<'a> Cursor<'a> {
    /// Decode the next `n` bytes as text.
    pub fn fixed_text(&mut self, encoding: TextEncoding, n: usize) -> Result<String, DecodeError> {
        let bytes = self.take(n)?;
        Ok(encoding.decode(bytes))
    }

    /// Decode the next `n` bytes as text without advancing.
    pub fn peek_text(&self, encoding: TextEncoding, n: usize) -> Result<String, DecodeError> {
        let bytes = self.peek(n)?;
        Ok(encoding.decode(bytes))
    }

    /// Decode a Pascal string: one length byte followed by that many bytes.
    ///
    /// # Examples
    /// ```
    /// use bytewalk_core::{Cursor, TextEncoding};
    ///
    /// let data = [0x02, b'o', b'k'];
    /// let mut cursor = Cursor::new(&data);
    /// assert_eq!(cursor.length_prefixed_text(TextEncoding::Ascii)?, "ok");
    /// # Ok::<(), bytewalk_core::DecodeError>(())
    /// ```
    pub fn length_prefixed_text(&mut self, encoding: TextEncoding) -> Result<String, DecodeError> {
        let start = self.position();
        let length = self.read_u8()?;
        self.fixed_text(encoding, usize::from(length)).inspect_err(|_| self.restore(start))
    }

    /// Decode a C string.
    ///
    /// The terminator is consumed but not included in the text. When
    /// `max_length` is given and no terminator occurs within it, exactly
    /// `max_length` bytes are decoded instead.
    ///
    /// # Errors
    /// Returns `DecodeError::UnterminatedString` when no terminator exists
    /// and no `max_length` bounds the read.
    pub fn null_terminated_text(
        &mut self,
        encoding: TextEncoding,
        max_length: Option<usize>,
    ) -> Result<String, DecodeError> {
        let rest = self.peek(self.remaining())?;
        let terminator = rest.iter().position(|&b| b == 0);

        match (terminator, max_length) {
            (Some(run), None) => self.terminated_run(encoding, run),
            (Some(run), Some(max)) if run <= max => self.terminated_run(encoding, run),
            (_, Some(max)) => self.fixed_text(encoding, max),
            (None, None) => Err(DecodeError::UnterminatedString {
                remaining: rest.len(),
            }),
        }
    }

    fn terminated_run(&mut self, encoding: TextEncoding, run: usize) -> Result<String, DecodeError> {
        let text = self.fixed_text(encoding, run)?;
        self.skip(1)?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use crate::cursor::Cursor;
    use crate::error::DecodeError;
    use crate::text::TextEncoding;

    const HELLO_MATT: [u8; 11] = [0x48, 0x65, 0x6C, 0x6C, 0x6F, 0x00, 0x4D, 0x61, 0x74, 0x74, 0x00];

    #[test]
    fn fixed_text_reads_exact_length() {
        let mut cursor = Cursor::new(b"abcdef");
        assert_eq!(cursor.fixed_text(TextEncoding::Utf8, 4).unwrap(), "abcd");
        assert_eq!(cursor.remaining(), 2);
    }

    #[test]
    fn fixed_text_underflow() {
        let mut cursor = Cursor::new(b"abc");
        let err = cursor.fixed_text(TextEncoding::Utf8, 4).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Underflow {
                requested: 4,
                remaining: 3
            }
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn peek_then_fixed_text_advance_once() {
        let mut cursor = Cursor::new(b"PK\x03\x04rest");
        let peeked = cursor.peek_text(TextEncoding::Ascii, 2).unwrap();
        assert_eq!(cursor.position(), 0);
        let taken = cursor.fixed_text(TextEncoding::Ascii, 2).unwrap();
        assert_eq!(peeked, taken);
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn null_terminated_sequence() {
        let mut cursor = Cursor::new(&HELLO_MATT);
        assert_eq!(cursor.null_terminated_text(TextEncoding::Ascii, None).unwrap(), "Hello");
        assert_eq!(cursor.null_terminated_text(TextEncoding::Ascii, None).unwrap(), "Matt");
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn null_terminated_without_terminator() {
        let mut cursor = Cursor::new(&HELLO_MATT[..5]);
        let err = cursor.null_terminated_text(TextEncoding::Ascii, None).unwrap_err();
        assert_eq!(err, DecodeError::UnterminatedString { remaining: 5 });
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn null_terminated_within_max_consumes_terminator() {
        let mut cursor = Cursor::new(&HELLO_MATT);
        assert_eq!(cursor.null_terminated_text(TextEncoding::Ascii, Some(5)).unwrap(), "Hello");
        assert_eq!(cursor.position(), 6);
    }

    #[test]
    fn null_terminated_beyond_max_takes_max_bytes() {
        let mut cursor = Cursor::new(&HELLO_MATT);
        assert_eq!(cursor.null_terminated_text(TextEncoding::Ascii, Some(3)).unwrap(), "Hel");
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn null_terminated_missing_with_max() {
        let mut cursor = Cursor::new(b"abcdef");
        assert_eq!(cursor.null_terminated_text(TextEncoding::Ascii, Some(4)).unwrap(), "abcd");
        assert_eq!(cursor.remaining(), 2);

        let err = cursor.null_terminated_text(TextEncoding::Ascii, Some(4)).unwrap_err();
        assert!(matches!(err, DecodeError::Underflow { requested: 4, remaining: 2 }));
    }

    #[test]
    fn null_terminated_empty_run() {
        let mut cursor = Cursor::new(&[0x00, 0x41]);
        assert_eq!(cursor.null_terminated_text(TextEncoding::Ascii, None).unwrap(), "");
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn length_prefixed_hello_world() {
        let data = [0x0B, 0x48, 0x65, 0x6C, 0x6C, 0x6F, 0x20, 0x57, 0x6F, 0x72, 0x6C, 0x64];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.length_prefixed_text(TextEncoding::Ascii).unwrap(), "Hello World");
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn length_prefixed_empty() {
        let mut cursor = Cursor::new(&[0x00, 0x41]);
        assert_eq!(cursor.length_prefixed_text(TextEncoding::Utf8).unwrap(), "");
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn length_prefixed_short_body_rolls_back() {
        let mut cursor = Cursor::new(&[0x05, 0x41, 0x42]);
        let err = cursor.length_prefixed_text(TextEncoding::Utf8).unwrap_err();
        assert!(matches!(err, DecodeError::Underflow { requested: 5, remaining: 2 }));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn utf16_fixed_text() {
        let mut cursor = Cursor::new(&[0x4f, 0x00, 0x4b, 0x00]);
        assert_eq!(cursor.fixed_text(TextEncoding::Utf16Le, 4).unwrap(), "OK");
    }
}
