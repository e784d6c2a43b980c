//! Forward-only, bounds-checked cursor over an immutable byte buffer.
//!
//! Every advancing read goes through [`Cursor::take`], so a failed read never
//! moves the position. Primitive reads take exactly their natural width and
//! decode it with a fixed endianness.

use crate::error::DecodeError;

/// Read position over a borrowed byte buffer.
///
/// # Examples
/// ```
/// use bytewalk_core::Cursor;
///
/// let data = [0x01, 0x02, 0x03];
/// let mut cursor = Cursor::new(&data);
/// assert_eq!(cursor.read_u16_be()?, 0x0102);
/// assert_eq!(cursor.remaining(), 1);
/// # Ok::<(), bytewalk_core::DecodeError>(())
/// ```
#[derive(Debug)]
pub struct Cursor<'a> {
    buffer: &'a [u8],
    position: usize,
}

macro_rules! read_primitive {
    ($(#[$doc:meta] $name:ident => $ty:ty, $from:ident;)*) => {
        $(
            #[$doc]
            pub fn $name(&mut self) -> Result<$ty, DecodeError> {
                let bytes = self.take_array::<{ std::mem::size_of::<$ty>() }>()?;
                Ok(<$ty>::$from(bytes))
            }
        )*
    };
}

impl<'a> Cursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Return a view of the next `n` bytes and advance past them.
    ///
    /// # Errors
    /// Returns `DecodeError::Underflow` when fewer than `n` bytes remain; the
    /// position is left unchanged.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let bytes = self.peek(n)?;
        self.position += n;
        Ok(bytes)
    }

    /// Return a view of the next `n` bytes without advancing.
    pub fn peek(&self, n: usize) -> Result<&'a [u8], DecodeError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(DecodeError::Underflow {
                requested: n,
                remaining,
            });
        }
        Ok(&self.buffer[self.position..self.position + n])
    }

    pub fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
        self.take(n).map(|_| ())
    }

    /// Copy the next `n` bytes out of the buffer.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, DecodeError> {
        self.take(n).map(<[u8]>::to_vec)
    }

    /// Copy the next `length` bytes, then skip forward so the run occupies a
    /// multiple of `align` bytes.
    ///
    /// # Examples
    /// ```
    /// use bytewalk_core::Cursor;
    ///
    /// let data = [1, 2, 3, 0, 9];
    /// let mut cursor = Cursor::new(&data);
    /// assert_eq!(cursor.read_bytes_aligned(3, 4)?, vec![1, 2, 3]);
    /// assert_eq!(cursor.read_u8()?, 9);
    /// # Ok::<(), bytewalk_core::DecodeError>(())
    /// ```
    pub fn read_bytes_aligned(&mut self, length: usize, align: usize) -> Result<Vec<u8>, DecodeError> {
        let start = self.position;
        let bytes = self.read_bytes(length)?;
        if let Err(err) = self.align_to(length, align) {
            self.position = start;
            return Err(err);
        }
        Ok(bytes)
    }

    /// Skip the padding that follows a run of `size` bytes aligned to `align`.
    ///
    /// An `align` of zero means no alignment.
    pub fn align_to(&mut self, size: usize, align: usize) -> Result<(), DecodeError> {
        self.skip(padding_for(size, align))
    }

    /// Move back to `position`, which must have been obtained from this cursor.
    pub(crate) fn restore(&mut self, position: usize) {
        debug_assert!(position <= self.buffer.len());
        self.position = position;
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let bytes = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    read_primitive! {
        /// Read one unsigned byte.
        read_u8 => u8, from_le_bytes;
        /// Read one signed byte.
        read_i8 => i8, from_le_bytes;
        /// Read a little-endian `u16`.
        read_u16_le => u16, from_le_bytes;
        /// Read a big-endian `u16`.
        read_u16_be => u16, from_be_bytes;
        /// Read a little-endian `i16`.
        read_i16_le => i16, from_le_bytes;
        /// Read a big-endian `i16`.
        read_i16_be => i16, from_be_bytes;
        /// Read a little-endian `u32`.
        read_u32_le => u32, from_le_bytes;
        /// Read a big-endian `u32`.
        read_u32_be => u32, from_be_bytes;
        /// Read a little-endian `i32`.
        read_i32_le => i32, from_le_bytes;
        /// Read a big-endian `i32`.
        read_i32_be => i32, from_be_bytes;
        /// Read a little-endian `u64`.
        read_u64_le => u64, from_le_bytes;
        /// Read a big-endian `u64`.
        read_u64_be => u64, from_be_bytes;
        /// Read a little-endian `i64`.
        read_i64_le => i64, from_le_bytes;
        /// Read a big-endian `i64`.
        read_i64_be => i64, from_be_bytes;
    }
}

/// Bytes needed to round `size` up to the next multiple of `align`.
pub(crate) fn padding_for(size: usize, align: usize) -> usize {
    if align == 0 {
        return 0;
    }
    match size % align {
        0 => 0,
        rem => align - rem,
    }
}
