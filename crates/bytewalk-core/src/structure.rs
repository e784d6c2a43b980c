//! Structure composition: nested records, arrays of records, and stride
//! reconciliation against a declared size.

use crate::cursor::{Cursor, padding_for};
use crate::error::DecodeError;

/// A record that populates itself from a cursor.
///
/// `decode` returns the declared size of the record in bytes, or `0` when no
/// size bookkeeping is wanted. A nonzero declared size makes
/// [`Cursor::decode_structure`] skip forward until the record occupies a
/// multiple of that size, so arrays of records keep a fixed stride even when
/// a record reads fewer meaningful bytes.
///
/// # Examples
/// ```
/// use bytewalk_core::{Cursor, DecodeError, Structure};
///
/// #[derive(Default)]
/// struct Slot {
///     id: u8,
/// }
///
/// impl Structure for Slot {
///     fn decode(&mut self, cursor: &mut Cursor<'_>) -> Result<usize, DecodeError> {
///         self.id = cursor.read_u8()?;
///         Ok(4)
///     }
/// }
///
/// let data = [1, 0, 0, 0, 2, 0, 0, 0];
/// let mut cursor = Cursor::new(&data);
/// let slots = cursor.decode_array::<Slot>(2)?;
/// assert_eq!(slots[1].id, 2);
/// assert_eq!(cursor.remaining(), 0);
/// # Ok::<(), DecodeError>(())
/// ```
pub trait Structure: Default {
    fn decode(&mut self, cursor: &mut Cursor<'_>) -> Result<usize, DecodeError>;
}

impl<'a> Cursor<'a> {
    /// Decode one `T`, then skip any padding its declared size calls for.
    ///
    /// # Errors
    /// Propagates the first error raised while decoding, including an
    /// `Underflow` when the padding itself does not fit. On error the cursor
    /// is back where it started.
    pub fn decode_structure<T: Structure>(&mut self) -> Result<T, DecodeError> {
        let start = self.position();
        let mut structure = T::default();
        let result = structure
            .decode(self)
            .and_then(|declared| self.reconcile(start, declared));
        match result {
            Ok(()) => Ok(structure),
            Err(err) => {
                self.restore(start);
                Err(err)
            }
        }
    }

    /// Decode one `T` and leave the position where it was.
    pub fn peek_structure<T: Structure>(&mut self) -> Result<T, DecodeError> {
        let start = self.position();
        let mut structure = T::default();
        let result = structure.decode(self);
        self.restore(start);
        result.map(|_| structure)
    }

    /// Decode `count` consecutive `T` records.
    ///
    /// # Errors
    /// Besides decode errors, returns `InvalidSize` when `count > 1` and a
    /// record consumes no bytes.
    pub fn decode_array<T: Structure>(&mut self, count: usize) -> Result<Vec<T>, DecodeError> {
        let start = self.position();
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            let before = self.position();
            let result = self.decode_structure::<T>().and_then(|item| {
                if count > 1 && self.position() == before {
                    return Err(DecodeError::InvalidSize {
                        field: std::any::type_name::<T>().to_string(),
                        value: count as i128,
                    });
                }
                Ok(item)
            });
            match result {
                Ok(item) => items.push(item),
                Err(err) => {
                    self.restore(start);
                    return Err(err);
                }
            }
        }
        Ok(items)
    }

    /// Skip forward so the bytes consumed since `start` fill a whole multiple
    /// of `declared`. Consuming more than `declared` is tolerated.
    pub(crate) fn reconcile(&mut self, start: usize, declared: usize) -> Result<(), DecodeError> {
        if declared == 0 {
            return Ok(());
        }
        let consumed = self.position() - start;
        self.skip(padding_for(consumed, declared))
    }
}

/// Decode a single `T` from the start of `bytes`.
///
/// Unlike [`Cursor::decode_structure`] this skips no padding, so `bytes` only
/// has to hold what `T` actually reads.
pub fn decode_from_bytes<T: Structure>(bytes: &[u8]) -> Result<T, DecodeError> {
    let mut structure = T::default();
    structure.decode(&mut Cursor::new(bytes))?;
    Ok(structure)
}
