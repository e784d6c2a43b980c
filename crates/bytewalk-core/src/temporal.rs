//! Epoch-relative timestamps stored as unsigned 32-bit second counters.
//!
//! HFS volumes count from 1904-01-01, C `time_t` values from 1970-01-01.
//! Both are read as plain UTC offsets: no time zones, no leap seconds.

use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::cursor::Cursor;
use crate::error::DecodeError;

/// Midnight UTC on 1904-01-01.
pub const HFS_EPOCH: OffsetDateTime = datetime!(1904-01-01 0:00 UTC);
/// Midnight UTC on 1970-01-01.
pub const UNIX_EPOCH: OffsetDateTime = OffsetDateTime::UNIX_EPOCH;

/// Add `seconds` to `epoch`.
///
/// # Examples
/// ```
/// use bytewalk_core::temporal::{UNIX_EPOCH, from_epoch_seconds};
///
/// let ts = from_epoch_seconds(UNIX_EPOCH, 86_400);
/// assert_eq!(ts.day(), 2);
/// ```
pub fn from_epoch_seconds(epoch: OffsetDateTime, seconds: u32) -> OffsetDateTime {
    epoch + Duration::seconds(i64::from(seconds))
}

impl<'a> Cursor<'a> {
    pub fn read_hfs_date_le(&mut self) -> Result<OffsetDateTime, DecodeError> {
        Ok(from_epoch_seconds(HFS_EPOCH, self.read_u32_le()?))
    }

    pub fn read_hfs_date_be(&mut self) -> Result<OffsetDateTime, DecodeError> {
        Ok(from_epoch_seconds(HFS_EPOCH, self.read_u32_be()?))
    }

    pub fn read_unix_date_le(&mut self) -> Result<OffsetDateTime, DecodeError> {
        Ok(from_epoch_seconds(UNIX_EPOCH, self.read_u32_le()?))
    }

    pub fn read_unix_date_be(&mut self) -> Result<OffsetDateTime, DecodeError> {
        Ok(from_epoch_seconds(UNIX_EPOCH, self.read_u32_be()?))
    }
}
