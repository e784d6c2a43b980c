use serde::Serialize;

use super::layout;
use crate::cursor::Cursor;
use crate::error::DecodeError;
use crate::schema::serialize_hex;
use crate::structure::Structure;

/// Partition type byte of an MBR partition entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionType {
    #[default]
    Empty,
    Fat12,
    XenixRoot,
    XenixUser,
    Fat16,
    Extended,
    Fat32,
    Fat32Lba,
    Linux,
    Unknown(u8),
}

impl From<u8> for PartitionType {
    fn from(value: u8) -> Self {
        match value {
            0x00 => PartitionType::Empty,
            0x01 => PartitionType::Fat12,
            0x02 => PartitionType::XenixRoot,
            0x03 => PartitionType::XenixUser,
            0x04 => PartitionType::Fat16,
            0x05 => PartitionType::Extended,
            0x0B => PartitionType::Fat32,
            0x0C => PartitionType::Fat32Lba,
            0x83 => PartitionType::Linux,
            other => PartitionType::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartitionEntry {
    pub boot_indicator: u8,
    #[serde(serialize_with = "serialize_hex")]
    pub starting_chs: [u8; layout::CHS_LEN],
    pub partition_type: PartitionType,
    #[serde(serialize_with = "serialize_hex")]
    pub ending_chs: [u8; layout::CHS_LEN],
    pub starting_lba: u32,
    pub size_in_lba: u32,
}

impl PartitionEntry {
    pub fn is_active(&self) -> bool {
        self.boot_indicator == layout::BOOT_INDICATOR_ACTIVE
    }

    pub fn is_empty(&self) -> bool {
        self.partition_type == PartitionType::Empty
    }
}

impl Structure for PartitionEntry {
    fn decode(&mut self, cursor: &mut Cursor<'_>) -> Result<usize, DecodeError> {
        self.boot_indicator = cursor.read_u8()?;
        self.starting_chs.copy_from_slice(cursor.take(layout::CHS_LEN)?);
        self.partition_type = PartitionType::from(cursor.read_u8()?);
        self.ending_chs.copy_from_slice(cursor.take(layout::CHS_LEN)?);
        self.starting_lba = cursor.read_u32_le()?;
        self.size_in_lba = cursor.read_u32_le()?;
        Ok(layout::PARTITION_ENTRY_SIZE)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MasterBootRecord {
    #[serde(serialize_with = "serialize_hex")]
    pub boot_code: Vec<u8>,
    pub partitions: Vec<PartitionEntry>,
    pub boot_signature: u16,
}

impl MasterBootRecord {
    pub fn has_valid_signature(&self) -> bool {
        self.boot_signature == layout::BOOT_SIGNATURE
    }
}

impl Structure for MasterBootRecord {
    fn decode(&mut self, cursor: &mut Cursor<'_>) -> Result<usize, DecodeError> {
        self.boot_code = cursor.read_bytes(layout::BOOT_CODE_LEN)?;
        self.partitions = cursor.decode_array(layout::PARTITION_COUNT)?;
        self.boot_signature = cursor.read_u16_le()?;
        Ok(0)
    }
}

/// Decode a master boot record from the first sector of a disk image.
///
/// # Errors
/// Returns `DecodeError::Underflow` when `sector` is shorter than an MBR.
pub fn parse_mbr(sector: &[u8]) -> Result<MasterBootRecord, DecodeError> {
    Cursor::new(sector).decode_structure()
}
