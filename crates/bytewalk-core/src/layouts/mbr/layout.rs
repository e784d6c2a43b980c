pub const BOOT_CODE_LEN: usize = 446;
pub const PARTITION_COUNT: usize = 4;
pub const PARTITION_ENTRY_SIZE: usize = 16;
pub const CHS_LEN: usize = 3;

pub const BOOT_SIGNATURE: u16 = 0xAA55;
pub const BOOT_INDICATOR_ACTIVE: u8 = 0x80;

pub const MBR_SIZE: usize = BOOT_CODE_LEN + PARTITION_COUNT * PARTITION_ENTRY_SIZE + 2;
