pub const LOCAL_FILE_HEADER_SIGNATURE: u32 = 0x0403_4B50;
pub const LOCAL_FILE_HEADER_FIXED_LEN: usize = 30;
pub const SIGNATURE_LEN: usize = 4;

pub const FILE_NAME_LENGTH: &str = "file_name_length";
pub const EXTRA_FIELD_LENGTH: &str = "extra_field_length";
