//! Master boot record (first disk sector).
//!
//! Decoded with hand-written [`Structure`](crate::Structure) impls: the boot
//! code, four fixed-stride partition entries and the `0xAA55` signature.

pub mod layout;
pub mod parser;

pub use parser::{MasterBootRecord, PartitionEntry, PartitionType, parse_mbr};
