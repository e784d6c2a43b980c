//! ZIP local file header.
//!
//! Described as a [`Schema`](crate::schema::Schema): the file name and extra
//! field take their lengths from fields decoded earlier in the header.

pub mod layout;
pub mod parser;

pub use parser::{local_file_header_schema, parse_local_file_header};
