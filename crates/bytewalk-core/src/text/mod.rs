//! Text decoding over a [`Cursor`](crate::Cursor).
//!
//! Three shapes are supported: fixed-length runs, length-prefixed (Pascal)
//! strings, and null-terminated (C) strings. Every shape decodes through a
//! [`TextEncoding`]; decoded text is always an owned `String`.

pub mod encoding;
mod reader;

pub use encoding::TextEncoding;
