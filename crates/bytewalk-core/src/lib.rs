//! Bytewalk core library for decoding flat binary structures.
//!
//! The crate is built around a forward-only, bounds-checked [`Cursor`] over
//! an in-memory buffer. On top of it sit text readers (fixed, Pascal and C
//! strings in several encodings), epoch-relative timestamp readers, and a
//! structure protocol that lets records nest, repeat in fixed-stride arrays,
//! and size their own variable-length fields.
//!
//! Records are described in one of two ways:
//! - hand-written [`Structure`] impls that call the cursor directly;
//! - a [`schema::Schema`] of field descriptors, interpreted at run time into a
//!   [`schema::Record`].
//!
//! Invariants:
//! - The buffer is never copied or mutated; only text and byte arrays are
//!   materialized into owned values.
//! - A failed read never moves the cursor, and a failed structure decode
//!   leaves the cursor where the structure started.
//! - Schemas are validated when built; size sources always point backwards.
//!
//! # Examples
//! ```
//! use bytewalk_core::schema::{FieldDescriptor, FieldKind, Schema};
//! use bytewalk_core::{Cursor, TextEncoding};
//!
//! let schema = Schema::new(vec![
//!     FieldDescriptor::new("len", FieldKind::U8),
//!     FieldDescriptor::new("name", FieldKind::FixedText)
//!         .size_from("len")
//!         .encoding(TextEncoding::Ascii),
//! ])?;
//!
//! let data = [0x03, b'a', b'b', b'c'];
//! let record = Cursor::new(&data).decode_schema(&schema)?;
//! assert_eq!(record.get("name").and_then(|v| v.as_str()), Some("abc"));
//! # Ok::<(), bytewalk_core::DecodeError>(())
//! ```

mod cursor;
mod error;
pub mod layouts;
pub mod schema;
mod structure;
pub mod temporal;
pub mod text;

pub use cursor::Cursor;
pub use error::{DecodeError, SchemaError};
pub use structure::{Structure, decode_from_bytes};
pub use text::TextEncoding;
