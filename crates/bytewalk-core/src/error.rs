use thiserror::Error;

/// Errors returned by cursor reads, structure decoding and schema handling.
///
/// # Examples
/// ```
/// use bytewalk_core::DecodeError;
///
/// let err = DecodeError::Underflow {
///     requested: 4,
///     remaining: 1,
/// };
/// assert!(err.to_string().contains("requested 4 bytes"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("buffer underflow: requested {requested} bytes, {remaining} remaining")]
    Underflow { requested: usize, remaining: usize },
    #[error("unterminated string: no null terminator in {remaining} remaining bytes")]
    UnterminatedString { remaining: usize },
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("unsupported field kind for '{field}': {reason}")]
    UnsupportedFieldKind { field: String, reason: String },
    #[error("invalid size for '{field}': {value}")]
    InvalidSize { field: String, value: i128 },
    #[error("unknown text encoding: {name}")]
    UnknownEncoding { name: String },
}

/// Schema definition errors, detected when a `Schema` is constructed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("field '{field}' takes its size from '{source_field}', which is declared after it")]
    ForwardReference { field: String, source_field: String },
    #[error("field '{field}' takes its size from unknown field '{source_field}'")]
    UnknownSizeSource { field: String, source_field: String },
    #[error("field '{field}' takes its size from non-integer field '{source_field}'")]
    NonIntegerSizeSource { field: String, source_field: String },
    #[error("field '{field}' needs an explicit size or a size source")]
    MissingSize { field: String },
    #[error("field '{field}' is declared more than once")]
    DuplicateField { field: String },
}
