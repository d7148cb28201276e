use thiserror::Error;

/// Failures raised while decoding documents or compiling expressions in strict mode.
///
/// Lenient queries never produce one of these; malformed segments evaluate to nothing.
#[derive(Debug, Error)]
pub enum JpathError {
    // The document bytes were not a JSON object
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    // Strict compilation found a character no segment grammar covers
    #[error("syntax error: unexpected {found:?} at position {position}")]
    Syntax { position: usize, found: char },
}

/// Failures raised while populating a record from query results.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("{field} - path {path} matched nothing")]
    EmptyResult { field: String, path: String },

    #[error("{field} - value of type {actual} is not assignable to type {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error(transparent)]
    Query(#[from] JpathError),
}

// Type alias for results that use `JpathError` as the error type
pub type Result<T> = std::result::Result<T, JpathError>;
