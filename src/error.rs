//! Error types for typed TOML encoding and decoding.
//!
//! Every failure aborts the current encode/decode call; nothing is recovered
//! internally and no partially built value is ever returned.
//!
//! ## Error Categories
//!
//! - **Shape errors**: a matrix shape that is not 2-D, or whose element count
//!   disagrees with the supplied data
//! - **Tag errors**: an unknown `dt` tag when decoding, or a container element
//!   type with no tag when encoding
//! - **Field errors**: a required field is missing or has the wrong type
//! - **Tree errors**: the TOML text could not be parsed or rendered
//!
//! ## Examples
//!
//! ```rust
//! use voml::{from_str, Error, Mat};
//!
//! let result: Result<Mat, Error> = from_str("rows = 2\ncols = 2\ndt = \"f\"\ndata = [1, 2, 3]");
//! assert!(matches!(result, Err(Error::ShapeSizeMismatch { rows: 2, cols: 2, len: 3 })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while mapping values to and from TOML.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Matrix shape does not have exactly two dimensions
    #[error("invalid shape: expected 2 dimensions, got {dims}")]
    InvalidShape { dims: usize },

    /// `rows * cols` differs from the number of supplied elements
    #[error("shape {rows}x{cols} does not match data length {len}")]
    ShapeSizeMismatch { rows: usize, cols: usize, len: usize },

    /// Byte size of a `rows x cols` buffer does not fit in `usize`
    #[error("shape {rows}x{cols} is too large to allocate")]
    ShapeOverflow { rows: usize, cols: usize },

    /// `dt` is not one of the seven known single-character tags
    #[error("unknown type tag: {0:?}")]
    UnknownTypeTag(String),

    /// Container element type has no tag and cannot be encoded
    #[error("unrepresentable element type: {0}")]
    UnrepresentableType(String),

    /// Typed access to a matrix with a different element type
    #[error("dtype mismatch: expected '{expected}', matrix holds '{actual}'")]
    DTypeMismatch { expected: char, actual: char },

    /// Required field is absent from the table
    #[error("missing field `{field}`")]
    MissingField { field: String },

    /// Field is present but not convertible to the requested type
    #[error("type mismatch at `{field}`: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: String,
    },

    /// TOML text could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// Tree could not be rendered to TOML text
    #[error("render error: {0}")]
    Render(String),

    /// Custom error
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a type mismatch error that is not yet attached to a field.
    ///
    /// [`crate::find`] fills in the field name as the error propagates out of
    /// nested lookups.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use voml::Error;
    ///
    /// let err = Error::type_mismatch("integer", "string").in_field("rows");
    /// assert!(err.to_string().contains("`rows`"));
    /// ```
    pub fn type_mismatch(expected: &'static str, found: impl Into<String>) -> Self {
        Error::TypeMismatch {
            field: String::new(),
            expected,
            found: found.into(),
        }
    }

    /// Creates a missing-field error.
    pub fn missing_field(field: &str) -> Self {
        Error::MissingField {
            field: field.to_string(),
        }
    }

    /// Prefixes the field path of field errors with `key`.
    ///
    /// Other variants pass through untouched.
    #[must_use]
    pub fn in_field(self, key: &str) -> Self {
        match self {
            Error::TypeMismatch {
                field,
                expected,
                found,
            } => Error::TypeMismatch {
                field: join_path(key, &field),
                expected,
                found,
            },
            Error::MissingField { field } => Error::MissingField {
                field: join_path(key, &field),
            },
            other => other,
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

fn join_path(key: &str, rest: &str) -> String {
    if rest.is_empty() {
        key.to_string()
    } else if rest.starts_with('[') {
        format!("{key}{rest}")
    } else {
        format!("{key}.{rest}")
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Parse(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Render(e.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
