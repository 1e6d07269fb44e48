//! Form controller errors
//!
//! Like shape errors, these mark programmer mistakes (wrong root shape, index
//! out of range), not user-correctable validation states. User-facing
//! validation failure is always data in the error tree.

use thiserror::Error;

use crate::schema::ShapeError;

/// Result type for form operations
pub type FormResult<T> = Result<T, FormError>;

/// Form controller error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A field setter was used while the root value is not an object
    #[error("cannot set field '{field}': root value is {found}, not an object")]
    RootNotObject { field: String, found: &'static str },

    /// An array operation targeted a field that is not an array
    #[error("field '{field}' holds {found}, not an array")]
    FieldNotArray { field: String, found: &'static str },

    /// An array operation addressed a position past the end
    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A pushed element cannot carry a key because it is not an object
    #[error("array elements must be objects to carry a key, found {found}")]
    ElementNotObject { found: &'static str },

    /// Structural schema/value mismatch surfaced during validation
    #[error(transparent)]
    Shape(#[from] ShapeError),
}
