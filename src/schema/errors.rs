//! Schema shape errors
//!
//! A shape error means the schema and the value disagree structurally — an
//! array schema applied to a string, a member without a key. These are
//! programmer errors: they are surfaced loudly as `Err`, never folded into
//! the error tree a user could be asked to correct.

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, ShapeError>;

/// Structural schema/value mismatch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// An object schema met a non-object, non-null value
    #[error("expected an object at '{path}', found {found}")]
    ExpectedObject { path: String, found: &'static str },

    /// An array schema met a non-array, non-null value
    #[error("expected an array at '{path}', found {found}")]
    ExpectedArray { path: String, found: &'static str },

    /// The key selector produced no key for a member
    #[error("array member at '{path}' produced no key")]
    MissingMemberKey { path: String },

    /// Two members of one array produced the same key
    #[error("duplicate member key '{key}' at '{path}'")]
    DuplicateMemberKey { path: String, key: String },
}
