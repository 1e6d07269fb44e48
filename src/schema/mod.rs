//! Schema subsystem for formtree
//!
//! A schema is a recursive, declarative description of an object or array
//! shape. Object schemas produce their live field set from the current
//! (possibly partial) value, which is how conditional fields work; array
//! schemas pair a key selector with one member schema applied to every
//! element.
//!
//! # Design Principles
//!
//! - The value tree is the single source of truth
//! - The error tree is recomputed wholesale on every validate
//! - Deterministic output for identical `(schema, value)` pairs
//! - Shape mismatches are programmer errors, never validation messages

mod errors;
mod types;
mod validator;

pub use errors::{SchemaResult, ShapeError};
pub use types::{ArraySchema, FieldSet, JsonMap, ObjectSchema, Schema};
pub use validator::validate;
