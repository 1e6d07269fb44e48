//! formtree - a strict, deterministic form-state and validation engine
//!
//! A declarative schema describes nested object/array shapes; the engine
//! walks a partial value tree against it and produces an isomorphic partial
//! error tree. A form controller owns `(value, error, pristine)` and wires
//! submission to validate-then-call-or-report; an array adapter addresses
//! elements by stable UUID key so errors never shift with indices.
//!
//! Everything is synchronous and in-memory. Validation failure is data, not
//! an exception; only structural schema/value mismatches (programmer errors)
//! surface as `Err`.

pub mod conditions;
pub mod error_tree;
pub mod form;
pub mod observability;
pub mod remote;
pub mod schema;

pub use conditions::Condition;
pub use error_tree::{ErrorNode, Path, Segment};
pub use form::{ArrayField, Form, FormError, Validation};
pub use schema::{validate, ArraySchema, FieldSet, ObjectSchema, Schema, ShapeError};
