//! Form state controller and array-field adapter
//!
//! The controller owns the partial value tree and is the only writer to it.
//! Consumers read `value`/`error`/`pristine` and mutate through scoped
//! setters; validation is pull-based and runs at submit or on request.
//!
//! # Principles
//!
//! - Single source of truth: the value tree
//! - Setters never revalidate; validation is explicit
//! - Arrays are copy-on-write and addressed by stable key
//! - Submit calls exactly one of: accept callback, install error tree

mod array;
mod controller;
mod errors;

pub use array::{push_keyed, remove_at, replace_at, ArrayField, DEFAULT_KEY_FIELD};
pub use controller::{Form, Validation};
pub use errors::{FormError, FormResult};
