//! Observability for formtree
//!
//! Structured, synchronous JSON logging with deterministic key ordering.
//! Observability is read-only: nothing here affects validation output or
//! form state.

mod logger;

pub use logger::{Logger, Severity};
