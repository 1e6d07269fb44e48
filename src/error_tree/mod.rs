//! Partial error trees for formtree
//!
//! An error tree is isomorphic to the schema that produced it: object nodes
//! carry an optional `$internal` message plus a `fields` map, array nodes an
//! optional `$internal` plus a `members` map keyed by each element's stable
//! key. A node with no errors anywhere below it does not exist at all —
//! absence, not null, means clean.
//!
//! # Design Principles
//!
//! - Errors are data, never exceptions
//! - Deterministic ordering (`BTreeMap` throughout)
//! - One shape for local and remote errors
//! - Structured paths, never delimited strings

mod node;
mod path;

pub use node::{ArrayErrors, ErrorNode, ObjectErrors};
pub use path::{Path, Segment};
