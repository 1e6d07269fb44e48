//! Structured addressing into value and error trees
//!
//! A path is a sequence of segments: object fields addressed by name, array
//! members addressed by their stable key. Segments are kept structured so a
//! key containing an arbitrary delimiter can never be misread.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One step into a nested value or error tree
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Segment {
    /// An object field, addressed by name
    Field(String),
    /// An array member, addressed by its stable key
    Key(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => write!(f, ".{}", name),
            Segment::Key(key) => write!(f, "[{}]", key),
        }
    }
}

/// A structured path from the root of a tree to one node
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Path(Vec<Segment>);

impl Path {
    /// The empty path, addressing the root node
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns a new path extended by an object-field segment
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.0.push(Segment::Field(name.into()));
        self
    }

    /// Returns a new path extended by an array-key segment
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.0.push(Segment::Key(key.into()));
        self
    }

    /// Appends a segment in place
    pub fn push(&mut self, segment: Segment) {
        self.0.push(segment);
    }

    /// Removes the last segment, if any
    pub fn pop(&mut self) -> Option<Segment> {
        self.0.pop()
    }

    /// Returns the segments in root-to-leaf order
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Returns true if this path addresses the root
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.0 {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
