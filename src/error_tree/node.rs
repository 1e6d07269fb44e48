//! Error tree nodes
//!
//! Nodes mirror the schema shape. Leaves hold one message (the first failing
//! condition wins upstream, so there is never more than one). Containers hold
//! only non-empty children; a clean container is represented by absence.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::path::{Path, Segment};

/// One node of a partial error tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorNode {
    /// A single field-level message
    Leaf(String),
    /// Errors attached to an object and its fields
    Object(ObjectErrors),
    /// Errors attached to an array and its members
    Array(ArrayErrors),
}

/// Errors for an object node: an optional whole-object message plus per-field
/// children. Fields without errors are absent from the map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectErrors {
    /// Whole-object error not attributable to one field
    #[serde(rename = "$internal", default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<String>,
    /// Per-field error nodes, keyed by field name
    pub fields: BTreeMap<String, ErrorNode>,
}

/// Errors for an array node: an optional whole-array message plus per-member
/// children keyed by each element's stable key, never by index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayErrors {
    /// Whole-array error not attributable to one member
    #[serde(rename = "$internal", default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<String>,
    /// Per-member error nodes, keyed by stable member key
    pub members: BTreeMap<String, ErrorNode>,
}

impl ObjectErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no message exists at or below this node
    pub fn is_empty(&self) -> bool {
        self.internal.is_none() && self.fields.is_empty()
    }

    /// Collapses an empty container to absence
    pub fn into_node(self) -> Option<ErrorNode> {
        if self.is_empty() {
            None
        } else {
            Some(ErrorNode::Object(self))
        }
    }
}

impl ArrayErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no message exists at or below this node
    pub fn is_empty(&self) -> bool {
        self.internal.is_none() && self.members.is_empty()
    }

    /// Collapses an empty container to absence
    pub fn into_node(self) -> Option<ErrorNode> {
        if self.is_empty() {
            None
        } else {
            Some(ErrorNode::Array(self))
        }
    }
}

impl ErrorNode {
    /// Creates a leaf node holding one message
    pub fn leaf(message: impl Into<String>) -> Self {
        ErrorNode::Leaf(message.into())
    }

    /// Returns the node addressed by `path`, if any
    pub fn at(&self, path: &Path) -> Option<&ErrorNode> {
        let mut node = self;
        for segment in path.segments() {
            node = match (node, segment) {
                (ErrorNode::Object(obj), Segment::Field(name)) => obj.fields.get(name)?,
                (ErrorNode::Array(arr), Segment::Key(key)) => arr.members.get(key)?,
                _ => return None,
            };
        }
        Some(node)
    }

    /// Returns the leaf message addressed by `path`, if any
    pub fn message_at(&self, path: &Path) -> Option<&str> {
        match self.at(path)? {
            ErrorNode::Leaf(message) => Some(message),
            _ => None,
        }
    }

    /// Counts leaf messages in the whole tree, `$internal` entries included
    pub fn leaf_count(&self) -> usize {
        match self {
            ErrorNode::Leaf(_) => 1,
            ErrorNode::Object(obj) => {
                let own = usize::from(obj.internal.is_some());
                own + obj.fields.values().map(ErrorNode::leaf_count).sum::<usize>()
            }
            ErrorNode::Array(arr) => {
                let own = usize::from(arr.internal.is_some());
                own + arr.members.values().map(ErrorNode::leaf_count).sum::<usize>()
            }
        }
    }

    /// Merges `incoming` into this tree.
    ///
    /// Container nodes of the same kind merge recursively; on any conflict
    /// (leaf vs leaf, mismatched kinds, both `$internal` set) the incoming
    /// side wins. Used to fold server-reported errors into a locally computed
    /// tree.
    pub fn merge(&mut self, incoming: ErrorNode) {
        match (self, incoming) {
            (ErrorNode::Object(ours), ErrorNode::Object(theirs)) => {
                if theirs.internal.is_some() {
                    ours.internal = theirs.internal;
                }
                for (field, node) in theirs.fields {
                    match ours.fields.get_mut(&field) {
                        Some(existing) => existing.merge(node),
                        None => {
                            ours.fields.insert(field, node);
                        }
                    }
                }
            }
            (ErrorNode::Array(ours), ErrorNode::Array(theirs)) => {
                if theirs.internal.is_some() {
                    ours.internal = theirs.internal;
                }
                for (key, node) in theirs.members {
                    match ours.members.get_mut(&key) {
                        Some(existing) => existing.merge(node),
                        None => {
                            ours.members.insert(key, node);
                        }
                    }
                }
            }
            (ours, theirs) => *ours = theirs,
        }
    }
}
