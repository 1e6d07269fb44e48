//! Server-error transform
//!
//! A failed submit comes back from the API as its own error payload. It is
//! converted into the same error-tree shape the validation engine produces,
//! then installed with `Form::set_error` or folded in with
//! `ErrorNode::merge`, so the rendering layer never learns where a message
//! came from.

use serde::{Deserialize, Serialize};

use crate::error_tree::{ArrayErrors, ErrorNode, ObjectErrors, Path, Segment};

/// Field name servers use for errors not attributable to one field
pub const NON_FIELD_ERRORS: &str = "nonFieldErrors";

/// One entry of a flat mutation-error payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFieldError {
    /// Field name, or [`NON_FIELD_ERRORS`]
    pub field: String,
    /// Messages for that field; joined in order when several arrive
    pub messages: Vec<String>,
}

/// Transforms a flat payload into an error tree.
///
/// `nonFieldErrors` becomes the root `$internal`; every other entry becomes
/// a leaf under its field name. Entries with no messages are dropped. Returns
/// `None` when nothing remains.
pub fn from_field_errors(errors: &[RemoteFieldError]) -> Option<ErrorNode> {
    let entries = errors.iter().filter(|e| !e.messages.is_empty()).map(|e| {
        let message = e.messages.join("; ");
        if e.field == NON_FIELD_ERRORS {
            (Path::root(), message)
        } else {
            (Path::root().field(e.field.clone()), message)
        }
    });
    from_entries(entries)
}

/// Builds an error tree from `(path, message)` entries.
///
/// An empty path attaches the message to the root `$internal`. Field
/// segments produce object nodes, key segments array nodes; the node kind at
/// each level follows the next segment. Later entries win on conflict.
/// Returns `None` for an empty input.
pub fn from_entries(entries: impl IntoIterator<Item = (Path, String)>) -> Option<ErrorNode> {
    let mut root = ErrorNode::Object(ObjectErrors::new());
    let mut any = false;
    for (path, message) in entries {
        insert(&mut root, path.segments(), message);
        any = true;
    }
    match (any, root) {
        (false, _) => None,
        (true, ErrorNode::Object(obj)) => obj.into_node(),
        (true, node) => Some(node),
    }
}

fn insert(node: &mut ErrorNode, segments: &[Segment], message: String) {
    let Some((head, rest)) = segments.split_first() else {
        // End of the path: a message for the node itself
        match node {
            ErrorNode::Object(obj) => obj.internal = Some(message),
            ErrorNode::Array(arr) => arr.internal = Some(message),
            leaf => *leaf = ErrorNode::Leaf(message),
        }
        return;
    };

    match head {
        Segment::Field(name) => {
            if !matches!(node, ErrorNode::Object(_)) {
                *node = ErrorNode::Object(ObjectErrors::new());
            }
            let ErrorNode::Object(obj) = node else {
                unreachable!("node was just made an object");
            };
            let child = obj
                .fields
                .entry(name.clone())
                .or_insert_with(|| empty_child(rest));
            insert(child, rest, message);
        }
        Segment::Key(key) => {
            if !matches!(node, ErrorNode::Array(_)) {
                *node = ErrorNode::Array(ArrayErrors::new());
            }
            let ErrorNode::Array(arr) = node else {
                unreachable!("node was just made an array");
            };
            let child = arr
                .members
                .entry(key.clone())
                .or_insert_with(|| empty_child(rest));
            insert(child, rest, message);
        }
    }
}

// The child's kind is decided by the segment that will address into it.
fn empty_child(rest: &[Segment]) -> ErrorNode {
    match rest.first() {
        Some(Segment::Field(_)) => ErrorNode::Object(ObjectErrors::new()),
        Some(Segment::Key(_)) => ErrorNode::Array(ArrayErrors::new()),
        None => ErrorNode::Leaf(String::new()),
    }
}
