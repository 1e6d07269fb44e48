//! Validation engine
//!
//! Walks a value tree against a schema and produces an isomorphic partial
//! error tree. A clean subtree is `None`, never an empty container.
//!
//! Walk semantics:
//! - Object: the live field set is computed from the current value, then each
//!   live field's sub-value (null when absent) is validated against its
//!   sub-schema. Fields outside the live set are ignored entirely, stale
//!   values included.
//! - Array: each element's key is computed by the selector and its errors are
//!   collected under that key. Keys must exist and be unique.
//! - Absent/null container values validate as empty, so required fields of a
//!   not-yet-edited object still report.
//!
//! The walk is deterministic: field sets and member maps are ordered, and no
//! state is carried between passes.

use serde_json::Value;

use crate::conditions::first_failure;
use crate::error_tree::{ArrayErrors, ErrorNode, ObjectErrors, Path, Segment};

use super::errors::{SchemaResult, ShapeError};
use super::types::{ArraySchema, JsonMap, ObjectSchema, Schema};

/// Validates `value` against `schema`.
///
/// Returns `Ok(None)` when the value is fully valid, `Ok(Some(tree))` with
/// the computed error tree otherwise. `Err` is reserved for structural
/// schema/value mismatches, which are programmer errors.
pub fn validate(schema: &Schema, value: &Value) -> SchemaResult<Option<ErrorNode>> {
    let mut path = Path::root();
    walk(schema, value, &mut path)
}

fn walk(schema: &Schema, value: &Value, path: &mut Path) -> SchemaResult<Option<ErrorNode>> {
    match schema {
        Schema::Field(conditions) => Ok(first_failure(conditions, value).map(ErrorNode::Leaf)),
        Schema::Object(object) => walk_object(object, value, path),
        Schema::Array(array) => walk_array(array, value, path),
    }
}

fn walk_object(
    schema: &ObjectSchema,
    value: &Value,
    path: &mut Path,
) -> SchemaResult<Option<ErrorNode>> {
    let empty = JsonMap::new();
    let map = match value {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => {
            return Err(ShapeError::ExpectedObject {
                path: path.to_string(),
                found: json_type_name(other),
            })
        }
    };

    let mut errors = ObjectErrors::new();
    for (name, sub_schema) in schema.live_fields(map) {
        let sub_value = map.get(&name).unwrap_or(&Value::Null);
        path.push(Segment::Field(name.clone()));
        let result = walk(&sub_schema, sub_value, path);
        path.pop();
        if let Some(node) = result? {
            errors.fields.insert(name, node);
        }
    }
    errors.internal = schema.internal_error(map);

    Ok(errors.into_node())
}

fn walk_array(
    schema: &ArraySchema,
    value: &Value,
    path: &mut Path,
) -> SchemaResult<Option<ErrorNode>> {
    let empty: Vec<Value> = Vec::new();
    let elements = match value {
        Value::Array(elements) => elements,
        Value::Null => &empty,
        other => {
            return Err(ShapeError::ExpectedArray {
                path: path.to_string(),
                found: json_type_name(other),
            })
        }
    };

    let mut errors = ArrayErrors::new();
    let mut seen = std::collections::BTreeSet::new();
    for element in elements {
        let key = schema
            .key_of(element)
            .ok_or_else(|| ShapeError::MissingMemberKey {
                path: path.to_string(),
            })?;
        if !seen.insert(key.clone()) {
            return Err(ShapeError::DuplicateMemberKey {
                path: path.to_string(),
                key,
            });
        }

        path.push(Segment::Key(key.clone()));
        let result = walk(schema.member(), element, path);
        path.pop();
        if let Some(node) = result? {
            errors.members.insert(key, node);
        }
    }
    errors.internal = schema.internal_error(elements);

    Ok(errors.into_node())
}

/// JSON type name for shape-error messages
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::Condition;
    use crate::schema::FieldSet;
    use serde_json::json;

    fn person_schema() -> Schema {
        let mut fields = FieldSet::new();
        fields.insert("name".into(), Schema::field([Condition::RequiredString]));
        fields.insert(
            "age".into(),
            Schema::field([Condition::Required, Condition::GreaterThan(0.0)]),
        );
        ObjectSchema::fixed(fields).into()
    }

    #[test]
    fn test_valid_value_yields_no_tree() {
        let schema = person_schema();
        let value = json!({"name": "Alice", "age": 30});
        assert_eq!(validate(&schema, &value).unwrap(), None);
    }

    #[test]
    fn test_partial_value_reports_required_fields() {
        let schema = person_schema();
        let tree = validate(&schema, &json!({})).unwrap().unwrap();
        assert!(tree.message_at(&Path::root().field("name")).is_some());
        assert!(tree.message_at(&Path::root().field("age")).is_some());
    }

    #[test]
    fn test_null_object_validates_as_empty() {
        let schema = person_schema();
        let tree = validate(&schema, &Value::Null).unwrap().unwrap();
        assert_eq!(tree.leaf_count(), 2);
    }

    #[test]
    fn test_object_schema_on_scalar_is_shape_error() {
        let schema = person_schema();
        let err = validate(&schema, &json!("not an object")).unwrap_err();
        assert!(matches!(err, ShapeError::ExpectedObject { .. }));
    }

    #[test]
    fn test_array_members_keyed_not_indexed() {
        let member = {
            let mut fields = FieldSet::new();
            fields.insert("value".into(), Schema::field([Condition::Required]));
            ObjectSchema::fixed(fields).into()
        };
        let schema: Schema = ArraySchema::keyed_by(member, "uuid").into();

        let value = json!([
            {"uuid": "a"},
            {"uuid": "b", "value": 5}
        ]);
        let tree = validate(&schema, &value).unwrap().unwrap();
        assert!(tree
            .message_at(&Path::root().key("a").field("value"))
            .is_some());
        assert_eq!(tree.at(&Path::root().key("b")), None);
    }

    #[test]
    fn test_duplicate_member_keys_fail_loudly() {
        let schema: Schema = ArraySchema::keyed_by(Schema::unchecked(), "uuid").into();
        let value = json!([{"uuid": "a"}, {"uuid": "a"}]);
        let err = validate(&schema, &value).unwrap_err();
        assert!(matches!(err, ShapeError::DuplicateMemberKey { .. }));
    }

    #[test]
    fn test_missing_member_key_fails_loudly() {
        let schema: Schema = ArraySchema::keyed_by(Schema::unchecked(), "uuid").into();
        let value = json!([{"no_uuid": true}]);
        let err = validate(&schema, &value).unwrap_err();
        assert!(matches!(err, ShapeError::MissingMemberKey { .. }));
    }

    #[test]
    fn test_shape_error_reports_nested_path() {
        let mut fields = FieldSet::new();
        fields.insert(
            "figures".into(),
            ArraySchema::keyed_by(Schema::unchecked(), "uuid").into(),
        );
        let schema: Schema = ObjectSchema::fixed(fields).into();

        let err = validate(&schema, &json!({"figures": "oops"})).unwrap_err();
        assert_eq!(
            err,
            ShapeError::ExpectedArray {
                path: "$.figures".into(),
                found: "string",
            }
        );
    }

    #[test]
    fn test_array_internal_check_feeds_internal() {
        let schema: Schema = ArraySchema::keyed_by(Schema::unchecked(), "uuid")
            .with_check(|elements| {
                elements
                    .is_empty()
                    .then(|| "At least one figure is required".to_string())
            })
            .into();

        let tree = validate(&schema, &json!([])).unwrap().unwrap();
        match tree {
            ErrorNode::Array(arr) => {
                assert_eq!(
                    arr.internal.as_deref(),
                    Some("At least one figure is required")
                );
                assert!(arr.members.is_empty());
            }
            other => panic!("expected array node, got {:?}", other),
        }

        // A satisfied check leaves the node absent entirely
        let value = json!([{"uuid": "a"}]);
        assert_eq!(validate(&schema, &value).unwrap(), None);
    }

    #[test]
    fn test_array_internal_check_combines_with_member_errors() {
        let member = {
            let mut fields = FieldSet::new();
            fields.insert("value".into(), Schema::field([Condition::Required]));
            ObjectSchema::fixed(fields).into()
        };
        let schema: Schema = ArraySchema::keyed_by(member, "uuid")
            .with_check(|elements| {
                (elements.len() > 2).then(|| "At most two figures are allowed".to_string())
            })
            .into();

        let value = json!([{"uuid": "a"}, {"uuid": "b", "value": 1}, {"uuid": "c", "value": 2}]);
        let tree = validate(&schema, &value).unwrap().unwrap();
        match tree {
            ErrorNode::Array(arr) => {
                assert_eq!(arr.internal.as_deref(), Some("At most two figures are allowed"));
                assert!(arr.members.contains_key("a"));
                assert!(!arr.members.contains_key("b"));
            }
            other => panic!("expected array node, got {:?}", other),
        }
    }

    #[test]
    fn test_internal_error_attaches_to_container() {
        let schema: Schema = ObjectSchema::fixed(FieldSet::new())
            .with_check(|_| Some("Whole-object problem".into()))
            .into();
        let tree = validate(&schema, &json!({})).unwrap().unwrap();
        match tree {
            ErrorNode::Object(obj) => {
                assert_eq!(obj.internal.as_deref(), Some("Whole-object problem"));
                assert!(obj.fields.is_empty());
            }
            other => panic!("expected object node, got {:?}", other),
        }
    }
}
