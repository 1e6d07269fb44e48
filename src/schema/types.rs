//! Schema type definitions
//!
//! Three node kinds:
//! - field: a leaf carrying zero or more conditions
//! - object: a field-producing function plus an optional whole-object check
//! - array: a key selector plus one member schema and an optional whole-array
//!   check
//!
//! The field-producing function receives the current object value and is
//! called fresh on every validation pass, so the live field set may depend on
//! sibling values (a discriminator toggle adding fields only when set). Field
//! sets are `BTreeMap`s to keep validation output deterministic.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::conditions::Condition;

/// The current object value handed to field-producing functions
pub type JsonMap = serde_json::Map<String, Value>;

/// The live fields of an object schema, keyed by field name
pub type FieldSet = BTreeMap<String, Schema>;

type FieldsFn = dyn Fn(&JsonMap) -> FieldSet + Send + Sync;
type ObjectCheckFn = dyn Fn(&JsonMap) -> Option<String> + Send + Sync;
type KeyFn = dyn Fn(&Value) -> Option<String> + Send + Sync;
type ArrayCheckFn = dyn Fn(&[Value]) -> Option<String> + Send + Sync;

/// A recursive schema node
#[derive(Clone)]
pub enum Schema {
    /// Leaf field validated by conditions, first failure wins
    Field(Vec<Condition>),
    /// Nested object
    Object(ObjectSchema),
    /// Array of keyed members
    Array(ArraySchema),
}

impl Schema {
    /// Leaf field with the given conditions
    pub fn field(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Schema::Field(conditions.into_iter().collect())
    }

    /// Leaf field with no conditions (always valid)
    pub fn unchecked() -> Self {
        Schema::Field(Vec::new())
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Field(conditions) => f.debug_tuple("Field").field(conditions).finish(),
            Schema::Object(_) => f.write_str("Object(..)"),
            Schema::Array(_) => f.write_str("Array(..)"),
        }
    }
}

/// Object schema: live field set derived from the current value
#[derive(Clone)]
pub struct ObjectSchema {
    fields: Arc<FieldsFn>,
    check: Option<Arc<ObjectCheckFn>>,
}

impl ObjectSchema {
    /// Object whose field set depends on the current value
    pub fn new(fields: impl Fn(&JsonMap) -> FieldSet + Send + Sync + 'static) -> Self {
        Self {
            fields: Arc::new(fields),
            check: None,
        }
    }

    /// Object with a fixed field set
    pub fn fixed(fields: FieldSet) -> Self {
        Self::new(move |_| fields.clone())
    }

    /// Attaches a whole-object check feeding the node's `$internal` error
    pub fn with_check(
        mut self,
        check: impl Fn(&JsonMap) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.check = Some(Arc::new(check));
        self
    }

    /// Computes the live field set for the current value
    pub fn live_fields(&self, value: &JsonMap) -> FieldSet {
        (self.fields)(value)
    }

    /// Runs the whole-object check, if configured
    pub fn internal_error(&self, value: &JsonMap) -> Option<String> {
        self.check.as_ref().and_then(|check| check(value))
    }
}

impl From<ObjectSchema> for Schema {
    fn from(schema: ObjectSchema) -> Self {
        Schema::Object(schema)
    }
}

/// Array schema: one member schema applied per element, addressed by key
#[derive(Clone)]
pub struct ArraySchema {
    key: Arc<KeyFn>,
    member: Box<Schema>,
    check: Option<Arc<ArrayCheckFn>>,
}

impl ArraySchema {
    /// Array whose members are keyed by the given selector
    pub fn new(
        member: Schema,
        key: impl Fn(&Value) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: Arc::new(key),
            member: Box::new(member),
            check: None,
        }
    }

    /// Array keyed by a string (or numeric) field of each member, usually a
    /// UUID field
    pub fn keyed_by(member: Schema, key_field: impl Into<String>) -> Self {
        let key_field = key_field.into();
        Self::new(member, move |element| match element.get(&key_field) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Attaches a whole-array check feeding the node's `$internal` error
    pub fn with_check(
        mut self,
        check: impl Fn(&[Value]) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.check = Some(Arc::new(check));
        self
    }

    /// Computes the stable key for one element
    pub fn key_of(&self, element: &Value) -> Option<String> {
        (self.key)(element)
    }

    /// The schema applied to every member
    pub fn member(&self) -> &Schema {
        &self.member
    }

    /// Runs the whole-array check, if configured
    pub fn internal_error(&self, elements: &[Value]) -> Option<String> {
        self.check.as_ref().and_then(|check| check(elements))
    }
}

impl From<ArraySchema> for Schema {
    fn from(schema: ArraySchema) -> Self {
        Schema::Array(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixed_fields() -> FieldSet {
        let mut fields = FieldSet::new();
        fields.insert("name".into(), Schema::field([Condition::RequiredString]));
        fields.insert("age".into(), Schema::field([Condition::GreaterThan(0.0)]));
        fields
    }

    #[test]
    fn test_fixed_object_returns_same_fields() {
        let schema = ObjectSchema::fixed(fixed_fields());
        let fields = schema.live_fields(&JsonMap::new());
        assert_eq!(fields.len(), 2);
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("age"));
    }

    #[test]
    fn test_conditional_fields_follow_value() {
        let schema = ObjectSchema::new(|value| {
            let mut fields = FieldSet::new();
            fields.insert("kind".into(), Schema::field([Condition::Required]));
            if value.get("kind").and_then(Value::as_str) == Some("external") {
                fields.insert("url".into(), Schema::field([Condition::UrlFormat]));
            }
            fields
        });

        let mut value = JsonMap::new();
        assert!(!schema.live_fields(&value).contains_key("url"));

        value.insert("kind".into(), json!("external"));
        assert!(schema.live_fields(&value).contains_key("url"));
    }

    #[test]
    fn test_keyed_by_reads_string_and_numeric_keys() {
        let schema = ArraySchema::keyed_by(Schema::unchecked(), "uuid");
        assert_eq!(schema.key_of(&json!({"uuid": "f1"})), Some("f1".into()));
        assert_eq!(schema.key_of(&json!({"uuid": 7})), Some("7".into()));
        assert_eq!(schema.key_of(&json!({"other": "x"})), None);
    }

    #[test]
    fn test_whole_object_check() {
        let schema = ObjectSchema::fixed(FieldSet::new()).with_check(|value| {
            let start = value.get("start")?.as_i64()?;
            let end = value.get("end")?.as_i64()?;
            (end < start).then(|| "End date is before start date".to_string())
        });

        let mut value = JsonMap::new();
        value.insert("start".into(), json!(10));
        value.insert("end".into(), json!(3));
        assert!(schema.internal_error(&value).is_some());

        value.insert("end".into(), json!(20));
        assert!(schema.internal_error(&value).is_none());
    }
}
