//! Form state controller
//!
//! Owns `(value, error, pristine)` for one form instance. The value tree is
//! mutated only through the setters here; the error tree is either computed
//! by `validate` or installed wholesale (server-reported errors). All
//! operations are synchronous in-memory transformations.

use serde_json::Value;

use crate::error_tree::ErrorNode;
use crate::observability::Logger;
use crate::schema::{validate, Schema};

use super::array::{push_keyed, remove_at, replace_at, DEFAULT_KEY_FIELD};
use super::errors::{FormError, FormResult};

/// Outcome of a validation pass
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    /// The full current value, every condition satisfied
    Valid(Value),
    /// The computed error tree
    Invalid(ErrorNode),
}

/// Controller for one form instance
pub struct Form {
    schema: Schema,
    value: Value,
    error: Option<ErrorNode>,
    pristine: bool,
}

impl Form {
    /// Creates a controller from an initial (possibly partial) value.
    ///
    /// The form starts pristine with no error tree; errors appear only after
    /// a validation pass or an explicit `set_error`.
    pub fn new(initial: Value, schema: Schema) -> Self {
        Self {
            schema,
            value: initial,
            error: None,
            pristine: true,
        }
    }

    /// Current partial value tree
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Current error tree, if a validation pass has run or one was installed
    pub fn error(&self) -> Option<&ErrorNode> {
        self.error.as_ref()
    }

    /// True until the first field edit or an explicit override
    pub fn pristine(&self) -> bool {
        self.pristine
    }

    /// Replaces exactly one root field, leaving siblings untouched.
    ///
    /// Marks the form non-pristine. Does not revalidate; validation is
    /// pull-based. A null root is promoted to an empty object first.
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) -> FormResult<()> {
        let name = name.into();
        if self.value.is_null() {
            self.value = Value::Object(serde_json::Map::new());
        }
        let found = json_type_name(&self.value);
        let map = match self.value.as_object_mut() {
            Some(map) => map,
            None => return Err(FormError::RootNotObject { found, field: name }),
        };
        map.insert(name, value);
        self.pristine = false;
        Ok(())
    }

    /// Replaces the whole value tree (hydration after a fetch).
    ///
    /// Pristine is left untouched; callers decide whether hydration counts
    /// as an edit.
    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    /// Replaces the whole error tree (server-error merge point)
    pub fn set_error(&mut self, error: Option<ErrorNode>) {
        self.error = error;
    }

    /// Explicit pristine override, typically after a successful submit
    pub fn set_pristine(&mut self, pristine: bool) {
        self.pristine = pristine;
    }

    /// Validates the current value against the schema.
    ///
    /// Pure with respect to controller state: neither the error tree nor the
    /// pristine flag changes. The caller decides what to do with the outcome.
    /// Shape mismatches are logged at error severity and propagated.
    pub fn validate(&self) -> FormResult<Validation> {
        match validate(&self.schema, &self.value) {
            Ok(Some(tree)) => Ok(Validation::Invalid(tree)),
            Ok(None) => Ok(Validation::Valid(self.value.clone())),
            Err(err) => {
                let detail = err.to_string();
                Logger::error("FORM_SHAPE_ERROR", &[("detail", detail.as_str())]);
                Err(err.into())
            }
        }
    }

    /// Submission wiring: validates, then either invokes `on_valid` with the
    /// validated value or installs the error tree. Exactly one of the two
    /// happens.
    ///
    /// On success any stale error tree from an earlier failed attempt is
    /// cleared; pristine is not touched (callers reset it explicitly once the
    /// remote call succeeds). Returns `Ok(None)` when validation failed.
    pub fn submit<T>(&mut self, on_valid: impl FnOnce(&Value) -> T) -> FormResult<Option<T>> {
        match self.validate()? {
            Validation::Valid(value) => {
                self.error = None;
                Logger::info("FORM_SUBMIT_ACCEPTED", &[]);
                Ok(Some(on_valid(&value)))
            }
            Validation::Invalid(tree) => {
                let errors = tree.leaf_count().to_string();
                Logger::warn("FORM_SUBMIT_REJECTED", &[("errors", errors.as_str())]);
                self.error = Some(tree);
                Ok(None)
            }
        }
    }

    /// Replaces one element of the array field `name`
    pub fn set_member(&mut self, name: &str, index: usize, element: Value) -> FormResult<()> {
        let items = self.array_items(name)?;
        let next = replace_at(&items, index, element)?;
        self.set_field(name, Value::Array(next))
    }

    /// Removes one element of the array field `name`, order preserved
    pub fn remove_member(&mut self, name: &str, index: usize) -> FormResult<()> {
        let items = self.array_items(name)?;
        let next = remove_at(&items, index)?;
        self.set_field(name, Value::Array(next))
    }

    /// Appends an element to the array field `name`, assigning a fresh UUID
    /// key when the element lacks one. Returns the element's key.
    pub fn push_member(&mut self, name: &str, element: Value) -> FormResult<String> {
        let items = self.array_items(name)?;
        let (next, key) = push_keyed(&items, element, DEFAULT_KEY_FIELD)?;
        self.set_field(name, Value::Array(next))?;
        Ok(key)
    }

    /// Snapshot of an array field; absent fields read as empty
    fn array_items(&self, name: &str) -> FormResult<Vec<Value>> {
        match self.value.get(name) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items.clone()),
            Some(other) => Err(FormError::FieldNotArray {
                field: name.to_string(),
                found: json_type_name(other),
            }),
        }
    }
}

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
