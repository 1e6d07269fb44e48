//! Array-field adapter
//!
//! Derives per-element operations from an array-level setter. Elements are
//! identified by their own key field (a UUID), never by position, so errors
//! and values stay attached to the right element across removal and
//! reordering.
//!
//! Every operation builds a fresh `Vec`; the array handed to the parent
//! setter is never the one previously observed. Untouched elements are shared
//! structurally via clone-on-write of the vector, not mutated in place.

use serde_json::Value;
use uuid::Uuid;

use super::errors::{FormError, FormResult};

/// Key field assigned to pushed elements when no other is configured
pub const DEFAULT_KEY_FIELD: &str = "uuid";

/// Returns a new array with the element at `index` replaced
pub fn replace_at(items: &[Value], index: usize, element: Value) -> FormResult<Vec<Value>> {
    if index >= items.len() {
        return Err(FormError::IndexOutOfBounds {
            index,
            len: items.len(),
        });
    }
    let mut next = items.to_vec();
    next[index] = element;
    Ok(next)
}

/// Returns a new array with the element at `index` removed, order preserved
pub fn remove_at(items: &[Value], index: usize) -> FormResult<Vec<Value>> {
    if index >= items.len() {
        return Err(FormError::IndexOutOfBounds {
            index,
            len: items.len(),
        });
    }
    let mut next = items.to_vec();
    next.remove(index);
    Ok(next)
}

/// Returns a new array with `element` appended, plus the element's key.
///
/// The element must be an object. An existing string key under `key_field` is
/// kept; otherwise a fresh UUID v4 is assigned, since the key is the array's
/// only stable identity for value and error lookups.
pub fn push_keyed(
    items: &[Value],
    element: Value,
    key_field: &str,
) -> FormResult<(Vec<Value>, String)> {
    let mut element = match element {
        Value::Object(map) => map,
        other => {
            return Err(FormError::ElementNotObject {
                found: json_type_name(&other),
            })
        }
    };

    let existing = element
        .get(key_field)
        .and_then(Value::as_str)
        .map(str::to_string);
    let key = match existing {
        Some(key) => key,
        None => {
            let fresh = Uuid::new_v4().to_string();
            element.insert(key_field.to_string(), Value::String(fresh.clone()));
            fresh
        }
    };

    let mut next = items.to_vec();
    next.push(Value::Object(element));
    Ok((next, key))
}

/// Adapter binding one array field to a parent setter.
///
/// Closes over the field name and the parent's change handler, so callers
/// operate on elements without knowing how the parent stores the array. The
/// handler receives `(field name, new array value)` after every successful
/// operation.
pub struct ArrayField<F>
where
    F: FnMut(&str, Value),
{
    name: String,
    items: Vec<Value>,
    key_field: String,
    on_change: F,
}

impl<F> ArrayField<F>
where
    F: FnMut(&str, Value),
{
    /// Binds `name` with the current array snapshot and a parent setter
    pub fn new(name: impl Into<String>, items: Vec<Value>, on_change: F) -> Self {
        Self {
            name: name.into(),
            items,
            key_field: DEFAULT_KEY_FIELD.to_string(),
            on_change,
        }
    }

    /// Overrides the element key field (defaults to `uuid`)
    pub fn with_key_field(mut self, key_field: impl Into<String>) -> Self {
        self.key_field = key_field.into();
        self
    }

    /// Current elements
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Replaces the element at `index` and notifies the parent
    pub fn set(&mut self, index: usize, element: Value) -> FormResult<()> {
        self.items = replace_at(&self.items, index, element)?;
        self.notify();
        Ok(())
    }

    /// Removes the element at `index` and notifies the parent
    pub fn remove(&mut self, index: usize) -> FormResult<()> {
        self.items = remove_at(&self.items, index)?;
        self.notify();
        Ok(())
    }

    /// Appends `element`, assigning a fresh key if it lacks one, and notifies
    /// the parent. Returns the element's key.
    pub fn push(&mut self, element: Value) -> FormResult<String> {
        let (next, key) = push_keyed(&self.items, element, &self.key_field)?;
        self.items = next;
        self.notify();
        Ok(key)
    }

    fn notify(&mut self) {
        (self.on_change)(&self.name, Value::Array(self.items.clone()));
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
