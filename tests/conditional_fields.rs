//! Conditional Field Gating Tests
//!
//! An object schema's live field set is a function of the current value,
//! recomputed on every validation pass. Fields outside the live set are not
//! validated at all, even when stale values for them are still present in
//! the value tree.

use formtree::{validate, Condition, FieldSet, ObjectSchema, Path, Schema};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

/// Figure schema where disaggregation fields are live only while the
/// `is_disaggregated` toggle is true.
fn figure_schema() -> Schema {
    ObjectSchema::new(|value| {
        let mut fields = FieldSet::new();
        fields.insert("uuid".into(), Schema::field([Condition::Required]));
        fields.insert("district".into(), Schema::field([Condition::RequiredString]));
        fields.insert("is_disaggregated".into(), Schema::unchecked());

        if value.get("is_disaggregated").and_then(Value::as_bool) == Some(true) {
            fields.insert(
                "age_json".into(),
                Schema::field([Condition::LengthGreaterThan(0)]),
            );
            fields.insert(
                "sex_male".into(),
                Schema::field([Condition::GreaterThan(-1.0)]),
            );
        }
        fields
    })
    .into()
}

// =============================================================================
// Gating
// =============================================================================

/// With the toggle on, the extra fields are validated.
#[test]
fn test_toggle_on_validates_extra_fields() {
    let schema = figure_schema();
    let value = json!({
        "uuid": "f1",
        "district": "Herat",
        "is_disaggregated": true,
        "age_json": []
    });

    let tree = validate(&schema, &value).unwrap().unwrap();
    assert!(tree.message_at(&Path::root().field("age_json")).is_some());
}

/// With the toggle off, stale values for gated fields are ignored entirely.
#[test]
fn test_toggle_off_ignores_stale_values() {
    let schema = figure_schema();
    let value = json!({
        "uuid": "f1",
        "district": "Herat",
        "is_disaggregated": false,
        // Stale from when the toggle was on; would fail both checks if live
        "age_json": [],
        "sex_male": -5
    });

    assert_eq!(validate(&schema, &value).unwrap(), None);
}

/// Absent toggle behaves like a false toggle.
#[test]
fn test_absent_toggle_gates_fields_off() {
    let schema = figure_schema();
    let value = json!({"uuid": "f1", "district": "Herat", "age_json": []});
    assert_eq!(validate(&schema, &value).unwrap(), None);
}

/// Flipping the toggle between passes changes the live set without any
/// caching artifacts.
#[test]
fn test_field_set_recomputed_every_pass() {
    let schema = figure_schema();
    let mut value = json!({
        "uuid": "f1",
        "district": "Herat",
        "is_disaggregated": true,
        "age_json": []
    });

    assert!(validate(&schema, &value).unwrap().is_some());

    value["is_disaggregated"] = json!(false);
    assert_eq!(validate(&schema, &value).unwrap(), None);

    value["is_disaggregated"] = json!(true);
    assert!(validate(&schema, &value).unwrap().is_some());
}
