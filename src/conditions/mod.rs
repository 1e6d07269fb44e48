//! Validation primitives for formtree
//!
//! Each condition checks exactly one value and returns a message on failure,
//! nothing on success. Conditions are pure and synchronous.
//!
//! # Semantics
//!
//! - Only `Required` and `RequiredString` report absent/null values; every
//!   other condition passes when the value is absent, so optional fields
//!   never fail format or bound checks.
//! - A field may carry several conditions; the first failing one wins.
//! - Bound checks are deliberately asymmetric: `LengthGreaterThan(n)` fails
//!   on `length <= n` while `LengthSmallerThan(n)` fails only on
//!   `length > n`, and the numeric bounds follow the same convention. Do not
//!   "fix" this — callers rely on the exact boundary behavior.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

/// A single-value validation check
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Fails when the value is absent or null.
    ///
    /// An empty string is a present value and passes; rejecting empty or
    /// whitespace-only strings is `RequiredString`'s contract.
    Required,
    /// Fails when the value is absent, null, not a string, or only whitespace
    RequiredString,
    /// Fails when the string value is in the forbidden set
    Blacklist(BTreeSet<String>),
    /// Fails when the value is present but not in the allowed set
    Whitelist(BTreeSet<String>),
    /// Fails when the string/array length is `<=` the bound (exclusive)
    LengthGreaterThan(usize),
    /// Fails when the string/array length is `>` the bound (bound itself passes)
    LengthSmallerThan(usize),
    /// Fails when the numeric value is `<=` the bound (exclusive)
    GreaterThan(f64),
    /// Fails when the numeric value is `>` the bound (bound itself passes)
    SmallerThan(f64),
    /// Fails when the string value does not look like an http(s) URL
    UrlFormat,
    /// Fails when the string value is not a plain identifier
    /// (non-empty, `[A-Za-z0-9_-]` only; covers UUIDs and slug-style ids)
    IdentifierFormat,
    /// Caller-supplied check with the same contract
    Custom(fn(&Value) -> Option<String>),
}

impl Condition {
    /// Checks one value, returning a message on failure
    pub fn check(&self, value: &Value) -> Option<String> {
        match self {
            Condition::Required => {
                if value.is_null() {
                    Some("This field is required".into())
                } else {
                    None
                }
            }
            Condition::RequiredString => match value.as_str() {
                Some(s) if !s.trim().is_empty() => None,
                _ => Some("This field is required".into()),
            },
            Condition::Blacklist(forbidden) => match value.as_str() {
                Some(s) if forbidden.contains(s) => {
                    Some(format!("The value '{}' is not allowed", s))
                }
                _ => None,
            },
            Condition::Whitelist(allowed) => {
                if value.is_null() {
                    return None;
                }
                match value.as_str() {
                    Some(s) if allowed.contains(s) => None,
                    _ => Some("The value is not one of the allowed options".into()),
                }
            }
            Condition::LengthGreaterThan(bound) => match length_of(value) {
                Some(len) if len <= *bound => {
                    Some(format!("Length must be greater than {}", bound))
                }
                _ => None,
            },
            Condition::LengthSmallerThan(bound) => match length_of(value) {
                Some(len) if len > *bound => {
                    Some(format!("Length must be smaller than {}", bound))
                }
                _ => None,
            },
            Condition::GreaterThan(bound) => match value.as_f64() {
                Some(v) if v <= *bound => {
                    Some(format!("The value must be greater than {}", bound))
                }
                _ => None,
            },
            Condition::SmallerThan(bound) => match value.as_f64() {
                Some(v) if v > *bound => {
                    Some(format!("The value must be smaller than {}", bound))
                }
                _ => None,
            },
            Condition::UrlFormat => match value.as_str() {
                Some(s) if !url_regex().is_match(s) => Some("Enter a valid URL".into()),
                _ => None,
            },
            Condition::IdentifierFormat => match value.as_str() {
                Some(s) if !identifier_regex().is_match(s) => {
                    Some("Enter a valid identifier".into())
                }
                _ => None,
            },
            Condition::Custom(check) => check(value),
        }
    }
}

/// Runs conditions in order and returns the first failure, if any
pub fn first_failure(conditions: &[Condition], value: &Value) -> Option<String> {
    conditions.iter().find_map(|condition| condition.check(value))
}

/// Length of a string (in characters) or an array, if measurable
fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("url pattern is valid")
    })
}

fn identifier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("identifier pattern is valid"))
}
