//! Structured-data (NBT) matching.
//!
//! Item stacks may carry an attached tree of structured data. The predicate
//! side holds a template tree; a stack matches when the template is
//! *contained* in the stack's data:
//!
//! - compounds: every template key must be present and match recursively
//! - lists: every template element must match some candidate element
//! - primitives: plain equality
//!
//! The data representation is [`serde_json::Value`], which is what the
//! definition files are written in.

use serde_json::Value;

use crate::{CritError, MAX_DATA_DEPTH};

/// Template matcher over a stack's attached structured data.
///
/// [`NbtPredicate::ANY`] (no template) matches every stack, including
/// stacks with no data at all.
///
/// # Example
///
/// ```
/// use crit::NbtPredicate;
/// use serde_json::json;
///
/// let pred = NbtPredicate::new(json!({"charges": 2}));
/// assert!(pred.matches(Some(&json!({"charges": 2, "owner": "aria"}))));
/// assert!(!pred.matches(Some(&json!({"charges": 1}))));
/// assert!(!pred.matches(None));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NbtPredicate {
    template: Option<Value>,
}

impl NbtPredicate {
    /// The unconstrained matcher.
    pub const ANY: Self = Self { template: None };

    /// Create a matcher requiring `template` to be contained in the
    /// stack's data.
    #[must_use]
    pub fn new(template: Value) -> Self {
        Self {
            template: Some(template),
        }
    }

    /// Returns `true` if no template is set.
    #[must_use]
    pub fn is_any(&self) -> bool {
        self.template.is_none()
    }

    /// The template, if constrained.
    #[must_use]
    pub fn template(&self) -> Option<&Value> {
        self.template.as_ref()
    }

    /// Test a stack's data against the template.
    ///
    /// With no template this always matches. With a template, a stack
    /// without data never matches.
    #[must_use]
    pub fn matches(&self, data: Option<&Value>) -> bool {
        match &self.template {
            None => true,
            Some(template) => data.is_some_and(|candidate| contains(template, candidate)),
        }
    }

    /// Parse from a JSON value. `null` means unconstrained. An object is
    /// used as the template directly; a string must hold an encoded JSON
    /// document and is decoded first.
    ///
    /// # Errors
    ///
    /// - [`CritError::InvalidData`] for undecodable strings or other JSON
    ///   shapes
    /// - [`CritError::DepthExceeded`] when the template nests deeper than
    ///   [`MAX_DATA_DEPTH`]
    pub fn from_json(value: Option<&Value>) -> Result<Self, CritError> {
        let template = match value {
            None | Some(Value::Null) => return Ok(Self::ANY),
            Some(object @ Value::Object(_)) => object.clone(),
            Some(Value::String(raw)) => {
                serde_json::from_str(raw).map_err(|e| CritError::InvalidData {
                    reason: format!("string payload is not valid JSON: {e}"),
                })?
            }
            Some(other) => {
                return Err(CritError::InvalidData {
                    reason: format!("expected object or encoded string, got {other}"),
                })
            }
        };

        let depth = depth_of(&template);
        if depth > MAX_DATA_DEPTH {
            return Err(CritError::DepthExceeded {
                depth,
                max: MAX_DATA_DEPTH,
            });
        }

        Ok(Self {
            template: Some(template),
        })
    }

    /// Serialize to the wire form: the template itself, or `null` when
    /// unconstrained.
    #[must_use]
    pub fn to_json(&self) -> Value {
        self.template.clone().unwrap_or(Value::Null)
    }
}

/// Containment test: is `template` contained in `candidate`?
fn contains(template: &Value, candidate: &Value) -> bool {
    match (template, candidate) {
        (Value::Object(tmpl), Value::Object(cand)) => tmpl
            .iter()
            .all(|(key, tv)| cand.get(key).is_some_and(|cv| contains(tv, cv))),
        (Value::Array(tmpl), Value::Array(cand)) => tmpl
            .iter()
            .all(|tv| cand.iter().any(|cv| contains(tv, cv))),
        _ => template == candidate,
    }
}

fn depth_of(value: &Value) -> usize {
    match value {
        Value::Object(map) => 1 + map.values().map(depth_of).max().unwrap_or(0),
        Value::Array(items) => 1 + items.iter().map(depth_of).max().unwrap_or(0),
        _ => 1,
    }
}
