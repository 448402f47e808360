//! Inclusive integer ranges for count and durability constraints.
//!
//! `null` or an absent key means unbounded. The wire form is either a bare
//! number (exact match) or an object with optional `min`/`max` keys; the
//! degenerate `min == max` range serializes back to the bare-number form.

use serde_json::{json, Value};

use crate::CritError;

/// An inclusive integer range, open on either side.
///
/// # Example
///
/// ```
/// use crit::IntBounds;
///
/// let bounds = IntBounds::between(2, 4);
/// assert!(!bounds.matches(1));
/// assert!(bounds.matches(3));
/// assert!(bounds.matches(4));
///
/// assert!(IntBounds::ANY.matches(i32::MIN));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntBounds {
    min: Option<i32>,
    max: Option<i32>,
}

impl IntBounds {
    /// The unconstrained range: matches every value.
    pub const ANY: Self = Self {
        min: None,
        max: None,
    };

    /// A range matching exactly `n`.
    #[must_use]
    pub const fn exactly(n: i32) -> Self {
        Self {
            min: Some(n),
            max: Some(n),
        }
    }

    /// A range matching `n` and above.
    #[must_use]
    pub const fn at_least(n: i32) -> Self {
        Self {
            min: Some(n),
            max: None,
        }
    }

    /// A range matching `n` and below.
    #[must_use]
    pub const fn at_most(n: i32) -> Self {
        Self {
            min: None,
            max: Some(n),
        }
    }

    /// A range matching `min..=max`.
    ///
    /// An inverted range (`min > max`) is representable and matches
    /// nothing, mirroring the wire format it round-trips with.
    #[must_use]
    pub const fn between(min: i32, max: i32) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// The lower bound, if constrained.
    #[must_use]
    pub const fn min(&self) -> Option<i32> {
        self.min
    }

    /// The upper bound, if constrained.
    #[must_use]
    pub const fn max(&self) -> Option<i32> {
        self.max
    }

    /// Returns `true` if this range is unconstrained.
    #[must_use]
    pub const fn is_any(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Test a value against the range.
    #[must_use]
    pub fn matches(&self, n: i32) -> bool {
        if self.min.is_some_and(|min| n < min) {
            return false;
        }
        !self.max.is_some_and(|max| n > max)
    }

    /// Parse from a JSON value: `null` means [`ANY`](Self::ANY), a bare
    /// number means [`exactly`](Self::exactly), an object carries optional
    /// `min` and `max` keys.
    ///
    /// # Errors
    ///
    /// Returns [`CritError::InvalidBounds`] for non-integer numbers or any
    /// other JSON shape.
    pub fn from_json(value: Option<&Value>, field: &'static str) -> Result<Self, CritError> {
        match value {
            None | Some(Value::Null) => Ok(Self::ANY),
            Some(number @ Value::Number(_)) => Ok(Self::exactly(as_i32(number, field)?)),
            Some(Value::Object(map)) => {
                let min = map.get("min").map(|v| as_i32(v, field)).transpose()?;
                let max = map.get("max").map(|v| as_i32(v, field)).transpose()?;
                Ok(Self { min, max })
            }
            Some(other) => Err(CritError::InvalidBounds {
                field,
                reason: format!("expected number or {{min, max}} object, got {other}"),
            }),
        }
    }

    /// Serialize to the wire form. [`ANY`](Self::ANY) serializes to `null`,
    /// a degenerate range to a bare number, everything else to an object
    /// with only the constrained keys.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match (self.min, self.max) {
            (None, None) => Value::Null,
            (Some(min), Some(max)) if min == max => json!(min),
            (min, max) => {
                let mut map = serde_json::Map::new();
                if let Some(min) = min {
                    map.insert("min".to_owned(), json!(min));
                }
                if let Some(max) = max {
                    map.insert("max".to_owned(), json!(max));
                }
                Value::Object(map)
            }
        }
    }
}

impl Default for IntBounds {
    fn default() -> Self {
        Self::ANY
    }
}

fn as_i32(value: &Value, field: &'static str) -> Result<i32, CritError> {
    value
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| CritError::InvalidBounds {
            field,
            reason: format!("expected a 32-bit integer, got {value}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_matches_everything() {
        assert!(IntBounds::ANY.matches(0));
        assert!(IntBounds::ANY.matches(i32::MIN));
        assert!(IntBounds::ANY.matches(i32::MAX));
    }

    #[test]
    fn between_is_inclusive() {
        let b = IntBounds::between(2, 4);
        assert!(!b.matches(1));
        assert!(b.matches(2));
        assert!(b.matches(3));
        assert!(b.matches(4));
        assert!(!b.matches(5));
    }

    #[test]
    fn half_open_ranges() {
        assert!(IntBounds::at_least(3).matches(i32::MAX));
        assert!(!IntBounds::at_least(3).matches(2));
        assert!(IntBounds::at_most(3).matches(i32::MIN));
        assert!(!IntBounds::at_most(3).matches(4));
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let b = IntBounds::between(5, 2);
        assert!(!b.matches(1));
        assert!(!b.matches(3));
        assert!(!b.matches(6));
    }

    #[test]
    fn parse_null_and_absent() {
        assert_eq!(
            IntBounds::from_json(None, "count").unwrap(),
            IntBounds::ANY
        );
        assert_eq!(
            IntBounds::from_json(Some(&Value::Null), "count").unwrap(),
            IntBounds::ANY
        );
    }

    #[test]
    fn parse_bare_number() {
        let b = IntBounds::from_json(Some(&json!(3)), "count").unwrap();
        assert_eq!(b, IntBounds::exactly(3));
    }

    #[test]
    fn parse_object() {
        let b = IntBounds::from_json(Some(&json!({"min": 2, "max": 4})), "count").unwrap();
        assert_eq!(b, IntBounds::between(2, 4));

        let b = IntBounds::from_json(Some(&json!({"min": 2})), "count").unwrap();
        assert_eq!(b, IntBounds::at_least(2));
    }

    #[test]
    fn parse_rejects_non_integer() {
        assert!(IntBounds::from_json(Some(&json!(1.5)), "count").is_err());
        assert!(IntBounds::from_json(Some(&json!("3")), "count").is_err());
        assert!(IntBounds::from_json(Some(&json!({"min": "x"})), "count").is_err());
        assert!(IntBounds::from_json(Some(&json!([2, 4])), "count").is_err());
    }

    #[test]
    fn parse_rejects_out_of_range_integer() {
        assert!(IntBounds::from_json(Some(&json!(4_000_000_000_i64)), "count").is_err());
    }

    #[test]
    fn serialize_forms() {
        assert_eq!(IntBounds::ANY.to_json(), Value::Null);
        assert_eq!(IntBounds::exactly(3).to_json(), json!(3));
        assert_eq!(
            IntBounds::between(2, 4).to_json(),
            json!({"min": 2, "max": 4})
        );
        assert_eq!(IntBounds::at_least(2).to_json(), json!({"min": 2}));
    }

    #[test]
    fn json_round_trip() {
        for b in [
            IntBounds::ANY,
            IntBounds::exactly(1),
            IntBounds::between(2, 4),
            IntBounds::at_least(7),
            IntBounds::at_most(-1),
        ] {
            let back = IntBounds::from_json(Some(&b.to_json()), "count").unwrap();
            assert_eq!(back, b);
        }
    }
}
