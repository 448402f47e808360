//! Enchantment match rules.
//!
//! One rule constrains one enchantment slot of a stack: a specific
//! enchantment at a level in bounds, or (with no enchantment named) any
//! enchantment whose level is in bounds.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::{CritError, Ident, IntBounds, Registries};

/// A rule against a stack's enchantment map.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use crit::{EnchantPredicate, Ident, IntBounds};
///
/// let sharpness: Ident = "sharpness".parse().unwrap();
/// let rule = EnchantPredicate::new(Some(sharpness.clone()), IntBounds::at_least(3));
///
/// let mut applied = BTreeMap::new();
/// applied.insert(sharpness, 4);
/// assert!(rule.contained_in(&applied));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnchantPredicate {
    enchantment: Option<Ident>,
    levels: IntBounds,
}

impl EnchantPredicate {
    /// The unconstrained rule: satisfied by any enchantment map.
    pub const ANY: Self = Self {
        enchantment: None,
        levels: IntBounds::ANY,
    };

    /// Create a rule for an optional enchantment id and a level range.
    #[must_use]
    pub fn new(enchantment: Option<Ident>, levels: IntBounds) -> Self {
        Self {
            enchantment,
            levels,
        }
    }

    /// The constrained enchantment id, if any.
    #[must_use]
    pub fn enchantment(&self) -> Option<&Ident> {
        self.enchantment.as_ref()
    }

    /// The level bounds.
    #[must_use]
    pub fn levels(&self) -> IntBounds {
        self.levels
    }

    /// Test the rule against an enchantment-to-level map.
    ///
    /// - named enchantment: it must be present with its level in bounds
    /// - unnamed with level bounds: some entry's level must be in bounds
    /// - fully unconstrained: always satisfied
    #[must_use]
    pub fn contained_in(&self, applied: &BTreeMap<Ident, i32>) -> bool {
        match &self.enchantment {
            Some(id) => match applied.get(id) {
                Some(level) => self.levels.matches(*level),
                None => false,
            },
            None if !self.levels.is_any() => {
                applied.values().any(|level| self.levels.matches(*level))
            }
            None => true,
        }
    }

    /// Parse from a JSON object with optional `enchantment` and `levels`
    /// keys. The enchantment id is validated against the registry.
    ///
    /// # Errors
    ///
    /// [`CritError::UnknownId`] for an unregistered enchantment,
    /// [`CritError::InvalidConfig`] for a non-object.
    pub fn from_json(registries: &Registries, value: &Value) -> Result<Self, CritError> {
        let Value::Object(map) = value else {
            return Err(CritError::InvalidConfig {
                source: format!("expected enchantment rule object, got {value}"),
            });
        };

        let enchantment = match map.get("enchantment") {
            None | Some(Value::Null) => None,
            Some(Value::String(raw)) => {
                let id = Ident::parse(raw)?;
                registries.enchantments().get_or_unknown(&id)?;
                Some(id)
            }
            Some(other) => {
                return Err(CritError::InvalidConfig {
                    source: format!("expected enchantment id string, got {other}"),
                })
            }
        };

        let levels = IntBounds::from_json(map.get("levels"), "levels")?;
        Ok(Self {
            enchantment,
            levels,
        })
    }

    /// Parse a JSON array of rules. `null` or absent means no rules.
    ///
    /// # Errors
    ///
    /// Propagates element errors; a non-array value is
    /// [`CritError::InvalidConfig`].
    pub fn from_json_array(
        registries: &Registries,
        value: Option<&Value>,
    ) -> Result<Vec<Self>, CritError> {
        match value {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| Self::from_json(registries, item))
                .collect(),
            Some(other) => Err(CritError::InvalidConfig {
                source: format!("expected enchantment rule array, got {other}"),
            }),
        }
    }

    /// Serialize to the wire object form.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        if let Some(id) = &self.enchantment {
            map.insert("enchantment".to_owned(), Value::String(id.to_string()));
        }
        let levels = self.levels.to_json();
        if !levels.is_null() {
            map.insert("levels".to_owned(), levels);
        }
        Value::Object(map)
    }
}
