//! `ItemPredicate`: the item-stack match rule.
//!
//! A rule is a conjunction of independent field checks against one stack:
//! tag membership, item identity, count range, durability range, attached
//! data, applied and stored enchantments, and potion identity. Absent
//! fields constrain nothing. Rules are immutable after parse and evaluated
//! with short-circuit AND.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::{
    CritError, EnchantPredicate, Ident, IntBounds, ItemStack, NbtPredicate, Registries,
};

/// A match rule over item stacks.
///
/// Build one from JSON with [`from_json`](Self::from_json) (ids validated
/// against the registries) or in code with [`builder`](Self::builder).
///
/// # Example
///
/// ```
/// use crit::{IntBounds, ItemPredicate, ItemStack};
/// use crit_test::sample_registries;
///
/// let reg = sample_registries();
/// let rule = ItemPredicate::builder()
///     .of_items(["game:apple".parse().unwrap()])
///     .with_count(IntBounds::at_least(2))
///     .build();
///
/// let stack = ItemStack::of("apple".parse().unwrap()).with_count(3);
/// assert!(rule.matches(&reg, &stack));
/// assert!(!rule.matches(&reg, &stack.with_count(1)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPredicate {
    tag: Option<Ident>,
    items: Option<BTreeSet<Ident>>,
    count: IntBounds,
    durability: IntBounds,
    enchantments: Vec<EnchantPredicate>,
    stored_enchantments: Vec<EnchantPredicate>,
    potion: Option<Ident>,
    nbt: NbtPredicate,
}

impl ItemPredicate {
    /// The rule with every field unconstrained. Matches every stack.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Returns `true` if every field is unconstrained.
    #[must_use]
    pub fn is_any(&self) -> bool {
        self.tag.is_none()
            && self.items.is_none()
            && self.count.is_any()
            && self.durability.is_any()
            && self.enchantments.is_empty()
            && self.stored_enchantments.is_empty()
            && self.potion.is_none()
            && self.nbt.is_any()
    }

    /// Test a stack against this rule.
    ///
    /// Field checks are independent and combined with short-circuit AND.
    /// A non-trivial durability constraint rejects stacks whose item has
    /// no durability; lookups against an unregistered stack item fail
    /// closed.
    #[must_use]
    pub fn matches(&self, registries: &Registries, stack: &ItemStack) -> bool {
        if self.is_any() {
            return true;
        }
        if let Some(tag) = &self.tag {
            if !registries.item_tags().is_member(tag, stack.item()) {
                return false;
            }
        }
        if let Some(items) = &self.items {
            if !items.contains(stack.item()) {
                return false;
            }
        }
        if !self.count.matches(stack.count()) {
            return false;
        }
        if !self.durability.is_any() {
            let Some(max_damage) = registries
                .items()
                .get(stack.item())
                .and_then(crate::Item::max_damage)
            else {
                return false;
            };
            let remaining = max_damage as i32 - stack.damage();
            if !self.durability.matches(remaining) {
                return false;
            }
        }
        if !self.nbt.matches(stack.nbt()) {
            return false;
        }
        if !self
            .enchantments
            .iter()
            .all(|rule| rule.contained_in(stack.enchantments()))
        {
            return false;
        }
        if !self
            .stored_enchantments
            .iter()
            .all(|rule| rule.contained_in(stack.stored_enchantments()))
        {
            return false;
        }
        match &self.potion {
            Some(potion) => stack.potion() == Some(potion),
            None => true,
        }
    }

    /// Parse a rule from JSON. `null` yields the unconstrained rule.
    ///
    /// Item, tag, potion, and enchantment ids are resolved against the
    /// registries so authoring mistakes surface at load time.
    ///
    /// # Errors
    ///
    /// - [`CritError::DisallowedKey`] when the legacy `data` key is present
    /// - [`CritError::UnknownId`] for unregistered item, tag, potion, or
    ///   enchantment ids
    /// - [`CritError::InvalidIdent`], [`CritError::InvalidBounds`],
    ///   [`CritError::InvalidData`], [`CritError::InvalidConfig`] for
    ///   malformed fields
    pub fn from_json(registries: &Registries, value: &Value) -> Result<Self, CritError> {
        if value.is_null() {
            return Ok(Self::any());
        }
        let Value::Object(map) = value else {
            return Err(CritError::InvalidConfig {
                source: format!("expected item rule object, got {value}"),
            });
        };

        if map.contains_key("data") {
            return Err(CritError::DisallowedKey { key: "data" });
        }

        let count = IntBounds::from_json(map.get("count"), "count")?;
        let durability = IntBounds::from_json(map.get("durability"), "durability")?;
        let nbt = NbtPredicate::from_json(map.get("nbt"))?;

        let items = match map.get("items") {
            None | Some(Value::Null) => None,
            Some(Value::Array(entries)) => {
                let mut set = BTreeSet::new();
                for entry in entries {
                    let Value::String(raw) = entry else {
                        return Err(CritError::InvalidConfig {
                            source: format!("expected item id string, got {entry}"),
                        });
                    };
                    let id = Ident::parse(raw)?;
                    registries.items().get_or_unknown(&id)?;
                    set.insert(id);
                }
                Some(set)
            }
            Some(other) => {
                return Err(CritError::InvalidConfig {
                    source: format!("expected item id array, got {other}"),
                })
            }
        };

        let tag = match map.get("tag") {
            None | Some(Value::Null) => None,
            Some(Value::String(raw)) => {
                let id = Ident::parse(raw)?;
                registries.item_tags().get_or_unknown(&id)?;
                Some(id)
            }
            Some(other) => {
                return Err(CritError::InvalidConfig {
                    source: format!("expected tag id string, got {other}"),
                })
            }
        };

        let potion = match map.get("potion") {
            None | Some(Value::Null) => None,
            Some(Value::String(raw)) => {
                let id = Ident::parse(raw)?;
                registries.potions().get_or_unknown(&id)?;
                Some(id)
            }
            Some(other) => {
                return Err(CritError::InvalidConfig {
                    source: format!("expected potion id string, got {other}"),
                })
            }
        };

        let enchantments = EnchantPredicate::from_json_array(registries, map.get("enchantments"))?;
        let stored_enchantments =
            EnchantPredicate::from_json_array(registries, map.get("stored_enchantments"))?;

        Ok(Self {
            tag,
            items,
            count,
            durability,
            enchantments,
            stored_enchantments,
            potion,
            nbt,
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
            Some(Value::Array(entries)) => entries
                .iter()
                .map(|entry| Self::from_json(registries, entry))
                .collect(),
            Some(other) => Err(CritError::InvalidConfig {
                source: format!("expected item rule array, got {other}"),
            }),
        }
    }

    /// Serialize to the wire form. The unconstrained rule serializes to
    /// `null`; `count`, `durability`, and `nbt` always appear (as `null`
    /// when unconstrained), other fields only when set.
    #[must_use]
    pub fn to_json(&self) -> Value {
        if self.is_any() {
            return Value::Null;
        }

        let mut map = Map::new();
        if let Some(items) = &self.items {
            map.insert(
                "items".to_owned(),
                Value::Array(
                    items
                        .iter()
                        .map(|id| Value::String(id.to_string()))
                        .collect(),
                ),
            );
        }
        if let Some(tag) = &self.tag {
            map.insert("tag".to_owned(), Value::String(tag.to_string()));
        }
        map.insert("count".to_owned(), self.count.to_json());
        map.insert("durability".to_owned(), self.durability.to_json());
        map.insert("nbt".to_owned(), self.nbt.to_json());
        if !self.enchantments.is_empty() {
            map.insert(
                "enchantments".to_owned(),
                Value::Array(self.enchantments.iter().map(EnchantPredicate::to_json).collect()),
            );
        }
        if !self.stored_enchantments.is_empty() {
            map.insert(
                "stored_enchantments".to_owned(),
                Value::Array(
                    self.stored_enchantments
                        .iter()
                        .map(EnchantPredicate::to_json)
                        .collect(),
                ),
            );
        }
        if let Some(potion) = &self.potion {
            map.insert("potion".to_owned(), Value::String(potion.to_string()));
        }
        Value::Object(map)
    }

    /// Start building a rule in code. Builder ids are taken as given; only
    /// [`from_json`](Self::from_json) validates against registries.
    #[must_use]
    pub fn builder() -> Builder {
        Builder::default()
    }
}

/// Fluent builder for [`ItemPredicate`], for fixtures and generated data.
#[derive(Debug, Default)]
pub struct Builder {
    predicate: ItemPredicate,
}

impl Builder {
    /// Constrain to an explicit set of item ids.
    #[must_use]
    pub fn of_items(mut self, items: impl IntoIterator<Item = Ident>) -> Self {
        self.predicate.items = Some(items.into_iter().collect());
        self
    }

    /// Constrain to members of a tag.
    #[must_use]
    pub fn of_tag(mut self, tag: Ident) -> Self {
        self.predicate.tag = Some(tag);
        self
    }

    /// Constrain the stack size.
    #[must_use]
    pub fn with_count(mut self, count: IntBounds) -> Self {
        self.predicate.count = count;
        self
    }

    /// Constrain the remaining durability.
    #[must_use]
    pub fn with_durability(mut self, durability: IntBounds) -> Self {
        self.predicate.durability = durability;
        self
    }

    /// Require a specific brewed potion.
    #[must_use]
    pub fn is_potion(mut self, potion: Ident) -> Self {
        self.predicate.potion = Some(potion);
        self
    }

    /// Require the given template in the stack's attached data.
    #[must_use]
    pub fn has_nbt(mut self, template: Value) -> Self {
        self.predicate.nbt = NbtPredicate::new(template);
        self
    }

    /// Add an applied-enchantment rule.
    #[must_use]
    pub fn has_enchantment(mut self, rule: EnchantPredicate) -> Self {
        self.predicate.enchantments.push(rule);
        self
    }

    /// Add a stored-enchantment rule.
    #[must_use]
    pub fn has_stored_enchantment(mut self, rule: EnchantPredicate) -> Self {
        self.predicate.stored_enchantments.push(rule);
        self
    }

    /// Finish the rule.
    #[must_use]
    pub fn build(self) -> ItemPredicate {
        self.predicate
    }
}
