//! `ItemStack`: the live value an item rule is tested against.
//!
//! A stack is a snapshot of what the engine holds in a slot: which item,
//! how many, damage taken so far, attached structured data, applied and
//! stored enchantments, and the brewed potion if any. Stacks deserialize
//! from definition files so tools can describe them inline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Ident;

/// A stack of one item kind with its instance state.
///
/// # Example
///
/// ```
/// use crit::ItemStack;
///
/// let stack = ItemStack::of("iron_sword".parse().unwrap())
///     .with_damage(30)
///     .enchanted("sharpness".parse().unwrap(), 3);
///
/// assert_eq!(stack.count(), 1);
/// assert_eq!(stack.enchantments().get(&"sharpness".parse().unwrap()), Some(&3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    item: Ident,
    #[serde(default = "default_count")]
    count: i32,
    #[serde(default)]
    damage: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nbt: Option<Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    enchantments: BTreeMap<Ident, i32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    stored_enchantments: BTreeMap<Ident, i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    potion: Option<Ident>,
}

fn default_count() -> i32 {
    1
}

impl ItemStack {
    /// A single unit of `item` with no instance state.
    #[must_use]
    pub fn of(item: Ident) -> Self {
        Self {
            item,
            count: 1,
            damage: 0,
            nbt: None,
            enchantments: BTreeMap::new(),
            stored_enchantments: BTreeMap::new(),
            potion: None,
        }
    }

    /// Set the stack size.
    #[must_use]
    pub fn with_count(mut self, count: i32) -> Self {
        self.count = count;
        self
    }

    /// Set damage taken so far.
    #[must_use]
    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = damage;
        self
    }

    /// Attach structured data.
    #[must_use]
    pub fn with_nbt(mut self, nbt: Value) -> Self {
        self.nbt = Some(nbt);
        self
    }

    /// Apply an enchantment at the given level.
    #[must_use]
    pub fn enchanted(mut self, enchantment: Ident, level: i32) -> Self {
        self.enchantments.insert(enchantment, level);
        self
    }

    /// Store an enchantment (as on an enchanted book) at the given level.
    #[must_use]
    pub fn with_stored(mut self, enchantment: Ident, level: i32) -> Self {
        self.stored_enchantments.insert(enchantment, level);
        self
    }

    /// Set the brewed potion.
    #[must_use]
    pub fn with_potion(mut self, potion: Ident) -> Self {
        self.potion = Some(potion);
        self
    }

    /// The item id.
    #[must_use]
    pub fn item(&self) -> &Ident {
        &self.item
    }

    /// The stack size.
    #[must_use]
    pub fn count(&self) -> i32 {
        self.count
    }

    /// Damage taken so far.
    #[must_use]
    pub fn damage(&self) -> i32 {
        self.damage
    }

    /// Attached structured data, if any.
    #[must_use]
    pub fn nbt(&self) -> Option<&Value> {
        self.nbt.as_ref()
    }

    /// Applied enchantments (id to level).
    #[must_use]
    pub fn enchantments(&self) -> &BTreeMap<Ident, i32> {
        &self.enchantments
    }

    /// Stored enchantments (id to level).
    #[must_use]
    pub fn stored_enchantments(&self) -> &BTreeMap<Ident, i32> {
        &self.stored_enchantments
    }

    /// The brewed potion, if any.
    #[must_use]
    pub fn potion(&self) -> Option<&Ident> {
        self.potion.as_ref()
    }
}
