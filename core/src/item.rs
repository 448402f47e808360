//! Item, enchantment, and potion definitions, and the registry set
//! predicates resolve against.

use crate::{Registry, TagRegistry};

/// An item definition.
///
/// Only the properties the match rules consult live here; everything else
/// about an item belongs to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    max_damage: Option<u32>,
}

impl Item {
    /// An item without durability (never damageable).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An item with durability: it can absorb `max_damage` points before
    /// breaking.
    #[must_use]
    pub fn with_max_damage(max_damage: u32) -> Self {
        Self {
            max_damage: Some(max_damage),
        }
    }

    /// Total damage capacity, if the item is damageable.
    #[must_use]
    pub fn max_damage(&self) -> Option<u32> {
        self.max_damage
    }

    /// Returns `true` if the item has durability.
    #[must_use]
    pub fn is_damageable(&self) -> bool {
        self.max_damage.is_some()
    }
}

/// An enchantment definition. Match rules only need its identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Enchantment;

/// A potion definition. Match rules only need its identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Potion;

/// The lookup tables an item rule parses and matches against.
///
/// Assembled once by the host from its content definitions, then shared
/// read-only with every rule.
#[derive(Debug, Clone)]
pub struct Registries {
    items: Registry<Item>,
    enchantments: Registry<Enchantment>,
    potions: Registry<Potion>,
    item_tags: TagRegistry,
}

impl Registries {
    /// Assemble the registry set.
    #[must_use]
    pub fn new(
        items: Registry<Item>,
        enchantments: Registry<Enchantment>,
        potions: Registry<Potion>,
        item_tags: TagRegistry,
    ) -> Self {
        Self {
            items,
            enchantments,
            potions,
            item_tags,
        }
    }

    /// The item registry.
    #[must_use]
    pub fn items(&self) -> &Registry<Item> {
        &self.items
    }

    /// The enchantment registry.
    #[must_use]
    pub fn enchantments(&self) -> &Registry<Enchantment> {
        &self.enchantments
    }

    /// The potion registry.
    #[must_use]
    pub fn potions(&self) -> &Registry<Potion> {
        &self.potions
    }

    /// The item tag registry.
    #[must_use]
    pub fn item_tags(&self) -> &TagRegistry {
        &self.item_tags
    }
}
