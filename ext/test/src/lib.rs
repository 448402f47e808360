//! crit-test: sample content universe and conformance fixtures.
//!
//! Provides a small, fixed set of items, enchantments, potions, and tags
//! for testing rules against. This is the universe the CLI and the
//! conformance fixtures resolve ids in.
//!
//! # Example
//!
//! ```
//! use crit_test::{sample_registries, stacks};
//!
//! let reg = sample_registries();
//! assert!(reg.items().contains(&"apple".parse().unwrap()));
//! assert_eq!(stacks::apple(3).count(), 3);
//! ```

use crit::{
    Enchantment, Ident, Item, Potion, Registries, RegistryBuilder, TagRegistryBuilder,
};

pub mod fixture;

/// Parse a known-good identifier. Only for fixed test data.
///
/// # Panics
///
/// Panics if `s` is not a valid identifier.
#[must_use]
pub fn id(s: &str) -> Ident {
    s.parse().unwrap_or_else(|e| panic!("bad test id {s:?}: {e}"))
}

/// The sample universe:
///
/// | registry | entries |
/// |----------|---------|
/// | item | `apple`, `bread`, `iron_sword` (250 durability), `gold_sword` (32), `spellbook`, `bottle` |
/// | enchantment | `sharpness`, `unbreaking`, `mending` |
/// | potion | `healing`, `swiftness`, `strong_swiftness` |
/// | item tag | `swords`, `food` |
#[must_use]
pub fn sample_registries() -> Registries {
    let items = RegistryBuilder::new("item")
        .insert(id("apple"), Item::new())
        .insert(id("bread"), Item::new())
        .insert(id("iron_sword"), Item::with_max_damage(250))
        .insert(id("gold_sword"), Item::with_max_damage(32))
        .insert(id("spellbook"), Item::new())
        .insert(id("bottle"), Item::new())
        .build();

    let enchantments = RegistryBuilder::new("enchantment")
        .insert(id("sharpness"), Enchantment)
        .insert(id("unbreaking"), Enchantment)
        .insert(id("mending"), Enchantment)
        .build();

    let potions = RegistryBuilder::new("potion")
        .insert(id("healing"), Potion)
        .insert(id("swiftness"), Potion)
        .insert(id("strong_swiftness"), Potion)
        .build();

    let item_tags = TagRegistryBuilder::new("item tag")
        .tag(id("swords"), [id("iron_sword"), id("gold_sword")])
        .tag(id("food"), [id("apple"), id("bread")])
        .build();

    Registries::new(items, enchantments, potions, item_tags)
}

/// Stack constructors over the sample universe.
pub mod stacks {
    use crit::ItemStack;

    use super::id;
    use crit::Ident;

    /// A stack of apples.
    #[must_use]
    pub fn apple(count: i32) -> ItemStack {
        ItemStack::of(id("apple")).with_count(count)
    }

    /// One iron sword with `damage` points taken.
    #[must_use]
    pub fn worn_sword(damage: i32) -> ItemStack {
        ItemStack::of(id("iron_sword")).with_damage(damage)
    }

    /// A spellbook with the given stored enchantments.
    #[must_use]
    pub fn spellbook(stored: &[(&str, i32)]) -> ItemStack {
        stored
            .iter()
            .fold(ItemStack::of(id("spellbook")), |stack, (ench, level)| {
                stack.with_stored(id(ench), *level)
            })
    }

    /// A bottle brewed with `potion`.
    #[must_use]
    pub fn bottled(potion: Ident) -> ItemStack {
        ItemStack::of(id("bottle")).with_potion(potion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn universe_is_consistent() {
        let reg = sample_registries();

        // every tag member resolves in the item registry
        for tag in reg.item_tags().ids() {
            let set = reg.item_tags().get(tag).unwrap();
            for member in set.members() {
                assert!(
                    reg.items().contains(member),
                    "tag {tag} member {member} is not a registered item"
                );
            }
        }
    }

    #[test]
    fn stack_helpers_use_registered_items() {
        let reg = sample_registries();
        assert!(reg.items().contains(stacks::apple(1).item()));
        assert!(reg.items().contains(stacks::worn_sword(0).item()));
        assert!(reg.items().contains(stacks::spellbook(&[]).item()));
        assert!(reg.items().contains(stacks::bottled(id("healing")).item()));
    }
}
