//! Tags: named groups of registry entries.
//!
//! A tag is an engine-defined set of ids used for group membership tests
//! (`#swords`, `#food`). Predicates reference tags by id; membership is a
//! set lookup against the frozen [`TagRegistry`].

use std::collections::BTreeSet;

use crate::{CritError, Ident};

/// One tag: the set of member ids grouped under a tag id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    members: BTreeSet<Ident>,
}

impl TagSet {
    /// Create an empty tag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tag from its members.
    #[must_use]
    pub fn from_members(members: impl IntoIterator<Item = Ident>) -> Self {
        Self {
            members: members.into_iter().collect(),
        }
    }

    /// Returns `true` if `id` is a member of this tag.
    #[must_use]
    pub fn contains(&self, id: &Ident) -> bool {
        self.members.contains(id)
    }

    /// Members in sorted order.
    pub fn members(&self) -> impl Iterator<Item = &Ident> {
        self.members.iter()
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the tag has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Builder for a [`TagRegistry`]. Same freeze discipline as
/// [`RegistryBuilder`](crate::RegistryBuilder).
pub struct TagRegistryBuilder {
    name: &'static str,
    tags: Vec<(Ident, TagSet)>,
}

impl TagRegistryBuilder {
    /// Create an empty builder. `name` appears in lookup-failure messages
    /// (e.g. `"item tag"`).
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            tags: Vec::new(),
        }
    }

    /// Register a tag with its members.
    #[must_use]
    pub fn tag(mut self, id: Ident, members: impl IntoIterator<Item = Ident>) -> Self {
        self.tags.push((id, TagSet::from_members(members)));
        self
    }

    /// Freeze into an immutable tag registry.
    #[must_use]
    pub fn build(self) -> TagRegistry {
        let mut inner = crate::RegistryBuilder::new(self.name);
        for (id, set) in self.tags {
            inner = inner.insert(id, set);
        }
        TagRegistry {
            inner: inner.build(),
        }
    }
}

/// Immutable tag-id to [`TagSet`] map for one registry category.
///
/// # Example
///
/// ```
/// use crit::{Ident, TagRegistryBuilder};
///
/// let id = |s: &str| s.parse::<Ident>().unwrap();
/// let tags = TagRegistryBuilder::new("item tag")
///     .tag(id("swords"), [id("iron_sword"), id("gold_sword")])
///     .build();
///
/// assert!(tags.is_member(&id("swords"), &id("iron_sword")));
/// assert!(!tags.is_member(&id("swords"), &id("apple")));
/// ```
#[derive(Debug, Clone)]
pub struct TagRegistry {
    inner: crate::Registry<TagSet>,
}

impl TagRegistry {
    /// Look up a tag by id.
    #[must_use]
    pub fn get(&self, id: &Ident) -> Option<&TagSet> {
        self.inner.get(id)
    }

    /// Look up a tag, failing with [`CritError::UnknownId`].
    pub fn get_or_unknown(&self, id: &Ident) -> Result<&TagSet, CritError> {
        self.inner.get_or_unknown(id)
    }

    /// Returns `true` if `tag` is registered.
    #[must_use]
    pub fn contains(&self, tag: &Ident) -> bool {
        self.inner.contains(tag)
    }

    /// Returns `true` if `member` belongs to the tag `tag`.
    ///
    /// An unregistered tag has no members.
    #[must_use]
    pub fn is_member(&self, tag: &Ident, member: &Ident) -> bool {
        self.inner.get(tag).is_some_and(|set| set.contains(member))
    }

    /// Registered tag ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &Ident> {
        self.inner.ids()
    }

    /// Number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if no tags are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Ident {
        s.parse().unwrap()
    }

    fn sample() -> TagRegistry {
        TagRegistryBuilder::new("item tag")
            .tag(id("swords"), [id("iron_sword"), id("gold_sword")])
            .tag(id("food"), [id("apple")])
            .tag(id("empty"), [])
            .build()
    }

    #[test]
    fn membership() {
        let tags = sample();
        assert!(tags.is_member(&id("swords"), &id("iron_sword")));
        assert!(tags.is_member(&id("food"), &id("apple")));
        assert!(!tags.is_member(&id("food"), &id("iron_sword")));
    }

    #[test]
    fn unregistered_tag_has_no_members() {
        let tags = sample();
        assert!(!tags.is_member(&id("missing"), &id("apple")));
    }

    #[test]
    fn empty_tag_contains_nothing() {
        let tags = sample();
        assert!(tags.contains(&id("empty")));
        assert!(!tags.is_member(&id("empty"), &id("apple")));
        assert!(tags.get(&id("empty")).unwrap().is_empty());
    }

    #[test]
    fn unknown_tag_error() {
        let tags = sample();
        let err = tags.get_or_unknown(&id("missing")).unwrap_err();
        assert!(err.to_string().contains("item tag"));
    }

    #[test]
    fn members_sorted() {
        let set = TagSet::from_members([id("pear"), id("apple")]);
        let members: Vec<String> = set.members().map(ToString::to_string).collect();
        assert_eq!(members, vec!["game:apple", "game:pear"]);
    }
}
