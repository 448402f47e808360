//! `Ident`: namespaced identifiers for registry entries and tags.
//!
//! Every definition the data layer can reference (items, enchantments,
//! potions, tags, game events) is addressed by an `Ident` of the form
//! `namespace:path`. Unqualified strings get the [`DEFAULT_NAMESPACE`].

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::CritError;

/// Namespace assumed when an identifier string has no `:` separator.
pub const DEFAULT_NAMESPACE: &str = "game";

/// A namespaced identifier, e.g. `game:iron_sword` or `mod:gear/helmet`.
///
/// Identifiers are validated at construction. The namespace accepts
/// `[a-z0-9_.-]`; the path additionally accepts `/`.
///
/// # Example
///
/// ```
/// use crit::Ident;
///
/// let id: Ident = "iron_sword".parse().unwrap();
/// assert_eq!(id.namespace(), "game");
/// assert_eq!(id.path(), "iron_sword");
/// assert_eq!(id.to_string(), "game:iron_sword");
///
/// assert!("Bad Id".parse::<Ident>().is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ident {
    namespace: String,
    path: String,
}

impl Ident {
    /// Create an identifier from explicit namespace and path parts.
    ///
    /// # Errors
    ///
    /// Returns [`CritError::InvalidIdent`] if either part contains
    /// characters outside the allowed set or is empty.
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Result<Self, CritError> {
        let namespace = namespace.into();
        let path = path.into();

        if namespace.is_empty() || !namespace.chars().all(is_namespace_char) {
            return Err(CritError::InvalidIdent {
                raw: format!("{namespace}:{path}"),
                reason: "namespace must be non-empty [a-z0-9_.-]",
            });
        }
        if path.is_empty() || !path.chars().all(is_path_char) {
            return Err(CritError::InvalidIdent {
                raw: format!("{namespace}:{path}"),
                reason: "path must be non-empty [a-z0-9_.-/]",
            });
        }

        Ok(Self { namespace, path })
    }

    /// Parse an identifier string, applying [`DEFAULT_NAMESPACE`] when the
    /// `namespace:` qualifier is absent.
    ///
    /// # Errors
    ///
    /// Returns [`CritError::InvalidIdent`] for empty parts, a second `:`,
    /// or disallowed characters.
    pub fn parse(raw: &str) -> Result<Self, CritError> {
        match raw.split_once(':') {
            Some((ns, path)) if path.contains(':') => Err(CritError::InvalidIdent {
                raw: format!("{ns}:{path}"),
                reason: "more than one ':' separator",
            }),
            Some((ns, path)) => Self::new(ns, path),
            None => Self::new(DEFAULT_NAMESPACE, raw),
        }
    }

    /// The namespace part.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The path part.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

fn is_namespace_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ident({}:{})", self.namespace, self.path)
    }
}

impl FromStr for Ident {
    type Err = CritError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Identifiers travel as plain strings on the wire.

impl Serialize for Ident {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ident {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(D::Error::custom)
    }
}
