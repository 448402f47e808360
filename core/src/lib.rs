//! crit: item criteria matching for data-driven game content.
//!
//! The data-definition layer of a game engine: rules that test whether an
//! item stack satisfies a set of authored criteria, for use by systems
//! like advancement triggers.
//!
//! # Architecture
//!
//! - [`Ident`]: namespaced identifier addressing every definition
//! - [`Registry`] / [`TagRegistry`]: frozen id-to-definition tables the
//!   host assembles once at load
//! - [`IntBounds`]: inclusive ranges for count and durability
//! - [`NbtPredicate`]: containment matching over attached structured data
//! - [`EnchantPredicate`]: one enchantment-slot rule
//! - [`ItemPredicate`]: the full item rule, a short-circuit conjunction of
//!   the independent field checks
//!
//! # Key invariants
//!
//! 1. **Absent field means no constraint.** A rule with nothing set
//!    matches every stack.
//!
//! 2. **Validation happens at parse time.** Unknown item, tag, potion,
//!    and enchantment ids are authoring bugs and fail the load with a
//!    readable message; they never silently match nothing.
//!
//! 3. **Rules are immutable after parse.** Evaluation is a pure read.
//!
//! # Example
//!
//! ```
//! use crit::{ItemPredicate, ItemStack};
//! use crit_test::sample_registries;
//! use serde_json::json;
//!
//! let registries = sample_registries();
//!
//! let rule = ItemPredicate::from_json(&registries, &json!({
//!     "tag": "swords",
//!     "durability": {"min": 100},
//! }))
//! .unwrap();
//!
//! let stack = ItemStack::of("iron_sword".parse().unwrap()).with_damage(20);
//! assert!(rule.matches(&registries, &stack));
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod bounds;
mod enchant;
mod ident;
mod item;
mod item_predicate;
mod nbt;
mod registry;
mod stack;
mod tag;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use bounds::IntBounds;
pub use enchant::EnchantPredicate;
pub use ident::{Ident, DEFAULT_NAMESPACE};
pub use item::{Enchantment, Item, Potion, Registries};
pub use item_predicate::{Builder as ItemPredicateBuilder, ItemPredicate};
pub use nbt::NbtPredicate;
pub use registry::{Registry, RegistryBuilder};
pub use stack::ItemStack;
pub use tag::{TagRegistry, TagRegistryBuilder, TagSet};

/// Prelude module for convenient imports.
///
/// ```
/// use crit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        CritError, EnchantPredicate, Enchantment, Ident, IntBounds, Item, ItemPredicate,
        ItemStack, NbtPredicate, Potion, Registries, Registry, RegistryBuilder, TagRegistry,
        TagRegistryBuilder, TagSet,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum nesting depth for structured-data templates.
///
/// Enforced at parse time via [`NbtPredicate::from_json`], so a runaway
/// definition cannot recurse the containment check arbitrarily deep.
pub const MAX_DATA_DEPTH: usize = 32;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from parsing item rules and identifiers.
///
/// All of these surface at data-load time. They are authoring bugs in the
/// definition files: fix the definition and reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CritError {
    /// A legacy key is present and no longer accepted.
    DisallowedKey {
        /// The offending key.
        key: &'static str,
    },
    /// An id is not registered in the named registry.
    UnknownId {
        /// Which registry was consulted (`"item"`, `"item tag"`, ...).
        registry: &'static str,
        /// The unresolved id.
        id: Ident,
    },
    /// An identifier string is malformed.
    InvalidIdent {
        /// The raw string as written.
        raw: String,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// A count or durability range has the wrong JSON shape.
    InvalidBounds {
        /// Which field was being parsed.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
    /// A structured-data payload could not be used as a template.
    InvalidData {
        /// What was wrong with it.
        reason: String,
    },
    /// A structured-data template nests deeper than [`MAX_DATA_DEPTH`].
    DepthExceeded {
        /// Actual depth of the template.
        depth: usize,
        /// Maximum allowed depth.
        max: usize,
    },
    /// A field has the wrong overall JSON shape.
    InvalidConfig {
        /// The underlying message.
        source: String,
    },
}

impl std::fmt::Display for CritError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DisallowedKey { key } => {
                write!(f, "disallowed legacy key \"{key}\" found")
            }
            Self::UnknownId { registry, id } => {
                write!(f, "unknown {registry} id \"{id}\"")
            }
            Self::InvalidIdent { raw, reason } => {
                write!(f, "invalid identifier \"{raw}\": {reason}")
            }
            Self::InvalidBounds { field, reason } => {
                write!(f, "invalid \"{field}\" range: {reason}")
            }
            Self::InvalidData { reason } => {
                write!(f, "invalid data template: {reason}")
            }
            Self::DepthExceeded { depth, max } => {
                write!(
                    f,
                    "data template nesting depth is {depth}, but maximum allowed is {max}"
                )
            }
            Self::InvalidConfig { source } => {
                write!(f, "invalid rule: {source}")
            }
        }
    }
}

impl std::error::Error for CritError {}
