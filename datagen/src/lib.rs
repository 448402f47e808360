//! crit-datagen: static tag-file generation.
//!
//! Providers declare which ids belong to which tags; the [`Generator`]
//! validates every member against the provider's registry and writes one
//! JSON file per tag under `data/<namespace>/tags/<category>/<path>.json`.
//!
//! # Example
//!
//! ```no_run
//! use crit_datagen::{GameEventTagProvider, Generator};
//!
//! let generator = Generator::new("out");
//! let written = generator.run(&[&GameEventTagProvider::new()]).unwrap();
//! for path in written {
//!     println!("wrote {}", path.display());
//! }
//! ```

pub mod game_event;
mod provider;

pub use game_event::{game_event_registry, GameEvent, GameEventTagProvider};
pub use provider::{Generator, TagFile, TagOutput, TagProvider};

use std::path::PathBuf;

use crit::Ident;

/// Errors from running tag generation.
#[derive(Debug)]
pub enum DatagenError {
    /// A tag references an id that is not in the provider's registry.
    UnknownMember {
        /// The tag being generated.
        tag: Ident,
        /// The unresolved member id.
        member: Ident,
        /// Which registry was consulted.
        registry: &'static str,
    },
    /// A filesystem operation failed.
    Io {
        /// The path being written.
        path: PathBuf,
        /// The underlying error message.
        source: String,
    },
}

impl std::fmt::Display for DatagenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownMember {
                tag,
                member,
                registry,
            } => {
                write!(
                    f,
                    "tag \"{tag}\" references unknown {registry} id \"{member}\""
                )
            }
            Self::Io { path, source } => {
                write!(f, "failed to write \"{}\": {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DatagenError {}
