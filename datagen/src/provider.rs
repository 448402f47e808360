//! Tag providers and the generator that writes their output.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crit::Ident;
use serde::Serialize;

use crate::DatagenError;

/// The serialized form of one tag file.
///
/// Members keep declaration order; duplicates collapse to the first
/// occurrence. `replace` mirrors the tag format's merge flag: a replacing
/// tag overrides lower-priority data packs instead of appending.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TagFile {
    replace: bool,
    values: Vec<Ident>,
}

impl TagFile {
    /// An empty, appending tag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one member.
    pub fn add(&mut self, id: Ident) -> &mut Self {
        if !self.values.contains(&id) {
            self.values.push(id);
        }
        self
    }

    /// Append several members.
    pub fn add_all(&mut self, ids: impl IntoIterator<Item = Ident>) -> &mut Self {
        for id in ids {
            self.add(id);
        }
        self
    }

    /// Set the merge flag.
    pub fn replace(&mut self, replace: bool) -> &mut Self {
        self.replace = replace;
        self
    }

    /// Members in declaration order.
    #[must_use]
    pub fn values(&self) -> &[Ident] {
        &self.values
    }
}

/// The tags one provider run produces, keyed by tag id.
#[derive(Debug, Default)]
pub struct TagOutput {
    tags: BTreeMap<Ident, TagFile>,
}

impl TagOutput {
    /// An empty output collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The builder for `id`, created empty on first use.
    pub fn tag(&mut self, id: Ident) -> &mut TagFile {
        self.tags.entry(id).or_default()
    }

    /// Tags in sorted id order.
    pub fn iter(&self) -> impl Iterator<Item = (&Ident, &TagFile)> {
        self.tags.iter()
    }

    /// Number of tags declared.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns `true` if no tags were declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// A source of tag declarations for one registry category.
pub trait TagProvider {
    /// Human-readable provider name for progress output.
    fn name(&self) -> &'static str;

    /// Path segment under `tags/`, e.g. `game_events`.
    fn category(&self) -> &'static str;

    /// Name of the registry members are validated against.
    fn registry_name(&self) -> &'static str;

    /// Returns `true` if `id` exists in the provider's registry.
    fn contains(&self, id: &Ident) -> bool;

    /// Declare this provider's tags.
    fn add_tags(&self, out: &mut TagOutput);
}

/// Runs providers and writes their tag files.
///
/// Output layout is `<root>/data/<namespace>/tags/<category>/<path>.json`.
#[derive(Debug, Clone)]
pub struct Generator {
    root: PathBuf,
}

impl Generator {
    /// A generator writing under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The output root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The output path for one tag of one provider.
    #[must_use]
    pub fn path_for(&self, provider: &dyn TagProvider, tag: &Ident) -> PathBuf {
        self.root
            .join("data")
            .join(tag.namespace())
            .join("tags")
            .join(provider.category())
            .join(format!("{}.json", tag.path()))
    }

    /// Run every provider and write its tags. Returns the written paths
    /// in order.
    ///
    /// # Errors
    ///
    /// - [`DatagenError::UnknownMember`] when a tag references an id the
    ///   provider's registry does not contain; nothing is written for a
    ///   provider that fails validation
    /// - [`DatagenError::Io`] when writing fails
    pub fn run(&self, providers: &[&dyn TagProvider]) -> Result<Vec<PathBuf>, DatagenError> {
        let mut written = Vec::new();

        for provider in providers {
            let mut out = TagOutput::new();
            provider.add_tags(&mut out);

            // validate the whole provider before touching the filesystem
            for (tag, file) in out.iter() {
                for member in file.values() {
                    if !provider.contains(member) {
                        return Err(DatagenError::UnknownMember {
                            tag: tag.clone(),
                            member: member.clone(),
                            registry: provider.registry_name(),
                        });
                    }
                }
            }

            for (tag, file) in out.iter() {
                let path = self.path_for(*provider, tag);
                write_json(&path, file)?;
                written.push(path);
            }
        }

        Ok(written)
    }
}

fn write_json(path: &Path, file: &TagFile) -> Result<(), DatagenError> {
    let io_err = |e: std::io::Error| DatagenError::Io {
        path: path.to_path_buf(),
        source: e.to_string(),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut json = serde_json::to_string_pretty(file).map_err(|e| DatagenError::Io {
        path: path.to_path_buf(),
        source: e.to_string(),
    })?;
    json.push('\n');
    fs::write(path, json).map_err(io_err)
}
