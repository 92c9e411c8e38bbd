//! The document model: the root of a parsed INI file.
//!
//! A [`Document`] owns a default section for properties that appear before
//! any `[name]` header, the ordered list of named sections, the set of
//! recognized comment-prefix characters, and the parse diagnostics collected
//! while it was loaded. Section names are unique ignoring case, looked up
//! through the same derived-index scheme as [`Section`](crate::Section).
//!
//! ## Examples
//!
//! ```rust
//! use inifile::{Document, Property, Section};
//!
//! let mut doc = Document::new();
//! doc.default_section_mut()
//!     .add(Property::new("verbose", "true").unwrap())
//!     .unwrap();
//!
//! let mut db = Section::new("Db").unwrap();
//! db.add(Property::new("Host", "localhost").unwrap()).unwrap();
//! doc.add_section(db).unwrap();
//!
//! assert!(doc.get("db").is_some());
//! assert_eq!(inifile::to_string(&doc), "verbose = true\n\n[Db]\nHost = localhost\n");
//! ```

use indexmap::{IndexMap, IndexSet};

use crate::comment::DEFAULT_COMMENT_PREFIX;
use crate::error::ParseError;
use crate::section::Section;
use crate::{Error, Result};

/// Name of the implicit section holding properties that precede any header.
pub const DEFAULT_SECTION_NAME: &str = "$DEFAULT";

/// An in-memory INI document.
///
/// The default section always exists and cannot be removed, only cleared.
/// Named sections keep their parse/insertion order, which is also the order
/// the writer emits them in. Cloning is a deep copy.
#[derive(Debug, Clone)]
pub struct Document {
    default_section: Section,
    sections: Vec<Section>,
    index: IndexMap<String, usize>,
    comment_prefixes: IndexSet<char>,
    default_comment_prefix: char,
    parse_errors: Vec<ParseError>,
}

impl Document {
    /// Creates an empty document recognizing `;` and `#` comment prefixes.
    #[must_use]
    pub fn new() -> Self {
        Document {
            default_section: Section::new_unchecked(DEFAULT_SECTION_NAME),
            sections: Vec::new(),
            index: IndexMap::new(),
            comment_prefixes: IndexSet::from([';', '#']),
            default_comment_prefix: DEFAULT_COMMENT_PREFIX,
            parse_errors: Vec::new(),
        }
    }

    /// The implicit section for properties before the first `[name]` header.
    #[must_use]
    pub fn default_section(&self) -> &Section {
        &self.default_section
    }

    pub fn default_section_mut(&mut self) -> &mut Section {
        &mut self.default_section
    }

    /// The named sections in insertion order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Mutable iteration over the named sections.
    ///
    /// Section names are immutable, so this cannot invalidate the name
    /// index.
    pub fn sections_mut(&mut self) -> impl Iterator<Item = &mut Section> {
        self.sections.iter_mut()
    }

    /// Appends a section, rejecting case-insensitive duplicate names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateSection`] if a section with the same name
    /// (ignoring case) already exists.
    pub fn add_section(&mut self, section: Section) -> Result<()> {
        let key = section.index_key();
        if self.index.contains_key(&key) {
            return Err(Error::DuplicateSection(section.name().to_string()));
        }
        self.index.insert(key, self.sections.len());
        self.sections.push(section);
        Ok(())
    }

    /// Looks up a section by name, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Section> {
        let position = *self.index.get(&name.to_lowercase())?;
        self.sections.get(position)
    }

    /// Mutable variant of [`Document::get`].
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Section> {
        let position = *self.index.get(&name.to_lowercase())?;
        self.sections.get_mut(position)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&name.to_lowercase())
    }

    /// Removes and returns the section with the given name, ignoring case.
    ///
    /// The default section is not part of the named list and cannot be
    /// removed through this method.
    pub fn remove(&mut self, name: &str) -> Option<Section> {
        let position = *self.index.get(&name.to_lowercase())?;
        let removed = self.sections.remove(position);
        self.rebuild_index();
        Some(removed)
    }

    /// Number of named sections (the default section is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.default_section.is_empty()
    }

    /// Removes every named section and clears the default section.
    pub fn clear(&mut self) {
        self.default_section.clear();
        self.default_section.set_comment(None);
        self.default_section.pre_comments_mut().clear();
        self.sections.clear();
        self.index.clear();
    }

    /// The characters recognized as comment prefixes when parsing.
    #[must_use]
    pub fn comment_prefixes(&self) -> &IndexSet<char> {
        &self.comment_prefixes
    }

    pub(crate) fn set_comment_prefixes(&mut self, prefixes: IndexSet<char>) {
        self.comment_prefixes = prefixes;
    }

    /// The prefix character the writer uses for comments it emits.
    #[must_use]
    pub fn default_comment_prefix(&self) -> char {
        self.default_comment_prefix
    }

    pub fn set_default_comment_prefix(&mut self, prefix: char) {
        self.default_comment_prefix = prefix;
        self.comment_prefixes.insert(prefix);
    }

    /// Diagnostics collected while this document was parsed.
    ///
    /// Empty for documents built directly or parsed from well-formed input.
    #[must_use]
    pub fn parse_errors(&self) -> &[ParseError] {
        &self.parse_errors
    }

    pub(crate) fn record_error(&mut self, error: ParseError) {
        self.parse_errors.push(error);
    }

    /// Appends without a uniqueness check, leaving the index stale.
    ///
    /// Used by the parser while duplicate section names are still
    /// admissible; [`Document::rebuild_index`] must run before lookups.
    pub(crate) fn push_raw(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Direct positional access into the raw section list for the parser.
    pub(crate) fn section_raw_mut(&mut self, position: usize) -> &mut Section {
        &mut self.sections[position]
    }

    /// Replaces the section list wholesale, rebuilding the index.
    pub(crate) fn replace_sections(&mut self, sections: Vec<Section>) {
        self.sections = sections;
        self.rebuild_index();
    }

    /// Takes the section list out, leaving the document with none.
    pub(crate) fn take_sections(&mut self) -> Vec<Section> {
        self.index.clear();
        std::mem::take(&mut self.sections)
    }

    /// Rebuilds the lowercased-name index from the section list.
    pub(crate) fn rebuild_index(&mut self) {
        self.index.clear();
        for (position, section) in self.sections.iter().enumerate() {
            self.index.insert(section.index_key(), position);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
