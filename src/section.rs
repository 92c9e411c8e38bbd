//! The section model: an ordered, case-insensitively unique property list.
//!
//! A [`Section`] owns its properties. Lookup by name goes through a derived
//! index (lowercased name → position) kept in insertion order via
//! [`IndexMap`], so iteration and serialization order always match the order
//! properties were added or parsed. Bulk structural changes made by the
//! parser and the duplicate resolver rebuild the index once instead of per
//! mutation.
//!
//! ## Examples
//!
//! ```rust
//! use inifile::{Property, Section};
//!
//! let mut db = Section::new("Db").unwrap();
//! db.add(Property::new("Host", "localhost").unwrap()).unwrap();
//!
//! // lookup is case-insensitive
//! assert!(db.get("HOST").is_some());
//! // a second property with the same name (any casing) is rejected
//! assert!(db.add(Property::new("host", "other").unwrap()).is_err());
//! ```

use indexmap::IndexMap;

use crate::comment::{Comment, CommentCollection};
use crate::property::{validate_name, Property};
use crate::{Error, Result};

/// An ordered group of properties under one `[name]` header.
#[derive(Debug, Clone)]
pub struct Section {
    name: String,
    properties: Vec<Property>,
    comment: Option<Comment>,
    pre_comments: CommentCollection,
    index: IndexMap<String, usize>,
}

impl Section {
    /// Creates an empty section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if `name` is empty, has surrounding
    /// whitespace, contains a line break, or contains `[` or `]`.
    pub fn new(name: &str) -> Result<Self> {
        validate_name(name, &['[', ']'])?;
        Ok(Self::new_unchecked(name))
    }

    /// Constructor for names that bypass validation (the default section).
    pub(crate) fn new_unchecked(name: &str) -> Self {
        Section {
            name: name.to_string(),
            properties: Vec::new(),
            comment: None,
            pre_comments: CommentCollection::new(),
            index: IndexMap::new(),
        }
    }

    /// The section name. Immutable after construction.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The properties in insertion order.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Mutable iteration over the properties.
    ///
    /// Property names are immutable, so this cannot invalidate the name
    /// index.
    pub fn properties_mut(&mut self) -> impl Iterator<Item = &mut Property> {
        self.properties.iter_mut()
    }

    /// Appends a property, rejecting case-insensitive duplicate names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if a property with the same name
    /// (ignoring case) already exists.
    pub fn add(&mut self, property: Property) -> Result<()> {
        let key = property.index_key();
        if self.index.contains_key(&key) {
            return Err(Error::DuplicateKey {
                section: self.name.clone(),
                key: property.name().to_string(),
            });
        }
        self.index.insert(key, self.properties.len());
        self.properties.push(property);
        Ok(())
    }

    /// Looks up a property by name, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Property> {
        let position = *self.index.get(&name.to_lowercase())?;
        self.properties.get(position)
    }

    /// Mutable variant of [`Section::get`].
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Property> {
        let position = *self.index.get(&name.to_lowercase())?;
        self.properties.get_mut(position)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&name.to_lowercase())
    }

    /// Removes and returns the property with the given name, ignoring case.
    pub fn remove(&mut self, name: &str) -> Option<Property> {
        let position = *self.index.get(&name.to_lowercase())?;
        let removed = self.properties.remove(position);
        self.rebuild_index();
        Some(removed)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Removes all properties.
    pub fn clear(&mut self) {
        self.properties.clear();
        self.index.clear();
    }

    /// The inline comment on the `[name]` header line, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&Comment> {
        self.comment.as_ref()
    }

    pub fn set_comment(&mut self, comment: Option<Comment>) {
        self.comment = comment;
    }

    /// The block of comment lines preceding the header.
    #[must_use]
    pub fn pre_comments(&self) -> &CommentCollection {
        &self.pre_comments
    }

    pub fn pre_comments_mut(&mut self) -> &mut CommentCollection {
        &mut self.pre_comments
    }

    pub(crate) fn set_pre_comments(&mut self, comments: CommentCollection) {
        self.pre_comments = comments;
    }

    /// Appends without a uniqueness check, leaving the index stale.
    ///
    /// Used by the parser while duplicates are still admissible; callers must
    /// follow up with [`Section::rebuild_index`] before the next lookup.
    pub(crate) fn push_raw(&mut self, property: Property) {
        self.properties.push(property);
    }

    /// Replaces the property list wholesale, rebuilding the index.
    pub(crate) fn replace_properties(&mut self, properties: Vec<Property>) {
        self.properties = properties;
        self.rebuild_index();
    }

    /// Takes the property list out, leaving the section empty.
    pub(crate) fn take_properties(&mut self) -> Vec<Property> {
        self.index.clear();
        std::mem::take(&mut self.properties)
    }

    /// Rebuilds the lowercased-name index from the property list.
    ///
    /// With duplicates present the latest position wins; the duplicate
    /// resolver removes them before lookups matter.
    pub(crate) fn rebuild_index(&mut self) {
        self.index.clear();
        for (position, property) in self.properties.iter().enumerate() {
            self.index.insert(property.index_key(), position);
        }
    }

    /// Key used by the document's case-insensitive section index.
    pub(crate) fn index_key(&self) -> String {
        self.name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_rejects_brackets() {
        assert!(Section::new("ok").is_ok());
        assert!(Section::new("bad[name").is_err());
        assert!(Section::new("bad]name").is_err());
        assert!(Section::new("").is_err());
        assert!(Section::new(" padded ").is_err());
    }

    #[test]
    fn case_insensitive_lookup_and_uniqueness() {
        let mut section = Section::new("Foo").unwrap();
        section.add(Property::new("Key", "1").unwrap()).unwrap();
        assert_eq!(section.get("KEY").map(|p| p.value()), Some("1"));
        assert!(section.contains("key"));
        assert!(matches!(
            section.add(Property::new("kEy", "2").unwrap()),
            Err(Error::DuplicateKey { .. })
        ));
    }

    #[test]
    fn remove_keeps_index_consistent() {
        let mut section = Section::new("s").unwrap();
        section.add(Property::new("a", "1").unwrap()).unwrap();
        section.add(Property::new("b", "2").unwrap()).unwrap();
        section.add(Property::new("c", "3").unwrap()).unwrap();
        assert_eq!(section.remove("B").map(|p| p.value().to_string()), Some("2".to_string()));
        assert_eq!(section.get("c").map(|p| p.value()), Some("3"));
        assert_eq!(section.len(), 2);
    }

    #[test]
    fn clone_is_deep() {
        let mut original = Section::new("s").unwrap();
        original.add(Property::new("k", "old").unwrap()).unwrap();
        let mut copy = original.clone();
        copy.get_mut("k").unwrap().set_value("new");
        assert_eq!(original.get("k").unwrap().value(), "old");
        assert_eq!(copy.get("k").unwrap().value(), "new");
    }
}
