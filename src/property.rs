//! The key/value pair model.
//!
//! A [`Property`] is one `key = value` line together with its attached
//! comments. Property names are validated at construction and immutable
//! afterwards; the parent [`Section`](crate::Section) relies on that to keep
//! its name index consistent while handing out mutable access to values.

use crate::comment::{Comment, CommentCollection};
use crate::{Error, Result};

/// Validates a section or property name.
///
/// Names must be non-empty, carry no leading or trailing whitespace, and
/// contain no line break. `extra_forbidden` adds per-entity character bans
/// (`[` and `]` for section names).
pub(crate) fn validate_name(name: &str, extra_forbidden: &[char]) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_name(name, "name is empty"));
    }
    if name.trim() != name {
        return Err(Error::invalid_name(
            name,
            "name has leading or trailing whitespace",
        ));
    }
    if name.contains(['\n', '\r']) {
        return Err(Error::invalid_name(name, "name contains a line break"));
    }
    if name.contains(extra_forbidden) {
        return Err(Error::invalid_name(name, "name contains a reserved character"));
    }
    Ok(())
}

/// A single key/value entry owned by a [`Section`](crate::Section).
///
/// # Examples
///
/// ```rust
/// use inifile::Property;
///
/// let mut port = Property::new("Port", "5432").unwrap();
/// assert_eq!(port.name(), "Port");
/// assert!(!port.is_quoted());
///
/// port.set_value("multi\nline");
/// assert!(port.is_quoted()); // auto-promoted, the value needs quoting
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    name: String,
    value: String,
    is_quoted: bool,
    comment: Option<Comment>,
    pre_comments: CommentCollection,
}

impl Property {
    /// Creates an unquoted property.
    ///
    /// If `value` contains a line break the property is created quoted, since
    /// an unquoted value cannot span lines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if `name` is empty, has surrounding
    /// whitespace, or contains a line break.
    pub fn new(name: &str, value: &str) -> Result<Self> {
        validate_name(name, &[])?;
        let mut property = Property {
            name: name.to_string(),
            value: String::new(),
            is_quoted: false,
            comment: None,
            pre_comments: CommentCollection::new(),
        };
        property.set_value(value);
        Ok(property)
    }

    /// Creates a property that will always be written in quoted form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] on an invalid `name`.
    pub fn new_quoted(name: &str, value: &str) -> Result<Self> {
        let mut property = Self::new(name, value)?;
        property.is_quoted = true;
        Ok(property)
    }

    /// The property name. Immutable after construction.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the value.
    ///
    /// A value containing a line break cannot be represented unquoted, so
    /// setting one promotes the property to quoted form. The promotion is
    /// one-way; use [`Property::set_quoted`] to control quoting explicitly.
    pub fn set_value(&mut self, value: &str) {
        if value.contains(['\n', '\r']) {
            self.is_quoted = true;
        }
        self.value = value.to_string();
    }

    /// Whether the value was read from, or will be written in, quoted form.
    #[must_use]
    pub fn is_quoted(&self) -> bool {
        self.is_quoted
    }

    /// Forces or clears the quoted flag.
    ///
    /// Clearing it on a value that still needs quoting has no effect on
    /// output correctness: the writer re-quotes any value that would be
    /// ambiguous unquoted.
    pub fn set_quoted(&mut self, quoted: bool) {
        self.is_quoted = quoted || self.value.contains(['\n', '\r']);
    }

    /// The inline comment following the value on the same line, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&Comment> {
        self.comment.as_ref()
    }

    pub fn set_comment(&mut self, comment: Option<Comment>) {
        self.comment = comment;
    }

    /// The block of comment lines preceding this property.
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

    /// Key used by the case-insensitive name index.
    pub(crate) fn index_key(&self) -> String {
        self.name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_validation() {
        assert!(Property::new("key", "v").is_ok());
        assert!(Property::new("", "v").is_err());
        assert!(Property::new(" key", "v").is_err());
        assert!(Property::new("key ", "v").is_err());
        assert!(Property::new("ke\ny", "v").is_err());
    }

    #[test]
    fn newline_value_promotes_quoting() {
        let mut p = Property::new("k", "plain").unwrap();
        assert!(!p.is_quoted());
        p.set_value("a\nb");
        assert!(p.is_quoted());
        // clearing the flag is refused while the value still spans lines
        p.set_quoted(false);
        assert!(p.is_quoted());
        p.set_value("flat");
        p.set_quoted(false);
        assert!(!p.is_quoted());
    }

    #[test]
    fn index_key_is_case_insensitive() {
        let p = Property::new("HoSt", "x").unwrap();
        assert_eq!(p.index_key(), "host");
    }
}
