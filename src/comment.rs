//! Comment model: single line comments and ordered comment collections.
//!
//! A [`Comment`] is one comment line without its leading prefix character.
//! A [`CommentCollection`] is the ordered block of comment lines written
//! above a section or property ("pre-comments"), convertible to and from a
//! single multi-line string.
//!
//! ## Examples
//!
//! ```rust
//! use inifile::{Comment, CommentCollection};
//!
//! let block = CommentCollection::from_text("first line\nsecond line");
//! assert_eq!(block.len(), 2);
//! assert_eq!(block.to_text(), "first line\nsecond line");
//!
//! let inline = Comment::new(" enable verbose output").unwrap();
//! assert_eq!(inline.prefix(), ';');
//! ```

use crate::{Error, Result};

/// The comment prefix used when none is specified.
pub const DEFAULT_COMMENT_PREFIX: char = ';';

/// A single comment line.
///
/// Holds the text after the prefix character, and the prefix the comment was
/// read with (or [`DEFAULT_COMMENT_PREFIX`] when constructed directly). The
/// text of a line comment may not contain a line break; use
/// [`CommentCollection::from_text`] for multi-line comment blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    prefix: char,
    value: String,
}

impl Comment {
    /// Creates a comment with the default `;` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if `value` contains a line break.
    pub fn new(value: &str) -> Result<Self> {
        Self::with_prefix(value, DEFAULT_COMMENT_PREFIX)
    }

    /// Creates a comment with an explicit prefix character.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if `value` contains a line break.
    pub fn with_prefix(value: &str, prefix: char) -> Result<Self> {
        if value.contains(['\n', '\r']) {
            return Err(Error::invalid_name(
                value,
                "line comment may not contain a line break",
            ));
        }
        Ok(Comment {
            prefix,
            value: value.to_string(),
        })
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn prefix(&self) -> char {
        self.prefix
    }

    /// Replaces the prefix character.
    pub fn set_prefix(&mut self, prefix: char) {
        self.prefix = prefix;
    }
}

/// An ordered block of comment lines.
///
/// Empty by default; iteration order is the order the lines appear in the
/// file, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentCollection {
    comments: Vec<Comment>,
}

impl CommentCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection by splitting `text` on `\r\n`, `\r`, or `\n`.
    ///
    /// An empty input yields an empty collection, not an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inifile::CommentCollection;
    ///
    /// assert!(CommentCollection::from_text("").is_empty());
    /// assert_eq!(CommentCollection::from_text("a\r\nb\rc\nd").len(), 4);
    /// ```
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::new();
        }
        let comments = split_lines(text)
            .map(|line| Comment {
                prefix: DEFAULT_COMMENT_PREFIX,
                value: line.to_string(),
            })
            .collect();
        CommentCollection { comments }
    }

    /// Joins the comment lines back into one string separated by `\n`.
    #[must_use]
    pub fn to_text(&self) -> String {
        let lines: Vec<&str> = self.comments.iter().map(|c| c.value()).collect();
        lines.join("\n")
    }

    pub fn push(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn clear(&mut self) {
        self.comments.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Comment> {
        self.comments.iter()
    }
}

impl<'a> IntoIterator for &'a CommentCollection {
    type Item = &'a Comment;
    type IntoIter = std::slice::Iter<'a, Comment>;

    fn into_iter(self) -> Self::IntoIter {
        self.comments.iter()
    }
}

impl IntoIterator for CommentCollection {
    type Item = Comment;
    type IntoIter = std::vec::IntoIter<Comment>;

    fn into_iter(self) -> Self::IntoIter {
        self.comments.into_iter()
    }
}

impl FromIterator<Comment> for CommentCollection {
    fn from_iter<T: IntoIterator<Item = Comment>>(iter: T) -> Self {
        CommentCollection {
            comments: iter.into_iter().collect(),
        }
    }
}

/// Splits on `\r\n`, `\r`, and `\n`, treating `\r\n` as one separator.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').flat_map(|chunk| {
        let chunk = chunk.strip_suffix('\r').unwrap_or(chunk);
        chunk.split('\r')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_line_break_in_line_comment() {
        assert!(Comment::new("one\ntwo").is_err());
        assert!(Comment::new("one\rtwo").is_err());
        assert!(Comment::new("one two").is_ok());
    }

    #[test]
    fn from_text_handles_mixed_line_endings() {
        let block = CommentCollection::from_text("a\r\nb\rc\nd");
        let values: Vec<&str> = block.iter().map(|c| c.value()).collect();
        assert_eq!(values, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn empty_text_is_empty_collection() {
        assert!(CommentCollection::from_text("").is_empty());
    }

    #[test]
    fn round_trips_through_text() {
        let block = CommentCollection::from_text("top\nmiddle\nbottom");
        assert_eq!(block.to_text(), "top\nmiddle\nbottom");
    }

    #[test]
    fn crlf_is_one_separator() {
        let block = CommentCollection::from_text("a\r\nb");
        assert_eq!(block.len(), 2);
    }
}
