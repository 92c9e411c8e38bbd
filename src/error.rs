//! Error types for INI parsing and writing.
//!
//! Two layers of error reporting exist:
//!
//! - [`Error`]: fatal failures that abort a load or save (I/O failures,
//!   invalid names passed to constructors, `ThrowError` duplicate policies)
//! - [`ParseError`]: per-line diagnostics collected on the
//!   [`Document`](crate::Document) while parsing continues past the bad line
//!
//! Parsing is resilient by default: a malformed line is skipped, a
//! [`ParseError`] is recorded, and the next line is processed. Only the
//! `ThrowError` duplicate policies escalate to a fatal [`Error`].
//!
//! ## Examples
//!
//! ```rust
//! let doc = inifile::from_str("[unclosed\nkey = value").unwrap();
//!
//! assert_eq!(doc.parse_errors().len(), 1);
//! assert_eq!(doc.parse_errors()[0].line, 1);
//! ```

use std::fmt;
use thiserror::Error;

/// Fatal errors raised by load, save, and model-construction operations.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A name rejected by the model's validation rules
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// Duplicate section name under the `ThrowError` section policy,
    /// or rejected by a direct `add_section` call
    #[error("duplicate section name {0:?}")]
    DuplicateSection(String),

    /// Duplicate property name under the `ThrowError` key policy,
    /// or rejected by a direct `Section::add` call
    #[error("duplicate key {key:?} in section {section:?}")]
    DuplicateKey { section: String, key: String },

    /// Custom error
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates an I/O error from a display message.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates an invalid-name error.
    pub fn invalid_name(name: &str, reason: &str) -> Self {
        Error::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

/// The category of a collected, non-fatal parse diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("missing closing bracket in section header")]
    MissingClosingBracket,
    #[error("section name is empty")]
    EmptySectionName,
    #[error("invalid section name")]
    InvalidSectionName,
    #[error("missing equals sign")]
    MissingEquals,
    #[error("key is empty")]
    EmptyKey,
    #[error("unterminated quote")]
    UnterminatedQuote,
    #[error("incomplete escape sequence at end of value")]
    IncompleteEscape,
    #[error("invalid content after closing quote")]
    TrailingContent,
    #[error("invalid quote format")]
    InvalidQuoteFormat,
    #[error("line length limit exceeded")]
    LineTooLong,
    #[error("value length limit exceeded")]
    ValueTooLong,
    #[error("section count limit exceeded")]
    TooManySections,
    #[error("property count limit exceeded")]
    TooManyProperties,
    #[error("pending comment limit exceeded, oldest comment dropped")]
    TooManyPendingComments,
}

/// Maximum number of characters of the offending line kept in a [`ParseError`].
const REPORTED_LINE_MAX: usize = 64;

/// A non-fatal diagnostic recorded for a skipped or degraded input line.
///
/// Collected on the [`Document`](crate::Document) during parsing when error
/// collection is enabled (the default). `line` is 1-based; `text` holds the
/// raw line, truncated for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub text: String,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(line: usize, text: &str, kind: ParseErrorKind) -> Self {
        let text = if text.chars().count() > REPORTED_LINE_MAX {
            let mut truncated: String = text.chars().take(REPORTED_LINE_MAX).collect();
            truncated.push_str("...");
            truncated
        } else {
            text.to_string()
        };
        ParseError { line, text, kind }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {:?}", self.line, self.kind, self.text)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
