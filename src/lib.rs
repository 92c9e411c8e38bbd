//! # inifile
//!
//! A resilient parser and writer for line-oriented INI configuration files.
//!
//! ## What does it do?
//!
//! `inifile` parses sections, properties, comments, and quoted values with
//! escape sequences into an explicit in-memory [`Document`] model, and writes
//! that model back to text with byte-faithful round-tripping of values. It is
//! built for hostile input: malformed lines are skipped and reported instead
//! of aborting the load, and configurable resource limits bound memory growth.
//!
//! ## Key Features
//!
//! - **Resilient by default**: one bad line never poisons the rest of the
//!   file; diagnostics accumulate on the [`Document`]
//! - **Comment preservation**: comment blocks and inline comments survive a
//!   parse/write round trip attached to their sections and properties
//! - **Quoted values**: `"..."` values with a fixed escape table carry any
//!   character, including `;`, `#`, line breaks, and surrounding whitespace
//! - **Duplicate policies**: FirstWin / LastWin / Merge / ThrowError for
//!   repeated section and key names, independently configurable
//! - **Security limits**: line length, value length, section count, property
//!   count, and pending-comment ceilings for untrusted input
//! - **No unsafe code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! let doc = inifile::from_str(
//!     "[Db]\nHost = \"local host\"\n; connection port\nPort = 5432",
//! )
//! .unwrap();
//!
//! let db = doc.get("Db").unwrap();
//! assert_eq!(db.get("Host").unwrap().value(), "local host");
//! assert_eq!(db.get("port").unwrap().value(), "5432"); // lookups ignore case
//!
//! // writing reproduces an equivalent, re-parseable file
//! let text = inifile::to_string(&doc);
//! let again = inifile::from_str(&text).unwrap();
//! assert_eq!(again.get("Db").unwrap().get("Host").unwrap().value(), "local host");
//! ```
//!
//! ## Building documents programmatically
//!
//! ```rust
//! use inifile::{Document, Property, Section};
//!
//! let mut doc = Document::new();
//! let mut server = Section::new("server").unwrap();
//! server.add(Property::new("bind", "0.0.0.0:8080").unwrap()).unwrap();
//! server.add(Property::new("motd", "  spaced out  ").unwrap()).unwrap();
//! doc.add_section(server).unwrap();
//!
//! // values that would be ambiguous unquoted are quoted automatically
//! assert_eq!(
//!     inifile::to_string(&doc),
//!     "[server]\nbind = 0.0.0.0:8080\nmotd = \"  spaced out  \"\n",
//! );
//! ```
//!
//! ## Hardening against untrusted input
//!
//! ```rust
//! use inifile::{DuplicatePolicy, IniOptions};
//!
//! let options = IniOptions::new()
//!     .with_max_line_length(4096)
//!     .with_max_sections(1000)
//!     .with_max_properties(10_000)
//!     .with_key_policy(DuplicatePolicy::LastWin);
//!
//! let doc = inifile::from_str_with_options("[s]\nk = v", options).unwrap();
//! assert!(doc.parse_errors().is_empty());
//! ```
//!
//! ## Concurrency
//!
//! Parsing and writing are synchronous single passes. A [`Document`] is not
//! safe for concurrent mutation; callers needing shared access must
//! serialize externally or work on independent clones (cloning is a deep
//! copy).
//!
//! ## Format
//!
//! See the [`format`] module for the full text format description.

pub mod comment;
pub mod document;
pub mod error;
mod escape;
pub mod format;
pub mod options;
pub mod parser;
pub mod property;
mod resolve;
pub mod section;
mod writer;

pub use comment::{Comment, CommentCollection, DEFAULT_COMMENT_PREFIX};
pub use document::{Document, DEFAULT_SECTION_NAME};
pub use error::{Error, ParseError, ParseErrorKind, Result};
pub use options::{DuplicatePolicy, IniOptions, Limits};
pub use parser::Parser;
pub use property::Property;
pub use section::Section;

use std::fs;
use std::io;
use std::path::Path;

/// Parses INI text into a [`Document`] with default options.
///
/// # Examples
///
/// ```rust
/// let doc = inifile::from_str("[general]\nname = demo").unwrap();
/// assert_eq!(doc.get("general").unwrap().get("name").unwrap().value(), "demo");
/// ```
///
/// # Errors
///
/// Fails only when a `ThrowError` duplicate policy hits a repeated name (not
/// possible with the default policies); malformed lines are collected on the
/// document instead.
pub fn from_str(input: &str) -> Result<Document> {
    from_str_with_options(input, IniOptions::default())
}

/// Parses INI text with custom options.
///
/// # Examples
///
/// ```rust
/// use inifile::{DuplicatePolicy, IniOptions};
///
/// let options = IniOptions::new().with_key_policy(DuplicatePolicy::LastWin);
/// let doc = inifile::from_str_with_options("k = 1\nk = 2", options).unwrap();
/// assert_eq!(doc.default_section().get("k").unwrap().value(), "2");
/// ```
///
/// # Errors
///
/// Returns an error when a `ThrowError` duplicate policy hits a repeated
/// name.
pub fn from_str_with_options(input: &str, options: IniOptions) -> Result<Document> {
    Parser::new(options).parse(input)
}

/// Parses INI text, then retains only the named sections for which
/// `predicate` returns `true`.
///
/// The predicate is applied after parsing and duplicate resolution; the
/// default section is always retained.
///
/// # Examples
///
/// ```rust
/// use inifile::IniOptions;
///
/// let doc = inifile::from_str_filtered(
///     "[keep]\na = 1\n[drop]\nb = 2",
///     IniOptions::new(),
///     |name| name.eq_ignore_ascii_case("keep"),
/// )
/// .unwrap();
/// assert!(doc.get("keep").is_some());
/// assert!(doc.get("drop").is_none());
/// ```
///
/// # Errors
///
/// Same failure modes as [`from_str_with_options`].
pub fn from_str_filtered<F>(input: &str, options: IniOptions, predicate: F) -> Result<Document>
where
    F: Fn(&str) -> bool,
{
    let mut doc = from_str_with_options(input, options)?;
    let kept = doc
        .take_sections()
        .into_iter()
        .filter(|section| predicate(section.name()))
        .collect();
    doc.replace_sections(kept);
    Ok(doc)
}

/// Parses INI text from a reader.
///
/// The input must be UTF-8; the whole stream is read before parsing begins
/// (there is no incremental parsing of partial buffers).
///
/// # Errors
///
/// Returns an error if reading fails, the bytes are not valid UTF-8, or a
/// `ThrowError` duplicate policy hits a repeated name.
pub fn from_reader<R: io::Read>(mut reader: R, options: IniOptions) -> Result<Document> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    from_str_with_options(&input, options)
}

/// Parses INI text from bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, or a `ThrowError`
/// duplicate policy hits a repeated name.
pub fn from_slice(bytes: &[u8], options: IniOptions) -> Result<Document> {
    let input = std::str::from_utf8(bytes).map_err(Error::custom)?;
    from_str_with_options(input, options)
}

/// Loads and parses an INI file with default options.
///
/// The file is opened read-only, so concurrent external readers are not
/// blocked.
///
/// # Errors
///
/// Returns an error on I/O failure, invalid UTF-8, or a `ThrowError`
/// duplicate policy hit.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    load_file_with_options(path, IniOptions::default())
}

/// Loads and parses an INI file with custom options.
///
/// # Errors
///
/// Same failure modes as [`load_file`].
pub fn load_file_with_options<P: AsRef<Path>>(path: P, options: IniOptions) -> Result<Document> {
    let input = fs::read_to_string(path.as_ref())?;
    from_str_with_options(&input, options)
}

/// Renders a document to INI text.
///
/// Values that cannot survive the unquoted grammar are quoted and escaped
/// automatically, so the output always re-parses to the same values.
#[must_use]
pub fn to_string(doc: &Document) -> String {
    writer::write_document(doc)
}

/// Renders a document to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn to_writer<W: io::Write>(dest: W, doc: &Document) -> Result<()> {
    writer::write_to(dest, doc)
}

/// Atomically saves a document to a file.
///
/// The text is written to a temporary file in the target's directory, then
/// moved over the target with an atomic rename; on failure the temporary
/// file is removed and the error returned. The original file is never left
/// partially written.
///
/// # Errors
///
/// Returns an error on any I/O failure.
pub fn save_file<P: AsRef<Path>>(doc: &Document, path: P) -> Result<()> {
    writer::save_file(doc, path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_write_parse_is_stable() {
        let input = "top = 1\n\n[Db]\nHost = \"local host\"\n; note\nPort = 5432\n";
        let doc = from_str(input).unwrap();
        let text = to_string(&doc);
        let again = from_str(&text).unwrap();
        assert_eq!(to_string(&again), text);
    }

    #[test]
    fn filtered_load_keeps_default_section() {
        let doc = from_str_filtered(
            "top = 1\n[a]\n[b]",
            IniOptions::new(),
            |name| name == "a",
        )
        .unwrap();
        assert_eq!(doc.default_section().get("top").unwrap().value(), "1");
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn from_slice_rejects_invalid_utf8() {
        assert!(from_slice(&[0xff, 0xfe], IniOptions::new()).is_err());
    }

    #[test]
    fn from_reader_parses() {
        let cursor = io::Cursor::new(b"[s]\nk = v");
        let doc = from_reader(cursor, IniOptions::new()).unwrap();
        assert_eq!(doc.get("s").unwrap().get("k").unwrap().value(), "v");
    }
}
