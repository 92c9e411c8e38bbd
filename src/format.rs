//! INI Text Format
//!
//! This module documents the line-oriented key/value format as implemented
//! by this library.
//!
//! # Overview
//!
//! Input is processed one physical line at a time; there are no line
//! continuations. Every line is one of four things:
//!
//! ```text
//! line      := comment | section | keyvalue | blank
//! comment   := COMMENT_PREFIX text
//! section   := '[' name ']' [ inline_comment ]
//! keyvalue  := key '=' value [ inline_comment ]
//! value     := quoted | unquoted
//! quoted    := '"' ( escape | any-char-except-quote-or-backslash )* '"'
//! escape    := '\' ('0'|'a'|'b'|'t'|'r'|'n'|';'|'#'|'"'|'\\'|any-other-char)
//! ```
//!
//! Lines are trimmed before classification; blank lines are skipped.
//!
//! # Comments
//!
//! A line whose first non-space character is a recognized comment prefix
//! (`;` and `#` by default, configurable) is a comment. Consecutive comment
//! lines queue up and attach as the "pre-comments" of the next section or
//! property. An inline comment may also follow a section header or a value
//! on the same line:
//!
//! ```text
//! ; database connection block
//! [db] ; primary
//! host = localhost ; only reachable on the LAN
//! ```
//!
//! # Sections
//!
//! `[name]` starts a section; subsequent key/value lines belong to it until
//! the next header. Properties before the first header belong to the
//! implicit default section. Section and key names are unique ignoring
//! case; what happens to repeats is governed by the configured
//! [`DuplicatePolicy`](crate::DuplicatePolicy):
//!
//! - **FirstWin**: keep the earliest occurrence
//! - **LastWin**: keep the latest occurrence, preserving the relative order
//!   of survivors
//! - **Merge**: fold later sections' properties into the first occurrence
//! - **ThrowError**: abort the whole load
//!
//! # Values
//!
//! An unquoted value runs from the `=` to the first comment-prefix
//! character or end of line, trimmed on both sides. A quoted value starts
//! with `"` and may carry any character via the escape table:
//!
//! | Escape | Character         |
//! |--------|-------------------|
//! | `\0`   | NUL               |
//! | `\a`   | BEL               |
//! | `\b`   | backspace         |
//! | `\t`   | tab               |
//! | `\r`   | carriage return   |
//! | `\n`   | line feed         |
//! | `\;` `\#` `\"` `\\` | the literal character |
//!
//! A backslash before any other character yields that character unchanged;
//! unknown escapes are deliberately not an error.
//!
//! ```rust
//! let doc = inifile::from_str(r#"motd = "line one\nline two \; literally""#).unwrap();
//! assert_eq!(
//!     doc.default_section().get("motd").unwrap().value(),
//!     "line one\nline two ; literally",
//! );
//! ```
//!
//! When writing, a value is quoted if it was parsed quoted, contains a
//! character the unquoted grammar cannot carry (`;`, `#`, `"`, `\`, control
//! characters), or has leading/trailing whitespace. This auto-promotion
//! guarantees a written file re-parses to the same values even when they
//! were constructed programmatically.
//!
//! # Malformed input
//!
//! Parsing is resilient: a malformed line produces one
//! [`ParseError`](crate::ParseError) on the document and is skipped.
//! Distinct diagnostics exist for missing closing brackets, empty section
//! names, missing `=`, empty keys, unterminated quotes, incomplete escapes,
//! trailing content after a closing quote, and every violated resource
//! limit. Only the `ThrowError` duplicate policies abort a load.
